use glam::Vec2;

/// Smoothed pointer position in normalized device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointer {
    pub current: Vec2,
    pub target: Vec2,
    lerp: f32,
}

impl Pointer {
    pub fn new(lerp: f32) -> Self {
        Self {
            current: Vec2::ZERO,
            target: Vec2::ZERO,
            lerp,
        }
    }

    /// Records a pointer event at client coordinates over a `width`×`height`
    /// CSS viewport.
    pub fn set_client(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if let Some(ndc) = client_to_ndc(x, y, width, height) {
            self.target = ndc;
        }
    }

    /// Moves `current` one lerp step toward `target`.
    pub fn step(&mut self) -> Vec2 {
        self.current = self.current.lerp(self.target, self.lerp);
        self.current
    }
}

/// Maps client pixels to NDC with +y up. `None` for an empty viewport.
pub fn client_to_ndc(x: f32, y: f32, width: f32, height: f32) -> Option<Vec2> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    Some(Vec2::new(
        2.0 * (x / width) - 1.0,
        2.0 * (1.0 - y / height) - 1.0,
    ))
}
