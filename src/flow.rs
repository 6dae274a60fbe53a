use glam::Vec2;

const VELOCITY_LERP: f32 = 0.1;
const IDLE_DECAY: f32 = 0.9;

/// Smoothed pointer velocity feeding the flow map pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowInput {
    pub mouse: Vec2,
    pub velocity: Vec2,
    last: Option<Vec2>,
}

impl FlowInput {
    /// Feeds this frame's pointer UV, or `None` when the pointer is off the
    /// plane.
    pub fn update(&mut self, uv: Option<Vec2>, dt: f32) {
        match (uv, self.last) {
            (Some(uv), Some(last)) if dt > 0.0 && uv != last => {
                let raw = ((uv - last) / dt).clamp_length_max(1.0);
                if raw.is_finite() {
                    self.velocity = self.velocity.lerp(raw, VELOCITY_LERP);
                }
                self.mouse = uv;
            }
            (Some(uv), _) => {
                self.mouse = uv;
                self.velocity *= IDLE_DECAY;
            }
            (None, _) => self.velocity *= IDLE_DECAY,
        }
        self.velocity = self.velocity.clamp_length_max(1.0);
        self.last = uv;
    }
}
