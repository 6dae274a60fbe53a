use glam::{Vec2, Vec3};

use crate::raycast::PlaneBounds;

/// `getBoundingClientRect` in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ElementRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Where a plane sits in world space so it overlays its DOM element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneTransform {
    pub position: Vec3,
    pub scale: Vec2,
}

impl PlaneTransform {
    pub fn from_rect(rect: ElementRect, dpr: f32, canvas: Vec2) -> Self {
        let w = rect.width * dpr;
        let h = rect.height * dpr;
        let left = rect.left * dpr;
        let top = rect.top * dpr;
        Self {
            scale: Vec2::new(w, h),
            position: Vec3::new(
                left + w * 0.5 - canvas.x * 0.5,
                -top - h * 0.5 + canvas.y * 0.5,
                0.0,
            ),
        }
    }

    /// Height over width, `1` for a degenerate plane.
    pub fn aspect(&self) -> f32 {
        if self.scale.x > 0.0 && self.scale.y > 0.0 {
            self.scale.y / self.scale.x
        } else {
            1.0
        }
    }

    pub fn bounds(&self) -> PlaneBounds {
        PlaneBounds {
            center: self.position,
            scale: self.scale,
        }
    }
}

pub fn device_pixel_ratio(raw: f64, max: f32) -> f32 {
    let raw = raw as f32;
    if !raw.is_finite() || raw <= 0.0 {
        return 1.0;
    }
    raw.clamp(1.0, max.max(1.0))
}
