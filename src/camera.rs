//! Perspective camera placed so one world unit covers one device pixel at
//! `z = 0`.

use glam::{Mat4, Vec2, Vec3};

use crate::raycast::Ray;

pub const FOV_DEGREES: f32 = 75.0;
pub const NEAR: f32 = 1.0;
pub const FAR: f32 = 2000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov: FOV_DEGREES,
            aspect: 1.0,
            near: NEAR,
            far: FAR,
            position: Vec3::ZERO,
        }
    }
}

impl Camera {
    /// Updates the aspect and pulls the camera back so the canvas height in
    /// device pixels exactly fills the vertical field of view.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.aspect = width / height;
        let half_fov = (self.fov * std::f32::consts::PI) / 360.0;
        self.position.z = (height / half_fov.tan()) * 0.5;
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    /// World-space ray through an NDC point.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = (self.projection() * self.view()).inverse();
        let target = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, target - self.position)
    }
}
