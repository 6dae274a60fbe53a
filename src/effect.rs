//! Per-plane animation state that does not touch the GPU.
//!
//! `PlaneState::update` runs once per frame with the raycast result and
//! leaves the uniform set ready for drawing; the WebGL side only has to
//! upload what is in `uniforms`.

use glam::{Vec2, Vec3};

use crate::config::Settings;
use crate::demo::Demo;
use crate::error::FxError;
use crate::flow::FlowInput;
use crate::grid::ForceGrid;
use crate::layout::PlaneTransform;
use crate::uniforms::{self, UniformSet};

pub const MAX_FRAME_DT: f32 = 0.1;

#[derive(Debug, Clone)]
pub struct PlaneState {
    pub demo: Demo,
    pub uniforms: UniformSet,
    pub transform: PlaneTransform,
    pub mouse: Vec2,
    pub lerped_mouse: Vec2,
    pub velocity: Vec2,
    pub hover_progress: f32,
    pub peek_radius: f32,
    pub time: f32,
    pub grid: Option<ForceGrid>,
    pub flow: Option<FlowInput>,
    settings: Settings,
    last_uv: Option<Vec2>,
}

impl PlaneState {
    pub fn new(demo: Demo, settings: Settings) -> Self {
        Self {
            demo,
            uniforms: UniformSet::standard(),
            transform: PlaneTransform {
                position: Vec3::ZERO,
                scale: Vec2::ONE,
            },
            mouse: Vec2::ZERO,
            lerped_mouse: Vec2::ZERO,
            velocity: Vec2::ZERO,
            hover_progress: 0.0,
            peek_radius: 0.0,
            time: 0.0,
            grid: demo.uses_force_grid().then(|| ForceGrid::new(&settings.grid)),
            flow: demo.uses_flow_map().then(FlowInput::default),
            settings,
            last_uv: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_image_size(&mut self, width: f32, height: f32) -> Result<(), FxError> {
        self.uniforms
            .set_vec2(uniforms::RESOLUTION, Vec2::new(width, height))
    }

    pub fn set_layout(&mut self, transform: PlaneTransform) -> Result<(), FxError> {
        self.transform = transform;
        self.uniforms.set_vec2(uniforms::SIZE, transform.scale)
    }

    /// Advances one frame. `hit` is the pointer's local hit point on this
    /// plane, if the ray reached it.
    pub fn update(&mut self, hit: Option<Vec2>, dt: f32) -> Result<(), FxError> {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.time += dt;

        if let Some(point) = hit {
            self.mouse = point;
        }
        let uv = hit.map(|point| point + Vec2::splat(0.5));
        self.velocity = match (uv, self.last_uv) {
            (Some(uv), Some(last)) => uv - last,
            _ => Vec2::ZERO,
        };
        self.last_uv = uv;

        self.lerped_mouse = self.lerped_mouse.lerp(self.mouse, self.settings.mouse_lerp);

        let hovered = hit.is_some();
        let hover_lerp = self.settings.hover_lerp;
        let progress_target = if hovered { 1.0 } else { 0.0 };
        self.hover_progress =
            lerp(self.hover_progress, progress_target, hover_lerp).clamp(0.0, 1.0);
        let radius_target = if hovered { self.settings.peek_radius } else { 0.0 };
        self.peek_radius = lerp(self.peek_radius, radius_target, hover_lerp);

        if let Some(grid) = self.grid.as_mut() {
            let mouse_uv = self.mouse + Vec2::splat(0.5);
            grid.step(mouse_uv, self.velocity, self.transform.aspect());
            if grid.take_dirty() {
                if let Some(slot) = self.uniforms.texture_mut(uniforms::DATA_TEXTURE) {
                    slot.touch();
                }
            }
        }

        if let Some(flow) = self.flow.as_mut() {
            flow.update(uv, dt);
        }

        self.uniforms.set_vec2(uniforms::MOUSE, self.mouse)?;
        self.uniforms
            .set_vec2(uniforms::LERPED_MOUSE, self.lerped_mouse)?;
        self.uniforms.set_float(uniforms::TIME, self.time)?;
        self.uniforms
            .set_float(uniforms::PEEK_RADIUS, self.peek_radius)?;
        self.uniforms
            .set_float(uniforms::HOVER_PROGRESS, self.hover_progress)?;
        Ok(())
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
