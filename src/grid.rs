//! Decaying 2D force grid behind the displacement demo.
//!
//! The grid is stored as RGBA32F texels so it can be uploaded directly; only
//! R (x force) and G (y force) are ever written.

use glam::Vec2;

use crate::config::GridSettings;

pub const TEXEL_STRIDE: usize = 4;
const IMPULSE_SCALE: f32 = 100.0;
const MAX_POWER: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct ForceGrid {
    size: usize,
    radius: f32,
    strength: f32,
    relaxation: f32,
    data: Vec<f32>,
    dirty: bool,
}

impl ForceGrid {
    pub fn new(settings: &GridSettings) -> Self {
        let size = settings.size.max(1);
        Self {
            size,
            radius: settings.radius,
            strength: settings.strength,
            relaxation: settings.relaxation,
            data: vec![0.0; size * size * TEXEL_STRIDE],
            dirty: false,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Force at cell `(i, j)`, with `j = 0` being the first uploaded row.
    pub fn force(&self, i: usize, j: usize) -> Vec2 {
        let index = TEXEL_STRIDE * (i + self.size * j);
        Vec2::new(self.data[index], self.data[index + 1])
    }

    /// Advances one frame: relax every cell, then push the cells near the
    /// pointer along its velocity.
    ///
    /// `mouse` is in plane UV space (`0..1`, +y up) and `aspect` is the
    /// plane's height over width.
    pub fn step(&mut self, mouse: Vec2, velocity: Vec2, aspect: f32) {
        let mut changed = false;

        for texel in self.data.chunks_exact_mut(TEXEL_STRIDE) {
            for value in &mut texel[..2] {
                let relaxed = *value * self.relaxation;
                changed |= relaxed != *value;
                *value = relaxed;
            }
        }

        if mouse.is_finite() && velocity.is_finite() && velocity != Vec2::ZERO {
            changed |= self.apply_impulse(mouse, velocity, sanitize_aspect(aspect));
        }

        self.dirty |= changed;
    }

    fn apply_impulse(&mut self, mouse: Vec2, velocity: Vec2, aspect: f32) -> bool {
        let size = self.size as f32;
        let grid_x = size * mouse.x;
        let grid_y = size * (1.0 - mouse.y);
        let max_dist = size * self.radius;
        let max_dist_sq = max_dist * max_dist;
        let gain = self.strength * IMPULSE_SCALE;
        let mut changed = false;

        for j in 0..self.size {
            for i in 0..self.size {
                let dx = grid_x - i as f32;
                let dy = grid_y - j as f32;
                let distance_sq = dx * dx / aspect + dy * dy;
                if distance_sq >= max_dist_sq {
                    continue;
                }

                let power = if distance_sq > 0.0 {
                    (max_dist / distance_sq.sqrt()).clamp(0.0, MAX_POWER)
                } else {
                    MAX_POWER
                };

                let index = TEXEL_STRIDE * (i + self.size * j);
                let push_x = gain * velocity.x * power;
                let push_y = gain * velocity.y * power;
                let next_x = self.data[index] + push_x;
                let next_y = self.data[index + 1] - push_y;
                if next_x.is_finite() && next_y.is_finite() {
                    changed |= next_x != self.data[index] || next_y != self.data[index + 1];
                    self.data[index] = next_x;
                    self.data[index + 1] = next_y;
                }
            }
        }
        changed
    }

    /// Whether the data changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
