//! Named shader inputs for one plane.
//!
//! Scalar and vector values are re-sent every frame. Textures carry a version
//! counter instead of data: whoever replaces the backing pixels bumps the
//! version, and the GL side uploads only when the version moved past what it
//! last sent.

use std::collections::BTreeMap;

use crate::error::FxError;

pub const TEXTURE: &str = "uTexture";
pub const TEXTURE2: &str = "uTexture2";
pub const NOISE_TEXTURE: &str = "uNoiseTexture";
pub const DATA_TEXTURE: &str = "uDataTexture";
pub const FLOW: &str = "uFlow";
pub const RESOLUTION: &str = "uResolution";
pub const SIZE: &str = "uSize";
pub const MOUSE: &str = "uMouse";
pub const LERPED_MOUSE: &str = "uLerpedMouse";
pub const TIME: &str = "uTime";
pub const PEEK_RADIUS: &str = "uPeekRadius";
pub const HOVER_PROGRESS: &str = "uHoverProgress";
pub const MODEL_VIEW: &str = "modelViewMatrix";
pub const PROJECTION: &str = "projectionMatrix";

/// Texture units, one per sampler the fragment prelude declares.
pub const SAMPLERS: [(&str, u32); 5] = [
    (TEXTURE, 0),
    (TEXTURE2, 1),
    (NOISE_TEXTURE, 2),
    (DATA_TEXTURE, 3),
    (FLOW, 4),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextureSlot {
    pub unit: u32,
    version: u64,
    uploaded: u64,
}

impl TextureSlot {
    pub fn new(unit: u32) -> Self {
        Self {
            unit,
            version: 0,
            uploaded: 0,
        }
    }

    /// Records that the backing data changed.
    pub fn touch(&mut self) {
        self.version += 1;
    }

    pub fn needs_upload(&self) -> bool {
        self.version > self.uploaded
    }

    pub fn mark_uploaded(&mut self) {
        self.uploaded = self.version;
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2([f32; 2]),
    Mat4([f32; 16]),
    Texture(TextureSlot),
}

impl UniformValue {
    fn kind(&self) -> &'static str {
        match self {
            UniformValue::Float(_) => "float",
            UniformValue::Vec2(_) => "vec2",
            UniformValue::Mat4(_) => "mat4",
            UniformValue::Texture(_) => "sampler2D",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UniformSet {
    values: BTreeMap<String, UniformValue>,
}

impl UniformSet {
    /// The uniforms every demo declares, at their initial values.
    pub fn standard() -> Self {
        let mut set = Self::default();
        for (name, unit) in SAMPLERS {
            set.values
                .insert(name.to_string(), UniformValue::Texture(TextureSlot::new(unit)));
        }
        for name in [RESOLUTION, MOUSE, LERPED_MOUSE] {
            set.values.insert(name.to_string(), UniformValue::Vec2([0.0, 0.0]));
        }
        set.values.insert(SIZE.to_string(), UniformValue::Vec2([1.0, 1.0]));
        for name in [TIME, PEEK_RADIUS, HOVER_PROGRESS] {
            set.values.insert(name.to_string(), UniformValue::Float(0.0));
        }
        for name in [MODEL_VIEW, PROJECTION] {
            set.values.insert(
                name.to_string(),
                UniformValue::Mat4(glam::Mat4::IDENTITY.to_cols_array()),
            );
        }
        set
    }

    /// Assigns a non-texture value. Names not yet present are inserted; an
    /// existing name must keep its kind.
    pub fn set(&mut self, name: &str, value: UniformValue) -> Result<(), FxError> {
        if let UniformValue::Texture(_) = value {
            return Err(FxError::UniformKind {
                name: name.to_string(),
                held: "value",
                given: value.kind(),
            });
        }
        match self.values.get_mut(name) {
            Some(slot) if std::mem::discriminant(slot) != std::mem::discriminant(&value) => {
                Err(FxError::UniformKind {
                    name: name.to_string(),
                    held: slot.kind(),
                    given: value.kind(),
                })
            }
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => {
                self.values.insert(name.to_string(), value);
                Ok(())
            }
        }
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> Result<(), FxError> {
        self.set(name, UniformValue::Float(value))
    }

    pub fn set_vec2(&mut self, name: &str, value: glam::Vec2) -> Result<(), FxError> {
        self.set(name, UniformValue::Vec2(value.to_array()))
    }

    pub fn set_mat4(&mut self, name: &str, value: &glam::Mat4) -> Result<(), FxError> {
        self.set(name, UniformValue::Mat4(value.to_cols_array()))
    }

    pub fn get(&self, name: &str) -> Option<&UniformValue> {
        self.values.get(name)
    }

    pub fn texture(&self, name: &str) -> Option<&TextureSlot> {
        match self.values.get(name) {
            Some(UniformValue::Texture(slot)) => Some(slot),
            _ => None,
        }
    }

    pub fn texture_mut(&mut self, name: &str) -> Option<&mut TextureSlot> {
        match self.values.get_mut(name) {
            Some(UniformValue::Texture(slot)) => Some(slot),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &UniformValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }
}
