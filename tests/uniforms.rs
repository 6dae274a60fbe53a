use glam::Vec2;

use hover_fx::error::FxError;
use hover_fx::uniforms::{self, TextureSlot, UniformSet, UniformValue};

#[test]
fn standard_set_declares_every_shader_input() {
    let set = UniformSet::standard();
    for name in [
        uniforms::TEXTURE,
        uniforms::TEXTURE2,
        uniforms::NOISE_TEXTURE,
        uniforms::DATA_TEXTURE,
        uniforms::FLOW,
        uniforms::RESOLUTION,
        uniforms::SIZE,
        uniforms::MOUSE,
        uniforms::LERPED_MOUSE,
        uniforms::TIME,
        uniforms::PEEK_RADIUS,
        uniforms::HOVER_PROGRESS,
        uniforms::MODEL_VIEW,
        uniforms::PROJECTION,
    ] {
        assert!(set.get(name).is_some(), "missing {name}");
    }
    assert_eq!(set.get(uniforms::SIZE), Some(&UniformValue::Vec2([1.0, 1.0])));
}

#[test]
fn sampler_units_are_distinct() {
    let set = UniformSet::standard();
    let mut units: Vec<u32> = uniforms::SAMPLERS
        .iter()
        .map(|(name, _)| set.texture(name).unwrap().unit)
        .collect();
    units.sort_unstable();
    units.dedup();
    assert_eq!(units.len(), uniforms::SAMPLERS.len());
}

#[test]
fn values_keep_their_kind() {
    let mut set = UniformSet::standard();
    set.set_vec2(uniforms::MOUSE, Vec2::new(0.25, -0.1)).unwrap();
    assert_eq!(set.get(uniforms::MOUSE), Some(&UniformValue::Vec2([0.25, -0.1])));

    let err = set.set_float(uniforms::MOUSE, 1.0).unwrap_err();
    assert!(matches!(err, FxError::UniformKind { held: "vec2", given: "float", .. }));
    assert_eq!(set.get(uniforms::MOUSE), Some(&UniformValue::Vec2([0.25, -0.1])));
}

#[test]
fn textures_cannot_be_overwritten_by_value() {
    let mut set = UniformSet::standard();
    let err = set
        .set(uniforms::TEXTURE, UniformValue::Texture(TextureSlot::new(9)))
        .unwrap_err();
    assert!(matches!(err, FxError::UniformKind { .. }));
    assert_eq!(set.texture(uniforms::TEXTURE).unwrap().unit, 0);
}

#[test]
fn unknown_names_are_inserted() {
    let mut set = UniformSet::standard();
    set.set_float("uStrength", 2.0).unwrap();
    assert_eq!(set.get("uStrength"), Some(&UniformValue::Float(2.0)));
}

#[test]
fn texture_uploads_only_after_data_changes() {
    let mut set = UniformSet::standard();
    let slot = set.texture_mut(uniforms::DATA_TEXTURE).unwrap();
    assert!(!slot.needs_upload());

    slot.touch();
    assert!(slot.needs_upload());
    slot.mark_uploaded();
    assert!(!slot.needs_upload());

    slot.touch();
    slot.touch();
    assert_eq!(slot.version(), 3);
    assert!(slot.needs_upload());
}

#[test]
fn texture_lookup_ignores_non_samplers() {
    let set = UniformSet::standard();
    assert!(set.texture(uniforms::MOUSE).is_none());
    assert!(set.texture("uNothing").is_none());
}
