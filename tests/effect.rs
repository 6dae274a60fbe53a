use glam::{Vec2, Vec3};

use hover_fx::effect::{PlaneState, MAX_FRAME_DT};
use hover_fx::flow::FlowInput;
use hover_fx::layout::PlaneTransform;
use hover_fx::uniforms::{self, UniformValue};
use hover_fx::{Demo, Settings};

const FRAME: f32 = 1.0 / 60.0;

fn state(demo: Demo) -> PlaneState {
    let mut state = PlaneState::new(demo, Settings::default());
    state
        .set_layout(PlaneTransform {
            position: Vec3::ZERO,
            scale: Vec2::new(400.0, 300.0),
        })
        .unwrap();
    state
}

#[test]
fn simulation_only_where_needed() {
    assert!(state(Demo::GridDisplace).grid.is_some());
    assert!(state(Demo::FlowDistort).flow.is_some());
    let plain = state(Demo::NormalLight);
    assert!(plain.grid.is_none() && plain.flow.is_none());
}

#[test]
fn layout_and_image_size_reach_uniforms() {
    let mut s = state(Demo::PeekReveal);
    s.set_image_size(1024.0, 768.0).unwrap();
    assert_eq!(
        s.uniforms.get(uniforms::RESOLUTION),
        Some(&UniformValue::Vec2([1024.0, 768.0]))
    );
    assert_eq!(
        s.uniforms.get(uniforms::SIZE),
        Some(&UniformValue::Vec2([400.0, 300.0]))
    );
}

#[test]
fn hover_drives_mouse_progress_and_radius() {
    let mut s = state(Demo::PeekReveal);
    s.update(Some(Vec2::new(0.1, 0.2)), FRAME).unwrap();

    assert_eq!(s.mouse, Vec2::new(0.1, 0.2));
    assert!((s.lerped_mouse - Vec2::new(0.01, 0.02)).length() < 1e-6);
    assert!((s.hover_progress - 0.05).abs() < 1e-6);
    assert!((s.peek_radius - 0.015).abs() < 1e-6);
    assert_eq!(s.uniforms.get(uniforms::MOUSE), Some(&UniformValue::Vec2([0.1, 0.2])));
    assert_eq!(
        s.uniforms.get(uniforms::PEEK_RADIUS),
        Some(&UniformValue::Float(s.peek_radius))
    );
}

#[test]
fn leaving_the_plane_keeps_last_point_and_fades_out() {
    let mut s = state(Demo::Glass);
    for _ in 0..100 {
        s.update(Some(Vec2::new(0.3, -0.2)), FRAME).unwrap();
    }
    let peak = s.hover_progress;
    assert!(peak > 0.9 && peak <= 1.0);

    s.update(None, FRAME).unwrap();
    assert_eq!(s.mouse, Vec2::new(0.3, -0.2));
    assert_eq!(s.velocity, Vec2::ZERO);
    assert!(s.hover_progress < peak);

    for _ in 0..500 {
        s.update(None, FRAME).unwrap();
    }
    assert!(s.hover_progress < 1e-3);
    assert!(s.peek_radius < 1e-3);
}

#[test]
fn time_accumulates_clamped_frames() {
    let mut s = state(Demo::NoiseReveal);
    s.update(None, FRAME).unwrap();
    s.update(None, 5.0).unwrap();
    s.update(None, f32::NAN).unwrap();
    s.update(None, -1.0).unwrap();
    assert!((s.time - (FRAME + MAX_FRAME_DT)).abs() < 1e-6);
    assert_eq!(s.uniforms.get(uniforms::TIME), Some(&UniformValue::Float(s.time)));
}

#[test]
fn pointer_motion_marks_data_texture_dirty() {
    let mut s = state(Demo::GridDisplace);
    s.update(Some(Vec2::ZERO), FRAME).unwrap();
    assert!(!s.uniforms.texture(uniforms::DATA_TEXTURE).unwrap().needs_upload());

    s.update(Some(Vec2::new(0.05, 0.0)), FRAME).unwrap();
    let slot = *s.uniforms.texture(uniforms::DATA_TEXTURE).unwrap();
    assert!(slot.needs_upload());

    let grid = s.grid.as_ref().unwrap();
    assert!(grid.data().iter().any(|v| *v != 0.0));
}

#[test]
fn still_pointer_leaves_data_texture_clean() {
    let mut s = state(Demo::GridDisplace);
    for _ in 0..3 {
        s.update(Some(Vec2::new(0.1, 0.1)), FRAME).unwrap();
    }
    assert!(!s.uniforms.texture(uniforms::DATA_TEXTURE).unwrap().needs_upload());
}

#[test]
fn grid_velocity_is_the_hit_delta_of_this_frame_only() {
    let mut s = state(Demo::GridDisplace);
    s.update(Some(Vec2::ZERO), FRAME).unwrap();
    s.update(Some(Vec2::new(0.045, 0.0)), FRAME).unwrap();
    assert!((s.velocity - Vec2::new(0.045, 0.0)).length() < 1e-6);

    s.update(Some(Vec2::new(0.045, 0.0)), FRAME).unwrap();
    assert_eq!(s.velocity, Vec2::ZERO);
}

#[test]
fn flow_velocity_rises_then_decays() {
    let mut flow = FlowInput::default();
    flow.update(Some(Vec2::new(0.5, 0.5)), FRAME);
    assert_eq!(flow.velocity, Vec2::ZERO);

    // 0.02 per 1/60 s is 1.2, capped to 1, then eased in by 0.1.
    flow.update(Some(Vec2::new(0.52, 0.5)), FRAME);
    assert!((flow.velocity.x - 0.1).abs() < 1e-6, "{:?}", flow.velocity);
    assert_eq!(flow.velocity.y, 0.0);
    assert_eq!(flow.mouse, Vec2::new(0.52, 0.5));

    let moving = flow.velocity;
    flow.update(None, FRAME);
    assert!((flow.velocity - moving * 0.9).length() < 1e-6);
}

#[test]
fn flow_state_follows_plane_hits() {
    let mut s = state(Demo::FlowDistort);
    s.update(Some(Vec2::ZERO), FRAME).unwrap();
    s.update(Some(Vec2::new(0.1, 0.1)), FRAME).unwrap();
    let flow = s.flow.as_ref().unwrap();
    assert!(flow.velocity.length() > 0.0);
    assert!((flow.mouse - Vec2::new(0.6, 0.6)).length() < 1e-6);
}
