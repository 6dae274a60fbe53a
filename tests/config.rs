use std::collections::HashMap;

use hover_fx::config::Settings;
use hover_fx::demo::{query_param, Demo};
use hover_fx::error::FxError;

fn parse(pairs: &[(&str, &str)]) -> (Settings, Vec<FxError>) {
    let attrs: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Settings::from_attributes(|name| attrs.get(name).cloned())
}

#[test]
fn no_attributes_gives_defaults() {
    let (settings, errors) = parse(&[]);
    assert!(errors.is_empty());
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.grid.size, 34);
    assert_eq!(settings.flow.size, 128);
    assert_eq!(settings.max_dpr, 2.0);
}

#[test]
fn valid_overrides_apply() {
    let (settings, errors) = parse(&[
        ("data-grid-size", "20"),
        ("data-grid-radius", " 0.4 "),
        ("data-grid-relaxation", "0.8"),
        ("data-peek-radius", "0.5"),
        ("data-flow-dissipation", "0.9"),
        ("data-flow-size", "64"),
    ]);
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(settings.grid.size, 20);
    assert_eq!(settings.grid.radius, 0.4);
    assert_eq!(settings.grid.relaxation, 0.8);
    assert_eq!(settings.peek_radius, 0.5);
    assert_eq!(settings.flow.dissipation, 0.9);
    assert_eq!(settings.flow.size, 64);
}

#[test]
fn invalid_overrides_keep_defaults_and_report() {
    let (settings, errors) = parse(&[
        ("data-grid-size", "1"),
        ("data-grid-radius", "NaN"),
        ("data-grid-strength", "abc"),
        ("data-grid-relaxation", "1.5"),
        ("data-flow-falloff", "-0.2"),
        ("data-peek-radius", "0.6"),
    ]);
    assert_eq!(errors.len(), 5);
    assert!(errors
        .iter()
        .all(|e| matches!(e, FxError::InvalidSetting { .. })));
    assert_eq!(settings.grid.size, 34);
    assert_eq!(settings.grid.radius, 0.25);
    assert_eq!(settings.grid.relaxation, 0.9);
    assert_eq!(settings.flow.falloff, 0.3);
    assert_eq!(settings.peek_radius, 0.6);
}

#[test]
fn error_names_the_attribute() {
    let (_, errors) = parse(&[("data-grid-size", "900")]);
    let message = errors[0].to_string();
    assert!(message.contains("data-grid-size"), "{message}");
    assert!(message.contains("900"), "{message}");
}

#[test]
fn demo_indices_round_trip() {
    for (i, demo) in Demo::ALL.iter().enumerate() {
        assert_eq!(Demo::from_index(i as i64).unwrap(), *demo);
        assert_eq!(demo.index(), i);
    }
    assert!(matches!(Demo::from_index(7), Err(FxError::UnknownDemo(7))));
    assert!(matches!(Demo::from_index(-1), Err(FxError::UnknownDemo(-1))));
}

#[test]
fn query_beats_attribute_and_bad_values_fall_through() {
    assert_eq!(Demo::resolve(Some("3"), Some("1")), Demo::PeekReveal);
    assert_eq!(Demo::resolve(None, Some("1")), Demo::DepthParallax);
    assert_eq!(Demo::resolve(Some("x"), Some("2")), Demo::GridDisplace);
    assert_eq!(Demo::resolve(Some("9"), None), Demo::NormalLight);
    assert_eq!(Demo::resolve(None, None), Demo::NormalLight);
}

#[test]
fn query_param_lookup() {
    assert_eq!(query_param("?foo=1&demo=4", "demo"), Some("4"));
    assert_eq!(query_param("demo=6", "demo"), Some("6"));
    assert_eq!(query_param("?demos=4", "demo"), None);
    assert_eq!(query_param("", "demo"), None);
}

#[test]
fn capabilities_match_each_effect() {
    let second: Vec<_> = Demo::ALL.iter().filter(|d| d.uses_second_texture()).collect();
    assert_eq!(
        second,
        [&Demo::NormalLight, &Demo::DepthParallax, &Demo::NoiseReveal]
    );
    assert!(Demo::GridDisplace.uses_force_grid());
    assert!(!Demo::FlowDistort.uses_force_grid());
    assert!(Demo::FlowDistort.uses_flow_map());
    assert!(Demo::Glass.uses_noise_texture());
    assert!(!Demo::PeekReveal.uses_noise_texture());
}

fn root_attribute(pairs: &[(&str, &str)]) -> Option<String> {
    let attrs: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Demo::attribute(|name| attrs.get(name).cloned())
}

#[test]
fn lowercased_camel_case_attribute_selects_demo() {
    // `<html data-demoIndex="3">` is stored as `data-demoindex`.
    let attr = root_attribute(&[("data-demoindex", "3")]);
    assert_eq!(attr.as_deref(), Some("3"));
    assert_eq!(Demo::resolve(None, attr.as_deref()), Demo::PeekReveal);
}

#[test]
fn hyphenated_attribute_wins_over_lowercased() {
    let attr = root_attribute(&[("data-demo-index", "5"), ("data-demoindex", "3")]);
    assert_eq!(Demo::resolve(None, attr.as_deref()), Demo::NoiseReveal);
    assert_eq!(root_attribute(&[]), None);
    assert_eq!(Demo::resolve(None, root_attribute(&[]).as_deref()), Demo::NormalLight);
}
