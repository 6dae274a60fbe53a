//! Tunable constants for the hover effects.
//!
//! Every value has a default; the image element may override a subset through
//! `data-*` attributes. Parsing goes through a lookup closure so it can run
//! without a DOM.

use crate::error::FxError;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Upper bound for the device pixel ratio.
    pub max_dpr: f32,
    /// Per-frame lerp of the NDC pointer toward its target.
    pub pointer_lerp: f32,
    /// Per-frame lerp of `uLerpedMouse` toward the hit point.
    pub mouse_lerp: f32,
    /// Per-frame lerp of hover progress and peek radius.
    pub hover_lerp: f32,
    /// Reveal radius reached while hovering.
    pub peek_radius: f32,
    pub grid: GridSettings,
    pub flow: FlowSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSettings {
    pub size: usize,
    /// Impulse reach as a fraction of the grid size.
    pub radius: f32,
    pub strength: f32,
    pub relaxation: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowSettings {
    pub size: u32,
    pub falloff: f32,
    pub alpha: f32,
    pub dissipation: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_dpr: 2.0,
            pointer_lerp: 0.1,
            mouse_lerp: 0.1,
            hover_lerp: 0.05,
            peek_radius: 0.3,
            grid: GridSettings::default(),
            flow: FlowSettings::default(),
        }
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            size: 34,
            radius: 0.25,
            strength: 1.0,
            relaxation: 0.9,
        }
    }
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            size: 128,
            falloff: 0.3,
            alpha: 1.0,
            dissipation: 0.98,
        }
    }
}

impl Settings {
    /// Overlays `data-*` overrides onto the defaults.
    ///
    /// Invalid values leave their default in place and are returned alongside
    /// the settings for the caller to report.
    pub fn from_attributes<F>(lookup: F) -> (Self, Vec<FxError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let mut errors = Vec::new();

        overlay(
            lookup("data-grid-size"),
            |raw| parse_in_range("data-grid-size", raw, 2, 256),
            &mut settings.grid.size,
            &mut errors,
        );
        overlay(
            lookup("data-grid-radius"),
            |raw| parse_positive("data-grid-radius", raw),
            &mut settings.grid.radius,
            &mut errors,
        );
        overlay(
            lookup("data-grid-strength"),
            |raw| parse_positive("data-grid-strength", raw),
            &mut settings.grid.strength,
            &mut errors,
        );
        overlay(
            lookup("data-grid-relaxation"),
            |raw| parse_unit("data-grid-relaxation", raw),
            &mut settings.grid.relaxation,
            &mut errors,
        );
        overlay(
            lookup("data-peek-radius"),
            |raw| parse_positive("data-peek-radius", raw),
            &mut settings.peek_radius,
            &mut errors,
        );
        overlay(
            lookup("data-flow-size"),
            |raw| parse_in_range("data-flow-size", raw, 2, 1024),
            &mut settings.flow.size,
            &mut errors,
        );
        overlay(
            lookup("data-flow-falloff"),
            |raw| parse_positive("data-flow-falloff", raw),
            &mut settings.flow.falloff,
            &mut errors,
        );
        overlay(
            lookup("data-flow-dissipation"),
            |raw| parse_unit("data-flow-dissipation", raw),
            &mut settings.flow.dissipation,
            &mut errors,
        );

        (settings, errors)
    }
}

fn overlay<T>(
    raw: Option<String>,
    parse: impl Fn(&str) -> Result<T, FxError>,
    slot: &mut T,
    errors: &mut Vec<FxError>,
) {
    let Some(raw) = raw else { return };
    match parse(raw.trim()) {
        Ok(value) => *slot = value,
        Err(err) => errors.push(err),
    }
}

fn parse_f32(name: &'static str, raw: &str) -> Result<f32, FxError> {
    let value: f32 = raw.parse().map_err(|_| invalid(name, raw, "not a number"))?;
    if !value.is_finite() {
        return Err(invalid(name, raw, "must be finite"));
    }
    Ok(value)
}

fn parse_positive(name: &'static str, raw: &str) -> Result<f32, FxError> {
    let value = parse_f32(name, raw)?;
    if value <= 0.0 {
        return Err(invalid(name, raw, "must be positive"));
    }
    Ok(value)
}

fn parse_unit(name: &'static str, raw: &str) -> Result<f32, FxError> {
    let value = parse_f32(name, raw)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(name, raw, "must be within [0, 1]"));
    }
    Ok(value)
}

fn parse_in_range<T>(name: &'static str, raw: &str, min: T, max: T) -> Result<T, FxError>
where
    T: std::str::FromStr + PartialOrd,
{
    let value: T = raw
        .parse()
        .map_err(|_| invalid(name, raw, "not an integer"))?;
    if value < min || value > max {
        return Err(invalid(name, raw, "out of range"));
    }
    Ok(value)
}

fn invalid(name: &'static str, raw: &str, reason: &'static str) -> FxError {
    FxError::InvalidSetting {
        name,
        value: raw.to_string(),
        reason,
    }
}
