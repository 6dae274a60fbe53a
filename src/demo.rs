//! The seven hover effects and what each one needs from the plane.

use crate::error::FxError;

/// Root-element attributes holding the demo index, in lookup order.
pub const DEMO_ATTRIBUTES: [&str; 2] = ["data-demo-index", "data-demoindex"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Demo {
    /// Point light following the pointer over a normal map.
    NormalLight,
    /// Depth map drives a pointer-relative sampling offset.
    DepthParallax,
    /// CPU force grid uploaded as a data texture.
    GridDisplace,
    /// Circular window onto the image.
    PeekReveal,
    /// Ping-pong flow map distortion.
    FlowDistort,
    /// Noisy reveal from grayscale blur to colour.
    NoiseReveal,
    /// Noise texture refraction that sharpens on hover.
    Glass,
}

impl Demo {
    pub const ALL: [Demo; 7] = [
        Demo::NormalLight,
        Demo::DepthParallax,
        Demo::GridDisplace,
        Demo::PeekReveal,
        Demo::FlowDistort,
        Demo::NoiseReveal,
        Demo::Glass,
    ];

    pub fn from_index(index: i64) -> Result<Self, FxError> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(FxError::UnknownDemo(index))
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Reads the demo index attribute off the root element.
    ///
    /// `data-demo-index` wins; pages written as `data-demoIndex` reach the DOM
    /// lowercased, so `data-demoindex` is read next.
    pub fn attribute<F>(lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        DEMO_ATTRIBUTES.into_iter().find_map(lookup)
    }

    /// Picks the demo from the `?demo=` query value, then the
    /// `data-demo-index` attribute, then falls back to the first demo.
    pub fn resolve(query: Option<&str>, attribute: Option<&str>) -> Demo {
        for (source, raw) in [("query", query), ("data-demo-index", attribute)] {
            let Some(raw) = raw else { continue };
            match raw.trim().parse::<i64>() {
                Ok(i) => match Self::from_index(i) {
                    Ok(demo) => return demo,
                    Err(err) => log::warn!("{source}: {err}"),
                },
                Err(_) => log::warn!("{source}: {raw:?} is not a demo index"),
            }
        }
        Demo::NormalLight
    }

    pub fn uses_second_texture(self) -> bool {
        matches!(
            self,
            Demo::NormalLight | Demo::DepthParallax | Demo::NoiseReveal
        )
    }

    pub fn uses_force_grid(self) -> bool {
        self == Demo::GridDisplace
    }

    pub fn uses_flow_map(self) -> bool {
        self == Demo::FlowDistort
    }

    pub fn uses_noise_texture(self) -> bool {
        self == Demo::Glass
    }
}

/// Looks up `key` in a `?a=b&demo=3` style query string.
pub fn query_param<'a>(search: &'a str, key: &str) -> Option<&'a str> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}
