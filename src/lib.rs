#![cfg_attr(target_arch = "wasm32", allow(dead_code))]

pub mod camera;
pub mod config;
pub mod demo;
pub mod effect;
pub mod error;
pub mod flow;
pub mod grid;
pub mod layout;
pub mod noise;
pub mod pointer;
pub mod raycast;
pub mod shaders;
pub mod uniforms;

pub use config::Settings;
pub use demo::Demo;
pub use error::FxError;

// Only compile the browser glue when targeting wasm32; everything above is
// plain math and builds (and is tested) on the host.

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use wasm_bindgen::prelude::*;

    mod app;
    mod flowmap;
    mod plane;
    mod program;
    mod render;
    mod texture;

    pub use program::link_program;

    /// Entry point called by the page once the module is initialised.
    #[wasm_bindgen]
    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let level = if cfg!(debug_assertions) {
            log::Level::Debug
        } else {
            log::Level::Info
        };
        console_log::init_with_level(level).ok();

        app::start().map_err(|err| {
            log::error!("start-up failed: {err:?}");
            err
        })
    }
}
