use wasm_bindgen::JsValue;

/// Errors raised while setting up or driving a hover effect.
#[derive(Debug, thiserror::Error)]
pub enum FxError {
    #[error("unknown demo index {0} (expected 0..=6)")]
    UnknownDemo(i64),
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidSetting {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
    #[error("uniform {name} holds a {held}, cannot assign a {given}")]
    UniformKind {
        name: String,
        held: &'static str,
        given: &'static str,
    },
    #[error("missing DOM element: {0}")]
    MissingElement(&'static str),
    #[error("WebGL: {0}")]
    WebGl(String),
    #[error("shader compile failed: {0}")]
    ShaderCompile(String),
    #[error("program link failed: {0}")]
    ProgramLink(String),
}

impl From<FxError> for JsValue {
    fn from(err: FxError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
