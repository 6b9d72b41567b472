/// Error types for parameter decoding at the JS boundary.
///
/// The shading formulas themselves are total and never fail; only the
/// glue that turns panel state and flat buffers into typed values does.

use thiserror::Error;

/// Result type for decoding operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Menu slug with no matching scene
    #[error("unknown scene: {0}")]
    UnknownScene(String),

    /// Panel name with no matching easing curve
    #[error("unknown easing function: {0}")]
    UnknownEasing(String),

    /// Flat parameter buffer shorter than its layout
    #[error("{what} buffer too short: expected {expected} values, got {actual}")]
    BufferTooShort {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Panel state that could not be decoded
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Host environment lookup that did not return a colour
    #[error("environment sample failed: {0}")]
    EnvironmentSample(String),
}

impl From<serde_wasm_bindgen::Error> for Error {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Error::InvalidParams(e.to_string())
    }
}

impl From<Error> for wasm_bindgen::JsValue {
    fn from(e: Error) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
