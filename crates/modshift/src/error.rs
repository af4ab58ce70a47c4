/// Error types for module transformation

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransformError>;

/// Everything that can stop a transform request.
///
/// The `Display` output of each variant is the message handed back to callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransformError {
    #[error("Code specification is not defined")]
    EmptyInput,

    #[error("Invalid parameters: format must be one of amd, esm, cjs, sjs")]
    InvalidFormat(String),

    /// Already styled by the diagnostics formatter.
    #[error("{0}")]
    Engine(String),

    #[error("Transform engine did not produce output")]
    NoOutput,

    #[error("{0}")]
    Minify(String),
}

/// Failure reported by an external engine (transformer or minifier).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("{0}")]
    Failed(String),

    #[error("{0}")]
    Panicked(String),

    #[error("Invalid source map: {0}")]
    SourceMap(String),
}

impl EngineError {
    pub fn failed(message: impl Into<String>) -> Self {
        EngineError::Failed(message.into())
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::SourceMap(err.to_string())
    }
}
