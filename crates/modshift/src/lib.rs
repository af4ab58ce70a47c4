/// modshift
///
/// Converts a JavaScript module between native ES modules, AMD, CommonJS and
/// SystemJS, optionally minifying the result. Rewriting and minification are
/// delegated to swc; this crate selects their configuration and normalizes
/// every outcome into a [`TransformResult`].

pub mod diagnostics;
pub mod driver;
pub mod engine;
pub mod error;
pub mod format;
pub mod minify;
pub mod plugins;
pub mod result;

pub use diagnostics::format_engine_error;
pub use driver::{transform, TransformRequest, Transformer};
pub use engine::{EngineOptions, EngineOutput, MinifyEngine, SwcEngine, TransformEngine};
pub use error::{EngineError, Result, TransformError};
pub use format::ModuleFormat;
pub use minify::minify_code;
pub use plugins::{select_plugins, ImportInterop, Plugin};
pub use result::TransformResult;
