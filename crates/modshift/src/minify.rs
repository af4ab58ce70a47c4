/// Minifier adapter
///
/// Normalizes every outcome of the minification engine, including panics,
/// into a [`TransformResult`].

use serde_json::Value;

use crate::engine::{catch_panic, MinifyEngine};
use crate::error::TransformError;
use crate::result::TransformResult;

/// Minify `code`, seeding the output source map from `source_map`.
///
/// Minifier errors are returned verbatim, without HTML styling.
pub fn minify_code<M: MinifyEngine>(engine: &M, code: &str, source_map: Option<&Value>) -> TransformResult {
    match catch_panic(|| engine.minify(code, source_map)) {
        Ok(output) => TransformResult::success(output.code, output.map),
        Err(err) => {
            tracing::warn!("Minification failed: {}", err);
            TransformError::Minify(err.message()).into()
        }
    }
}
