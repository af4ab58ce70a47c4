/// Transform driver that orchestrates validation, rewriting and minification

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diagnostics::format_engine_error;
use crate::engine::{catch_panic, EngineOptions, MinifyEngine, SwcEngine, TransformEngine};
use crate::error::{Result, TransformError};
use crate::format::ModuleFormat;
use crate::minify::minify_code;
use crate::plugins::{describe, select_plugins};
use crate::result::TransformResult;

/// A single transform request
///
/// Deserializes from `{ "code", "map" | "sourceMap", "format", "minify" }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformRequest {
    /// Module source code
    #[serde(default)]
    pub code: String,
    /// Source map of `code`, passed through opaquely
    #[serde(rename = "map", alias = "sourceMap", default, skip_serializing_if = "Option::is_none")]
    pub source_map: Option<Value>,
    /// Target format name; ESM when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Minify the output; off when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
}

impl TransformRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn source_map(mut self, map: Value) -> Self {
        self.source_map = Some(map);
        self
    }

    pub fn minify(mut self, minify: bool) -> Self {
        self.minify = Some(minify);
        self
    }

    /// Check the request and resolve its target format.
    ///
    /// Empty code is reported before an unknown format.
    pub fn validate(&self) -> Result<ModuleFormat> {
        if self.code.is_empty() {
            return Err(TransformError::EmptyInput);
        }

        match self.format.as_deref() {
            None => Ok(ModuleFormat::default()),
            Some(name) => name.parse(),
        }
    }

    fn should_minify(&self) -> bool {
        self.minify.unwrap_or(false)
    }
}

/// Module format transformer
pub struct Transformer<E = SwcEngine> {
    engine: E,
    cwd: PathBuf,
}

impl Default for Transformer<SwcEngine> {
    fn default() -> Self {
        Self::new(SwcEngine::default())
    }
}

impl<E> Transformer<E>
where
    E: TransformEngine + MinifyEngine,
{
    /// Create a transformer backed by `engine`
    pub fn new(engine: E) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { engine, cwd }
    }

    /// Working directory reported to the engine
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Run one request to completion. Never panics on bad input; every
    /// failure comes back as [`TransformResult::Failure`].
    pub fn transform(&self, request: &TransformRequest) -> TransformResult {
        let format = match request.validate() {
            Ok(format) => format,
            Err(err) => {
                tracing::debug!("Rejected transform request: {}", err);
                return err.into();
            }
        };
        let minify = request.should_minify();

        tracing::debug!(
            "Transforming {} bytes to {} (minify: {})",
            request.code.len(),
            format,
            minify
        );

        // ESM needs no rewriting
        if !format.needs_rewrite() {
            return if minify {
                minify_code(&self.engine, &request.code, request.source_map.as_ref())
            } else {
                TransformResult::success(request.code.clone(), request.source_map.clone())
            };
        }

        let plugins = select_plugins(format);
        tracing::debug!("Selected plugins: {}", describe(plugins));

        let options = EngineOptions {
            cwd: self.cwd.clone(),
            source_maps: matches!(request.source_map, Some(ref map) if !map.is_null()),
            input_source_map: request.source_map.clone(),
            compact: false,
            plugins: plugins.to_vec(),
        };

        let output = match catch_panic(|| self.engine.transform(&request.code, &options)) {
            Ok(output) => output,
            Err(err) => {
                tracing::info!("Transform to {} failed", format);
                return format_engine_error(&err.message(), format);
            }
        };

        if output.code.is_empty() {
            return TransformError::NoOutput.into();
        }

        if minify {
            minify_code(&self.engine, &output.code, output.map.as_ref())
        } else {
            TransformResult::success(output.code, output.map)
        }
    }
}

/// Transform `request` with the default swc engine.
pub fn transform(request: &TransformRequest) -> TransformResult {
    Transformer::<SwcEngine>::default().transform(request)
}
