/// Transformation and minification engines
///
/// The orchestrator only talks to the [`TransformEngine`] and [`MinifyEngine`]
/// traits. [`SwcEngine`] implements both on top of swc.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use swc_core::base::config::{
    Config, InputSourceMap, IsModule, JscConfig, ModuleConfig, Options, SourceMapsConfig,
};
use swc_core::base::{try_with_handler, Compiler, HandlerOpts};
use swc_core::common::errors::ColorConfig;
use swc_core::common::{FileName, Globals, SourceMap, GLOBALS};
use swc_core::ecma::ast::EsVersion;
use swc_core::ecma::transforms::module::{amd, system_js, util};

use crate::error::EngineError;
use crate::plugins::{ImportInterop, Plugin};

/// Options passed to the transformation engine for one call
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOptions {
    /// Working-directory context; never written to
    pub cwd: PathBuf,
    /// Generate an output source map
    pub source_maps: bool,
    /// Map of the input code, composed into the output map
    pub input_source_map: Option<Value>,
    /// Collapse whitespace in the output
    pub compact: bool,
    /// Rewrite plugins, applied in order
    pub plugins: Vec<Plugin>,
}

/// Code produced by an engine
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    pub code: String,
    pub map: Option<Value>,
}

/// Rewrites source code with an ordered plugin list.
pub trait TransformEngine {
    fn transform(&self, code: &str, options: &EngineOptions) -> Result<EngineOutput, EngineError>;
}

/// Minifies code, composing the output map onto `seed_map` when given.
pub trait MinifyEngine {
    fn minify(&self, code: &str, seed_map: Option<&Value>) -> Result<EngineOutput, EngineError>;
}

impl<T: TransformEngine + ?Sized> TransformEngine for &T {
    fn transform(&self, code: &str, options: &EngineOptions) -> Result<EngineOutput, EngineError> {
        (**self).transform(code, options)
    }
}

impl<T: MinifyEngine + ?Sized> MinifyEngine for &T {
    fn minify(&self, code: &str, seed_map: Option<&Value>) -> Result<EngineOutput, EngineError> {
        (**self).minify(code, seed_map)
    }
}

const INPUT_FILE_NAME: &str = "input.js";

/// swc-backed engine
///
/// Each call gets a fresh `SourceMap`, compiler and globals, so one engine can
/// be shared between threads.
#[derive(Debug, Clone)]
pub struct SwcEngine {
    /// Emit target. `import()` and ES2015+ syntax survive at the default.
    target: EsVersion,
}

impl Default for SwcEngine {
    fn default() -> Self {
        Self {
            target: EsVersion::EsNext,
        }
    }
}

impl SwcEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn target(mut self, target: EsVersion) -> Self {
        self.target = target;
        self
    }

    /// Build swc options for a rewrite call
    fn transform_options(&self, options: &EngineOptions) -> Result<Options, EngineError> {
        let mut target = self.target;
        let mut module = None;

        for plugin in &options.plugins {
            match plugin {
                Plugin::ModulesAmd { interop } => {
                    module = Some(ModuleConfig::Amd(amd::Config {
                        config: interop_config(*interop),
                        ..Default::default()
                    }));
                }
                Plugin::ModulesCommonJs { interop } => {
                    module = Some(ModuleConfig::CommonJs(interop_config(*interop)));
                }
                // SystemJS registration never synthesizes default-export wrappers,
                // so there is no interop knob to forward.
                Plugin::ModulesSystemJs { .. } => {
                    module = Some(ModuleConfig::SystemJs(system_js::Config::default()));
                }
                Plugin::DynamicImport => {
                    target = target.max(EsVersion::Es2020);
                }
            }
        }

        Ok(Options {
            config: Config {
                jsc: JscConfig {
                    target: Some(target),
                    ..Default::default()
                },
                module,
                minify: options.compact.into(),
                input_source_map: Some(input_source_map(options.input_source_map.as_ref())?),
                ..Default::default()
            },
            cwd: options.cwd.clone(),
            filename: INPUT_FILE_NAME.to_string(),
            swcrc: false,
            source_maps: options.source_maps.then_some(SourceMapsConfig::Bool(true)),
            ..Default::default()
        })
    }

    /// Build swc options for a minify call
    fn minify_options(&self, seed_map: Option<&Value>) -> Result<Options, EngineError> {
        Ok(Options {
            config: Config {
                jsc: JscConfig {
                    target: Some(self.target),
                    ..Default::default()
                },
                minify: true.into(),
                input_source_map: Some(input_source_map(seed_map)?),
                is_module: Some(IsModule::Unknown),
                ..Default::default()
            },
            filename: INPUT_FILE_NAME.to_string(),
            swcrc: false,
            source_maps: Some(SourceMapsConfig::Bool(true)),
            ..Default::default()
        })
    }

    fn run(&self, code: &str, options: &Options) -> Result<EngineOutput, EngineError> {
        let compiler = Compiler::new(Arc::new(SourceMap::default()));
        // swc renders diagnostics as plain text whatever the color setting
        let handler_opts = HandlerOpts {
            color: ColorConfig::Never,
            skip_filename: false,
        };

        let output = GLOBALS
            .set(&Globals::new(), || {
                try_with_handler(compiler.cm.clone(), handler_opts, |handler| {
                    let fm = compiler
                        .cm
                        .new_source_file(FileName::Custom(INPUT_FILE_NAME.into()).into(), code.to_string());
                    compiler.process_js_file(fm, handler, options)
                })
            })
            .map_err(|err| EngineError::failed(format!("{err:#}")))?;

        let map = match output.map {
            Some(raw) => Some(serde_json::from_str(&raw)?),
            None => None,
        };

        Ok(EngineOutput {
            code: output.code,
            map,
        })
    }
}

impl TransformEngine for SwcEngine {
    fn transform(&self, code: &str, options: &EngineOptions) -> Result<EngineOutput, EngineError> {
        let swc_options = self.transform_options(options)?;
        self.run(code, &swc_options)
    }
}

impl MinifyEngine for SwcEngine {
    fn minify(&self, code: &str, seed_map: Option<&Value>) -> Result<EngineOutput, EngineError> {
        let swc_options = self.minify_options(seed_map)?;
        self.run(code, &swc_options)
    }
}

/// Run an engine call, turning a panic into [`EngineError::Panicked`].
pub(crate) fn catch_panic<F>(call: F) -> Result<EngineOutput, EngineError>
where
    F: FnOnce() -> Result<EngineOutput, EngineError>,
{
    panic::catch_unwind(AssertUnwindSafe(call))
        .unwrap_or_else(|payload| Err(EngineError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "engine panicked".to_string()
    }
}

fn interop_config(interop: ImportInterop) -> util::Config {
    let import_interop = match interop {
        ImportInterop::None => util::ImportInterop::None,
        ImportInterop::Babel => util::ImportInterop::Swc,
        ImportInterop::Node => util::ImportInterop::Node,
    };

    util::Config {
        import_interop: Some(import_interop),
        ..Default::default()
    }
}

/// An input map is handed to swc as JSON text. A map that is already a
/// string is assumed to be serialized JSON.
fn input_source_map(map: Option<&Value>) -> Result<InputSourceMap, EngineError> {
    match map {
        None | Some(Value::Null) => Ok(InputSourceMap::Bool(false)),
        Some(Value::String(raw)) => Ok(InputSourceMap::Str(raw.clone())),
        Some(map) => Ok(InputSourceMap::Str(serde_json::to_string(map)?)),
    }
}
