/// Supported module formats

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TransformError;

/// Target module format of a transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ModuleFormat {
    /// Native ES modules; nothing to rewrite.
    #[default]
    Esm,
    Amd,
    CommonJs,
    SystemJs,
}

impl ModuleFormat {
    /// Every supported format, in the order they are advertised.
    pub const ALL: [ModuleFormat; 4] = [
        ModuleFormat::SystemJs,
        ModuleFormat::Amd,
        ModuleFormat::CommonJs,
        ModuleFormat::Esm,
    ];

    /// Short name used in requests and error messages
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleFormat::Esm => "esm",
            ModuleFormat::Amd => "amd",
            ModuleFormat::CommonJs => "cjs",
            ModuleFormat::SystemJs => "sjs",
        }
    }

    /// Whether producing this format requires running the transformation engine.
    pub fn needs_rewrite(self) -> bool {
        self != ModuleFormat::Esm
    }
}

impl fmt::Display for ModuleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleFormat {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "esm" | "native-esm" => Ok(ModuleFormat::Esm),
            "amd" => Ok(ModuleFormat::Amd),
            "cjs" | "commonjs" => Ok(ModuleFormat::CommonJs),
            "sjs" | "systemjs" => Ok(ModuleFormat::SystemJs),
            other => Err(TransformError::InvalidFormat(other.to_string())),
        }
    }
}

impl TryFrom<String> for ModuleFormat {
    type Error = TransformError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ModuleFormat> for String {
    fn from(format: ModuleFormat) -> Self {
        format.as_str().to_string()
    }
}
