/// Outcome of a transform request

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransformError;

/// Either transformed code or the errors that prevented it.
///
/// Serializes to `{ "code", "map"? }` on success and `{ "errors": [...] }`
/// on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransformResult {
    Failure {
        errors: Vec<String>,
    },
    Success {
        code: String,
        #[serde(rename = "map", alias = "sourceMap", default, skip_serializing_if = "Option::is_none")]
        source_map: Option<Value>,
    },
}

impl TransformResult {
    pub fn success(code: impl Into<String>, source_map: Option<Value>) -> Self {
        TransformResult::Success {
            code: code.into(),
            source_map,
        }
    }

    /// Failure carrying a single message
    pub fn failure(message: impl Into<String>) -> Self {
        TransformResult::Failure {
            errors: vec![message.into()],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, TransformResult::Success { .. })
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            TransformResult::Success { code, .. } => Some(code),
            TransformResult::Failure { .. } => None,
        }
    }

    pub fn source_map(&self) -> Option<&Value> {
        match self {
            TransformResult::Success { source_map, .. } => source_map.as_ref(),
            TransformResult::Failure { .. } => None,
        }
    }

    /// Error messages; empty on success
    pub fn errors(&self) -> &[String] {
        match self {
            TransformResult::Failure { errors } => errors,
            TransformResult::Success { .. } => &[],
        }
    }
}

impl From<TransformError> for TransformResult {
    fn from(err: TransformError) -> Self {
        TransformResult::failure(err.to_string())
    }
}
