//! Structured configuration diagnostics.
//!
//! A [`PipelineSpecError`] pins a problem to a JSON-pointer path inside the
//! spec (`/pagerank/damping`, `/alphas/2`) and carries an optional hint.

use serde::Serialize;

/// Stable machine-readable code for a spec diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    UnsupportedVersion,
    InvalidValue,
    DuplicateValue,
    UnknownField,
    ValidationFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::InvalidValue => "invalid_value",
            Self::DuplicateValue => "duplicate_value",
            Self::UnknownField => "unknown_field",
            Self::ValidationFailed => "validation_failed",
        }
    }
}

/// One problem found in a [`PipelineSpec`](super::spec::PipelineSpec).
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("[{}] {path}: {message}", code.as_str())]
pub struct PipelineSpecError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl PipelineSpecError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}
