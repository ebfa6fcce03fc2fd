use thiserror::Error;

use crate::config::MISSING_CONFIGURATION_MESSAGE;

/// Failure reported by a collaborator (compute control or notification).
/// Carries the collaborator's own description; no error kinds are
/// distinguished.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AdapterError {
    message: String,
}

impl AdapterError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Required configuration was absent or empty. Displays as the fixed
/// response body; `missing` names the variables for log lines only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", MISSING_CONFIGURATION_MESSAGE)]
pub struct ConfigError {
    missing: Vec<&'static str>,
}

impl ConfigError {
    pub fn new(missing: Vec<&'static str>) -> Self {
        Self { missing }
    }

    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemediationError {
    #[error("{0}")]
    Reboot(#[source] AdapterError),

    #[error("{0}")]
    Publish(#[source] AdapterError),
}

impl RemediationError {
    /// Stage label used in log lines.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Reboot(_) => "reboot",
            Self::Publish(_) => "publish",
        }
    }

    /// Body returned to the caller. Reboot and publish failures share one
    /// shape and differ only by the embedded error text.
    pub fn response_body(&self) -> String {
        format!("Error: {self}")
    }
}
