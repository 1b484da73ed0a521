use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    NotInitialized,
    ItemNotFound,
    AmbiguousRef,
    ValidationError,
    InvalidStatusTransition,
    VersionConflict,
    PersistenceError,
    ConfigError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::AmbiguousRef => "AMBIGUOUS_REF",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::VersionConflict => "VERSION_CONFLICT",
            Self::PersistenceError => "PERSISTENCE_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
pub struct MillcalError {
    pub code: ErrorCode,
    pub message: String,
}

impl MillcalError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_initialized() -> Self {
        Self::new(
            ErrorCode::NotInitialized,
            "millcal is not initialized. Run `millcal init` first.",
        )
    }

    pub fn item_not_found(reference: &str) -> Self {
        Self::new(
            ErrorCode::ItemNotFound,
            format!("Item not found: {reference}"),
        )
    }

    pub fn ambiguous_ref(reference: &str, candidates: &[String]) -> Self {
        Self::new(
            ErrorCode::AmbiguousRef,
            format!(
                "Ambiguous reference '{}'. Candidates: {}",
                reference,
                candidates.join(", ")
            ),
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationError, message)
    }

    pub fn missing_required_fields() -> Self {
        Self::validation("Please fill in required fields")
    }

    pub fn invalid_transition(from: &str, to: &str) -> Self {
        Self::new(
            ErrorCode::InvalidStatusTransition,
            format!("Invalid status transition: {from} → {to}"),
        )
    }

    pub fn version_conflict(expected: i64) -> Self {
        Self::new(
            ErrorCode::VersionConflict,
            format!(
                "Board was modified by another session (expected version {expected}). Retry the command."
            ),
        )
    }

    pub fn persistence(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PersistenceError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Only a lost compare-and-swap is worth retrying as-is.
    pub fn is_retryable(&self) -> bool {
        self.code == ErrorCode::VersionConflict
    }
}

impl From<rusqlite::Error> for MillcalError {
    fn from(e: rusqlite::Error) -> Self {
        Self::persistence(e.to_string())
    }
}

impl From<std::io::Error> for MillcalError {
    fn from(e: std::io::Error) -> Self {
        Self::persistence(e.to_string())
    }
}

impl From<serde_json::Error> for MillcalError {
    fn from(e: serde_json::Error) -> Self {
        Self::config(e.to_string())
    }
}
