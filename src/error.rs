use thiserror::Error;

/// Main error type for extraction and normalization
#[derive(Error, Debug)]
pub enum PitchsideError {
    // Extraction errors
    #[error("Content not found: `{key}` in match {match_id}")]
    ContentNotFound { match_id: String, key: String },

    #[error("Malformed payload in match {match_id} ({context}): {reason}")]
    Format {
        match_id: String,
        context: String,
        reason: String,
    },

    // Normalization errors
    #[error("Unmapped {table} code `{code}` in match {match_id}")]
    Mapping {
        match_id: String,
        table: &'static str,
        code: String,
    },

    #[error("Unknown {kind} `{id}` referenced in match {match_id}")]
    Reference {
        match_id: String,
        kind: &'static str,
        id: String,
    },

    #[error("Invariant violated in match {match_id}: {reason}")]
    Invariant { match_id: String, reason: String },

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Network errors
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl PitchsideError {
    pub fn format(
        match_id: impl Into<String>,
        context: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        PitchsideError::Format {
            match_id: match_id.into(),
            context: context.into(),
            reason: reason.to_string(),
        }
    }

    /// Errors scoped to a single shot; the rest can never be skipped.
    pub fn is_shot_scoped(&self) -> bool {
        matches!(
            self,
            PitchsideError::Mapping { .. } | PitchsideError::Reference { .. }
        )
    }

    /// Match id the error was raised for, when it carries one
    pub fn match_id(&self) -> Option<&str> {
        match self {
            PitchsideError::ContentNotFound { match_id, .. }
            | PitchsideError::Format { match_id, .. }
            | PitchsideError::Mapping { match_id, .. }
            | PitchsideError::Reference { match_id, .. }
            | PitchsideError::Invariant { match_id, .. } => Some(match_id),
            _ => None,
        }
    }
}

/// Result type alias for PitchsideError
pub type Result<T> = std::result::Result<T, PitchsideError>;
