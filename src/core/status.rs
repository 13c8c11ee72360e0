// ============================================================================
// selectable-list - Load Status
// The idle/pending/success/error tag published on the status channel
// ============================================================================

use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

// =============================================================================
// STATUS ERROR
// =============================================================================

/// Error payload carried by [`Status::Error`].
///
/// The container never produces one of these on its own. Callers hand it in
/// through `update_status`, or `track_load_status` builds one from a failed
/// loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("{message}")]
pub struct StatusError {
    /// Human-readable description.
    pub message: String,

    /// Optional machine-readable code (HTTP status, errno, ...).
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub code: Option<String>,

    /// Display text of each `source()` below the top-level error.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Vec::is_empty"))]
    pub causes: Vec<String>,
}

impl StatusError {
    /// Create an error payload with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            causes: Vec::new(),
        }
    }

    /// Attach a machine-readable code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Capture any error's display text and its full source chain.
    ///
    /// ```
    /// use selectable_list::StatusError;
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "genre fetch timed out");
    /// let payload = StatusError::from_error(&io);
    /// assert_eq!(payload.message, "genre fetch timed out");
    /// ```
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: err.to_string(),
            code: None,
            causes,
        }
    }
}

// =============================================================================
// STATUS
// =============================================================================

/// Load/operation status of a selectable list.
///
/// There is no transition table: any status can follow any other. Writers
/// overwrite unconditionally and the last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "value", rename_all = "lowercase")
)]
pub enum Status {
    #[default]
    Idle,
    Pending,
    Success,
    Error {
        #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
        error: Option<StatusError>,
    },
}

impl Status {
    /// Shorthand for an error status with a message payload.
    pub fn error(message: impl Into<String>) -> Self {
        Status::Error {
            error: Some(StatusError::new(message)),
        }
    }

    /// Error status from an existing payload.
    pub fn from_error(error: StatusError) -> Self {
        Status::Error { error: Some(error) }
    }

    /// The tag as a lowercase string: `"idle"`, `"pending"`, `"success"`
    /// or `"error"`.
    pub fn value(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Pending => "pending",
            Status::Success => "success",
            Status::Error { .. } => "error",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Status::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Status::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Status::Success)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Status::Error { .. })
    }

    /// The error payload, if this is an error status that carries one.
    pub fn error_payload(&self) -> Option<&StatusError> {
        match self {
            Status::Error { error } => error.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.error_payload() {
            Some(err) => write!(f, "error: {err}"),
            None => f.write_str(self.value()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
