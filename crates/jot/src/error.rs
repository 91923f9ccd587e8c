#![forbid(unsafe_code)]

//! Error model for the notes host.
//!
//! Editing itself never fails: undo and redo on an empty history are no-ops
//! and malformed style data is skipped while decoding. Errors only come from
//! the outer edges, loading configuration and reading or writing sessions.

use std::fmt;

// ── Domain-Specific Error Types ─────────────────────────────────────────

/// Configuration loading and validation errors.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

/// Session file errors.
#[cfg(feature = "persistence")]
#[derive(Debug)]
pub enum SessionError {
    /// I/O failure reading or writing the session file.
    Io(std::io::Error),
    /// The session file is not valid JSON for a snapshot.
    Json(serde_json::Error),
    /// The session was written by an incompatible format version.
    UnsupportedVersion(u32),
}

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for jot.
#[derive(Debug)]
pub enum Error {
    /// Configuration failure.
    Config(ConfigError),
    /// Session persistence failure.
    #[cfg(feature = "persistence")]
    Session(SessionError),
}

/// Standard result type for jot APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

#[cfg(feature = "persistence")]
impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "session I/O error: {e}"),
            Self::Json(e) => write!(f, "session parse error: {e}"),
            Self::UnsupportedVersion(version) => {
                write!(f, "unsupported session version: {version}")
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            #[cfg(feature = "persistence")]
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

#[cfg(feature = "persistence")]
impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::UnsupportedVersion(_) => None,
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            #[cfg(feature = "persistence")]
            Self::Session(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

#[cfg(feature = "persistence")]
impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Self::Session(err)
    }
}

#[cfg(feature = "persistence")]
impl From<std::io::Error> for SessionError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

#[cfg(feature = "persistence")]
impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn validation_errors_join_messages() {
        let err = ConfigError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "validation errors: a; b");
        assert!(err.source().is_none());
    }

    #[test]
    fn unified_error_wraps_config_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = Error::from(ConfigError::Io(io));
        assert!(err.to_string().contains("missing"));
        assert!(err.source().is_some());
    }

    #[cfg(feature = "persistence")]
    #[test]
    fn session_version_error_displays_version() {
        let err = Error::from(SessionError::UnsupportedVersion(9));
        assert_eq!(err.to_string(), "unsupported session version: 9");
    }
}
