//! Error types for the fallible edges of the crate.
//!
//! The simulation step itself never fails: degenerate geometry and
//! out-of-range controls are clamped or defaulted in place. Only loading and
//! validating [`Settings`](crate::Settings) can go wrong.

use std::fmt;

/// Top-level error enum.
#[derive(Debug)]
pub enum SimError {
    /// Reading a settings file failed.
    Io {
        /// Path that was being read.
        path: String,
        source: std::io::Error,
    },

    /// Settings JSON was malformed or had the wrong shape.
    Parse(serde_json::Error),

    /// A tunable is outside the range the simulation can handle.
    UnsafeValue {
        /// Name of the setting (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the safe range.
        safe_range: &'static str,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Io { path, source } => {
                write!(f, "failed to read settings from '{}': {}", path, source)
            }
            SimError::Parse(err) => write!(f, "invalid settings JSON: {}", err),
            SimError::UnsafeValue {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "setting '{}' = {} is outside safe range {}",
                name, value, safe_range
            ),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Io { source, .. } => Some(source),
            SimError::Parse(err) => Some(err),
            SimError::UnsafeValue { .. } => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::Parse(err)
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsafe_value_display() {
        let err = SimError::UnsafeValue {
            name: "arena_width",
            value: -1.0,
            safe_range: "(0.0, ∞)",
        };
        let msg = err.to_string();
        assert!(msg.contains("arena_width"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn test_parse_error_has_source() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = SimError::from(json_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
