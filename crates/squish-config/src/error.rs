//! Error types for preset files.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::validation::ValidationError;

/// File operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a preset.
    Read,
    /// Writing a preset.
    Write,
    /// Creating the directory a preset is saved into.
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

/// Errors from loading, saving, or finding presets.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file operation failed.
    #[error("cannot {op} '{path}': {source}")]
    Io {
        /// What was being attempted.
        op: FileOp,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid preset document.
    #[error("invalid preset TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The preset could not be encoded.
    #[error("cannot encode preset as TOML: {0}")]
    Encode(#[from] toml::ser::Error),

    /// The preset parsed but its values are unusable.
    #[error("invalid preset values: {0}")]
    Invalid(#[from] ValidationError),

    /// Neither a factory preset nor an existing file.
    #[error("no factory preset or file named '{0}'")]
    UnknownPreset(String),
}

impl ConfigError {
    pub(crate) fn io(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io::ErrorKind;

    #[test]
    fn io_message_names_operation_and_path() {
        let err = ConfigError::io(
            FileOp::CreateDir,
            "/presets/mine",
            std::io::Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            err.to_string(),
            "cannot create directory '/presets/mine': denied"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn validation_errors_convert() {
        let err: ConfigError = ValidationError::UnknownParameter {
            param: "drive".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid preset values: unknown parameter 'drive'"
        );
    }

    #[test]
    fn unknown_preset_has_no_source() {
        let err = ConfigError::UnknownPreset("warm".to_string());
        assert!(err.to_string().contains("'warm'"));
        assert!(err.source().is_none());
    }
}
