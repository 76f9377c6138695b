//! Parameter name and range validation.
//!
//! Range checks report every offending parameter in one pass, so a preset
//! with three bad values yields one [`ValidationError::Multiple`] listing all
//! three rather than failing on the first.
//!
//! # Example
//!
//! ```rust
//! use squish_config::{validate_params, ValidationError};
//! use squish_dynamics::CompressorParams;
//!
//! let params = CompressorParams {
//!     makeup: 100.0,
//!     knee: 0.5,
//!     ..CompressorParams::default()
//! };
//! match validate_params(&params) {
//!     Err(ValidationError::Multiple(errors)) => assert_eq!(errors.len(), 2),
//!     other => panic!("expected two errors, got {other:?}"),
//! }
//! ```

use squish_core::ParamDescriptor;
use squish_dynamics::params::{PARAM_COUNT, descriptor};
use squish_dynamics::{CompressorParams, Ratio};
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Unknown parameter name.
    #[error("unknown parameter '{param}'")]
    UnknownParameter {
        /// Name of the unrecognized parameter.
        param: String,
    },

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Invalid parameter format.
    #[error("invalid format for parameter '{param}': {reason}")]
    InvalidFormat {
        /// Name of the parameter.
        param: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Look up a parameter index by string ID or display name
/// (case-insensitive).
pub fn param_index(name: &str) -> Option<usize> {
    let name = name.trim();
    (0..PARAM_COUNT).find(|&i| {
        descriptor(i).is_some_and(|d| {
            d.string_id.eq_ignore_ascii_case(name)
                || d.name.eq_ignore_ascii_case(name)
                || d.short_name.eq_ignore_ascii_case(name)
        })
    })
}

/// Descriptor for a parameter name, or [`ValidationError::UnknownParameter`].
pub fn param_descriptor(name: &str) -> ValidationResult<ParamDescriptor> {
    param_index(name)
        .and_then(descriptor)
        .ok_or_else(|| ValidationError::UnknownParameter {
            param: name.to_string(),
        })
}

fn check(desc: &ParamDescriptor, value: f32) -> Option<ValidationError> {
    if value.is_nan() || !desc.contains(value) {
        Some(ValidationError::OutOfRange {
            param: desc.string_id.to_string(),
            value,
            min: desc.min,
            max: desc.max,
        })
    } else {
        None
    }
}

/// Validate a single numeric value against the named parameter's range.
pub fn validate_param(name: &str, value: f32) -> ValidationResult<()> {
    let desc = param_descriptor(name)?;
    match check(&desc, value) {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Validate every field of a parameter set.
///
/// Returns the single error when one field is out of range, or
/// [`ValidationError::Multiple`] when several are.
pub fn validate_params(params: &CompressorParams) -> ValidationResult<()> {
    let mut errors = Vec::new();

    for index in 0..PARAM_COUNT {
        let Some(desc) = descriptor(index) else {
            continue;
        };
        // The limit ratio sits outside the finite range by construction.
        if index == 1 && params.ratio == Ratio::Limit {
            continue;
        }
        if let Some(err) = check(&desc, params.get(index)) {
            errors.push(err);
        }
    }

    collect(errors)
}

/// Fold a list of errors into one result.
pub(crate) fn collect(mut errors: Vec<ValidationError>) -> ValidationResult<()> {
    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(validate_params(&CompressorParams::default()).is_ok());
    }

    #[test]
    fn single_error_is_not_wrapped() {
        let params = CompressorParams {
            attack_ms: 0.0,
            ..CompressorParams::default()
        };
        assert_eq!(
            validate_params(&params),
            Err(ValidationError::OutOfRange {
                param: "attack".to_string(),
                value: 0.0,
                min: 0.01,
                max: 2000.0,
            })
        );
    }

    #[test]
    fn all_errors_reported() {
        let params = CompressorParams {
            threshold: 2.0,
            ratio: Ratio::Finite(0.5),
            mix: 1.5,
            ..CompressorParams::default()
        };
        let Err(ValidationError::Multiple(errors)) = validate_params(&params) else {
            panic!("expected multiple errors");
        };
        let names: Vec<_> = errors
            .iter()
            .map(|e| match e {
                ValidationError::OutOfRange { param, .. } => param.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(names, ["threshold", "ratio", "mix"]);
    }

    #[test]
    fn limit_ratio_passes() {
        let params = CompressorParams {
            ratio: Ratio::Limit,
            ..CompressorParams::default()
        };
        assert!(validate_params(&params).is_ok());
    }

    #[test]
    fn lookup_by_any_name() {
        assert_eq!(param_index("threshold"), Some(0));
        assert_eq!(param_index("Makeup Gain"), Some(4));
        assert_eq!(param_index("DETECT"), Some(7));
        assert_eq!(param_index("drive"), None);
    }

    #[test]
    fn validate_single_param() {
        assert!(validate_param("knee", 4.0).is_ok());
        assert!(matches!(
            validate_param("knee", 9.0),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_param("drive", 1.0),
            Err(ValidationError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn multiple_display_joins_messages() {
        let err = ValidationError::Multiple(vec![
            ValidationError::UnknownParameter {
                param: "a".to_string(),
            },
            ValidationError::UnknownParameter {
                param: "b".to_string(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "multiple validation errors: unknown parameter 'a'; unknown parameter 'b'"
        );
    }
}
