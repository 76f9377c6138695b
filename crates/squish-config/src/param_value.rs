//! String parameter parsing.
//!
//! Presets and the command line carry parameter values as strings. Each
//! parameter accepts plain numbers in its native unit plus a few spellings
//! that are more natural to type:
//!
//! | Parameter | Accepted forms |
//! |-----------|----------------|
//! | threshold, makeup, knee | `0.25`, `-12dB`, `+6 dB` |
//! | ratio | `4`, `4:1`, `limit`, `inf`, `∞` |
//! | attack, release | `20`, `20ms`, `0.5s` |
//! | mix | `0.5`, `50%` |
//! | link | `average`, `maximum`, `0`, `1` |
//! | detection | `peak`, `rms`, `0`, `1` |
//!
//! Parsing only checks the format. Range checks happen in
//! [`validate_params`](crate::validate_params).

use squish_core::db_to_linear;
use squish_dynamics::{CompressorParams, DetectionMode, LinkMode, Ratio};

use crate::validation::{ValidationError, ValidationResult, param_descriptor, param_index};

/// A parsed parameter value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Threshold, attack, release, makeup, knee or mix in native units.
    Number(f32),
    /// Compression ratio.
    Ratio(Ratio),
    /// Link policy.
    Link(LinkMode),
    /// Detection law.
    Detection(DetectionMode),
}

fn number(param: &str, text: &str) -> ValidationResult<f32> {
    text.trim()
        .parse::<f32>()
        .map_err(|_| ValidationError::InvalidFormat {
            param: param.to_string(),
            reason: format!("'{text}' is not a number"),
        })
}

fn strip_db(text: &str) -> Option<&str> {
    text.strip_suffix("dB")
        .or_else(|| text.strip_suffix("db"))
        .or_else(|| text.strip_suffix("DB"))
}

fn level(param: &str, text: &str) -> ValidationResult<f32> {
    match strip_db(text) {
        Some(db) => number(param, db).map(db_to_linear),
        None => number(param, text),
    }
}

fn time_ms(param: &str, text: &str) -> ValidationResult<f32> {
    if let Some(ms) = text.strip_suffix("ms") {
        number(param, ms)
    } else if let Some(s) = text.strip_suffix('s') {
        number(param, s).map(|v| v * 1000.0)
    } else {
        number(param, text)
    }
}

fn ratio(param: &str, text: &str) -> ValidationResult<Ratio> {
    let lower = text.to_ascii_lowercase();
    match lower.as_str() {
        "limit" | "inf" | "infinity" | "∞" | "∞:1" | "inf:1" => Ok(Ratio::Limit),
        _ => {
            let value = number(param, lower.strip_suffix(":1").unwrap_or(&lower))?;
            Ok(Ratio::Finite(value))
        }
    }
}

fn choice<T>(
    param: &str,
    text: &str,
    from_name: fn(&str) -> Option<T>,
    from_index: fn(usize) -> T,
    labels: &[&str],
) -> ValidationResult<T> {
    if let Some(mode) = from_name(text) {
        return Ok(mode);
    }
    match text.parse::<usize>() {
        Ok(index) if index < labels.len() => Ok(from_index(index)),
        _ => Err(ValidationError::InvalidFormat {
            param: param.to_string(),
            reason: format!("'{text}' is not one of {}", labels.join(", ")),
        }),
    }
}

/// Parse `text` as a value for parameter `name`.
///
/// # Example
///
/// ```rust
/// use squish_config::{parse_param_value, ParamValue};
/// use squish_dynamics::Ratio;
///
/// assert_eq!(parse_param_value("ratio", "inf").unwrap(), ParamValue::Ratio(Ratio::Limit));
/// assert_eq!(parse_param_value("mix", "50%").unwrap(), ParamValue::Number(0.5));
/// ```
pub fn parse_param_value(name: &str, text: &str) -> ValidationResult<ParamValue> {
    let desc = param_descriptor(name)?;
    let param = desc.string_id;
    let text = text.trim();

    let value = match param {
        "threshold" | "makeup" | "knee" => ParamValue::Number(level(param, text)?),
        "attack" | "release" => ParamValue::Number(time_ms(param, text)?),
        "mix" => match text.strip_suffix('%') {
            Some(pct) => ParamValue::Number(number(param, pct)? / 100.0),
            None => ParamValue::Number(number(param, text)?),
        },
        "ratio" => ParamValue::Ratio(ratio(param, text)?),
        "link" => ParamValue::Link(choice(
            param,
            text,
            LinkMode::from_name,
            LinkMode::from_index,
            LinkMode::LABELS,
        )?),
        "detection" => ParamValue::Detection(choice(
            param,
            text,
            DetectionMode::from_name,
            DetectionMode::from_index,
            DetectionMode::LABELS,
        )?),
        _ => {
            return Err(ValidationError::UnknownParameter {
                param: name.to_string(),
            });
        }
    };
    Ok(value)
}

/// Parse `text` and store it into `params`.
///
/// The value is not range-checked; run
/// [`validate_params`](crate::validate_params) afterwards.
pub fn apply_param(params: &mut CompressorParams, name: &str, text: &str) -> ValidationResult<()> {
    let value = parse_param_value(name, text)?;
    let index = param_index(name).ok_or_else(|| ValidationError::UnknownParameter {
        param: name.to_string(),
    })?;

    match (index, value) {
        (0, ParamValue::Number(v)) => params.threshold = v,
        (2, ParamValue::Number(v)) => params.attack_ms = v,
        (3, ParamValue::Number(v)) => params.release_ms = v,
        (4, ParamValue::Number(v)) => params.makeup = v,
        (5, ParamValue::Number(v)) => params.knee = v,
        (8, ParamValue::Number(v)) => params.mix = v,
        (_, ParamValue::Ratio(r)) => params.ratio = r,
        (_, ParamValue::Link(l)) => params.link = l,
        (_, ParamValue::Detection(d)) => params.detection = d,
        _ => {
            return Err(ValidationError::UnknownParameter {
                param: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Canonical string form of parameter `index`, as written to presets.
pub fn format_param_value(params: &CompressorParams, index: usize) -> String {
    match index {
        1 => match params.ratio {
            Ratio::Finite(r) => r.to_string(),
            Ratio::Limit => "limit".to_string(),
        },
        6 => params.link.as_str().to_string(),
        7 => params.detection.as_str().to_string(),
        _ => params.get(index).to_string(),
    }
}
