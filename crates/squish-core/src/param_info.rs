//! Parameter introspection for discoverable processor parameters.
//!
//! This module provides the [`ParameterInfo`] trait and supporting types that
//! let hosts (the CLI, preset loaders, property tests) enumerate, display, and
//! set a processor's parameters at runtime without knowing its concrete type.
//!
//! # Design
//!
//! Parameters are accessed by zero-based index. Each one is described by a
//! [`ParamDescriptor`] carrying display metadata, its valid range, a stable
//! [`ParamId`] and [`ParamFlags`].
//! Discrete (enumerated) parameters are flagged [`ParamFlags::STEPPED`] and
//! carry one label per integer value in `step_labels`.
//!
//! # Example
//!
//! ```rust
//! use squish_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     gain: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::multiplier("Gain", "Gain", 1.0, 4.0, 1.0)
//!                 .with_id(ParamId(10), "trim_gain")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain = value.clamp(1.0, 4.0);
//!         }
//!     }
//! }
//! ```

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter:
/// presets and automation refer to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// # Example
///
/// ```rust
/// use squish_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::AUTOMATABLE));
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// # Parameter Indexing
///
/// The index of a parameter must be stable for the lifetime of the
/// instance. Use [`param_count`](Self::param_count) to determine valid
/// indices.
pub trait ParameterInfo {
    /// Returns the number of parameters this processor exposes.
    fn param_count(&self) -> usize;

    /// Returns the descriptor for the parameter at the given index.
    ///
    /// Returns `None` if `index >= param_count()`.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Gets the current value of the parameter at the given index.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the value of the parameter at the given index.
    ///
    /// Implementations clamp the value to the descriptor's range.
    /// Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches against [`ParamDescriptor::name`],
    /// [`ParamDescriptor::short_name`] and [`ParamDescriptor::string_id`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }
}

/// Describes a single parameter's metadata for display and validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Threshold").
    pub name: &'static str,

    /// Short name, max 8 characters (e.g., "Thresh").
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the processor is created.
    pub default: f32,

    /// Recommended step increment for encoder-based control.
    pub step: f32,

    /// Stable numeric ID for presets and automation.
    pub id: ParamId,

    /// Human-readable stable ID, also the key used in preset files
    /// (e.g., `"threshold"`).
    pub string_id: &'static str,

    /// Capability flags.
    pub flags: ParamFlags,

    /// Labels for the integer values of a stepped parameter, in order.
    /// Empty for continuous parameters.
    pub step_labels: &'static [&'static str],
}

impl ParamDescriptor {
    /// Time parameter with custom name and range (milliseconds).
    pub fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Milliseconds,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
            step_labels: &[],
        }
    }

    /// Linear multiplier parameter (make-up gain, knee width).
    pub fn multiplier(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Multiplier,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
            step_labels: &[],
        }
    }

    /// Discrete parameter selecting one of `labels` by index.
    ///
    /// The range is `0..=labels.len() - 1` with a step of 1.
    pub fn choice(
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default: usize,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: labels.len().saturating_sub(1) as f32,
            default: default as f32,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            step_labels: labels,
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// # Example
    ///
    /// ```rust
    /// use squish_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::multiplier("Makeup", "Makeup", 1.0, 64.0, 2.0)
    ///     .with_id(ParamId(104), "makeup");
    /// assert_eq!(desc.id, ParamId(104));
    /// assert_eq!(desc.string_id, "makeup");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// # Example
    ///
    /// ```rust
    /// use squish_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::multiplier("Makeup", "Makeup", 1.0, 64.0, 2.0);
    /// assert_eq!(desc.clamp(0.5), 1.0);
    /// assert_eq!(desc.clamp(100.0), 64.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Label for a stepped parameter's value, if it has one.
    pub fn label_for(&self, value: f32) -> Option<&'static str> {
        if value < 0.0 {
            return None;
        }
        self.step_labels.get(libm::roundf(value) as usize).copied()
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Milliseconds (ms) - attack and release times.
    Milliseconds,

    /// Ratio (n:1) - compression ratio.
    Ratio,

    /// Linear multiplier (x) - make-up gain, knee width.
    Multiplier,

    /// No unit - linear amplitudes, mix fractions, enumerations.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// # Example
    ///
    /// ```rust
    /// use squish_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Milliseconds.suffix(), " ms");
    /// assert_eq!(ParamUnit::Ratio.suffix(), ":1");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Ratio => ":1",
            ParamUnit::Multiplier => "x",
            ParamUnit::None => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: &[&str] = &["average", "maximum"];

    struct TwoParams {
        values: [f32; 2],
    }

    impl ParameterInfo for TwoParams {
        fn param_count(&self) -> usize {
            2
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(
                    ParamDescriptor::time_ms("Attack", "Attack", 0.01, 2000.0, 20.0)
                        .with_id(ParamId(102), "attack"),
                ),
                1 => Some(ParamDescriptor::choice("Link", "Link", LABELS, 0).with_id(ParamId(106), "link")),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            self.values.get(index).copied().unwrap_or(0.0)
        }

        fn set_param(&mut self, index: usize, value: f32) {
            if let Some(desc) = self.param_info(index) {
                self.values[index] = desc.clamp(value);
            }
        }
    }

    #[test]
    fn find_by_name_matches_all_name_forms() {
        let p = TwoParams { values: [20.0, 0.0] };
        assert_eq!(p.find_param_by_name("ATTACK"), Some(0));
        assert_eq!(p.find_param_by_name("link"), Some(1));
        assert_eq!(p.find_param_by_name("knee"), None);
    }

    #[test]
    fn set_param_clamps() {
        let mut p = TwoParams { values: [20.0, 0.0] };
        p.set_param(0, 5000.0);
        assert_eq!(p.get_param(0), 2000.0);
        p.set_param(1, 7.0);
        assert_eq!(p.get_param(1), 1.0);
    }

    #[test]
    fn choice_descriptor_is_stepped() {
        let desc = ParamDescriptor::choice("Link", "Link", LABELS, 1);
        assert!(desc.flags.contains(ParamFlags::STEPPED));
        assert_eq!(desc.max, 1.0);
        assert_eq!(desc.default, 1.0);
        assert_eq!(desc.label_for(1.0), Some("maximum"));
        assert_eq!(desc.label_for(2.0), None);
        assert_eq!(desc.label_for(-1.0), None);
    }

    #[test]
    fn range_checks() {
        let desc = ParamDescriptor::multiplier("Makeup", "Makeup", 1.0, 64.0, 2.0);
        assert!(desc.contains(64.0));
        assert!(!desc.contains(0.5));
    }
}
