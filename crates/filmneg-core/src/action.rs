//! Filter action records.
//!
//! A [`FilterAction`] describes one filter invocation well enough to replay
//! it later: a filter identifier, a format version and an ordered list of
//! named, typed parameters. Filters build one from their settings and can be
//! reconstructed from one.
//!
//! Typed accessors never fail. A missing key or a value of an unrelated type
//! reads as the type's zero value (`0`, `0.0`, `false`, `""`), which is how
//! history entries written by older versions stay loadable.
//!
//! # Example
//!
//! ```rust
//! use filmneg_core::FilterAction;
//!
//! let mut action = FilterAction::new("filmneg:FilmFilter", 1);
//! action.add_parameter("Gamma", 1.8);
//! action.add_parameter("CNType", 3);
//!
//! assert_eq!(action.double("Gamma"), 1.8);
//! assert_eq!(action.int("CNType"), 3);
//! assert_eq!(action.double("Exposure"), 0.0); // missing
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed parameter value.
///
/// Numeric accessors coerce between the numeric variants; strings are
/// parsed. Serialized untagged so YAML files stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionValue {
    /// Boolean flag.
    Bool(bool),
    /// Integer (enum ids, levels bounds).
    Int(i64),
    /// Floating point (exposure, gamma, white point samples).
    Double(f64),
    /// Free text (display names).
    Str(String),
}

impl ActionValue {
    /// Value as `f64`, or `0.0` if not convertible.
    pub fn to_double(&self) -> f64 {
        match self {
            ActionValue::Bool(b) => f64::from(u8::from(*b)),
            ActionValue::Int(i) => *i as f64,
            ActionValue::Double(d) => *d,
            ActionValue::Str(s) => s.trim().parse().unwrap_or(0.0),
        }
    }

    /// Value as `i64`, or `0` if not convertible. Doubles truncate.
    pub fn to_int(&self) -> i64 {
        match self {
            ActionValue::Bool(b) => i64::from(*b),
            ActionValue::Int(i) => *i,
            ActionValue::Double(d) => *d as i64,
            ActionValue::Str(s) => s.trim().parse().unwrap_or(0),
        }
    }

    /// Value as `bool`. Non-zero numbers and `"true"` read as `true`.
    pub fn to_bool(&self) -> bool {
        match self {
            ActionValue::Bool(b) => *b,
            ActionValue::Int(i) => *i != 0,
            ActionValue::Double(d) => *d != 0.0,
            ActionValue::Str(s) => matches!(s.trim(), "true" | "1"),
        }
    }

    /// Value rendered as text.
    pub fn to_text(&self) -> String {
        match self {
            ActionValue::Str(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for ActionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionValue::Bool(b) => write!(f, "{b}"),
            ActionValue::Int(i) => write!(f, "{i}"),
            ActionValue::Double(d) => write!(f, "{d}"),
            ActionValue::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

impl From<bool> for ActionValue {
    fn from(v: bool) -> Self {
        ActionValue::Bool(v)
    }
}

impl From<i32> for ActionValue {
    fn from(v: i32) -> Self {
        ActionValue::Int(v as i64)
    }
}

impl From<i64> for ActionValue {
    fn from(v: i64) -> Self {
        ActionValue::Int(v)
    }
}

impl From<u32> for ActionValue {
    fn from(v: u32) -> Self {
        ActionValue::Int(v as i64)
    }
}

impl From<f64> for ActionValue {
    fn from(v: f64) -> Self {
        ActionValue::Double(v)
    }
}

impl From<&str> for ActionValue {
    fn from(v: &str) -> Self {
        ActionValue::Str(v.to_string())
    }
}

impl From<String> for ActionValue {
    fn from(v: String) -> Self {
        ActionValue::Str(v)
    }
}

/// One named parameter of a [`FilterAction`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionParameter {
    /// Parameter key, e.g. `"Exposure"` or `"lInput[2]"`.
    pub name: String,
    /// Parameter value.
    pub value: ActionValue,
}

/// Replayable description of a filter invocation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterAction {
    /// Filter identifier, e.g. `"filmneg:InvertFilter"`.
    pub identifier: String,
    /// Parameter format version.
    pub version: u32,
    /// Human readable filter name.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
    /// Parameters in insertion order.
    #[serde(default)]
    pub params: Vec<ActionParameter>,
}

impl FilterAction {
    /// Creates an action with no parameters.
    pub fn new(identifier: impl Into<String>, version: u32) -> Self {
        Self {
            identifier: identifier.into(),
            version,
            display_name: String::new(),
            params: Vec::new(),
        }
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    /// Whether this action names no filter.
    pub fn is_null(&self) -> bool {
        self.identifier.is_empty()
    }

    /// Whether this action was produced by `identifier` at `version`.
    pub fn matches(&self, identifier: &str, version: u32) -> bool {
        self.identifier == identifier && self.version == version
    }

    /// Adds a parameter, replacing an existing one with the same name.
    pub fn add_parameter(&mut self, name: impl Into<String>, value: impl Into<ActionValue>) {
        let name = name.into();
        let value = value.into();
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(p) => p.value = value,
            None => self.params.push(ActionParameter { name, value }),
        }
    }

    /// Raw parameter lookup.
    pub fn parameter(&self, name: &str) -> Option<&ActionValue> {
        self.params.iter().find(|p| p.name == name).map(|p| &p.value)
    }

    /// Whether a parameter is present.
    pub fn has_parameter(&self, name: &str) -> bool {
        self.parameter(name).is_some()
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter as `f64`; `0.0` when missing.
    pub fn double(&self, name: &str) -> f64 {
        self.parameter(name).map_or(0.0, ActionValue::to_double)
    }

    /// Parameter as `i64`; `0` when missing.
    pub fn int(&self, name: &str) -> i64 {
        self.parameter(name).map_or(0, ActionValue::to_int)
    }

    /// Parameter as `bool`; `false` when missing.
    pub fn bool(&self, name: &str) -> bool {
        self.parameter(name).is_some_and(ActionValue::to_bool)
    }

    /// Parameter as text; empty when missing.
    pub fn string(&self, name: &str) -> String {
        self.parameter(name).map(ActionValue::to_text).unwrap_or_default()
    }
}

impl fmt::Display for FilterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} v{}", self.identifier, self.version)?;
        for p in &self.params {
            write!(f, "\n  {} = {}", p.name, p.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_missing_keys_default() {
        let action = FilterAction::new("x", 1);
        assert_eq!(action.double("a"), 0.0);
        assert_eq!(action.int("a"), 0);
        assert!(!action.bool("a"));
        assert_eq!(action.string("a"), "");
    }

    #[test]
    fn test_coercion() {
        assert_eq!(ActionValue::Double(2.9).to_int(), 2);
        assert_relative_eq!(ActionValue::Int(3).to_double(), 3.0);
        assert!(ActionValue::Int(1).to_bool());
        assert!(!ActionValue::Double(0.0).to_bool());
        assert_relative_eq!(ActionValue::from("1.25").to_double(), 1.25);
        assert_eq!(ActionValue::from("junk").to_int(), 0);
    }

    #[test]
    fn test_add_parameter_replaces() {
        let mut action = FilterAction::new("x", 1);
        action.add_parameter("Gamma", 1.0);
        action.add_parameter("Exposure", 2.0);
        action.add_parameter("Gamma", 1.8);
        assert_eq!(action.len(), 2);
        assert_eq!(action.params[0].name, "Gamma");
        assert_relative_eq!(action.double("Gamma"), 1.8);
    }

    #[test]
    fn test_matches_and_null() {
        let action = FilterAction::new("filmneg:InvertFilter", 1);
        assert!(action.matches("filmneg:InvertFilter", 1));
        assert!(!action.matches("filmneg:InvertFilter", 2));
        assert!(!action.is_null());
        assert!(FilterAction::default().is_null());
    }

    #[test]
    fn test_display_lists_params() {
        let mut action = FilterAction::new("f", 1);
        action.add_parameter("ProfileName", "Neutral");
        let text = action.to_string();
        assert!(text.starts_with("f v1"));
        assert!(text.contains("ProfileName = \"Neutral\""));
    }
}
