//! # Parameter Maps
//!
//! The input contract of the engine: a flat mapping from parameter name to a
//! scalar value, as produced by a section-library row or a JSON document.
//!
//! Construction is two-phase. An `*Input` record starts from its defaults and
//! [`ApplyParams::apply_params`] overwrites only the keys it recognises; every
//! other key is ignored so one heterogeneous row can feed several builders.
//! Derivation then runs on the finished record. Derived values are never read
//! from a parameter map.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::params::ParamMap;
//!
//! let params = ParamMap::new()
//!     .with("section", "460UB82.1")
//!     .with("sec_type", "UB")
//!     .with("d", 460.0)
//!     .with("supplier", "ignored");
//!
//! assert_eq!(params.number("d").unwrap(), Some(460.0));
//! assert_eq!(params.text("sec_type").unwrap().as_deref(), Some("UB"));
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};

/// One scalar parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Flag(bool),
    Number(f64),
    Text(String),
}

impl ParamValue {
    /// Interpret as a number. Numeric strings are accepted; an empty string
    /// or NaN reads as "not supplied".
    pub fn as_number(&self) -> Option<Option<f64>> {
        match self {
            ParamValue::Number(v) if v.is_nan() => Some(None),
            ParamValue::Number(v) => Some(Some(*v)),
            ParamValue::Text(s) if s.trim().is_empty() => Some(None),
            ParamValue::Text(s) => s.trim().parse::<f64>().ok().map(|v| (!v.is_nan()).then_some(v)),
            ParamValue::Flag(_) => None,
        }
    }

    /// Interpret as a flag. Accepts booleans, `1`/`0` and `true`/`false` text.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            ParamValue::Flag(b) => Some(*b),
            ParamValue::Number(v) if *v == 1.0 => Some(true),
            ParamValue::Number(v) if *v == 0.0 => Some(false),
            ParamValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            ParamValue::Number(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Flag(b) => write!(f, "{}", b),
            ParamValue::Number(v) => write!(f, "{}", v),
            ParamValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Number(v)
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Number(v as f64)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Flag(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Text(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Text(v)
    }
}

/// Mapping of named scalar parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamMap(BTreeMap<String, ParamValue>);

impl ParamMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object into a parameter map.
    pub fn from_json(json: &str) -> DesignResult<Self> {
        serde_json::from_str(json).map_err(|e| DesignError::serialization(format!("Invalid parameter map: {}", e)))
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Read a numeric parameter. `Ok(None)` when absent or blank.
    pub fn number(&self, key: &str) -> DesignResult<Option<f64>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_number()
                .ok_or_else(|| DesignError::invalid_input(key, value.to_string(), "Expected a number")),
        }
    }

    /// Read a text parameter. Numbers and flags are rendered as text.
    pub fn text(&self, key: &str) -> DesignResult<Option<String>> {
        Ok(self.0.get(key).map(|value| value.to_string()))
    }

    /// Read a boolean parameter.
    pub fn flag(&self, key: &str) -> DesignResult<Option<bool>> {
        match self.0.get(key) {
            None => Ok(None),
            Some(value) => value
                .as_flag()
                .map(Some)
                .ok_or_else(|| DesignError::invalid_input(key, value.to_string(), "Expected true or false")),
        }
    }

    // =========================================================================
    // Phase-one helpers: overwrite a raw input field when the key is present
    // =========================================================================

    pub fn apply_number(&self, key: &str, target: &mut f64) -> DesignResult<()> {
        if let Some(v) = self.number(key)? {
            *target = v;
        }
        Ok(())
    }

    /// Like [`apply_number`](Self::apply_number) but a blank value clears the field.
    pub fn apply_optional(&self, key: &str, target: &mut Option<f64>) -> DesignResult<()> {
        if self.contains_key(key) {
            *target = self.number(key)?;
        }
        Ok(())
    }

    /// Apply a whole-number count (bolt rows, columns).
    pub fn apply_count(&self, key: &str, target: &mut u32) -> DesignResult<()> {
        if let Some(v) = self.number(key)? {
            if v < 1.0 || v.fract() != 0.0 {
                return Err(DesignError::invalid_input(key, v.to_string(), "Expected a positive whole number"));
            }
            *target = v as u32;
        }
        Ok(())
    }

    pub fn apply_flag(&self, key: &str, target: &mut bool) -> DesignResult<()> {
        if let Some(v) = self.flag(key)? {
            *target = v;
        }
        Ok(())
    }

    pub fn apply_text(&self, key: &str, target: &mut String) -> DesignResult<()> {
        if let Some(v) = self.text(key)? {
            *target = v;
        }
        Ok(())
    }

    /// Apply a parameter parsed through the target type's `FromStr`.
    pub fn apply_parsed<T>(&self, key: &str, target: &mut T) -> DesignResult<()>
    where
        T: FromStr<Err = DesignError>,
    {
        if let Some(v) = self.text(key)? {
            *target = v.trim().parse()?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ParamMap(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Raw input records that can be overwritten from a [`ParamMap`].
pub trait ApplyParams {
    /// Overwrite every recognised raw input present in `params`.
    /// Unrecognised keys are ignored.
    fn apply_params(&mut self, params: &ParamMap) -> DesignResult<()>;

    /// Start from the defaults and apply `params`.
    fn from_params(params: &ParamMap) -> DesignResult<Self>
    where
        Self: Default + Sized,
    {
        let mut input = Self::default();
        input.apply_params(params)?;
        Ok(input)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_parsing() {
        let params = ParamMap::new()
            .with("d", 460.0)
            .with("b", "191")
            .with("r_1", "")
            .with("t", f64::NAN)
            .with("grade", "GR300");

        assert_eq!(params.number("d").unwrap(), Some(460.0));
        assert_eq!(params.number("b").unwrap(), Some(191.0));
        assert_eq!(params.number("r_1").unwrap(), None);
        assert_eq!(params.number("t").unwrap(), None);
        assert_eq!(params.number("missing").unwrap(), None);
        assert!(params.number("grade").is_err());
    }

    #[test]
    fn test_flag_parsing() {
        let params = ParamMap::new()
            .with("a", true)
            .with("b", 0.0)
            .with("c", "False")
            .with("d", "maybe");
        assert_eq!(params.flag("a").unwrap(), Some(true));
        assert_eq!(params.flag("b").unwrap(), Some(false));
        assert_eq!(params.flag("c").unwrap(), Some(false));
        assert!(params.flag("d").is_err());
    }

    #[test]
    fn test_apply_helpers_leave_absent_fields() {
        let params = ParamMap::new().with("s_p", 90.0).with("n_p", 3.0);
        let mut s_p = 70.0;
        let mut s_g = 70.0;
        let mut n_p = 7;
        params.apply_number("s_p", &mut s_p).unwrap();
        params.apply_number("s_g", &mut s_g).unwrap();
        params.apply_count("n_p", &mut n_p).unwrap();
        assert_eq!(s_p, 90.0);
        assert_eq!(s_g, 70.0);
        assert_eq!(n_p, 3);

        let bad = ParamMap::new().with("n_p", 2.5);
        assert!(bad.apply_count("n_p", &mut n_p).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let json = r#"{"d": 460.0, "sec_type": "UB", "threads_included": true}"#;
        let params = ParamMap::from_json(json).unwrap();
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("sec_type"), Some(&ParamValue::Text("UB".to_string())));
        assert_eq!(params.get("threads_included"), Some(&ParamValue::Flag(true)));

        let back = serde_json::to_string(&params).unwrap();
        assert_eq!(ParamMap::from_json(&back).unwrap(), params);
    }
}
