//! # Result Reporting
//!
//! The output contract of the engine. Every evaluated entity exposes a flat,
//! ordered [`ResultMap`] of full-precision values; significant-figure rounding
//! is applied once, on a snapshot, by [`ResultMap::rounded`].
//!
//! ## Example
//!
//! ```rust
//! use steel_core::report::{ResultMap, ResultValue};
//!
//! let mut results = ResultMap::new();
//! results.insert("name", "M20 8.8/S (TI)");
//! results.insert("phiV_f", 92.6314);
//!
//! let rounded = results.rounded(3);
//! assert_eq!(rounded.number("phiV_f"), Some(92.6));
//! // The original snapshot keeps full precision
//! assert_eq!(results.number("phiV_f"), Some(92.6314));
//! ```

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// One reported scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultValue {
    Number(f64),
    Text(String),
    Flag(bool),
    /// The quantity does not apply to this configuration (serialized as `null`)
    NotApplicable,
}

impl ResultValue {
    fn rounded(&self, sig_figs: u32) -> ResultValue {
        match self {
            ResultValue::Number(v) => ResultValue::Number(round_sig_figs(*v, sig_figs)),
            other => other.clone(),
        }
    }
}

impl Serialize for ResultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResultValue::Number(v) => serializer.serialize_f64(*v),
            ResultValue::Text(s) => serializer.serialize_str(s),
            ResultValue::Flag(b) => serializer.serialize_bool(*b),
            ResultValue::NotApplicable => serializer.serialize_none(),
        }
    }
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultValue::Number(v) => write!(f, "{}", v),
            ResultValue::Text(s) => write!(f, "{}", s),
            ResultValue::Flag(b) => write!(f, "{}", b),
            ResultValue::NotApplicable => write!(f, "n/a"),
        }
    }
}

impl From<f64> for ResultValue {
    fn from(v: f64) -> Self {
        ResultValue::Number(v)
    }
}

impl From<u32> for ResultValue {
    fn from(v: u32) -> Self {
        ResultValue::Number(v as f64)
    }
}

impl From<bool> for ResultValue {
    fn from(v: bool) -> Self {
        ResultValue::Flag(v)
    }
}

impl From<&str> for ResultValue {
    fn from(v: &str) -> Self {
        ResultValue::Text(v.to_string())
    }
}

impl From<String> for ResultValue {
    fn from(v: String) -> Self {
        ResultValue::Text(v)
    }
}

/// Ordered mapping of result names to values.
///
/// Insertion order is the report order. Re-inserting a key replaces the value
/// in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultMap {
    entries: Vec<(String, ResultValue)>,
}

impl ResultMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ResultValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Append every entry of `other`, prefixing its keys with `prefix.`
    pub fn extend_prefixed(&mut self, prefix: &str, other: ResultMap) {
        for (k, v) in other.entries {
            self.insert(format!("{}.{}", prefix, k), v);
        }
    }

    pub fn get(&self, key: &str) -> Option<&ResultValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Numeric value of `key`, if present and numeric
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(ResultValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(ResultValue::Text(s)) => Some(s),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(ResultValue::Flag(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResultValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy with every numeric value rounded to `sig_figs` significant figures.
    pub fn rounded(&self, sig_figs: u32) -> ResultMap {
        ResultMap {
            entries: self
                .entries
                .iter()
                .map(|(k, v)| (k.clone(), v.rounded(sig_figs)))
                .collect(),
        }
    }
}

impl Serialize for ResultMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl fmt::Display for ResultMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.keys().map(str::len).max().unwrap_or(0);
        for (k, v) in &self.entries {
            writeln!(f, "  {:<width$} = {}", k, v, width = width)?;
        }
        Ok(())
    }
}

/// Digits an f64 can carry
pub const MAX_SIG_FIGS: u32 = 17;

/// Round `value` to `sig_figs` significant figures.
///
/// Zero and non-finite values pass through unchanged, as does every value
/// when `sig_figs` is zero or at least [`MAX_SIG_FIGS`].
pub fn round_sig_figs(value: f64, sig_figs: u32) -> f64 {
    if value == 0.0 || !value.is_finite() || sig_figs == 0 || sig_figs >= MAX_SIG_FIGS {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let decimals = sig_figs as i32 - 1 - magnitude;
    let rounded = if decimals >= 0 {
        let factor = 10f64.powi(decimals);
        (value * factor).round() / factor
    } else {
        let factor = 10f64.powi(-decimals);
        (value / factor).round() * factor
    };
    // Subnormal magnitudes overflow the scale factor
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Entities that expose their derived values as a flat result map.
pub trait Report {
    /// Full-precision snapshot of every reported value
    fn results(&self) -> ResultMap;

    /// Default number of significant figures for this entity
    fn default_sig_figs(&self) -> u32 {
        3
    }

    /// Snapshot rounded to the entity's default precision
    fn report(&self) -> ResultMap {
        self.results().rounded(self.default_sig_figs())
    }

    /// Snapshot rounded to an explicit precision
    fn report_with(&self, sig_figs: u32) -> ResultMap {
        self.results().rounded(sig_figs)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_sig_figs_beyond_f64_precision() {
        assert_eq!(round_sig_figs(92.6, 400), 92.6);
        assert_eq!(round_sig_figs(92.6, MAX_SIG_FIGS), 92.6);
        assert_eq!(round_sig_figs(1e-310, 4), 1e-310);
        assert!((round_sig_figs(1.234567e-300, 3) - 1.23e-300).abs() < 1e-310);
    }

    #[test]
    fn test_round_sig_figs() {
        assert_eq!(round_sig_figs(2873.3, 3), 2870.0);
        assert_eq!(round_sig_figs(1049.6, 4), 1050.0);
        assert!((round_sig_figs(0.012345, 3) - 0.0123).abs() < 1e-12);
        assert_eq!(round_sig_figs(-15.55, 2), -16.0);
        assert_eq!(round_sig_figs(0.0, 3), 0.0);
        assert!(round_sig_figs(f64::NAN, 3).is_nan());
    }

    #[test]
    fn test_insert_preserves_order_and_replaces() {
        let mut results = ResultMap::new();
        results.insert("b", 1.0);
        results.insert("a", 2.0);
        results.insert("b", 3.0);
        let keys: Vec<&str> = results.keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(results.number("b"), Some(3.0));
    }

    #[test]
    fn test_rounding_leaves_non_numbers() {
        let mut results = ResultMap::new();
        results.insert("name", "FEP 1");
        results.insert("detailing_ok", true);
        results.insert("V_g", ResultValue::NotApplicable);
        results.insert("V_a", 123.456);
        let rounded = results.rounded(2);
        assert_eq!(rounded.text("name"), Some("FEP 1"));
        assert_eq!(rounded.flag("detailing_ok"), Some(true));
        assert_eq!(rounded.get("V_g"), Some(&ResultValue::NotApplicable));
        assert_eq!(rounded.number("V_a"), Some(120.0));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut results = ResultMap::new();
        results.insert("z", 1.5);
        results.insert("a", ResultValue::NotApplicable);
        let json = serde_json::to_string(&results).unwrap();
        assert_eq!(json, r#"{"z":1.5,"a":null}"#);
    }

    #[test]
    fn test_extend_prefixed() {
        let mut inner = ResultMap::new();
        inner.insert("d_h", 22.0);
        let mut outer = ResultMap::new();
        outer.extend_prefixed("bolt", inner);
        assert_eq!(outer.number("bolt.d_h"), Some(22.0));
    }
}
