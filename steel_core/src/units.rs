//! # Unit Types
//!
//! Type-safe wrappers for the capacity boundary. Internally every calculation
//! runs in mm / N / MPa; capacities leave an entity as kN or kNm.
//!
//! ## SI Units
//!
//! - Force: newtons (N), kilonewtons (kN = 1000 N)
//! - Moment: newton-millimetres (Nmm), kilonewton-metres (kNm = 1e6 Nmm)
//!
//! ## Example
//!
//! ```rust
//! use steel_core::units::{Kilonewtons, Newtons, KilonewtonMetres, NewtonMillimetres};
//!
//! let n_t: Kilonewtons = Newtons(3_192_000.0).into();
//! assert_eq!(n_t.0, 3192.0);
//!
//! let m_s: KilonewtonMetres = NewtonMillimetres(515e6).into();
//! assert_eq!(m_s.0, 515.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Force Units
// ============================================================================

/// Force in newtons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Newtons(pub f64);

/// Force in kilonewtons (1 kN = 1000 N)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilonewtons(pub f64);

impl From<Newtons> for Kilonewtons {
    fn from(n: Newtons) -> Self {
        Kilonewtons(n.0 / 1000.0)
    }
}

impl From<Kilonewtons> for Newtons {
    fn from(kn: Kilonewtons) -> Self {
        Newtons(kn.0 * 1000.0)
    }
}

// ============================================================================
// Moment Units
// ============================================================================

/// Moment in newton-millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NewtonMillimetres(pub f64);

/// Moment in kilonewton-metres (1 kNm = 1e6 Nmm)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KilonewtonMetres(pub f64);

impl From<NewtonMillimetres> for KilonewtonMetres {
    fn from(nmm: NewtonMillimetres) -> Self {
        KilonewtonMetres(nmm.0 / 1e6)
    }
}

impl From<KilonewtonMetres> for NewtonMillimetres {
    fn from(knm: KilonewtonMetres) -> Self {
        NewtonMillimetres(knm.0 * 1e6)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }

            /// The smaller of two values
            pub fn min(self, other: Self) -> Self {
                Self(self.0.min(other.0))
            }
        }
    };
}

impl_arithmetic!(Newtons);
impl_arithmetic!(Kilonewtons);
impl_arithmetic!(NewtonMillimetres);
impl_arithmetic!(KilonewtonMetres);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newtons_to_kilonewtons() {
        let n = Newtons(2500.0);
        let kn: Kilonewtons = n.into();
        assert_eq!(kn.0, 2.5);
    }

    #[test]
    fn test_moment_conversion() {
        let knm = KilonewtonMetres(1.5);
        let nmm: NewtonMillimetres = knm.into();
        assert_eq!(nmm.0, 1.5e6);
    }

    #[test]
    fn test_arithmetic() {
        let a = Kilonewtons(10.0);
        let b = Kilonewtons(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 0.9).0, 9.0);
        assert_eq!((a / 2.0).0, 5.0);
        assert_eq!(a.min(b), b);
    }

    #[test]
    fn test_serialization() {
        let kn = Kilonewtons(1050.0);
        let json = serde_json::to_string(&kn).unwrap();
        assert_eq!(json, "1050.0");

        let roundtrip: Kilonewtons = serde_json::from_str(&json).unwrap();
        assert_eq!(kn, roundtrip);
    }
}
