//! # Steel Materials
//!
//! Product standards, grades and strength lookups per AS 4100 Section 2.
//!
//! ## Product Standards
//!
//! | `mat_type`         | Standard  | Residual stress |
//! |--------------------|-----------|-----------------|
//! | `HollowSection`    | AS1163    | CF              |
//! | `HotRolledPlate`   | AS3678    | HR              |
//! | `HotRolledSection` | AS3679.1  | HR              |
//! | `PressurePlate`    | AS3597    | HR              |
//! | `WeldedSection`    | AS3678    | HW              |
//!
//! ## Example
//!
//! ```rust
//! use steel_core::materials::{MaterialInput, MaterialStandard, SteelMaterial};
//!
//! let mat = SteelMaterial::new(MaterialInput::open(MaterialStandard::HotRolledSection, "GR300", 17.3, 10.5)).unwrap();
//! assert_eq!(mat.f_y, 280.0);
//! assert_eq!(mat.f_yw, 320.0);
//! assert_eq!(mat.f_u, 440.0);
//! ```

pub mod steel;
pub mod strength;

pub use steel::{MaterialInput, SteelMaterial};
pub use strength::{resolve, tensile_strength, yield_stress, StrengthPair};

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::DesignError;

/// Steel product standard, keyed by the `mat_type` parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MaterialStandard {
    /// Cold-formed hollow sections (AS1163)
    HollowSection,
    /// Hot-rolled plate and floorplate (AS3678)
    HotRolledPlate,
    /// Hot-rolled sections and bars (AS3679.1)
    #[default]
    HotRolledSection,
    /// Pressure vessel plate (AS3597)
    PressurePlate,
    /// Welded sections built from AS3678 plate
    WeldedSection,
}

impl MaterialStandard {
    pub const ALL: [MaterialStandard; 5] = [
        MaterialStandard::HollowSection,
        MaterialStandard::HotRolledPlate,
        MaterialStandard::HotRolledSection,
        MaterialStandard::PressurePlate,
        MaterialStandard::WeldedSection,
    ];

    /// The `mat_type` key
    pub fn code(&self) -> &'static str {
        match self {
            MaterialStandard::HollowSection => "HollowSection",
            MaterialStandard::HotRolledPlate => "HotRolledPlate",
            MaterialStandard::HotRolledSection => "HotRolledSection",
            MaterialStandard::PressurePlate => "PressurePlate",
            MaterialStandard::WeldedSection => "WeldedSection",
        }
    }

    /// Australian Standard the strengths come from
    pub fn standard_code(&self) -> &'static str {
        match self {
            MaterialStandard::HollowSection => "AS1163",
            MaterialStandard::HotRolledPlate | MaterialStandard::WeldedSection => "AS3678",
            MaterialStandard::HotRolledSection => "AS3679.1",
            MaterialStandard::PressurePlate => "AS3597",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialStandard::HollowSection => "Hollow section (AS1163)",
            MaterialStandard::HotRolledPlate => "Hot-rolled plate (AS3678)",
            MaterialStandard::HotRolledSection => "Hot-rolled section (AS3679.1)",
            MaterialStandard::PressurePlate => "Pressure vessel plate (AS3597)",
            MaterialStandard::WeldedSection => "Welded section (AS3678)",
        }
    }

    pub fn residual_stress(&self) -> ResidualStress {
        match self {
            MaterialStandard::HollowSection => ResidualStress::CF,
            MaterialStandard::HotRolledPlate | MaterialStandard::HotRolledSection | MaterialStandard::PressurePlate => {
                ResidualStress::HR
            }
            MaterialStandard::WeldedSection => ResidualStress::HW,
        }
    }
}

impl FromStr for MaterialStandard {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MaterialStandard::ALL
            .iter()
            .copied()
            .find(|m| m.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| DesignError::unknown_variant("material standard", s))
    }
}

impl std::fmt::Display for MaterialStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Residual stress class of a plate element (AS 4100 Table 5.2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidualStress {
    /// Stress relieved
    SR,
    /// Hot-rolled
    HR,
    /// Lightly welded
    LW,
    /// Cold-formed
    CF,
    /// Heavily welded
    HW,
}

impl ResidualStress {
    pub const ALL: [ResidualStress; 5] = [
        ResidualStress::SR,
        ResidualStress::HR,
        ResidualStress::LW,
        ResidualStress::CF,
        ResidualStress::HW,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            ResidualStress::SR => "SR",
            ResidualStress::HR => "HR",
            ResidualStress::LW => "LW",
            ResidualStress::CF => "CF",
            ResidualStress::HW => "HW",
        }
    }
}

impl std::fmt::Display for ResidualStress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
