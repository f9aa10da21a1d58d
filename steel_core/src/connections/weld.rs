//! Fillet welds, AS 4100 Cl 9.7.3.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{DesignError, DesignResult};
use crate::params::{ApplyParams, ParamMap};
use crate::report::{Report, ResultMap};
use crate::units::Kilonewtons;

/// Reduction factor for welded lap connections, AS 4100 Table 9.7.3.10(2)
const K_R: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeldType {
    /// Continuous fillet weld
    #[default]
    CFW,
}

impl WeldType {
    pub const ALL: [WeldType; 1] = [WeldType::CFW];

    pub fn code(&self) -> &'static str {
        match self {
            WeldType::CFW => "CFW",
        }
    }
}

/// Weld category, AS 4100 Cl 9.7.3.10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeldCategory {
    /// Structural purpose
    #[default]
    SP,
    /// General purpose
    GP,
}

impl WeldCategory {
    pub const ALL: [WeldCategory; 2] = [WeldCategory::SP, WeldCategory::GP];

    pub fn code(&self) -> &'static str {
        match self {
            WeldCategory::SP => "SP",
            WeldCategory::GP => "GP",
        }
    }

    /// Capacity factor, AS 4100 Table 3.4
    pub fn phi(&self) -> f64 {
        match self {
            WeldCategory::SP => 0.8,
            WeldCategory::GP => 0.6,
        }
    }
}

/// Weld consumable classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeldClass {
    E41XX,
    W40X,
    #[default]
    E48XX,
    W50X,
}

impl WeldClass {
    pub const ALL: [WeldClass; 4] = [WeldClass::E41XX, WeldClass::W40X, WeldClass::E48XX, WeldClass::W50X];

    pub fn code(&self) -> &'static str {
        match self {
            WeldClass::E41XX => "E41XX",
            WeldClass::W40X => "W40X",
            WeldClass::E48XX => "E48XX",
            WeldClass::W50X => "W50X",
        }
    }

    /// Nominal tensile strength of the weld metal f_uw (MPa), AS 4100 Table 9.7.3.10(1)
    pub fn f_uw(&self) -> f64 {
        match self {
            WeldClass::E41XX | WeldClass::W40X => 410.0,
            WeldClass::E48XX | WeldClass::W50X => 480.0,
        }
    }
}

macro_rules! impl_weld_code {
    ($type:ty, $kind:literal) => {
        impl FromStr for $type {
            type Err = DesignError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$type>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.code().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| DesignError::unknown_variant($kind, s))
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.code())
            }
        }
    };
}

impl_weld_code!(WeldType, "weld type");
impl_weld_code!(WeldCategory, "weld category");
impl_weld_code!(WeldClass, "weld class");

/// Raw weld record; this is the compact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldInput {
    /// Fillet leg size (mm)
    pub t_w: f64,
    pub weld_type: WeldType,
    pub weld_cat: WeldCategory,
    pub weld_class: WeldClass,
}

impl Default for WeldInput {
    fn default() -> Self {
        WeldInput {
            t_w: 6.0,
            weld_type: WeldType::CFW,
            weld_cat: WeldCategory::SP,
            weld_class: WeldClass::E48XX,
        }
    }
}

impl ApplyParams for WeldInput {
    fn apply_params(&mut self, params: &ParamMap) -> DesignResult<()> {
        params.apply_number("t_w", &mut self.t_w)?;
        params.apply_parsed("weld_type", &mut self.weld_type)?;
        params.apply_parsed("weld_cat", &mut self.weld_cat)?;
        params.apply_parsed("weld_class", &mut self.weld_class)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weld {
    pub input: WeldInput,
    /// e.g. "6mm CFW SP E48XX"
    pub name: String,
    /// Design throat thickness
    pub t_t: f64,
    pub f_uw: f64,
    pub phi: f64,
    /// Nominal capacity per unit length (kN/mm)
    pub v_w: f64,
    /// Design capacity per unit length (kN/mm)
    pub phi_v_w: f64,
}

impl Weld {
    pub fn new(input: WeldInput) -> DesignResult<Self> {
        if input.t_w <= 0.0 {
            return Err(DesignError::invalid_input("t_w", input.t_w.to_string(), "Weld leg must be positive"));
        }
        let t_t = input.t_w / 2.0_f64.sqrt();
        let f_uw = input.weld_class.f_uw();
        let phi = input.weld_cat.phi();
        let v_w = 0.6 * f_uw * K_R * t_t / 1e3;

        Ok(Weld {
            name: format!("{}mm {} {} {}", input.t_w, input.weld_type, input.weld_cat, input.weld_class),
            t_t,
            f_uw,
            phi,
            v_w,
            phi_v_w: phi * v_w,
            input,
        })
    }

    pub fn from_params(params: &ParamMap) -> DesignResult<Self> {
        Self::new(WeldInput::from_params(params)?)
    }

    pub fn t_w(&self) -> f64 {
        self.input.t_w
    }

    /// Two fillet runs of depth `d_i` in direct shear
    pub fn v_a(&self, d_i: f64) -> Kilonewtons {
        Kilonewtons(self.phi_v_w * 2.0 * d_i)
    }

    /// Two fillet runs of depth `d_i` at eccentricity `e`. No weld length
    /// carries nothing.
    pub fn v_a_ecc(&self, d_i: f64, e: f64) -> Kilonewtons {
        if d_i <= 0.0 {
            return Kilonewtons(0.0);
        }
        Kilonewtons(self.phi_v_w * 2.0 * d_i / (1.0 + (6.0 * e / d_i).powi(2)).sqrt())
    }

    pub fn to_compact(&self) -> DesignResult<String> {
        serde_json::to_string(&self.input).map_err(|e| DesignError::serialization(e.to_string()))
    }

    pub fn from_compact(compact: &str) -> DesignResult<Self> {
        let input: WeldInput = serde_json::from_str(compact)
            .map_err(|e| DesignError::invalid_input("weld", compact, e.to_string()))?;
        Self::new(input)
    }
}

impl Report for Weld {
    fn results(&self) -> ResultMap {
        let mut r = ResultMap::new();
        r.insert("name", self.name.as_str());
        r.insert("t_w", self.input.t_w);
        r.insert("weld_type", self.input.weld_type.code());
        r.insert("weld_cat", self.input.weld_cat.code());
        r.insert("weld_class", self.input.weld_class.code());
        r.insert("t_t", self.t_t);
        r.insert("f_uw", self.f_uw);
        r.insert("phi", self.phi);
        r.insert("v_w", self.v_w);
        r.insert("phiv_w", self.phi_v_w);
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_6mm_sp_e48() {
        let weld = Weld::new(WeldInput::default()).unwrap();
        assert_eq!(weld.name, "6mm CFW SP E48XX");
        // ASI Handbook 1 Table 22: 0.978 kN/mm
        assert!((weld.phi_v_w - 0.978).abs() < 0.001);
        assert!((weld.v_a(200.0).0 - 2.0 * 200.0 * weld.phi_v_w).abs() < 1e-9);
    }

    #[test]
    fn test_eccentricity_reduces_capacity() {
        let weld = Weld::new(WeldInput::default()).unwrap();
        assert_eq!(weld.v_a_ecc(250.0, 0.0), weld.v_a(250.0));
        assert!(weld.v_a_ecc(250.0, 90.0).0 < weld.v_a(250.0).0);
        assert_eq!(weld.v_a_ecc(0.0, 0.0), Kilonewtons(0.0));
        assert_eq!(weld.v_a_ecc(0.0, 90.0), Kilonewtons(0.0));
    }

    #[test]
    fn test_general_purpose_category() {
        let weld = Weld::new(WeldInput {
            weld_cat: WeldCategory::GP,
            weld_class: WeldClass::E41XX,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(weld.phi, 0.6);
        assert_eq!(weld.f_uw, 410.0);
    }

    #[test]
    fn test_unknown_codes() {
        let err = Weld::from_params(&ParamMap::new().with("weld_class", "E70XX")).unwrap_err();
        assert_eq!(err, DesignError::unknown_variant("weld class", "E70XX"));
        assert!("BW".parse::<WeldType>().is_err());
    }

    #[test]
    fn test_compact_round_trip() {
        let weld = Weld::new(WeldInput {
            t_w: 8.0,
            ..Default::default()
        })
        .unwrap();
        let compact = weld.to_compact().unwrap();
        assert_eq!(compact, r#"{"t_w":8.0,"weld_type":"CFW","weld_cat":"SP","weld_class":"E48XX"}"#);
        assert_eq!(Weld::from_compact(&compact).unwrap(), weld);
    }
}
