//! Connection plates and the ply checks shared with the member web.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{DesignError, DesignResult};
use crate::materials::{self, MaterialStandard};
use crate::params::{ApplyParams, ParamMap};
use crate::report::{Report, ResultMap};
use crate::units::{Kilonewtons, NewtonMillimetres};

/// Capacity factors, AS 4100 Table 3.4
const PHI_SHEAR: f64 = 0.9;
const PHI_BENDING: f64 = 0.9;
const PHI_BEARING: f64 = 0.9;
/// Block shear, AISC 360-16 J4.3
const PHI_BLOCK_SHEAR: f64 = 0.75;

/// Product the plate is cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlateKind {
    Plate,
    Section,
    Bar,
}

impl PlateKind {
    pub const ALL: [PlateKind; 3] = [PlateKind::Plate, PlateKind::Section, PlateKind::Bar];

    pub fn code(&self) -> &'static str {
        match self {
            PlateKind::Plate => "Plate",
            PlateKind::Section => "Section",
            PlateKind::Bar => "Bar",
        }
    }

    pub fn standard(&self) -> MaterialStandard {
        match self {
            PlateKind::Plate => MaterialStandard::HotRolledPlate,
            PlateKind::Section | PlateKind::Bar => MaterialStandard::HotRolledSection,
        }
    }
}

impl FromStr for PlateKind {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlateKind::ALL
            .iter()
            .copied()
            .find(|k| k.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DesignError::unknown_variant("plate kind", s))
    }
}

impl fmt::Display for PlateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Raw plate record; this is the compact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateInput {
    /// Plate width (mm)
    pub b_i: f64,
    /// Plate thickness (mm)
    pub t_i: f64,
    /// Product and grade, e.g. "Plate GR250"
    pub plate: String,
}

impl Default for PlateInput {
    fn default() -> Self {
        PlateInput {
            b_i: 200.0,
            t_i: 10.0,
            plate: "Plate GR250".to_string(),
        }
    }
}

impl ApplyParams for PlateInput {
    fn apply_params(&mut self, params: &ParamMap) -> DesignResult<()> {
        params.apply_number("b_i", &mut self.b_i)?;
        params.apply_number("t_i", &mut self.t_i)?;
        params.apply_text("plate", &mut self.plate)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    pub input: PlateInput,
    /// e.g. "200mm x 10mm Plate GR250"
    pub name: String,
    pub kind: PlateKind,
    pub grade: String,
    /// Yield stress at the plate thickness (MPa)
    pub f_yi: f64,
    /// Tensile strength (MPa)
    pub f_ui: f64,
}

impl Plate {
    pub fn new(input: PlateInput) -> DesignResult<Self> {
        let (kind, grade) = input
            .plate
            .trim()
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| DesignError::invalid_input("plate", input.plate.as_str(), "Expected \"<kind> <grade>\""))?;
        let kind: PlateKind = kind.parse()?;
        let grade = grade.to_string();

        let strength = materials::resolve(kind.standard(), &grade, Some(input.t_i))?;

        Ok(Plate {
            name: format!("{}mm x {}mm {}", input.b_i, input.t_i, input.plate.trim()),
            kind,
            grade,
            f_yi: strength.f_y,
            f_ui: strength.f_u,
            input,
        })
    }

    pub fn from_params(params: &ParamMap) -> DesignResult<Self> {
        Self::new(PlateInput::from_params(params)?)
    }

    pub fn b_i(&self) -> f64 {
        self.input.b_i
    }

    pub fn t_i(&self) -> f64 {
        self.input.t_i
    }

    // ========================================================================
    // Ply checks for any ply: the plate or the member web
    // ========================================================================

    /// Local bearing of `n_b` bolts of diameter `d_f` on a ply, AS 4100 Cl 9.3.2.4
    pub fn phi_v_bb(n_b: u32, d_f: f64, t_p: f64, f_u: f64) -> Kilonewtons {
        Kilonewtons(f64::from(n_b) * PHI_BEARING * 3.2 * d_f * t_p * f_u / 1e3)
    }

    /// Tear-out of `n_b` bolts with tear-out length `a_e`, AS 4100 Cl 9.3.2.4
    pub fn phi_v_bt(n_b: u32, a_e: f64, t_p: f64, f_u: f64) -> Kilonewtons {
        Kilonewtons(f64::from(n_b) * PHI_BEARING * a_e * t_p * f_u / 1e3)
    }

    // ========================================================================
    // Plate checks
    // ========================================================================

    /// Shear over a plate depth `d_i`
    pub fn phi_v_v(&self, d_i: f64) -> Kilonewtons {
        Kilonewtons(PHI_SHEAR * 0.5 * self.f_yi * d_i * self.t_i() / 1e3)
    }

    /// Moment capacity over a plate depth `d_i`
    pub fn phi_m_si(&self, d_i: f64) -> NewtonMillimetres {
        NewtonMillimetres(PHI_BENDING * self.f_yi * self.t_i() * d_i.powi(2) / 4.0)
    }

    /// Shear that the plate moment capacity admits at eccentricity `e`
    pub fn phi_m_si_ecc(&self, d_i: f64, e: f64) -> Kilonewtons {
        Kilonewtons(self.phi_m_si(d_i).0 / e / 1e3)
    }

    /// Block shear with tension path `l_t` and shear path `l_v`
    pub fn phi_v_bs(&self, l_t: f64, l_v: f64) -> Kilonewtons {
        let a_nt = l_t * self.t_i();
        let a_gv = l_v * self.t_i();
        Kilonewtons(PHI_BLOCK_SHEAR * (a_nt * self.f_ui + 0.6 * a_gv * self.f_yi) / 1e3)
    }

    pub fn to_compact(&self) -> DesignResult<String> {
        serde_json::to_string(&self.input).map_err(|e| DesignError::serialization(e.to_string()))
    }

    pub fn from_compact(compact: &str) -> DesignResult<Self> {
        let input: PlateInput = serde_json::from_str(compact)
            .map_err(|e| DesignError::invalid_input("plate", compact, e.to_string()))?;
        Self::new(input)
    }
}

impl Report for Plate {
    fn results(&self) -> ResultMap {
        let mut r = ResultMap::new();
        r.insert("name", self.name.as_str());
        r.insert("b_i", self.input.b_i);
        r.insert("t_i", self.input.t_i);
        r.insert("plate_type", self.kind.code());
        r.insert("plate_grade", self.grade.as_str());
        r.insert("f_yi", self.f_yi);
        r.insert("f_ui", self.f_ui);
        r
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_plate() {
        let plate = Plate::new(PlateInput::default()).unwrap();
        assert_eq!(plate.name, "200mm x 10mm Plate GR250");
        assert_eq!(plate.kind, PlateKind::Plate);
        assert_eq!(plate.grade, "GR250");
        assert_eq!(plate.f_yi, 260.0);
        assert_eq!(plate.f_ui, 410.0);
    }

    #[test]
    fn test_section_and_bar_use_hot_rolled_sections() {
        let plate = Plate::new(PlateInput {
            plate: "Bar GR300".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(plate.kind.standard(), MaterialStandard::HotRolledSection);
        assert_eq!(plate.f_yi, 320.0);
    }

    #[test]
    fn test_malformed_plate_string() {
        let err = Plate::new(PlateInput {
            plate: "GR250".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = Plate::new(PlateInput {
            plate: "Sheet GR250".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err, DesignError::unknown_variant("plate kind", "Sheet"));
    }

    #[test]
    fn test_plate_capacities() {
        let plate = Plate::new(PlateInput::default()).unwrap();
        // 0.9 x 0.5 x 260 x 300 x 10 = 351 kN
        assert!((plate.phi_v_v(300.0).0 - 351.0).abs() < 1e-9);
        // 0.9 x 260 x 10 x 300² / 4 = 52.65 kNm
        assert!((plate.phi_m_si(300.0).0 - 52.65e6).abs() < 1e-3);
        assert!((plate.phi_m_si_ecc(300.0, 90.0).0 - 52.65e6 / 90.0 / 1e3).abs() < 1e-6);
        let expected = 0.75 * (70.0 * 10.0 * 410.0 + 0.6 * 455.0 * 10.0 * 260.0) / 1e3;
        assert!((plate.phi_v_bs(70.0, 455.0).0 - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_non_decreasing_in_thickness() {
        let mut last = 0.0;
        for t_p in [6.0, 8.0, 10.0, 12.0, 16.0] {
            let v = Plate::phi_v_bb(4, 20.0, t_p, 410.0).0.min(Plate::phi_v_bt(4, 34.0, t_p, 410.0).0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_compact_round_trip() {
        let plate = Plate::new(PlateInput {
            b_i: 150.0,
            t_i: 12.0,
            plate: "Plate GR350".to_string(),
        })
        .unwrap();
        let compact = plate.to_compact().unwrap();
        assert_eq!(Plate::from_compact(&compact).unwrap(), plate);
        assert!(Plate::from_compact("{not json").is_err());
    }
}
