//! Resolved steel material for one section or plate.
//!
//! A section resolves its strengths twice: `f_y` at the flange (or wall)
//! thickness and `f_yw` at the web thickness. Without a web thickness the web
//! takes `f_y`.

use serde::{Deserialize, Serialize};

use super::{strength, MaterialStandard, ResidualStress};
use crate::errors::DesignResult;
use crate::params::{ApplyParams, ParamMap};
use crate::report::{Report, ResultMap};

/// Raw material record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialInput {
    pub mat_type: MaterialStandard,
    pub grade: String,
    /// Plate or wall thickness (mm)
    pub t: Option<f64>,
    /// Flange thickness (mm)
    pub t_f: Option<f64>,
    /// Web thickness (mm)
    pub t_w: Option<f64>,
}

impl Default for MaterialInput {
    fn default() -> Self {
        MaterialInput {
            mat_type: MaterialStandard::HotRolledSection,
            grade: "GR300".to_string(),
            t: None,
            t_f: None,
            t_w: None,
        }
    }
}

impl MaterialInput {
    /// Plate, hollow section or any single-thickness product
    pub fn plate(mat_type: MaterialStandard, grade: impl Into<String>, t: f64) -> Self {
        MaterialInput {
            mat_type,
            grade: grade.into(),
            t: Some(t),
            ..Default::default()
        }
    }

    /// Open section with separate flange and web thicknesses
    pub fn open(mat_type: MaterialStandard, grade: impl Into<String>, t_f: f64, t_w: f64) -> Self {
        MaterialInput {
            mat_type,
            grade: grade.into(),
            t_f: Some(t_f),
            t_w: Some(t_w),
            ..Default::default()
        }
    }

    pub fn has_thickness(&self) -> bool {
        self.t.is_some() || self.t_f.is_some() || self.t_w.is_some()
    }
}

impl ApplyParams for MaterialInput {
    fn apply_params(&mut self, params: &ParamMap) -> DesignResult<()> {
        params.apply_parsed("mat_type", &mut self.mat_type)?;
        params.apply_text("grade", &mut self.grade)?;
        params.apply_optional("t", &mut self.t)?;
        params.apply_optional("t_f", &mut self.t_f)?;
        params.apply_optional("t_w", &mut self.t_w)?;
        Ok(())
    }
}

/// Steel material with strengths resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelMaterial {
    pub input: MaterialInput,
    /// Yield stress at the flange or plate thickness (MPa)
    pub f_y: f64,
    /// Yield stress at the web thickness (MPa)
    pub f_yw: f64,
    /// Tensile strength (MPa)
    pub f_u: f64,
    pub residual_stress: ResidualStress,
}

impl SteelMaterial {
    /// Young's modulus (MPa), AS 4100 Cl 2.2.4
    pub const E: f64 = 200_000.0;
    /// Shear modulus (MPa)
    pub const G: f64 = 80_000.0;
    /// Poisson's ratio
    pub const NU: f64 = 0.25;
    /// Density (kg/m³)
    pub const DENSITY: f64 = 7850.0;
    /// Coefficient of thermal expansion (/°C)
    pub const ALPHA_T: f64 = 11.7e-6;

    pub fn new(input: MaterialInput) -> DesignResult<Self> {
        let standard = input.mat_type;
        let grade = input.grade.trim().to_string();

        let t_flange = input.t_f.or(input.t);
        let f_y = strength::yield_stress(standard, &grade, t_flange)?;
        let f_yw = match input.t_w {
            Some(t_w) => strength::yield_stress(standard, &grade, Some(t_w))?,
            None => f_y,
        };
        let f_u = strength::tensile_strength(standard, &grade, t_flange.or(input.t_w))?;

        tracing::debug!(grade = %grade, standard = standard.standard_code(), f_y, f_yw, f_u, "material resolved");

        Ok(SteelMaterial {
            input,
            f_y,
            f_yw,
            f_u,
            residual_stress: standard.residual_stress(),
        })
    }

    pub fn from_params(params: &ParamMap) -> DesignResult<Self> {
        Self::new(MaterialInput::from_params(params)?)
    }

    pub fn grade(&self) -> &str {
        self.input.grade.trim()
    }

    pub fn standard(&self) -> MaterialStandard {
        self.input.mat_type
    }
}

impl Report for SteelMaterial {
    fn results(&self) -> ResultMap {
        let mut r = ResultMap::new();
        r.insert("grade", self.grade());
        r.insert("mat_type", self.standard().code());
        r.insert("f_y", self.f_y);
        r.insert("f_yw", self.f_yw);
        r.insert("f_u", self.f_u);
        r.insert("res_stress", self.residual_stress.code());
        r.insert("E", Self::E);
        r.insert("G", Self::G);
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
    fn test_open_section_resolves_flange_and_web() {
        let mat = SteelMaterial::new(MaterialInput::open(MaterialStandard::HotRolledSection, "GR300", 16.0, 9.9)).unwrap();
        assert_eq!(mat.f_y, 300.0);
        assert_eq!(mat.f_yw, 320.0);
        assert_eq!(mat.f_u, 440.0);
        assert_eq!(mat.residual_stress, ResidualStress::HR);
    }

    #[test]
    fn test_web_falls_back_to_flange_strength() {
        let mat = SteelMaterial::new(MaterialInput::plate(MaterialStandard::HollowSection, "C450", 5.0)).unwrap();
        assert_eq!(mat.f_y, 450.0);
        assert_eq!(mat.f_yw, 450.0);
        assert_eq!(mat.residual_stress, ResidualStress::CF);
    }

    #[test]
    fn test_flange_thickness_wins_over_plate_thickness() {
        let input = MaterialInput {
            t: Some(5.0),
            t_f: Some(25.0),
            ..MaterialInput::plate(MaterialStandard::HotRolledPlate, "GR250", 5.0)
        };
        assert_eq!(SteelMaterial::new(input).unwrap().f_y, 250.0);
    }

    #[test]
    fn test_from_params() {
        let params = ParamMap::new()
            .with("mat_type", "WeldedSection")
            .with("grade", "GR300")
            .with("t_f", 36.0)
            .with("t_w", 16.0)
            .with("section", "1200WB423");
        let mat = SteelMaterial::from_params(&params).unwrap();
        assert_eq!(mat.f_y, 280.0);
        assert_eq!(mat.f_yw, 300.0);
        assert_eq!(mat.residual_stress, ResidualStress::HW);
    }

    #[test]
    fn test_missing_thickness_is_an_error() {
        let params = ParamMap::new().with("mat_type", "HotRolledPlate").with("grade", "GR250");
        let err = SteelMaterial::from_params(&params).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_REQUIRED_INPUT");
    }
}
