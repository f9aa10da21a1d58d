//! Structural bolts and two-column bolt groups, AS 4100 Section 9.
//!
//! The group layout follows the ASI handbook: `n_p` rows at pitch `s_p`
//! parallel to the shear, `n_g` columns at gauge `s_g`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use super::compact_param;
use crate::errors::{DesignError, DesignResult};
use crate::params::{ApplyParams, ParamMap};
use crate::report::{Report, ResultMap};
use crate::units::Kilonewtons;

/// Capacity factor for bolts in shear and tension, AS 4100 Table 3.4
const PHI_BOLT: f64 = 0.8;

/// Reduction factor for lap connections, AS 4100 Cl 9.3.2.1
const K_R: f64 = 1.0;

// ============================================================================
// Bolt category
// ============================================================================

/// Bolt property class and installation category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BoltCategory {
    /// 4.6/S, commercial bolt snug tight
    #[serde(rename = "4.6/S")]
    Class46Snug,
    /// 8.8/S, high strength bolt snug tight
    #[default]
    #[serde(rename = "8.8/S")]
    Class88Snug,
    /// 8.8/TB, fully tensioned bearing
    #[serde(rename = "8.8/TB")]
    Class88TensionedBearing,
    /// 8.8/TF, fully tensioned friction
    #[serde(rename = "8.8/TF")]
    Class88TensionedFriction,
}

impl BoltCategory {
    pub const ALL: [BoltCategory; 4] = [
        BoltCategory::Class46Snug,
        BoltCategory::Class88Snug,
        BoltCategory::Class88TensionedBearing,
        BoltCategory::Class88TensionedFriction,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            BoltCategory::Class46Snug => "4.6/S",
            BoltCategory::Class88Snug => "8.8/S",
            BoltCategory::Class88TensionedBearing => "8.8/TB",
            BoltCategory::Class88TensionedFriction => "8.8/TF",
        }
    }

    /// Minimum tensile strength of the bolt f_uf (MPa)
    pub fn f_uf(&self) -> f64 {
        match self {
            BoltCategory::Class46Snug => 400.0,
            _ => 830.0,
        }
    }
}

impl FromStr for BoltCategory {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BoltCategory::ALL
            .iter()
            .copied()
            .find(|c| c.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DesignError::unknown_variant("bolt category", s))
    }
}

impl fmt::Display for BoltCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Thread pitch P for an ISO metric coarse bolt (mm), AS 1275 Table 3.2
pub fn thread_pitch(d_f: f64) -> DesignResult<f64> {
    const PITCHES: [(f64, f64); 6] = [(12.0, 1.75), (16.0, 2.0), (20.0, 2.5), (24.0, 3.0), (30.0, 3.5), (36.0, 4.0)];
    PITCHES
        .iter()
        .find(|(d, _)| *d == d_f)
        .map(|(_, p)| *p)
        .ok_or_else(|| DesignError::unknown_variant("bolt diameter", d_f.to_string()))
}

// ============================================================================
// Bolt
// ============================================================================

/// Raw bolt record; this is the compact form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltInput {
    /// Nominal diameter (mm)
    pub d_f: f64,
    pub bolt_cat: BoltCategory,
    /// Threads intercept the shear plane
    pub threads_included: bool,
}

impl Default for BoltInput {
    fn default() -> Self {
        BoltInput {
            d_f: 20.0,
            bolt_cat: BoltCategory::Class88Snug,
            threads_included: true,
        }
    }
}

impl ApplyParams for BoltInput {
    fn apply_params(&mut self, params: &ParamMap) -> DesignResult<()> {
        params.apply_number("d_f", &mut self.d_f)?;
        params.apply_parsed("bolt_cat", &mut self.bolt_cat)?;
        params.apply_flag("threads_included", &mut self.threads_included)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bolt {
    pub input: BoltInput,
    /// e.g. "M20 8.8/S (TI)"
    pub name: String,
    /// Hole diameter, AS 4100 Cl 14.3.5.2
    pub d_h: f64,
    /// Minimum edge distance, AS 4100 Table 9.6.2
    pub a_e_min: f64,
    /// Minimum pitch, AS 4100 Cl 9.6.1
    pub s_p_min: f64,
    /// Thread pitch
    pub p: f64,
    /// Core area
    pub a_c: f64,
    /// Tensile stress area
    pub a_s: f64,
    /// Plain shank area
    pub a_o: f64,
    pub f_uf: f64,
    pub n_tf: Kilonewtons,
    /// Shear capacity, threads included
    pub v_fn: Kilonewtons,
    /// Shear capacity, threads excluded
    pub v_fx: Kilonewtons,
    pub phi_v_f: Kilonewtons,
    pub phi_n_tf: Kilonewtons,
}

impl Bolt {
    pub fn new(input: BoltInput) -> DesignResult<Self> {
        let d_f = input.d_f;
        if d_f <= 0.0 {
            return Err(DesignError::invalid_input("d_f", d_f.to_string(), "Bolt diameter must be positive"));
        }
        let p = thread_pitch(d_f)?;
        let f_uf = input.bolt_cat.f_uf();

        let a_c = PI / 4.0 * (d_f - 1.22687 * p).powi(2);
        let a_s = PI / 4.0 * (d_f - 0.9382 * p).powi(2);
        let a_o = PI / 4.0 * d_f.powi(2);

        let n_tf = Kilonewtons(a_s * f_uf / 1e3);
        let v_fn = Kilonewtons(0.62 * f_uf * K_R * a_c / 1e3);
        let v_fx = Kilonewtons(0.62 * f_uf * K_R * a_o / 1e3);
        let v_f = if input.threads_included { v_fn } else { v_fx };

        let threads = if input.threads_included { "(TI)" } else { "(TX)" };
        let name = format!("M{} {} {}", d_f, input.bolt_cat, threads);

        Ok(Bolt {
            name,
            d_h: d_f + if d_f <= 24.0 { 2.0 } else { 3.0 },
            a_e_min: 1.5 * d_f,
            s_p_min: 2.5 * d_f,
            p,
            a_c,
            a_s,
            a_o,
            f_uf,
            n_tf,
            v_fn,
            v_fx,
            phi_v_f: v_f * PHI_BOLT,
            phi_n_tf: n_tf * PHI_BOLT,
            input,
        })
    }

    pub fn from_params(params: &ParamMap) -> DesignResult<Self> {
        Self::new(BoltInput::from_params(params)?)
    }

    pub fn d_f(&self) -> f64 {
        self.input.d_f
    }

    pub fn to_compact(&self) -> DesignResult<String> {
        serde_json::to_string(&self.input).map_err(|e| DesignError::serialization(e.to_string()))
    }

    pub fn from_compact(compact: &str) -> DesignResult<Self> {
        let input: BoltInput = serde_json::from_str(compact)
            .map_err(|e| DesignError::invalid_input("bolt", compact, e.to_string()))?;
        Self::new(input)
    }
}

impl Report for Bolt {
    fn results(&self) -> ResultMap {
        let mut r = ResultMap::new();
        r.insert("name", self.name.as_str());
        r.insert("d_f", self.input.d_f);
        r.insert("bolt_cat", self.input.bolt_cat.code());
        r.insert("threads_included", self.input.threads_included);
        r.insert("d_h", self.d_h);
        r.insert("a_e_min", self.a_e_min);
        r.insert("s_p_min", self.s_p_min);
        r.insert("A_c", self.a_c);
        r.insert("A_s", self.a_s);
        r.insert("A_o", self.a_o);
        r.insert("f_uf", self.f_uf);
        r.insert("phiV_f", self.phi_v_f.0);
        r.insert("phiN_tf", self.phi_n_tf.0);
        r
    }
}

// ============================================================================
// Bolt group
// ============================================================================

/// Raw bolt group record; this is the compact form and nests the bolt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltGroupInput {
    /// Rows parallel to the shear force
    pub n_p: u32,
    /// Columns
    pub n_g: u32,
    pub bolt: BoltInput,
    /// Pitch (mm)
    pub s_p: f64,
    /// Gauge (mm)
    pub s_g: f64,
}

impl Default for BoltGroupInput {
    fn default() -> Self {
        BoltGroupInput {
            n_p: 7,
            n_g: 2,
            bolt: BoltInput::default(),
            s_p: 70.0,
            s_g: 70.0,
        }
    }
}

impl ApplyParams for BoltGroupInput {
    fn apply_params(&mut self, params: &ParamMap) -> DesignResult<()> {
        params.apply_count("n_p", &mut self.n_p)?;
        params.apply_count("n_g", &mut self.n_g)?;
        params.apply_number("s_p", &mut self.s_p)?;
        params.apply_number("s_g", &mut self.s_g)?;
        if let Some(bolt) = compact_param(params, "bolt", |s| {
            serde_json::from_str::<BoltInput>(s).map_err(|e| DesignError::invalid_input("bolt", s, e.to_string()))
        })? {
            self.bolt = bolt;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltGroup {
    pub input: BoltGroupInput,
    pub bolt: Bolt,
    /// e.g. "7 x 2 (70p x 70g) M20 8.8/S (TI)"
    pub name: String,
    /// Number of bolts
    pub n_b: u32,
    /// Centre-to-centre depth of the outer rows
    pub d_hp: f64,
    /// Centre-to-centre width of the outer columns
    pub d_hg: f64,
    /// Minimum plate depth from edge distances
    pub d_i_min: f64,
    /// Horizontal tear-out length, bolt centre to adjacent hole edge
    pub a_ex_bc: f64,
    /// Vertical tear-out length, bolt centre to adjacent hole edge
    pub a_ey_bc: f64,
    /// Polar second moment of the group (mm²)
    pub i_bp: f64,
    pub phi_v_df: Kilonewtons,
}

/// Spacings must be positive, and clear a hole wherever there is a
/// neighbouring bolt
fn check_spacing(field: &str, spacing: f64, count: u32, d_h: f64) -> DesignResult<()> {
    if spacing.is_nan() || spacing <= 0.0 {
        return Err(DesignError::invalid_input(field, spacing.to_string(), "Bolt spacing must be positive"));
    }
    if count > 1 && spacing < d_h {
        return Err(DesignError::invalid_input(
            field,
            spacing.to_string(),
            format!("Bolt spacing is less than the {} mm hole", d_h),
        ));
    }
    Ok(())
}

/// Bolt centre to the edge of the adjacent hole; unbounded for a single line
fn tear_out_to_next_hole(spacing: f64, count: u32, d_h: f64) -> f64 {
    if count > 1 {
        spacing - d_h / 2.0 - 1.0
    } else {
        f64::INFINITY
    }
}

impl BoltGroup {
    pub fn new(input: BoltGroupInput) -> DesignResult<Self> {
        if input.n_p == 0 || input.n_g == 0 {
            return Err(DesignError::invalid_input(
                "n_p",
                format!("{} x {}", input.n_p, input.n_g),
                "A bolt group needs at least one row and one column",
            ));
        }
        let bolt = Bolt::new(input.bolt.clone())?;
        check_spacing("s_p", input.s_p, input.n_p, bolt.d_h)?;
        check_spacing("s_g", input.s_g, input.n_g, bolt.d_h)?;
        let n_b = input.n_p.checked_mul(input.n_g).ok_or_else(|| {
            DesignError::invalid_input(
                "n_p",
                format!("{} x {}", input.n_p, input.n_g),
                "Bolt count overflows",
            )
        })?;

        let n_p = f64::from(input.n_p);
        let n_g = f64::from(input.n_g);
        let d_hp = (n_p - 1.0) * input.s_p;
        let d_hg = (n_g - 1.0) * input.s_g;

        let name = format!(
            "{} x {} ({}p x {}g) {}",
            input.n_p, input.n_g, input.s_p, input.s_g, bolt.name
        );

        Ok(BoltGroup {
            name,
            n_b,
            d_hp,
            d_hg,
            d_i_min: 2.0 * bolt.a_e_min + d_hp,
            a_ex_bc: tear_out_to_next_hole(input.s_g, input.n_g, bolt.d_h),
            a_ey_bc: tear_out_to_next_hole(input.s_p, input.n_p, bolt.d_h),
            i_bp: n_g * n_p / 12.0 * (input.s_p.powi(2) * (n_p.powi(2) - 1.0) + input.s_g.powi(2) * (n_g.powi(2) - 1.0)),
            phi_v_df: bolt.phi_v_f * f64::from(n_b),
            bolt,
            input,
        })
    }

    pub fn from_params(params: &ParamMap) -> DesignResult<Self> {
        Self::new(BoltGroupInput::from_params(params)?)
    }

    pub fn to_compact(&self) -> DesignResult<String> {
        serde_json::to_string(&self.input).map_err(|e| DesignError::serialization(e.to_string()))
    }

    pub fn from_compact(compact: &str) -> DesignResult<Self> {
        let input: BoltGroupInput = serde_json::from_str(compact)
            .map_err(|e| DesignError::invalid_input("bolt_group", compact, e.to_string()))?;
        Self::new(input)
    }

    fn n_p(&self) -> f64 {
        f64::from(self.input.n_p)
    }

    // ========================================================================
    // Tear-out and block shear lengths
    // ========================================================================

    /// Vertical tear-out length for an edge distance `a_ev_e`
    pub fn a_ey(&self, a_ev_e: f64) -> f64 {
        (a_ev_e - 1.0).min(self.a_ey_bc)
    }

    /// Horizontal tear-out length for an edge distance `a_eh_e`
    pub fn a_ex(&self, a_eh_e: f64) -> f64 {
        (a_eh_e - 1.0).min(self.a_ex_bc)
    }

    /// Block shear path parallel to a vertical shear force
    pub fn l_vy(&self, a_ev_e: f64) -> f64 {
        a_ev_e + self.d_hp
    }

    /// Block shear path across a vertical shear force
    pub fn l_ty(&self, a_eh_e: f64) -> f64 {
        a_eh_e + self.input.s_g - 1.5 * self.bolt.d_h
    }

    /// Block shear path parallel to a horizontal force
    pub fn l_vx(&self, a_eh_e: f64) -> f64 {
        self.input.s_g + a_eh_e
    }

    /// Block shear path across a horizontal force
    pub fn l_tx(&self) -> f64 {
        self.d_hp - (self.n_p() - 1.0) * self.bolt.d_h
    }

    // ========================================================================
    // Eccentric shear (ASI elastic vector method)
    // ========================================================================

    /// Gauge over group depth
    fn s_pg(&self) -> f64 {
        self.input.s_g / ((self.n_p() - 1.0) * self.input.s_p)
    }

    /// Reduction on the group bolt shear capacity at eccentricity `e`
    pub fn z_b(&self, e: f64) -> f64 {
        let s_g = self.input.s_g;
        if self.input.n_p == 1 {
            return 1.0 / (1.0 + 2.0 * e / s_g);
        }
        let n_p = self.n_p();
        let s_pg = self.s_pg();
        let z_1 = 2.0 * e / s_g / (1.0 + 1.0 / 3.0 * ((n_p + 1.0) / (n_p - 1.0)) * (1.0 / s_pg).powi(2));
        1.0 / ((1.0 + z_1).powi(2) + (z_1 / s_pg).powi(2)).sqrt()
    }

    /// Factor on horizontal tear-out at a positive eccentricity `e`
    pub fn z_eh(&self, e: f64) -> f64 {
        if self.input.n_p == 1 {
            return 0.0;
        }
        let n_p = self.n_p();
        self.i_bp / (e * (n_p - 1.0) * self.input.s_p * n_p)
    }

    /// Factor on vertical tear-out
    pub fn z_ev(&self, e: f64) -> f64 {
        let s_g = self.input.s_g;
        if self.input.n_p == 1 {
            return s_g / (s_g + 2.0 * e);
        }
        1.0 / (1.0 + self.n_p() * e * s_g / self.i_bp)
    }

    pub fn phi_v_df_ecc(&self, e: f64) -> Kilonewtons {
        self.phi_v_df * self.z_b(e)
    }

    /// Eccentric group capacity from bearing and tear-out of the plies
    pub fn phi_v_bv_ecc(
        &self,
        phi_v_bf: Kilonewtons,
        phi_v_ev: Kilonewtons,
        phi_v_eh: Kilonewtons,
        e: f64,
    ) -> Kilonewtons {
        self.phi_v_df_ecc(e)
            .min(phi_v_bf * self.z_b(e))
            .min(phi_v_ev * self.z_ev(e))
            .min(if e > 0.0 { phi_v_eh * self.z_eh(e) } else { Kilonewtons(f64::INFINITY) })
    }
}

impl Report for BoltGroup {
    fn results(&self) -> ResultMap {
        let mut r = ResultMap::new();
        r.insert("name", self.name.as_str());
        r.insert("n_p", self.input.n_p);
        r.insert("n_g", self.input.n_g);
        r.insert("s_p", self.input.s_p);
        r.insert("s_g", self.input.s_g);
        r.insert("n_b", self.n_b);
        r.insert("d_hp", self.d_hp);
        r.insert("d_hg", self.d_hg);
        r.insert("d_i_min", self.d_i_min);
        r.insert("phiV_df", self.phi_v_df.0);
        r.extend_prefixed("bolt", self.bolt.results());
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
    fn test_m20_88s() {
        let bolt = Bolt::new(BoltInput::default()).unwrap();
        assert_eq!(bolt.name, "M20 8.8/S (TI)");
        assert_eq!(bolt.d_h, 22.0);
        assert_eq!(bolt.a_e_min, 30.0);
        // ASI Handbook 1: phiV_f = 92.6 kN for M20 8.8/S threads included
        assert!((bolt.phi_v_f.0 - 92.6).abs() < 0.5);
        assert!((bolt.a_s - 245.0).abs() < 1.0);
    }

    #[test]
    fn test_large_bolt_hole_clearance() {
        let bolt = Bolt::new(BoltInput {
            d_f: 30.0,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(bolt.d_h, 33.0);
    }

    #[test]
    fn test_threads_excluded_uses_shank() {
        let bolt = Bolt::new(BoltInput {
            threads_included: false,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(bolt.name, "M20 8.8/S (TX)");
        assert_eq!(bolt.phi_v_f, bolt.v_fx * 0.8);
    }

    #[test]
    fn test_capacity_non_decreasing_in_diameter() {
        let mut last = (0.0, 0.0);
        for d_f in [12.0, 16.0, 20.0, 24.0, 30.0, 36.0] {
            let bolt = Bolt::new(BoltInput {
                d_f,
                ..Default::default()
            })
            .unwrap();
            assert!(bolt.phi_v_f.0 >= last.0);
            assert!(bolt.phi_n_tf.0 >= last.1);
            last = (bolt.phi_v_f.0, bolt.phi_n_tf.0);
        }
    }

    #[test]
    fn test_unknown_diameter_and_category() {
        let err = Bolt::new(BoltInput {
            d_f: 22.0,
            ..Default::default()
        })
        .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_VARIANT");
        assert!("10.9/S".parse::<BoltCategory>().is_err());
    }

    #[test]
    fn test_compact_round_trip() {
        let group = BoltGroup::new(BoltGroupInput {
            n_p: 4,
            s_g: 90.0,
            bolt: BoltInput {
                bolt_cat: BoltCategory::Class46Snug,
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();
        let compact = group.to_compact().unwrap();
        assert!(compact.contains("\"bolt_cat\":\"4.6/S\""));
        assert_eq!(BoltGroup::from_compact(&compact).unwrap(), group);
    }

    #[test]
    fn test_group_geometry() {
        let group = BoltGroup::new(BoltGroupInput::default()).unwrap();
        assert_eq!(group.name, "7 x 2 (70p x 70g) M20 8.8/S (TI)");
        assert_eq!(group.n_b, 14);
        assert_eq!(group.d_hp, 420.0);
        assert_eq!(group.d_hg, 70.0);
        assert_eq!(group.a_ey(35.0), 34.0);
        assert_eq!(group.a_ey_bc, 58.0);
        assert_eq!(group.l_vy(35.0), 455.0);
        assert_eq!(group.l_ty(35.0), 35.0 + 70.0 - 33.0);
        assert_eq!(group.l_tx(), 420.0 - 6.0 * 22.0);
    }

    #[test]
    fn test_zero_eccentricity_factors() {
        let group = BoltGroup::new(BoltGroupInput::default()).unwrap();
        assert!((group.z_b(0.0) - 1.0).abs() < 1e-12);
        assert!((group.z_ev(0.0) - 1.0).abs() < 1e-12);
        assert_eq!(group.phi_v_df_ecc(0.0), group.phi_v_df);
    }

    #[test]
    fn test_single_row_group() {
        let group = BoltGroup::new(BoltGroupInput {
            n_p: 1,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(group.z_eh(50.0), 0.0);
        assert!((group.z_b(35.0) - 0.5).abs() < 1e-12);
        assert!((group.z_ev(35.0) - 0.5).abs() < 1e-12);
        // No hole above or below, so only the edge limits tear-out
        assert_eq!(group.a_ey(80.0), 79.0);
    }

    #[test]
    fn test_bolt_count_overflow_is_an_error() {
        let params = ParamMap::new().with("n_p", 70000u32).with("n_g", 70000u32);
        let err = BoltGroup::from_params(&params).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_spacing_must_clear_the_hole() {
        let group = |n_p, s_p, s_g| {
            BoltGroup::new(BoltGroupInput {
                n_p,
                s_p,
                s_g,
                ..Default::default()
            })
        };
        for (n_p, s_p, s_g) in [(5, 70.0, 0.0), (5, 0.0, 70.0), (5, -70.0, 70.0), (5, 70.0, f64::NAN)] {
            let err = group(n_p, s_p, s_g).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT", "s_p {} s_g {}", s_p, s_g);
        }
        // 22 mm holes at 20 mm centres overlap
        assert!(group(5, 20.0, 70.0).is_err());
        assert!(group(5, 70.0, 20.0).is_err());
        // A single row has no pitch to clear
        assert!(group(1, 20.0, 70.0).is_ok());
    }

    #[test]
    fn test_concentric_group_ignores_horizontal_tear_out() {
        let group = BoltGroup::new(BoltGroupInput::default()).unwrap();
        let cap = group.phi_v_bv_ecc(Kilonewtons(900.0), Kilonewtons(800.0), Kilonewtons(0.0), 0.0);
        assert_eq!(cap, Kilonewtons(800.0));
        let cap = group.phi_v_bv_ecc(Kilonewtons(900.0), Kilonewtons(800.0), Kilonewtons(700.0), 90.0);
        assert!(cap.0.is_finite() && cap.0 > 0.0);
    }

    #[test]
    fn test_group_from_params_with_nested_bolt() {
        let params = ParamMap::new()
            .with("n_p", 3.0)
            .with("bolt", r#"{"d_f": 24, "bolt_cat": "8.8/S", "threads_included": true}"#);
        let group = BoltGroup::from_params(&params).unwrap();
        assert_eq!(group.bolt.name, "M24 8.8/S (TI)");
        assert_eq!(group.n_b, 6);
    }
}
