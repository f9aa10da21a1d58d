//! # Section Slenderness
//!
//! Local buckling classification per AS 4100 Section 5.2 and 6.2.
//!
//! A section is decomposed into plate (or ring) elements for major-axis
//! bending, minor-axis bending and axial compression. Each axis is governed by
//! the element with the largest λ_e / λ_ey; ties go to the element declared
//! first. The governing element classifies the axis as compact, noncompact or
//! slender and sets the effective section modulus Z_e. The compression
//! elements set the effective area A_e and form factor k_f.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::materials::{MaterialInput, MaterialStandard, SteelMaterial};
//! use steel_core::shapes::{SectionGeometry, SectionInput, SectionType};
//! use steel_core::slenderness::{Compactness, SectionSlenderness};
//!
//! let geom = SectionGeometry::new(SectionInput::open("460UB82.1", SectionType::UB, 460.0, 191.0, 16.0, 9.9, Some(11.4))).unwrap();
//! let mat = SteelMaterial::new(MaterialInput::open(MaterialStandard::HotRolledSection, "GR300", 16.0, 9.9)).unwrap();
//!
//! let slenderness = SectionSlenderness::classify(&geom, &mat).unwrap();
//! assert_eq!(slenderness.x.compactness, Compactness::Compact);
//! ```

pub mod elements;

pub use elements::{EdgeSupport, Element, LoadDistribution, PlateElement, PlateLimits, RingElement, RingLimits};

use serde::{Deserialize, Serialize};

use crate::errors::{DesignError, DesignResult};
use crate::materials::SteelMaterial;
use crate::report::{Report, ResultMap};
use crate::shapes::{SectionGeometry, SectionType, ShapeFamily};

/// Section classification for one bending axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compactness {
    Compact,
    Noncompact,
    Slender,
}

impl Compactness {
    pub fn code(&self) -> &'static str {
        match self {
            Compactness::Compact => "C",
            Compactness::Noncompact => "N",
            Compactness::Slender => "S",
        }
    }
}

impl std::fmt::Display for Compactness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Classification result for one bending axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisSlenderness {
    /// Index of the governing element in the axis element list
    pub governing: Option<usize>,
    pub lam_s: f64,
    pub lam_sp: f64,
    pub lam_sy: f64,
    pub compactness: Compactness,
    /// Effective section modulus (mm³)
    pub z_e: f64,
}

/// Section-wide slenderness results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSlenderness {
    /// Elements for major-axis bending
    pub elements_x: Vec<Element>,
    /// Elements for minor-axis bending
    pub elements_y: Vec<Element>,
    /// Elements for axial compression
    pub elements_c: Vec<Element>,
    pub x: AxisSlenderness,
    pub y: AxisSlenderness,
    /// Effective area (mm²)
    pub a_e: f64,
    /// Form factor A_e / A_g
    pub k_f: f64,
    /// Member section constant, Table 6.3.3
    pub alpha_b: f64,
    /// Web shear slenderness over its yield limit; none for CHS
    pub rho_w: Option<f64>,
    pub web_shear_yield_governs: bool,
    /// Web shear buckling reduction factor
    pub alpha_v: f64,
}

struct Decomposition {
    x: Vec<Element>,
    y: Vec<Element>,
    c: Vec<Element>,
}

fn decompose(geom: &SectionGeometry, mat: &SteelMaterial) -> Decomposition {
    let f_y = mat.f_y;
    let rs = mat.residual_stress;
    let web = &geom.web;
    let plate = |b: f64, t: f64, edge: EdgeSupport, load: LoadDistribution| {
        Element::Plate(PlateElement::new(b, t, f_y, edge, load, rs))
    };
    use EdgeSupport::{Both, One};
    use LoadDistribution::{CompressionToTension, UniformCompression};

    match geom.family() {
        ShapeFamily::IShape | ShapeFamily::Channel => {
            let flanges = if geom.family() == ShapeFamily::IShape { 4 } else { 2 };
            let mut c = vec![plate(web.d_1, geom.t_w, Both, UniformCompression)];
            c.extend((0..flanges).map(|_| plate(web.b_ff, geom.t_f, One, UniformCompression)));
            Decomposition {
                x: vec![
                    plate(web.b_ff, geom.t_f, One, UniformCompression),
                    plate(web.d_1, geom.t_w, Both, CompressionToTension),
                ],
                y: vec![plate(web.b_ff, geom.t_f, One, CompressionToTension)],
                c,
            }
        }
        ShapeFamily::Tee => Decomposition {
            x: vec![plate(web.d_1, geom.t_w, One, CompressionToTension)],
            y: vec![plate(web.b_ff, geom.t_f, One, CompressionToTension)],
            c: vec![
                plate(web.d_1, geom.t_w, One, UniformCompression),
                plate(web.b_ff, geom.t_f, One, UniformCompression),
                plate(web.b_ff, geom.t_f, One, UniformCompression),
            ],
        },
        ShapeFamily::RectangularHollow => {
            let t = geom.t_f;
            Decomposition {
                x: vec![
                    plate(web.b_ff, t, Both, UniformCompression),
                    plate(web.d_1, t, Both, CompressionToTension),
                ],
                y: vec![
                    plate(web.b_ff, t, Both, CompressionToTension),
                    plate(web.d_1, t, Both, UniformCompression),
                ],
                c: vec![
                    plate(web.d_1, t, Both, UniformCompression),
                    plate(web.d_1, t, Both, UniformCompression),
                    plate(web.b_ff, t, Both, UniformCompression),
                    plate(web.b_ff, t, Both, UniformCompression),
                ],
            }
        }
        ShapeFamily::CircularHollow => {
            let ring = Element::Ring(RingElement::new(geom.d, geom.t_f, f_y, rs));
            Decomposition {
                x: vec![ring.clone()],
                y: vec![ring.clone()],
                c: vec![ring],
            }
        }
        ShapeFamily::RectangularPlate => {
            tracing::info!(
                section = %geom.section,
                "no slenderness provisions for rectangular plates; section assumed compact with k_f = 1"
            );
            Decomposition {
                x: Vec::new(),
                y: Vec::new(),
                c: Vec::new(),
            }
        }
    }
}

/// Element with the greatest λ_e / λ_ey; the first one wins a tie.
fn governing_element(elements: &[Element]) -> Option<usize> {
    let mut governing = None;
    let mut max_ratio = 0.0;
    for (i, element) in elements.iter().enumerate() {
        if element.lam_e_ratio() > max_ratio {
            max_ratio = element.lam_e_ratio();
            governing = Some(i);
        }
    }
    governing
}

/// BS 5950 effective section of a slender hollow flange, removing the
/// ineffective width `k` of the compression wall
fn hollow_effective_modulus(geom: &SectionGeometry, f_y: f64, axis: Axis) -> f64 {
    let t = geom.t_f;
    let a = geom.gross.a_g;
    // `across` is the dimension normal to the bending axis
    let (across, along, i) = match axis {
        Axis::X => (geom.d, geom.b, geom.gross.i_x),
        Axis::Y => (geom.b, geom.d, geom.gross.i_y),
    };

    let eps = (275.0 / f_y).sqrt();
    let k = along - 35.0 * t * eps - 5.0 * t;
    let y_eff = (a * across - k * t.powi(2)) / (2.0 * (a - k * t));
    let a_eff = a - k * t;
    let i_e = i - k * t.powi(3) / 12.0 - k * t * (across / 2.0 - t / 2.0).powi(2) - a_eff * (y_eff - across / 2.0).powi(2);
    i_e / y_eff
}

fn classify_axis(
    geom: &SectionGeometry,
    mat: &SteelMaterial,
    elements: &[Element],
    axis: Axis,
) -> DesignResult<AxisSlenderness> {
    let governing = governing_element(elements);
    let (lam_s, lam_sp, lam_sy) = match governing {
        Some(i) => (elements[i].lam_e(), elements[i].lam_ep(), elements[i].lam_ey()),
        None => (0.0, 0.0, 0.0),
    };

    let (z, s) = match axis {
        Axis::X => (geom.gross.z_x, geom.gross.s_x),
        Axis::Y => (geom.gross.z_y, geom.gross.s_y),
    };
    let z_compact = s.min(1.5 * z);
    let is_rhs = matches!(geom.sec_type, SectionType::RHS | SectionType::SHS);

    let (compactness, z_e) = if lam_s <= lam_sp {
        (Compactness::Compact, z_compact)
    } else if lam_s <= lam_sy {
        (Compactness::Noncompact, z + (lam_sy - lam_s) / (lam_sy - lam_sp) * (z_compact - z))
    } else {
        let element = governing.map(|i| &elements[i]);
        let z_e = match (axis, element) {
            (Axis::X, Some(Element::Ring(_))) => {
                return Err(DesignError::unimplemented(
                    "slender section modulus",
                    format!("slender circular hollow section {}", geom.section),
                ))
            }
            (Axis::X, Some(e)) if e.is_outstand_in_bending() => z * (lam_sy / lam_s).powi(2),
            _ if is_rhs => hollow_effective_modulus(geom, mat.f_y, axis),
            _ => z * lam_sy / lam_s,
        };
        (Compactness::Slender, z_e)
    };

    Ok(AxisSlenderness {
        governing,
        lam_s,
        lam_sp,
        lam_sy,
        compactness,
        z_e,
    })
}

/// Member section constant α_b, AS 4100 Tables 6.3.3(A) and 6.3.3(B)
pub fn member_section_constant(geom: &SectionGeometry, k_f: f64) -> f64 {
    let thick_flange = geom.t_f > 40.0;
    let sec_type = geom.sec_type;
    if k_f < 1.0 {
        match sec_type {
            _ if sec_type.is_hollow() => -0.5,
            SectionType::UB | SectionType::UC => {
                if thick_flange {
                    0.5
                } else {
                    0.0
                }
            }
            SectionType::WB | SectionType::WC => {
                if thick_flange {
                    1.0
                } else {
                    0.5
                }
            }
            _ => 1.0,
        }
    } else {
        match sec_type {
            _ if sec_type.is_hollow() => -1.0,
            SectionType::UB | SectionType::UC => {
                if thick_flange {
                    1.0
                } else {
                    0.0
                }
            }
            SectionType::PFC | SectionType::BT | SectionType::CT => 0.5,
            SectionType::WB | SectionType::WC => 0.0,
            _ => 0.5,
        }
    }
}

impl SectionSlenderness {
    pub fn classify(geom: &SectionGeometry, mat: &SteelMaterial) -> DesignResult<Self> {
        let Decomposition { x, y, c } = decompose(geom, mat);

        let axis_x = classify_axis(geom, mat, &x, Axis::X)?;
        let axis_y = classify_axis(geom, mat, &y, Axis::Y)?;

        let a_e = geom.gross.a_g - c.iter().map(Element::lost_area).sum::<f64>();
        let k_f = a_e / geom.gross.a_g;
        let alpha_b = member_section_constant(geom, k_f);

        // AS 4100 Cl 5.11.2 / 5.11.5.1
        let (rho_w, web_shear_yield_governs, alpha_v) = if geom.family() == ShapeFamily::CircularHollow {
            (None, true, 1.0)
        } else {
            let rho_w = (geom.web.d_p / geom.t_w) * (mat.f_yw / 250.0).sqrt() / 82.0;
            (Some(rho_w), rho_w <= 1.0, (1.0 / rho_w.powi(2)).min(1.0))
        };

        tracing::debug!(
            section = %geom.section,
            compact_x = %axis_x.compactness,
            compact_y = %axis_y.compactness,
            k_f,
            "section classified"
        );

        Ok(SectionSlenderness {
            elements_x: x,
            elements_y: y,
            elements_c: c,
            x: axis_x,
            y: axis_y,
            a_e,
            k_f,
            alpha_b,
            rho_w,
            web_shear_yield_governs,
            alpha_v,
        })
    }
}

impl Report for SectionSlenderness {
    fn results(&self) -> ResultMap {
        let mut r = ResultMap::new();
        r.insert("compact_x", self.x.compactness.code());
        r.insert("compact_y", self.y.compactness.code());
        r.insert("lam_s_x", self.x.lam_s);
        r.insert("lam_sp_x", self.x.lam_sp);
        r.insert("lam_sy_x", self.x.lam_sy);
        r.insert("lam_s_y", self.y.lam_s);
        r.insert("lam_sp_y", self.y.lam_sp);
        r.insert("lam_sy_y", self.y.lam_sy);
        r.insert("Z_ex", self.x.z_e);
        r.insert("Z_ey", self.y.z_e);
        r.insert("A_e", self.a_e);
        r.insert("k_f", self.k_f);
        r.insert("alpha_b", self.alpha_b);
        match self.rho_w {
            Some(rho) => r.insert("rho_w", rho),
            None => r.insert("rho_w", crate::report::ResultValue::NotApplicable),
        }
        r.insert("web_shear_yield_governs", self.web_shear_yield_governs);
        r.insert("alpha_v", self.alpha_v);
        r
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{MaterialInput, MaterialStandard};
    use crate::shapes::SectionInput;

    fn ub_460() -> (SectionGeometry, SteelMaterial) {
        let geom =
            SectionGeometry::new(SectionInput::open("460UB82.1", SectionType::UB, 460.0, 191.0, 16.0, 9.9, Some(11.4)))
                .unwrap();
        let mat = SteelMaterial::new(MaterialInput::open(MaterialStandard::HotRolledSection, "GR300", 16.0, 9.9)).unwrap();
        (geom, mat)
    }

    fn shs_200x5() -> (SectionGeometry, SteelMaterial) {
        let geom = SectionGeometry::new(SectionInput::rectangular_hollow(
            "200x200x5SHS",
            SectionType::SHS,
            200.0,
            200.0,
            5.0,
            Some(12.5),
        ))
        .unwrap();
        let mat = SteelMaterial::new(MaterialInput::plate(MaterialStandard::HollowSection, "C450", 5.0)).unwrap();
        (geom, mat)
    }

    #[test]
    fn test_460ub_compact_and_fully_effective() {
        let (geom, mat) = ub_460();
        let s = SectionSlenderness::classify(&geom, &mat).unwrap();
        assert_eq!(s.x.compactness, Compactness::Compact);
        assert_eq!(s.y.compactness, Compactness::Compact);
        assert!((s.x.z_e - geom.gross.s_x.min(1.5 * geom.gross.z_x)).abs() < 1e-6);
        // Web governs compression: 428 / 9.9 * sqrt(1.2) = 47.4 > 45
        assert!(s.k_f < 1.0);
        assert!(s.k_f > 0.9);
        assert_eq!(s.alpha_b, 0.0);
        assert_eq!(s.elements_c.len(), 5);
    }

    #[test]
    fn test_slender_shs_area_reduction() {
        let (geom, mat) = shs_200x5();
        let s = SectionSlenderness::classify(&geom, &mat).unwrap();
        // Four walls each lose (190 - b_e) * 5
        let lam_e = 38.0 * 1.8_f64.sqrt();
        let lost = 4.0 * (190.0 - 40.0 / lam_e * 190.0) * 5.0;
        assert!((s.a_e - (geom.gross.a_g - lost)).abs() < 1e-6);
        assert!((s.k_f - 0.785).abs() < 0.005);
        assert_eq!(s.alpha_b, -0.5);
        assert_eq!(s.x.compactness, Compactness::Slender);
        assert!(s.x.z_e < geom.gross.z_x);
    }

    fn plate(b: f64, edge: EdgeSupport, load: LoadDistribution) -> Element {
        Element::Plate(PlateElement::new(b, 10.0, 250.0, edge, load, crate::materials::ResidualStress::HR))
    }

    #[test]
    fn test_first_element_wins_a_tie() {
        let a = plate(100.0, EdgeSupport::Both, LoadDistribution::UniformCompression);
        let elements = vec![a.clone(), a];
        assert_eq!(governing_element(&elements), Some(0));
        assert_eq!(governing_element(&[]), None);
    }

    #[test]
    fn test_classification_limits_are_inclusive() {
        let (geom, mat) = ub_460();
        let z = geom.gross.z_x;
        let z_c = geom.gross.s_x.min(1.5 * z);

        // λ_e = 9 = λ_ep
        let x = classify_axis(&geom, &mat, &[plate(90.0, EdgeSupport::One, LoadDistribution::CompressionToTension)], Axis::X)
            .unwrap();
        assert_eq!(x.compactness, Compactness::Compact);
        assert!((x.z_e - z_c).abs() < 1e-6);

        // λ_e = 25 = λ_ey
        let x = classify_axis(&geom, &mat, &[plate(250.0, EdgeSupport::One, LoadDistribution::CompressionToTension)], Axis::X)
            .unwrap();
        assert_eq!(x.compactness, Compactness::Noncompact);
        assert!((x.z_e - z).abs() < 1e-6);

        // λ_e = 30: slender outstand in bending
        let x = classify_axis(&geom, &mat, &[plate(300.0, EdgeSupport::One, LoadDistribution::CompressionToTension)], Axis::X)
            .unwrap();
        assert_eq!(x.compactness, Compactness::Slender);
        assert!((x.z_e - z * (25.0_f64 / 30.0).powi(2)).abs() < 1e-6);

        // Same element about y uses the linear reduction
        let y = classify_axis(&geom, &mat, &[plate(300.0, EdgeSupport::One, LoadDistribution::CompressionToTension)], Axis::Y)
            .unwrap();
        assert!((y.z_e - geom.gross.z_y * 25.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_plate_assumed_compact() {
        let geom = SectionGeometry::new(SectionInput::plate("web", 330.0, 9.9)).unwrap();
        let mat = SteelMaterial::new(MaterialInput::plate(MaterialStandard::HotRolledPlate, "GR250", 9.9)).unwrap();
        let s = SectionSlenderness::classify(&geom, &mat).unwrap();
        assert_eq!(s.k_f, 1.0);
        assert_eq!(s.x.compactness, Compactness::Compact);
        assert_eq!(s.x.governing, None);
        assert!((s.x.z_e - geom.gross.s_x.min(1.5 * geom.gross.z_x)).abs() < 1e-9);
    }

    #[test]
    fn test_chs_web_shear() {
        let geom = SectionGeometry::new(SectionInput::circular_hollow("60.3x4.5CHS", 60.3, 4.5)).unwrap();
        let mat = SteelMaterial::new(MaterialInput::plate(MaterialStandard::HollowSection, "C350", 4.5)).unwrap();
        let s = SectionSlenderness::classify(&geom, &mat).unwrap();
        assert!(s.web_shear_yield_governs);
        assert_eq!(s.alpha_v, 1.0);
        assert_eq!(s.rho_w, None);
        assert_eq!(s.k_f, 1.0);
    }

    #[test]
    fn test_slender_chs_bending_is_unimplemented() {
        let geom = SectionGeometry::new(SectionInput::circular_hollow("610x3.0CHS", 610.0, 3.0)).unwrap();
        let mat = SteelMaterial::new(MaterialInput::plate(MaterialStandard::HollowSection, "C350", 3.0)).unwrap();
        let err = SectionSlenderness::classify(&geom, &mat).unwrap_err();
        assert_eq!(err.error_code(), "UNIMPLEMENTED_CASE");
    }
}
