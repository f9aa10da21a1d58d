//! Yield stress and tensile strength per AS 4100 Table 2.1.
//!
//! Each product standard is a table of grades; each grade carries a list of
//! thickness bands, and the first band containing the thickness wins.

use serde::{Deserialize, Serialize};

use super::MaterialStandard;
use crate::errors::{DesignError, DesignResult};

/// Yield and tensile strength (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthPair {
    pub f_y: f64,
    pub f_u: f64,
}

#[derive(Debug, Clone, Copy)]
enum Band {
    /// t <= limit
    UpTo(f64),
    /// t < limit
    Below(f64),
    /// t >= limit
    AtLeast(f64),
    /// Thickness independent
    Any,
}

impl Band {
    fn contains(self, t: Option<f64>) -> Option<bool> {
        match (self, t) {
            (Band::Any, _) => Some(true),
            (_, None) => None,
            (Band::UpTo(limit), Some(t)) => Some(t <= limit),
            (Band::Below(limit), Some(t)) => Some(t < limit),
            (Band::AtLeast(limit), Some(t)) => Some(t >= limit),
        }
    }
}

enum Tensile {
    Banded(&'static [(Band, f64)]),
    /// Thickness dependent and not tabulated here
    Unimplemented,
}

struct GradeRow {
    grade: &'static str,
    f_y: &'static [(Band, f64)],
    f_u: Tensile,
}

use Band::{Any, AtLeast, Below, UpTo};

const AS1163: &[GradeRow] = &[
    GradeRow { grade: "C450", f_y: &[(Any, 450.0)], f_u: Tensile::Banded(&[(Any, 500.0)]) },
    GradeRow { grade: "C350", f_y: &[(Any, 350.0)], f_u: Tensile::Banded(&[(Any, 430.0)]) },
    GradeRow { grade: "C250", f_y: &[(Any, 250.0)], f_u: Tensile::Banded(&[(Any, 320.0)]) },
];

const AS3678: &[GradeRow] = &[
    GradeRow {
        grade: "GR450",
        f_y: &[(UpTo(20.0), 450.0), (UpTo(32.0), 420.0), (UpTo(50.0), 400.0)],
        f_u: Tensile::Unimplemented,
    },
    GradeRow {
        grade: "GR400",
        f_y: &[(UpTo(12.0), 400.0), (UpTo(20.0), 380.0), (UpTo(80.0), 360.0)],
        f_u: Tensile::Banded(&[(Any, 480.0)]),
    },
    GradeRow {
        grade: "GR350",
        f_y: &[(UpTo(12.0), 360.0), (UpTo(20.0), 350.0), (UpTo(80.0), 340.0), (UpTo(150.0), 330.0)],
        f_u: Tensile::Banded(&[(Any, 450.0)]),
    },
    GradeRow { grade: "WR350", f_y: &[(UpTo(50.0), 340.0)], f_u: Tensile::Banded(&[(Any, 450.0)]) },
    GradeRow {
        grade: "GR300",
        f_y: &[
            (UpTo(8.0), 320.0),
            (UpTo(12.0), 310.0),
            (UpTo(20.0), 300.0),
            (UpTo(50.0), 280.0),
            (UpTo(80.0), 270.0),
            (UpTo(150.0), 260.0),
        ],
        f_u: Tensile::Banded(&[(Any, 430.0)]),
    },
    GradeRow {
        grade: "GR250",
        f_y: &[(UpTo(8.0), 280.0), (UpTo(12.0), 260.0), (UpTo(50.0), 250.0), (UpTo(80.0), 240.0), (UpTo(150.0), 230.0)],
        f_u: Tensile::Banded(&[(Any, 410.0)]),
    },
    GradeRow { grade: "GR200", f_y: &[(UpTo(12.0), 200.0)], f_u: Tensile::Banded(&[(Any, 300.0)]) },
];

const AS3679_1: &[GradeRow] = &[
    GradeRow {
        grade: "GR350",
        f_y: &[(UpTo(11.0), 360.0), (Below(40.0), 340.0), (AtLeast(40.0), 330.0)],
        f_u: Tensile::Banded(&[(Any, 480.0)]),
    },
    GradeRow {
        grade: "GR300",
        f_y: &[(Below(11.0), 320.0), (UpTo(17.0), 300.0), (AtLeast(17.0), 280.0)],
        f_u: Tensile::Banded(&[(Any, 440.0)]),
    },
];

const AS3597: &[GradeRow] = &[
    GradeRow { grade: "PR500", f_y: &[(Any, 500.0)], f_u: Tensile::Banded(&[(Any, 590.0)]) },
    GradeRow { grade: "PR600", f_y: &[(Any, 600.0)], f_u: Tensile::Banded(&[(Any, 690.0)]) },
    GradeRow {
        grade: "PR700",
        f_y: &[(UpTo(5.0), 650.0), (Below(65.0), 690.0), (AtLeast(110.0), 620.0)],
        f_u: Tensile::Banded(&[(UpTo(5.0), 750.0), (Below(65.0), 790.0), (AtLeast(110.0), 720.0)]),
    },
];

fn table(standard: MaterialStandard) -> &'static [GradeRow] {
    match standard {
        MaterialStandard::HollowSection => AS1163,
        MaterialStandard::HotRolledPlate | MaterialStandard::WeldedSection => AS3678,
        MaterialStandard::HotRolledSection => AS3679_1,
        MaterialStandard::PressurePlate => AS3597,
    }
}

fn grade_row(standard: MaterialStandard, grade: &str) -> DesignResult<&'static GradeRow> {
    table(standard)
        .iter()
        .find(|row| row.grade == grade.trim())
        .ok_or_else(|| DesignError::unknown_variant(format!("{} grade", standard.standard_code()), grade))
}

fn lookup(
    standard: MaterialStandard,
    grade: &str,
    bands: &[(Band, f64)],
    thickness: Option<f64>,
    quantity: &str,
) -> DesignResult<f64> {
    if let Some(t) = thickness {
        if t <= 0.0 || t.is_nan() {
            return Err(DesignError::invalid_input("t", t.to_string(), "Thickness must be positive"));
        }
    }
    for (band, value) in bands {
        match band.contains(thickness) {
            Some(true) => return Ok(*value),
            Some(false) => continue,
            None => {
                return Err(DesignError::missing_input(
                    "t",
                    format!("{} {} lookup ({})", standard.standard_code(), quantity, grade),
                ))
            }
        }
    }
    Err(DesignError::invalid_input(
        "t",
        thickness.map_or_else(String::new, |t| t.to_string()),
        format!("Thickness outside the tabulated bands for {} {}", standard.standard_code(), grade),
    ))
}

/// Yield stress f_y for a grade and governing thickness (MPa)
pub fn yield_stress(standard: MaterialStandard, grade: &str, thickness: Option<f64>) -> DesignResult<f64> {
    let row = grade_row(standard, grade)?;
    lookup(standard, grade, row.f_y, thickness, "yield stress")
}

/// Tensile strength f_u for a grade (MPa). Only PR700 depends on thickness.
pub fn tensile_strength(standard: MaterialStandard, grade: &str, thickness: Option<f64>) -> DesignResult<f64> {
    let row = grade_row(standard, grade)?;
    match row.f_u {
        Tensile::Banded(bands) => lookup(standard, grade, bands, thickness, "tensile strength"),
        Tensile::Unimplemented => Err(DesignError::unimplemented(
            format!("{} tensile strength", standard.standard_code()),
            format!("thickness-dependent f_u for {}", row.grade),
        )),
    }
}

/// Resolve both strengths at one thickness
pub fn resolve(standard: MaterialStandard, grade: &str, thickness: Option<f64>) -> DesignResult<StrengthPair> {
    Ok(StrengthPair {
        f_y: yield_stress(standard, grade, thickness)?,
        f_u: tensile_strength(standard, grade, thickness)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================
