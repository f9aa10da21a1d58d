//! Classified steel section: geometry, material and slenderness built in that
//! order.

use serde::{Deserialize, Serialize};

use crate::errors::DesignResult;
use crate::materials::{MaterialInput, SteelMaterial};
use crate::params::{ApplyParams, ParamMap};
use crate::report::{Report, ResultMap};
use crate::shapes::{SectionGeometry, SectionInput};
use crate::slenderness::SectionSlenderness;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SteelSection {
    pub geom: SectionGeometry,
    pub mat: SteelMaterial,
    pub slenderness: SectionSlenderness,
}

impl SteelSection {
    /// Build from raw records.
    ///
    /// A material record without any thickness takes the governing
    /// thicknesses from the section: flange and web for open sections, the
    /// wall (or plate) thickness otherwise.
    pub fn new(section: SectionInput, material: MaterialInput) -> DesignResult<Self> {
        let geom = SectionGeometry::new(section)?;

        let mut material = material;
        if !material.has_thickness() {
            if geom.family().is_open() {
                material.t_f = Some(geom.t_f);
                material.t_w = Some(geom.t_w);
            } else {
                material.t = Some(geom.t_f);
            }
        }
        let mat = SteelMaterial::new(material)?;

        Self::from_parts(geom, mat)
    }

    /// Classify an already derived geometry with a resolved material
    pub fn from_parts(geom: SectionGeometry, mat: SteelMaterial) -> DesignResult<Self> {
        let slenderness = SectionSlenderness::classify(&geom, &mat)?;
        Ok(SteelSection { geom, mat, slenderness })
    }

    /// Section and material keys from one parameter map
    pub fn from_params(params: &ParamMap) -> DesignResult<Self> {
        Self::new(SectionInput::from_params(params)?, MaterialInput::from_params(params)?)
    }

    pub fn section_name(&self) -> &str {
        &self.geom.section
    }

    pub fn grade(&self) -> &str {
        self.mat.grade()
    }

    /// Net area; no hole deductions are taken
    pub fn a_n(&self) -> f64 {
        self.geom.gross.a_g
    }
}

impl Report for SteelSection {
    fn results(&self) -> ResultMap {
        let mut r = self.geom.results();
        for part in [self.mat.results(), self.slenderness.results()] {
            for (key, value) in part.iter() {
                r.insert(key, value.clone());
            }
        }
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::MaterialStandard;
    use crate::shapes::SectionType;

    #[test]
    fn test_thickness_taken_from_open_section() {
        let section = SteelSection::new(
            SectionInput::open("250UC89.5", SectionType::UC, 260.0, 256.0, 17.3, 10.5, Some(13.0)),
            MaterialInput {
                grade: "GR300".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(section.mat.f_y, 280.0);
        assert_eq!(section.mat.f_yw, 320.0);
    }

    #[test]
    fn test_thickness_taken_from_hollow_wall() {
        let section = SteelSection::new(
            SectionInput::rectangular_hollow("150x100x6RHS", SectionType::RHS, 150.0, 100.0, 6.0, Some(15.0)),
            MaterialInput {
                mat_type: MaterialStandard::HollowSection,
                grade: "C350".to_string(),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(section.mat.input.t, Some(6.0));
        assert_eq!(section.mat.f_y, 350.0);
    }

    #[test]
    fn test_report_merges_all_parts() {
        let params = ParamMap::new()
            .with("section", "460UB82.1")
            .with("sec_type", "UB")
            .with("d", 460.0)
            .with("b", 191.0)
            .with("t_f", 16.0)
            .with("t_w", 9.9)
            .with("r_1", 11.4)
            .with("grade", "GR300");
        let section = SteelSection::from_params(&params).unwrap();
        let r = section.report();
        assert_eq!(r.text("section"), Some("460UB82.1"));
        assert_eq!(r.text("grade"), Some("GR300"));
        assert_eq!(r.text("compact_x"), Some("C"));
        assert!(r.number("A_g").is_some());
    }
}
