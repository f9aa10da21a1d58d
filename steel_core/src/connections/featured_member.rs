//! Supported member at a connection, with an optional web cope.
//!
//! The unfeatured member keeps the full section. The featured member is
//! rebuilt from the coped section with the parent's resolved material, so a
//! coped tee or web plate keeps the flange-governed yield stress of the beam.

use serde::{Deserialize, Serialize};

use crate::errors::DesignResult;
use crate::member::{SteelMember, SteelSection, PHI};
use crate::params::{ApplyParams, ParamMap};
use crate::report::{Report, ResultMap};
use crate::shapes::{apply_cope, CopeInput};
use crate::units::{KilonewtonMetres, Kilonewtons};

/// Block shear, AISC 360-16 J4.3, non-uniform tension stress (U_bs = 0.5)
const PHI_BLOCK_SHEAR: f64 = 0.75;
const U_BS: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedMember {
    pub unfeatured: SteelMember,
    pub cope: CopeInput,
    /// Member at the coped end; a copy of `unfeatured` when uncoped
    pub member: SteelMember,
    /// e.g. "460UB82.1 (GR300) SWC"
    pub name: String,
    /// Section moment capacity of the coped section
    pub phi_m_ss: KilonewtonMetres,
    /// Web shear capacity of the coped section
    pub phi_v_ws: Kilonewtons,
}

impl FeaturedMember {
    pub fn new(unfeatured: SteelMember, cope: CopeInput) -> DesignResult<Self> {
        let member = if cope.features.is_coped() {
            let geom = apply_cope(&unfeatured.section.geom, &cope)?;
            let section = SteelSection::from_parts(geom, unfeatured.section.mat.clone())?;
            SteelMember::unrestrained_length(section)?
        } else {
            unfeatured.clone()
        };

        let geom = &member.section.geom;
        let s = geom.gross.s_x.min(1.5 * geom.gross.z_x);
        let phi_m_ss = KilonewtonMetres(PHI * s * member.section.mat.f_y / 1e6);
        let phi_v_ws = member.phi_v_v * (geom.web.d_1 / geom.web.d_w);

        let name = format!("{} {}", unfeatured.name, cope.features);
        tracing::debug!(member = %name, phi_m_ss = phi_m_ss.0, phi_v_ws = phi_v_ws.0, "featured member derived");

        Ok(FeaturedMember {
            unfeatured,
            cope,
            member,
            name,
            phi_m_ss,
            phi_v_ws,
        })
    }

    /// Member and cope keys from one parameter map
    pub fn from_params(params: &ParamMap) -> DesignResult<Self> {
        Self::new(SteelMember::from_params(params)?, CopeInput::from_params(params)?)
    }

    pub fn is_coped(&self) -> bool {
        self.cope.features.is_coped()
    }

    /// Depth of the member at the coped end
    pub fn d(&self) -> f64 {
        self.member.section.geom.d
    }

    pub fn d_1(&self) -> f64 {
        self.member.section.geom.web.d_1
    }

    /// Web shear over a plate depth `d_i` on the uncoped web
    pub fn phi_v_wp(&self, d_i: f64) -> Kilonewtons {
        let d_w = self.unfeatured.section.geom.web.d_w;
        self.unfeatured.phi_v_v * (d_i / d_w)
    }

    /// Lever arm from the support face to the end of the cope
    pub fn e_v(&self, gap: f64) -> f64 {
        self.cope.l_c + gap
    }

    /// Shear the coped section moment capacity admits at the end of the cope
    pub fn phi_v_cm(&self, gap: f64) -> Kilonewtons {
        Kilonewtons(self.phi_m_ss.0 / self.e_v(gap) * 1000.0)
    }

    /// Block shear of the coped web with tension path `l_t` and shear path `l_v`
    pub fn phi_v_bs(&self, l_t: f64, l_v: f64) -> Kilonewtons {
        let t_w = self.member.section.geom.t_w;
        let mat = &self.member.section.mat;
        let a_nt = l_t * t_w;
        let a_gv = l_v * t_w;
        Kilonewtons(PHI_BLOCK_SHEAR * (U_BS * a_nt * mat.f_u + 0.6 * a_gv * mat.f_yw) / 1e3)
    }
}

impl Report for FeaturedMember {
    fn results(&self) -> ResultMap {
        let mut r = ResultMap::new();
        r.insert("name", self.name.as_str());
        r.insert("features", self.cope.features.code());
        r.insert("d_ct", self.cope.d_ct);
        r.insert("d_cb", self.cope.d_cb);
        r.insert("L_c", self.cope.l_c);
        r.insert("r_c", self.cope.r_c);
        r.insert("coped_section", self.member.section_name());
        r.insert("d", self.d());
        r.insert("d_1", self.d_1());
        r.insert("phiM_ss", self.phi_m_ss.0);
        r.insert("phiV_ws", self.phi_v_ws.0);
        r.extend_prefixed("member", self.unfeatured.results());
        r
    }
}

// ============================================================================
// TESTS
// ============================================================================
