//! Web side plate (WSP): a plate welded to the support and bolted to the
//! member web, loaded eccentrically about the bolt group centroid.

use serde::{Deserialize, Serialize};

use super::{
    check_plate_layout, components_from_params, connection_results, BoltGroup, Capacity, Connection, ConnectionKind,
    DetailingChecks, DetailingRule, FailureMode, FeaturedMember, Plate, PlateLayout, Weld,
};
use crate::errors::DesignResult;
use crate::params::{ApplyParams, ParamMap};
use crate::report::{Report, ResultMap};
use crate::shapes::CopeType;
use crate::units::Kilonewtons;

/// Plate layout (mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidePlateInput {
    /// Top of member to top of plate plus the vertical edge distance
    pub a: f64,
    /// Vertical edge distance to the outer bolt rows
    pub a_ev_e: f64,
    /// Horizontal edge distance on the member web
    pub a_eh_e1: f64,
    /// Support face to the first bolt column
    pub s_g1: f64,
}

impl Default for SidePlateInput {
    fn default() -> Self {
        SidePlateInput {
            a: 100.0,
            a_ev_e: 35.0,
            a_eh_e1: 35.0,
            s_g1: 55.0,
        }
    }
}

impl ApplyParams for SidePlateInput {
    fn apply_params(&mut self, params: &ParamMap) -> DesignResult<()> {
        params.apply_number("a", &mut self.a)?;
        params.apply_number("a_ev_e", &mut self.a_ev_e)?;
        params.apply_number("a_eh_e1", &mut self.a_eh_e1)?;
        params.apply_number("s_g1", &mut self.s_g1)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidePlateConnection {
    pub input: SidePlateInput,
    pub member: FeaturedMember,
    pub bolt_group: BoltGroup,
    pub plate: Plate,
    pub weld: Weld,
    /// Plate depth
    pub d_i: f64,
    /// Support face to bolt group centroid
    pub e: f64,
    /// Horizontal edge distance on the plate
    pub a_eh_e: f64,
    /// Member end to support face
    pub gap: f64,
    /// Top cope to the top bolt row (coped members)
    pub a_e4: Option<f64>,
    /// Bottom bolt row to the bottom cope (double coped members)
    pub a_e5: Option<f64>,
    pub detailing: DetailingChecks,
    pub modes: Vec<FailureMode>,
}

impl SidePlateConnection {
    pub fn new(
        member: FeaturedMember,
        bolt_group: BoltGroup,
        plate: Plate,
        weld: Weld,
        input: SidePlateInput,
    ) -> DesignResult<Self> {
        let s_g = bolt_group.input.s_g;
        let d_i = bolt_group.d_hp + 2.0 * input.a_ev_e;
        let e = input.s_g1 + s_g / 2.0;
        let a_eh_e = plate.b_i() - input.s_g1 - s_g;
        let gap = input.s_g1 - input.a_eh_e1;

        let a_e4 = member.is_coped().then(|| input.a - member.cope.d_ct);
        let a_e5 = match (member.cope.features, a_e4) {
            (CopeType::DoubleWebCope, Some(a_e4)) => Some(d_i - a_e4 - bolt_group.d_hp),
            _ => None,
        };

        let connection = ConnectionKind::SidePlate.code();
        let mut detailing = DetailingChecks::new();
        check_plate_layout(
            &mut detailing,
            connection,
            &member,
            &bolt_group,
            &PlateLayout {
                a: input.a,
                a_ev_e: input.a_ev_e,
                a_eh_e,
                d_i,
            },
        );
        detailing.check(DetailingRule::MinimumWeldSize, weld.t_w() < 0.75 * plate.t_i(), connection);

        let v_b = Self::bolt_group_capacity(&member, &bolt_group, &plate, &input, a_eh_e, a_e4, a_e5, e);
        let v_g = match a_e4 {
            Some(a_e4) => Capacity::from(member.phi_v_bs(bolt_group.l_ty(input.a_eh_e1), bolt_group.l_vy(a_e4))),
            None => Capacity::NotApplicable,
        };

        let modes = vec![
            FailureMode::new("V_a", "Weld", weld.v_a_ecc(d_i, e), true),
            FailureMode::new("V_b", "Bolt group", v_b, true),
            FailureMode::new("V_c", "Plate shear", plate.phi_v_v(d_i), true),
            FailureMode::new("V_d", "Plate bending", plate.phi_m_si_ecc(d_i, e), true),
            FailureMode::new(
                "V_e",
                "Plate block shear",
                plate.phi_v_bs(bolt_group.l_ty(a_eh_e), bolt_group.l_vy(input.a_ev_e)),
                true,
            ),
            FailureMode::new("V_f", "Coped member web shear", member.phi_v_ws, true),
            FailureMode::new("V_g", "Coped member block shear", v_g, true),
            FailureMode::new("V_h", "Coped member bending", member.phi_v_cm(gap), false),
        ];

        tracing::debug!(
            member = %member.name,
            d_i,
            e,
            detailing_ok = detailing.ok(),
            "side plate connection derived"
        );

        Ok(SidePlateConnection {
            input,
            member,
            bolt_group,
            plate,
            weld,
            d_i,
            e,
            a_eh_e,
            gap,
            a_e4,
            a_e5,
            detailing,
            modes,
        })
    }

    /// Eccentric bolt group capacity over the plate and member web plies
    #[allow(clippy::too_many_arguments)]
    fn bolt_group_capacity(
        member: &FeaturedMember,
        bolt_group: &BoltGroup,
        plate: &Plate,
        input: &SidePlateInput,
        a_eh_e: f64,
        a_e4: Option<f64>,
        a_e5: Option<f64>,
        e: f64,
    ) -> Kilonewtons {
        let n_b = bolt_group.n_b;
        let d_f = bolt_group.bolt.d_f();
        let (t_i, f_ui) = (plate.t_i(), plate.f_ui);
        let t_w = member.member.section.geom.t_w;
        let f_u = member.member.section.mat.f_u;

        let bearing = Plate::phi_v_bb(n_b, d_f, t_i, f_ui).min(Plate::phi_v_bb(n_b, d_f, t_w, f_u));

        let plate_ev = Plate::phi_v_bt(n_b, bolt_group.a_ey(input.a_ev_e), t_i, f_ui);
        let vertical = match (a_e4, a_e5) {
            (Some(a_e4), Some(a_e5)) => plate_ev.min(Plate::phi_v_bt(n_b, bolt_group.a_ey(a_e4.min(a_e5)), t_w, f_u)),
            (Some(a_e4), None) => plate_ev.min(Plate::phi_v_bt(n_b, bolt_group.a_ey(a_e4), t_w, f_u)),
            (None, _) => plate_ev,
        };

        let horizontal = Plate::phi_v_bt(n_b, bolt_group.a_ex(a_eh_e), t_i, f_ui)
            .min(Plate::phi_v_bt(n_b, bolt_group.a_ex(input.a_eh_e1), t_w, f_u));

        bolt_group.phi_v_bv_ecc(bearing, vertical, horizontal, e)
    }

    /// Member, cope and layout keys plus compact `bolt_group`, `plate` and
    /// `weld` records; missing components take their defaults
    pub fn from_params(params: &ParamMap) -> DesignResult<Self> {
        let member = FeaturedMember::from_params(params)?;
        let (bolt_group, plate, weld) = components_from_params(params)?;
        Self::new(member, bolt_group, plate, weld, SidePlateInput::from_params(params)?)
    }
}

impl Connection for SidePlateConnection {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::SidePlate
    }

    fn featured_member(&self) -> &FeaturedMember {
        &self.member
    }

    fn bolt_group(&self) -> &BoltGroup {
        &self.bolt_group
    }

    fn plate(&self) -> &Plate {
        &self.plate
    }

    fn weld(&self) -> &Weld {
        &self.weld
    }

    fn modes(&self) -> &[FailureMode] {
        &self.modes
    }

    fn detailing(&self) -> &DetailingChecks {
        &self.detailing
    }
}

impl Report for SidePlateConnection {
    fn results(&self) -> ResultMap {
        let mut extra = vec![
            ("a", self.input.a),
            ("a_ev_e", self.input.a_ev_e),
            ("a_eh_e", self.a_eh_e),
            ("a_eh_e1", self.input.a_eh_e1),
            ("s_g1", self.input.s_g1),
            ("d_i", self.d_i),
            ("e", self.e),
            ("gap", self.gap),
        ];
        if let Some(a_e4) = self.a_e4 {
            extra.push(("a_e4", a_e4));
        }
        if let Some(a_e5) = self.a_e5 {
            extra.push(("a_e5", a_e5));
        }
        connection_results(self, &extra)
    }

    fn default_sig_figs(&self) -> u32 {
        4
    }
}

// ============================================================================
// TESTS
// ============================================================================
