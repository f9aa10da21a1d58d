//! Flexible end plate (FEP): a plate fillet welded across the member end and
//! bolted to the support through two bolt columns.

use serde::{Deserialize, Serialize};

use super::{
    check_plate_layout, components_from_params, connection_results, BoltGroup, Connection, ConnectionKind,
    DetailingChecks, FailureMode, FeaturedMember, Plate, PlateLayout, Weld,
};
use crate::errors::DesignResult;
use crate::params::{ApplyParams, ParamMap};
use crate::report::{Report, ResultMap};

/// Plate layout (mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndPlateInput {
    /// Top of member to top of plate plus the vertical edge distance
    pub a: f64,
    /// Vertical edge distance to the outer bolt rows
    pub a_ev_e: f64,
}

impl Default for EndPlateInput {
    fn default() -> Self {
        EndPlateInput {
            a: 100.0,
            a_ev_e: 35.0,
        }
    }
}

impl ApplyParams for EndPlateInput {
    fn apply_params(&mut self, params: &ParamMap) -> DesignResult<()> {
        params.apply_number("a", &mut self.a)?;
        params.apply_number("a_ev_e", &mut self.a_ev_e)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndPlateConnection {
    pub input: EndPlateInput,
    pub member: FeaturedMember,
    pub bolt_group: BoltGroup,
    pub plate: Plate,
    pub weld: Weld,
    /// Plate depth
    pub d_i: f64,
    /// Horizontal edge distance to the outer bolt columns
    pub a_eh_e: f64,
    /// Member end to support face
    pub gap: f64,
    pub detailing: DetailingChecks,
    pub modes: Vec<FailureMode>,
}

impl EndPlateConnection {
    pub fn new(
        member: FeaturedMember,
        bolt_group: BoltGroup,
        plate: Plate,
        weld: Weld,
        input: EndPlateInput,
    ) -> DesignResult<Self> {
        let d_i = bolt_group.d_hp + 2.0 * input.a_ev_e;
        let a_eh_e = (plate.b_i() - bolt_group.d_hg) / 2.0;
        let gap = plate.t_i();

        let mut detailing = DetailingChecks::new();
        check_plate_layout(
            &mut detailing,
            ConnectionKind::EndPlate.code(),
            &member,
            &bolt_group,
            &PlateLayout {
                a: input.a,
                a_ev_e: input.a_ev_e,
                a_eh_e,
                d_i,
            },
        );

        let n_b = bolt_group.n_b;
        let d_f = bolt_group.bolt.d_f();
        let t_i = plate.t_i();
        let f_ui = plate.f_ui;

        let v_b = bolt_group
            .phi_v_df
            .min(Plate::phi_v_bb(n_b, d_f, t_i, f_ui))
            .min(Plate::phi_v_bt(n_b, bolt_group.a_ey(input.a_ev_e), t_i, f_ui));
        let v_d = plate.phi_v_bs(bolt_group.l_ty(a_eh_e), bolt_group.l_vy(input.a_ev_e)) * 2.0;

        let modes = vec![
            FailureMode::new("V_a", "Weld", weld.v_a(d_i), true),
            FailureMode::new("V_b", "Bolt group", v_b, true),
            FailureMode::new("V_c", "Plate shear", plate.phi_v_v(d_i) * 2.0, true),
            FailureMode::new("V_d", "Plate block shear", v_d, true),
            FailureMode::new("V_e", "Member web shear at plate", member.phi_v_wp(d_i), true),
            FailureMode::new("V_f", "Coped member web shear", member.phi_v_ws, true),
            FailureMode::new("V_g", "Coped member bending", member.phi_v_cm(gap), false),
        ];

        tracing::debug!(
            member = %member.name,
            d_i,
            detailing_ok = detailing.ok(),
            "end plate connection derived"
        );

        Ok(EndPlateConnection {
            input,
            member,
            bolt_group,
            plate,
            weld,
            d_i,
            a_eh_e,
            gap,
            detailing,
            modes,
        })
    }

    /// Member, cope and layout keys plus compact `bolt_group`, `plate` and
    /// `weld` records; missing components take their defaults
    pub fn from_params(params: &ParamMap) -> DesignResult<Self> {
        let member = FeaturedMember::from_params(params)?;
        let (bolt_group, plate, weld) = components_from_params(params)?;
        Self::new(member, bolt_group, plate, weld, EndPlateInput::from_params(params)?)
    }
}

impl Connection for EndPlateConnection {
    fn kind(&self) -> ConnectionKind {
        ConnectionKind::EndPlate
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

impl Report for EndPlateConnection {
    fn results(&self) -> ResultMap {
        connection_results(
            self,
            &[
                ("a", self.input.a),
                ("a_ev_e", self.input.a_ev_e),
                ("a_eh_e", self.a_eh_e),
                ("d_i", self.d_i),
                ("gap", self.gap),
            ],
        )
    }

    fn default_sig_figs(&self) -> u32 {
        4
    }
}

// ============================================================================
// TESTS
// ============================================================================
