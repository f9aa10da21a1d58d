//! # Connections
//!
//! Simple shear connections built from bolts, welds, plates and a (possibly
//! coped) supported member.
//!
//! ## Components
//!
//! - [`Bolt`] / [`BoltGroup`] - bolt capacities and two-column group geometry
//! - [`Weld`] - fillet weld capacity per unit length
//! - [`Plate`] - connection plate shear, bending, bearing and block shear
//! - [`FeaturedMember`] - supported member with optional web cope
//!
//! ## Topologies
//!
//! | Code | Type | Modes |
//! |------|------|-------|
//! | FEP  | [`EndPlateConnection`]  | `V_a` .. `V_g` |
//! | WSP  | [`SidePlateConnection`] | `V_a` .. `V_h` |
//!
//! Every topology runs the same sequence: detailing checks, then a fixed-order
//! list of [`FailureMode`]s, then the minimum. A mode that does not apply to
//! the configuration is [`Capacity::NotApplicable`] and never governs.
//!
//! ## Example
//!
//! ```rust
//! use steel_core::connections::{Capacity, governing};
//!
//! let caps = [Capacity::kn(310.0), Capacity::NotApplicable, Capacity::kn(275.5)];
//! assert_eq!(governing(caps), Capacity::kn(275.5));
//! assert_eq!(governing([Capacity::NotApplicable]), Capacity::NotApplicable);
//! ```

pub mod bolt;
pub mod end_plate;
pub mod featured_member;
pub mod plate;
pub mod side_plate;
pub mod weld;

pub use bolt::{Bolt, BoltCategory, BoltGroup, BoltGroupInput, BoltInput};
pub use end_plate::{EndPlateConnection, EndPlateInput};
pub use featured_member::FeaturedMember;
pub use plate::{Plate, PlateInput, PlateKind};
pub use side_plate::{SidePlateConnection, SidePlateInput};
pub use weld::{Weld, WeldCategory, WeldClass, WeldInput, WeldType};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{DesignError, DesignResult};
use crate::params::ParamMap;
use crate::report::{ResultMap, ResultValue};
use crate::units::Kilonewtons;

// ============================================================================
// Capacity
// ============================================================================

/// A failure-mode capacity, or a mode that does not apply.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Capacity {
    Value(Kilonewtons),
    NotApplicable,
}

impl Capacity {
    pub fn kn(value: f64) -> Self {
        Capacity::Value(Kilonewtons(value))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Capacity::Value(kn) => Some(kn.0),
            Capacity::NotApplicable => None,
        }
    }

    pub fn is_applicable(&self) -> bool {
        matches!(self, Capacity::Value(_))
    }
}

impl From<Kilonewtons> for Capacity {
    fn from(kn: Kilonewtons) -> Self {
        Capacity::Value(kn)
    }
}

impl From<Capacity> for ResultValue {
    fn from(c: Capacity) -> Self {
        match c {
            Capacity::Value(kn) => ResultValue::Number(kn.0),
            Capacity::NotApplicable => ResultValue::NotApplicable,
        }
    }
}

impl fmt::Display for Capacity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capacity::Value(kn) => write!(f, "{} kN", kn.0),
            Capacity::NotApplicable => write!(f, "n/a"),
        }
    }
}

/// Minimum of the applicable capacities. A NaN capacity is a failed
/// computation and poisons the result rather than being skipped.
pub fn governing(capacities: impl IntoIterator<Item = Capacity>) -> Capacity {
    capacities
        .into_iter()
        .filter_map(|c| c.value())
        .fold(None, |min: Option<f64>, v| {
            Some(match min {
                None => v,
                Some(m) if m.is_nan() || v.is_nan() => f64::NAN,
                Some(m) => m.min(v),
            })
        })
        .map_or(Capacity::NotApplicable, |v| {
            if v.is_nan() {
                tracing::warn!("capacity evaluated to NaN");
            }
            Capacity::kn(v)
        })
}

// ============================================================================
// Failure modes
// ============================================================================

/// One independently computed failure mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureMode {
    /// Result key, e.g. "V_a"
    pub code: String,
    pub description: String,
    pub capacity: Capacity,
    /// Counted in the ASI handbook design capacity
    pub asi: bool,
}

impl FailureMode {
    pub fn new(code: &str, description: &str, capacity: impl Into<Capacity>, asi: bool) -> Self {
        FailureMode {
            code: code.to_string(),
            description: description.to_string(),
            capacity: capacity.into(),
            asi,
        }
    }
}

// ============================================================================
// Detailing
// ============================================================================

/// Geometric detailing rule for a plate connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetailingRule {
    /// Top cope depth must equal a - a_ev_e
    CopeAlignment,
    VerticalEdgeDistance,
    HorizontalEdgeDistance,
    /// Plate depth at least half the member depth
    MinimumPlateDepth,
    /// Top bolt row below the top flange
    TopBoltClearOfFlange,
    /// Plate bottom above the bottom flange
    PlateWithinWeb,
    MaximumPlateDepth,
    /// Fillet leg at least 0.75 t_i (side plates)
    MinimumWeldSize,
}

impl DetailingRule {
    pub fn code(&self) -> &'static str {
        match self {
            DetailingRule::CopeAlignment => "cope_alignment",
            DetailingRule::VerticalEdgeDistance => "vertical_edge_distance",
            DetailingRule::HorizontalEdgeDistance => "horizontal_edge_distance",
            DetailingRule::MinimumPlateDepth => "minimum_plate_depth",
            DetailingRule::TopBoltClearOfFlange => "top_bolt_clear_of_flange",
            DetailingRule::PlateWithinWeb => "plate_within_web",
            DetailingRule::MaximumPlateDepth => "maximum_plate_depth",
            DetailingRule::MinimumWeldSize => "minimum_weld_size",
        }
    }
}

impl fmt::Display for DetailingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Outcome of the detailing checks. Failures are only ever added.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailingChecks {
    pub failures: Vec<DetailingRule>,
}

impl DetailingChecks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `rule` as failed when `failed` holds
    pub fn check(&mut self, rule: DetailingRule, failed: bool, connection: &str) {
        if failed && !self.failures.contains(&rule) {
            tracing::warn!(connection, rule = %rule, "detailing check failed");
            self.failures.push(rule);
        }
    }

    pub fn ok(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, rule: DetailingRule) -> bool {
        self.failures.contains(&rule)
    }
}

/// Detailing rules shared by end and side plates
pub(crate) struct PlateLayout {
    pub a: f64,
    pub a_ev_e: f64,
    pub a_eh_e: f64,
    pub d_i: f64,
}

pub(crate) fn check_plate_layout(
    checks: &mut DetailingChecks,
    connection: &str,
    member: &FeaturedMember,
    bolt_group: &BoltGroup,
    layout: &PlateLayout,
) {
    let PlateLayout { a, a_ev_e, a_eh_e, d_i } = *layout;
    let unfeatured = &member.unfeatured.section.geom;
    let a_e_min = bolt_group.bolt.a_e_min;

    checks.check(
        DetailingRule::CopeAlignment,
        member.is_coped() && (member.cope.d_ct - (a - a_ev_e)).abs() > 1e-9,
        connection,
    );
    checks.check(DetailingRule::VerticalEdgeDistance, a_ev_e < a_e_min, connection);
    checks.check(DetailingRule::HorizontalEdgeDistance, a_eh_e < a_e_min, connection);
    checks.check(DetailingRule::MinimumPlateDepth, d_i < 0.5 * unfeatured.d, connection);
    checks.check(DetailingRule::TopBoltClearOfFlange, a - a_ev_e < unfeatured.t_f, connection);
    checks.check(
        DetailingRule::PlateWithinWeb,
        a - a_ev_e + d_i > unfeatured.d - unfeatured.t_f,
        connection,
    );
    let d_i_max = (unfeatured.d - a + a_ev_e).min(member.d());
    checks.check(DetailingRule::MaximumPlateDepth, d_i > d_i_max, connection);
}

// ============================================================================
// Connection contract
// ============================================================================

/// Connection topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionKind {
    /// Flexible end plate
    EndPlate,
    /// Web side plate
    SidePlate,
}

impl ConnectionKind {
    pub const ALL: [ConnectionKind; 2] = [ConnectionKind::EndPlate, ConnectionKind::SidePlate];

    pub fn code(&self) -> &'static str {
        match self {
            ConnectionKind::EndPlate => "FEP",
            ConnectionKind::SidePlate => "WSP",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConnectionKind::EndPlate => "Flexible end plate",
            ConnectionKind::SidePlate => "Web side plate",
        }
    }
}

impl FromStr for ConnectionKind {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConnectionKind::ALL
            .iter()
            .copied()
            .find(|k| k.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DesignError::unknown_variant("connection type", s))
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Behaviour shared by every connection topology
pub trait Connection {
    fn kind(&self) -> ConnectionKind;
    fn featured_member(&self) -> &FeaturedMember;
    fn bolt_group(&self) -> &BoltGroup;
    fn plate(&self) -> &Plate;
    fn weld(&self) -> &Weld;
    /// Failure modes in declaration order
    fn modes(&self) -> &[FailureMode];
    fn detailing(&self) -> &DetailingChecks;

    fn detailing_ok(&self) -> bool {
        self.detailing().ok()
    }

    /// Design capacity over the modes the ASI handbook counts
    fn v_des_asi(&self) -> Capacity {
        governing(self.modes().iter().filter(|m| m.asi).map(|m| m.capacity))
    }

    /// Design capacity over every applicable mode
    fn v_des_all(&self) -> Capacity {
        governing(self.modes().iter().map(|m| m.capacity))
    }

    /// First mode whose capacity equals the overall design capacity
    fn governing_mode(&self) -> Option<&FailureMode> {
        let v_des = self.v_des_all();
        if !v_des.is_applicable() {
            return None;
        }
        self.modes().iter().find(|m| m.capacity == v_des)
    }

    fn mode(&self, code: &str) -> Option<&FailureMode> {
        self.modes().iter().find(|m| m.code == code)
    }

    fn long_name(&self) -> String {
        format!(
            "{}, {}, {}, {}",
            self.featured_member().name,
            self.bolt_group().name,
            self.plate().name,
            self.weld().name
        )
    }

    fn short_name(&self, id: &str) -> String {
        format!("{} {}", self.kind().code(), id)
    }
}

/// Report rows common to every topology; `extra` lists layout values
pub(crate) fn connection_results<C: Connection + ?Sized>(conn: &C, extra: &[(&str, f64)]) -> ResultMap {
    let mut r = ResultMap::new();
    r.insert("name", conn.long_name());
    r.insert("conn_type", conn.kind().code());
    r.insert("member", conn.featured_member().name.as_str());
    r.insert("bolt_group", conn.bolt_group().name.as_str());
    r.insert("plate", conn.plate().name.as_str());
    r.insert("weld", conn.weld().name.as_str());
    for (key, value) in extra {
        r.insert(*key, *value);
    }
    r.insert("detailing_OK", conn.detailing_ok());
    let failures: Vec<&str> = conn.detailing().failures.iter().map(|f| f.code()).collect();
    r.insert("detailing_failures", failures.join(", "));
    for mode in conn.modes() {
        r.insert(mode.code.as_str(), mode.capacity);
    }
    r.insert("V_des_ASI", conn.v_des_asi());
    r.insert("V_des_all", conn.v_des_all());
    match conn.governing_mode() {
        Some(mode) => r.insert("govern_cap", mode.code.as_str()),
        None => r.insert("govern_cap", ResultValue::NotApplicable),
    }
    r
}

/// Bolt group, plate and weld stored as compact records under `bolt_group`,
/// `plate` and `weld`; an absent record takes the component defaults
pub(crate) fn components_from_params(params: &ParamMap) -> DesignResult<(BoltGroup, Plate, Weld)> {
    let bolt_group = match compact_param(params, "bolt_group", BoltGroup::from_compact)? {
        Some(bg) => bg,
        None => BoltGroup::new(BoltGroupInput::default())?,
    };
    let plate = match compact_param(params, "plate", Plate::from_compact)? {
        Some(p) => p,
        None => Plate::new(PlateInput::default())?,
    };
    let weld = match compact_param(params, "weld", Weld::from_compact)? {
        Some(w) => w,
        None => Weld::new(WeldInput::default())?,
    };
    Ok((bolt_group, plate, weld))
}

/// Read a compact component record stored under `key`
fn compact_param<T>(
    params: &ParamMap,
    key: &str,
    parse: impl FnOnce(&str) -> DesignResult<T>,
) -> DesignResult<Option<T>> {
    match params.text(key)? {
        Some(compact) => parse(&compact).map(Some),
        None => Ok(None),
    }
}

// ============================================================================
// TESTS
// ============================================================================
