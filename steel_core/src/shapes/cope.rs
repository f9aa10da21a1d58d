//! Web copes at a connected beam end.
//!
//! A single web cope (SWC) removes the top flange and leaves a tee; a double
//! web cope (DWC) removes both flanges and leaves the web as a plate.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{SectionGeometry, SectionInput, SectionType};
use crate::errors::{DesignError, DesignResult};
use crate::params::{ApplyParams, ParamMap};

/// Cope applied to a beam end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CopeType {
    /// No features
    #[default]
    Uncoped,
    /// Single (top) web cope
    SingleWebCope,
    /// Double (top and bottom) web cope
    DoubleWebCope,
}

impl CopeType {
    pub const ALL: [CopeType; 3] = [CopeType::Uncoped, CopeType::SingleWebCope, CopeType::DoubleWebCope];

    /// Feature code used in member names and parameter maps
    pub fn code(&self) -> &'static str {
        match self {
            CopeType::Uncoped => "O",
            CopeType::SingleWebCope => "SWC",
            CopeType::DoubleWebCope => "DWC",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CopeType::Uncoped => "Uncoped",
            CopeType::SingleWebCope => "Single web cope",
            CopeType::DoubleWebCope => "Double web cope",
        }
    }

    pub fn is_coped(&self) -> bool {
        !matches!(self, CopeType::Uncoped)
    }
}

impl FromStr for CopeType {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "O" => Ok(CopeType::Uncoped),
            "SWC" => Ok(CopeType::SingleWebCope),
            "DWC" => Ok(CopeType::DoubleWebCope),
            other => Err(DesignError::unknown_variant("cope feature", other)),
        }
    }
}

impl std::fmt::Display for CopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Cope dimensions (mm)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopeInput {
    pub features: CopeType,
    /// Top cope depth
    pub d_ct: f64,
    /// Bottom cope depth
    pub d_cb: f64,
    /// Cope length
    #[serde(rename = "L_c")]
    pub l_c: f64,
    /// Cope corner radius
    pub r_c: f64,
}

impl CopeInput {
    pub fn uncoped() -> Self {
        Self::default()
    }

    pub fn single(d_ct: f64, l_c: f64, r_c: f64) -> Self {
        CopeInput {
            features: CopeType::SingleWebCope,
            d_ct,
            l_c,
            r_c,
            ..Default::default()
        }
    }

    pub fn double(d_ct: f64, d_cb: f64, l_c: f64, r_c: f64) -> Self {
        CopeInput {
            features: CopeType::DoubleWebCope,
            d_ct,
            d_cb,
            l_c,
            r_c,
        }
    }
}

impl ApplyParams for CopeInput {
    fn apply_params(&mut self, params: &ParamMap) -> DesignResult<()> {
        params.apply_parsed("features", &mut self.features)?;
        params.apply_number("d_ct", &mut self.d_ct)?;
        params.apply_number("d_cb", &mut self.d_cb)?;
        params.apply_number("L_c", &mut self.l_c)?;
        params.apply_number("r_c", &mut self.r_c)?;
        Ok(())
    }
}

/// Section left at a coped beam end.
///
/// Uncoped sections come back unchanged. Only UB and UC sections can be
/// coped; the coped designation is the original with the feature code
/// appended.
pub fn apply_cope(section: &SectionGeometry, cope: &CopeInput) -> DesignResult<SectionGeometry> {
    if !cope.features.is_coped() {
        return Ok(section.clone());
    }
    if cope.d_ct < 0.0 || cope.d_cb < 0.0 {
        return Err(DesignError::invalid_input(
            "d_ct",
            format!("{} / {}", cope.d_ct, cope.d_cb),
            "Cope depths cannot be negative",
        ));
    }

    let mut input: SectionInput = section.input.clone();
    input.section = format!("{} {}", section.section, cope.features);

    match (cope.features, section.sec_type) {
        (CopeType::SingleWebCope, SectionType::UB | SectionType::UC) => {
            input.sec_type = Some(if section.sec_type == SectionType::UB {
                SectionType::BT
            } else {
                SectionType::CT
            });
            input.d = Some(section.d - cope.d_ct);
        }
        (CopeType::DoubleWebCope, SectionType::UB | SectionType::UC) => {
            input.sec_type = Some(SectionType::RectPlate);
            input.b = Some(section.t_w);
            input.d = Some(section.d - cope.d_ct - cope.d_cb);
        }
        (_, other) => return Err(DesignError::unknown_variant("coped section family", other.code())),
    }

    tracing::debug!(section = %section.section, cope = %cope.features, d_ct = cope.d_ct, "applying cope");
    SectionGeometry::new(input)
}
