//! # Design Schedules
//!
//! The `DesignSchedule` struct is the root container for a set of design
//! checks. Schedules serialize to `.sds` (steel design schedule) files as
//! human-readable JSON and hold parameter records only: every result is
//! re-derived on evaluation.
//!
//! ## Structure
//!
//! ```text
//! DesignSchedule
//! ├── meta: ScheduleMetadata (version, engineer, job info, timestamps)
//! ├── settings: DesignSettings (design standard, output precision)
//! └── items: HashMap<Uuid, ScheduleItem> (label + entity kind + parameters)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use steel_core::params::ParamMap;
//! use steel_core::schedule::{DesignSchedule, EntityKind, ScheduleItem};
//!
//! let mut schedule = DesignSchedule::new("Jane Engineer", "25-042", "Level 2 transfer beams");
//! let id = schedule.add_item(ScheduleItem::new(
//!     "W-1",
//!     EntityKind::Weld,
//!     ParamMap::new().with("t_w", 8.0),
//! ));
//!
//! let outcomes = schedule.evaluate();
//! assert_eq!(outcomes[0].id, id);
//! let results = outcomes[0].result.as_ref().unwrap();
//! assert_eq!(results.text("name"), Some("8mm CFW SP E48XX"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::connections::{Bolt, BoltGroup, EndPlateConnection, FeaturedMember, Plate, SidePlateConnection, Weld};
use crate::errors::{DesignError, DesignResult};
use crate::member::SteelMember;
use crate::params::ParamMap;
use crate::report::{Report, ResultMap};
use crate::shapes::SectionGeometry;

/// Current schema version for .sds files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root schedule container.
///
/// Items are stored in a flat UUID-keyed map; evaluation and listing order
/// is by label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignSchedule {
    pub meta: ScheduleMetadata,
    pub settings: DesignSettings,
    pub items: HashMap<Uuid, ScheduleItem>,
}

impl DesignSchedule {
    /// Create a new empty schedule.
    ///
    /// ```rust
    /// use steel_core::schedule::DesignSchedule;
    ///
    /// let schedule = DesignSchedule::new("John Doe", "25-001", "Carpark extension");
    /// assert_eq!(schedule.meta.engineer, "John Doe");
    /// assert_eq!(schedule.settings.standard, "AS 4100:2020");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, description: impl Into<String>) -> Self {
        let now = Utc::now();
        DesignSchedule {
            meta: ScheduleMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                description: description.into(),
                created: now,
                modified: now,
            },
            settings: DesignSettings::default(),
            items: HashMap::new(),
        }
    }

    /// Add an item and return the UUID assigned to it.
    pub fn add_item(&mut self, item: ScheduleItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    pub fn remove_item(&mut self, id: &Uuid) -> Option<ScheduleItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    pub fn get_item(&self, id: &Uuid) -> Option<&ScheduleItem> {
        self.items.get(id)
    }

    /// Mutable access; marks the schedule as modified when the item exists.
    pub fn get_item_mut(&mut self, id: &Uuid) -> Option<&mut ScheduleItem> {
        if self.items.contains_key(id) {
            self.meta.modified = Utc::now();
            self.items.get_mut(id)
        } else {
            None
        }
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Items sorted by label, then id
    pub fn ordered_items(&self) -> Vec<(&Uuid, &ScheduleItem)> {
        let mut items: Vec<_> = self.items.iter().collect();
        items.sort_by(|a, b| a.1.label.cmp(&b.1.label).then(a.0.cmp(b.0)));
        items
    }

    /// Evaluate every item in label order.
    ///
    /// A failing item does not stop the others; its error is kept in the
    /// outcome.
    pub fn evaluate(&self) -> Vec<ItemOutcome> {
        self.ordered_items()
            .into_iter()
            .map(|(id, item)| {
                let result = item.evaluate(&self.settings);
                if let Err(e) = &result {
                    tracing::warn!(label = %item.label, kind = %item.kind, error = %e, "schedule item failed");
                }
                ItemOutcome {
                    id: *id,
                    label: item.label.clone(),
                    kind: item.kind,
                    result,
                }
            })
            .collect()
    }
}

impl Default for DesignSchedule {
    fn default() -> Self {
        DesignSchedule::new("", "", "")
    }
}

/// Schedule metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    pub engineer: String,
    pub job_id: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// Schedule-wide design settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSettings {
    /// Design standard label printed with results
    pub standard: String,
    /// Significant figures for every item; `None` uses each entity's default
    pub sig_figs: Option<u32>,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            standard: "AS 4100:2020".to_string(),
            sig_figs: None,
        }
    }
}

/// Entity a schedule item builds from its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Section,
    Member,
    Bolt,
    BoltGroup,
    Weld,
    Plate,
    FeaturedMember,
    EndPlate,
    SidePlate,
}

impl EntityKind {
    pub const ALL: [EntityKind; 9] = [
        EntityKind::Section,
        EntityKind::Member,
        EntityKind::Bolt,
        EntityKind::BoltGroup,
        EntityKind::Weld,
        EntityKind::Plate,
        EntityKind::FeaturedMember,
        EntityKind::EndPlate,
        EntityKind::SidePlate,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            EntityKind::Section => "Section",
            EntityKind::Member => "Member",
            EntityKind::Bolt => "Bolt",
            EntityKind::BoltGroup => "BoltGroup",
            EntityKind::Weld => "Weld",
            EntityKind::Plate => "Plate",
            EntityKind::FeaturedMember => "FeaturedMember",
            EntityKind::EndPlate => "EndPlate",
            EntityKind::SidePlate => "SidePlate",
        }
    }
}

impl FromStr for EntityKind {
    type Err = DesignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .iter()
            .copied()
            .find(|k| k.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DesignError::unknown_variant("entity kind", s))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One labelled parameter record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub label: String,
    pub kind: EntityKind,
    pub params: ParamMap,
}

impl ScheduleItem {
    pub fn new(label: impl Into<String>, kind: EntityKind, params: ParamMap) -> Self {
        ScheduleItem {
            label: label.into(),
            kind,
            params,
        }
    }

    /// Build the entity and report it at the schedule precision
    pub fn evaluate(&self, settings: &DesignSettings) -> DesignResult<ResultMap> {
        tracing::debug!(label = %self.label, kind = %self.kind, "evaluating schedule item");
        let p = &self.params;
        let s = settings.sig_figs;
        Ok(match self.kind {
            EntityKind::Section => report(&SectionGeometry::from_params(p)?, s),
            EntityKind::Member => {
                let member = SteelMember::from_params(p)?;
                let mut results = report(&member.section, s);
                for (key, value) in report(&member, s).iter() {
                    results.insert(key, value.clone());
                }
                results
            }
            EntityKind::Bolt => report(&Bolt::from_params(p)?, s),
            EntityKind::BoltGroup => report(&BoltGroup::from_params(p)?, s),
            EntityKind::Weld => report(&Weld::from_params(p)?, s),
            EntityKind::Plate => report(&Plate::from_params(p)?, s),
            EntityKind::FeaturedMember => report(&FeaturedMember::from_params(p)?, s),
            EntityKind::EndPlate => report(&EndPlateConnection::from_params(p)?, s),
            EntityKind::SidePlate => report(&SidePlateConnection::from_params(p)?, s),
        })
    }
}

fn report(entity: &impl Report, sig_figs: Option<u32>) -> ResultMap {
    match sig_figs {
        Some(n) => entity.report_with(n),
        None => entity.report(),
    }
}

/// Result of evaluating one schedule item
#[derive(Debug, Clone)]
pub struct ItemOutcome {
    pub id: Uuid,
    pub label: String,
    pub kind: EntityKind,
    pub result: DesignResult<ResultMap>,
}

// ============================================================================
// TESTS
// ============================================================================
