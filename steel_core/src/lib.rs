//! # steel_core - AS 4100 Steel Capacity Engine
//!
//! `steel_core` evaluates limit-state capacities of structural steel
//! cross-sections, members and simple shear connections to AS 4100. Inputs
//! arrive as flat parameter maps and results leave as flat, ordered result
//! maps, so a section-library row or a JSON document can drive any entity.
//!
//! ## Design Philosophy
//!
//! - **Derived at construction**: every entity computes all of its values once
//!   from immutable inputs; changing an input means building a new entity
//! - **JSON-First**: inputs, results and errors implement Serialize
//! - **Rich Errors**: structured error types naming the offending value
//! - **Full precision inside**: rounding happens once, at the report boundary
//!
//! ## Quick Start
//!
//! ```rust
//! use steel_core::member::SteelMember;
//! use steel_core::params::ParamMap;
//! use steel_core::report::Report;
//!
//! let params = ParamMap::new()
//!     .with("section", "460UB82.1")
//!     .with("sec_type", "UB")
//!     .with("d", 460.0)
//!     .with("b", 191.0)
//!     .with("t_f", 16.0)
//!     .with("t_w", 9.9)
//!     .with("r_1", 11.4)
//!     .with("grade", "GR300")
//!     .with("l_eb", 4000.0);
//!
//! let member = SteelMember::from_params(&params).unwrap();
//! assert!(member.phi_m_bx.0 < member.phi_m_sx.0);
//!
//! let results = member.report();
//! assert_eq!(results.text("name"), Some("460UB82.1 (GR300)"));
//! ```
//!
//! ## Modules
//!
//! - [`shapes`] - gross section properties per section family, web copes
//! - [`materials`] - yield and tensile strength per product standard
//! - [`slenderness`] - plate element classification and effective properties
//! - [`member`] - tension, compression, bending and shear capacities
//! - [`connections`] - bolts, welds, plates and end/side plate connections
//! - [`params`] / [`report`] - parameter and result contracts
//! - [`schedule`] / [`file_io`] - design schedules and their files
//! - [`units`] - force and moment newtypes
//! - [`errors`] - structured error types

pub mod connections;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod materials;
pub mod member;
pub mod params;
pub mod report;
pub mod schedule;
pub mod shapes;
pub mod slenderness;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use connections::{Capacity, Connection, EndPlateConnection, SidePlateConnection};
pub use errors::{DesignError, DesignResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_schedule, save_schedule, FileLock};
pub use member::{SteelMember, SteelSection};
pub use params::ParamMap;
pub use report::{Report, ResultMap, ResultValue};
pub use schedule::{DesignSchedule, DesignSettings, EntityKind, ScheduleItem};
