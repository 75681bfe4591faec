//! Rostering domain models.
//!
//! Core data types for the monthly shift roster: the closed shift-code
//! enumeration, staff members, the period date axis, and staffing
//! configuration. The mutable scheduling state built from these types
//! lives in [`crate::session`].

mod calendar;
mod person;
mod settings;
mod shift;

pub use calendar::{build_period, period_range_label, DateEntry, BUFFER_DAYS};
pub use person::{Person, PersonId};
pub use settings::{StaffingRequirements, UnitSettings};
pub use shift::{MainShift, Shift};
