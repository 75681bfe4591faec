//! Nurse rostering engine for a single hospital unit.
//!
//! Builds and maintains a monthly shift roster: a date axis running from
//! the 21st of the prior month through the 20th of the target month with
//! a seven-day look-back buffer, a cell ledger of shift codes, transition
//! and consecutive-run eligibility rules, and a greedy auto-fill pass
//! that completes the month around manual entries without ever touching
//! locked, leave, or pre-filled cells.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Shift`, `MainShift`, `Person`,
//!   the period builder, `StaffingRequirements`, `UnitSettings`
//! - **`session`**: `RosterSession`, the mutable scheduling state with
//!   centrally enforced lock/leave protection
//! - **`rules`**: Shift-transition and run-cap eligibility predicates
//! - **`scheduler`**: The seeded greedy auto-fill pass
//! - **`stats`**: Per-person totals, staffing status, advisory flags
//! - **`store`**: Snapshot capture/apply, JSON export/import, the
//!   `RosterStore` persistence seam
//! - **`validation`**: Structural checks on imported snapshots
//!
//! # References
//!
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"
//! - Cheang et al. (2003), "Nurse Rostering Problems — a Bibliographic Survey"

pub mod models;
pub mod rules;
pub mod scheduler;
pub mod session;
pub mod stats;
pub mod store;
pub mod validation;
