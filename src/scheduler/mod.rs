//! Auto-fill scheduling.
//!
//! A deterministic-given-seed greedy pass that completes a month's
//! schedule around existing manual entries. This is not an optimizing
//! solver: it never guarantees a feasible staffing exists, only that
//! the documented fill/trim/backfill procedure runs to completion and
//! never overwrites protected cells.

mod autofill;

pub use autofill::{AutoFill, FillSummary};
