//! Shift code enumeration.
//!
//! Replaces the stringly-typed shift tags of ad hoc rosters with a closed
//! enum, so rule evaluation cannot silently mis-handle an unknown code.
//!
//! # Codes
//!
//! | Code | Variant | Working? |
//! |------|---------|----------|
//! | D | `Day` | yes |
//! | E | `Evening` | yes |
//! | N | `Night` | yes |
//! | OUT | `External` | yes (off-unit duty) |
//! | FLOW | `Flow` | yes (float pool) |
//! | OFF | `Off` | no |
//! | BRV | `Bereavement` | no |

use serde::{Deserialize, Serialize};

/// A shift code assigned to one person on one day.
///
/// Absence of a ledger entry means the cell is empty, which evaluates
/// as [`Shift::Off`] for rule purposes but is distinct for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    /// Day shift (D).
    #[serde(rename = "D")]
    Day,
    /// Evening shift (E).
    #[serde(rename = "E")]
    Evening,
    /// Night shift (N).
    #[serde(rename = "N")]
    Night,
    /// External duty (OUT): working, but off the unit.
    #[serde(rename = "OUT")]
    External,
    /// Float-pool duty (FLOW): working wherever coverage is short.
    #[serde(rename = "FLOW")]
    Flow,
    /// Scheduled day off (OFF).
    #[serde(rename = "OFF")]
    Off,
    /// Bereavement leave (BRV): counts as a day off.
    #[serde(rename = "BRV")]
    Bereavement,
}

impl Shift {
    /// Whether this code counts as working for run-length and
    /// statistics purposes.
    ///
    /// The canonical work set is {D, E, N, OUT, FLOW}, applied uniformly.
    #[inline]
    pub fn is_work(self) -> bool {
        match self {
            Shift::Day | Shift::Evening | Shift::Night | Shift::External | Shift::Flow => true,
            Shift::Off | Shift::Bereavement => false,
        }
    }

    /// Whether this is the night shift.
    #[inline]
    pub fn is_night(self) -> bool {
        self == Shift::Night
    }

    /// Whether this shift is counted against a staffing requirement.
    ///
    /// Only the three on-unit shifts have headcount targets.
    #[inline]
    pub fn is_staffed(self) -> bool {
        matches!(self, Shift::Day | Shift::Evening | Shift::Night)
    }

    /// The wire/display code for this shift.
    pub fn code(self) -> &'static str {
        match self {
            Shift::Day => "D",
            Shift::Evening => "E",
            Shift::Night => "N",
            Shift::External => "OUT",
            Shift::Flow => "FLOW",
            Shift::Off => "OFF",
            Shift::Bereavement => "BRV",
        }
    }

    /// The three shifts with per-day staffing requirements, in
    /// evaluation order.
    pub const STAFFED: [Shift; 3] = [Shift::Day, Shift::Evening, Shift::Night];
}

impl std::fmt::Display for Shift {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A person's declared home shift.
///
/// `Flow` means no fixed shift: the person is scheduled opportunistically
/// by the shortage-backfill step instead of the primary fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainShift {
    /// Home shift is day.
    #[serde(rename = "D")]
    Day,
    /// Home shift is evening.
    #[serde(rename = "E")]
    Evening,
    /// Home shift is night.
    #[serde(rename = "N")]
    Night,
    /// No home shift; floats to cover shortages.
    #[serde(rename = "FLOW")]
    Flow,
}

impl MainShift {
    /// The ledger shift code written when this main shift is assigned.
    pub fn to_shift(self) -> Shift {
        match self {
            MainShift::Day => Shift::Day,
            MainShift::Evening => Shift::Evening,
            MainShift::Night => Shift::Night,
            MainShift::Flow => Shift::Flow,
        }
    }

    /// Whether this person belongs to the float pool.
    #[inline]
    pub fn is_flow(self) -> bool {
        self == MainShift::Flow
    }
}
