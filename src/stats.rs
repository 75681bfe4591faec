//! Roster statistics and advisory checks.
//!
//! Computed fresh from the session state after every mutation; nothing
//! here blocks an edit. The pass reports, per editable day, realized
//! headcount against the staffing requirements, and per person the
//! worked/off totals for the period.
//!
//! # Measures
//!
//! | Measure | Definition |
//! |---------|-----------|
//! | Days worked | Effective work shifts (D/E/N/OUT/FLOW) on editable days |
//! | Days off | Effective OFF or bereavement, including leave days |
//! | Staffing status | Realized vs required headcount per staffed shift |
//! | Leader coverage | A leader effectively on the shift (day also via OUT) |
//! | Cell flags | Run-cap overflow and illegal transitions, per cell |

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::NaiveDate;

use crate::models::{PersonId, Shift, StaffingRequirements};
use crate::rules::{forbidden_transition, run_cap, run_length_before};
use crate::session::RosterSession;

/// Realized headcount against the requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffingStatus {
    /// Fewer people than required.
    Short,
    /// Exactly the required headcount.
    Exact,
    /// More people than required.
    Over,
}

impl StaffingStatus {
    /// Classifies a realized headcount against a requirement.
    pub fn classify(actual: u32, required: u32) -> Self {
        match actual.cmp(&required) {
            Ordering::Less => StaffingStatus::Short,
            Ordering::Equal => StaffingStatus::Exact,
            Ordering::Greater => StaffingStatus::Over,
        }
    }
}

/// Worked/off totals for one person over the editable days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersonTotals {
    /// Effective work shifts.
    pub days_worked: u32,
    /// Effective OFF or bereavement days (leave included). Empty cells
    /// count neither way.
    pub days_off: u32,
}

/// One staffed shift's headcount on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftStaffing {
    /// The staffed shift (day, evening, or night).
    pub shift: Shift,
    /// Headcount whose effective shift equals it.
    pub actual: u32,
    /// Required headcount.
    pub required: u32,
    /// Realized-vs-required classification.
    pub status: StaffingStatus,
    /// Whether a leader covers the shift. Day coverage is also
    /// satisfied by a leader on external duty.
    pub leader_covered: bool,
}

/// Per-day staffing summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayStaffing {
    /// Axis index of the day.
    pub day_idx: usize,
    /// Calendar date.
    pub date: NaiveDate,
    /// One entry per staffed shift, in day, evening, night order.
    pub shifts: [ShiftStaffing; 3],
    /// People effectively off (OFF, bereavement, or on leave).
    pub total_off: u32,
}

/// Advisory rule flags for one displayed cell.
///
/// Recomputed per cell from the surrounding schedule; both flags stay
/// clear on non-work cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellFlags {
    /// The run of work days through this cell exceeds the cap.
    pub over_run: bool,
    /// Illegal transition from the prior day's effective shift.
    pub forbidden_transition: bool,
}

impl CellFlags {
    /// Whether no advisory rule is breached.
    pub fn is_clean(&self) -> bool {
        !self.over_run && !self.forbidden_transition
    }
}

/// Advisory flags for a cell, from its effective shift and neighbors.
pub fn cell_flags(session: &RosterSession, person: PersonId, day_idx: usize) -> CellFlags {
    let shift = session.effective_shift(person, day_idx);
    if !shift.is_work() {
        return CellFlags::default();
    }
    let prev = if day_idx == 0 {
        Shift::Off
    } else {
        session.effective_shift(person, day_idx - 1)
    };
    CellFlags {
        over_run: run_length_before(session, person, day_idx) >= run_cap(shift),
        forbidden_transition: forbidden_transition(prev, shift),
    }
}

/// Statistics over the editable days of a session.
#[derive(Debug, Clone, Default)]
pub struct RosterStats {
    /// Worked/off totals per roster member.
    pub totals: HashMap<PersonId, PersonTotals>,
    /// Staffing summary per editable day.
    pub days: Vec<DayStaffing>,
}

impl RosterStats {
    /// Computes the statistics pass over the editable days.
    ///
    /// Effective shifts throughout, so a person on leave counts as off
    /// regardless of the code underneath and never toward staffing.
    pub fn calculate(session: &RosterSession, requirements: &StaffingRequirements) -> Self {
        let mut totals: HashMap<PersonId, PersonTotals> = session
            .roster()
            .iter()
            .map(|p| (p.id, PersonTotals::default()))
            .collect();
        let mut days = Vec::with_capacity(session.editable_indices().len());

        for idx in session.editable_indices() {
            let mut total_off = 0;
            for person in session.roster() {
                let shift = session.effective_shift(person.id, idx);
                let entry = totals.entry(person.id).or_default();
                if shift.is_work() {
                    entry.days_worked += 1;
                } else if session.raw_shift(person.id, idx).is_some()
                    || session.is_on_leave(person.id, idx)
                {
                    entry.days_off += 1;
                    total_off += 1;
                }
            }

            let shifts = Shift::STAFFED.map(|shift| {
                let actual = session.staffed_count(idx, shift) as u32;
                ShiftStaffing {
                    shift,
                    actual,
                    required: requirements.required(shift),
                    status: StaffingStatus::classify(actual, requirements.required(shift)),
                    leader_covered: leader_covers(session, idx, shift),
                }
            });
            days.push(DayStaffing {
                day_idx: idx,
                date: session.dates()[idx].date,
                shifts,
                total_off,
            });
        }

        Self { totals, days }
    }

    /// Totals for one person; zeroes for someone off the roster.
    pub fn person_totals(&self, person: PersonId) -> PersonTotals {
        self.totals.get(&person).copied().unwrap_or_default()
    }
}

/// Whether a leader covers `shift` on a day.
///
/// A leader on external duty also covers the day shift (the charge role
/// is filled from outside the unit).
fn leader_covers(session: &RosterSession, day_idx: usize, shift: Shift) -> bool {
    session.roster().iter().filter(|p| p.is_leader).any(|p| {
        let effective = session.effective_shift(p.id, day_idx);
        effective == shift || (shift == Shift::Day && effective == Shift::External)
    })
}
