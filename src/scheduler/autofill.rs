//! Greedy auto-fill pass.
//!
//! # Algorithm
//!
//! For every editable day, in order:
//!
//! 1. **Primary fill**: each fixed-shift person with an untouched cell
//!    gets their main shift if eligible, else OFF.
//! 2. **Surplus trim**: while a staffed shift exceeds its requirement,
//!    remove the most-worked removable holder (random perturbation
//!    breaks exact ties). Only cells this pass itself filled are
//!    removable, so manual entries and locks survive.
//! 3. **Shortage backfill**: float-pool people with empty cells cover
//!    shifts still below requirement, when the rules allow.
//! 4. **Fallback**: whatever is still empty becomes OFF.
//!
//! # Complexity
//! O(days × people) cell writes; the run scan makes rule checks
//! O(run length) each.

use std::collections::HashSet;

use rand::Rng;

use crate::models::{PersonId, Shift, StaffingRequirements};
use crate::rules::can_work_shift;
use crate::session::{CellKey, RosterSession};

/// Counters describing what one fill pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillSummary {
    /// People whose missing main shift was defaulted by majority vote.
    pub mains_defaulted: usize,
    /// Cells filled by the primary step (main shift or OFF).
    pub primary_filled: usize,
    /// Cells reassigned to OFF by the surplus trim.
    pub trimmed: usize,
    /// Cells filled from the float pool.
    pub backfilled: usize,
    /// Cells defaulted to OFF by the fallback step.
    pub fallback_off: usize,
}

/// The auto-fill scheduler.
///
/// Requirements apply uniformly to every editable day. The random
/// source only perturbs trim tie-breaks; seeding it makes the whole
/// pass deterministic.
///
/// # Example
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use ward_roster::models::{MainShift, Person, StaffingRequirements};
/// use ward_roster::scheduler::AutoFill;
/// use ward_roster::session::RosterSession;
///
/// let mut session = RosterSession::for_period(2026, 8);
/// session.add_to_roster(Person::new(1, "Chen"), MainShift::Day).unwrap();
/// session.clear_schedule();
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let summary = AutoFill::new(StaffingRequirements::new(1, 0, 0))
///     .fill(&mut session, &mut rng);
/// assert!(summary.primary_filled > 0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct AutoFill {
    requirements: StaffingRequirements,
}

impl AutoFill {
    /// Creates a scheduler for the given daily requirements.
    pub fn new(requirements: StaffingRequirements) -> Self {
        Self { requirements }
    }

    /// Runs the fill pass over every editable day.
    ///
    /// Mutates the session ledger in place. Protected cells (locked,
    /// leave, pre-filled) are never written; a day may legitimately end
    /// under- or over-staffed when protections make the target
    /// unreachable.
    pub fn fill<R: Rng>(&self, session: &mut RosterSession, rng: &mut R) -> FillSummary {
        let mut summary = FillSummary::default();
        summary.mains_defaulted = session.ensure_main_shifts();

        let ids: Vec<PersonId> = session.roster().iter().map(|p| p.id).collect();
        // Cells written by this pass; the only cells the trim may take back.
        let mut written: HashSet<CellKey> = HashSet::new();

        for idx in session.editable_indices() {
            self.primary_fill(session, &ids, idx, &mut written, &mut summary);
            self.trim_surplus(session, &ids, idx, &written, rng, &mut summary);
            self.backfill_shortage(session, &ids, idx, &mut written, &mut summary);
            self.fallback_off(session, &ids, idx, &mut written, &mut summary);
        }

        tracing::debug!(
            primary = summary.primary_filled,
            trimmed = summary.trimmed,
            backfilled = summary.backfilled,
            fallback = summary.fallback_off,
            "auto-fill pass complete"
        );
        summary
    }

    /// Step 1: give fixed-shift people their main shift where allowed.
    fn primary_fill(
        &self,
        session: &mut RosterSession,
        ids: &[PersonId],
        idx: usize,
        written: &mut HashSet<CellKey>,
        summary: &mut FillSummary,
    ) {
        for &id in ids {
            let Some(main) = session.person(id).and_then(|p| p.main_shift) else {
                continue;
            };
            if main.is_flow() || !session.cell_untouched(id, idx) {
                continue;
            }
            let wanted = main.to_shift();
            let assigned = if can_work_shift(session, id, idx, wanted) {
                wanted
            } else {
                Shift::Off
            };
            if session.auto_assign(id, idx, assigned) {
                written.insert((id, session.dates()[idx].date));
                summary.primary_filled += 1;
            }
        }
    }

    /// Step 2: take surplus staffing back down to the requirement.
    ///
    /// Candidates are ranked by workdays-so-far descending, with a
    /// small random jitter so exact ties do not always fall on the
    /// same person. Stops early when every surplus holder is locked
    /// or manually entered.
    fn trim_surplus<R: Rng>(
        &self,
        session: &mut RosterSession,
        ids: &[PersonId],
        idx: usize,
        written: &HashSet<CellKey>,
        rng: &mut R,
        summary: &mut FillSummary,
    ) {
        let date = session.dates()[idx].date;
        for shift in Shift::STAFFED {
            let required = self.requirements.required(shift) as usize;
            loop {
                let holders: Vec<PersonId> = ids
                    .iter()
                    .copied()
                    .filter(|&id| session.effective_shift(id, idx) == shift)
                    .collect();
                if holders.len() <= required {
                    break;
                }

                let mut removable: Vec<(f64, PersonId)> = holders
                    .into_iter()
                    .filter(|&id| {
                        written.contains(&(id, date)) && !session.is_locked(id, idx)
                    })
                    .map(|id| {
                        let worked = session.workdays_before(id, idx) as f64;
                        (worked + rng.random::<f64>() * 0.1, id)
                    })
                    .collect();
                if removable.is_empty() {
                    break;
                }
                removable.sort_by(|a, b| {
                    b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal)
                });

                let target = removable[0].1;
                if session.auto_overwrite(target, idx, Shift::Off) {
                    summary.trimmed += 1;
                } else {
                    break;
                }
            }
        }
    }

    /// Step 3: cover remaining shortages from the float pool.
    fn backfill_shortage(
        &self,
        session: &mut RosterSession,
        ids: &[PersonId],
        idx: usize,
        written: &mut HashSet<CellKey>,
        summary: &mut FillSummary,
    ) {
        for shift in Shift::STAFFED {
            let required = self.requirements.required(shift) as usize;
            let mut current = session.staffed_count(idx, shift);
            if current >= required {
                continue;
            }
            let floats: Vec<PersonId> = ids
                .iter()
                .copied()
                .filter(|&id| {
                    session
                        .person(id)
                        .and_then(|p| p.main_shift)
                        .is_some_and(|m| m.is_flow())
                        && session.cell_untouched(id, idx)
                })
                .collect();
            for id in floats {
                if current >= required {
                    break;
                }
                if can_work_shift(session, id, idx, shift) && session.auto_assign(id, idx, shift) {
                    written.insert((id, session.dates()[idx].date));
                    summary.backfilled += 1;
                    current += 1;
                }
            }
        }
    }

    /// Step 4: nobody stays blank; remaining empty cells become OFF.
    fn fallback_off(
        &self,
        session: &mut RosterSession,
        ids: &[PersonId],
        idx: usize,
        written: &mut HashSet<CellKey>,
        summary: &mut FillSummary,
    ) {
        for &id in ids {
            if session.cell_untouched(id, idx) && session.auto_assign(id, idx, Shift::Off) {
                written.insert((id, session.dates()[idx].date));
                summary.fallback_off += 1;
            }
        }
    }
}
