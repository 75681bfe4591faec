//! Shift eligibility rules.
//!
//! Pure predicates over the session state: no side effects, evaluated
//! fresh for every candidate assignment, because each assignment the
//! auto-fill pass makes changes the run length seen by later days.
//!
//! # Rules
//!
//! 1. Non-work targets (OFF, bereavement) are never constrained.
//! 2. Transition legality against yesterday's effective shift:
//!    night→day, night→evening, and evening→day are forbidden.
//! 3. Consecutive-workday cap: the unbroken run of effective work
//!    shifts ending yesterday must stay below 5 for a night target,
//!    6 for any other work target.
//!
//! # Reference
//! Burke et al. (2004), "The State of the Art of Nurse Rostering"

use crate::models::{PersonId, Shift};
use crate::session::RosterSession;

/// Consecutive-workday cap when the candidate shift is night.
pub const NIGHT_RUN_CAP: u32 = 5;
/// Consecutive-workday cap for every other work shift.
pub const DEFAULT_RUN_CAP: u32 = 6;

/// Whether assigning `next` directly after `prev` is forbidden.
#[inline]
pub fn forbidden_transition(prev: Shift, next: Shift) -> bool {
    matches!(
        (prev, next),
        (Shift::Night, Shift::Day | Shift::Evening) | (Shift::Evening, Shift::Day)
    )
}

/// Run cap applicable to a candidate shift.
#[inline]
pub fn run_cap(target: Shift) -> u32 {
    if target.is_night() {
        NIGHT_RUN_CAP
    } else {
        DEFAULT_RUN_CAP
    }
}

/// Length of the unbroken run of effective work shifts ending on the
/// day before `day_idx`.
///
/// Scans backward; leave days and empty/OFF cells break the run. Buffer
/// days participate, which is exactly why the axis carries them.
pub fn run_length_before(session: &RosterSession, person: PersonId, day_idx: usize) -> u32 {
    let mut run = 0;
    for i in (0..day_idx).rev() {
        if session.effective_shift(person, i).is_work() {
            run += 1;
        } else {
            break;
        }
    }
    run
}

/// Whether `person` may legally work `target` on the day at `day_idx`.
///
/// Day 0 has no predecessor; its previous shift evaluates as OFF.
pub fn can_work_shift(
    session: &RosterSession,
    person: PersonId,
    day_idx: usize,
    target: Shift,
) -> bool {
    if !target.is_work() {
        return true;
    }

    let prev = if day_idx == 0 {
        Shift::Off
    } else {
        session.effective_shift(person, day_idx - 1)
    };
    if forbidden_transition(prev, target) {
        return false;
    }

    // Assigning today would extend the run to or past the cap.
    run_length_before(session, person, day_idx) < run_cap(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MainShift, Person};
    use chrono::NaiveDate;

    fn session_with(person: PersonId) -> RosterSession {
        let mut s = RosterSession::for_period(2026, 8);
        s.add_to_roster(Person::new(person, "Chen"), MainShift::Day)
            .unwrap();
        s.clear_schedule();
        s
    }

    fn put(s: &mut RosterSession, person: PersonId, idx: usize, shift: Shift) {
        let date = s.dates()[idx].date;
        s.set_manual(person, date, Some(shift)).unwrap();
    }

    #[test]
    fn test_off_targets_always_eligible() {
        let mut s = session_with(1);
        // Even after a night shift and a long run.
        for idx in 3..9 {
            put(&mut s, 1, idx, Shift::Night);
        }
        assert!(can_work_shift(&s, 1, 9, Shift::Off));
        assert!(can_work_shift(&s, 1, 9, Shift::Bereavement));
    }

    #[test]
    fn test_forbidden_transitions() {
        let mut s = session_with(1);
        put(&mut s, 1, 8, Shift::Night);
        assert!(!can_work_shift(&s, 1, 9, Shift::Day));
        assert!(!can_work_shift(&s, 1, 9, Shift::Evening));
        assert!(can_work_shift(&s, 1, 9, Shift::Night));

        put(&mut s, 1, 10, Shift::Evening);
        assert!(!can_work_shift(&s, 1, 11, Shift::Day));
        assert!(can_work_shift(&s, 1, 11, Shift::Evening));
        assert!(can_work_shift(&s, 1, 11, Shift::Night));
    }

    #[test]
    fn test_same_shift_repeat_allowed() {
        let mut s = session_with(1);
        put(&mut s, 1, 8, Shift::Day);
        assert!(can_work_shift(&s, 1, 9, Shift::Day));
        assert!(can_work_shift(&s, 1, 9, Shift::Evening));
        assert!(can_work_shift(&s, 1, 9, Shift::Night));
    }

    #[test]
    fn test_leave_resets_transition() {
        let mut s = session_with(1);
        put(&mut s, 1, 8, Shift::Night);
        let d8 = s.dates()[8].date;
        s.toggle_leave(1, d8).unwrap();
        // Effective previous shift is OFF, so day shift is legal.
        assert!(can_work_shift(&s, 1, 9, Shift::Day));
    }

    #[test]
    fn test_day_zero_has_no_predecessor() {
        let s = session_with(1);
        assert!(can_work_shift(&s, 1, 0, Shift::Day));
        assert!(can_work_shift(&s, 1, 0, Shift::Night));
    }

    #[test]
    fn test_run_cap_default() {
        let mut s = session_with(1);
        for idx in 8..14 {
            put(&mut s, 1, idx, Shift::Day);
        }
        assert_eq!(run_length_before(&s, 1, 14), 6);
        // Six straight days: a seventh work day is refused.
        assert!(!can_work_shift(&s, 1, 14, Shift::Day));
        assert!(!can_work_shift(&s, 1, 14, Shift::External));
        assert!(can_work_shift(&s, 1, 14, Shift::Off));
    }

    #[test]
    fn test_run_cap_night_is_tighter() {
        let mut s = session_with(1);
        for idx in 8..13 {
            put(&mut s, 1, idx, Shift::Night);
        }
        assert_eq!(run_length_before(&s, 1, 13), 5);
        assert!(!can_work_shift(&s, 1, 13, Shift::Night));
        // A sixth non-night work day is still within the default cap.
        // (Night→night would be legal; night→day is not, so use OUT.)
        assert!(can_work_shift(&s, 1, 13, Shift::External));
    }

    #[test]
    fn test_run_spans_buffer_days() {
        let mut s = session_with(1);
        let entries: Vec<_> = (2..8)
            .map(|idx| (1u64, s.dates()[idx].date, Some(Shift::Day)))
            .collect();
        s.batch_edit(&entries).unwrap();
        // Six workdays already on the books before the period starts.
        assert_eq!(run_length_before(&s, 1, 8), 6);
        assert!(!can_work_shift(&s, 1, 8, Shift::Day));
    }

    #[test]
    fn test_leave_breaks_run() {
        let mut s = session_with(1);
        for idx in 8..14 {
            put(&mut s, 1, idx, Shift::Day);
        }
        let d11 = s.dates()[11].date;
        s.toggle_leave(1, d11).unwrap();
        // Run restarts after the leave day: only 12 and 13 count.
        assert_eq!(run_length_before(&s, 1, 14), 2);
        assert!(can_work_shift(&s, 1, 14, Shift::Day));
    }

    #[test]
    fn test_flow_counts_toward_run() {
        let mut s = session_with(1);
        for idx in 8..11 {
            put(&mut s, 1, idx, Shift::Flow);
        }
        for idx in 11..14 {
            put(&mut s, 1, idx, Shift::Day);
        }
        assert_eq!(run_length_before(&s, 1, 14), 6);
        assert!(!can_work_shift(&s, 1, 14, Shift::Day));
    }

    #[test]
    fn test_run_cap_boundary() {
        let mut s = session_with(1);
        for idx in 8..13 {
            put(&mut s, 1, idx, Shift::Day);
        }
        // Five days worked: a sixth is fine, night is not.
        assert!(can_work_shift(&s, 1, 13, Shift::Day));
        assert!(!can_work_shift(&s, 1, 13, Shift::Night));
    }

    #[test]
    fn test_empty_cell_breaks_run() {
        let mut s = session_with(1);
        put(&mut s, 1, 8, Shift::Day);
        // Gap at 9.
        put(&mut s, 1, 10, Shift::Day);
        assert_eq!(run_length_before(&s, 1, 11), 1);
    }

    #[test]
    fn test_unknown_date_effective_off() {
        let s = session_with(1);
        let out_of_axis = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(s.index_of(out_of_axis).is_none());
    }
}
