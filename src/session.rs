//! Scheduling-session context.
//!
//! [`RosterSession`] owns the four mutable collections of a scheduling
//! period — the shift ledger, the active roster, the leave set, and the
//! lock set — together with the date axis. Every mutation goes through
//! an accessor that enforces the protection invariants centrally:
//!
//! - locked cells are never overwritten, by any path;
//! - leave cells are treated as OFF for evaluation and are never
//!   rewritten by the automated paths (the literal value underneath is
//!   preserved so it resurfaces if leave is revoked);
//! - the automated paths never touch buffer days or pre-filled cells.
//!
//! Rule violations on manual edits are advisory: the edit is applied
//! and a warning is returned, never an error.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{DateEntry, MainShift, Person, PersonId, Shift};
use crate::rules::forbidden_transition;

/// Ledger/leave/lock key: one person on one calendar date.
pub type CellKey = (PersonId, NaiveDate);

/// A refused mutation intent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The target cell is locked.
    #[error("cell for person {person} on {date} is locked")]
    CellLocked {
        /// Person whose cell was targeted.
        person: PersonId,
        /// Date of the targeted cell.
        date: NaiveDate,
    },
    /// The person is not on the active roster.
    #[error("person {0} is not on the active roster")]
    UnknownPerson(PersonId),
    /// The date is not on the current axis.
    #[error("date {0} is not on the current scheduling axis")]
    UnknownDate(NaiveDate),
    /// The person is already on the active roster.
    #[error("person {0} is already on the active roster")]
    DuplicatePerson(PersonId),
}

/// Advisory warning attached to an applied manual edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditWarning {
    /// The edit creates an illegal shift transition with the prior day.
    ForbiddenTransition {
        /// Effective shift on the prior day.
        prev: Shift,
        /// Shift just written.
        next: Shift,
    },
}

/// Mutable scheduling state for one period.
#[derive(Debug, Clone, Default)]
pub struct RosterSession {
    dates: Vec<DateEntry>,
    roster: Vec<Person>,
    ledger: HashMap<CellKey, Shift>,
    leaves: HashSet<CellKey>,
    locked: HashSet<CellKey>,
    deadline: String,
}

impl RosterSession {
    /// Creates an empty session over a date axis.
    pub fn new(dates: Vec<DateEntry>) -> Self {
        Self {
            dates,
            ..Self::default()
        }
    }

    /// Creates an empty session for a (year, month) selection.
    ///
    /// An invalid selection yields a session with an empty axis, on
    /// which every operation is a no-op ("nothing to schedule").
    pub fn for_period(year: i32, month: u32) -> Self {
        Self::new(crate::models::build_period(year, month))
    }

    /// The date axis.
    pub fn dates(&self) -> &[DateEntry] {
        &self.dates
    }

    /// Number of days on the axis.
    pub fn date_count(&self) -> usize {
        self.dates.len()
    }

    /// Index of the first editable day (past the look-back buffer).
    ///
    /// Equals the axis length when the axis is empty, so editable
    /// ranges degrade to empty instead of panicking.
    pub fn first_editable_index(&self) -> usize {
        self.dates
            .iter()
            .position(|d| d.is_start)
            .unwrap_or(self.dates.len())
    }

    /// Indices of the editable days.
    pub fn editable_indices(&self) -> std::ops::Range<usize> {
        self.first_editable_index()..self.dates.len()
    }

    /// Axis index of a calendar date.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.dates.iter().position(|d| d.date == date)
    }

    /// The active roster for this period.
    pub fn roster(&self) -> &[Person] {
        &self.roster
    }

    /// Looks up an active-roster member.
    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.roster.iter().find(|p| p.id == id)
    }

    /// Submission deadline note for this period.
    pub fn deadline(&self) -> &str {
        &self.deadline
    }

    /// Sets the submission deadline note.
    pub fn set_deadline(&mut self, deadline: impl Into<String>) {
        self.deadline = deadline.into();
    }

    /// The raw ledger (read-only; mutation goes through accessors).
    pub fn ledger(&self) -> &HashMap<CellKey, Shift> {
        &self.ledger
    }

    /// The pre-approved leave set (read-only).
    pub fn leaves(&self) -> &HashSet<CellKey> {
        &self.leaves
    }

    /// The locked-cell set (read-only).
    pub fn locked_cells(&self) -> &HashSet<CellKey> {
        &self.locked
    }

    // ---- cell state ----------------------------------------------------

    fn key(&self, person: PersonId, day_idx: usize) -> Option<CellKey> {
        self.dates.get(day_idx).map(|d| (person, d.date))
    }

    /// Raw ledger value for a cell; `None` means the cell is empty.
    pub fn raw_shift(&self, person: PersonId, day_idx: usize) -> Option<Shift> {
        let key = self.key(person, day_idx)?;
        self.ledger.get(&key).copied()
    }

    /// Effective shift for rule evaluation and statistics.
    ///
    /// Leave overrides the ledger value; an empty cell (or an index off
    /// the axis) evaluates as [`Shift::Off`].
    pub fn effective_shift(&self, person: PersonId, day_idx: usize) -> Shift {
        match self.key(person, day_idx) {
            Some(key) if self.leaves.contains(&key) => Shift::Off,
            Some(key) => self.ledger.get(&key).copied().unwrap_or(Shift::Off),
            None => Shift::Off,
        }
    }

    /// Whether the cell is locked.
    pub fn is_locked(&self, person: PersonId, day_idx: usize) -> bool {
        self.key(person, day_idx)
            .is_some_and(|key| self.locked.contains(&key))
    }

    /// Whether the cell is on pre-approved leave.
    pub fn is_on_leave(&self, person: PersonId, day_idx: usize) -> bool {
        self.key(person, day_idx)
            .is_some_and(|key| self.leaves.contains(&key))
    }

    /// Whether the automated paths may write this cell: it must be
    /// empty, unlocked, and not on leave.
    pub fn cell_untouched(&self, person: PersonId, day_idx: usize) -> bool {
        match self.key(person, day_idx) {
            Some(key) => {
                !self.ledger.contains_key(&key)
                    && !self.locked.contains(&key)
                    && !self.leaves.contains(&key)
            }
            None => false,
        }
    }

    // ---- automated writes (auto-fill only) -----------------------------

    /// Writes a shift into an untouched editable cell.
    ///
    /// Returns `false` without mutating when the cell is on a buffer
    /// day, already holds a value, is locked, or is on leave.
    pub fn auto_assign(&mut self, person: PersonId, day_idx: usize, shift: Shift) -> bool {
        if !self.is_editable_day(day_idx) || !self.cell_untouched(person, day_idx) {
            return false;
        }
        let key = self.key(person, day_idx).expect("editable index is on axis");
        self.ledger.insert(key, shift);
        true
    }

    /// Overwrites an editable cell during the same auto-fill pass.
    ///
    /// Used by the surplus trim to reassign cells the pass itself just
    /// filled. Refuses buffer days, locked cells, and leave cells; the
    /// caller is responsible for only targeting cells it wrote.
    pub fn auto_overwrite(&mut self, person: PersonId, day_idx: usize, shift: Shift) -> bool {
        if !self.is_editable_day(day_idx)
            || self.is_locked(person, day_idx)
            || self.is_on_leave(person, day_idx)
        {
            return false;
        }
        let key = self.key(person, day_idx).expect("editable index is on axis");
        self.ledger.insert(key, shift);
        true
    }

    fn is_editable_day(&self, day_idx: usize) -> bool {
        self.dates.get(day_idx).is_some_and(|d| !d.is_buffer)
    }

    // ---- derived counts -----------------------------------------------

    /// Headcount whose effective shift equals `shift` on a day.
    ///
    /// Uses effective shifts, so a person on leave never counts toward
    /// staffing even if a work code sits underneath.
    pub fn staffed_count(&self, day_idx: usize, shift: Shift) -> usize {
        self.roster
            .iter()
            .filter(|p| self.effective_shift(p.id, day_idx) == shift)
            .count()
    }

    /// Qualifying workdays from the period start up to (excluding)
    /// `day_idx`. Drives the surplus-trim ranking.
    pub fn workdays_before(&self, person: PersonId, day_idx: usize) -> u32 {
        self.editable_indices()
            .take_while(|&i| i < day_idx)
            .filter(|&i| self.effective_shift(person, i).is_work())
            .count() as u32
    }

    /// Majority-vote main shift over already-scheduled editable days.
    ///
    /// Counts raw D/E/N entries; ties resolve in day, evening, night
    /// order, and a person with no votes defaults to day shift.
    pub fn detect_main_shift(&self, person: PersonId) -> MainShift {
        let mut counts = [0u32; 3];
        for idx in self.editable_indices() {
            match self.raw_shift(person, idx) {
                Some(Shift::Day) => counts[0] += 1,
                Some(Shift::Evening) => counts[1] += 1,
                Some(Shift::Night) => counts[2] += 1,
                _ => {}
            }
        }
        let (best, &votes) = counts
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(&a.0)))
            .expect("three candidate shifts");
        if votes == 0 {
            return MainShift::Day;
        }
        match best {
            0 => MainShift::Day,
            1 => MainShift::Evening,
            _ => MainShift::Night,
        }
    }

    /// Fills in a main shift for every roster member missing one, by
    /// majority vote. Returns how many were defaulted.
    pub fn ensure_main_shifts(&mut self) -> usize {
        let missing: Vec<PersonId> = self
            .roster
            .iter()
            .filter(|p| p.main_shift.is_none())
            .map(|p| p.id)
            .collect();
        for id in &missing {
            let main = self.detect_main_shift(*id);
            if let Some(person) = self.roster.iter_mut().find(|p| p.id == *id) {
                person.main_shift = Some(main);
            }
        }
        missing.len()
    }

    // ---- manual edit paths --------------------------------------------

    /// Applies a manual cell edit; `None` clears the cell.
    ///
    /// Locked cells are refused. A rule breach (illegal transition with
    /// the prior day) is reported as a warning but the edit still lands.
    pub fn set_manual(
        &mut self,
        person: PersonId,
        date: NaiveDate,
        value: Option<Shift>,
    ) -> Result<Option<EditWarning>, EditError> {
        if self.person(person).is_none() {
            return Err(EditError::UnknownPerson(person));
        }
        let day_idx = self.index_of(date).ok_or(EditError::UnknownDate(date))?;
        let key = (person, date);
        if self.locked.contains(&key) {
            return Err(EditError::CellLocked { person, date });
        }

        let warning = match value {
            Some(shift) if shift.is_work() && day_idx > 0 => {
                let prev = self.effective_shift(person, day_idx - 1);
                forbidden_transition(prev, shift)
                    .then_some(EditWarning::ForbiddenTransition { prev, next: shift })
            }
            _ => None,
        };

        match value {
            Some(shift) => {
                self.ledger.insert(key, shift);
            }
            None => {
                self.ledger.remove(&key);
            }
        }
        Ok(warning)
    }

    /// Toggles pre-approved leave on a cell. Returns whether the cell
    /// is now on leave. The ledger value underneath is untouched.
    pub fn toggle_leave(&mut self, person: PersonId, date: NaiveDate) -> Result<bool, EditError> {
        self.index_of(date).ok_or(EditError::UnknownDate(date))?;
        let key = (person, date);
        if !self.leaves.remove(&key) {
            self.leaves.insert(key);
            return Ok(true);
        }
        Ok(false)
    }

    /// Toggles the lock on a cell. Returns whether it is now locked.
    pub fn toggle_lock(&mut self, person: PersonId, date: NaiveDate) -> Result<bool, EditError> {
        self.index_of(date).ok_or(EditError::UnknownDate(date))?;
        let key = (person, date);
        if !self.locked.remove(&key) {
            self.locked.insert(key);
            return Ok(true);
        }
        Ok(false)
    }

    /// Toggles the lock across a person's whole row.
    ///
    /// Locks every cell unless all are already locked, in which case
    /// the row unlocks. Returns whether the row is now locked.
    pub fn lock_row(&mut self, person: PersonId) -> Result<bool, EditError> {
        if self.person(person).is_none() {
            return Err(EditError::UnknownPerson(person));
        }
        let keys: Vec<CellKey> = self.dates.iter().map(|d| (person, d.date)).collect();
        let all_locked = keys.iter().all(|k| self.locked.contains(k));
        for key in keys {
            if all_locked {
                self.locked.remove(&key);
            } else {
                self.locked.insert(key);
            }
        }
        Ok(!all_locked)
    }

    /// Toggles the lock across a whole date column, for every active
    /// roster member. Returns whether the column is now locked.
    pub fn lock_column(&mut self, date: NaiveDate) -> Result<bool, EditError> {
        self.index_of(date).ok_or(EditError::UnknownDate(date))?;
        let keys: Vec<CellKey> = self.roster.iter().map(|p| (p.id, date)).collect();
        let all_locked = !keys.is_empty() && keys.iter().all(|k| self.locked.contains(k));
        for key in keys {
            if all_locked {
                self.locked.remove(&key);
            } else {
                self.locked.insert(key);
            }
        }
        Ok(!all_locked)
    }

    /// Writes a batch of cells in one operation (the look-back buffer
    /// edit path). The whole batch is validated first; on any refused
    /// cell nothing is applied. Returns the number of cells written.
    pub fn batch_edit(
        &mut self,
        entries: &[(PersonId, NaiveDate, Option<Shift>)],
    ) -> Result<usize, EditError> {
        for &(person, date, _) in entries {
            self.index_of(date).ok_or(EditError::UnknownDate(date))?;
            if self.locked.contains(&(person, date)) {
                return Err(EditError::CellLocked { person, date });
            }
        }
        for &(person, date, value) in entries {
            match value {
                Some(shift) => {
                    self.ledger.insert((person, date), shift);
                }
                None => {
                    self.ledger.remove(&(person, date));
                }
            }
        }
        Ok(entries.len())
    }

    // ---- roster lifecycle ---------------------------------------------

    /// Copies a pool member onto the active roster and seeds every
    /// writable editable cell with the chosen main shift.
    pub fn add_to_roster(&mut self, person: Person, main: MainShift) -> Result<(), EditError> {
        if self.person(person.id).is_some() {
            return Err(EditError::DuplicatePerson(person.id));
        }
        let id = person.id;
        let mut active = person;
        active.main_shift = Some(main);
        self.roster.push(active);

        let seed = main.to_shift();
        for idx in self.editable_indices() {
            if !self.is_locked(id, idx) && !self.is_on_leave(id, idx) {
                let key = self.key(id, idx).expect("editable index is on axis");
                self.ledger.insert(key, seed);
            }
        }
        Ok(())
    }

    /// Drops a person from this period's roster. Their ledger entries
    /// remain as inert history; the global pool is unaffected.
    pub fn remove_from_roster(&mut self, id: PersonId) -> Result<Person, EditError> {
        let pos = self
            .roster
            .iter()
            .position(|p| p.id == id)
            .ok_or(EditError::UnknownPerson(id))?;
        Ok(self.roster.remove(pos))
    }

    /// Changes a person's main shift on the active copy.
    ///
    /// With `propagate`, editable cells that are empty or still hold
    /// the old main shift are rewritten to the new one; locked and
    /// leave cells are left alone.
    pub fn change_main_shift(
        &mut self,
        id: PersonId,
        new_main: MainShift,
        propagate: bool,
    ) -> Result<(), EditError> {
        let old_main = {
            let person = self
                .roster
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(EditError::UnknownPerson(id))?;
            let old = person.main_shift.unwrap_or(MainShift::Day);
            person.main_shift = Some(new_main);
            old
        };

        if propagate {
            let old_shift = old_main.to_shift();
            let new_shift = new_main.to_shift();
            for idx in self.editable_indices() {
                if self.is_locked(id, idx) || self.is_on_leave(id, idx) {
                    continue;
                }
                match self.raw_shift(id, idx) {
                    None => {
                        let key = self.key(id, idx).expect("editable index is on axis");
                        self.ledger.insert(key, new_shift);
                    }
                    Some(s) if s == old_shift => {
                        let key = self.key(id, idx).expect("editable index is on axis");
                        self.ledger.insert(key, new_shift);
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }

    /// Clears the editable schedule back to empty cells, preserving
    /// leave cells, external-duty entries, and locked cells. Returns
    /// the number of cells cleared.
    pub fn clear_schedule(&mut self) -> usize {
        let ids: Vec<PersonId> = self.roster.iter().map(|p| p.id).collect();
        let mut cleared = 0;
        for idx in self.editable_indices() {
            for &id in &ids {
                if self.is_locked(id, idx) || self.is_on_leave(id, idx) {
                    continue;
                }
                if self.raw_shift(id, idx) == Some(Shift::External) {
                    continue;
                }
                let key = self.key(id, idx).expect("editable index is on axis");
                if self.ledger.remove(&key).is_some() {
                    cleared += 1;
                }
            }
        }
        cleared
    }

    /// Replaces the session's mutable state wholesale (snapshot apply).
    /// The date axis is kept; stale keys from other periods stay inert.
    pub fn restore(
        &mut self,
        roster: Vec<Person>,
        ledger: HashMap<CellKey, Shift>,
        leaves: HashSet<CellKey>,
        locked: HashSet<CellKey>,
        deadline: String,
    ) {
        self.roster = roster;
        self.ledger = ledger;
        self.leaves = leaves;
        self.locked = locked;
        self.deadline = deadline;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> RosterSession {
        let mut s = RosterSession::for_period(2026, 8);
        s.roster.push(Person::new(1, "Chen").with_main_shift(MainShift::Day));
        s.roster.push(
            Person::new(2, "Wu")
                .with_leader()
                .with_main_shift(MainShift::Night),
        );
        s
    }

    fn date(s: &RosterSession, idx: usize) -> NaiveDate {
        s.dates()[idx].date
    }

    #[test]
    fn test_editable_range() {
        let s = session();
        assert_eq!(s.first_editable_index(), 7);
        assert_eq!(s.editable_indices().len(), s.date_count() - 7);
    }

    #[test]
    fn test_empty_axis_is_inert() {
        let s = RosterSession::for_period(2026, 13);
        assert_eq!(s.date_count(), 0);
        assert_eq!(s.first_editable_index(), 0);
        assert!(s.editable_indices().is_empty());
        assert_eq!(s.effective_shift(1, 0), Shift::Off);
    }

    #[test]
    fn test_effective_shift_leave_overrides() {
        let mut s = session();
        let d = date(&s, 9);
        s.set_manual(1, d, Some(Shift::Night)).unwrap();
        assert_eq!(s.effective_shift(1, 9), Shift::Night);

        s.toggle_leave(1, d).unwrap();
        assert_eq!(s.effective_shift(1, 9), Shift::Off);
        // Literal value is preserved underneath.
        assert_eq!(s.raw_shift(1, 9), Some(Shift::Night));

        s.toggle_leave(1, d).unwrap();
        assert_eq!(s.effective_shift(1, 9), Shift::Night);
    }

    #[test]
    fn test_locked_cell_refuses_manual_edit() {
        let mut s = session();
        let d = date(&s, 8);
        s.toggle_lock(1, d).unwrap();
        let err = s.set_manual(1, d, Some(Shift::Day)).unwrap_err();
        assert_eq!(err, EditError::CellLocked { person: 1, date: d });
        assert_eq!(s.raw_shift(1, 8), None);
    }

    #[test]
    fn test_manual_edit_warns_but_applies() {
        let mut s = session();
        s.set_manual(1, date(&s, 8), Some(Shift::Night)).unwrap();
        let warning = s.set_manual(1, date(&s, 9), Some(Shift::Day)).unwrap();
        assert_eq!(
            warning,
            Some(EditWarning::ForbiddenTransition {
                prev: Shift::Night,
                next: Shift::Day,
            })
        );
        // Advisory only: the edit landed anyway.
        assert_eq!(s.raw_shift(1, 9), Some(Shift::Day));
    }

    #[test]
    fn test_auto_assign_protections() {
        let mut s = session();
        // Buffer day: refused.
        assert!(!s.auto_assign(1, 3, Shift::Day));
        // Locked: refused.
        let d8 = date(&s, 8);
        s.toggle_lock(1, d8).unwrap();
        assert!(!s.auto_assign(1, 8, Shift::Day));
        // Leave: refused.
        let d9 = date(&s, 9);
        s.toggle_leave(1, d9).unwrap();
        assert!(!s.auto_assign(1, 9, Shift::Day));
        // Pre-filled: refused.
        let d10 = date(&s, 10);
        s.set_manual(1, d10, Some(Shift::Evening)).unwrap();
        assert!(!s.auto_assign(1, 10, Shift::Day));
        // Untouched editable cell: accepted.
        assert!(s.auto_assign(1, 11, Shift::Day));
        assert_eq!(s.raw_shift(1, 11), Some(Shift::Day));
    }

    #[test]
    fn test_row_and_column_locks() {
        let mut s = session();
        assert!(s.lock_row(1).unwrap());
        assert!((0..s.date_count()).all(|i| s.is_locked(1, i)));
        // Second toggle unlocks.
        assert!(!s.lock_row(1).unwrap());
        assert!((0..s.date_count()).all(|i| !s.is_locked(1, i)));

        let d = date(&s, 10);
        assert!(s.lock_column(d).unwrap());
        assert!(s.is_locked(1, 10) && s.is_locked(2, 10));
        assert!(!s.lock_column(d).unwrap());
        assert!(!s.is_locked(1, 10) && !s.is_locked(2, 10));
    }

    #[test]
    fn test_detect_main_shift_majority_and_tie() {
        let mut s = session();
        for idx in [8, 9, 10] {
            let d = date(&s, idx);
            s.set_manual(1, d, Some(Shift::Evening)).unwrap();
        }
        s.set_manual(1, date(&s, 11), Some(Shift::Day)).unwrap();
        assert_eq!(s.detect_main_shift(1), MainShift::Evening);

        // Tie between D and E resolves to D; no votes defaults to D.
        s.set_manual(2, date(&s, 8), Some(Shift::Day)).unwrap();
        s.set_manual(2, date(&s, 9), Some(Shift::Evening)).unwrap();
        assert_eq!(s.detect_main_shift(2), MainShift::Day);
        assert_eq!(s.detect_main_shift(99), MainShift::Day);
    }

    #[test]
    fn test_ensure_main_shifts() {
        let mut s = session();
        s.roster.push(Person::new(3, "Lin"));
        s.set_manual(3, date(&s, 8), Some(Shift::Night)).unwrap();
        s.set_manual(3, date(&s, 9), Some(Shift::Night)).unwrap();

        assert_eq!(s.ensure_main_shifts(), 1);
        assert_eq!(s.person(3).unwrap().main_shift, Some(MainShift::Night));
        // Declared main shifts are untouched.
        assert_eq!(s.person(1).unwrap().main_shift, Some(MainShift::Day));
    }

    #[test]
    fn test_add_to_roster_seeds_cells() {
        let mut s = session();
        s.add_to_roster(Person::new(3, "Lin"), MainShift::Evening)
            .unwrap();
        assert_eq!(s.person(3).unwrap().main_shift, Some(MainShift::Evening));
        for idx in s.editable_indices() {
            assert_eq!(s.raw_shift(3, idx), Some(Shift::Evening));
        }
        // Buffer days are not seeded.
        assert_eq!(s.raw_shift(3, 0), None);

        let err = s.add_to_roster(Person::new(3, "Lin"), MainShift::Day);
        assert_eq!(err.unwrap_err(), EditError::DuplicatePerson(3));
    }

    #[test]
    fn test_remove_from_roster_keeps_ledger() {
        let mut s = session();
        s.set_manual(1, date(&s, 8), Some(Shift::Day)).unwrap();
        let removed = s.remove_from_roster(1).unwrap();
        assert_eq!(removed.name, "Chen");
        assert!(s.person(1).is_none());
        // Entries stay as inert history.
        assert_eq!(s.raw_shift(1, 8), Some(Shift::Day));
    }

    #[test]
    fn test_change_main_shift_propagates() {
        let mut s = session();
        s.set_manual(1, date(&s, 8), Some(Shift::Day)).unwrap();
        s.set_manual(1, date(&s, 9), Some(Shift::Night)).unwrap();
        let d10 = date(&s, 10);
        s.toggle_lock(1, d10).unwrap();

        s.change_main_shift(1, MainShift::Evening, true).unwrap();
        assert_eq!(s.person(1).unwrap().main_shift, Some(MainShift::Evening));
        // Old main rewritten; other values kept; locked cell untouched.
        assert_eq!(s.raw_shift(1, 8), Some(Shift::Evening));
        assert_eq!(s.raw_shift(1, 9), Some(Shift::Night));
        assert_eq!(s.raw_shift(1, 10), None);
        // Empty cells pick up the new main.
        assert_eq!(s.raw_shift(1, 11), Some(Shift::Evening));
    }

    #[test]
    fn test_clear_schedule_preserves_protected() {
        let mut s = session();
        s.set_manual(1, date(&s, 8), Some(Shift::Day)).unwrap();
        s.set_manual(1, date(&s, 9), Some(Shift::External)).unwrap();
        s.set_manual(1, date(&s, 10), Some(Shift::Evening)).unwrap();
        let d10 = date(&s, 10);
        s.toggle_lock(1, d10).unwrap();
        s.set_manual(1, date(&s, 11), Some(Shift::Night)).unwrap();
        let d11 = date(&s, 11);
        s.toggle_leave(1, d11).unwrap();
        // Buffer-day entry survives a clear.
        s.batch_edit(&[(1, date(&s, 2), Some(Shift::Night))]).unwrap();

        let cleared = s.clear_schedule();
        assert_eq!(cleared, 1);
        assert_eq!(s.raw_shift(1, 8), None);
        assert_eq!(s.raw_shift(1, 9), Some(Shift::External));
        assert_eq!(s.raw_shift(1, 10), Some(Shift::Evening));
        assert_eq!(s.raw_shift(1, 11), Some(Shift::Night));
        assert_eq!(s.raw_shift(1, 2), Some(Shift::Night));
    }

    #[test]
    fn test_batch_edit_is_atomic() {
        let mut s = session();
        let d8 = date(&s, 8);
        let d0 = date(&s, 0);
        s.toggle_lock(1, d8).unwrap();

        // One locked target refuses the whole batch.
        let err = s
            .batch_edit(&[(2, d0, Some(Shift::Day)), (1, d8, Some(Shift::Day))])
            .unwrap_err();
        assert_eq!(err, EditError::CellLocked { person: 1, date: d8 });
        assert_eq!(s.raw_shift(2, 0), None);

        // Buffer days are writable through the batch path.
        let written = s.batch_edit(&[(2, d0, Some(Shift::Night))]).unwrap();
        assert_eq!(written, 1);
        assert_eq!(s.raw_shift(2, 0), Some(Shift::Night));
    }

    #[test]
    fn test_workdays_before() {
        let mut s = session();
        for idx in [8, 9, 11] {
            let d = date(&s, idx);
            s.set_manual(1, d, Some(Shift::Day)).unwrap();
        }
        s.set_manual(1, date(&s, 10), Some(Shift::Off)).unwrap();
        // Leave on a work cell removes it from the count.
        let d11 = date(&s, 11);
        s.toggle_leave(1, d11).unwrap();

        assert_eq!(s.workdays_before(1, 12), 2);
        // Buffer entries never count.
        s.batch_edit(&[(1, date(&s, 0), Some(Shift::Day))]).unwrap();
        assert_eq!(s.workdays_before(1, 12), 2);
    }

    #[test]
    fn test_staffed_count_ignores_leave() {
        let mut s = session();
        s.set_manual(1, date(&s, 8), Some(Shift::Day)).unwrap();
        s.set_manual(2, date(&s, 8), Some(Shift::Day)).unwrap();
        assert_eq!(s.staffed_count(8, Shift::Day), 2);

        let d8 = date(&s, 8);
        s.toggle_leave(2, d8).unwrap();
        assert_eq!(s.staffed_count(8, Shift::Day), 1);
    }
}
