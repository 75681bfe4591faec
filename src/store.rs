//! Snapshot persistence.
//!
//! A [`MonthlySnapshot`] is the serializable form of one period's
//! mutable state: the schedule ledger flattened to records (JSON object
//! keys must be strings, so the tuple-keyed maps are stored as lists),
//! the active roster, the leave and lock sets, and the deadline note.
//!
//! [`RosterStore`] is the persistence seam: the core never talks to a
//! backend directly, it captures and applies snapshots. JSON import
//! goes through [`validate_snapshot`] before it can touch a session.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Person, PersonId, Shift};
use crate::session::RosterSession;
use crate::validation::{validate_snapshot, ValidationError};

/// One non-empty schedule cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRecord {
    /// Person the cell belongs to.
    pub person: PersonId,
    /// Calendar date of the cell.
    pub date: NaiveDate,
    /// Shift code held by the cell.
    pub shift: Shift,
}

/// A cell reference without a value (leave and lock entries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef {
    /// Person the cell belongs to.
    pub person: PersonId,
    /// Calendar date of the cell.
    pub date: NaiveDate,
}

/// Serializable state of one scheduling period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    /// Non-empty ledger cells.
    pub schedule: Vec<CellRecord>,
    /// The period's active roster (copies, not pool references).
    pub active_roster: Vec<Person>,
    /// Pre-approved leave cells.
    #[serde(default)]
    pub leaves: Vec<CellRef>,
    /// Locked cells.
    #[serde(default)]
    pub locked_cells: Vec<CellRef>,
    /// Submission deadline note.
    #[serde(default)]
    pub deadline: String,
}

impl MonthlySnapshot {
    /// Captures a session's mutable state.
    ///
    /// Output is sorted, so two captures of equal state compare equal
    /// and serialize identically.
    pub fn capture(session: &RosterSession) -> Self {
        let mut schedule: Vec<CellRecord> = session
            .ledger()
            .iter()
            .map(|(&(person, date), &shift)| CellRecord {
                person,
                date,
                shift,
            })
            .collect();
        schedule.sort_by_key(|r| (r.person, r.date));

        let mut active_roster = session.roster().to_vec();
        active_roster.sort_by_key(|p| p.id);

        let mut leaves: Vec<CellRef> = session
            .leaves()
            .iter()
            .map(|&(person, date)| CellRef { person, date })
            .collect();
        leaves.sort_by_key(|r| (r.person, r.date));

        let mut locked_cells: Vec<CellRef> = session
            .locked_cells()
            .iter()
            .map(|&(person, date)| CellRef { person, date })
            .collect();
        locked_cells.sort_by_key(|r| (r.person, r.date));

        Self {
            schedule,
            active_roster,
            leaves,
            locked_cells,
            deadline: session.deadline().to_owned(),
        }
    }

    /// Replaces a session's mutable state with this snapshot's.
    ///
    /// The session keeps its date axis; records for dates off the axis
    /// stay in the ledger as inert history.
    pub fn apply(&self, session: &mut RosterSession) {
        let ledger: HashMap<(PersonId, NaiveDate), Shift> = self
            .schedule
            .iter()
            .map(|r| ((r.person, r.date), r.shift))
            .collect();
        let leaves: HashSet<(PersonId, NaiveDate)> =
            self.leaves.iter().map(|r| (r.person, r.date)).collect();
        let locked: HashSet<(PersonId, NaiveDate)> = self
            .locked_cells
            .iter()
            .map(|r| (r.person, r.date))
            .collect();
        tracing::debug!(
            people = self.active_roster.len(),
            cells = self.schedule.len(),
            "applying snapshot to session"
        );
        session.restore(
            self.active_roster.clone(),
            ledger,
            leaves,
            locked,
            self.deadline.clone(),
        );
    }

    /// Serializes to pretty-printed JSON (the export format).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses and validates an exported snapshot.
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        let snapshot: Self = serde_json::from_str(text)?;
        validate_snapshot(&snapshot).map_err(ImportError::Invalid)?;
        Ok(snapshot)
    }
}

/// A rejected snapshot import.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The text is not a valid snapshot document.
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// The document parsed but failed structural validation.
    #[error("snapshot failed validation ({} issues)", .0.len())]
    Invalid(Vec<ValidationError>),
}

/// A persistence backend failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("storage backend failure: {0}")]
pub struct StoreError(pub String);

/// Persistence seam for monthly snapshots and the global staff pool.
pub trait RosterStore {
    /// Loads the snapshot for a period, if one was saved.
    fn load(&self, year: i32, month: u32) -> Result<Option<MonthlySnapshot>, StoreError>;

    /// Saves the snapshot for a period, replacing any previous one.
    fn save(&mut self, year: i32, month: u32, snapshot: &MonthlySnapshot)
        -> Result<(), StoreError>;

    /// Loads the global staff pool.
    fn load_global_roster(&self) -> Result<Vec<Person>, StoreError>;

    /// Saves the global staff pool.
    fn save_global_roster(&mut self, roster: &[Person]) -> Result<(), StoreError>;
}

/// In-memory store, for tests and single-process use.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    months: HashMap<(i32, u32), MonthlySnapshot>,
    pool: Vec<Person>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RosterStore for MemoryStore {
    fn load(&self, year: i32, month: u32) -> Result<Option<MonthlySnapshot>, StoreError> {
        Ok(self.months.get(&(year, month)).cloned())
    }

    fn save(
        &mut self,
        year: i32,
        month: u32,
        snapshot: &MonthlySnapshot,
    ) -> Result<(), StoreError> {
        self.months.insert((year, month), snapshot.clone());
        Ok(())
    }

    fn load_global_roster(&self) -> Result<Vec<Person>, StoreError> {
        Ok(self.pool.clone())
    }

    fn save_global_roster(&mut self, roster: &[Person]) -> Result<(), StoreError> {
        self.pool = roster.to_vec();
        Ok(())
    }
}
