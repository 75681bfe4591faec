//! Person (staff member) model.
//!
//! A person lives in the global pool; scheduling a period copies them
//! into that period's active roster, so later edits to the active copy
//! (main-shift changes, role updates) never rewrite history.

use serde::{Deserialize, Serialize};

use super::MainShift;

/// Stable person identifier, unique within the pool.
pub type PersonId = u64;

/// A staff member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Unique identifier.
    pub id: PersonId,
    /// Display name.
    pub name: String,
    /// Shift leader; leader coverage checks look for this flag.
    #[serde(default)]
    pub is_leader: bool,
    /// Intern / trainee.
    #[serde(default)]
    pub is_intern: bool,
    /// Not yet qualified for independent duty.
    #[serde(default)]
    pub is_unready: bool,
    /// Support / float staff borrowed from another unit.
    #[serde(default)]
    pub is_support: bool,
    /// Declared home shift. `None` until set or inferred by majority
    /// vote over already-scheduled days.
    #[serde(default)]
    pub main_shift: Option<MainShift>,
}

impl Person {
    /// Creates a person with no role flags and no main shift.
    pub fn new(id: PersonId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_leader: false,
            is_intern: false,
            is_unready: false,
            is_support: false,
            main_shift: None,
        }
    }

    /// Marks this person as a shift leader.
    pub fn with_leader(mut self) -> Self {
        self.is_leader = true;
        self
    }

    /// Marks this person as an intern.
    pub fn with_intern(mut self) -> Self {
        self.is_intern = true;
        self
    }

    /// Marks this person as not yet qualified.
    pub fn with_unready(mut self) -> Self {
        self.is_unready = true;
        self
    }

    /// Marks this person as support staff.
    pub fn with_support(mut self) -> Self {
        self.is_support = true;
        self
    }

    /// Sets the declared main shift.
    pub fn with_main_shift(mut self, main: MainShift) -> Self {
        self.main_shift = Some(main);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_builder() {
        let p = Person::new(7, "Chen")
            .with_leader()
            .with_main_shift(MainShift::Night);

        assert_eq!(p.id, 7);
        assert_eq!(p.name, "Chen");
        assert!(p.is_leader);
        assert!(!p.is_intern);
        assert_eq!(p.main_shift, Some(MainShift::Night));
    }

    #[test]
    fn test_person_defaults() {
        let p = Person::new(1, "Wu");
        assert!(!p.is_leader && !p.is_intern && !p.is_unready && !p.is_support);
        assert_eq!(p.main_shift, None);
    }

    #[test]
    fn test_person_serde_defaults() {
        // Older payloads omit the flags; they must deserialize as false.
        let p: Person = serde_json::from_str(r#"{"id": 3, "name": "Lin"}"#).unwrap();
        assert_eq!(p.id, 3);
        assert!(!p.is_leader);
        assert_eq!(p.main_shift, None);
    }
}
