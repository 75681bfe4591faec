//! Scheduler and statistics configuration.
//!
//! [`StaffingRequirements`] drives scheduling decisions (surplus trim and
//! shortage backfill). [`UnitSettings`] is display-only: the statistics
//! pass uses it to derive nurse-to-bed ratios, but the scheduler ignores it.

use serde::{Deserialize, Serialize};

use super::Shift;

/// Required headcount per staffed shift, applied uniformly across
/// every editable day of the period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingRequirements {
    /// Required day-shift headcount.
    pub day: u32,
    /// Required evening-shift headcount.
    pub evening: u32,
    /// Required night-shift headcount.
    pub night: u32,
}

impl StaffingRequirements {
    /// Creates requirements for the three staffed shifts.
    pub fn new(day: u32, evening: u32, night: u32) -> Self {
        Self {
            day,
            evening,
            night,
        }
    }

    /// Required headcount for a shift (zero for unstaffed codes).
    pub fn required(&self, shift: Shift) -> u32 {
        match shift {
            Shift::Day => self.day,
            Shift::Evening => self.evening,
            Shift::Night => self.night,
            _ => 0,
        }
    }
}

/// Ward-level bed settings, used only for ratio display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSettings {
    /// Total beds on the unit.
    pub total_beds: u32,
    /// Beds carried by the day-shift leader.
    pub leader_beds_day: u32,
    /// Beds carried by the evening-shift leader.
    pub leader_beds_evening: u32,
    /// Beds carried by the night-shift leader.
    pub leader_beds_night: u32,
}

impl UnitSettings {
    /// Creates settings with no leader-held beds.
    pub fn new(total_beds: u32) -> Self {
        Self {
            total_beds,
            ..Self::default()
        }
    }

    /// Sets the leader-held beds for a staffed shift.
    pub fn with_leader_beds(mut self, shift: Shift, beds: u32) -> Self {
        match shift {
            Shift::Day => self.leader_beds_day = beds,
            Shift::Evening => self.leader_beds_evening = beds,
            Shift::Night => self.leader_beds_night = beds,
            _ => {}
        }
        self
    }

    /// Nurse-to-patient ratio for a shift given its requirement.
    ///
    /// With requirement `r` and leader-held beds `b`: `r > 1` spreads the
    /// remaining beds over the non-leader nurses, `r == 1` puts every bed
    /// on the single nurse, and `r == 0` yields 0.
    pub fn patient_ratio(&self, shift: Shift, requirements: &StaffingRequirements) -> f64 {
        let required = requirements.required(shift);
        let leader_beds = match shift {
            Shift::Day => self.leader_beds_day,
            Shift::Evening => self.leader_beds_evening,
            Shift::Night => self.leader_beds_night,
            _ => 0,
        };
        match required {
            0 => 0.0,
            1 => self.total_beds as f64,
            r => (self.total_beds.saturating_sub(leader_beds)) as f64 / (r - 1) as f64,
        }
    }
}
