//! # Quote Policy
//!
//! The tunable knobs of the engine. `QuotePolicy::default()` is the studio's
//! canonical tariff; callers that need a different clock, a different
//! minimum booking or a different default table build their own.
//!
//! A policy may only narrow the legal occupancy range
//! `MIN_HEADCOUNT..=MAX_HEADCOUNT`, never widen it.

use serde::{Deserialize, Serialize};

use crate::band::BandSchedule;
use crate::rates::RateTable;
use crate::{MAX_HEADCOUNT, MIN_HEADCOUNT, MIN_RESERVATION_MINUTES, UNIT_DURATION_MINUTES};

/// Longest billable unit: one day.
pub const MAX_UNIT_MINUTES: i64 = 24 * 60;

/// Largest configurable minimum booking: one week.
pub const MAX_MIN_RESERVATION_MINUTES: i64 = 7 * 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotePolicy {
    pub schedule: BandSchedule,
    /// Length of one billable unit.
    pub unit_minutes: i64,
    pub min_reservation_minutes: i64,
    pub min_headcount: u32,
    pub max_headcount: u32,
    /// Used when the input carries no `rate_table`.
    pub default_rate_table: RateTable,
}

impl Default for QuotePolicy {
    fn default() -> Self {
        QuotePolicy {
            schedule: BandSchedule::default(),
            unit_minutes: UNIT_DURATION_MINUTES,
            min_reservation_minutes: MIN_RESERVATION_MINUTES,
            min_headcount: MIN_HEADCOUNT,
            max_headcount: MAX_HEADCOUNT,
            default_rate_table: RateTable::default(),
        }
    }
}

impl QuotePolicy {
    pub fn with_schedule(mut self, schedule: BandSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_default_rate_table(mut self, table: RateTable) -> Self {
        self.default_rate_table = table;
        self
    }

    /// Describes the first inconsistent setting, if any.
    pub fn problems(&self) -> Option<String> {
        if !self.schedule.is_valid() {
            return Some(format!(
                "band schedule must satisfy day_start_hour < night_start_hour < 24 (got {} and {})",
                self.schedule.day_start_hour, self.schedule.night_start_hour
            ));
        }
        if !(1..=MAX_UNIT_MINUTES).contains(&self.unit_minutes) {
            return Some(format!(
                "unit_minutes must be between 1 and {} (got {})",
                MAX_UNIT_MINUTES, self.unit_minutes
            ));
        }
        if !(0..=MAX_MIN_RESERVATION_MINUTES).contains(&self.min_reservation_minutes) {
            return Some(format!(
                "min_reservation_minutes must be between 0 and {} (got {})",
                MAX_MIN_RESERVATION_MINUTES, self.min_reservation_minutes
            ));
        }
        if self.min_headcount < MIN_HEADCOUNT
            || self.max_headcount > MAX_HEADCOUNT
            || self.min_headcount > self.max_headcount
        {
            return Some(format!(
                "headcount range {}..={} must be a non-empty part of {}..={}",
                self.min_headcount, self.max_headcount, MIN_HEADCOUNT, MAX_HEADCOUNT
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_matches_constants() {
        let policy = QuotePolicy::default();
        assert_eq!(policy.unit_minutes, 30);
        assert_eq!(policy.min_reservation_minutes, 120);
        assert_eq!((policy.min_headcount, policy.max_headcount), (1, 10));
        assert_eq!(policy.schedule, BandSchedule::new(8, 22));
        assert!(policy.problems().is_none());
    }

    #[test]
    fn test_problems() {
        let policy = QuotePolicy::default().with_schedule(BandSchedule::new(22, 8));
        assert!(policy.problems().unwrap().contains("band schedule"));

        let policy = QuotePolicy {
            unit_minutes: 0,
            ..QuotePolicy::default()
        };
        assert!(policy.problems().unwrap().contains("unit_minutes"));

        let policy = QuotePolicy {
            min_headcount: 4,
            max_headcount: 3,
            ..QuotePolicy::default()
        };
        assert!(policy.problems().unwrap().contains("headcount range"));
    }

    #[test]
    fn test_problems_bound_durations() {
        for unit_minutes in [-30, MAX_UNIT_MINUTES + 1, i64::MAX] {
            let policy = QuotePolicy {
                unit_minutes,
                ..QuotePolicy::default()
            };
            assert!(policy.problems().unwrap().contains("unit_minutes"));
        }
        for min_reservation_minutes in [-1, MAX_MIN_RESERVATION_MINUTES + 1, i64::MAX] {
            let policy = QuotePolicy {
                min_reservation_minutes,
                ..QuotePolicy::default()
            };
            assert!(policy
                .problems()
                .unwrap()
                .contains("min_reservation_minutes"));
        }
        let edge = QuotePolicy {
            unit_minutes: MAX_UNIT_MINUTES,
            min_reservation_minutes: MAX_MIN_RESERVATION_MINUTES,
            ..QuotePolicy::default()
        };
        assert!(edge.problems().is_none());
    }

    #[test]
    fn test_headcount_range_may_narrow_but_not_widen() {
        let narrower = QuotePolicy {
            min_headcount: 2,
            max_headcount: 6,
            ..QuotePolicy::default()
        };
        assert!(narrower.problems().is_none());

        let wider = QuotePolicy {
            max_headcount: 11,
            ..QuotePolicy::default()
        };
        assert!(wider.problems().unwrap().contains("headcount range"));

        let from_zero = QuotePolicy {
            min_headcount: 0,
            ..QuotePolicy::default()
        };
        assert!(from_zero.problems().is_some());
    }

    #[test]
    fn test_schedule_past_midnight_is_a_problem() {
        let policy = QuotePolicy::default().with_schedule(BandSchedule::new(8, 25));
        assert!(policy.problems().unwrap().contains("band schedule"));
    }
}
