//! # Band Classification
//!
//! Maps a local timestamp to its rate band and finds the next instant at
//! which the band flips.
//!
//! ## The Studio Clock
//! ```text
//!  00:00        08:00                                22:00        24:00
//!    │   NIGHT    │               DAY                  │   NIGHT    │
//!    ├────────────┼────────────────────────────────────┼────────────┤
//!                 ▲ day_start_hour                     ▲ night_start_hour
//!
//!  NIGHT wraps midnight: 22:00 → 08:00 next day is one band.
//! ```

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::RateBand;
use crate::{DAY_START_HOUR, NIGHT_START_HOUR};

/// The two hour-of-day edges that split the clock into DAY and NIGHT.
///
/// DAY is `[day_start_hour, night_start_hour)`; everything else is NIGHT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandSchedule {
    pub day_start_hour: u32,
    pub night_start_hour: u32,
}

impl Default for BandSchedule {
    fn default() -> Self {
        BandSchedule {
            day_start_hour: DAY_START_HOUR,
            night_start_hour: NIGHT_START_HOUR,
        }
    }
}

impl BandSchedule {
    pub const fn new(day_start_hour: u32, night_start_hour: u32) -> Self {
        BandSchedule {
            day_start_hour,
            night_start_hour,
        }
    }

    /// A schedule is usable when DAY is a non-empty stretch inside one day.
    pub fn is_valid(&self) -> bool {
        self.day_start_hour < self.night_start_hour && self.night_start_hour < 24
    }

    /// Classifies a timestamp by its local hour.
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use studio_core::{BandSchedule, RateBand};
    ///
    /// let day = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
    /// let schedule = BandSchedule::default();
    /// assert_eq!(schedule.classify(day.and_hms_opt(8, 0, 0).unwrap()), RateBand::Day);
    /// assert_eq!(schedule.classify(day.and_hms_opt(21, 59, 0).unwrap()), RateBand::Day);
    /// assert_eq!(schedule.classify(day.and_hms_opt(22, 0, 0).unwrap()), RateBand::Night);
    /// assert_eq!(schedule.classify(day.and_hms_opt(3, 0, 0).unwrap()), RateBand::Night);
    /// ```
    pub fn classify(&self, at: NaiveDateTime) -> RateBand {
        let hour = at.hour();
        if hour >= self.day_start_hour && hour < self.night_start_hour {
            RateBand::Day
        } else {
            RateBand::Night
        }
    }

    /// The first instant strictly after `at` where the band changes.
    ///
    /// ```text
    /// at in NIGHT before dawn  ──► today    day_start
    /// at in DAY                ──► today    night_start
    /// at in NIGHT after dusk   ──► tomorrow day_start
    /// ```
    pub fn next_boundary_after(&self, at: NaiveDateTime) -> NaiveDateTime {
        let date = at.date();
        let hour = at.hour();
        if hour < self.day_start_hour {
            date.and_time(hour_of_day(self.day_start_hour))
        } else if hour < self.night_start_hour {
            date.and_time(hour_of_day(self.night_start_hour))
        } else {
            (date + Duration::days(1)).and_time(hour_of_day(self.day_start_hour))
        }
    }
}

fn hour_of_day(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

// =============================================================================
// Unit Tests
// =============================================================================
