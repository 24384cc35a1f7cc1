//! # Segmentation
//!
//! Tiles a reservation `[start, end)` with billable slots.
//!
//! ## How a Slot Is Cut
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cursor ──► candidate end = cursor + unit (30 min)                      │
//! │                 │                                                       │
//! │                 ▼  clip to the EARLIEST of                              │
//! │            ┌─────────────────────────────────────┐                      │
//! │            │ • reservation end                   │                      │
//! │            │ • next band boundary after cursor   │                      │
//! │            │ • next headcount change after cursor│                      │
//! │            └─────────────────────────────────────┘                      │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  emit { cursor, clipped end, band(cursor), headcount in force }         │
//! │  cursor = clipped end                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//!
//!  19:00      19:30      20:00 change 4→6    20:30    21:00
//!    ├──────────┼──────────┼──────────────────┼─────────┤
//!      hc 4        hc 4           hc 6           hc 6
//! ```
//!
//! A change that lands exactly on a slot boundary governs the slot starting
//! at that instant; it is never applied retroactively.
//!
//! The walk is a lazy iterator ([`Slots`]) borrowed from a [`Segmenter`], so
//! the same plan can be replayed as many times as needed.

use chrono::{Duration, NaiveDateTime};
use std::iter::FusedIterator;

use crate::band::BandSchedule;
use crate::types::{HeadcountChange, TimeSlot};

/// A prepared segmentation plan: interval, headcount timeline and clock.
#[derive(Debug, Clone)]
pub struct Segmenter {
    schedule: BandSchedule,
    /// `None` when one unit is longer than chrono can represent.
    unit: Option<Duration>,
    start: NaiveDateTime,
    end: NaiveDateTime,
    initial_headcount: u32,
    /// Sorted ascending by time.
    changes: Vec<HeadcountChange>,
}

impl Segmenter {
    /// Builds a plan. `changes` may arrive in any order.
    pub fn new(
        schedule: BandSchedule,
        unit_minutes: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        initial_headcount: u32,
        changes: &[HeadcountChange],
    ) -> Self {
        let mut changes = changes.to_vec();
        changes.sort_by_key(|c| c.time);

        Segmenter {
            schedule,
            unit: Duration::try_minutes(unit_minutes.max(1)),
            start,
            end,
            initial_headcount,
            changes,
        }
    }

    /// Starts a fresh walk from the beginning of the interval.
    pub fn slots(&self) -> Slots<'_> {
        Slots {
            plan: self,
            cursor: self.start,
            headcount: self.initial_headcount,
            next_change: 0,
        }
    }
}

/// Lazy walk over a [`Segmenter`] plan.
#[derive(Debug, Clone)]
pub struct Slots<'a> {
    plan: &'a Segmenter,
    cursor: NaiveDateTime,
    headcount: u32,
    next_change: usize,
}

impl Iterator for Slots<'_> {
    type Item = TimeSlot;

    fn next(&mut self) -> Option<TimeSlot> {
        let plan = self.plan;
        if self.cursor >= plan.end {
            return None;
        }

        // Changes at or before the cursor take effect for this slot.
        while let Some(change) = plan.changes.get(self.next_change) {
            if change.time > self.cursor {
                break;
            }
            self.headcount = change.new_headcount;
            self.next_change += 1;
        }

        let unit_end = plan
            .unit
            .and_then(|unit| self.cursor.checked_add_signed(unit))
            .unwrap_or(plan.end);
        // Only a valid schedule guarantees the boundary lies ahead of the cursor.
        let boundary = plan.schedule.next_boundary_after(self.cursor);
        let boundary = if boundary > self.cursor { boundary } else { plan.end };

        let mut slot_end = unit_end.min(plan.end).min(boundary);
        if let Some(change) = plan.changes.get(self.next_change) {
            slot_end = slot_end.min(change.time);
        }

        let slot = TimeSlot {
            start: self.cursor,
            end: slot_end,
            band: plan.schedule.classify(self.cursor),
            headcount: self.headcount,
        };
        self.cursor = slot_end;
        Some(slot)
    }
}

impl FusedIterator for Slots<'_> {}

/// Segments `[start, end)` into slots in one call.
///
/// ```rust
/// use chrono::NaiveDate;
/// use studio_core::segment::segment;
/// use studio_core::{BandSchedule, RateBand};
///
/// let day = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
/// let slots = segment(
///     BandSchedule::default(),
///     30,
///     day.and_hms_opt(21, 0, 0).unwrap(),
///     day.and_hms_opt(23, 0, 0).unwrap(),
///     2,
///     &[],
/// );
///
/// assert_eq!(slots.len(), 4);
/// assert_eq!(slots[1].band, RateBand::Day);
/// assert_eq!(slots[2].band, RateBand::Night);
/// ```
pub fn segment(
    schedule: BandSchedule,
    unit_minutes: i64,
    start: NaiveDateTime,
    end: NaiveDateTime,
    initial_headcount: u32,
    changes: &[HeadcountChange],
) -> Vec<TimeSlot> {
    Segmenter::new(schedule, unit_minutes, start, end, initial_headcount, changes)
        .slots()
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
