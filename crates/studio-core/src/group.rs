//! # Slot Grouping
//!
//! Collapses slots into one bucket per (band, headcount). Position does not
//! matter: two DAY/4 stretches separated by a NIGHT stretch still land in the
//! same bucket, because price depends only on the key.
//!
//! Buckets come out in order of first appearance, which keeps the detail
//! lines of a quote stable from run to run.

use crate::types::{RateBand, TimeSlot};

/// A bucket of slots sharing a (band, headcount) key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupedUnit {
    pub band: RateBand,
    pub headcount: u32,
    /// Number of slots in the bucket; each slot is one billable unit.
    pub unit_count: u32,
}

/// Groups slots by (band, headcount), counting one unit per slot.
///
/// ```rust
/// use chrono::NaiveDate;
/// use studio_core::group::group;
/// use studio_core::segment::segment;
/// use studio_core::BandSchedule;
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
/// let groups = group(&slots);
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].unit_count, 2);
/// assert_eq!(groups[1].unit_count, 2);
/// ```
pub fn group<'a, I>(slots: I) -> Vec<GroupedUnit>
where
    I: IntoIterator<Item = &'a TimeSlot>,
{
    // At most 2 bands × 10 headcounts keys; scan in insertion order.
    let mut groups: Vec<GroupedUnit> = Vec::new();
    for slot in slots {
        match groups
            .iter_mut()
            .find(|g| g.band == slot.band && g.headcount == slot.headcount)
        {
            Some(existing) => existing.unit_count += 1,
            None => groups.push(GroupedUnit {
                band: slot.band,
                headcount: slot.headcount,
                unit_count: 1,
            }),
        }
    }
    groups
}

// =============================================================================
// Unit Tests
// =============================================================================
