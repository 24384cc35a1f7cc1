//! # Domain Types
//!
//! Wire and domain types shared by every stage of the quote pipeline.
//!
//! ## Type Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Quote Types                                     │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   QuoteInput    │   │    TimeSlot     │   │  PricingDetail  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  start/end time │──►│  start, end     │──►│  band, units    │──┐    │
//! │  │  headcount      │   │  band           │   │  headcount      │  │    │
//! │  │  changes[]      │   │  headcount      │   │  price, subtotal│  │    │
//! │  │  discount?      │   └─────────────────┘   └─────────────────┘  │    │
//! │  │  rate_table?    │                                              ▼    │
//! │  └─────────────────┘                              ┌─────────────────┐  │
//! │                                                   │   QuoteResult   │  │
//! │  ┌─────────────────┐   ┌─────────────────┐        │  subtotal       │  │
//! │  │    RateBand     │   │    Discount     │        │  discount       │  │
//! │  │  Day | Night    │   │  Percentage(%)  │        │  total          │  │
//! │  └─────────────────┘   │  Fixed(Money)   │        └─────────────────┘  │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Timestamps are local wall-clock times (`NaiveDateTime`); the studio's
//! bands are defined on the local clock, so no timezone conversion happens
//! inside the engine.

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::money::Money;
use crate::rates::RateTable;

// =============================================================================
// Rate Band
// =============================================================================

/// Time-of-day classification that selects a rate row.
///
/// Closed on purpose: adding a band means revisiting every `match` on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum RateBand {
    /// [08:00, 22:00) local time.
    Day,
    /// [22:00, 08:00) local time, spanning midnight.
    Night,
}

impl fmt::Display for RateBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateBand::Day => write!(f, "DAY"),
            RateBand::Night => write!(f, "NIGHT"),
        }
    }
}

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount percentage, carried exactly as a decimal.
///
/// ## Why Decimal?
/// The discount is `floor(subtotal × p / 100)`, and the floor must hold for
/// any `p` the caller sends (`33.335`, `0.006`, ...). Rounding `p` to a fixed
/// number of places first could push the discount up by a minor unit, and
/// could pull `100.004` back inside the valid range. The wire form is a plain
/// JSON number (`{"type": "percentage", "value": 33.335}`) read back into its
/// shortest decimal text, so the value the validator and the floor see is the
/// one the caller wrote.
///
/// Signed so that a negative percentage survives deserialization and is
/// rejected by the validator with a proper message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DiscountRate(Decimal);

impl DiscountRate {
    /// 100%.
    pub const FULL: DiscountRate = DiscountRate(Decimal::ONE_HUNDRED);

    #[inline]
    pub const fn from_decimal(pct: Decimal) -> Self {
        DiscountRate(pct)
    }

    /// Creates a rate from whole basis points (`1000` is 10%).
    pub fn from_bps(bps: i64) -> Self {
        DiscountRate(Decimal::new(bps, 2))
    }

    /// The percentage as given, e.g. `33.335`.
    #[inline]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(Decimal::ZERO)
    }
}

impl fmt::Display for DiscountRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

impl Serialize for DiscountRate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let pct = self
            .0
            .to_f64()
            .ok_or_else(|| <S::Error as ser::Error>::custom("discount percentage not representable"))?;
        serializer.serialize_f64(pct)
    }
}

impl<'de> Deserialize<'de> for DiscountRate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // f64's Display is the shortest text that reads back to the same
        // float, i.e. the literal the caller wrote.
        let pct = f64::deserialize(deserializer)?;
        let text = pct.to_string();
        Decimal::from_str(&text)
            .map(DiscountRate)
            .map_err(|e| de::Error::custom(format!("invalid percentage {}: {}", text, e)))
    }
}

// =============================================================================
// Discount
// =============================================================================

/// An optional reduction applied to the quote subtotal.
///
/// Wire shape: `{"type": "percentage", "value": 10}` or
/// `{"type": "fixed", "value": 15000}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Discount {
    /// A share of the subtotal, floored to whole minor units.
    Percentage(#[ts(type = "number")] DiscountRate),
    /// A flat amount, clamped to the subtotal.
    Fixed(Money),
}

impl Discount {
    /// Shorthand for a percentage discount given in basis points.
    pub fn percentage_bps(bps: i64) -> Self {
        Discount::Percentage(DiscountRate::from_bps(bps))
    }

    /// Shorthand for a fixed discount given in minor units.
    pub const fn fixed(minor: i64) -> Self {
        Discount::Fixed(Money::from_minor(minor))
    }
}

// =============================================================================
// Headcount Change
// =============================================================================

/// A point-in-time change of occupancy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HeadcountChange {
    /// The instant from which `new_headcount` applies.
    #[ts(as = "String")]
    pub time: NaiveDateTime,
    pub new_headcount: u32,
}

// =============================================================================
// Quote Input
// =============================================================================

/// Everything the engine needs to price one reservation.
///
/// Immutable for the duration of a computation; the engine only borrows it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteInput {
    #[ts(as = "String")]
    pub start_time: NaiveDateTime,

    #[ts(as = "String")]
    pub end_time: NaiveDateTime,

    pub initial_headcount: u32,

    /// Occupancy changes in any order; the engine sorts them by time.
    #[serde(default)]
    pub headcount_changes: Vec<HeadcountChange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<Discount>,

    /// Overrides the engine's default rate table when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_table: Option<RateTable>,
}

impl QuoteInput {
    /// Creates an input with no headcount changes, discount or rate override.
    pub fn new(start_time: NaiveDateTime, end_time: NaiveDateTime, initial_headcount: u32) -> Self {
        QuoteInput {
            start_time,
            end_time,
            initial_headcount,
            headcount_changes: Vec::new(),
            discount: None,
            rate_table: None,
        }
    }

    pub fn with_change(mut self, time: NaiveDateTime, new_headcount: u32) -> Self {
        self.headcount_changes.push(HeadcountChange {
            time,
            new_headcount,
        });
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_rate_table(mut self, table: RateTable) -> Self {
        self.rate_table = Some(table);
        self
    }

    /// Whole minutes between start and end.
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }
}

// =============================================================================
// Time Slot
// =============================================================================

/// A contiguous stretch of the reservation with one band and one headcount.
///
/// Each slot is billed as one unit, even when it was clipped short by a band
/// boundary, a headcount change or the reservation end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    #[ts(as = "String")]
    pub start: NaiveDateTime,
    #[ts(as = "String")]
    pub end: NaiveDateTime,
    pub band: RateBand,
    pub headcount: u32,
}

impl TimeSlot {
    #[inline]
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

// =============================================================================
// Pricing Detail
// =============================================================================

/// One priced line item: all units sharing a (band, headcount).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingDetail {
    pub band: RateBand,
    pub unit_count: u32,
    pub headcount: u32,
    pub price_per_unit: Money,
    /// `unit_count × price_per_unit`.
    pub subtotal: Money,
}

// =============================================================================
// Quote Result
// =============================================================================

/// The itemized price breakdown handed back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResult {
    #[ts(as = "String")]
    pub start_time: NaiveDateTime,
    #[ts(as = "String")]
    pub end_time: NaiveDateTime,
    pub total_minutes: i64,
    pub details: Vec<PricingDetail>,
    /// Sum of all detail subtotals.
    pub subtotal: Money,
    pub discount_amount: Money,
    /// `subtotal − discount_amount`, never negative.
    pub total: Money,
    /// Echo of the input discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_discount: Option<Discount>,
}

// =============================================================================
// Unit Tests
// =============================================================================
