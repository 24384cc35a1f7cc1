//! # Validation Module
//!
//! Input validation for quote requests. Runs before any other stage, and
//! the first failure wins.
//!
//! ## Check Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      validate_quote_input                               │
//! │                                                                         │
//! │  1. start < end                         StartNotBeforeEnd               │
//! │  2. end − start ≥ minimum               TooShort                        │
//! │  3. each change: inside (start, end)    ChangeOutOfRange                │
//! │                  unique timestamp       DuplicateChangeTime             │
//! │  4. initial headcount, then each change HeadcountOutOfRange             │
//! │  5. discount: 0 ≤ pct ≤ 100, fixed ≥ 0  PercentageOutOfRange / ...      │
//! │  6. rate table override: prices ≥ 0,    NegativeRate / DuplicateRate /  │
//! │     headcounts in range, no repeats     HeadcountOutOfRange             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rate-table completeness is NOT checked here; a missing row only matters
//! if the reservation actually needs it, and then surfaces as
//! `QuoteError::RuleNotFound` during pricing.
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use studio_core::validation::validate_quote_input;
//! use studio_core::{QuoteInput, QuotePolicy, ValidationError};
//!
//! let day = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
//! let input = QuoteInput::new(
//!     day.and_hms_opt(10, 0, 0).unwrap(),
//!     day.and_hms_opt(10, 59, 0).unwrap(),
//!     2,
//! );
//! assert_eq!(
//!     validate_quote_input(&input, &QuotePolicy::default()),
//!     Err(ValidationError::TooShort { min_minutes: 120 })
//! );
//! ```

use chrono::{Duration, NaiveDateTime};
use std::collections::HashSet;

use crate::error::ValidationError;
use crate::policy::QuotePolicy;
use crate::rates::RateTable;
use crate::types::{Discount, DiscountRate, HeadcountChange, QuoteInput};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a whole request against the engine policy.
pub fn validate_quote_input(input: &QuoteInput, policy: &QuotePolicy) -> ValidationResult<()> {
    validate_time_range(input.start_time, input.end_time)?;
    validate_duration(
        input.start_time,
        input.end_time,
        policy.min_reservation_minutes,
    )?;
    validate_headcount_changes(input.start_time, input.end_time, &input.headcount_changes)?;

    validate_headcount(input.initial_headcount, policy)?;
    for change in &input.headcount_changes {
        validate_headcount(change.new_headcount, policy)?;
    }

    if let Some(discount) = &input.discount {
        validate_discount(discount)?;
    }
    if let Some(table) = &input.rate_table {
        validate_rate_table(table, policy)?;
    }

    Ok(())
}

// =============================================================================
// Time Validators
// =============================================================================

pub fn validate_time_range(start: NaiveDateTime, end: NaiveDateTime) -> ValidationResult<()> {
    if start >= end {
        return Err(ValidationError::StartNotBeforeEnd);
    }
    Ok(())
}

/// Rejects reservations shorter than `min_minutes`.
///
/// Compared on the exact span, so 119 minutes 59 seconds is still too short.
pub fn validate_duration(
    start: NaiveDateTime,
    end: NaiveDateTime,
    min_minutes: i64,
) -> ValidationResult<()> {
    match Duration::try_minutes(min_minutes) {
        Some(min) if end - start >= min => Ok(()),
        _ => Err(ValidationError::TooShort { min_minutes }),
    }
}

/// Every change must fall strictly inside `(start, end)` and no two may
/// share a timestamp.
///
/// A change exactly at `start` is refused; the opening headcount is
/// `initial_headcount`.
pub fn validate_headcount_changes(
    start: NaiveDateTime,
    end: NaiveDateTime,
    changes: &[HeadcountChange],
) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(changes.len());
    for change in changes {
        if change.time <= start || change.time >= end {
            return Err(ValidationError::ChangeOutOfRange {
                time: change.time.to_string(),
            });
        }
        if !seen.insert(change.time) {
            return Err(ValidationError::DuplicateChangeTime {
                time: change.time.to_string(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

pub fn validate_headcount(headcount: u32, policy: &QuotePolicy) -> ValidationResult<()> {
    if headcount < policy.min_headcount || headcount > policy.max_headcount {
        return Err(ValidationError::HeadcountOutOfRange {
            value: headcount,
            min: policy.min_headcount,
            max: policy.max_headcount,
        });
    }
    Ok(())
}

/// Percentage within 0..=100, fixed amount non-negative.
pub fn validate_discount(discount: &Discount) -> ValidationResult<()> {
    match discount {
        Discount::Percentage(rate) => {
            if *rate < DiscountRate::zero() || *rate > DiscountRate::FULL {
                return Err(ValidationError::PercentageOutOfRange);
            }
        }
        Discount::Fixed(amount) => {
            if amount.is_negative() {
                return Err(ValidationError::NegativeFixedDiscount);
            }
        }
    }
    Ok(())
}

// =============================================================================
// Rate Table Validators
// =============================================================================

pub fn validate_rate_table(table: &RateTable, policy: &QuotePolicy) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(table.rules().len());
    for rule in table.rules() {
        validate_headcount(rule.headcount, policy)?;
        if rule.price_per_unit.is_negative() {
            return Err(ValidationError::NegativeRate {
                band: rule.band,
                headcount: rule.headcount,
            });
        }
        if !seen.insert((rule.band, rule.headcount)) {
            return Err(ValidationError::DuplicateRate {
                band: rule.band,
                headcount: rule.headcount,
            });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
