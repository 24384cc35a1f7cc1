//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    100000 × 0.3333 = 33329.999999999996  ❌ off by a hair               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units + exact decimal percentages          │
//! │    100000 × 3333 / (100 × 100) = 33330 (exact, floored)                 │
//! │    Rounding is always DOWN, so a quote never exceeds the list price     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use studio_core::money::Money;
//!
//! let rate = Money::from_minor(20_000);
//! let line = rate.checked_mul_units(4).unwrap();
//! assert_eq!(line.minor_units(), 80_000);
//!
//! // NEVER do this:
//! // let bad = Money::from_float(199.99); // NO SUCH METHOD EXISTS!
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: lets the validator see and reject negative prices and
///   discounts instead of having them silently wrap
/// - **Single field tuple struct**: serializes as a bare JSON integer
///
/// ## Where Money is Used
/// ```text
/// PricingRule.price_per_unit ──► PricingDetail.subtotal (× unit_count)
///                                        │
///                                        ▼  Σ
///                                QuoteResult.subtotal
///                                        │
///                                        ▼  − discount_amount
///                                QuoteResult.total
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ```rust
    /// use studio_core::money::Money;
    ///
    /// let price = Money::from_minor(12_500);
    /// assert_eq!(price.minor_units(), 12_500);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor_units(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies a per-unit price by a unit count, or `None` on overflow.
    ///
    /// ```rust
    /// use studio_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(12_500).checked_mul_units(3), Some(Money::from_minor(37_500)));
    /// assert_eq!(Money::from_minor(i64::MAX).checked_mul_units(2), None);
    /// ```
    #[inline]
    pub fn checked_mul_units(&self, units: u32) -> Option<Self> {
        self.0.checked_mul(units as i64).map(Money)
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Returns `floor(self × pct / 100)`, or `None` if it does not fit.
    ///
    /// ## Implementation
    /// The percentage is `mantissa / 10^scale`, so the discount is
    /// `(amount × mantissa) div (100 × 10^scale)` in i128. Nothing is rounded
    /// before the final floor, so a percentage discount can never be larger
    /// than its nominal share.
    ///
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use studio_core::money::Money;
    /// use studio_core::types::DiscountRate;
    ///
    /// let subtotal = Money::from_minor(100_000);
    /// assert_eq!(subtotal.floor_percentage(DiscountRate::from_bps(1000)), Some(Money::from_minor(10_000)));
    /// // 33.335% of 100,000 = 33,335 exactly
    /// let rate = DiscountRate::from_decimal(Decimal::new(33_335, 3));
    /// assert_eq!(subtotal.floor_percentage(rate), Some(Money::from_minor(33_335)));
    /// ```
    pub fn floor_percentage(&self, rate: DiscountRate) -> Option<Money> {
        let pct = rate.as_decimal().normalize();
        let divisor = 10i128.checked_pow(pct.scale())?.checked_mul(100)?;
        let scaled = (self.0 as i128).checked_mul(pct.mantissa())?;
        i64::try_from(scaled.div_euclid(divisor)).ok().map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Minor units with thousands separators, e.g. `120,000`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }
        if self.0 < 0 {
            write!(f, "-{}", grouped)
        } else {
            write!(f, "{}", grouped)
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
