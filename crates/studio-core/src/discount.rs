//! # Discount Application
//!
//! Turns an optional [`Discount`] into a concrete amount off the subtotal.
//!
//! ```text
//! none            ──► discount = 0
//! Percentage(p)   ──► discount = floor(subtotal × p / 100)
//! Fixed(v)        ──► discount = min(v, subtotal)
//!
//! total = subtotal − discount   (never negative, never rounded up)
//! ```

use crate::error::{CoreResult, QuoteError};
use crate::money::Money;
use crate::types::Discount;

/// The two numbers a discount produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountOutcome {
    pub discount_amount: Money,
    pub total: Money,
}

/// Applies a validated discount to a non-negative subtotal.
///
/// ```rust
/// use studio_core::discount::apply_discount;
/// use studio_core::{Discount, Money};
///
/// let subtotal = Money::from_minor(100_000);
///
/// let pct = apply_discount(subtotal, Some(&Discount::percentage_bps(1000))).unwrap();
/// assert_eq!(pct.discount_amount.minor_units(), 10_000);
/// assert_eq!(pct.total.minor_units(), 90_000);
///
/// let fixed = apply_discount(subtotal, Some(&Discount::fixed(250_000))).unwrap();
/// assert_eq!(fixed.discount_amount, subtotal);
/// assert!(fixed.total.is_zero());
/// ```
pub fn apply_discount(subtotal: Money, discount: Option<&Discount>) -> CoreResult<DiscountOutcome> {
    let discount_amount = match discount {
        None => Money::zero(),
        Some(Discount::Percentage(rate)) => subtotal.floor_percentage(*rate).ok_or(
            QuoteError::AmountOverflow {
                context: "applying a percentage discount",
            },
        )?,
        Some(Discount::Fixed(amount)) => (*amount).min(subtotal),
    };
    // Unvalidated input can still land outside [0, subtotal].
    let discount_amount = discount_amount.clamp(Money::zero(), subtotal.max(Money::zero()));

    Ok(DiscountOutcome {
        discount_amount,
        total: subtotal - discount_amount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
