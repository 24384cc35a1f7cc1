//! # Quote Engine
//!
//! Orchestrates one synchronous, side-effect-free pass over a request.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QuoteInput                                                             │
//! │      │                                                                  │
//! │      ▼  validate_quote_input      ── ValidationError ──► caller         │
//! │  Segmenter::slots                 (TimeSlot per unit)                   │
//! │      │                                                                  │
//! │      ▼  group                     (band, headcount) → unit_count        │
//! │      │                                                                  │
//! │      ▼  RateTable::resolve        ── RuleNotFound ──► caller            │
//! │  PricingDetail per group          subtotal = units × price              │
//! │      │                                                                  │
//! │      ▼  Σ subtotal                ── AmountOverflow ──► caller          │
//! │      │                                                                  │
//! │      ▼  apply_discount            discount_amount, total                │
//! │  QuoteResult                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine holds only its immutable [`QuotePolicy`], so one instance can
//! be shared across threads and called concurrently.

use tracing::debug;

use crate::discount::apply_discount;
use crate::error::{CoreResult, QuoteError};
use crate::group::{group, GroupedUnit};
use crate::money::Money;
use crate::policy::QuotePolicy;
use crate::rates::RateTable;
use crate::segment::Segmenter;
use crate::types::{PricingDetail, QuoteInput, QuoteResult, TimeSlot};
use crate::validation::validate_quote_input;

#[derive(Debug, Clone, Default)]
pub struct QuoteEngine {
    policy: QuotePolicy,
}

impl QuoteEngine {
    /// Builds an engine, refusing a policy that fails
    /// [`QuotePolicy::problems`].
    pub fn new(policy: QuotePolicy) -> CoreResult<Self> {
        if let Some(reason) = policy.problems() {
            return Err(QuoteError::InvalidPolicy { reason });
        }
        Ok(QuoteEngine { policy })
    }

    /// Computes the itemized quote for a reservation.
    ///
    /// Either returns a complete result or the first error encountered;
    /// there are no partial results.
    pub fn compute_quote(&self, input: &QuoteInput) -> CoreResult<QuoteResult> {
        validate_quote_input(input, &self.policy)?;

        let slots: Vec<TimeSlot> = self.segmenter(input).slots().collect();
        let groups = group(&slots);

        let table = input
            .rate_table
            .as_ref()
            .unwrap_or(&self.policy.default_rate_table);
        let details = groups
            .iter()
            .map(|g| price_group(table, g))
            .collect::<CoreResult<Vec<_>>>()?;

        let subtotal = details
            .iter()
            .try_fold(Money::zero(), |acc, d| acc.checked_add(d.subtotal))
            .ok_or(QuoteError::AmountOverflow {
                context: "summing line items",
            })?;
        let outcome = apply_discount(subtotal, input.discount.as_ref())?;

        debug!(
            start = %input.start_time,
            end = %input.end_time,
            slots = slots.len(),
            lines = details.len(),
            subtotal = %subtotal,
            discount = %outcome.discount_amount,
            total = %outcome.total,
            "Computed quote"
        );

        Ok(QuoteResult {
            start_time: input.start_time,
            end_time: input.end_time,
            total_minutes: input.duration_minutes(),
            details,
            subtotal,
            discount_amount: outcome.discount_amount,
            total: outcome.total,
            applied_discount: input.discount,
        })
    }

    /// Validates the request and returns the slot sequence it tiles into.
    ///
    /// This is the audit trail behind a quote: every unit that was billed,
    /// with its exact boundaries.
    pub fn slots(&self, input: &QuoteInput) -> CoreResult<Vec<TimeSlot>> {
        validate_quote_input(input, &self.policy)?;
        Ok(self.segmenter(input).slots().collect())
    }

    fn segmenter(&self, input: &QuoteInput) -> Segmenter {
        Segmenter::new(
            self.policy.schedule,
            self.policy.unit_minutes,
            input.start_time,
            input.end_time,
            input.initial_headcount,
            &input.headcount_changes,
        )
    }
}

fn price_group(table: &RateTable, unit: &GroupedUnit) -> CoreResult<PricingDetail> {
    let price_per_unit = table.resolve(unit.band, unit.headcount)?;
    let subtotal = price_per_unit
        .checked_mul_units(unit.unit_count)
        .ok_or(QuoteError::AmountOverflow {
            context: "pricing a line item",
        })?;

    Ok(PricingDetail {
        band: unit.band,
        unit_count: unit.unit_count,
        headcount: unit.headcount,
        price_per_unit,
        subtotal,
    })
}

/// Computes a quote with the canonical policy.
///
/// ```rust
/// use chrono::NaiveDate;
/// use studio_core::{compute_quote, Discount, QuoteInput};
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
/// let input = QuoteInput::new(
///     day.and_hms_opt(22, 0, 0).unwrap(),
///     day.succ_opt().unwrap().and_hms_opt(2, 0, 0).unwrap(),
///     3,
/// )
/// .with_discount(Discount::fixed(15_000));
///
/// let quote = compute_quote(&input).unwrap();
/// assert_eq!(quote.subtotal.minor_units(), 100_000);
/// assert_eq!(quote.total.minor_units(), 85_000);
/// ```
pub fn compute_quote(input: &QuoteInput) -> CoreResult<QuoteResult> {
    QuoteEngine::default().compute_quote(input)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::band::BandSchedule;
    use crate::error::ValidationError;
    use crate::types::{Discount, RateBand};
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn detail(band: RateBand, unit_count: u32, headcount: u32, price: i64) -> PricingDetail {
        PricingDetail {
            band,
            unit_count,
            headcount,
            price_per_unit: Money::from_minor(price),
            subtotal: Money::from_minor(price * unit_count as i64),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Reference scenarios
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_band_boundary_crossed_yields_two_lines() {
        // Fixture clock with NIGHT starting at 20:00.
        let engine =
            QuoteEngine::new(QuotePolicy::default().with_schedule(BandSchedule::new(8, 20)))
                .unwrap();
        let quote = engine
            .compute_quote(&QuoteInput::new(at(1, 19, 0), at(1, 21, 0), 4))
            .unwrap();

        assert_eq!(quote.total_minutes, 120);
        assert_eq!(
            quote.details,
            vec![
                detail(RateBand::Day, 2, 4, 20_000),
                detail(RateBand::Night, 2, 4, 12_500),
            ]
        );
        assert_eq!(quote.subtotal, Money::from_minor(65_000));
    }

    #[test]
    fn test_night_across_midnight_is_one_line() {
        let quote = compute_quote(&QuoteInput::new(at(1, 22, 0), at(2, 2, 0), 3)).unwrap();
        assert_eq!(quote.total_minutes, 240);
        assert_eq!(quote.details, vec![detail(RateBand::Night, 8, 3, 12_500)]);
        assert_eq!(quote.total, Money::from_minor(100_000));
    }

    #[test]
    fn test_plain_day_booking() {
        let quote = compute_quote(&QuoteInput::new(at(1, 10, 0), at(1, 12, 0), 2)).unwrap();
        assert_eq!(quote.total_minutes, 120);
        assert_eq!(quote.details, vec![detail(RateBand::Day, 4, 2, 20_000)]);
        assert!(quote.discount_amount.is_zero());
        assert!(quote.applied_discount.is_none());
    }

    #[test]
    fn test_headcount_change_splits_lines() {
        let input = QuoteInput::new(at(1, 10, 0), at(1, 15, 0), 3).with_change(at(1, 12, 0), 5);
        let quote = compute_quote(&input).unwrap();
        assert_eq!(
            quote.details,
            vec![
                detail(RateBand::Day, 4, 3, 20_000),
                detail(RateBand::Day, 6, 5, 20_000),
            ]
        );

        let slots = QuoteEngine::default().slots(&input).unwrap();
        let boundary = slots.iter().position(|s| s.headcount == 5).unwrap();
        assert_eq!(slots[boundary - 1].end, at(1, 12, 0));
        assert_eq!(slots[boundary].start, at(1, 12, 0));
    }

    #[test]
    fn test_percentage_discount() {
        let input = QuoteInput::new(at(1, 22, 0), at(2, 2, 0), 3)
            .with_discount(Discount::percentage_bps(1000));
        let quote = compute_quote(&input).unwrap();
        assert_eq!(quote.subtotal, Money::from_minor(100_000));
        assert_eq!(quote.discount_amount, Money::from_minor(10_000));
        assert_eq!(quote.total, Money::from_minor(90_000));
        assert_eq!(quote.applied_discount, Some(Discount::percentage_bps(1000)));
    }

    #[test]
    fn test_fixed_discount() {
        let input =
            QuoteInput::new(at(1, 22, 0), at(2, 2, 0), 3).with_discount(Discount::fixed(15_000));
        let quote = compute_quote(&input).unwrap();
        assert_eq!(quote.discount_amount, Money::from_minor(15_000));
        assert_eq!(quote.total, Money::from_minor(85_000));
    }

    #[test]
    fn test_too_short() {
        let err = compute_quote(&QuoteInput::new(at(1, 10, 0), at(1, 10, 59), 2)).unwrap_err();
        assert!(err.is_client_error());
        assert!(err.to_string().contains("minimum reservation duration"));
    }

    #[test]
    fn test_end_before_start() {
        let err = compute_quote(&QuoteInput::new(at(1, 12, 0), at(1, 10, 0), 2)).unwrap_err();
        assert_eq!(err, QuoteError::Validation(ValidationError::StartNotBeforeEnd));
    }

    #[test]
    fn test_headcount_out_of_range() {
        let err = compute_quote(&QuoteInput::new(at(1, 10, 0), at(1, 12, 0), 11)).unwrap_err();
        assert!(err.to_string().starts_with("headcount must be between 1 and 10"));
    }

    #[test]
    fn test_percentage_out_of_range() {
        let input = QuoteInput::new(at(1, 10, 0), at(1, 12, 0), 2)
            .with_discount(Discount::percentage_bps(15_000));
        let err = compute_quote(&input).unwrap_err();
        assert_eq!(
            err,
            QuoteError::Validation(ValidationError::PercentageOutOfRange)
        );
    }

    fn night_quote_with_percentage(pct: &str) -> CoreResult<QuoteResult> {
        // 22:00 → 02:00, headcount 3: subtotal 100,000.
        let input: QuoteInput = serde_json::from_str(&format!(
            r#"{{
                "startTime": "2026-07-01T22:00:00",
                "endTime": "2026-07-02T02:00:00",
                "initialHeadcount": 3,
                "discount": {{"type": "percentage", "value": {}}}
            }}"#,
            pct
        ))
        .unwrap();
        compute_quote(&input)
    }

    #[test]
    fn test_percentage_is_floored_exactly() {
        for (pct, discount) in [
            ("0.006", 6),
            ("33.335", 33_335),
            ("12.3456", 12_345),
            ("99.99999", 99_999),
            ("100", 100_000),
        ] {
            let quote = night_quote_with_percentage(pct).unwrap();
            assert_eq!(quote.subtotal, Money::from_minor(100_000));
            assert_eq!(quote.discount_amount, Money::from_minor(discount), "{}%", pct);
            assert_eq!(quote.total, Money::from_minor(100_000 - discount), "{}%", pct);
        }
    }

    #[test]
    fn test_percentage_just_outside_range_is_rejected() {
        for pct in ["100.004", "-0.004"] {
            assert_eq!(
                night_quote_with_percentage(pct).unwrap_err(),
                QuoteError::Validation(ValidationError::PercentageOutOfRange),
                "{}%",
                pct
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Policy
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_unusable_policy_is_refused() {
        let past_midnight = QuotePolicy::default().with_schedule(BandSchedule::new(8, 25));
        let huge_unit = QuotePolicy {
            unit_minutes: i64::MAX,
            ..QuotePolicy::default()
        };
        let huge_minimum = QuotePolicy {
            min_reservation_minutes: i64::MAX,
            ..QuotePolicy::default()
        };
        for policy in [past_midnight, huge_unit, huge_minimum] {
            let err = QuoteEngine::new(policy).unwrap_err();
            assert!(matches!(err, QuoteError::InvalidPolicy { .. }));
            assert!(!err.is_client_error());
        }
        assert!(QuoteEngine::new(QuotePolicy::default()).is_ok());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Rate tables
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_large_party_needs_override_table() {
        let input = QuoteInput::new(at(1, 10, 0), at(1, 12, 0), 4).with_change(at(1, 11, 0), 8);
        let err = compute_quote(&input).unwrap_err();
        assert_eq!(
            err,
            QuoteError::RuleNotFound {
                band: RateBand::Day,
                headcount: 8
            }
        );
        assert!(!err.is_client_error());

        let table = RateTable::flat(Money::from_minor(9_000), Money::from_minor(7_000), 1..=10);
        let quote = compute_quote(&input.with_rate_table(table)).unwrap();
        assert_eq!(
            quote.details,
            vec![
                detail(RateBand::Day, 2, 4, 9_000),
                detail(RateBand::Day, 2, 8, 9_000),
            ]
        );
        assert_eq!(quote.subtotal, Money::from_minor(36_000));
    }

    #[test]
    fn test_engine_default_table_can_be_replaced() {
        let table = RateTable::flat(Money::from_minor(1_000), Money::from_minor(500), 1..=10);
        let engine =
            QuoteEngine::new(QuotePolicy::default().with_default_rate_table(table)).unwrap();
        let quote = engine
            .compute_quote(&QuoteInput::new(at(1, 10, 0), at(1, 12, 0), 9))
            .unwrap();
        assert_eq!(quote.subtotal, Money::from_minor(4_000));
    }

    #[test]
    fn test_overflow_is_reported() {
        let table = RateTable::flat(Money::from_minor(i64::MAX / 2), Money::zero(), 1..=10);
        let input =
            QuoteInput::new(at(1, 10, 0), at(1, 12, 0), 2).with_rate_table(table);
        assert!(matches!(
            compute_quote(&input),
            Err(QuoteError::AmountOverflow { .. })
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Edge cases
    // ─────────────────────────────────────────────────────────────────────────

    #[test]
    fn test_change_on_band_boundary() {
        let input = QuoteInput::new(at(1, 21, 0), at(1, 23, 0), 2).with_change(at(1, 22, 0), 4);
        let quote = compute_quote(&input).unwrap();
        assert_eq!(
            quote.details,
            vec![
                detail(RateBand::Day, 2, 2, 20_000),
                detail(RateBand::Night, 2, 4, 12_500),
            ]
        );
    }

    #[test]
    fn test_clipped_slots_bill_as_whole_units() {
        // 20:45 → 22:45: DAY 20:45-21:15, 21:15-21:45, 21:45-22:00 (short)
        //                NIGHT 22:00-22:30, 22:30-22:45 (short)
        let quote = compute_quote(&QuoteInput::new(at(1, 20, 45), at(1, 22, 45), 1)).unwrap();
        assert_eq!(quote.total_minutes, 120);
        assert_eq!(
            quote.details,
            vec![
                detail(RateBand::Day, 3, 1, 20_000),
                detail(RateBand::Night, 2, 1, 12_500),
            ]
        );
    }

    #[test]
    fn test_same_key_merges_across_time() {
        // DAY/2, then NIGHT/2, then DAY/2 again the next morning.
        let input = QuoteInput::new(at(1, 21, 0), at(2, 9, 0), 2);
        let quote = compute_quote(&input).unwrap();
        assert_eq!(
            quote.details,
            vec![
                detail(RateBand::Day, 4, 2, 20_000),
                detail(RateBand::Night, 20, 2, 12_500),
            ]
        );
    }

    #[test]
    fn test_quote_json_shape() {
        let input: QuoteInput = serde_json::from_str(
            r#"{
                "startTime": "2026-07-01T10:00:00",
                "endTime": "2026-07-01T15:00:00",
                "initialHeadcount": 3,
                "headcountChanges": [{"time": "2026-07-01T12:00:00", "newHeadcount": 5}],
                "discount": {"type": "percentage", "value": 33.33}
            }"#,
        )
        .unwrap();
        let quote = compute_quote(&input).unwrap();

        // 200,000 × 33.33% = 66,660
        assert_eq!(quote.discount_amount, Money::from_minor(66_660));
        assert_eq!(quote.total, Money::from_minor(133_340));

        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["totalMinutes"], 300);
        assert_eq!(json["subtotal"], 200_000);
        assert_eq!(json["details"][1]["band"], "DAY");
        assert_eq!(json["details"][1]["unitCount"], 6);
        assert_eq!(json["details"][1]["pricePerUnit"], 20_000);
        assert_eq!(json["appliedDiscount"]["type"], "percentage");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Concurrency
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_callers_share_one_engine() {
        let engine = Arc::new(QuoteEngine::default());
        let mut handles = Vec::new();

        for i in 0..16u32 {
            let engine = Arc::clone(&engine);
            handles.push(tokio::task::spawn_blocking(move || {
                let headcount = i % 5 + 1;
                let input = QuoteInput::new(at(1, 10, 0), at(1, 12, 0), headcount);
                engine.compute_quote(&input)
            }));
        }

        for handle in handles {
            let quote = handle.await.unwrap().unwrap();
            assert_eq!(quote.total, Money::from_minor(80_000));
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Property-based tests
    // ─────────────────────────────────────────────────────────────────────────

    proptest! {
        #[test]
        fn prop_quote_conserves_money(
            start_offset in 0i64..(7 * 24 * 60),
            length in 120i64..(2 * 24 * 60),
            change_offsets in prop::collection::btree_set(1i64..(2 * 24 * 60), 0..4),
            headcounts in prop::collection::vec(1u32..=5, 4),
            initial in 1u32..=5,
            bps in 0i64..=10_000,
            fixed in 0i64..500_000,
            use_fixed in any::<bool>(),
        ) {
            let start = at(1, 0, 0) + Duration::minutes(start_offset);
            let end = start + Duration::minutes(length);
            let mut input = QuoteInput::new(start, end, initial);
            for (&m, &hc) in change_offsets.iter().filter(|&&m| m < length).zip(headcounts.iter()) {
                input = input.with_change(start + Duration::minutes(m), hc);
            }
            input = input.with_discount(if use_fixed {
                Discount::fixed(fixed)
            } else {
                Discount::percentage_bps(bps)
            });

            let engine = QuoteEngine::default();
            let quote = engine.compute_quote(&input).unwrap();
            let slots = engine.slots(&input).unwrap();

            prop_assert_eq!(quote.total_minutes, length);
            let summed: Money = quote.details.iter().map(|d| d.subtotal).sum();
            prop_assert_eq!(quote.subtotal, summed);
            for d in &quote.details {
                prop_assert_eq!(d.subtotal, Money::from_minor(d.price_per_unit.minor_units() * d.unit_count as i64));
            }
            let units: u32 = quote.details.iter().map(|d| d.unit_count).sum();
            prop_assert_eq!(units as usize, slots.len());

            prop_assert!(!quote.discount_amount.is_negative());
            prop_assert!(quote.discount_amount <= quote.subtotal);
            prop_assert_eq!(quote.total, quote.subtotal - quote.discount_amount);
        }
    }
}
