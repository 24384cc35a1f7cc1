//! # Rate Tables
//!
//! Price-per-unit lookup keyed by (band, headcount).
//!
//! ## Built-in Table
//! ```text
//! ┌───────────┬─────────────┬──────────────────┐
//! │ band      │ headcount   │ price per unit   │
//! ├───────────┼─────────────┼──────────────────┤
//! │ DAY       │ 1 ..= 5     │ 20,000           │
//! │ NIGHT     │ 1 ..= 5     │ 12,500           │
//! └───────────┴─────────────┴──────────────────┘
//!  unit = 30 minutes; headcount 6..=10 needs an override table
//! ```
//!
//! A missing row is a configuration fault, reported as
//! [`QuoteError::RuleNotFound`], and is never retried.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, QuoteError};
use crate::money::Money;
use crate::types::RateBand;
use crate::{DEFAULT_DAY_RATE, DEFAULT_NIGHT_RATE, DEFAULT_TABLE_MAX_HEADCOUNT, MIN_HEADCOUNT};

/// One row of a rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingRule {
    pub band: RateBand,
    pub headcount: u32,
    pub price_per_unit: Money,
}

/// A list of pricing rules.
///
/// Serialized as a bare JSON array of rules, which is also the shape of the
/// `rateTable` override on [`QuoteInput`](crate::QuoteInput).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateTable(Vec<PricingRule>);

impl RateTable {
    pub fn new(rules: Vec<PricingRule>) -> Self {
        RateTable(rules)
    }

    /// A table with one price per band for every headcount in `headcounts`.
    ///
    /// ```rust
    /// use studio_core::{Money, RateBand, RateTable};
    ///
    /// let table = RateTable::flat(Money::from_minor(9_000), Money::from_minor(14_000), 1..=10);
    /// assert_eq!(table.rules().len(), 20);
    /// assert_eq!(table.resolve(RateBand::Night, 8).unwrap(), Money::from_minor(14_000));
    /// ```
    pub fn flat(day: Money, night: Money, headcounts: std::ops::RangeInclusive<u32>) -> Self {
        let rules = [(RateBand::Day, day), (RateBand::Night, night)]
            .into_iter()
            .flat_map(|(band, price_per_unit)| {
                headcounts.clone().map(move |headcount| PricingRule {
                    band,
                    headcount,
                    price_per_unit,
                })
            })
            .collect();
        RateTable(rules)
    }

    /// Adds a row, keeping earlier rows.
    pub fn with_rule(mut self, band: RateBand, headcount: u32, price_per_unit: Money) -> Self {
        self.0.push(PricingRule {
            band,
            headcount,
            price_per_unit,
        });
        self
    }

    pub fn rules(&self) -> &[PricingRule] {
        &self.0
    }

    /// Parses a table from its JSON array form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Looks up the price per unit for a (band, headcount) pair.
    ///
    /// ```rust
    /// use studio_core::{QuoteError, RateBand, RateTable};
    ///
    /// let table = RateTable::default();
    /// assert_eq!(table.resolve(RateBand::Day, 3).unwrap().minor_units(), 20_000);
    /// assert!(matches!(
    ///     table.resolve(RateBand::Day, 6),
    ///     Err(QuoteError::RuleNotFound { headcount: 6, .. })
    /// ));
    /// ```
    pub fn resolve(&self, band: RateBand, headcount: u32) -> CoreResult<Money> {
        self.0
            .iter()
            .find(|rule| rule.band == band && rule.headcount == headcount)
            .map(|rule| rule.price_per_unit)
            .ok_or(QuoteError::RuleNotFound { band, headcount })
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable::flat(
            Money::from_minor(DEFAULT_DAY_RATE),
            Money::from_minor(DEFAULT_NIGHT_RATE),
            MIN_HEADCOUNT..=DEFAULT_TABLE_MAX_HEADCOUNT,
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
