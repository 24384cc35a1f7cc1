//! # Error Types
//!
//! Domain-specific error types for studio-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  studio-core errors (this file)                                        │
//! │  ├── QuoteError        - Everything a quote computation can return     │
//! │  │   ├── Validation    - bad request (caller fixes the input)          │
//! │  │   ├── RuleNotFound  - incomplete rate table (misconfiguration)      │
//! │  │   ├── InvalidPolicy - engine built from an unusable QuotePolicy     │
//! │  │   └── AmountOverflow- price × units does not fit in i64             │
//! │  └── ValidationError   - One variant per violated input invariant      │
//! │                                                                         │
//! │  studio-cli errors (separate crate)                                    │
//! │  └── CliError          - config / file / JSON failures + QuoteError    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Messages are surfaced verbatim to the caller
//! 3. Errors are enum variants, never String
//! 4. Client errors and configuration faults stay distinguishable

use thiserror::Error;

use crate::types::RateBand;

// =============================================================================
// Quote Error
// =============================================================================

/// Errors returned by the quote engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// The input violated one of the reservation invariants.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The rate table has no row for a (band, headcount) pair that occurs in
    /// the reservation.
    ///
    /// ## When This Occurs
    /// ```text
    /// Override table covers headcount 1..=5
    ///      │
    ///      ▼
    /// Reservation grows to 7 people at 20:00
    ///      │
    ///      ▼
    /// RuleNotFound { band: Day, headcount: 7 }
    ///      │
    ///      ▼
    /// Caller reports "server misconfiguration", not "bad request"
    /// ```
    #[error("no pricing rule for band {band} with headcount {headcount}")]
    RuleNotFound { band: RateBand, headcount: u32 },

    /// The engine was configured with a policy it cannot run, such as a
    /// band schedule past midnight or a zero-length unit.
    #[error("invalid quote policy: {reason}")]
    InvalidPolicy { reason: String },

    /// An intermediate amount did not fit in the money representation.
    #[error("amount overflow while {context}")]
    AmountOverflow { context: &'static str },
}

impl QuoteError {
    /// Returns true when the caller can fix the problem by correcting the
    /// request (as opposed to a configuration fault on the pricing side).
    pub fn is_client_error(&self) -> bool {
        matches!(self, QuoteError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Variants are listed in the order the validator checks them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("start time must precede end time")]
    StartNotBeforeEnd,

    #[error("minimum reservation duration is {min_minutes} minutes")]
    TooShort { min_minutes: i64 },

    /// A headcount change sits on or outside the reservation edges.
    #[error("headcount change at {time} must fall strictly inside the reservation")]
    ChangeOutOfRange { time: String },

    #[error("duplicate headcount-change timestamps are not allowed ({time})")]
    DuplicateChangeTime { time: String },

    #[error("headcount must be between {min} and {max} (got {value})")]
    HeadcountOutOfRange { value: u32, min: u32, max: u32 },

    #[error("discount percentage must be between 0 and 100")]
    PercentageOutOfRange,

    #[error("fixed discount must not be negative")]
    NegativeFixedDiscount,

    /// A caller-supplied rate row carries a negative price.
    #[error("price per unit must not be negative for band {band} with headcount {headcount}")]
    NegativeRate { band: RateBand, headcount: u32 },

    #[error("rate table lists band {band} with headcount {headcount} more than once")]
    DuplicateRate { band: RateBand, headcount: u32 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with QuoteError.
pub type CoreResult<T> = Result<T, QuoteError>;

// =============================================================================
// Unit Tests
// =============================================================================
