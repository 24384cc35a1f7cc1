//! # studio-core: Pure Pricing Engine for Studio Reservations
//!
//! This crate turns a reservation request (start, end, headcount, optional
//! headcount changes and discount) into an itemized, integer-exact quote.
//! Everything here is a pure function with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Studio Quote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │        Callers (quote preview, invoice workflow, CLI)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteInput                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ studio-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  validation ──► segment ──► group ──► rates ──► discount        │   │
//! │  │       ▲             ▲                                           │   │
//! │  │       │           band                                          │   │
//! │  │       └───────── engine (orchestrates one synchronous pass)     │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ QuoteResult                            │
//! │                                ▼                                        │
//! │                 persisted / displayed by the caller                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire and domain types (QuoteInput, TimeSlot, QuoteResult, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`band`] - Day/night band classification
//! - [`segment`] - Interval segmentation into billable slots
//! - [`group`] - Aggregation of slots into (band, headcount) groups
//! - [`rates`] - Rate tables and rate resolution
//! - [`discount`] - Discount application
//! - [`validation`] - Input validation (runs before anything else)
//! - [`policy`] - Tunable engine parameters
//! - [`engine`] - The orchestrator
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use studio_core::{compute_quote, QuoteInput, RateBand};
//!
//! let day = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
//! let input = QuoteInput::new(
//!     day.and_hms_opt(10, 0, 0).unwrap(),
//!     day.and_hms_opt(12, 0, 0).unwrap(),
//!     2,
//! );
//!
//! let quote = compute_quote(&input).unwrap();
//! assert_eq!(quote.total_minutes, 120);
//! assert_eq!(quote.details.len(), 1);
//! assert_eq!(quote.details[0].band, RateBand::Day);
//! assert_eq!(quote.total.minor_units(), 4 * 20_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod band;
pub mod discount;
pub mod engine;
pub mod error;
pub mod group;
pub mod money;
pub mod policy;
pub mod rates;
pub mod segment;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use band::BandSchedule;
pub use engine::{compute_quote, QuoteEngine};
pub use error::{CoreResult, QuoteError, ValidationError};
pub use money::Money;
pub use policy::QuotePolicy;
pub use rates::{PricingRule, RateTable};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Length of one billable unit, in minutes.
pub const UNIT_DURATION_MINUTES: i64 = 30;

/// Shortest reservation that can be quoted.
///
/// ## Business Reason
/// Studio turnover (setup, teardown, cleaning) makes sessions under two hours
/// unprofitable, so they are refused up front rather than priced.
pub const MIN_RESERVATION_MINUTES: i64 = 120;

/// Smallest legal occupancy.
pub const MIN_HEADCOUNT: u32 = 1;

/// Largest legal occupancy (fire-code capacity of the live room).
pub const MAX_HEADCOUNT: u32 = 10;

/// Hour (local time) at which the DAY band begins.
pub const DAY_START_HOUR: u32 = 8;

/// Hour (local time) at which the NIGHT band begins.
pub const NIGHT_START_HOUR: u32 = 22;

/// Default DAY price per unit, in minor currency units.
pub const DEFAULT_DAY_RATE: i64 = 20_000;

/// Default NIGHT price per unit, in minor currency units.
pub const DEFAULT_NIGHT_RATE: i64 = 12_500;

/// Highest headcount covered by the built-in rate table.
///
/// Larger parties need a caller-supplied table.
pub const DEFAULT_TABLE_MAX_HEADCOUNT: u32 = 5;
