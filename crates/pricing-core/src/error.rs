//! # Error Types
//!
//! Domain-specific error types for pricing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError            - Anything a pricing read or mutation can hit     │
//! │  ├── Parse            - Malformed price / tax / unit literal            │
//! │  ├── Validation       - Well-formed but unacceptable input              │
//! │  ├── Unimplemented    - base_price read on the bare PricingBase         │
//! │  ├── CurrencyMismatch - Arithmetic across two currencies                │
//! │  ├── Overflow         - Decimal or span arithmetic out of range         │
//! │  └── UnitMismatch     - Count divided by a date span (or vice versa)    │
//! │                                                                         │
//! │  Flow: ParseError ──► CoreError ──► caller (never logged and dropped)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending literal in parse errors
//! 3. Errors surface at the read that hit them; there are no partial totals

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while building or reading prices.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A literal could not be parsed. The inner error is passed through as-is.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An operation was invoked on a type that does not provide it.
    ///
    /// ## When This Occurs
    /// - Reading `base_price` on a bare [`PricingBase`](crate::pricing::PricingBase)
    ///   that has no concrete price source behind it
    #[error("{operation} is not implemented for {type_name}")]
    Unimplemented {
        operation: &'static str,
        type_name: &'static str,
    },

    /// Two money values in different currencies were combined.
    ///
    /// ## User Workflow
    /// ```text
    /// Item priced in INR
    ///      │
    ///      ▼
    /// apply_discount("promo", 10 USD)
    ///      │
    ///      ▼
    /// effective_price() ──► CurrencyMismatch { left: "INR", right: "USD" }
    /// ```
    #[error("Cannot combine {left} with {right}")]
    CurrencyMismatch { left: String, right: String },

    /// A quantity and a unit of incompatible kinds were divided.
    #[error("Cannot divide quantity {quantity} by unit {unit}")]
    UnitMismatch { quantity: String, unit: String },

    /// Decimal or span arithmetic left the representable range.
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    /// The unit divisor is zero.
    #[error("Unit must not be zero")]
    ZeroUnit,

    /// A tax definition list was built with no definitions.
    #[error("Tax definition list must not be empty")]
    EmptyTaxList,

    /// An add-on was included on an item that cannot carry add-ons.
    #[error("{description} does not accept add-ons")]
    AddonsUnsupported { description: String },

    /// An add-on was requested that is neither in the catalog nor priced by the caller.
    #[error("Add-on {key} is not in the catalog and no price was given")]
    UnknownAddon { key: String },

    /// Configuration could not be loaded.
    #[error("Invalid pricing configuration: {reason}")]
    Config { reason: String },

    /// A summary could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// Parse Error
// =============================================================================

/// Malformed literals for money, percentages, spans, prices and taxes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("'{value}' is not a valid money value: {reason}")]
    InvalidMoney { value: String, reason: String },

    #[error("'{value}' is not a valid currency code")]
    InvalidCurrency { value: String },

    #[error("'{value}' is not a valid percentage")]
    InvalidPercentage { value: String },

    #[error("'{value}' is not a valid date span")]
    InvalidDateSpan { value: String },

    #[error("'{value}' is not a valid {unit_type} unit")]
    InvalidUnit { value: String, unit_type: String },

    #[error("'{value}' is not a valid tax specification")]
    InvalidTax { value: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when parsed input doesn't meet requirements.
/// Used for early validation before any price is computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. whitespace inside an identifier).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
