//! # Validation Module
//!
//! Input validation for identifiers, descriptions, rates and quantities.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Parsing (FromStr / serde)                                    │
//! │  ├── "18%" is a percentage, "100 INR" is money                         │
//! │  └── Malformed literals → ParseError                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Identifiers and descriptions are present and bounded              │
//! │  └── Rates and quantities are not negative → ValidationError           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Arithmetic                                                   │
//! │  └── Currency / unit mismatches at read time → CoreError               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pricing_core::validation::{validate_identifier, validate_quantity};
//! use pricing_core::Measure;
//!
//! validate_identifier("tax identifier", "VAT").unwrap();
//! assert!(validate_quantity(&Measure::from(-1)).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Measure, Percentage};
use crate::{MAX_DESCRIPTION_LEN, MAX_IDENTIFIER_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a tax or discount identifier.
///
/// ## Rules
/// - Must not be empty
/// - At most [`MAX_IDENTIFIER_LEN`] characters
/// - No whitespace (identifiers are bucket keys in breakdowns)
pub fn validate_identifier(field: &str, identifier: &str) -> ValidationResult<()> {
    if identifier.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if identifier.chars().count() > MAX_IDENTIFIER_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_IDENTIFIER_LEN,
        });
    }

    if identifier.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validates an item or add-on description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Rates may be zero but never negative.
pub fn validate_rate(field: &str, rate: Percentage) -> ValidationResult<()> {
    if rate.fraction().is_sign_negative() && !rate.is_zero() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Count quantities must not be negative. Spans are unsigned already.
pub fn validate_quantity(quantity: &Measure) -> ValidationResult<()> {
    if quantity.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
