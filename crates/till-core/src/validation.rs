//! # Validation Module
//!
//! Operator-input validation for Till.
//!
//! Form fields arrive from the front-end as strings; everything here
//! turns them into typed values or a [`ValidationError`] before any
//! business logic runs. Layer order: front-end format checks, then this
//! module, then the engine's own rules (band, stock, capacity).
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{parse_quantity, parse_money};
//!
//! let qty = parse_quantity("quantity", "2.5").unwrap();
//! let cash = parse_money("cash", "150.00").unwrap();
//! assert!(parse_quantity("quantity", "lots").is_err());
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ROW_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Parsers
// =============================================================================

/// Parses a form field into an exact decimal.
///
/// Empty (after trimming) is `Required`; anything unparseable is
/// `NotNumeric`. The field name travels into the error for the UI.
pub fn parse_decimal(field: &str, raw: &str) -> ValidationResult<Decimal> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Decimal::from_str(raw).map_err(|_| ValidationError::NotNumeric {
        field: field.to_string(),
    })
}

/// Parses a form field into 2-decimal money.
pub fn parse_money(field: &str, raw: &str) -> ValidationResult<Money> {
    parse_decimal(field, raw).map(Money::new)
}

/// Parses and validates a sale quantity in one step.
pub fn parse_quantity(field: &str, raw: &str) -> ValidationResult<Decimal> {
    let qty = parse_decimal(field, raw)?;
    validate_quantity(field, qty)?;
    Ok(qty)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a sale quantity: strictly positive, capped at
/// [`MAX_ROW_QUANTITY`] whole units. Return quantities are validated as
/// magnitudes before the ledger negates them.
pub fn validate_quantity(field: &str, qty: Decimal) -> ValidationResult<()> {
    if qty <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if qty > Decimal::from(MAX_ROW_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: Decimal::ZERO,
            max: Decimal::from(MAX_ROW_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a tender amount (cash or card): zero is fine, negative is not.
pub fn validate_tender(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a discount percentage: 0 to 100 inclusive.
pub fn validate_discount_percent(percent: Decimal) -> ValidationResult<()> {
    if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "discount percent".to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a free-text item name: non-empty, at most 200 characters.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
