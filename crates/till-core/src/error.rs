//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  till-core errors (this file)                                       │
//! │  ├── EngineError      - Invoicing rule violations                   │
//! │  └── ValidationError  - Operator-input failures                     │
//! │                                                                     │
//! │  till-engine                                                        │
//! │  └── re-uses EngineError; collaborator failures arrive as           │
//! │      EngineError::Persistence / ProductNotFound                     │
//! │                                                                     │
//! │  Flow: ValidationError → EngineError → front-end message            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure here is locally recoverable: it rejects one attempted
//! mutation and leaves the ledger untouched (quantity edits roll back to
//! their pre-edit snapshot). The engine never enters an unrecoverable
//! state from a single failed operation.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Engine Error
// =============================================================================

/// Invoicing engine errors.
///
/// These represent business rule violations; each variant maps to a
/// user-facing message on the till screen.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Barcode or product lookup miss.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Cumulative requested quantity exceeds recorded stock.
    ///
    /// `already_in_cart` is the quantity of the same product on other
    /// rows of the current invoice, so the operator can see why a
    /// seemingly small request was refused.
    #[error(
        "Insufficient stock for {product_id}: available {available}, \
         already in cart {already_in_cart}, requested {requested}"
    )]
    InsufficientStock {
        product_id: String,
        available: Decimal,
        already_in_cart: Decimal,
        requested: Decimal,
    },

    /// Manually entered rate is outside the locked-price/MRP band.
    ///
    /// Only raised in Normal pricing mode; Wholesale and Discount modes
    /// impose no band (inherited business policy, see `pricing`).
    #[error("Rate {entered} is outside the allowed band {floor} - {ceiling}")]
    RateOutOfBand {
        entered: Money,
        floor: Money,
        ceiling: Money,
    },

    /// Free-text item priced above its own MRP.
    #[error("Rate {rate} exceeds MRP {mrp}")]
    RateExceedsMrp { rate: Money, mrp: Money },

    /// Row index does not exist on the current invoice.
    #[error("No line item at row {0}")]
    RowNotFound(usize),

    /// Checkout attempted with no line items.
    #[error("Invoice has no line items")]
    EmptyLedger,

    /// Invoice has hit the row cap.
    #[error("Invoice cannot have more than {max} rows")]
    LedgerFull { max: usize },

    /// The sale store rejected or failed the submission.
    /// The ledger is left untouched so the operator can retry.
    #[error("Failed to persist sale: {message}")]
    Persistence { message: String },

    /// Operator-input validation failure (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Operator-input validation errors.
///
/// Raised before any business logic runs, at the point where form-field
/// strings become typed values.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value did not parse as a decimal number.
    #[error("{field} must be a number")]
    NotNumeric { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    MustNotBeNegative { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_stock_message() {
        let err = EngineError::InsufficientStock {
            product_id: "P-001".to_string(),
            available: Decimal::from(5),
            already_in_cart: Decimal::from(4),
            requested: Decimal::from(10),
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for P-001: available 5, already in cart 4, requested 10"
        );
    }

    #[test]
    fn test_rate_out_of_band_message() {
        let err = EngineError::RateOutOfBand {
            entered: Money::from_minor_units(450),
            floor: Money::from_minor_units(500),
            ceiling: Money::from_minor_units(1000),
        };
        assert_eq!(
            err.to_string(),
            "Rate 4.50 is outside the allowed band 5.00 - 10.00"
        );
    }

    #[test]
    fn test_validation_converts_to_engine_error() {
        let validation_err = ValidationError::Required {
            field: "quantity".to_string(),
        };
        let engine_err: EngineError = validation_err.into();
        assert!(matches!(engine_err, EngineError::Validation(_)));
    }
}
