//! # Pricing Resolver
//!
//! Resolves the unit rate for a product under the session's pricing mode
//! and polices manual rate entry against the locked-price/MRP band.
//!
//! ## Rate Resolution
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Scan / mode switch                                                 │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  resolve_rate(product, mode)                                        │
//! │       │                                                             │
//! │       ├── Normal    → product.mrp_price                             │
//! │       ├── Wholesale → product.wholesale_price                       │
//! │       └── Discount  → product.discount_price                        │
//! │                                                                     │
//! │  Operator overrides the rate?                                       │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  validate_manual_rate(entered, product, mode)                       │
//! │       │                                                             │
//! │       ├── Normal    → locked_price <= entered <= mrp_price          │
//! │       └── Wholesale / Discount → no band, any value accepted        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The missing band in Wholesale/Discount mode is inherited business
//! policy carried over as-is; it has been flagged to product owners as a
//! possible oversight rather than silently tightened here.

use crate::error::{EngineError, EngineResult};
use crate::money::Money;
use crate::types::{PricingMode, Product};

/// Returns the applicable unit rate for `product` under `mode`.
///
/// Pure function; the caller decides what to do with the result (the
/// resolved rate is still editable by the operator).
pub fn resolve_rate(product: &Product, mode: PricingMode) -> Money {
    match mode {
        PricingMode::Normal => product.mrp_price,
        PricingMode::Wholesale => product.wholesale_price,
        PricingMode::Discount => product.discount_price,
    }
}

/// Validates an operator-entered rate against the product's price band.
///
/// In Normal mode the rate must sit inside `[locked_price, mrp_price]`.
/// Wholesale and Discount modes accept any value, including negative
/// rates (which turn the row return-flavored, see [`crate::types::LineItem`]).
pub fn validate_manual_rate(
    entered: Money,
    product: &Product,
    mode: PricingMode,
) -> EngineResult<()> {
    if mode != PricingMode::Normal {
        return Ok(());
    }

    if entered < product.locked_price || entered > product.mrp_price {
        return Err(EngineError::RateOutOfBand {
            entered,
            floor: product.locked_price,
            ceiling: product.mrp_price,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product {
            product_id: "P-001".to_string(),
            barcode: "4791234567890".to_string(),
            name: "Milk 1L".to_string(),
            cost_price: Money::from_minor_units(700),
            mrp_price: Money::from_minor_units(1000),
            wholesale_price: Money::from_minor_units(850),
            discount_price: Money::from_minor_units(900),
            locked_price: Money::from_minor_units(800),
        }
    }

    #[test]
    fn test_resolve_rate_per_mode() {
        let p = product();
        assert_eq!(resolve_rate(&p, PricingMode::Normal), p.mrp_price);
        assert_eq!(resolve_rate(&p, PricingMode::Wholesale), p.wholesale_price);
        assert_eq!(resolve_rate(&p, PricingMode::Discount), p.discount_price);
    }

    #[test]
    fn test_normal_mode_band_inclusive() {
        let p = product();
        assert!(validate_manual_rate(p.locked_price, &p, PricingMode::Normal).is_ok());
        assert!(validate_manual_rate(p.mrp_price, &p, PricingMode::Normal).is_ok());
        assert!(validate_manual_rate(Money::from_minor_units(900), &p, PricingMode::Normal).is_ok());
    }

    #[test]
    fn test_normal_mode_rejects_outside_band() {
        let p = product();
        let below = validate_manual_rate(Money::from_minor_units(799), &p, PricingMode::Normal);
        assert!(matches!(below, Err(EngineError::RateOutOfBand { .. })));

        let above = validate_manual_rate(Money::from_minor_units(1001), &p, PricingMode::Normal);
        match above {
            Err(EngineError::RateOutOfBand { floor, ceiling, .. }) => {
                assert_eq!(floor, p.locked_price);
                assert_eq!(ceiling, p.mrp_price);
            }
            other => panic!("expected RateOutOfBand, got {other:?}"),
        }
    }

    /// Wholesale/Discount modes carry no band at all - inherited policy.
    #[test]
    fn test_other_modes_accept_any_rate() {
        let p = product();
        for mode in [PricingMode::Wholesale, PricingMode::Discount] {
            assert!(validate_manual_rate(Money::from_minor_units(1), &p, mode).is_ok());
            assert!(validate_manual_rate(Money::from_minor_units(99999), &p, mode).is_ok());
            assert!(validate_manual_rate(Money::from_minor_units(-500), &p, mode).is_ok());
        }
    }
}
