//! # Domain Types
//!
//! Core domain types used throughout Till.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │    Product     │   │    LineItem    │   │ PaymentRecord  │      │
//! │  │  ────────────  │   │  ────────────  │   │  ────────────  │      │
//! │  │  product_id    │   │  name, kind    │   │  gross/net     │      │
//! │  │  barcode       │   │  rate, qty     │   │  cash/card     │      │
//! │  │  price tiers   │   │  amount        │   │  balance, type │      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! │                                                                     │
//! │  ┌────────────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │  PricingMode   │   │    LineKind    │   │  PaymentType   │      │
//! │  │  Normal        │   │  NewSale       │   │  Cash, Card    │      │
//! │  │  Wholesale     │   │  OtherItem     │   │  CashAndCard   │      │
//! │  │  Discount      │   │  Return        │   │  Credit, Return│      │
//! │  └────────────────┘   └────────────────┘   └────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A catalog product, as returned by the product-lookup collaborator.
///
/// Carries every pricing tier so the resolver never needs a second
/// round-trip when the operator switches pricing mode mid-invoice.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier.
    pub product_id: String,

    /// Scan code (EAN-13, UPC-A, etc.).
    pub barcode: String,

    /// Display name shown to the operator and on the receipt.
    pub name: String,

    /// Purchase cost, kept on the line for margin reporting.
    pub cost_price: Money,

    /// Maximum Retail Price - the standard listed sale price.
    pub mrp_price: Money,

    /// Wholesale tier price.
    pub wholesale_price: Money,

    /// Discount tier price.
    pub discount_price: Money,

    /// Floor price below which normal-mode manual entry is rejected.
    pub locked_price: Money,
}

// =============================================================================
// Pricing Mode
// =============================================================================

/// The pricing tier selected for the current invoice session.
///
/// A single enum rather than independent wholesale/discount flags: the
/// modes are mutually exclusive and switching is plain assignment, so the
/// illegal both-at-once state cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PricingMode {
    /// Standard retail pricing (MRP, with the locked-price band).
    #[default]
    Normal,
    /// Wholesale tier.
    Wholesale,
    /// Discount tier.
    Discount,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PricingMode::Normal => "Normal",
            PricingMode::Wholesale => "Wholesale",
            PricingMode::Discount => "Discount",
        };
        write!(f, "{s}")
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// What kind of row a line item is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LineKind {
    /// A scanned catalog sale.
    NewSale,
    /// A free-text item with operator-entered prices.
    OtherItem,
    /// A customer return; every monetary field is carried negated.
    Return,
}

/// One row of the invoice ledger.
///
/// ## Sign conventions
/// - `NewSale`/`OtherItem`: `amount = rate × quantity`, all non-negative
///   under normal entry.
/// - `Return`: cost, rate, discount, quantity and amount are all carried
///   as negated magnitudes; `amount = rate × |quantity|` so a returned
///   unit subtracts its value from the invoice total exactly once.
/// - A manually entered negative rate turns any row return-flavored: the
///   quantity sign is forced negative and the row bypasses the stock
///   guard (see [`crate::stock`]).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    /// Catalog id; absent for free-text "other" items.
    pub product_id: Option<String>,

    /// Scan code; absent for free-text "other" items.
    pub barcode: Option<String>,

    /// Display name, frozen at the time the row was added.
    pub name: String,

    /// Purchase cost per unit (negated on returns).
    pub cost: Money,

    /// MRP per unit at the time the row was added.
    pub mrp: Money,

    /// Per-unit discount, `mrp - rate` (negated on returns).
    pub discount: Money,

    /// Charged unit rate (negated on returns).
    pub rate: Money,

    /// Quantity; fractional for weight-based items, negative on returns.
    #[ts(as = "String")]
    pub quantity: Decimal,

    /// Row amount; invariant maintained by [`LineItem::recompute_amount`].
    pub amount: Money,

    /// Row classification.
    pub kind: LineKind,
}

impl LineItem {
    /// Re-derives `amount` from `rate` and `quantity`, enforcing the sign
    /// conventions above. Call after every rate or quantity write.
    pub fn recompute_amount(&mut self) {
        if self.rate.is_negative() {
            // Return-flavored row: quantity is forced negative and the
            // amount is rate × magnitude, keeping the row's contribution
            // to the invoice total negative.
            self.quantity = -self.quantity.abs();
            self.amount = self.rate.multiply_quantity(self.quantity.abs());
        } else {
            self.amount = self.rate.multiply_quantity(self.quantity);
        }
    }

    /// True for rows that bypass the stock guard (pre-validated returns).
    #[inline]
    pub fn is_return_flavored(&self) -> bool {
        self.rate.is_negative()
    }
}

// =============================================================================
// Ledger Totals
// =============================================================================

/// Derived aggregates over the current ledger rows.
///
/// `total_amount` includes Return rows (they subtract); the quantity,
/// discount and item-count aggregates deliberately exclude them - the
/// displayed counters describe what is being sold, not what came back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LedgerTotals {
    /// Σ amount over all rows, returns included.
    pub total_amount: Money,

    /// Σ quantity over sale rows only.
    #[ts(as = "String")]
    pub total_quantity: Decimal,

    /// Σ (discount × quantity) over sale rows only.
    pub total_discount: Money,

    /// Count of sale rows only.
    pub item_count: usize,
}

impl LedgerTotals {
    /// Totals of an empty ledger.
    pub fn empty() -> Self {
        LedgerTotals {
            total_amount: Money::zero(),
            total_quantity: Decimal::ZERO,
            total_discount: Money::zero(),
            item_count: 0,
        }
    }
}

// =============================================================================
// Payment
// =============================================================================

/// How a finalized invoice was settled. Derived, never operator-chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum PaymentType {
    /// Settled fully in cash (includes zero-value invoices).
    Cash,
    /// Settled fully by card.
    Card,
    /// Split tender covering the net amount.
    CashAndCard,
    /// Tender short of the net amount; remainder owed by the customer.
    Credit,
    /// Net amount was negative - a pure return payout.
    Return,
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentType::Cash => "Cash",
            PaymentType::Card => "Card",
            PaymentType::CashAndCard => "Cash & Card",
            PaymentType::Credit => "Credit",
            PaymentType::Return => "Return",
        };
        write!(f, "{s}")
    }
}

/// Finalized checkout snapshot. Immutable once submitted.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PaymentRecord {
    /// Ledger total before the invoice-level discount.
    pub gross_total: Money,

    /// Invoice-level discount as a percentage of gross.
    #[ts(as = "String")]
    pub discount_percent: Decimal,

    /// Invoice-level discount as an absolute amount.
    pub discount_amount: Money,

    /// `gross_total - discount_amount`.
    pub net_amount: Money,

    /// Cash tendered.
    pub cash_pay: Money,

    /// Card tendered.
    pub card_pay: Money,

    /// `cash_pay + card_pay - net_amount` (negative when short).
    pub balance: Money,

    /// Derived settlement classification.
    pub payment_type: PaymentType,

    /// Customer on account, when known (required to carry Credit).
    pub customer_id: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_mode_default_is_normal() {
        assert_eq!(PricingMode::default(), PricingMode::Normal);
    }

    #[test]
    fn test_recompute_amount_sale_row() {
        let mut row = LineItem {
            product_id: Some("P-001".to_string()),
            barcode: Some("4791234567890".to_string()),
            name: "Milk 1L".to_string(),
            cost: Money::from_minor_units(800),
            mrp: Money::from_minor_units(1100),
            discount: Money::from_minor_units(100),
            rate: Money::from_minor_units(1000),
            quantity: Decimal::from(3),
            amount: Money::zero(),
            kind: LineKind::NewSale,
        };
        row.recompute_amount();
        assert_eq!(row.amount, Money::from_minor_units(3000));
    }

    #[test]
    fn test_recompute_amount_negative_rate_forces_negative_quantity() {
        let mut row = LineItem {
            product_id: Some("P-001".to_string()),
            barcode: Some("4791234567890".to_string()),
            name: "Milk 1L".to_string(),
            cost: Money::from_minor_units(-800),
            mrp: Money::from_minor_units(1100),
            discount: Money::from_minor_units(-100),
            rate: Money::from_minor_units(-1000),
            quantity: Decimal::from(2), // entered positive by mistake
            amount: Money::zero(),
            kind: LineKind::Return,
        };
        row.recompute_amount();
        assert_eq!(row.quantity, Decimal::from(-2));
        assert_eq!(row.amount, Money::from_minor_units(-2000));
        assert!(row.is_return_flavored());
    }

    #[test]
    fn test_serde_camel_case() {
        let totals = LedgerTotals::empty();
        let json = serde_json::to_string(&totals).unwrap();
        assert!(json.contains("totalAmount"));
        assert!(json.contains("itemCount"));
    }

    #[test]
    fn test_payment_type_display() {
        assert_eq!(PaymentType::CashAndCard.to_string(), "Cash & Card");
        assert_eq!(PaymentType::Return.to_string(), "Return");
    }
}
