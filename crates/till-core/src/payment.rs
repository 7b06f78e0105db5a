//! # Payment Reconciler
//!
//! Turns the ledger's gross total, an invoice-level discount and the
//! split cash/card tender into a finalized [`PaymentRecord`].
//!
//! ## Classification Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  net = gross - discount                                             │
//! │                                                                     │
//! │  net < 0                      → Return  (tender forced to zero,     │
//! │                                          balance = net)             │
//! │  net = 0, no tender           → Cash    (zero-value sale is still   │
//! │                                          a completed cash sale)     │
//! │  cash + card < net            → Credit  (balance negative)          │
//! │  cash > 0 and card > 0        → Cash & Card                         │
//! │  card > 0 only                → Card                                │
//! │  otherwise                    → Cash                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The discount arrives as either a percent or an absolute amount;
//! whichever the operator edited last wins and the other figure is
//! derived from it (no simultaneous solving).

use rust_decimal::{Decimal, RoundingStrategy};

use crate::money::Money;
use crate::types::{PaymentRecord, PaymentType};

/// Invoice-level discount as last entered by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountInput {
    /// Percent of the gross total (e.g. `10` for 10%).
    Percent(Decimal),
    /// Absolute amount off the gross total.
    Amount(Money),
}

impl DiscountInput {
    /// No discount.
    pub fn none() -> Self {
        DiscountInput::Amount(Money::zero())
    }
}

/// Derives the absolute discount for a percent entry.
pub fn amount_for_percent(gross: Money, percent: Decimal) -> Money {
    gross.percent_of(percent)
}

/// Derives the percent for an absolute discount entry, at 2 places.
/// A zero gross yields 0% (nothing to take a share of).
pub fn percent_for_amount(gross: Money, amount: Money) -> Decimal {
    if gross.is_zero() {
        return Decimal::ZERO;
    }
    (amount.amount() / gross.amount() * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Reconciles an invoice at checkout.
///
/// Pure function: persistence (posting the sale, printing) is the
/// session layer's concern. The returned record is the immutable
/// snapshot handed to the sale store.
pub fn reconcile(
    gross_total: Money,
    discount: DiscountInput,
    cash_pay: Money,
    card_pay: Money,
    customer_id: Option<String>,
) -> PaymentRecord {
    let (discount_percent, discount_amount) = match discount {
        DiscountInput::Percent(p) => (
            p.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
            amount_for_percent(gross_total, p),
        ),
        DiscountInput::Amount(a) => (percent_for_amount(gross_total, a), a),
    };

    let net_amount = gross_total - discount_amount;

    // A negative net is a pure return payout: tender is irrelevant and
    // forced to zero, and no further classification runs.
    if net_amount.is_negative() {
        return PaymentRecord {
            gross_total,
            discount_percent,
            discount_amount,
            net_amount,
            cash_pay: Money::zero(),
            card_pay: Money::zero(),
            balance: net_amount,
            payment_type: PaymentType::Return,
            customer_id,
        };
    }

    let tendered = cash_pay + card_pay;
    let balance = tendered - net_amount;

    let payment_type = if net_amount.is_zero() && cash_pay.is_zero() && card_pay.is_zero() {
        // Zero-value transaction: recorded as a completed cash sale.
        PaymentType::Cash
    } else if tendered < net_amount {
        PaymentType::Credit
    } else if cash_pay.is_positive() && card_pay.is_positive() {
        PaymentType::CashAndCard
    } else if card_pay.is_positive() {
        PaymentType::Card
    } else {
        PaymentType::Cash
    };

    PaymentRecord {
        gross_total,
        discount_percent,
        discount_amount,
        net_amount,
        cash_pay,
        card_pay,
        balance,
        payment_type,
        customer_id,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn money(minor: i64) -> Money {
        Money::from_minor_units(minor)
    }

    #[test]
    fn test_discount_percent_to_amount() {
        // gross 100.00, 10% → amount 10.00, net 90.00
        let record = reconcile(
            money(10000),
            DiscountInput::Percent(Decimal::TEN),
            money(9000),
            Money::zero(),
            None,
        );
        assert_eq!(record.discount_amount, money(1000));
        assert_eq!(record.discount_percent, Decimal::TEN);
        assert_eq!(record.net_amount, money(9000));
    }

    #[test]
    fn test_discount_amount_to_percent_last_write_wins() {
        // Overwriting with amount 25.00 on gross 100.00 → 25%
        let record = reconcile(
            money(10000),
            DiscountInput::Amount(money(2500)),
            money(7500),
            Money::zero(),
            None,
        );
        assert_eq!(record.discount_percent, Decimal::from(25));
        assert_eq!(record.net_amount, money(7500));
    }

    #[test]
    fn test_percent_for_amount_rounds_to_two_places() {
        // 10.00 of 30.00 = 33.333..% → 33.33
        assert_eq!(
            percent_for_amount(money(3000), money(1000)),
            Decimal::new(3333, 2)
        );
        // Zero gross never divides.
        assert_eq!(percent_for_amount(Money::zero(), money(500)), Decimal::ZERO);
    }

    #[test]
    fn test_cash_exact() {
        let record = reconcile(
            money(9000),
            DiscountInput::none(),
            money(9000),
            Money::zero(),
            None,
        );
        assert_eq!(record.payment_type, PaymentType::Cash);
        assert_eq!(record.balance, Money::zero());
    }

    #[test]
    fn test_card_exact() {
        let record = reconcile(
            money(9000),
            DiscountInput::none(),
            Money::zero(),
            money(9000),
            None,
        );
        assert_eq!(record.payment_type, PaymentType::Card);
        assert_eq!(record.balance, Money::zero());
    }

    #[test]
    fn test_cash_and_card_split() {
        let record = reconcile(
            money(9000),
            DiscountInput::none(),
            money(5000),
            money(4000),
            None,
        );
        assert_eq!(record.payment_type, PaymentType::CashAndCard);
        assert_eq!(record.balance, Money::zero());
    }

    #[test]
    fn test_credit_when_short() {
        let record = reconcile(
            money(9000),
            DiscountInput::none(),
            money(5000),
            Money::zero(),
            Some("C-042".to_string()),
        );
        assert_eq!(record.payment_type, PaymentType::Credit);
        assert_eq!(record.balance, money(-4000));
        assert_eq!(record.customer_id.as_deref(), Some("C-042"));
    }

    #[test]
    fn test_overpay_cash_gives_positive_balance() {
        let record = reconcile(
            money(9000),
            DiscountInput::none(),
            money(10000),
            Money::zero(),
            None,
        );
        assert_eq!(record.payment_type, PaymentType::Cash);
        assert_eq!(record.balance, money(1000));
    }

    #[test]
    fn test_negative_net_is_return() {
        // gross 10.00, discount 20.00 → net -10.00: tender zeroed.
        let record = reconcile(
            money(1000),
            DiscountInput::Amount(money(2000)),
            money(500),
            money(500),
            None,
        );
        assert_eq!(record.net_amount, money(-1000));
        assert_eq!(record.payment_type, PaymentType::Return);
        assert_eq!(record.cash_pay, Money::zero());
        assert_eq!(record.card_pay, Money::zero());
        assert_eq!(record.balance, money(-1000));
    }

    #[test]
    fn test_zero_value_sale_is_cash() {
        let record = reconcile(
            Money::zero(),
            DiscountInput::none(),
            Money::zero(),
            Money::zero(),
            None,
        );
        assert_eq!(record.payment_type, PaymentType::Cash);
        assert_eq!(record.balance, Money::zero());
    }

    #[test]
    fn test_no_tender_on_positive_net_is_credit() {
        let record = reconcile(
            money(1000),
            DiscountInput::none(),
            Money::zero(),
            Money::zero(),
            None,
        );
        assert_eq!(record.payment_type, PaymentType::Credit);
        assert_eq!(record.balance, money(-1000));
    }
}
