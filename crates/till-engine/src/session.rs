//! # Invoice Session
//!
//! The per-invoice state machine: one open bill at one till, driven by
//! operator actions. Every mutating operation re-runs the relevant core
//! rules (pricing band, stock guard) around the ledger write and either
//! lands completely or leaves the ledger as it was.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use till_core::payment::{self, DiscountInput};
use till_core::validation::{
    parse_decimal, parse_money, parse_quantity, validate_discount_percent, validate_item_name,
    validate_quantity, validate_tender,
};
use till_core::{
    pricing, stock, EngineError, EngineResult, Ledger, LedgerTotals, PaymentRecord, PricingMode,
    Product,
};

use crate::collab::{ProductCatalog, SaleDraft, SaleStore};

/// What the operator gets back from a confirmed checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    /// Invoice id generated by the sale store.
    pub invoice_id: String,
    /// The reconciled payment snapshot as submitted.
    pub payment: PaymentRecord,
}

/// One open invoice at one till.
///
/// Operations are strictly sequential: each takes `&mut self`, so two
/// scans for the same product can never interleave their stock checks
/// within a session. Multi-terminal coordination is out of scope.
pub struct InvoiceSession<C, S> {
    catalog: C,
    store: S,
    ledger: Ledger,
    mode: PricingMode,
}

impl<C: ProductCatalog, S: SaleStore> InvoiceSession<C, S> {
    /// Opens a fresh session in Normal pricing mode.
    pub fn new(catalog: C, store: S) -> Self {
        InvoiceSession {
            catalog,
            store,
            ledger: Ledger::new(),
            mode: PricingMode::default(),
        }
    }

    /// The current pricing mode.
    pub fn pricing_mode(&self) -> PricingMode {
        self.mode
    }

    /// Switches the pricing tier for subsequent scans.
    ///
    /// Modes are mutually exclusive by construction: selecting Wholesale
    /// leaves Discount, and vice versa, because there is only one mode.
    /// Existing rows keep their already-resolved rates.
    pub fn set_pricing_mode(&mut self, mode: PricingMode) {
        if mode != self.mode {
            info!(from = %self.mode, to = %mode, "pricing mode switched");
            self.mode = mode;
        }
    }

    /// The current ledger rows.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Derived aggregates for the current row set.
    pub fn totals(&self) -> LedgerTotals {
        self.ledger.totals()
    }

    /// The catalog collaborator (exposed for typeahead callers).
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The sale store collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Records a barcode scan.
    ///
    /// Resolves the product and its rate under the current pricing mode,
    /// runs the stock guard for one more unit, then merges into an
    /// existing row or appends a new one. Returns the affected row index.
    pub async fn scan_barcode(&mut self, barcode: &str) -> EngineResult<usize> {
        debug!(barcode = %barcode, mode = %self.mode, "scan");

        let product = self.catalog.lookup_by_barcode(barcode).await?;
        let rate = pricing::resolve_rate(&product, self.mode);

        if !rate.is_negative() {
            let available = self.catalog.available_stock(barcode).await?;
            stock::check_quantity(
                &product.product_id,
                Decimal::ONE,
                available,
                self.ledger.rows(),
                None,
            )?;
        }

        let row = self.ledger.scan(&product, rate)?;
        debug!(row, product_id = %product.product_id, rate = %rate, "scan recorded");
        Ok(row)
    }

    /// Adds a free-text "other" item from raw form fields.
    pub async fn add_other_item(
        &mut self,
        name: &str,
        cost: &str,
        mrp: &str,
        rate: &str,
        quantity: &str,
    ) -> EngineResult<usize> {
        validate_item_name(name)?;
        let cost = parse_money("cost", cost)?;
        let mrp = parse_money("mrp", mrp)?;
        let rate = parse_money("rate", rate)?;
        let quantity = parse_quantity("quantity", quantity)?;

        let row = self
            .ledger
            .add_other_item(name.trim(), cost, mrp, rate, quantity)?;
        debug!(row, name = %name.trim(), "other item added");
        Ok(row)
    }

    /// Records a customer return for a catalog product.
    ///
    /// Quantity is entered as a magnitude; the ledger stores the row with
    /// negated figures. Returns bypass the stock guard.
    pub async fn add_return(
        &mut self,
        barcode: &str,
        sale_rate: &str,
        quantity: &str,
    ) -> EngineResult<usize> {
        let product = self.catalog.lookup_by_barcode(barcode).await?;
        let sale_rate = parse_money("sale rate", sale_rate)?;
        let quantity = parse_quantity("quantity", quantity)?;

        let row = self.ledger.add_return(&product, sale_rate, quantity)?;
        info!(row, product_id = %product.product_id, quantity = %quantity, "return recorded");
        Ok(row)
    }

    /// Edits a row's quantity from a raw form field.
    ///
    /// The write is applied optimistically, then the stock guard re-runs
    /// against live stock; a refusal restores the pre-edit quantity and
    /// amount exactly. Return-flavored rows (negative rate) skip the
    /// guard and keep their forced-negative quantity.
    pub async fn set_quantity(&mut self, row_index: usize, quantity: &str) -> EngineResult<()> {
        let row = self
            .ledger
            .rows()
            .get(row_index)
            .ok_or(EngineError::RowNotFound(row_index))?;

        let return_flavored = row.is_return_flavored();
        let guard_key = match (&row.product_id, &row.barcode) {
            (Some(product_id), Some(barcode)) => Some((product_id.clone(), barcode.clone())),
            _ => None, // free-text items are not stock-tracked
        };

        let quantity = if return_flavored {
            // Sign is forced by the ledger; validate the magnitude only.
            let q = parse_decimal("quantity", quantity)?;
            validate_quantity("quantity", q.abs())?;
            q
        } else {
            parse_quantity("quantity", quantity)?
        };

        let snapshot = self.ledger.apply_quantity(row_index, quantity)?;

        if !return_flavored {
            if let Some((product_id, barcode)) = guard_key {
                let available = match self.catalog.available_stock(&barcode).await {
                    Ok(available) => available,
                    Err(err) => {
                        self.ledger.restore(row_index, snapshot);
                        return Err(err);
                    }
                };

                if let Err(err) = stock::check_quantity(
                    &product_id,
                    quantity,
                    available,
                    self.ledger.rows(),
                    Some(row_index),
                ) {
                    warn!(row = row_index, product_id = %product_id, "quantity edit refused, rolled back");
                    self.ledger.restore(row_index, snapshot);
                    return Err(err);
                }
            }
        }

        debug!(row = row_index, quantity = %quantity, "quantity updated");
        Ok(())
    }

    /// Overrides a row's unit rate from a raw form field.
    ///
    /// Catalog rows are validated against the locked-price/MRP band under
    /// the current pricing mode; free-text rows only against their own
    /// MRP. A negative rate turns the row return-flavored.
    pub async fn set_manual_rate(&mut self, row_index: usize, rate: &str) -> EngineResult<()> {
        let rate = parse_money("rate", rate)?;

        let row = self
            .ledger
            .rows()
            .get(row_index)
            .ok_or(EngineError::RowNotFound(row_index))?;

        match &row.barcode {
            Some(barcode) => {
                let product = self.catalog.lookup_by_barcode(barcode).await?;
                pricing::validate_manual_rate(rate, &product, self.mode)?;
            }
            None => {
                if rate > row.mrp {
                    return Err(EngineError::RateExceedsMrp { rate, mrp: row.mrp });
                }
            }
        }

        self.ledger.set_rate(row_index, rate)?;
        debug!(row = row_index, rate = %rate, "rate updated");
        Ok(())
    }

    /// Removes a row. Confirmation happens in the UI before this call.
    pub fn delete_row(&mut self, row_index: usize) -> EngineResult<()> {
        let removed = self.ledger.delete_row(row_index)?;
        debug!(row = row_index, name = %removed.name, "row deleted");
        Ok(())
    }

    /// "Close Bill": discards the in-progress invoice after the UI-side
    /// confirmation step.
    pub fn close_bill(&mut self) {
        info!(rows = self.ledger.len(), "bill closed without checkout");
        self.ledger.clear();
    }

    /// Confirms the checkout: reconciles the payment, submits the sale
    /// and clears the ledger.
    ///
    /// On a persistence failure the ledger is left untouched so the
    /// operator can retry; nothing is cleared until the store has
    /// returned an invoice id.
    pub async fn checkout(
        &mut self,
        discount: DiscountInput,
        cash: &str,
        card: &str,
        customer_id: Option<String>,
    ) -> EngineResult<CheckoutReceipt> {
        if self.ledger.is_empty() {
            return Err(EngineError::EmptyLedger);
        }

        let cash = parse_money("cash", cash)?;
        let card = parse_money("card", card)?;
        validate_tender("cash", cash)?;
        validate_tender("card", card)?;
        if let DiscountInput::Percent(p) = discount {
            validate_discount_percent(p)?;
        }

        let gross = self.ledger.totals().total_amount;
        let record = payment::reconcile(gross, discount, cash, card, customer_id);

        let draft = SaleDraft {
            payment: record.clone(),
            items: self.ledger.rows().to_vec(),
            finalized_at: chrono::Utc::now(),
        };

        let invoice_id = self.store.submit_sale(&draft).await?;
        self.ledger.clear();

        info!(
            invoice_id = %invoice_id,
            net = %record.net_amount,
            payment_type = %record.payment_type,
            items = draft.items.len(),
            "sale submitted"
        );

        Ok(CheckoutReceipt {
            invoice_id,
            payment: record,
        })
    }

    /// Catalog typeahead passthrough.
    pub async fn search_products(&self, query: &str) -> EngineResult<Vec<Product>> {
        self.catalog.search(query).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
