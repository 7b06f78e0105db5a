//! # till-core: Pure Invoicing Logic for Till
//!
//! This crate is the **heart** of Till. It contains the whole invoicing
//! engine as pure functions and plain data with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Till Architecture                            │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Front-end (SPA, out of repo)                │   │
//! │  │    Scan UI ──► Cart UI ──► Tender UI ──► Receipt UI         │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │ JSON                                │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                    till-engine                              │   │
//! │  │    InvoiceSession, ProductCatalog, SaleStore                │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                    │   │
//! │  │                                                             │   │
//! │  │  ┌────────┐ ┌─────────┐ ┌────────┐ ┌───────┐ ┌──────────┐  │   │
//! │  │  │ money  │ │ pricing │ │ stock  │ │ledger │ │ payment  │  │   │
//! │  │  │ Money  │ │ resolve │ │ guard  │ │ rows  │ │reconcile │  │   │
//! │  │  └────────┘ └─────────┘ └────────┘ └───────┘ └──────────┘  │   │
//! │  │                                                             │   │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, LineItem, PaymentRecord, etc.)
//! - [`money`] - Money type backed by exact decimal arithmetic (no floats!)
//! - [`error`] - Domain error types
//! - [`pricing`] - Rate resolution and the locked-price/MRP band
//! - [`stock`] - Availability checks against a live stock figure
//! - [`ledger`] - The cart: ordered line items and derived totals
//! - [`payment`] - Discount duality and payment classification
//! - [`validation`] - Operator-input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here;
//!    live data (stock figures, catalog rows) is passed in by the caller
//! 3. **Decimal Money**: All monetary values and quantities are exact
//!    decimals to avoid float rounding drift
//! 4. **Explicit Errors**: All errors are typed, never strings or panics

pub mod error;
pub mod ledger;
pub mod money;
pub mod payment;
pub mod pricing;
pub mod stock;
pub mod types;
pub mod validation;

pub use error::{EngineError, EngineResult, ValidationError};
pub use ledger::Ledger;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum rows allowed on a single invoice.
///
/// Prevents runaway carts and keeps receipts printable. Can be made
/// configurable per-store in future versions.
pub const MAX_LEDGER_ROWS: usize = 100;

/// Maximum quantity of a single row, in whole units.
///
/// Catches fat-finger entries (typing 1000 instead of 10). Fractional
/// weight-based quantities are always far below this cap.
pub const MAX_ROW_QUANTITY: i64 = 999;
