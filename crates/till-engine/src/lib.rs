//! # till-engine: Invoice Session Orchestration
//!
//! Sits between the front-end and [`till_core`]: owns the per-invoice
//! mutable state ([`session::InvoiceSession`]), fetches live data from
//! the external collaborators ([`collab::ProductCatalog`],
//! [`collab::SaleStore`]) and drives the pure engine rules around every
//! operator action.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Operator action (scan / edit / checkout)                           │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  InvoiceSession  ──lookup──►  ProductCatalog (external)             │
//! │       │                                                             │
//! │       ├── pricing::resolve_rate / validate_manual_rate              │
//! │       ├── stock::check_quantity (against the fetched figure)        │
//! │       ├── Ledger mutation (+ rollback on refused edits)             │
//! │       └── payment::reconcile ──submit──► SaleStore (external)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations are evaluated strictly sequentially per session: the
//! design assumes a single operator at a single till, so there is no
//! cross-session stock reservation or multi-terminal coordination.

pub mod collab;
pub mod memory;
pub mod session;

pub use collab::{ProductCatalog, SaleDraft, SaleStore};
pub use memory::{MemoryCatalog, MemoryStore};
pub use session::{CheckoutReceipt, InvoiceSession};
