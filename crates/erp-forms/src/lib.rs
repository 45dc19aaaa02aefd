//! # erp-forms: Form Controllers for the ERP Sales Screens
//!
//! Owns the "document being edited" behind the sales-order, invoice and
//! payment screens. Every edit goes through `apply(change)`; totals are read
//! back from `erp-core` on the full snapshot.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input text ──► normalize::coerce_decimal ──► ItemChange / *Change      │
//! │                                                   │                     │
//! │                                                   ▼                     │
//! │                     FormState<InvoiceForm>::apply(change)               │
//! │                                                   │                     │
//! │                       ┌───────────────────────────┴─────────┐           │
//! │                       ▼                                     ▼           │
//! │               totals() (erp-core)                 validate() / payload │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`form`] - Invoice, sales-order and payment controllers
//! - [`state`] - Thread-safe shared form handle
//! - [`normalize`] - Raw text to decimal coercion
//! - [`config`] - `forms.toml` loading
//! - [`quote`] - Plain-text price breakdown for the CLI
//! - [`error`] - Form error types

pub mod config;
pub mod error;
pub mod form;
pub mod normalize;
pub mod quote;
pub mod state;

pub use config::FormsConfig;
pub use error::{FormError, FormResult};
pub use form::{
    DocumentForm, InvoiceChange, InvoiceForm, ItemChange, PaymentChange, PaymentForm,
    SalesOrderChange, SalesOrderForm,
};
pub use normalize::coerce_decimal;
pub use state::FormState;

use tracing_subscriber::EnvFilter;

/// Log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,erp=debug";

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every recompute
/// - `RUST_LOG=info` - Config loading only
///
/// Calling it twice is harmless; the second call is ignored.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
