//! Service layer for habitlog
//!
//! Centralizes validation, report windows and token handling between the
//! HTTP handlers and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod auth_service;
mod entry_service;
mod error;
mod medicine_service;
pub mod token;

pub use auth_service::{AuthService, TokenPair};
pub use entry_service::EntryService;
pub use error::ServiceError;
pub use medicine_service::MedicineService;
pub use token::{Claims, TokenError, TokenKind, TokenSigner};

use habitlog_core::ValidationError;
use habitlog_core::time::parse_calendar_date;

/// Parse a `YYYY-MM-DD` path segment or report it against `field`.
pub(crate) fn require_date(
    field: &str,
    raw: &str,
) -> Result<chrono::NaiveDate, ValidationError> {
    parse_calendar_date(raw).ok_or_else(|| ValidationError::single(field, "Invalid date format"))
}
