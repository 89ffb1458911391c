//! Invoicing domain module.
//!
//! This crate contains the invoice model and the pure functions the rest of the
//! workspace builds on: totals, filtering, formatting, validation and summary
//! statistics (no IO, no storage).

pub mod attachment;
pub mod filter;
pub mod format;
pub mod invoice;
pub mod summary;
pub mod totals;
pub mod validation;

pub use attachment::{AttachmentUpload, FileAttachment, check_attachment_size, guess_mime_type};
pub use filter::{DateRange, FilterCriteria, filter_invoices};
pub use format::{format_currency, format_date};
pub use invoice::{Invoice, InvoiceDraft, LineItem, PaymentStatus};
pub use summary::InvoiceSummary;
pub use totals::{InvoiceTotals, calculate_line_item_total, calculate_subtotal, calculate_total};
pub use validation::validate_email;

pub use invoicedesk_core::{AttachmentId, InvoiceId, LineItemId};
