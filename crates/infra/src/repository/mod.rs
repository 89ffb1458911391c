//! Invoice persistence boundary.
//!
//! Callers list invoices through a repository and filter the result with
//! `invoicedesk_invoicing::filter_invoices`; the repository itself never filters.

pub mod storage_repository;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use invoicedesk_core::{AttachmentId, DomainError, InvoiceId};
use invoicedesk_invoicing::{FileAttachment, Invoice, InvoiceDraft};

use crate::storage::StorageError;

pub use storage_repository::StorageInvoiceRepository;

/// Repository operation error.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("invoice {0} not found")]
    InvoiceNotFound(InvoiceId),

    #[error("attachment {attachment_id} not found on invoice {invoice_id}")]
    AttachmentNotFound {
        invoice_id: InvoiceId,
        attachment_id: AttachmentId,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("stored invoices are not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// CRUD over invoices and their attachments.
///
/// Timestamps are supplied by the caller (`now`) so that stores stay
/// deterministic under test.
pub trait InvoiceRepository: Send + Sync {
    /// All invoices, in insertion order.
    fn list(&self) -> Result<Vec<Invoice>, RepositoryError>;

    fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, RepositoryError>;

    /// Validate the draft, assign a fresh id and set both timestamps to `now`.
    fn create(&self, draft: InvoiceDraft, now: DateTime<Utc>) -> Result<Invoice, RepositoryError>;

    /// Validate the draft and overwrite the editable fields. Keeps id,
    /// `created_at` and attachments; sets `updated_at` to `now`.
    fn update(
        &self,
        id: InvoiceId,
        draft: InvoiceDraft,
        now: DateTime<Utc>,
    ) -> Result<Invoice, RepositoryError>;

    /// Remove the invoice together with its attachments and return it.
    fn delete(&self, id: InvoiceId) -> Result<Invoice, RepositoryError>;

    fn add_attachment(
        &self,
        id: InvoiceId,
        attachment: FileAttachment,
        now: DateTime<Utc>,
    ) -> Result<Invoice, RepositoryError>;

    fn remove_attachment(
        &self,
        id: InvoiceId,
        attachment_id: AttachmentId,
        now: DateTime<Utc>,
    ) -> Result<FileAttachment, RepositoryError>;
}

impl<R> InvoiceRepository for Arc<R>
where
    R: InvoiceRepository + ?Sized,
{
    fn list(&self) -> Result<Vec<Invoice>, RepositoryError> {
        (**self).list()
    }

    fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        (**self).get(id)
    }

    fn create(&self, draft: InvoiceDraft, now: DateTime<Utc>) -> Result<Invoice, RepositoryError> {
        (**self).create(draft, now)
    }

    fn update(
        &self,
        id: InvoiceId,
        draft: InvoiceDraft,
        now: DateTime<Utc>,
    ) -> Result<Invoice, RepositoryError> {
        (**self).update(id, draft, now)
    }

    fn delete(&self, id: InvoiceId) -> Result<Invoice, RepositoryError> {
        (**self).delete(id)
    }

    fn add_attachment(
        &self,
        id: InvoiceId,
        attachment: FileAttachment,
        now: DateTime<Utc>,
    ) -> Result<Invoice, RepositoryError> {
        (**self).add_attachment(id, attachment, now)
    }

    fn remove_attachment(
        &self,
        id: InvoiceId,
        attachment_id: AttachmentId,
        now: DateTime<Utc>,
    ) -> Result<FileAttachment, RepositoryError> {
        (**self).remove_attachment(id, attachment_id, now)
    }
}
