use std::sync::Mutex;

use chrono::{DateTime, Utc};

use invoicedesk_core::{AttachmentId, InvoiceId};
use invoicedesk_invoicing::{FileAttachment, Invoice, InvoiceDraft};

use super::{InvoiceRepository, RepositoryError};
use crate::storage::{StorageBackend, StorageError};

/// Storage key the invoice list lives under unless overridden.
pub const DEFAULT_INVOICES_KEY: &str = "invoices";

/// Repository keeping the whole invoice list as one JSON document in a
/// `StorageBackend`.
///
/// Mutations are read-modify-write cycles serialized by an in-process lock.
#[derive(Debug)]
pub struct StorageInvoiceRepository<S> {
    storage: S,
    key: String,
    write_lock: Mutex<()>,
}

impl<S> StorageInvoiceRepository<S>
where
    S: StorageBackend,
{
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            key: DEFAULT_INVOICES_KEY.to_string(),
            write_lock: Mutex::new(()),
        }
    }

    fn load(&self) -> Result<Vec<Invoice>, RepositoryError> {
        match self.storage.get(&self.key)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, invoices: &[Invoice]) -> Result<(), RepositoryError> {
        let raw = serde_json::to_string(invoices)?;
        self.storage.set(&self.key, &raw)?;
        Ok(())
    }

    /// Run `f` against the current list and persist the result if it succeeds.
    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut Vec<Invoice>) -> Result<T, RepositoryError>,
    ) -> Result<T, RepositoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StorageError::Unavailable("repository lock poisoned".to_string()))?;

        let mut invoices = self.load()?;
        let out = f(&mut invoices)?;
        self.save(&invoices)?;
        Ok(out)
    }
}

fn find_mut(invoices: &mut [Invoice], id: InvoiceId) -> Result<&mut Invoice, RepositoryError> {
    invoices
        .iter_mut()
        .find(|inv| inv.id == id)
        .ok_or(RepositoryError::InvoiceNotFound(id))
}

impl<S> InvoiceRepository for StorageInvoiceRepository<S>
where
    S: StorageBackend,
{
    fn list(&self) -> Result<Vec<Invoice>, RepositoryError> {
        let invoices = self.load()?;
        tracing::debug!(count = invoices.len(), "loaded invoices");
        Ok(invoices)
    }

    fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, RepositoryError> {
        Ok(self.load()?.into_iter().find(|inv| inv.id == id))
    }

    fn create(&self, draft: InvoiceDraft, now: DateTime<Utc>) -> Result<Invoice, RepositoryError> {
        draft.validate()?;
        let invoice = Invoice::from_draft(InvoiceId::new(), draft, now);

        self.mutate(|invoices| {
            if invoices.iter().any(|i| i.invoice_number == invoice.invoice_number) {
                tracing::warn!(
                    invoice_number = %invoice.invoice_number,
                    "invoice number already in use"
                );
            }
            invoices.push(invoice.clone());
            Ok(())
        })?;

        tracing::info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            "invoice created"
        );
        Ok(invoice)
    }

    fn update(
        &self,
        id: InvoiceId,
        draft: InvoiceDraft,
        now: DateTime<Utc>,
    ) -> Result<Invoice, RepositoryError> {
        draft.validate()?;

        let updated = self.mutate(|invoices| {
            let invoice = find_mut(invoices, id)?;
            invoice.apply_draft(draft, now);
            Ok(invoice.clone())
        })?;

        tracing::info!(invoice_id = %id, "invoice updated");
        Ok(updated)
    }

    fn delete(&self, id: InvoiceId) -> Result<Invoice, RepositoryError> {
        let removed = self.mutate(|invoices| {
            let idx = invoices
                .iter()
                .position(|inv| inv.id == id)
                .ok_or(RepositoryError::InvoiceNotFound(id))?;
            Ok(invoices.remove(idx))
        })?;

        tracing::info!(
            invoice_id = %id,
            attachments = removed.attachments.len(),
            "invoice deleted"
        );
        Ok(removed)
    }

    fn add_attachment(
        &self,
        id: InvoiceId,
        attachment: FileAttachment,
        now: DateTime<Utc>,
    ) -> Result<Invoice, RepositoryError> {
        let attachment_id = attachment.id;
        let size = attachment.size;

        let updated = self.mutate(|invoices| {
            let invoice = find_mut(invoices, id)?;
            invoice.attachments.push(attachment);
            invoice.updated_at = now;
            Ok(invoice.clone())
        })?;

        tracing::info!(invoice_id = %id, %attachment_id, size, "attachment added");
        Ok(updated)
    }

    fn remove_attachment(
        &self,
        id: InvoiceId,
        attachment_id: AttachmentId,
        now: DateTime<Utc>,
    ) -> Result<FileAttachment, RepositoryError> {
        let removed = self.mutate(|invoices| {
            let invoice = find_mut(invoices, id)?;
            let idx = invoice
                .attachments
                .iter()
                .position(|a| a.id == attachment_id)
                .ok_or(RepositoryError::AttachmentNotFound {
                    invoice_id: id,
                    attachment_id,
                })?;
            let removed = invoice.attachments.remove(idx);
            invoice.updated_at = now;
            Ok(removed)
        })?;

        tracing::info!(invoice_id = %id, %attachment_id, "attachment removed");
        Ok(removed)
    }
}
