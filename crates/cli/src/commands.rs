use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, Utc};

use invoicedesk_core::InvoiceId;
use invoicedesk_infra::{AppConfig, InvoiceRepository};
use invoicedesk_invoicing::{
    AttachmentUpload, FileAttachment, Invoice, InvoiceDraft, InvoiceSummary,
    check_attachment_size, filter_invoices, guess_mime_type,
};

use crate::args::Command;

/// What a command produced, rendered by `output`.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Invoices(Vec<Invoice>),
    Invoice(Invoice),
    Attachment {
        invoice_id: InvoiceId,
        attachment: FileAttachment,
    },
    Summary(InvoiceSummary),
    Message(String),
}

/// Run one command against a repository.
pub fn execute<R>(
    command: Command,
    repo: &R,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> Result<CommandOutput>
where
    R: InvoiceRepository + ?Sized,
{
    match command {
        Command::List(filter) => {
            let all = repo.list()?;
            let criteria = filter.to_criteria();
            let shown: Vec<Invoice> = filter_invoices(&all, &criteria)
                .into_iter()
                .cloned()
                .collect();
            tracing::debug!(total = all.len(), shown = shown.len(), "listed invoices");
            Ok(CommandOutput::Invoices(shown))
        }
        Command::Show { id } => {
            let invoice = repo
                .get(id)?
                .ok_or_else(|| anyhow!("invoice {id} not found"))?;
            Ok(CommandOutput::Invoice(invoice))
        }
        Command::Create {
            file,
            compute_totals,
        } => {
            let draft = read_draft(&file, compute_totals)?;
            let invoice = repo.create(draft, now)?;
            Ok(CommandOutput::Invoice(invoice))
        }
        Command::Update {
            id,
            file,
            compute_totals,
        } => {
            let draft = read_draft(&file, compute_totals)?;
            let invoice = repo.update(id, draft, now)?;
            Ok(CommandOutput::Invoice(invoice))
        }
        Command::Delete { id } => {
            let removed = repo.delete(id)?;
            Ok(CommandOutput::Message(format!(
                "Deleted invoice {} ({}) and {} attachment(s)",
                removed.invoice_number,
                removed.id,
                removed.attachments.len()
            )))
        }
        Command::Attach { id, path, mime } => {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| anyhow!("{} has no file name", path.display()))?;
            let len = fs::metadata(&path)
                .with_context(|| format!("failed to read {}", path.display()))?
                .len();
            check_attachment_size(&filename, len, config.max_attachment_bytes)?;
            let bytes =
                fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
            let mime_type = mime.unwrap_or_else(|| guess_mime_type(&filename).to_string());

            let attachment = AttachmentUpload::new(filename, mime_type, bytes)
                .into_attachment(config.max_attachment_bytes, now)?;
            let stored = attachment.clone();
            repo.add_attachment(id, attachment, now)?;
            Ok(CommandOutput::Attachment {
                invoice_id: id,
                attachment: stored,
            })
        }
        Command::Detach { id, attachment_id } => {
            let removed = repo.remove_attachment(id, attachment_id, now)?;
            Ok(CommandOutput::Message(format!(
                "Removed {} from invoice {id}",
                removed.filename
            )))
        }
        Command::ExportAttachment {
            id,
            attachment_id,
            out,
        } => {
            let invoice = repo
                .get(id)?
                .ok_or_else(|| anyhow!("invoice {id} not found"))?;
            let attachment = invoice
                .attachment(attachment_id)
                .ok_or_else(|| anyhow!("attachment {attachment_id} not found on invoice {id}"))?;
            fs::write(&out, attachment.decode()?)
                .with_context(|| format!("failed to write {}", out.display()))?;
            Ok(CommandOutput::Message(format!(
                "Wrote {} ({} bytes) to {}",
                attachment.filename,
                attachment.size,
                out.display()
            )))
        }
        Command::Summary(filter) => {
            let all = repo.list()?;
            let criteria = filter.to_criteria();
            let summary = InvoiceSummary::from_invoices(filter_invoices(&all, &criteria));
            Ok(CommandOutput::Summary(summary))
        }
    }
}

fn read_draft(path: &Path, compute_totals: bool) -> Result<InvoiceDraft> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    let draft: InvoiceDraft = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid invoice draft", path.display()))?;
    Ok(if compute_totals {
        draft.compute_totals()
    } else {
        draft
    })
}
