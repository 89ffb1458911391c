use serde::Serialize;
use serde_json::Value;

use invoicedesk_invoicing::{
    FileAttachment, Invoice, InvoiceSummary, PaymentStatus, format_currency, format_date,
};

use crate::commands::CommandOutput;

/// Output format for CLI responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
}

/// Wrapper for consistent CLI output
#[derive(Debug, Serialize)]
struct SuccessEnvelope<T: Serialize> {
    status: &'static str,
    data: T,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    status: &'static str,
    error: &'a str,
}

/// Attachment metadata without the payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AttachmentView<'a> {
    id: String,
    filename: &'a str,
    size: u64,
    mime_type: &'a str,
    uploaded_at: String,
}

impl<'a> From<&'a FileAttachment> for AttachmentView<'a> {
    fn from(a: &'a FileAttachment) -> Self {
        Self {
            id: a.id.to_string(),
            filename: &a.filename,
            size: a.size,
            mime_type: &a.mime_type,
            uploaded_at: a.uploaded_at.to_rfc3339(),
        }
    }
}

/// Invoice JSON with attachment payloads left out; they can be large and are
/// retrieved with `export-attachment`.
fn invoice_json(invoice: &Invoice) -> Value {
    let mut value = serde_json::to_value(invoice).unwrap_or(Value::Null);
    if let Some(obj) = value.as_object_mut() {
        let attachments: Vec<AttachmentView<'_>> =
            invoice.attachments.iter().map(AttachmentView::from).collect();
        obj.insert(
            "attachments".to_string(),
            serde_json::to_value(attachments).unwrap_or(Value::Null),
        );
    }
    value
}

/// JSON data for an outcome (the `data` field of the envelope).
pub fn to_json(outcome: &CommandOutput) -> Value {
    match outcome {
        CommandOutput::Invoices(list) => Value::Array(list.iter().map(invoice_json).collect()),
        CommandOutput::Invoice(invoice) => invoice_json(invoice),
        CommandOutput::Attachment { invoice_id, attachment } => serde_json::json!({
            "invoiceId": invoice_id.to_string(),
            "attachment": AttachmentView::from(attachment),
        }),
        CommandOutput::Summary(summary) => serde_json::to_value(summary).unwrap_or(Value::Null),
        CommandOutput::Message(msg) => serde_json::json!({ "message": msg }),
    }
}

/// Human-readable rendering of an outcome.
pub fn to_text(outcome: &CommandOutput) -> String {
    match outcome {
        CommandOutput::Invoices(list) if list.is_empty() => "No invoices found.".to_string(),
        CommandOutput::Invoices(list) => list
            .iter()
            .map(invoice_row)
            .collect::<Vec<_>>()
            .join("\n"),
        CommandOutput::Invoice(invoice) => invoice_detail(invoice),
        CommandOutput::Attachment { invoice_id, attachment } => format!(
            "{} ({}, {} bytes) on invoice {}\nid: {}",
            attachment.filename, attachment.mime_type, attachment.size, invoice_id, attachment.id
        ),
        CommandOutput::Summary(summary) => summary_text(summary),
        CommandOutput::Message(msg) => msg.clone(),
    }
}

fn invoice_row(invoice: &Invoice) -> String {
    format!(
        "{}  {:<12}  {:<14}  {:<24}  {:>14}  {}",
        invoice.id,
        invoice.invoice_number,
        format_date(invoice.date),
        invoice.customer_name,
        format_currency(invoice.total),
        invoice.payment_status
    )
}

fn invoice_detail(invoice: &Invoice) -> String {
    let mut lines = vec![
        format!("Invoice {} ({})", invoice.invoice_number, invoice.id),
        format!("Date:     {}", format_date(invoice.date)),
        format!("Status:   {}", invoice.payment_status),
        format!("Customer: {} <{}>", invoice.customer_name, invoice.customer_email),
        format!("          {}", invoice.customer_address),
        String::new(),
    ];
    for item in &invoice.line_items {
        lines.push(format!(
            "  {:<32} {:>8} x {:>12} = {:>14}",
            item.description,
            item.quantity,
            format_currency(item.unit_price),
            format_currency(item.total)
        ));
    }
    lines.push(String::new());
    lines.push(format!("  Subtotal: {:>14}", format_currency(invoice.subtotal)));
    lines.push(format!("  Tax:      {:>14}", format_currency(invoice.tax)));
    lines.push(format!("  Total:    {:>14}", format_currency(invoice.total)));

    if !invoice.attachments.is_empty() {
        lines.push(String::new());
        lines.push(format!("Attachments ({} bytes):", invoice.attachments_size()));
        for a in &invoice.attachments {
            lines.push(format!("  {}  {} ({}, {} bytes)", a.id, a.filename, a.mime_type, a.size));
        }
    }
    lines.join("\n")
}

fn summary_text(summary: &InvoiceSummary) -> String {
    let mut lines = vec![format!("Invoices:    {}", summary.count)];
    for status in PaymentStatus::ALL {
        lines.push(format!(
            "  {:<16} {}",
            format!("{status}:"),
            summary.count_for(status)
        ));
    }
    lines.push(format!("Billed:      {}", format_currency(summary.total_billed)));
    lines.push(format!("Paid:        {}", format_currency(summary.total_paid)));
    lines.push(format!("Outstanding: {}", format_currency(summary.total_outstanding)));
    lines.join("\n")
}

/// Print a successful result in the chosen format
pub fn print_success(format: OutputFormat, outcome: &CommandOutput) {
    match format {
        OutputFormat::Json => {
            let envelope = SuccessEnvelope {
                status: "success",
                data: to_json(outcome),
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&envelope).unwrap_or_else(|e| format!(
                    "{{\"status\":\"error\",\"error\":\"Serialization failed: {}\"}}",
                    e
                ))
            );
        }
        OutputFormat::Text => println!("{}", to_text(outcome)),
    }
}

/// Print an error in the chosen format
pub fn print_error(format: OutputFormat, error: &str) {
    match format {
        OutputFormat::Json => {
            let envelope = ErrorEnvelope {
                status: "error",
                error,
            };
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&envelope).unwrap_or_else(|e| format!(
                    "{{\"status\":\"error\",\"error\":\"Serialization failed: {}\"}}",
                    e
                ))
            );
        }
        OutputFormat::Text => eprintln!("Error: {}", error),
    }
}
