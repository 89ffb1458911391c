use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use invoicedesk_core::{AttachmentId, DomainError, Entity, InvoiceId, LineItemId};

use crate::attachment::FileAttachment;
use crate::totals::{calculate_line_item_total, calculate_subtotal, calculate_total};

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
    PartiallyPaid,
    Overdue,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 4] = [
        PaymentStatus::Paid,
        PaymentStatus::Unpaid,
        PaymentStatus::PartiallyPaid,
        PaymentStatus::Overdue,
    ];

    /// Human-readable label (`Partially Paid`).
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::Unpaid => "Unpaid",
            PaymentStatus::PartiallyPaid => "Partially Paid",
            PaymentStatus::Overdue => "Overdue",
        }
    }

    /// Whether money is still owed on an invoice in this status.
    pub fn is_outstanding(self) -> bool {
        self != PaymentStatus::Paid
    }
}

impl core::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

impl core::str::FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '-' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        match normalized.as_str() {
            "paid" => Ok(PaymentStatus::Paid),
            "unpaid" => Ok(PaymentStatus::Unpaid),
            "partially_paid" => Ok(PaymentStatus::PartiallyPaid),
            "overdue" => Ok(PaymentStatus::Overdue),
            _ => Err(DomainError::validation(format!(
                "unknown payment status '{s}' (expected paid, unpaid, partially_paid or overdue)"
            ))),
        }
    }
}

/// One billable row of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[serde(default)]
    pub id: LineItemId,
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    /// `quantity * unit_price`; checked by validation, never recomputed on read.
    pub total: f64,
}

impl LineItem {
    /// Build a line item with its total derived from quantity and unit price.
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            id: LineItemId::new(),
            description: description.into(),
            quantity,
            unit_price,
            total: calculate_line_item_total(quantity, unit_price),
        }
    }
}

impl Entity for LineItem {
    type Id = LineItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// The user-editable part of an invoice.
///
/// Create and update both consume a draft; the store owns the id, the
/// attachments and the timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub invoice_number: String,
    #[serde(with = "issue_date")]
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax: f64,
    #[serde(default)]
    pub total: f64,
    pub payment_status: PaymentStatus,
}

impl InvoiceDraft {
    /// Recompute every line total, the subtotal and the total from quantities,
    /// prices and tax, the way an invoice form fills them in while editing.
    pub fn compute_totals(mut self) -> Self {
        for item in &mut self.line_items {
            item.total = calculate_line_item_total(item.quantity, item.unit_price);
        }
        self.subtotal = calculate_subtotal(&self.line_items);
        self.total = calculate_total(self.subtotal, self.tax);
        self
    }
}

/// Invoice record as persisted by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: InvoiceId,
    pub invoice_number: String,
    #[serde(with = "issue_date")]
    pub date: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_address: String,
    pub line_items: Vec<LineItem>,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub attachments: Vec<FileAttachment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Materialize a new invoice from a draft. Both timestamps are set to `now`.
    pub fn from_draft(id: InvoiceId, draft: InvoiceDraft, now: DateTime<Utc>) -> Self {
        Self {
            id,
            invoice_number: draft.invoice_number,
            date: draft.date,
            customer_name: draft.customer_name,
            customer_email: draft.customer_email,
            customer_address: draft.customer_address,
            line_items: draft.line_items,
            subtotal: draft.subtotal,
            tax: draft.tax,
            total: draft.total,
            payment_status: draft.payment_status,
            attachments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields. Id, attachments and `created_at` are kept.
    pub fn apply_draft(&mut self, draft: InvoiceDraft, now: DateTime<Utc>) {
        self.invoice_number = draft.invoice_number;
        self.date = draft.date;
        self.customer_name = draft.customer_name;
        self.customer_email = draft.customer_email;
        self.customer_address = draft.customer_address;
        self.line_items = draft.line_items;
        self.subtotal = draft.subtotal;
        self.tax = draft.tax;
        self.total = draft.total;
        self.payment_status = draft.payment_status;
        self.updated_at = now;
    }

    /// The editable fields of this invoice, e.g. to prefill an edit.
    pub fn to_draft(&self) -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: self.invoice_number.clone(),
            date: self.date,
            customer_name: self.customer_name.clone(),
            customer_email: self.customer_email.clone(),
            customer_address: self.customer_address.clone(),
            line_items: self.line_items.clone(),
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
            payment_status: self.payment_status,
        }
    }

    pub fn attachment(&self, attachment_id: AttachmentId) -> Option<&FileAttachment> {
        self.attachments.iter().find(|a| a.id == attachment_id)
    }

    /// Total size in bytes of all attached files.
    pub fn attachments_size(&self) -> u64 {
        self.attachments.iter().map(|a| a.size).sum()
    }
}

impl Entity for Invoice {
    type Id = InvoiceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Issue dates are written as RFC 3339 timestamps but also accepted as a plain
/// `YYYY-MM-DD` (midnight UTC), which is what date inputs produce.
mod issue_date {
    use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            .map_err(|e| serde::de::Error::custom(format!("invalid date '{raw}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};

    fn draft() -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: "INV-001".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
            customer_name: "Acme Corp".to_string(),
            customer_email: "billing@acme.test".to_string(),
            customer_address: "1 Main St".to_string(),
            line_items: vec![LineItem::new("Consulting", 2.0, 10.5)],
            subtotal: 0.0,
            tax: 2.0,
            total: 0.0,
            payment_status: PaymentStatus::Unpaid,
        }
        .compute_totals()
    }

    #[test]
    fn payment_status_parses_loose_spellings() {
        assert_eq!("Paid".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert_eq!(
            "Partially Paid".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(
            "partially-paid".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::PartiallyPaid
        );
        assert!("refunded".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn payment_status_serializes_snake_case() {
        let json = serde_json::to_string(&PaymentStatus::PartiallyPaid).unwrap();
        assert_eq!(json, "\"partially_paid\"");
        assert_eq!(PaymentStatus::PartiallyPaid.to_string(), "Partially Paid");
    }

    #[test]
    fn compute_totals_fills_derived_fields() {
        let d = draft();
        assert_eq!(d.line_items[0].total, 21.0);
        assert_eq!(d.subtotal, 21.0);
        assert_eq!(d.total, 23.0);
    }

    #[test]
    fn apply_draft_keeps_identity_and_creation_time() {
        let created = Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap();
        let id = InvoiceId::new();
        let mut invoice = Invoice::from_draft(id, draft(), created);
        assert_eq!(invoice.created_at, invoice.updated_at);

        let mut edit = invoice.to_draft();
        edit.payment_status = PaymentStatus::Paid;
        invoice.apply_draft(edit, later);

        assert_eq!(invoice.id, id);
        assert_eq!(invoice.created_at, created);
        assert_eq!(invoice.updated_at, later);
        assert_eq!(invoice.payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn draft_accepts_plain_dates_and_generates_line_ids() {
        let json = r#"{
            "invoiceNumber": "INV-7",
            "date": "2024-03-05",
            "customerName": "Jane",
            "customerEmail": "jane@example.test",
            "customerAddress": "2 Side St",
            "lineItems": [{"description": "Widget", "quantity": 3, "unitPrice": 4, "total": 12}],
            "subtotal": 12,
            "tax": 0,
            "total": 12,
            "paymentStatus": "unpaid"
        }"#;
        let d: InvoiceDraft = serde_json::from_str(json).unwrap();
        assert_eq!(d.date, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());
        assert_eq!(d.line_items[0].quantity, 3.0);
    }

    #[test]
    fn invoice_json_uses_camel_case_fields() {
        let invoice = Invoice::from_draft(InvoiceId::new(), draft(), Utc::now());
        let value = serde_json::to_value(&invoice).unwrap();
        assert!(value.get("invoiceNumber").is_some());
        assert!(value.get("paymentStatus").is_some());
        assert!(value.get("createdAt").is_some());
        assert_eq!(value["date"], "2024-01-15T00:00:00Z");

        let back: Invoice = serde_json::from_value(value).unwrap();
        assert_eq!(back, invoice);
    }

    #[test]
    fn issue_date_keeps_sub_millisecond_precision() {
        let mut d = draft();
        d.date = Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 0, 0)
            .unwrap()
            .with_nanosecond(123_456_789)
            .unwrap();
        let invoice = Invoice::from_draft(InvoiceId::new(), d, Utc::now());

        let json = serde_json::to_string(&invoice).unwrap();
        assert!(json.contains("\"date\":\"2024-01-15T10:00:00.123456789Z\""));
        let back: Invoice = serde_json::from_str(&json).unwrap();
        assert_eq!(back, invoice);
    }
}
