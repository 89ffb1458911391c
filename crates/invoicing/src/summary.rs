//! Aggregate figures over a (typically filtered) invoice list.

use serde::Serialize;

use crate::invoice::{Invoice, PaymentStatus};

/// Counts and amounts for a dashboard-style overview.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceSummary {
    pub count: usize,
    pub paid_count: usize,
    pub unpaid_count: usize,
    pub partially_paid_count: usize,
    pub overdue_count: usize,
    /// Sum of all invoice totals.
    pub total_billed: f64,
    /// Sum of totals of paid invoices.
    pub total_paid: f64,
    /// Sum of totals of invoices not fully paid.
    pub total_outstanding: f64,
}

impl InvoiceSummary {
    pub fn from_invoices<'a>(invoices: impl IntoIterator<Item = &'a Invoice>) -> Self {
        let mut summary = Self::default();
        for invoice in invoices {
            summary.count += 1;
            summary.total_billed += invoice.total;
            match invoice.payment_status {
                PaymentStatus::Paid => summary.paid_count += 1,
                PaymentStatus::Unpaid => summary.unpaid_count += 1,
                PaymentStatus::PartiallyPaid => summary.partially_paid_count += 1,
                PaymentStatus::Overdue => summary.overdue_count += 1,
            }
            if invoice.payment_status.is_outstanding() {
                summary.total_outstanding += invoice.total;
            } else {
                summary.total_paid += invoice.total;
            }
        }
        summary
    }

    pub fn count_for(&self, status: PaymentStatus) -> usize {
        match status {
            PaymentStatus::Paid => self.paid_count,
            PaymentStatus::Unpaid => self.unpaid_count,
            PaymentStatus::PartiallyPaid => self.partially_paid_count,
            PaymentStatus::Overdue => self.overdue_count,
        }
    }
}
