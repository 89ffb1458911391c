//! Input validation for invoice drafts.
//!
//! Everything downstream of validation (filtering, totals, storage) assumes a
//! draft that passed `InvoiceDraft::validate`.

use invoicedesk_core::{DomainError, DomainResult};

use crate::invoice::{InvoiceDraft, LineItem};
use crate::totals::{calculate_line_item_total, calculate_subtotal, calculate_total};

/// Half a cent: the largest drift tolerated between a stored and a derived amount.
const AMOUNT_TOLERANCE: f64 = 0.005;

impl InvoiceDraft {
    pub fn validate(&self) -> DomainResult<()> {
        require("invoice number", &self.invoice_number)?;
        require("customer name", &self.customer_name)?;
        require("customer address", &self.customer_address)?;
        validate_email(&self.customer_email)?;

        if self.line_items.is_empty() {
            return Err(DomainError::validation(
                "invoice must have at least one line item",
            ));
        }
        for (idx, item) in self.line_items.iter().enumerate() {
            validate_line_item(idx + 1, item)?;
        }

        ensure_amount("tax", self.tax)?;

        if !approx_eq(self.subtotal, calculate_subtotal(&self.line_items)) {
            return Err(DomainError::validation(
                "subtotal does not match the sum of line item totals",
            ));
        }
        if !approx_eq(self.total, calculate_total(self.subtotal, self.tax)) {
            return Err(DomainError::validation(
                "total does not equal subtotal plus tax",
            ));
        }

        Ok(())
    }
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> DomainResult<()> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
                && domain
                    .split_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DomainError::validation(format!(
            "invalid customer email '{email}'"
        )))
    }
}

fn validate_line_item(line_no: usize, item: &LineItem) -> DomainResult<()> {
    if item.description.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "line {line_no}: description is required"
        )));
    }
    ensure_amount(&format!("line {line_no}: quantity"), item.quantity)?;
    ensure_amount(&format!("line {line_no}: unit price"), item.unit_price)?;

    if !approx_eq(item.total, calculate_line_item_total(item.quantity, item.unit_price)) {
        return Err(DomainError::validation(format!(
            "line {line_no}: total must equal quantity times unit price"
        )));
    }
    Ok(())
}

fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn ensure_amount(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::validation(format!("{field} must be a number")));
    }
    if value < 0.0 {
        return Err(DomainError::validation(format!("{field} cannot be negative")));
    }
    Ok(())
}

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() <= AMOUNT_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::invoice::PaymentStatus;

    fn valid_draft() -> InvoiceDraft {
        InvoiceDraft {
            invoice_number: "INV-100".to_string(),
            date: Utc::now(),
            customer_name: "Acme Corp".to_string(),
            customer_email: "billing@acme.test".to_string(),
            customer_address: "1 Main St".to_string(),
            line_items: vec![
                LineItem::new("Design", 2.0, 10.5),
                LineItem::new("Hosting", 1.0, 5.0),
            ],
            subtotal: 0.0,
            tax: 1.5,
            total: 0.0,
            payment_status: PaymentStatus::Unpaid,
        }
        .compute_totals()
    }

    fn assert_rejected(draft: InvoiceDraft, needle: &str) {
        match draft.validate() {
            Err(DomainError::Validation(msg)) => {
                assert!(msg.contains(needle), "message '{msg}' lacks '{needle}'")
            }
            other => panic!("expected validation error containing '{needle}', got {other:?}"),
        }
    }

    #[test]
    fn accepts_well_formed_draft() {
        valid_draft().validate().unwrap();
    }

    #[test]
    fn rejects_blank_required_fields() {
        let mut d = valid_draft();
        d.invoice_number = "  ".to_string();
        assert_rejected(d, "invoice number");

        let mut d = valid_draft();
        d.customer_name.clear();
        assert_rejected(d, "customer name");

        let mut d = valid_draft();
        d.line_items[1].description.clear();
        assert_rejected(d, "line 2: description");
    }

    #[test]
    fn rejects_missing_line_items() {
        let mut d = valid_draft();
        d.line_items.clear();
        d.subtotal = 0.0;
        d.total = d.tax;
        assert_rejected(d, "at least one line item");
    }

    #[test]
    fn rejects_negative_amounts() {
        let d = InvoiceDraft {
            line_items: vec![LineItem::new("Refund", -1.0, 10.0)],
            ..valid_draft()
        }
        .compute_totals();
        assert_rejected(d, "quantity cannot be negative");

        let d = InvoiceDraft {
            line_items: vec![LineItem::new("Odd", 1.0, -3.0)],
            ..valid_draft()
        }
        .compute_totals();
        assert_rejected(d, "unit price cannot be negative");

        let d = InvoiceDraft {
            tax: -1.0,
            ..valid_draft()
        }
        .compute_totals();
        assert_rejected(d, "tax cannot be negative");
    }

    #[test]
    fn rejects_inconsistent_totals() {
        let mut d = valid_draft();
        d.line_items[0].total = 99.0;
        assert_rejected(d, "line 1: total");

        let mut d = valid_draft();
        d.subtotal += 1.0;
        assert_rejected(d, "subtotal");

        let mut d = valid_draft();
        d.total -= 1.0;
        assert_rejected(d, "total does not equal");
    }

    #[test]
    fn email_shape() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("missing-at.example").is_err());
        assert!(validate_email("@example.test").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("a@b@c.test").is_err());
        assert!(validate_email("a b@c.test").is_err());
    }
}
