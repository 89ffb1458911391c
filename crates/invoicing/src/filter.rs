//! Invoice list filtering.
//!
//! `filter_invoices` narrows a list by date range, payment status and a search
//! term. All active predicates are ANDed; an absent predicate (or an empty
//! status set, or a blank search term) does not filter at all. The input is
//! never mutated and the result borrows the same records in their original
//! relative order.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use invoicedesk_core::ValueObject;

use crate::invoice::{Invoice, PaymentStatus};

/// Inclusive date range. Either bound may be open.
///
/// Bounds are normalized to whole days (UTC): the start to 00:00:00.000 and the
/// end to 23:59:59.999 of their respective dates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new(start_date: Option<DateTime<Utc>>, end_date: Option<DateTime<Utc>>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        if let Some(start) = self.start_date {
            if date < start_of_day(start) {
                return false;
            }
        }
        if let Some(end) = self.end_date {
            if date > end_of_day(end) {
                return false;
            }
        }
        true
    }

    pub fn is_unbounded(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }
}

impl ValueObject for DateRange {}

/// Criteria narrowing an invoice list. The default value filters nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default)]
    pub date_range: Option<DateRange>,
    /// `Some(vec![])` means "no status filter", not "match nothing".
    #[serde(default)]
    pub payment_statuses: Option<Vec<PaymentStatus>>,
    #[serde(default)]
    pub search: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_range(
        mut self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_range = Some(DateRange::new(start_date, end_date));
        self
    }

    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = PaymentStatus>) -> Self {
        self.payment_statuses = Some(statuses.into_iter().collect());
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// True when no predicate is active, i.e. filtering is the identity.
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none_or(|r| r.is_unbounded())
            && self.active_statuses().is_none()
            && self.search_term().is_none()
    }

    /// Whether a single invoice passes every active predicate.
    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(range) = &self.date_range {
            if !range.contains(invoice.date) {
                return false;
            }
        }

        if let Some(statuses) = self.active_statuses() {
            if !statuses.contains(&invoice.payment_status) {
                return false;
            }
        }

        if let Some(term) = self.search_term() {
            let term = term.to_lowercase();
            let hit = [
                &invoice.invoice_number,
                &invoice.customer_name,
                &invoice.customer_email,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&term));
            if !hit {
                return false;
            }
        }

        true
    }

    fn active_statuses(&self) -> Option<&[PaymentStatus]> {
        self.payment_statuses
            .as_deref()
            .filter(|statuses| !statuses.is_empty())
    }

    fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
    }
}

impl ValueObject for FilterCriteria {}

/// Invoices satisfying `criteria`, in input order.
pub fn filter_invoices<'a>(invoices: &'a [Invoice], criteria: &FilterCriteria) -> Vec<&'a Invoice> {
    invoices.iter().filter(|inv| criteria.matches(inv)).collect()
}

fn start_of_day(date: DateTime<Utc>) -> DateTime<Utc> {
    date.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Last millisecond of the day. Saturates at the latest representable instant
/// when the next day does not exist.
fn end_of_day(date: DateTime<Utc>) -> DateTime<Utc> {
    start_of_day(date)
        .checked_add_signed(Duration::days(1))
        .and_then(|next| next.checked_sub_signed(Duration::milliseconds(1)))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
