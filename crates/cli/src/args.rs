use std::path::PathBuf;

use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};

use invoicedesk_core::{AttachmentId, InvoiceId};
use invoicedesk_invoicing::{DateRange, FilterCriteria, PaymentStatus};

use crate::output::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "invoicedesk",
    about = "Manage invoices and their attachments in a local store",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Directory holding the invoice store [default: platform data dir]
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List invoices, optionally filtered
    List(FilterArgs),
    /// Show one invoice
    Show { id: InvoiceId },
    /// Create an invoice from a JSON draft
    Create {
        /// Path to the draft JSON document
        #[arg(long, short)]
        file: PathBuf,
        /// Derive line totals, subtotal and total instead of checking them
        #[arg(long)]
        compute_totals: bool,
    },
    /// Replace the editable fields of an invoice from a JSON draft
    Update {
        id: InvoiceId,
        #[arg(long, short)]
        file: PathBuf,
        #[arg(long)]
        compute_totals: bool,
    },
    /// Delete an invoice and its attachments
    Delete { id: InvoiceId },
    /// Attach a file to an invoice
    Attach {
        id: InvoiceId,
        path: PathBuf,
        /// MIME type [default: guessed from the extension]
        #[arg(long)]
        mime: Option<String>,
    },
    /// Remove an attachment from an invoice
    Detach {
        id: InvoiceId,
        attachment_id: AttachmentId,
    },
    /// Write an attachment's contents to a file
    ExportAttachment {
        id: InvoiceId,
        attachment_id: AttachmentId,
        out: PathBuf,
    },
    /// Counts and amounts over (optionally filtered) invoices
    Summary(FilterArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Earliest issue date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Latest issue date, inclusive (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Payment status to keep; repeat for several
    #[arg(long = "status")]
    pub statuses: Vec<PaymentStatus>,

    /// Text to look for in invoice number, customer name or email
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    pub fn to_criteria(&self) -> FilterCriteria {
        let midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc();
        let date_range = match (self.from, self.to) {
            (None, None) => None,
            (from, to) => Some(DateRange::new(from.map(midnight), to.map(midnight))),
        };
        FilterCriteria {
            date_range,
            payment_statuses: Some(self.statuses.clone()),
            search: self.search.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn argument_model_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_flags_become_criteria() {
        let cli = Cli::parse_from([
            "invoicedesk",
            "--format",
            "json",
            "list",
            "--from",
            "2024-01-12",
            "--status",
            "paid",
            "--status",
            "partially paid",
            "--search",
            "acme",
        ]);
        assert_eq!(cli.format, OutputFormat::Json);
        let Command::List(filter) = cli.command else {
            panic!("expected list command");
        };
        let criteria = filter.to_criteria();
        let range = criteria.date_range.unwrap();
        assert_eq!(range.start_date.unwrap().to_rfc3339(), "2024-01-12T00:00:00+00:00");
        assert_eq!(range.end_date, None);
        assert_eq!(
            criteria.payment_statuses,
            Some(vec![PaymentStatus::Paid, PaymentStatus::PartiallyPaid])
        );
        assert_eq!(criteria.search.as_deref(), Some("acme"));
    }

    #[test]
    fn no_flags_means_no_filtering() {
        assert!(FilterArgs::default().to_criteria().is_empty());
    }

    #[test]
    fn rejects_malformed_ids() {
        assert!(Cli::try_parse_from(["invoicedesk", "show", "not-an-id"]).is_err());
    }
}
