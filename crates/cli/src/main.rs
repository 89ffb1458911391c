use clap::Parser;
use tracing::debug;

use invoicedesk_cli::{Cli, execute, output};
use invoicedesk_infra::config::DATA_DIR_ENV;
use invoicedesk_infra::{AppConfig, FileStorage, StorageInvoiceRepository};

fn run(cli: Cli) -> anyhow::Result<invoicedesk_cli::CommandOutput> {
    // --data-dir takes precedence over INVOICEDESK_DATA_DIR.
    let data_dir = cli.data_dir.map(|d| d.to_string_lossy().into_owned());
    let config = AppConfig::from_lookup(|var| match var {
        DATA_DIR_ENV if data_dir.is_some() => data_dir.clone(),
        _ => std::env::var(var).ok(),
    })?;
    debug!(data_dir = %config.data_dir.display(), "using invoice store");

    let repo = StorageInvoiceRepository::new(FileStorage::new(&config.data_dir));
    execute(cli.command, &repo, &config, chrono::Utc::now())
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries command output only.
    invoicedesk_observability::init_cli(if cli.verbose { "debug" } else { "warn" });

    let format = cli.format;
    match run(cli) {
        Ok(outcome) => output::print_success(format, &outcome),
        Err(e) => {
            output::print_error(format, &format!("{e:#}"));
            std::process::exit(1);
        }
    }
}
