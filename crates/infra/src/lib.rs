//! Infrastructure layer: storage backends, the invoice repository, config.

pub mod config;
pub mod repository;
pub mod storage;

pub use config::{AppConfig, ConfigError};
pub use repository::{InvoiceRepository, RepositoryError, StorageInvoiceRepository};
pub use storage::{FileStorage, InMemoryStorage, StorageBackend, StorageError};
