//! `invoicedesk-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the invoicing model
//! and the storage layer (no IO, no storage assumptions).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AttachmentId, InvoiceId, LineItemId};
pub use value_object::ValueObject;
