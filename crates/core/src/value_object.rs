//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity** and are compared by their attribute values
/// (e.g. a date range, a set of filter criteria, computed invoice totals). To
/// "modify" one, build a new value.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct InvoiceTotals { subtotal: f64, tax: f64, total: f64 }
///
/// impl ValueObject for InvoiceTotals {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
