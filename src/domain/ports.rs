use crate::domain::types::{Attribute, AttributeRange, MethodId};

/// Read-only view of the method catalog consumed by the simulation core.
///
/// The engine never reaches into storage itself: anything that can answer
/// range lookups (an in-memory fixture, a database-backed catalog, a test
/// double) can drive a run.
pub trait MethodCatalog {
    /// Range of `attribute` for `method`, or `None` when the catalog has no row for it.
    fn attribute_range(&self, method: MethodId, attribute: Attribute) -> Option<AttributeRange>;
}

impl<T: MethodCatalog + ?Sized> MethodCatalog for &T {
    fn attribute_range(&self, method: MethodId, attribute: Attribute) -> Option<AttributeRange> {
        (**self).attribute_range(method, attribute)
    }
}
