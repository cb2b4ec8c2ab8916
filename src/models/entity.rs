use super::{ResourceKind, Timestamp};

/// Unique key of a row besides its id, as `(columns, values)`.
///
/// Formatted the way PostgreSQL reports keys: `role_id,member_id` / `3,7`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NaturalKey {
    pub fields: &'static str,
    pub value: String,
}

/// A stored resource row.
///
/// `New` is the insert shape and `Changes` the partial update shape. Both are
/// independent of the storage backend.
pub trait Entity: Clone + Send + Sync + 'static {
    type New: Clone + Send + Sync + 'static;
    type Changes: Clone + Send + Sync + 'static;

    const KIND: ResourceKind;

    fn id(&self) -> i64;

    /// Builds the row a backend without its own id sequence would store.
    fn materialize(id: i64, new: Self::New, now: Timestamp) -> Self;

    fn apply(&mut self, changes: Self::Changes);

    /// True when `changes` would not modify any column.
    fn is_noop(changes: &Self::Changes) -> bool;

    fn natural_key(&self) -> NaturalKey;
}
