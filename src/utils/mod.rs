//! Request extraction helpers shared by the API layer.

mod validate;

pub use validate::{ValidatedJson, ValidatedQuery};
