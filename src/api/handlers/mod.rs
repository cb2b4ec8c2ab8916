//! HTTP request handlers that are not tied to a resource.

pub mod health;
