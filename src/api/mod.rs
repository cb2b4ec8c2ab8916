//! API module for HTTP handlers, middleware, and DTOs.
//!
//! This module provides the HTTP API layer for the application,
//! including the generic resource endpoint, middleware components,
//! and data transfer objects.

pub mod doc;
pub mod dto;
pub mod endpoint;
pub mod handlers;
pub mod middleware;
pub mod routes;
