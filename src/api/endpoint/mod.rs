//! Resource endpoints.
//!
//! One generic [`ResourceEndpoint`] serves every resource. It is built from
//! three injected capabilities (a domain service, an [`EndpointLogger`] and a
//! [`ConfigReader`]) and turns them into an axum router for the resource's
//! fixed path prefix.

mod handlers;
mod logger;

pub use handlers::ResourceId;
pub use logger::EndpointLogger;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::api::dto::{PaginationParams, ResourceDto};
use crate::config::ConfigReader;
use crate::error::{AppError, AppResult};
use crate::models::{Entity, ResourceKind};
use crate::services::{PageRequest, ResourceService};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 100;

/// HTTP binding of one domain service to its path prefix.
///
/// Construction only stores the three capabilities. Configuration is read
/// when the router is built and when a list request arrives.
pub struct ResourceEndpoint<S> {
    service: Arc<S>,
    logger: EndpointLogger,
    config: Arc<dyn ConfigReader>,
}

impl<S> Clone for ResourceEndpoint<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            logger: self.logger,
            config: Arc::clone(&self.config),
        }
    }
}

impl<S> ResourceEndpoint<S>
where
    S: ResourceService,
    S::Entity: ResourceDto,
{
    pub fn new(service: Arc<S>, logger: EndpointLogger, config: Arc<dyn ConfigReader>) -> Self {
        Self {
            service,
            logger,
            config,
        }
    }

    pub fn kind(&self) -> ResourceKind {
        S::Entity::KIND
    }

    /// Exact, case-sensitive path prefix, e.g. `/permissions`
    pub fn path(&self) -> &'static str {
        S::Entity::KIND.path()
    }

    /// Whether `api.resources.<name>.read_only` is set.
    pub fn read_only(&self) -> AppResult<bool> {
        self.config.parse_or(&self.policy_key("read_only"), false)
    }

    /// Routes for `{prefix}` and `{prefix}/{id}`.
    ///
    /// A read-only resource only mounts the two GET routes, so every
    /// mutating method is answered with 405.
    pub fn router(self) -> AppResult<Router> {
        let path = self.path();
        let read_only = self.read_only()?;

        let mut collection = get(handlers::list::<S>);
        let mut member = get(handlers::fetch::<S>);
        if !read_only {
            collection = collection.post(handlers::create::<S>);
            member = member
                .put(handlers::update::<S>)
                .delete(handlers::remove::<S>);
        }

        self.logger.mounted(path, read_only);
        Ok(Router::new()
            .route(path, collection)
            .route(&format!("{path}/{{id}}"), member)
            .with_state(self))
    }

    fn policy_key(&self, setting: &str) -> String {
        format!("api.resources.{}.{setting}", S::Entity::KIND.name())
    }

    /// Resolves list parameters against the configured defaults and caps.
    fn page_request(&self, params: &PaginationParams) -> AppResult<PageRequest> {
        let default_size = self
            .config
            .parse_or("api.default_page_size", DEFAULT_PAGE_SIZE)?;
        let global_max = self
            .config
            .parse_or("api.max_page_size", DEFAULT_MAX_PAGE_SIZE)?;
        let max = self
            .config
            .parse::<u32>(&self.policy_key("max_page_size"))?
            .unwrap_or(global_max);

        let page_size = params.page_size.unwrap_or(default_size.min(max));
        if page_size > max {
            return Err(AppError::Validation {
                field: "page_size".to_string(),
                reason: format!("must not exceed {max}"),
            });
        }
        Ok(PageRequest::new(params.page.unwrap_or(1), page_size))
    }
}
