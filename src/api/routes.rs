//! Router configuration for the API.
//!
//! This module provides centralized route registration and middleware
//! configuration for the application.

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method, StatusCode};
use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::doc::{self, ApiDoc};
use crate::api::dto::ResourceDto;
use crate::api::endpoint::{EndpointLogger, ResourceEndpoint};
use crate::api::handlers::health::health_routes;
use crate::api::middleware::{global_error_handler, logging_middleware, request_id_middleware};
use crate::config::{ApiConfig, ConfigReader, Settings};
use crate::error::AppResult;
use crate::models::Entity;
use crate::services::{ResourceService, Services};
use crate::state::AppState;

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";

/// Collects the eight resource routers and their OpenAPI operations.
struct ResourceMounter<'a> {
    router: Router,
    openapi: utoipa::openapi::OpenApi,
    config: &'a Arc<dyn ConfigReader>,
    base_path: &'a str,
}

impl<'a> ResourceMounter<'a> {
    fn new(config: &'a Arc<dyn ConfigReader>, base_path: &'a str) -> Self {
        Self {
            router: Router::new(),
            openapi: ApiDoc::openapi(),
            config,
            base_path,
        }
    }

    fn mount<S>(mut self, service: &Arc<S>) -> AppResult<Self>
    where
        S: ResourceService,
        S::Entity: ResourceDto,
    {
        let kind = S::Entity::KIND;
        let endpoint = ResourceEndpoint::new(
            Arc::clone(service),
            EndpointLogger::new(kind),
            Arc::clone(self.config),
        );

        doc::add_resource::<S::Entity>(&mut self.openapi, self.base_path, endpoint.read_only()?);
        self.router = self.router.merge(endpoint.router()?);
        Ok(self)
    }

    fn mount_all(self, services: &Services) -> AppResult<Self> {
        self.mount(&services.activity_branches)?
            .mount(&services.activity_type_components)?
            .mount(&services.attribute_values)?
            .mount(&services.item_attribute_values)?
            .mount(&services.permissions)?
            .mount(&services.role_members)?
            .mount(&services.role_tasks)?
            .mount(&services.target_processes)
    }
}

/// Creates the main application router with all routes and middleware.
///
/// # Middleware Order (outermost first)
/// 1. CORS (only when origins are configured) and compression
/// 2. Request ID middleware - generates/propagates request IDs
/// 3. Logging middleware - logs requests with request IDs
/// 4. Global error handler - JSON error bodies carrying the request ID
/// 5. Request timeout (408)
///
/// # Routes
/// - `/health`, `/health/ready`, `/health/live`
/// - the eight resource prefixes, under `api.base_path` when it is set
/// - `/swagger-ui` and `/api-docs/openapi.json` when docs are enabled
pub fn create_router(state: AppState, settings: &Settings) -> AppResult<Router> {
    let api = &settings.api;
    let mounted = ResourceMounter::new(&state.config, &api.base_path).mount_all(&state.services)?;

    let mut router = health_routes().with_state(state.clone());
    router = if api.base_path.is_empty() {
        router.merge(mounted.router)
    } else {
        router.nest(&api.base_path, mounted.router)
    };

    if api.docs_enabled {
        router = router.merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, mounted.openapi));
    }

    // Middleware is applied in reverse order - last added runs first
    let mut router = router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(settings.server.request_timeout),
        ))
        .layer(middleware::from_fn(global_error_handler))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CompressionLayer::new());

    if let Some(cors) = cors_layer(api) {
        router = router.layer(cors);
    }

    Ok(router)
}

/// `None` when no origin is configured; `*` allows any origin.
fn cors_layer(api: &ApiConfig) -> Option<CorsLayer> {
    if api.cors_allowed_origins.is_empty() {
        return None;
    }

    let origins = if api.cors_allowed_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let values: Vec<HeaderValue> = api
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(values)
    };

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any),
    )
}
