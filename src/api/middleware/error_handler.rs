//! Error handler for converting AppError to HTTP responses.
//!
//! `AppError` responses carry their `ErrorResponse` in the response
//! extensions. The global handler uses it to attach the request id, and
//! rewrites framework responses (unknown route, wrong method, timeout) into
//! the same JSON shape.

use axum::{
    Json,
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Converts an AppError into an HTTP response.
    ///
    /// # Status Code Mapping
    /// - NotFound → 404 NOT_FOUND
    /// - Duplicate → 409 DUPLICATE_ENTRY
    /// - Validation / ValidationErrors → 400 VALIDATION_ERROR
    /// - BadRequest → 400 BAD_REQUEST
    /// - Database → 500 DATABASE_ERROR
    /// - Configuration → 500 CONFIGURATION_ERROR
    /// - ConnectionPool → 503 SERVICE_UNAVAILABLE
    /// - Internal → 500 INTERNAL_ERROR
    fn into_response(self) -> Response {
        let status = error_to_status_code(&self);
        let (message, details) = match &self {
            AppError::NotFound { entity, field, value } => (
                format!("{entity} with {field}={value} was not found"),
                Some(json!({ "entity": entity, "field": field, "value": value })),
            ),
            AppError::Duplicate { entity, field, value } => (
                format!("{entity} with {field}={value} already exists"),
                Some(json!({ "entity": entity, "field": field, "value": value })),
            ),
            AppError::Validation { field, reason } => (
                format!("{field} {reason}"),
                Some(json!({ "fields": [{ "field": field, "message": reason }] })),
            ),
            AppError::ValidationErrors { errors } => (
                "Request validation failed".to_string(),
                Some(json!({ "fields": errors })),
            ),
            AppError::BadRequest { message } => (message.clone(), None),
            AppError::Database { operation, .. } => (
                format!("Database operation failed: {operation}"),
                Some(json!({ "operation": operation })),
            ),
            AppError::Configuration { key, .. } => (
                format!("Configuration error: {key}"),
                Some(json!({ "key": key })),
            ),
            AppError::ConnectionPool { .. } => {
                ("Database connection unavailable".to_string(), None)
            }
            AppError::Internal { .. } => ("An internal error occurred".to_string(), None),
        };

        let mut error_response = ErrorResponse::new(error_to_code(&self), &message);
        if let Some(details) = details {
            error_response = error_response.with_details(details);
        }

        let mut response = (status, Json(error_response.clone())).into_response();
        response.extensions_mut().insert(error_response);
        response
    }
}

/// Global error handling middleware.
///
/// Must run inside `request_id_middleware` so the request id is available.
pub async fn global_error_handler(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone());

    let response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let error_response = match response.extensions().get::<ErrorResponse>() {
        Some(existing) => existing.clone(),
        None if is_json(&response) => return response,
        None => framework_error(status),
    };
    let error_response = match request_id {
        Some(id) => error_response.with_request_id(&id),
        None => error_response,
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);
    let mut shaped = (status, Json(error_response)).into_response();
    // keep framework headers such as `allow` on 405
    for (name, value) in parts.headers.iter() {
        shaped.headers_mut().entry(name).or_insert_with(|| value.clone());
    }
    shaped
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"))
}

fn framework_error(status: StatusCode) -> ErrorResponse {
    match status {
        StatusCode::BAD_REQUEST => {
            ErrorResponse::new("BAD_REQUEST", "Bad request - invalid or malformed request")
        }
        StatusCode::NOT_FOUND => {
            ErrorResponse::new("NOT_FOUND", "The requested resource was not found")
        }
        StatusCode::METHOD_NOT_ALLOWED => {
            ErrorResponse::new("METHOD_NOT_ALLOWED", "HTTP method not allowed for this endpoint")
        }
        StatusCode::REQUEST_TIMEOUT => ErrorResponse::new("REQUEST_TIMEOUT", "Request timeout"),
        StatusCode::PAYLOAD_TOO_LARGE => {
            ErrorResponse::new("PAYLOAD_TOO_LARGE", "Request payload too large")
        }
        StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            ErrorResponse::new("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type")
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            ErrorResponse::new("SERVICE_UNAVAILABLE", "Service temporarily unavailable")
        }
        s if s.is_server_error() => {
            ErrorResponse::new("INTERNAL_SERVER_ERROR", "An internal server error occurred")
        }
        _ => ErrorResponse::new("UNKNOWN_ERROR", "An unknown error occurred"),
    }
}

/// Maps an AppError variant to its corresponding HTTP status code.
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        AppError::Duplicate { .. } => StatusCode::CONFLICT,
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => StatusCode::BAD_REQUEST,
        AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        AppError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Configuration { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an AppError variant to its error code string.
pub fn error_to_code(error: &AppError) -> &'static str {
    match error {
        AppError::NotFound { .. } => "NOT_FOUND",
        AppError::Duplicate { .. } => "DUPLICATE_ENTRY",
        AppError::Validation { .. } | AppError::ValidationErrors { .. } => "VALIDATION_ERROR",
        AppError::BadRequest { .. } => "BAD_REQUEST",
        AppError::Database { .. } => "DATABASE_ERROR",
        AppError::Configuration { .. } => "CONFIGURATION_ERROR",
        AppError::ConnectionPool { .. } => "SERVICE_UNAVAILABLE",
        AppError::Internal { .. } => "INTERNAL_ERROR",
    }
}
