//! Generic CRUD handlers, instantiated once per resource.

use axum::extract::{FromRequestParts, Path, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::Json;

use super::ResourceEndpoint;
use crate::api::dto::{PagedResponse, PaginationParams, ResourceDto};
use crate::error::{AppError, AppResult};
use crate::services::ResourceService;
use crate::utils::{ValidatedJson, ValidatedQuery};

type ResponseOf<S> = <<S as ResourceService>::Entity as ResourceDto>::Response;
type CreateOf<S> = <<S as ResourceService>::Entity as ResourceDto>::Create;
type UpdateOf<S> = <<S as ResourceService>::Entity as ResourceDto>::Update;

/// `{id}` path segment, accepted only as a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl<St> FromRequestParts<St> for ResourceId
where
    St: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &St) -> AppResult<Self> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
        if raw.starts_with(['+', '0']) {
            return Err(invalid_id(&raw));
        }
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(ResourceId(id)),
            _ => Err(invalid_id(&raw)),
        }
    }
}

fn invalid_id(raw: &str) -> AppError {
    AppError::bad_request(format!("invalid id '{raw}': expected a positive integer"))
}

pub(super) async fn list<S>(
    State(endpoint): State<ResourceEndpoint<S>>,
    ValidatedQuery(params): ValidatedQuery<PaginationParams>,
) -> AppResult<Json<PagedResponse<ResponseOf<S>>>>
where
    S: ResourceService,
    S::Entity: ResourceDto,
{
    endpoint
        .logger
        .observe("list", async {
            let request = endpoint.page_request(&params)?;
            endpoint.service.list(request).await
        })
        .await
        .map(|page| Json(PagedResponse::from_page(page)))
}

pub(super) async fn create<S>(
    State(endpoint): State<ResourceEndpoint<S>>,
    ValidatedJson(body): ValidatedJson<CreateOf<S>>,
) -> AppResult<(StatusCode, Json<ResponseOf<S>>)>
where
    S: ResourceService,
    S::Entity: ResourceDto,
{
    let row = endpoint
        .logger
        .observe("create", endpoint.service.create(body.into()))
        .await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub(super) async fn fetch<S>(
    State(endpoint): State<ResourceEndpoint<S>>,
    ResourceId(id): ResourceId,
) -> AppResult<Json<ResponseOf<S>>>
where
    S: ResourceService,
    S::Entity: ResourceDto,
{
    let row = endpoint
        .logger
        .observe("get", endpoint.service.get(id))
        .await?;
    Ok(Json(row.into()))
}

pub(super) async fn update<S>(
    State(endpoint): State<ResourceEndpoint<S>>,
    ResourceId(id): ResourceId,
    ValidatedJson(body): ValidatedJson<UpdateOf<S>>,
) -> AppResult<Json<ResponseOf<S>>>
where
    S: ResourceService,
    S::Entity: ResourceDto,
{
    let row = endpoint
        .logger
        .observe("update", endpoint.service.update(id, body.into()))
        .await?;
    Ok(Json(row.into()))
}

pub(super) async fn remove<S>(
    State(endpoint): State<ResourceEndpoint<S>>,
    ResourceId(id): ResourceId,
) -> AppResult<StatusCode>
where
    S: ResourceService,
    S::Entity: ResourceDto,
{
    endpoint
        .logger
        .observe("delete", endpoint.service.delete(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
