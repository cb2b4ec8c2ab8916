//! OpenAPI document.
//!
//! Health routes are annotated with `#[utoipa::path]`. Resource handlers are
//! generic, so their operations are generated from each resource's DTO types.

use utoipa::openapi::path::{
    HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn,
};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{ArrayBuilder, KnownFormat, ObjectBuilder, SchemaFormat, Type};
use utoipa::openapi::{
    Components, ContentBuilder, Ref, RefOr, Required, Response, ResponseBuilder, Schema,
};
use utoipa::{IntoParams, OpenApi, ToSchema};

use crate::api::dto::{ErrorResponse, PaginationParams, ResourceDto};

pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "donation-rs",
        description = "Resource API for food-donation delivery management",
    ),
    paths(
        crate::api::handlers::health::health_check,
        crate::api::handlers::health::readiness_check,
        crate::api::handlers::health::liveness_check,
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::PaginationMeta,
            crate::api::dto::HealthResponse,
            crate::api::dto::HealthStatus,
            crate::api::dto::ComponentHealth,
            crate::error::ValidationFieldError,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

const JSON: &str = "application/json";

fn schema_ref<T: ToSchema>() -> Ref {
    Ref::from_schema_name(T::name())
}

fn json_response(description: &str, schema: impl Into<RefOr<Schema>>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(JSON, ContentBuilder::new().schema(Some(schema)).build())
        .build()
}

fn error_response(description: &str) -> Response {
    json_response(description, schema_ref::<ErrorResponse>())
}

fn id_parameter() -> utoipa::openapi::path::Parameter {
    ParameterBuilder::new()
        .name("id")
        .parameter_in(ParameterIn::Path)
        .required(Required::True)
        .description(Some("Positive row id"))
        .schema(Some(
            ObjectBuilder::new()
                .schema_type(Type::Integer)
                .format(Some(SchemaFormat::KnownFormat(KnownFormat::Int64)))
                .build(),
        ))
        .build()
}

fn operation(tag: &str, operation_id: String, summary: String) -> OperationBuilder {
    OperationBuilder::new()
        .tag(tag)
        .operation_id(Some(operation_id))
        .summary(Some(summary))
}

/// Adds the schemas and operations of one resource to `openapi`.
///
/// `base_path` is prepended to every path; mutating operations are left out
/// for read-only resources.
pub fn add_resource<E: ResourceDto>(
    openapi: &mut utoipa::openapi::OpenApi,
    base_path: &str,
    read_only: bool,
) {
    let kind = E::KIND;
    let name = kind.name();
    let tag = kind.tag();
    let collection = format!("{base_path}{}", kind.path());
    let member = format!("{collection}/{{id}}");

    let components = openapi.components.get_or_insert_with(Components::default);
    for (schema_name, schema) in [
        (<E::Create as ToSchema>::name(), <E::Create as utoipa::PartialSchema>::schema()),
        (<E::Update as ToSchema>::name(), <E::Update as utoipa::PartialSchema>::schema()),
        (<E::Response as ToSchema>::name(), <E::Response as utoipa::PartialSchema>::schema()),
    ] {
        components.schemas.insert(schema_name.into_owned(), schema);
    }

    let page_schema = ObjectBuilder::new()
        .property(
            "data",
            ArrayBuilder::new().items(schema_ref::<E::Response>()).build(),
        )
        .required("data")
        .property("pagination", Ref::from_schema_name("PaginationMeta"))
        .required("pagination")
        .build();

    let mut operations: Vec<(String, HttpMethod, Operation)> = vec![
        (
            collection.clone(),
            HttpMethod::Get,
            operation(tag, format!("list_{name}"), format!("List {tag}"))
                .parameters(Some(PaginationParams::into_params(|| {
                    Some(ParameterIn::Query)
                })))
                .response("200", json_response("One page of rows", page_schema))
                .response("400", error_response("Invalid pagination"))
                .build(),
        ),
        (
            member.clone(),
            HttpMethod::Get,
            operation(tag, format!("get_{name}"), format!("Get one of {tag}"))
                .parameter(id_parameter())
                .response("200", json_response("The row", schema_ref::<E::Response>()))
                .response("400", error_response("Invalid id"))
                .response("404", error_response("No row with this id"))
                .build(),
        ),
    ];

    if !read_only {
        let body = |schema: Ref| {
            RequestBodyBuilder::new()
                .required(Some(Required::True))
                .content(JSON, ContentBuilder::new().schema(Some(schema)).build())
                .build()
        };
        operations.push((
            collection.clone(),
            HttpMethod::Post,
            operation(tag, format!("create_{name}"), format!("Create one of {tag}"))
                .request_body(Some(body(schema_ref::<E::Create>())))
                .response("201", json_response("Created row", schema_ref::<E::Response>()))
                .response("400", error_response("Invalid body"))
                .response("409", error_response("Natural key already taken"))
                .build(),
        ));
        operations.push((
            member.clone(),
            HttpMethod::Put,
            operation(tag, format!("update_{name}"), format!("Update one of {tag}"))
                .parameter(id_parameter())
                .request_body(Some(body(schema_ref::<E::Update>())))
                .response("200", json_response("Updated row", schema_ref::<E::Response>()))
                .response("400", error_response("Invalid body or empty update"))
                .response("404", error_response("No row with this id"))
                .response("409", error_response("Natural key already taken"))
                .build(),
        ));
        operations.push((
            member,
            HttpMethod::Delete,
            operation(tag, format!("delete_{name}"), format!("Delete one of {tag}"))
                .parameter(id_parameter())
                .response("204", ResponseBuilder::new().description("Deleted").build())
                .response("400", error_response("Invalid id or row still referenced"))
                .response("404", error_response("No row with this id"))
                .build(),
        ));
    }

    for (path, method, op) in operations {
        openapi.paths.add_path_operation(path, vec![method], op);
    }
}
