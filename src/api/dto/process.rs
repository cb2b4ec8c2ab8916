//! Target process DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::resource::{CODE_PATTERN, ResourceDto, default_true, double_option};
use crate::models::{self, NewTargetProcess, TargetProcess, TargetProcessChanges};

/// Request body for registering a delivery process.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTargetProcessRequest {
    #[validate(
        length(max = 100, message = "code must be at most 100 characters"),
        regex(path = *CODE_PATTERN, message = "code must be dotted lowercase words")
    )]
    #[schema(max_length = 100, pattern = r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$", example = "cold_chain.pickup")]
    pub code: String,
    #[validate(length(min = 1, max = 150, message = "name must be between 1 and 150 characters"))]
    #[schema(min_length = 1, max_length = 150, example = "Cold chain pickup")]
    pub name: String,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    #[schema(max_length = 500)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<CreateTargetProcessRequest> for NewTargetProcess {
    fn from(req: CreateTargetProcessRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            description: req.description,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateTargetProcessRequest {
    #[validate(
        length(max = 100, message = "code must be at most 100 characters"),
        regex(path = *CODE_PATTERN, message = "code must be dotted lowercase words")
    )]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 150, message = "name must be between 1 and 150 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    #[schema(value_type = Option<String>, max_length = 500)]
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
}

impl From<UpdateTargetProcessRequest> for TargetProcessChanges {
    fn from(req: UpdateTargetProcessRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            description: req.description,
            is_active: req.is_active,
            updated_at: models::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TargetProcessResponse {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<TargetProcess> for TargetProcessResponse {
    fn from(row: TargetProcess) -> Self {
        Self {
            id: row.id,
            code: row.code,
            name: row.name,
            description: row.description,
            is_active: row.is_active,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

impl ResourceDto for TargetProcess {
    type Create = CreateTargetProcessRequest;
    type Update = UpdateTargetProcessRequest;
    type Response = TargetProcessResponse;
}
