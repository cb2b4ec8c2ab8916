//! Activity branch and activity-type component DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::resource::{ResourceDto, default_true};
use crate::models::{
    self, ActivityBranch, ActivityBranchChanges, ActivityTypeComponent,
    ActivityTypeComponentChanges, NewActivityBranch, NewActivityTypeComponent,
};

// ============================================================================
// Activity branches
// ============================================================================

/// Request body for linking an activity to a branch.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateActivityBranchRequest {
    #[validate(range(min = 1, message = "activity_id must be a positive id"))]
    #[schema(minimum = 1, example = 12)]
    pub activity_id: i64,
    #[validate(range(min = 1, message = "branch_id must be a positive id"))]
    #[schema(minimum = 1, example = 3)]
    pub branch_id: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl From<CreateActivityBranchRequest> for NewActivityBranch {
    fn from(req: CreateActivityBranchRequest) -> Self {
        Self {
            activity_id: req.activity_id,
            branch_id: req.branch_id,
            is_active: req.is_active,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateActivityBranchRequest {
    #[validate(range(min = 1, message = "activity_id must be a positive id"))]
    pub activity_id: Option<i64>,
    #[validate(range(min = 1, message = "branch_id must be a positive id"))]
    pub branch_id: Option<i64>,
    pub is_active: Option<bool>,
}

impl From<UpdateActivityBranchRequest> for ActivityBranchChanges {
    fn from(req: UpdateActivityBranchRequest) -> Self {
        Self {
            activity_id: req.activity_id,
            branch_id: req.branch_id,
            is_active: req.is_active,
            updated_at: models::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityBranchResponse {
    pub id: i64,
    pub activity_id: i64,
    pub branch_id: i64,
    pub is_active: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<ActivityBranch> for ActivityBranchResponse {
    fn from(row: ActivityBranch) -> Self {
        Self {
            id: row.id,
            activity_id: row.activity_id,
            branch_id: row.branch_id,
            is_active: row.is_active,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

impl ResourceDto for ActivityBranch {
    type Create = CreateActivityBranchRequest;
    type Update = UpdateActivityBranchRequest;
    type Response = ActivityBranchResponse;
}

// ============================================================================
// Activity-type components
// ============================================================================

/// Request body for attaching a component to an activity type.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateActivityTypeComponentRequest {
    #[validate(range(min = 1, message = "activity_type_id must be a positive id"))]
    #[schema(minimum = 1, example = 2)]
    pub activity_type_id: i64,
    #[validate(range(min = 1, message = "component_id must be a positive id"))]
    #[schema(minimum = 1, example = 8)]
    pub component_id: i64,
    /// Position among the type's components, lowest first
    #[serde(default)]
    #[validate(range(min = 0, message = "sort_order must not be negative"))]
    #[schema(minimum = 0, example = 0)]
    pub sort_order: i32,
    #[serde(default)]
    pub is_required: bool,
}

impl From<CreateActivityTypeComponentRequest> for NewActivityTypeComponent {
    fn from(req: CreateActivityTypeComponentRequest) -> Self {
        Self {
            activity_type_id: req.activity_type_id,
            component_id: req.component_id,
            sort_order: req.sort_order,
            is_required: req.is_required,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateActivityTypeComponentRequest {
    #[validate(range(min = 1, message = "activity_type_id must be a positive id"))]
    pub activity_type_id: Option<i64>,
    #[validate(range(min = 1, message = "component_id must be a positive id"))]
    pub component_id: Option<i64>,
    #[validate(range(min = 0, message = "sort_order must not be negative"))]
    pub sort_order: Option<i32>,
    pub is_required: Option<bool>,
}

impl From<UpdateActivityTypeComponentRequest> for ActivityTypeComponentChanges {
    fn from(req: UpdateActivityTypeComponentRequest) -> Self {
        Self {
            activity_type_id: req.activity_type_id,
            component_id: req.component_id,
            sort_order: req.sort_order,
            is_required: req.is_required,
            updated_at: models::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityTypeComponentResponse {
    pub id: i64,
    pub activity_type_id: i64,
    pub component_id: i64,
    pub sort_order: i32,
    pub is_required: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<ActivityTypeComponent> for ActivityTypeComponentResponse {
    fn from(row: ActivityTypeComponent) -> Self {
        Self {
            id: row.id,
            activity_type_id: row.activity_type_id,
            component_id: row.component_id,
            sort_order: row.sort_order,
            is_required: row.is_required,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

impl ResourceDto for ActivityTypeComponent {
    type Create = CreateActivityTypeComponentRequest;
    type Update = UpdateActivityTypeComponentRequest;
    type Response = ActivityTypeComponentResponse;
}
