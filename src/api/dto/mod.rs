//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `activity`, `attribute`, `access`, `process` - per-resource request/response DTOs
//! - `resource` - the entity-to-DTO binding used by the generic endpoint
//! - `error` - Common error response DTOs
//! - `pagination` - Pagination-related DTOs
//! - `health` - Health check DTOs

mod access;
mod activity;
mod attribute;
mod error;
mod health;
mod pagination;
mod process;
mod resource;

pub use access::{
    CreatePermissionRequest, CreateRoleMemberRequest, CreateRoleTaskRequest, PermissionResponse,
    RoleMemberResponse, RoleTaskResponse, UpdatePermissionRequest, UpdateRoleMemberRequest,
    UpdateRoleTaskRequest,
};
pub use activity::{
    ActivityBranchResponse, ActivityTypeComponentResponse, CreateActivityBranchRequest,
    CreateActivityTypeComponentRequest, UpdateActivityBranchRequest,
    UpdateActivityTypeComponentRequest,
};
pub use attribute::{
    AttributeValueResponse, CreateAttributeValueRequest, CreateItemAttributeValueRequest,
    ItemAttributeValueResponse, UpdateAttributeValueRequest, UpdateItemAttributeValueRequest,
};
pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use pagination::{PagedResponse, PaginationMeta, PaginationParams};
pub use process::{CreateTargetProcessRequest, TargetProcessResponse, UpdateTargetProcessRequest};
pub use resource::{CODE_PATTERN, ResourceDto};
