//! Permission, role member and role task DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::resource::{CODE_PATTERN, ResourceDto, default_true, double_option};
use crate::models::{
    self, NewPermission, NewRoleMember, NewRoleTask, Permission, PermissionChanges, RoleMember,
    RoleMemberChanges, RoleTask, RoleTaskChanges,
};

// ============================================================================
// Permissions
// ============================================================================

/// Request body for creating a permission.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePermissionRequest {
    /// Dotted lowercase identifier, unique across permissions
    #[validate(
        length(max = 100, message = "code must be at most 100 characters"),
        regex(path = *CODE_PATTERN, message = "code must be dotted lowercase words")
    )]
    #[schema(max_length = 100, pattern = r"^[a-z][a-z0-9_]*(\.[a-z][a-z0-9_]*)*$", example = "donations.approve")]
    pub code: String,
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    #[schema(min_length = 1, max_length = 100, example = "Approve donations")]
    pub name: String,
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    #[schema(max_length = 500)]
    pub description: Option<String>,
}

impl From<CreatePermissionRequest> for NewPermission {
    fn from(req: CreatePermissionRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            description: req.description,
        }
    }
}

/// `description: null` clears the description; omitting it keeps it.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdatePermissionRequest {
    #[validate(
        length(max = 100, message = "code must be at most 100 characters"),
        regex(path = *CODE_PATTERN, message = "code must be dotted lowercase words")
    )]
    pub code: Option<String>,
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 500, message = "description must be at most 500 characters"))]
    #[schema(value_type = Option<String>, max_length = 500)]
    pub description: Option<Option<String>>,
}

impl From<UpdatePermissionRequest> for PermissionChanges {
    fn from(req: UpdatePermissionRequest) -> Self {
        Self {
            code: req.code,
            name: req.name,
            description: req.description,
            updated_at: models::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PermissionResponse {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<Permission> for PermissionResponse {
    fn from(row: Permission) -> Self {
        Self {
            id: row.id,
            code: row.code,
            name: row.name,
            description: row.description,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

impl ResourceDto for Permission {
    type Create = CreatePermissionRequest;
    type Update = UpdatePermissionRequest;
    type Response = PermissionResponse;
}

// ============================================================================
// Role members
// ============================================================================

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRoleMemberRequest {
    #[validate(range(min = 1, message = "role_id must be a positive id"))]
    #[schema(minimum = 1, example = 2)]
    pub role_id: i64,
    #[validate(range(min = 1, message = "member_id must be a positive id"))]
    #[schema(minimum = 1, example = 41)]
    pub member_id: i64,
}

impl From<CreateRoleMemberRequest> for NewRoleMember {
    fn from(req: CreateRoleMemberRequest) -> Self {
        Self {
            role_id: req.role_id,
            member_id: req.member_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateRoleMemberRequest {
    #[validate(range(min = 1, message = "role_id must be a positive id"))]
    pub role_id: Option<i64>,
    #[validate(range(min = 1, message = "member_id must be a positive id"))]
    pub member_id: Option<i64>,
}

impl From<UpdateRoleMemberRequest> for RoleMemberChanges {
    fn from(req: UpdateRoleMemberRequest) -> Self {
        Self {
            role_id: req.role_id,
            member_id: req.member_id,
            updated_at: models::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleMemberResponse {
    pub id: i64,
    pub role_id: i64,
    pub member_id: i64,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<RoleMember> for RoleMemberResponse {
    fn from(row: RoleMember) -> Self {
        Self {
            id: row.id,
            role_id: row.role_id,
            member_id: row.member_id,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

impl ResourceDto for RoleMember {
    type Create = CreateRoleMemberRequest;
    type Update = UpdateRoleMemberRequest;
    type Response = RoleMemberResponse;
}

// ============================================================================
// Role tasks
// ============================================================================

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRoleTaskRequest {
    #[validate(range(min = 1, message = "role_id must be a positive id"))]
    #[schema(minimum = 1, example = 2)]
    pub role_id: i64,
    #[validate(range(min = 1, message = "task_id must be a positive id"))]
    #[schema(minimum = 1, example = 17)]
    pub task_id: i64,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
}

impl From<CreateRoleTaskRequest> for NewRoleTask {
    fn from(req: CreateRoleTaskRequest) -> Self {
        Self {
            role_id: req.role_id,
            task_id: req.task_id,
            is_enabled: req.is_enabled,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateRoleTaskRequest {
    #[validate(range(min = 1, message = "role_id must be a positive id"))]
    pub role_id: Option<i64>,
    #[validate(range(min = 1, message = "task_id must be a positive id"))]
    pub task_id: Option<i64>,
    pub is_enabled: Option<bool>,
}

impl From<UpdateRoleTaskRequest> for RoleTaskChanges {
    fn from(req: UpdateRoleTaskRequest) -> Self {
        Self {
            role_id: req.role_id,
            task_id: req.task_id,
            is_enabled: req.is_enabled,
            updated_at: models::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoleTaskResponse {
    pub id: i64,
    pub role_id: i64,
    pub task_id: i64,
    pub is_enabled: bool,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<RoleTask> for RoleTaskResponse {
    fn from(row: RoleTask) -> Self {
        Self {
            id: row.id,
            role_id: row.role_id,
            task_id: row.task_id,
            is_enabled: row.is_enabled,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

impl ResourceDto for RoleTask {
    type Create = CreateRoleTaskRequest;
    type Update = UpdateRoleTaskRequest;
    type Response = RoleTaskResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_code_rules() {
        let make = |code: &str| CreatePermissionRequest {
            code: code.to_string(),
            name: "Approve".to_string(),
            description: None,
        };

        assert!(make("donations.approve").validate().is_ok());
        assert!(make("Donations").validate().is_err());
        assert!(make(&"a".repeat(101)).validate().is_err());
    }

    #[test]
    fn test_update_permission_can_clear_description() {
        let req: UpdatePermissionRequest =
            serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert!(req.validate().is_ok());

        let changes = PermissionChanges::from(req);
        assert_eq!(changes.description, Some(None));
        assert!(!<Permission as models::Entity>::is_noop(&changes));
    }

    #[test]
    fn test_role_task_enabled_by_default() {
        let req: CreateRoleTaskRequest =
            serde_json::from_str(r#"{"role_id": 1, "task_id": 2}"#).unwrap();
        assert!(req.is_enabled);
    }

    #[test]
    fn test_role_member_ids_must_be_positive() {
        let req = CreateRoleMemberRequest {
            role_id: 0,
            member_id: 1,
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role_id"));
    }
}
