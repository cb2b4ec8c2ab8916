//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod pagination;
mod resource_service;

pub use pagination::{Page, PageRequest};
pub use resource_service::{
    ActivityBranchService, ActivityTypeComponentService, AttributeValueService, EntityService,
    ItemAttributeValueService, PermissionService, ResourceService, RoleMemberService,
    RoleTaskService, TargetProcessService,
};

use std::sync::Arc;

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since every service sits behind an `Arc`.
#[derive(Clone)]
pub struct Services {
    pub activity_branches: Arc<ActivityBranchService>,
    pub activity_type_components: Arc<ActivityTypeComponentService>,
    pub attribute_values: Arc<AttributeValueService>,
    pub item_attribute_values: Arc<ItemAttributeValueService>,
    pub permissions: Arc<PermissionService>,
    pub role_members: Arc<RoleMemberService>,
    pub role_tasks: Arc<RoleTaskService>,
    pub target_processes: Arc<TargetProcessService>,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories) -> Self {
        Self {
            activity_branches: Arc::new(EntityService::new(repos.activity_branches)),
            activity_type_components: Arc::new(EntityService::new(repos.activity_type_components)),
            attribute_values: Arc::new(EntityService::new(repos.attribute_values)),
            item_attribute_values: Arc::new(EntityService::new(repos.item_attribute_values)),
            permissions: Arc::new(EntityService::new(repos.permissions)),
            role_members: Arc::new(EntityService::new(repos.role_members)),
            role_tasks: Arc::new(EntityService::new(repos.role_tasks)),
            target_processes: Arc::new(EntityService::new(repos.target_processes)),
        }
    }
}
