//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all resource tables, backed either by
//! PostgreSQL or by an in-process store.

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::{
    PgActivityBranchRepository, PgActivityTypeComponentRepository, PgAttributeValueRepository,
    PgItemAttributeValueRepository, PgPermissionRepository, PgRoleMemberRepository,
    PgRoleTaskRepository, PgTargetProcessRepository,
};

use std::sync::Arc;

use async_trait::async_trait;

use crate::db::AsyncDbPool;
use crate::error::AppResult;
use crate::models::{
    ActivityBranch, ActivityTypeComponent, AttributeValue, Entity, ItemAttributeValue, Permission,
    RoleMember, RoleTask, TargetProcess,
};

/// Storage operations for a single entity table.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn insert(&self, new: E::New) -> AppResult<E>;

    async fn find(&self, id: i64) -> AppResult<Option<E>>;

    /// One page of rows ordered by id, plus the total row count.
    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<E>, i64)>;

    /// Returns `None` when no row has the given id.
    async fn update(&self, id: i64, changes: E::Changes) -> AppResult<Option<E>>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// Aggregates all repositories for convenient access.
///
/// Every field is an `Arc`, so cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub activity_branches: Arc<dyn Repository<ActivityBranch>>,
    pub activity_type_components: Arc<dyn Repository<ActivityTypeComponent>>,
    pub attribute_values: Arc<dyn Repository<AttributeValue>>,
    pub item_attribute_values: Arc<dyn Repository<ItemAttributeValue>>,
    pub permissions: Arc<dyn Repository<Permission>>,
    pub role_members: Arc<dyn Repository<RoleMember>>,
    pub role_tasks: Arc<dyn Repository<RoleTask>>,
    pub target_processes: Arc<dyn Repository<TargetProcess>>,
}

impl Repositories {
    /// PostgreSQL repositories sharing one connection pool.
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            activity_branches: Arc::new(PgActivityBranchRepository::new(pool.clone())),
            activity_type_components: Arc::new(PgActivityTypeComponentRepository::new(
                pool.clone(),
            )),
            attribute_values: Arc::new(PgAttributeValueRepository::new(pool.clone())),
            item_attribute_values: Arc::new(PgItemAttributeValueRepository::new(pool.clone())),
            permissions: Arc::new(PgPermissionRepository::new(pool.clone())),
            role_members: Arc::new(PgRoleMemberRepository::new(pool.clone())),
            role_tasks: Arc::new(PgRoleTaskRepository::new(pool.clone())),
            target_processes: Arc::new(PgTargetProcessRepository::new(pool)),
        }
    }

    /// Empty in-process repositories.
    pub fn in_memory() -> Self {
        Self {
            activity_branches: Arc::new(MemoryRepository::new()),
            activity_type_components: Arc::new(MemoryRepository::new()),
            attribute_values: Arc::new(MemoryRepository::new()),
            item_attribute_values: Arc::new(MemoryRepository::new()),
            permissions: Arc::new(MemoryRepository::new()),
            role_members: Arc::new(MemoryRepository::new()),
            role_tasks: Arc::new(MemoryRepository::new()),
            target_processes: Arc::new(MemoryRepository::new()),
        }
    }
}
