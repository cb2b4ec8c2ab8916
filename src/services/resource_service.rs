//! Generic CRUD service shared by all eight resources.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Page, PageRequest};
use crate::error::{AppError, AppResult};
use crate::models::{
    ActivityBranch, ActivityTypeComponent, AttributeValue, Entity, ItemAttributeValue, Permission,
    RoleMember, RoleTask, TargetProcess,
};
use crate::repositories::Repository;

/// Operations a resource endpoint delegates to.
#[async_trait]
pub trait ResourceService: Send + Sync + 'static {
    type Entity: Entity;

    async fn list(&self, request: PageRequest) -> AppResult<Page<Self::Entity>>;

    /// Fails with `NotFound` for an unknown id.
    async fn get(&self, id: i64) -> AppResult<Self::Entity>;

    async fn create(&self, new: <Self::Entity as Entity>::New) -> AppResult<Self::Entity>;

    /// Fails with `BadRequest` when `changes` modifies nothing.
    async fn update(
        &self,
        id: i64,
        changes: <Self::Entity as Entity>::Changes,
    ) -> AppResult<Self::Entity>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

/// `ResourceService` over any repository for `E`.
pub struct EntityService<E: Entity> {
    repo: Arc<dyn Repository<E>>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(repo: Arc<dyn Repository<E>>) -> Self {
        Self { repo }
    }

    fn not_found(id: i64) -> AppError {
        AppError::not_found_by_id(E::KIND.name(), id)
    }
}

impl<E: Entity> Clone for EntityService<E> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
        }
    }
}

#[async_trait]
impl<E: Entity> ResourceService for EntityService<E> {
    type Entity = E;

    async fn list(&self, request: PageRequest) -> AppResult<Page<E>> {
        let (items, total) = self.repo.list(request.offset(), request.limit()).await?;
        Ok(Page::new(items, request, total))
    }

    async fn get(&self, id: i64) -> AppResult<E> {
        self.repo.find(id).await?.ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, new: E::New) -> AppResult<E> {
        let row = self.repo.insert(new).await?;
        tracing::info!(resource = E::KIND.name(), id = row.id(), "Created");
        Ok(row)
    }

    async fn update(&self, id: i64, changes: E::Changes) -> AppResult<E> {
        if E::is_noop(&changes) {
            return Err(AppError::bad_request("update must change at least one field"));
        }
        let row = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| Self::not_found(id))?;
        tracing::info!(resource = E::KIND.name(), id, "Updated");
        Ok(row)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(Self::not_found(id));
        }
        tracing::info!(resource = E::KIND.name(), id, "Deleted");
        Ok(())
    }
}

pub type ActivityBranchService = EntityService<ActivityBranch>;
pub type ActivityTypeComponentService = EntityService<ActivityTypeComponent>;
pub type AttributeValueService = EntityService<AttributeValue>;
pub type ItemAttributeValueService = EntityService<ItemAttributeValue>;
pub type PermissionService = EntityService<Permission>;
pub type RoleMemberService = EntityService<RoleMember>;
pub type RoleTaskService = EntityService<RoleTask>;
pub type TargetProcessService = EntityService<TargetProcess>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{self, NewRoleTask, RoleTaskChanges};
    use crate::repositories::MemoryRepository;

    fn service() -> RoleTaskService {
        EntityService::new(Arc::new(MemoryRepository::new()))
    }

    fn task(task_id: i64) -> NewRoleTask {
        NewRoleTask {
            role_id: 1,
            task_id,
            is_enabled: true,
        }
    }

    fn no_changes() -> RoleTaskChanges {
        RoleTaskChanges {
            role_id: None,
            task_id: None,
            is_enabled: None,
            updated_at: models::now(),
        }
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let err = service().get(5).await.unwrap_err();
        assert_eq!(err.to_string(), "Resource not found: role_task with id=5");
    }

    #[tokio::test]
    async fn test_update_rejects_empty_change_set() {
        let service = service();
        let created = service.create(task(1)).await.unwrap();

        let err = service.update(created.id, no_changes()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest { .. }));
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let changes = RoleTaskChanges {
            is_enabled: Some(false),
            ..no_changes()
        };
        let err = service().update(3, changes).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_get() {
        let service = service();
        let created = service.create(task(1)).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(
            service.get(created.id).await,
            Err(AppError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_list_reports_totals() {
        let service = service();
        for task_id in 1..=5 {
            service.create(task(task_id)).await.unwrap();
        }

        let page = service.list(PageRequest::new(2, 2)).await.unwrap();
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].task_id, 3);
        assert!(page.has_next());
        assert!(page.has_prev());
    }
}
