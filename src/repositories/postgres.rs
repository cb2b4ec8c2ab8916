//! PostgreSQL repositories using diesel_async.
//!
//! All eight tables share the same CRUD shape, so the repositories are
//! generated from one template.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::Repository;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{
    ActivityBranch, ActivityBranchChanges, ActivityTypeComponent, ActivityTypeComponentChanges,
    AttributeValue, AttributeValueChanges, ItemAttributeValue, ItemAttributeValueChanges,
    NewActivityBranch, NewActivityTypeComponent, NewAttributeValue, NewItemAttributeValue,
    NewPermission, NewRoleMember, NewRoleTask, NewTargetProcess, Permission, PermissionChanges,
    RoleMember, RoleMemberChanges, RoleTask, RoleTaskChanges, TargetProcess, TargetProcessChanges,
};

fn pool_error(error: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::ConnectionPool {
        source: anyhow::Error::from(error),
    }
}

macro_rules! pg_repository {
    ($repo:ident, $table:ident, $entity:ty, $new:ty, $changes:ty) => {
        /// Repository holding an async connection pool.
        ///
        /// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
        #[derive(Clone)]
        pub struct $repo {
            pool: AsyncDbPool,
        }

        impl $repo {
            pub fn new(pool: AsyncDbPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl Repository<$entity> for $repo {
            async fn insert(&self, new: $new) -> AppResult<$entity> {
                use crate::schema::$table::dsl::*;
                let mut conn = self.pool.get().await.map_err(pool_error)?;

                diesel::insert_into($table)
                    .values(new)
                    .returning(<$entity>::as_returning())
                    .get_result(&mut conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            concat!("insert ", stringify!($table)),
                        )
                    })
            }

            async fn find(&self, row_id: i64) -> AppResult<Option<$entity>> {
                use crate::schema::$table::dsl::*;
                let mut conn = self.pool.get().await.map_err(pool_error)?;

                $table
                    .filter(id.eq(row_id))
                    .select(<$entity>::as_select())
                    .first(&mut conn)
                    .await
                    .optional()
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            concat!("find ", stringify!($table)),
                        )
                    })
            }

            async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<$entity>, i64)> {
                use crate::schema::$table::dsl::*;
                let mut conn = self.pool.get().await.map_err(pool_error)?;
                let operation = concat!("list ", stringify!($table));

                let total: i64 = $table
                    .count()
                    .get_result(&mut conn)
                    .await
                    .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, operation))?;

                let rows = $table
                    .select(<$entity>::as_select())
                    .order(id.asc())
                    .offset(offset)
                    .limit(limit)
                    .load(&mut conn)
                    .await
                    .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, operation))?;

                Ok((rows, total))
            }

            async fn update(&self, row_id: i64, changes: $changes) -> AppResult<Option<$entity>> {
                use crate::schema::$table::dsl::*;
                let mut conn = self.pool.get().await.map_err(pool_error)?;

                diesel::update($table.filter(id.eq(row_id)))
                    .set(changes)
                    .returning(<$entity>::as_returning())
                    .get_result(&mut conn)
                    .await
                    .optional()
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            concat!("update ", stringify!($table)),
                        )
                    })
            }

            async fn delete(&self, row_id: i64) -> AppResult<bool> {
                use crate::schema::$table::dsl::*;
                let mut conn = self.pool.get().await.map_err(pool_error)?;

                let affected = diesel::delete($table.filter(id.eq(row_id)))
                    .execute(&mut conn)
                    .await
                    .map_err(|e| {
                        DatabaseErrorConverter::convert_diesel_error(
                            e,
                            concat!("delete ", stringify!($table)),
                        )
                    })?;
                Ok(affected > 0)
            }
        }
    };
}

pg_repository!(
    PgActivityBranchRepository,
    activity_branches,
    ActivityBranch,
    NewActivityBranch,
    ActivityBranchChanges
);
pg_repository!(
    PgActivityTypeComponentRepository,
    activity_type_components,
    ActivityTypeComponent,
    NewActivityTypeComponent,
    ActivityTypeComponentChanges
);
pg_repository!(
    PgAttributeValueRepository,
    attribute_values,
    AttributeValue,
    NewAttributeValue,
    AttributeValueChanges
);
pg_repository!(
    PgItemAttributeValueRepository,
    item_attribute_values,
    ItemAttributeValue,
    NewItemAttributeValue,
    ItemAttributeValueChanges
);
pg_repository!(
    PgPermissionRepository,
    permissions,
    Permission,
    NewPermission,
    PermissionChanges
);
pg_repository!(
    PgRoleMemberRepository,
    role_members,
    RoleMember,
    NewRoleMember,
    RoleMemberChanges
);
pg_repository!(
    PgRoleTaskRepository,
    role_tasks,
    RoleTask,
    NewRoleTask,
    RoleTaskChanges
);
pg_repository!(
    PgTargetProcessRepository,
    target_processes,
    TargetProcess,
    NewTargetProcess,
    TargetProcessChanges
);
