use diesel::prelude::*;

use super::{Entity, NaturalKey, ResourceKind, Timestamp};

/// A named permission such as `donations.approve`.
///
/// Permissions are stored and served here; nothing in this service enforces them.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::permissions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Permission {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::permissions)]
pub struct NewPermission {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// `description: Some(None)` clears the column
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::permissions)]
pub struct PermissionChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub updated_at: Timestamp,
}

impl Entity for Permission {
    type New = NewPermission;
    type Changes = PermissionChanges;

    const KIND: ResourceKind = ResourceKind::Permission;

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, new: NewPermission, now: Timestamp) -> Self {
        Self {
            id,
            code: new.code,
            name: new.name,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: PermissionChanges) {
        if let Some(code) = changes.code {
            self.code = code;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        self.updated_at = changes.updated_at;
    }

    fn is_noop(changes: &PermissionChanges) -> bool {
        changes.code.is_none() && changes.name.is_none() && changes.description.is_none()
    }

    fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            fields: "code",
            value: self.code.clone(),
        }
    }
}

/// Membership of a user in a role
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::role_members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleMember {
    pub id: i64,
    pub role_id: i64,
    pub member_id: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::role_members)]
pub struct NewRoleMember {
    pub role_id: i64,
    pub member_id: i64,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::role_members)]
pub struct RoleMemberChanges {
    pub role_id: Option<i64>,
    pub member_id: Option<i64>,
    pub updated_at: Timestamp,
}

impl Entity for RoleMember {
    type New = NewRoleMember;
    type Changes = RoleMemberChanges;

    const KIND: ResourceKind = ResourceKind::RoleMember;

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, new: NewRoleMember, now: Timestamp) -> Self {
        Self {
            id,
            role_id: new.role_id,
            member_id: new.member_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: RoleMemberChanges) {
        if let Some(role_id) = changes.role_id {
            self.role_id = role_id;
        }
        if let Some(member_id) = changes.member_id {
            self.member_id = member_id;
        }
        self.updated_at = changes.updated_at;
    }

    fn is_noop(changes: &RoleMemberChanges) -> bool {
        changes.role_id.is_none() && changes.member_id.is_none()
    }

    fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            fields: "role_id,member_id",
            value: format!("{},{}", self.role_id, self.member_id),
        }
    }
}

/// A task that members of a role may carry out
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::role_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct RoleTask {
    pub id: i64,
    pub role_id: i64,
    pub task_id: i64,
    pub is_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::role_tasks)]
pub struct NewRoleTask {
    pub role_id: i64,
    pub task_id: i64,
    pub is_enabled: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::role_tasks)]
pub struct RoleTaskChanges {
    pub role_id: Option<i64>,
    pub task_id: Option<i64>,
    pub is_enabled: Option<bool>,
    pub updated_at: Timestamp,
}

impl Entity for RoleTask {
    type New = NewRoleTask;
    type Changes = RoleTaskChanges;

    const KIND: ResourceKind = ResourceKind::RoleTask;

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, new: NewRoleTask, now: Timestamp) -> Self {
        Self {
            id,
            role_id: new.role_id,
            task_id: new.task_id,
            is_enabled: new.is_enabled,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: RoleTaskChanges) {
        if let Some(role_id) = changes.role_id {
            self.role_id = role_id;
        }
        if let Some(task_id) = changes.task_id {
            self.task_id = task_id;
        }
        if let Some(is_enabled) = changes.is_enabled {
            self.is_enabled = is_enabled;
        }
        self.updated_at = changes.updated_at;
    }

    fn is_noop(changes: &RoleTaskChanges) -> bool {
        changes.role_id.is_none() && changes.task_id.is_none() && changes.is_enabled.is_none()
    }

    fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            fields: "role_id,task_id",
            value: format!("{},{}", self.role_id, self.task_id),
        }
    }
}
