use diesel::prelude::*;

use super::{Entity, NaturalKey, ResourceKind, Timestamp};

/// A delivery process a donation can be routed to, e.g. `cold_chain.pickup`
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::target_processes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TargetProcess {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::target_processes)]
pub struct NewTargetProcess {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::target_processes)]
pub struct TargetProcessChanges {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub updated_at: Timestamp,
}

impl Entity for TargetProcess {
    type New = NewTargetProcess;
    type Changes = TargetProcessChanges;

    const KIND: ResourceKind = ResourceKind::TargetProcess;

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, new: NewTargetProcess, now: Timestamp) -> Self {
        Self {
            id,
            code: new.code,
            name: new.name,
            description: new.description,
            is_active: new.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: TargetProcessChanges) {
        if let Some(code) = changes.code {
            self.code = code;
        }
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = changes.updated_at;
    }

    fn is_noop(changes: &TargetProcessChanges) -> bool {
        changes.code.is_none()
            && changes.name.is_none()
            && changes.description.is_none()
            && changes.is_active.is_none()
    }

    fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            fields: "code",
            value: self.code.clone(),
        }
    }
}
