use diesel::prelude::*;

use super::{Entity, NaturalKey, ResourceKind, Timestamp};

/// A donation activity offered at a branch
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::activity_branches)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityBranch {
    pub id: i64,
    pub activity_id: i64,
    pub branch_id: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::activity_branches)]
pub struct NewActivityBranch {
    pub activity_id: i64,
    pub branch_id: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::activity_branches)]
pub struct ActivityBranchChanges {
    pub activity_id: Option<i64>,
    pub branch_id: Option<i64>,
    pub is_active: Option<bool>,
    pub updated_at: Timestamp,
}

impl Entity for ActivityBranch {
    type New = NewActivityBranch;
    type Changes = ActivityBranchChanges;

    const KIND: ResourceKind = ResourceKind::ActivityBranch;

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, new: NewActivityBranch, now: Timestamp) -> Self {
        Self {
            id,
            activity_id: new.activity_id,
            branch_id: new.branch_id,
            is_active: new.is_active,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: ActivityBranchChanges) {
        if let Some(activity_id) = changes.activity_id {
            self.activity_id = activity_id;
        }
        if let Some(branch_id) = changes.branch_id {
            self.branch_id = branch_id;
        }
        if let Some(is_active) = changes.is_active {
            self.is_active = is_active;
        }
        self.updated_at = changes.updated_at;
    }

    fn is_noop(changes: &ActivityBranchChanges) -> bool {
        changes.activity_id.is_none() && changes.branch_id.is_none() && changes.is_active.is_none()
    }

    fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            fields: "activity_id,branch_id",
            value: format!("{},{}", self.activity_id, self.branch_id),
        }
    }
}

/// A component that makes up an activity type, in display order
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::activity_type_components)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ActivityTypeComponent {
    pub id: i64,
    pub activity_type_id: i64,
    pub component_id: i64,
    pub sort_order: i32,
    pub is_required: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::activity_type_components)]
pub struct NewActivityTypeComponent {
    pub activity_type_id: i64,
    pub component_id: i64,
    pub sort_order: i32,
    pub is_required: bool,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::activity_type_components)]
pub struct ActivityTypeComponentChanges {
    pub activity_type_id: Option<i64>,
    pub component_id: Option<i64>,
    pub sort_order: Option<i32>,
    pub is_required: Option<bool>,
    pub updated_at: Timestamp,
}

impl Entity for ActivityTypeComponent {
    type New = NewActivityTypeComponent;
    type Changes = ActivityTypeComponentChanges;

    const KIND: ResourceKind = ResourceKind::ActivityTypeComponent;

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, new: NewActivityTypeComponent, now: Timestamp) -> Self {
        Self {
            id,
            activity_type_id: new.activity_type_id,
            component_id: new.component_id,
            sort_order: new.sort_order,
            is_required: new.is_required,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: ActivityTypeComponentChanges) {
        if let Some(activity_type_id) = changes.activity_type_id {
            self.activity_type_id = activity_type_id;
        }
        if let Some(component_id) = changes.component_id {
            self.component_id = component_id;
        }
        if let Some(sort_order) = changes.sort_order {
            self.sort_order = sort_order;
        }
        if let Some(is_required) = changes.is_required {
            self.is_required = is_required;
        }
        self.updated_at = changes.updated_at;
    }

    fn is_noop(changes: &ActivityTypeComponentChanges) -> bool {
        changes.activity_type_id.is_none()
            && changes.component_id.is_none()
            && changes.sort_order.is_none()
            && changes.is_required.is_none()
    }

    fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            fields: "activity_type_id,component_id",
            value: format!("{},{}", self.activity_type_id, self.component_id),
        }
    }
}
