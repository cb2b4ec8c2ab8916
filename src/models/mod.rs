mod access;
mod activity;
mod attribute;
mod entity;
mod process;
mod resource_kind;

pub use access::{
    NewPermission, NewRoleMember, NewRoleTask, Permission, PermissionChanges, RoleMember,
    RoleMemberChanges, RoleTask, RoleTaskChanges,
};
pub use activity::{
    ActivityBranch, ActivityBranchChanges, ActivityTypeComponent, ActivityTypeComponentChanges,
    NewActivityBranch, NewActivityTypeComponent,
};
pub use attribute::{
    AttributeValue, AttributeValueChanges, ItemAttributeValue, ItemAttributeValueChanges,
    NewAttributeValue, NewItemAttributeValue,
};
pub use entity::{Entity, NaturalKey};
pub use process::{NewTargetProcess, TargetProcess, TargetProcessChanges};
pub use resource_kind::ResourceKind;

/// Column type of `created_at` / `updated_at`
pub type Timestamp = jiff_diesel::Timestamp;

/// Current time in the column representation
pub fn now() -> Timestamp {
    jiff::Timestamp::now().into()
}
