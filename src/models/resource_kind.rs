//! The eight resources served by the API

use std::fmt;

/// Identifies a resource, its URL prefix and its storage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    ActivityBranch,
    ActivityTypeComponent,
    AttributeValue,
    ItemAttributeValue,
    Permission,
    RoleMember,
    RoleTask,
    TargetProcess,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 8] = [
        ResourceKind::ActivityBranch,
        ResourceKind::ActivityTypeComponent,
        ResourceKind::AttributeValue,
        ResourceKind::ItemAttributeValue,
        ResourceKind::Permission,
        ResourceKind::RoleMember,
        ResourceKind::RoleTask,
        ResourceKind::TargetProcess,
    ];

    /// Exact, case-sensitive URL prefix
    pub const fn path(&self) -> &'static str {
        match self {
            ResourceKind::ActivityBranch => "/activity-branches",
            ResourceKind::ActivityTypeComponent => "/activity-type-components",
            ResourceKind::AttributeValue => "/attribute-values",
            ResourceKind::ItemAttributeValue => "/item-attribute-values",
            ResourceKind::Permission => "/permissions",
            ResourceKind::RoleMember => "/role-members",
            ResourceKind::RoleTask => "/role-tasks",
            ResourceKind::TargetProcess => "/target-processes",
        }
    }

    /// Singular snake_case name, used in logs and `api.resources.<name>` config keys
    pub const fn name(&self) -> &'static str {
        match self {
            ResourceKind::ActivityBranch => "activity_branch",
            ResourceKind::ActivityTypeComponent => "activity_type_component",
            ResourceKind::AttributeValue => "attribute_value",
            ResourceKind::ItemAttributeValue => "item_attribute_value",
            ResourceKind::Permission => "permission",
            ResourceKind::RoleMember => "role_member",
            ResourceKind::RoleTask => "role_task",
            ResourceKind::TargetProcess => "target_process",
        }
    }

    pub const fn table(&self) -> &'static str {
        match self {
            ResourceKind::ActivityBranch => "activity_branches",
            ResourceKind::ActivityTypeComponent => "activity_type_components",
            ResourceKind::AttributeValue => "attribute_values",
            ResourceKind::ItemAttributeValue => "item_attribute_values",
            ResourceKind::Permission => "permissions",
            ResourceKind::RoleMember => "role_members",
            ResourceKind::RoleTask => "role_tasks",
            ResourceKind::TargetProcess => "target_processes",
        }
    }

    /// OpenAPI tag
    pub const fn tag(&self) -> &'static str {
        match self {
            ResourceKind::ActivityBranch => "Activity Branches",
            ResourceKind::ActivityTypeComponent => "Activity Type Components",
            ResourceKind::AttributeValue => "Attribute Values",
            ResourceKind::ItemAttributeValue => "Item Attribute Values",
            ResourceKind::Permission => "Permissions",
            ResourceKind::RoleMember => "Role Members",
            ResourceKind::RoleTask => "Role Tasks",
            ResourceKind::TargetProcess => "Target Processes",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
