use diesel::prelude::*;

use super::{Entity, NaturalKey, ResourceKind, Timestamp};

/// One allowed value of an item attribute, e.g. "frozen" for storage type
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::attribute_values)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttributeValue {
    pub id: i64,
    pub attribute_id: i64,
    pub value: String,
    pub display_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::attribute_values)]
pub struct NewAttributeValue {
    pub attribute_id: i64,
    pub value: String,
    pub display_order: i32,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::attribute_values)]
pub struct AttributeValueChanges {
    pub attribute_id: Option<i64>,
    pub value: Option<String>,
    pub display_order: Option<i32>,
    pub updated_at: Timestamp,
}

impl Entity for AttributeValue {
    type New = NewAttributeValue;
    type Changes = AttributeValueChanges;

    const KIND: ResourceKind = ResourceKind::AttributeValue;

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, new: NewAttributeValue, now: Timestamp) -> Self {
        Self {
            id,
            attribute_id: new.attribute_id,
            value: new.value,
            display_order: new.display_order,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: AttributeValueChanges) {
        if let Some(attribute_id) = changes.attribute_id {
            self.attribute_id = attribute_id;
        }
        if let Some(value) = changes.value {
            self.value = value;
        }
        if let Some(display_order) = changes.display_order {
            self.display_order = display_order;
        }
        self.updated_at = changes.updated_at;
    }

    fn is_noop(changes: &AttributeValueChanges) -> bool {
        changes.attribute_id.is_none() && changes.value.is_none() && changes.display_order.is_none()
    }

    fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            fields: "attribute_id,value",
            value: format!("{},{}", self.attribute_id, self.value),
        }
    }
}

/// Assigns an attribute value to a donated item
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = crate::schema::item_attribute_values)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ItemAttributeValue {
    pub id: i64,
    pub item_id: i64,
    pub attribute_value_id: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::item_attribute_values)]
pub struct NewItemAttributeValue {
    pub item_id: i64,
    pub attribute_value_id: i64,
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = crate::schema::item_attribute_values)]
pub struct ItemAttributeValueChanges {
    pub item_id: Option<i64>,
    pub attribute_value_id: Option<i64>,
    pub updated_at: Timestamp,
}

impl Entity for ItemAttributeValue {
    type New = NewItemAttributeValue;
    type Changes = ItemAttributeValueChanges;

    const KIND: ResourceKind = ResourceKind::ItemAttributeValue;

    fn id(&self) -> i64 {
        self.id
    }

    fn materialize(id: i64, new: NewItemAttributeValue, now: Timestamp) -> Self {
        Self {
            id,
            item_id: new.item_id,
            attribute_value_id: new.attribute_value_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply(&mut self, changes: ItemAttributeValueChanges) {
        if let Some(item_id) = changes.item_id {
            self.item_id = item_id;
        }
        if let Some(attribute_value_id) = changes.attribute_value_id {
            self.attribute_value_id = attribute_value_id;
        }
        self.updated_at = changes.updated_at;
    }

    fn is_noop(changes: &ItemAttributeValueChanges) -> bool {
        changes.item_id.is_none() && changes.attribute_value_id.is_none()
    }

    fn natural_key(&self) -> NaturalKey {
        NaturalKey {
            fields: "item_id,attribute_value_id",
            value: format!("{},{}", self.item_id, self.attribute_value_id),
        }
    }
}
