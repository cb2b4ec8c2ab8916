//! Attribute value DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::resource::ResourceDto;
use crate::models::{
    self, AttributeValue, AttributeValueChanges, ItemAttributeValue, ItemAttributeValueChanges,
    NewAttributeValue, NewItemAttributeValue,
};

// ============================================================================
// Attribute values
// ============================================================================

/// Request body for one allowed value of an item attribute (e.g. `perishable`).
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateAttributeValueRequest {
    #[validate(range(min = 1, message = "attribute_id must be a positive id"))]
    #[schema(minimum = 1, example = 4)]
    pub attribute_id: i64,
    #[validate(length(min = 1, max = 255, message = "value must be between 1 and 255 characters"))]
    #[schema(min_length = 1, max_length = 255, example = "perishable")]
    pub value: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "display_order must not be negative"))]
    #[schema(minimum = 0, example = 0)]
    pub display_order: i32,
}

impl From<CreateAttributeValueRequest> for NewAttributeValue {
    fn from(req: CreateAttributeValueRequest) -> Self {
        Self {
            attribute_id: req.attribute_id,
            value: req.value,
            display_order: req.display_order,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateAttributeValueRequest {
    #[validate(range(min = 1, message = "attribute_id must be a positive id"))]
    pub attribute_id: Option<i64>,
    #[validate(length(min = 1, max = 255, message = "value must be between 1 and 255 characters"))]
    pub value: Option<String>,
    #[validate(range(min = 0, message = "display_order must not be negative"))]
    pub display_order: Option<i32>,
}

impl From<UpdateAttributeValueRequest> for AttributeValueChanges {
    fn from(req: UpdateAttributeValueRequest) -> Self {
        Self {
            attribute_id: req.attribute_id,
            value: req.value,
            display_order: req.display_order,
            updated_at: models::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AttributeValueResponse {
    pub id: i64,
    pub attribute_id: i64,
    pub value: String,
    pub display_order: i32,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<AttributeValue> for AttributeValueResponse {
    fn from(row: AttributeValue) -> Self {
        Self {
            id: row.id,
            attribute_id: row.attribute_id,
            value: row.value,
            display_order: row.display_order,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

impl ResourceDto for AttributeValue {
    type Create = CreateAttributeValueRequest;
    type Update = UpdateAttributeValueRequest;
    type Response = AttributeValueResponse;
}

// ============================================================================
// Item attribute values
// ============================================================================

/// Request body for tagging a donated item with an attribute value.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateItemAttributeValueRequest {
    #[validate(range(min = 1, message = "item_id must be a positive id"))]
    #[schema(minimum = 1, example = 310)]
    pub item_id: i64,
    #[validate(range(min = 1, message = "attribute_value_id must be a positive id"))]
    #[schema(minimum = 1, example = 1)]
    pub attribute_value_id: i64,
}

impl From<CreateItemAttributeValueRequest> for NewItemAttributeValue {
    fn from(req: CreateItemAttributeValueRequest) -> Self {
        Self {
            item_id: req.item_id,
            attribute_value_id: req.attribute_value_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateItemAttributeValueRequest {
    #[validate(range(min = 1, message = "item_id must be a positive id"))]
    pub item_id: Option<i64>,
    #[validate(range(min = 1, message = "attribute_value_id must be a positive id"))]
    pub attribute_value_id: Option<i64>,
}

impl From<UpdateItemAttributeValueRequest> for ItemAttributeValueChanges {
    fn from(req: UpdateItemAttributeValueRequest) -> Self {
        Self {
            item_id: req.item_id,
            attribute_value_id: req.attribute_value_id,
            updated_at: models::now(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemAttributeValueResponse {
    pub id: i64,
    pub item_id: i64,
    pub attribute_value_id: i64,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<ItemAttributeValue> for ItemAttributeValueResponse {
    fn from(row: ItemAttributeValue) -> Self {
        Self {
            id: row.id,
            item_id: row.item_id,
            attribute_value_id: row.attribute_value_id,
            created_at: row.created_at.to_jiff(),
            updated_at: row.updated_at.to_jiff(),
        }
    }
}

impl ResourceDto for ItemAttributeValue {
    type Create = CreateItemAttributeValueRequest;
    type Update = UpdateItemAttributeValueRequest;
    type Response = ItemAttributeValueResponse;
}
