//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::services::Page;

/// Query parameters for pagination.
///
/// The upper bound of `page_size` is configured per resource and checked by
/// the endpoint, not here.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-based)
    #[validate(range(min = 1, message = "Page must be at least 1"))]
    #[param(minimum = 1, example = 1)]
    pub page: Option<u32>,

    /// Number of items per page
    #[validate(range(min = 1, message = "Page size must be at least 1"))]
    #[param(minimum = 1, example = 20)]
    pub page_size: Option<u32>,
}

/// Generic paged response wrapper.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PagedResponse<T> {
    /// The data items for this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page number (1-based)
    #[schema(example = 1)]
    pub page: u32,

    /// Number of items per page
    #[schema(example = 20)]
    pub page_size: u32,

    /// Total number of items across all pages
    #[schema(example = 100)]
    pub total_items: u64,

    /// Total number of pages
    #[schema(example = 5)]
    pub total_pages: u32,

    /// Whether there is a next page
    #[schema(example = true)]
    pub has_next: bool,

    /// Whether there is a previous page
    #[schema(example = false)]
    pub has_prev: bool,
}

impl<T> PagedResponse<T> {
    /// Converts a service page, mapping every item into its response shape.
    pub fn from_page<E>(page: Page<E>) -> Self
    where
        T: From<E>,
    {
        let pagination = PaginationMeta {
            page: page.page,
            page_size: page.page_size,
            total_items: page.total_items,
            total_pages: page.total_pages,
            has_next: page.has_next(),
            has_prev: page.has_prev(),
        };
        Self {
            data: page.items.into_iter().map(T::from).collect(),
            pagination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::PageRequest;

    #[test]
    fn test_from_page_maps_items_and_meta() {
        let page = Page::new(vec![1u8, 2], PageRequest::new(2, 2), 5);
        let response: PagedResponse<u64> = PagedResponse::from_page(page);

        assert_eq!(response.data, vec![1, 2]);
        assert_eq!(response.pagination.total_items, 5);
        assert_eq!(response.pagination.total_pages, 3);
        assert!(response.pagination.has_next);
        assert!(response.pagination.has_prev);
    }

    #[test]
    fn test_missing_params_deserialize_to_none() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert!(params.page.is_none());
        assert!(params.page_size.is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_page_is_invalid() {
        let params = PaginationParams {
            page: Some(0),
            page_size: None,
        };
        assert!(params.validate().is_err());
    }
}
