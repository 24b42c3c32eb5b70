//! Page-number pagination for list endpoints

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// `?page=` query parameter: a 1-based number or `last`
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// A resolved page window over a result set of known size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub per_page: i64,
    pub num_pages: i64,
    pub total: i64,
}

impl PageWindow {
    /// Resolve the requested page against `total` rows.
    ///
    /// An empty result set still has one (empty) page.
    pub fn resolve(query: &PageQuery, total: i64, per_page: i64) -> AppResult<Self> {
        let num_pages = if total == 0 {
            1
        } else {
            (total + per_page - 1) / per_page
        };

        let page = match query.page.as_deref().map(str::trim) {
            None | Some("") => 1,
            Some("last") => num_pages,
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| AppError::NotFound("Page is not a number".to_string()))?,
        };

        if page < 1 || page > num_pages {
            return Err(AppError::NotFound(format!("Invalid page ({})", page)));
        }

        Ok(Self {
            page,
            per_page,
            num_pages,
            total,
        })
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }
}

/// Paginated response wrapper
#[derive(Debug, Serialize, ToSchema)]
pub struct Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// Entries on this page
    pub items: Vec<T>,
    /// Total number of entries
    pub total: i64,
    /// Current page number
    pub page: i64,
    /// Entries per page
    pub per_page: i64,
    pub num_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self {
            items,
            total: window.total,
            page: window.page,
            per_page: window.per_page,
            num_pages: window.num_pages,
            has_next: window.page < window.num_pages,
            has_previous: window.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn test_default_first_page() {
        let window = PageWindow::resolve(&query(None), 7, 3).unwrap();
        assert_eq!(window.page, 1);
        assert_eq!(window.num_pages, 3);
        assert_eq!(window.offset(), 0);
        assert_eq!(window.limit(), 3);
    }

    #[test]
    fn test_last_page() {
        let window = PageWindow::resolve(&query(Some("last")), 7, 3).unwrap();
        assert_eq!(window.page, 3);
        assert_eq!(window.offset(), 6);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let window = PageWindow::resolve(&query(Some("1")), 0, 10).unwrap();
        assert_eq!(window.num_pages, 1);
        assert!(PageWindow::resolve(&query(Some("2")), 0, 10).is_err());
    }

    #[test]
    fn test_out_of_range_pages_are_not_found() {
        for raw in ["0", "-1", "4", "abc"] {
            let err = PageWindow::resolve(&query(Some(raw)), 7, 3).unwrap_err();
            assert!(matches!(err, AppError::NotFound(_)), "page {raw}");
        }
    }

    #[test]
    fn test_page_flags() {
        let window = PageWindow::resolve(&query(Some("2")), 7, 3).unwrap();
        let page = Page::new(vec![crate::models::Genre { id: 1, name: "Poetry".into() }], window);
        assert!(page.has_next);
        assert!(page.has_previous);
        assert_eq!(page.total, 7);
    }
}
