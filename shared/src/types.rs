//! Common types used across the client

use serde::{Deserialize, Serialize};

/// Default number of rows per grid page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination parameters as the backend expects them (0-based page)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    /// Sort expression, e.g. `nome,asc`
    pub sort: String,
}

impl PageRequest {
    pub fn new(page: u32, size: u32, sort: impl Into<String>) -> Self {
        Self {
            page,
            size,
            sort: sort.into(),
        }
    }

    /// Query parameters in the order the backend documents them
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.page.to_string()),
            ("size", self.size.to_string()),
            ("sort", self.sort.clone()),
        ]
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort: "nome,asc".to_string(),
        }
    }
}

/// One page of a server-side paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(rename = "totalElements", default)]
    pub total_elements: u64,
}

impl<T> Page<T> {
    /// Number of pages needed to show every element at `page_size` rows each
    pub fn page_count(&self, page_size: u32) -> u64 {
        if page_size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(u64::from(page_size))
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
        }
    }
}

/// Wire format for calendar dates (`YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date as sent and accepted by the backend
pub fn parse_date(value: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_query() {
        let query = PageRequest::new(2, 25, "item.nome,asc").to_query();
        assert_eq!(
            query,
            vec![
                ("page", "2".to_string()),
                ("size", "25".to_string()),
                ("sort", "item.nome,asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_page_count() {
        let page: Page<u8> = Page {
            content: vec![],
            total_elements: 21,
        };
        assert_eq!(page.page_count(10), 3);
        assert_eq!(page.page_count(0), 0);
    }

    #[test]
    fn test_page_deserializes_missing_content() {
        let page: Page<u8> = serde_json::from_str(r#"{"totalElements": 4}"#).unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 4);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2026-10-19"),
            chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
        );
        assert!(parse_date("19/10/2026").is_none());
    }
}
