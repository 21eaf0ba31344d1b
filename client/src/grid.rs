//! Paged grid state kept in sync with server-side pagination
//!
//! Every change that alters the result set (search term, category, page
//! size) sends the grid back to the first page.

use shared::{ItemKind, PageRequest, DEFAULT_PAGE_SIZE};

/// Query derived from a [`GridState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridQuery {
    pub page: PageRequest,
    pub category: Option<ItemKind>,
    pub search: Option<String>,
}

impl GridQuery {
    pub fn new(page: PageRequest) -> Self {
        Self {
            page,
            category: None,
            search: None,
        }
    }

    /// Backend query parameters: `page`, `size`, `sort`, then `dtype` and
    /// `busca` when set
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.page.to_query();
        if let Some(kind) = self.category {
            params.push(("dtype", kind.as_str().to_string()));
        }
        if let Some(term) = &self.search {
            params.push(("busca", term.clone()));
        }
        params
    }
}

/// Pagination and filter state of one grid
#[derive(Debug, Clone)]
pub struct GridState {
    page: u32,
    page_size: u32,
    sort: String,
    category: Option<ItemKind>,
    search_input: String,
    search_term: Option<String>,
}

impl GridState {
    pub fn new(sort: impl Into<String>) -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: sort.into(),
            category: None,
            search_input: String::new(),
            search_term: None,
        }
    }

    /// Item catalog grid: sorted by name, one category per tab
    pub fn for_items(category: ItemKind) -> Self {
        let mut state = Self::new("nome,asc");
        state.category = Some(category);
        state
    }

    /// Stock balance grid: sorted by the item's name
    pub fn for_stock() -> Self {
        Self::new("item.nome,asc")
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn category(&self) -> Option<ItemKind> {
        self.category
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    /// Edit the search box without querying yet
    pub fn set_search_input(&mut self, text: impl Into<String>) {
        self.search_input = text.into();
    }

    /// Apply the search box; a blank box clears the search
    pub fn apply_search(&mut self) {
        let term = self.search_input.trim();
        self.search_term = (!term.is_empty()).then(|| term.to_string());
        self.page = 0;
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.search_term = None;
        self.page = 0;
    }

    pub fn set_category(&mut self, category: Option<ItemKind>) {
        self.category = category;
        self.page = 0;
    }

    pub fn set_page(&mut self, page: u32) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, page_size: u32) {
        let page_size = page_size.max(1);
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page = 0;
        }
    }

    /// Step back one page if the current one is past the end, e.g. after the
    /// last row of the final page was deleted
    pub fn clamp_to(&mut self, total_elements: u64) {
        let pages = total_elements.div_ceil(u64::from(self.page_size));
        let last = pages.saturating_sub(1);
        if u64::from(self.page) > last {
            self.page = u32::try_from(last).unwrap_or(u32::MAX);
        }
    }

    pub fn query(&self) -> GridQuery {
        GridQuery {
            page: PageRequest::new(self.page, self.page_size, self.sort.clone()),
            category: self.category,
            search: self.search_term.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_grid_params() {
        let mut grid = GridState::for_items(ItemKind::Medicine);
        grid.set_search_input("dipi");
        grid.apply_search();

        assert_eq!(
            grid.query().to_params(),
            vec![
                ("page", "0".to_string()),
                ("size", "10".to_string()),
                ("sort", "nome,asc".to_string()),
                ("dtype", "MEDICAMENTO".to_string()),
                ("busca", "dipi".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_resets_page() {
        let mut grid = GridState::for_stock();
        grid.set_page(4);
        grid.set_search_input("gaze");
        assert_eq!(grid.page(), 4);

        grid.apply_search();
        assert_eq!(grid.page(), 0);
        assert_eq!(grid.search_term(), Some("gaze"));
    }

    #[test]
    fn test_blank_search_clears_term() {
        let mut grid = GridState::for_stock();
        grid.set_search_input("gaze");
        grid.apply_search();
        grid.set_search_input("   ");
        grid.apply_search();
        assert_eq!(grid.search_term(), None);
        assert!(!grid.query().to_params().iter().any(|(k, _)| *k == "busca"));
    }

    #[test]
    fn test_category_and_page_size_reset_page() {
        let mut grid = GridState::for_items(ItemKind::Medicine);
        grid.set_page(2);
        grid.set_category(Some(ItemKind::Supply));
        assert_eq!(grid.page(), 0);

        grid.set_page(3);
        grid.set_page_size(10);
        assert_eq!(grid.page(), 3);
        grid.set_page_size(25);
        assert_eq!(grid.page(), 0);
        assert_eq!(grid.page_size(), 25);
    }

    #[test]
    fn test_clear_search() {
        let mut grid = GridState::for_stock();
        grid.set_search_input("x");
        grid.apply_search();
        grid.set_page(1);
        grid.clear_search();
        assert_eq!(grid.search_input(), "");
        assert_eq!(grid.search_term(), None);
        assert_eq!(grid.page(), 0);
    }

    #[test]
    fn test_clamp_to_total() {
        let mut grid = GridState::for_stock();
        grid.set_page(3);
        grid.clamp_to(30);
        assert_eq!(grid.page(), 2);
        grid.clamp_to(0);
        assert_eq!(grid.page(), 0);
    }
}
