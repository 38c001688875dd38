//! Pagination of the sorted collection

use serde::{Deserialize, Serialize};

/// Width of the page-number button window shown by the table footer
pub const PAGE_WINDOW: usize = 5;

fn default_page() -> usize {
    1
}

fn default_per_page() -> usize {
    10
}

/// Pagination state owned by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Page number (starts at 1)
    #[serde(default = "default_page")]
    pub current_page: usize,

    /// Number of items per page
    #[serde(default = "default_per_page")]
    pub items_per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current_page: default_page(),
            items_per_page: default_per_page(),
        }
    }
}

impl PageState {
    /// Get the page number, ensuring minimum of 1
    pub fn page(&self) -> usize {
        self.current_page.max(1)
    }

    /// Get the page size, ensuring minimum of 1
    pub fn per_page(&self) -> usize {
        self.items_per_page.max(1)
    }

    /// Change the page size; always resets to the first page
    pub fn set_items_per_page(&mut self, per_page: usize) {
        self.items_per_page = per_page.max(1);
        self.current_page = 1;
    }

    /// Clamp the current page into `[1, total_pages]`
    pub fn clamp(&mut self, total_pages: usize) {
        self.current_page = self.page().min(total_pages.max(1));
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number (starts at 1)
    pub page: usize,

    /// Number of items per page
    pub per_page: usize,

    /// Total number of items (after filters)
    pub total_items: usize,

    /// Total number of pages, at least 1 even for an empty collection
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PageMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: usize, per_page: usize, total_items: usize) -> Self {
        let per_page = per_page.max(1);
        let total_pages = total_items.div_ceil(per_page).max(1);
        let page = page.clamp(1, total_pages);

        Self {
            page,
            per_page,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One derived page of the collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// The rows of the current page
    pub rows: Vec<T>,

    /// Pagination metadata
    pub meta: PageMeta,
}

impl<T> Page<T> {
    /// An empty first page
    pub fn empty(per_page: usize) -> Self {
        Self {
            rows: Vec::new(),
            meta: PageMeta::new(1, per_page, 0),
        }
    }
}

/// Slice one page out of the full collection
///
/// The requested page is clamped into range first, so a stale page number
/// after a filter change still yields a valid page.
pub fn paginate<T: Clone>(rows: &[T], state: &PageState) -> Page<T> {
    let meta = PageMeta::new(state.page(), state.per_page(), rows.len());
    let start = (meta.page - 1) * meta.per_page;
    let end = (start + meta.per_page).min(rows.len());
    let rows = if start < rows.len() {
        rows[start..end].to_vec()
    } else {
        Vec::new()
    };

    Page { rows, meta }
}

/// Page numbers for the footer buttons
///
/// At most [`PAGE_WINDOW`] numbers, centered on the current page when
/// possible and clamped at both ends.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    let total_pages = total_pages.max(1);
    let current = current.clamp(1, total_pages);

    let mut start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
    if start + PAGE_WINDOW > total_pages + 1 {
        start = (total_pages + 1).saturating_sub(PAGE_WINDOW).max(1);
    }
    let end = (start + PAGE_WINDOW - 1).min(total_pages);

    (start..=end).collect()
}
