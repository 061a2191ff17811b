use serde::Serialize;

use crate::domain::types::PageSize;

/// Sliding window of page numbers around the current page, two to each side,
/// clamped to `[1, total_pages]`.
fn visible_pages(total_pages: u32, current_page: u32) -> Vec<u32> {
    if total_pages == 0 {
        return Vec::new();
    }

    let start = current_page.saturating_sub(2).max(1);
    let end = (current_page.saturating_add(2)).min(total_pages);

    (start..=end).collect()
}

/// One page of display rows plus everything the pagination bar needs.
#[derive(Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub total: u32,
    pub total_pages: u32,
    pub pages: Vec<u32>,
    pub has_previous: bool,
    pub has_next: bool,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: u32, total: u32, size: PageSize) -> Self {
        let page = if page == 0 { 1 } else { page };
        let total_pages = if total == 0 {
            0
        } else {
            total.div_ceil(size.get())
        };
        let pages = visible_pages(total_pages, page);

        Self {
            items,
            page,
            total,
            total_pages,
            pages,
            has_previous: page > 1,
            has_next: page < total_pages,
        }
    }
}
