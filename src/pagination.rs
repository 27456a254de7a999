//! Pagination window arithmetic for the ticket table.
//!
//! Pure helpers plus a small [`Pager`] state holder. Pages are 1-based;
//! a total of zero items yields zero pages and an empty window, which the
//! view renders as disabled navigation.

/// Number of page buttons rendered around the current page
pub const PAGE_WINDOW: u32 = 5;

/// Page sizes offered by the limit selector
pub const PAGE_SIZES: &[u32] = &[5, 10, 20, 50];

/// Total number of pages for `total_items` at the given page size
pub fn total_pages(total_items: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    (total_items.div_ceil(limit as u64)) as u32
}

/// The ordered, inclusive run of page numbers to render as controls.
///
/// The window is at most [`PAGE_WINDOW`] wide, starts at
/// `max(1, current - window/2)`, and shifts left when clipped by the last
/// page so a full window is shown whenever enough pages exist.
pub fn page_window(current_page: u32, total_items: u64, limit: u32) -> Vec<u32> {
    let total = total_pages(total_items, limit);
    if total == 0 {
        return Vec::new();
    }

    let current = current_page.clamp(1, total);
    let mut start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total);

    if end - start + 1 < PAGE_WINDOW {
        start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
    }

    (start..=end).collect()
}

/// Current page, page size, and total count for one ticket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: u32,
    limit: u32,
    total_items: u64,
}

impl Pager {
    pub fn new(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total_items: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_items, self.limit)
    }

    /// Record the server-reported total, clamping the current page into range
    pub fn set_total_items(&mut self, total_items: u64) {
        self.total_items = total_items;
        let total = self.total_pages();
        if total > 0 {
            self.page = self.page.clamp(1, total);
        } else {
            self.page = 1;
        }
    }

    /// Jump to a page, clamped to the valid range
    pub fn set_page(&mut self, page: u32) {
        let total = self.total_pages();
        if total == 0 {
            self.page = 1;
        } else {
            self.page = page.clamp(1, total);
        }
    }

    /// Changing the page size always returns to the first page
    pub fn set_limit(&mut self, limit: u32) {
        self.limit = limit;
        self.page = 1;
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    pub fn has_prev(&self) -> bool {
        self.total_pages() > 0 && self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Window of visible page buttons for the current state
    pub fn window(&self) -> Vec<u32> {
        page_window(self.page, self.total_items, self.limit)
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LIMIT)
    }
}
