#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    /// 1-based inclusive display bounds; both 0 for an empty list.
    pub start_index: usize,
    pub end_index: usize,
    pub total_items: usize,
}

pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

pub fn paginate<T>(items: &[T], items_per_page: usize, requested_page: usize) -> Page<'_, T> {
    if items_per_page == 0 {
        log::warn!("items per page is 0; using 1");
    }
    let per_page = items_per_page.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, per_page);
    let current_page = clamp_page(requested_page, total_pages);

    let start = ((current_page - 1) * per_page).min(total_items);
    let end = (start + per_page).min(total_items);
    let items = &items[start..end];

    let (start_index, end_index) = if items.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    Page {
        items,
        current_page,
        total_pages,
        start_index,
        end_index,
        total_items,
    }
}

/// Whether a change to the underlying list may move the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSync {
    Clamp,
    /// The caller is about to set a page itself (e.g. restoring a bookmark).
    Preserve,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub items_per_page: usize,
}

impl PaginationState {
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    pub fn total_pages(&self, total_items: usize) -> usize {
        total_pages(total_items, self.items_per_page)
    }

    pub fn sync(&mut self, total_items: usize, mode: PageSync) {
        if mode == PageSync::Clamp {
            self.current_page = clamp_page(self.current_page, self.total_pages(total_items));
        }
    }

    pub fn set_page(&mut self, page: usize, total_items: usize) {
        self.current_page = clamp_page(page, self.total_pages(total_items));
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize, total_items: usize, mode: PageSync) {
        self.items_per_page = items_per_page.max(1);
        self.sync(total_items, mode);
    }

    pub fn page<'a, T>(&self, items: &'a [T]) -> Page<'a, T> {
        paginate(items, self.items_per_page, self.current_page)
    }
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(20)
    }
}
