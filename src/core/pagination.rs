use serde::Serialize;
use std::ops::Range;

/// Above this many pages the link bar collapses into first/window/last
pub const MAX_VISIBLE_PAGES: usize = 5;

/// One entry of the page-link bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageLink {
    Page { number: usize, active: bool },
    Ellipsis,
}

/// Slice bounds and link layout for the current page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageWindow {
    /// Clamped, 1-based
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    /// Zero-based, end-exclusive
    pub start: usize,
    pub end: usize,
    pub links: Vec<PageLink>,
    pub has_previous: bool,
    pub has_next: bool,
    /// Controls only make sense once results spill over one page
    pub show_controls: bool,
}

impl PageWindow {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Number of pages needed for `total_items`
#[inline]
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Clamp a requested page into `[1, max(1, total_pages)]`
#[inline]
pub fn clamp_page(requested: usize, total_items: usize, page_size: usize) -> usize {
    requested.clamp(1, total_pages(total_items, page_size).max(1))
}

/// Compute the page window for `total_items` split into pages of `page_size`
pub fn paginate(total_items: usize, page_size: usize, requested_page: usize) -> PageWindow {
    let page_size = page_size.max(1);
    let total = total_pages(total_items, page_size);
    let current = clamp_page(requested_page, total_items, page_size);

    let start = ((current - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    PageWindow {
        current_page: current,
        total_pages: total,
        total_items,
        start,
        end,
        links: page_links(current, total),
        has_previous: current > 1,
        has_next: current < total,
        show_controls: total_items > page_size,
    }
}

/// Build the link bar for `current` out of `total` pages
pub fn page_links(current: usize, total: usize) -> Vec<PageLink> {
    let page = |number: usize| PageLink::Page {
        number,
        active: number == current,
    };

    if total <= MAX_VISIBLE_PAGES {
        return (1..=total).map(page).collect();
    }

    let mut links = vec![page(1)];

    if current > 3 {
        links.push(PageLink::Ellipsis);
    }

    let window_start = current.saturating_sub(1).max(2);
    let window_end = (current + 1).min(total - 1);
    links.extend((window_start..=window_end).map(page));

    if current + 2 < total {
        links.push(PageLink::Ellipsis);
    }

    links.push(page(total));
    links
}
