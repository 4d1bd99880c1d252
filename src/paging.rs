// paging.rs - Slices the ordered list into pages and moves between them.

use crate::models::GameRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub items: Vec<GameRecord>,
    /// 0 only when there are no pages at all.
    pub current_page: usize,
    pub total_pages: usize,
}

/// Number of pages needed for `len` items. Zero items means zero pages.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Cut out `requested_page`, clamped into `[1, total_pages]`.
///
/// An empty list yields page 0 of 0 with no items.
pub fn paginate(games: &[GameRecord], page_size: usize, requested_page: usize) -> Page {
    let page_size = page_size.max(1);
    let total_pages = total_pages(games.len(), page_size);
    let current_page = if total_pages == 0 {
        0
    } else {
        requested_page.clamp(1, total_pages)
    };

    let items = match current_page {
        0 => Vec::new(),
        page => {
            let start = (page - 1) * page_size;
            let end = (page * page_size).min(games.len());
            games[start..end].to_vec()
        }
    };

    Page {
        items,
        current_page,
        total_pages,
    }
}

/// Step forward, never past the page count the user was looking at.
pub fn next_page(current: usize, displayed_total: usize) -> usize {
    let next = if current >= displayed_total {
        displayed_total
    } else {
        current + 1
    };
    next.max(1)
}

/// Step back, never below 1.
///
/// `displayed_total` is the count shown when the button was pressed; it can
/// trail the live count by one filter change, which is why it is passed in.
pub fn previous_page(current: usize, displayed_total: usize) -> usize {
    let previous = if current > displayed_total {
        displayed_total.saturating_sub(1)
    } else {
        current.saturating_sub(1)
    };
    previous.max(1)
}
