// Path: crates/types/src/page.rs
//! Page arithmetic for list views.

/// One page of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// The 1-based page number, clamped into `1..=total_pages`.
    pub page: usize,
    /// Total number of pages; at least 1 so an empty list still shows a page.
    pub total_pages: usize,
    /// Items per page.
    pub per_page: usize,
    /// Start of the item range (inclusive).
    pub start: usize,
    /// End of the item range (exclusive).
    pub end: usize,
}

/// Computes the page `page` of a list of `len` items.
pub fn paginate(len: usize, page: usize, per_page: usize) -> Page {
    let per_page = per_page.max(1);
    let total_pages = len.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = ((page - 1) * per_page).min(len);
    let end = (start + per_page).min(len);
    Page {
        page,
        total_pages,
        per_page,
        start,
        end,
    }
}

impl Page {
    /// The items on this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.start..self.end).unwrap_or(&[])
    }

    /// The overall 1-based rank of the `index`-th item on this page.
    pub fn rank(&self, index: usize) -> usize {
        (self.page - 1) * self.per_page + index + 1
    }

    /// True if there is a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// True if there is a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Page numbers to offer: the first and last page, the pages next to the
    /// current one, and ellipses for the gaps.
    pub fn strip(&self) -> Vec<PageMarker> {
        page_strip(self.page, self.total_pages)
    }
}

/// An element of a page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    /// A selectable page number.
    Number(usize),
    /// A gap.
    Ellipsis,
}

/// Builds the page-number strip for `current` of `total` pages.
pub fn page_strip(current: usize, total: usize) -> Vec<PageMarker> {
    if total <= 1 {
        return vec![PageMarker::Number(1)];
    }
    if total <= 5 {
        return (1..=total).map(PageMarker::Number).collect();
    }
    let mut out = vec![PageMarker::Number(1)];
    if current > 3 {
        out.push(PageMarker::Ellipsis);
    }
    let first = current.saturating_sub(1).max(2);
    let last = (current + 1).min(total - 1);
    for n in first..=last {
        out.push(PageMarker::Number(n));
    }
    if current + 2 < total {
        out.push(PageMarker::Ellipsis);
    }
    out.push(PageMarker::Number(total));
    out
}
