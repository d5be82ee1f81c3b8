use crate::shared::config::ExploreConfig;
use contracts::enums::PagingStrategy;

/// Page size and the hard cap on reachable pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingPolicy {
    pub page_size: u32,
    pub max_pages: u32,
}

impl Default for PagingPolicy {
    fn default() -> Self {
        Self {
            page_size: 5,
            max_pages: 5,
        }
    }
}

impl From<&ExploreConfig> for PagingPolicy {
    fn from(config: &ExploreConfig) -> Self {
        Self::new(config.page_size, config.max_pages)
    }
}

impl PagingPolicy {
    pub fn new(page_size: u32, max_pages: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            max_pages: max_pages.max(1),
        }
    }

    /// `min(max_pages, ceil(total / page_size))`; zero when there is nothing to show
    pub fn total_pages(&self, total: usize) -> u32 {
        let size = self.page_size as usize;
        let pages = total.div_ceil(size);
        pages.min(self.max_pages as usize) as u32
    }

    /// Effective page for a request: `max(1, min(requested, total_pages))`
    pub fn clamp_page(&self, requested: u32, total: usize) -> u32 {
        requested.min(self.total_pages(total)).max(1)
    }

    /// Zero-based page index sent to server-paged endpoints
    pub fn page_index(&self, page: u32) -> u32 {
        page.saturating_sub(1)
    }

    /// Items shown for `page`: client-paged listings are sliced here,
    /// server-paged ones already are the page
    pub fn visible<'a, T>(&self, strategy: PagingStrategy, items: &'a [T], page: u32) -> &'a [T] {
        match strategy {
            PagingStrategy::Server => items,
            PagingStrategy::Client => {
                let size = self.page_size as usize;
                let start = (self.page_index(page) as usize).saturating_mul(size);
                if start >= items.len() {
                    return &[];
                }
                let end = start.saturating_add(size).min(items.len());
                &items[start..end]
            }
        }
    }
}

/// Server total for pagination.
///
/// Uses the reported total when the backend sends one. Otherwise counts what
/// has been seen so far and, when the page came back full, one more item so
/// the following page stays reachable.
pub fn server_total(page_index: u32, page_size: u32, page_len: usize, reported: Option<u64>) -> usize {
    if let Some(total) = reported {
        return total as usize;
    }
    let seen = page_index as usize * page_size as usize + page_len;
    if page_len >= page_size as usize && page_len > 0 {
        seen + 1
    } else {
        seen
    }
}
