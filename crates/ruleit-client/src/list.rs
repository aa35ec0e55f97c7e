//! Paged rule listing
//!
//! [`RuleListCache`] holds the most recently fetched page of rule
//! summaries and the total count. Each fetch replaces the cached page in
//! full - never a merge - so by-position lookups always resolve against
//! the page the caller is actually looking at. One cache instance belongs
//! to one list view; it is not shared.

use tracing::debug;

use crate::error::Result;
use crate::gateway::RuleApiGateway;
use crate::models::{RulePage, RuleSummary};

/// Fixed page size of the listing endpoint.
pub const PAGE_SIZE: u64 = 10;

/// Cache over the paginated rule listing.
#[derive(Debug, Clone)]
pub struct RuleListCache {
    gateway: RuleApiGateway,
    rules: Vec<RuleSummary>,
    count: u64,
    current_page: u32,
}

impl RuleListCache {
    /// Empty cache; nothing is fetched until [`fetch_page`](Self::fetch_page).
    pub fn new(gateway: RuleApiGateway) -> Self {
        Self {
            gateway,
            rules: Vec::new(),
            count: 0,
            current_page: 0,
        }
    }

    /// Fetch page `page` (1-indexed) and replace the cached contents.
    ///
    /// On failure the previously cached page and count stay exactly as
    /// they were.
    pub async fn fetch_page(&mut self, page: u32) -> Result<&[RuleSummary]> {
        let fetched = self.gateway.fetch_page(page).await?;
        self.apply(page, fetched);
        debug!(page, count = self.count, "rule page cached");
        Ok(&self.rules)
    }

    fn apply(&mut self, page: u32, fetched: RulePage) {
        self.rules = fetched.results;
        self.count = fetched.count;
        self.current_page = page;
    }

    /// The rules on the currently cached page, in server order.
    pub fn rules(&self) -> &[RuleSummary] {
        &self.rules
    }

    /// Rule at `index` within the currently cached page only.
    pub fn get(&self, index: usize) -> Option<&RuleSummary> {
        self.rules.get(index)
    }

    /// Total number of rules across all pages, as of the last fetch.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The page number of the cached contents (0 before the first fetch).
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total number of pages: `ceil(count / 10)`, 0 when the listing is
    /// empty.
    pub fn page_count(&self) -> u32 {
        self.count.div_ceil(PAGE_SIZE) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn cache() -> RuleListCache {
        let gateway = RuleApiGateway::new(ClientConfig::default()).unwrap();
        RuleListCache::new(gateway)
    }

    fn summary(id: i64) -> RuleSummary {
        RuleSummary {
            id,
            name: format!("rule_{id}"),
            root_id: id * 10,
            tokens: vec!["a".to_string()],
        }
    }

    #[test]
    fn test_page_count_is_ceiling_of_count_over_page_size() {
        let mut c = cache();
        c.apply(
            1,
            RulePage {
                results: (0..8).map(summary).collect(),
                count: 47,
            },
        );
        assert_eq!(c.page_count(), 5);
        assert_eq!(c.count(), 47);
    }

    #[test]
    fn test_empty_listing_has_zero_pages() {
        let mut c = cache();
        assert_eq!(c.page_count(), 0);
        c.apply(
            1,
            RulePage {
                results: vec![],
                count: 0,
            },
        );
        assert_eq!(c.page_count(), 0);
    }

    #[test]
    fn test_exact_multiple_needs_no_extra_page() {
        let mut c = cache();
        c.apply(
            1,
            RulePage {
                results: (0..10).map(summary).collect(),
                count: 30,
            },
        );
        assert_eq!(c.page_count(), 3);
    }

    #[test]
    fn test_fetch_replaces_page_wholesale() {
        let mut c = cache();
        c.apply(
            1,
            RulePage {
                results: vec![summary(1), summary(2)],
                count: 12,
            },
        );
        c.apply(
            2,
            RulePage {
                results: vec![summary(11)],
                count: 12,
            },
        );
        // By-position selection resolves against the new page only.
        assert_eq!(c.get(0).map(|r| r.id), Some(11));
        assert_eq!(c.get(1), None);
        assert_eq!(c.current_page(), 2);
    }
}
