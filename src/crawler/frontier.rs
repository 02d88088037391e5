//! Discovered detail-page URLs awaiting extraction

use std::collections::HashSet;

/// Deduplicated, insertion-ordered set of product URLs
///
/// Membership is tracked in a hash set and order in an append-only list, so
/// iteration is always first-discovered order and identical inputs produce
/// an identical frontier.
#[derive(Debug, Default, Clone)]
pub struct CrawlFrontier {
    seen: HashSet<String>,
    order: Vec<String>,
}

impl CrawlFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL, returning false if it was already present
    pub fn add(&mut self, url: String) -> bool {
        if self.seen.contains(&url) {
            return false;
        }
        self.seen.insert(url.clone());
        self.order.push(url);
        true
    }

    /// Adds every URL in order, returning how many were new
    pub fn add_all<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        urls.into_iter().filter(|url| self.add(url.clone())).count()
    }

    pub fn size(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Removes and returns at most `limit` URLs in first-discovered order
    pub fn drain(&mut self, limit: usize) -> Vec<String> {
        let count = limit.min(self.order.len());
        let drained: Vec<String> = self.order.drain(..count).collect();
        for url in &drained {
            self.seen.remove(url);
        }
        drained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_duplicate_increases_size_once() {
        let mut frontier = CrawlFrontier::new();
        assert!(frontier.add("https://a.com/p/1".to_string()));
        assert!(!frontier.add("https://a.com/p/1".to_string()));
        assert_eq!(frontier.size(), 1);
    }

    #[test]
    fn test_add_all_counts_new() {
        let mut frontier = CrawlFrontier::new();
        let added = frontier.add_all(urls(&[
            "https://a.com/p/1",
            "https://a.com/p/2",
            "https://a.com/p/1",
        ]));
        assert_eq!(added, 2);

        let added = frontier.add_all(urls(&["https://a.com/p/2", "https://a.com/p/3"]));
        assert_eq!(added, 1);
        assert_eq!(frontier.size(), 3);
        assert!(frontier.contains("https://a.com/p/3"));
    }

    #[test]
    fn test_drain_preserves_discovery_order() {
        let mut frontier = CrawlFrontier::new();
        frontier.add_all(urls(&["https://a.com/z", "https://a.com/a", "https://a.com/m"]));

        assert_eq!(
            frontier.drain(10),
            urls(&["https://a.com/z", "https://a.com/a", "https://a.com/m"])
        );
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_drain_respects_limit() {
        let mut frontier = CrawlFrontier::new();
        frontier.add_all((0..10).map(|i| format!("https://a.com/p/{}", i)));

        let drained = frontier.drain(4);
        assert_eq!(drained.len(), 4);
        assert_eq!(drained[0], "https://a.com/p/0");
        assert_eq!(drained[3], "https://a.com/p/3");
        assert_eq!(frontier.size(), 6);
    }

    #[test]
    fn test_drain_zero() {
        let mut frontier = CrawlFrontier::new();
        frontier.add("https://a.com/p/1".to_string());
        assert!(frontier.drain(0).is_empty());
    }
}
