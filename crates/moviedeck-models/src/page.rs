use serde::{Deserialize, Serialize};

/// One page of a paginated catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self {
            page: 1,
            results: Vec::new(),
            total_pages: 0,
            total_results: 0,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Keep only the first `limit` results
    pub fn truncated(mut self, limit: usize) -> Self {
        self.results.truncate(limit);
        self
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_when_fields_missing() {
        let page: Page<u32> = serde_json::from_str("{}").unwrap();
        assert_eq!(page.page, 1);
        assert!(page.results.is_empty());
        assert!(!page.has_next());
    }

    #[test]
    fn test_truncated() {
        let page = Page {
            page: 1,
            results: (0..20).collect::<Vec<u32>>(),
            total_pages: 3,
            total_results: 60,
        };
        assert!(page.has_next());
        let page = page.truncated(12);
        assert_eq!(page.results.len(), 12);
        assert_eq!(page.total_results, 60);
    }
}
