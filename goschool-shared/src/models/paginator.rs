//! The length-aware paginator envelope returned by every list endpoint.

use serde::{Deserialize, Serialize};
use url::Url;

use super::lenient;

/// One page of `T` plus the paging metadata the API computed for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginator<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default = "first_page")]
    pub current_page: u64,
    #[serde(default = "first_page")]
    pub last_page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub from: Option<u64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub to: Option<u64>,
    #[serde(default = "Vec::new")]
    pub links: Vec<PaginationLink>,
}

const fn first_page() -> u64 {
    1
}

const fn default_per_page() -> u64 {
    10
}

impl<T> Default for Paginator<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            current_page: first_page(),
            last_page: first_page(),
            per_page: default_per_page(),
            total: 0,
            from: None,
            to: None,
            links: Vec::new(),
        }
    }
}

impl<T> Paginator<T> {
    pub fn rendered_rows(&self) -> usize {
        self.data.len()
    }

    /// Rows this page should hold given `total`, `per_page` and `current_page`.
    pub fn expected_rows(&self) -> u64 {
        let before = self.current_page.saturating_sub(1).saturating_mul(self.per_page);
        self.total.saturating_sub(before).min(self.per_page)
    }

    /// Whether `from`, `to` and `total` agree with each other and with the rows
    /// actually delivered.
    pub fn is_consistent(&self) -> bool {
        let expected = self.expected_rows();
        let delivered = self.rendered_rows() as u64;
        match (self.from, self.to) {
            (Some(from), Some(to)) => {
                let first = self
                    .current_page
                    .saturating_sub(1)
                    .saturating_mul(self.per_page)
                    .saturating_add(1);
                to >= from
                    && (to - from).saturating_add(1) == expected
                    && delivered == expected
                    && from == first
            }
            (None, None) => expected == 0 && delivered == 0,
            _ => false,
        }
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// The caption under the pagination links.
    pub fn summary(&self) -> String {
        if self.has_links() {
            format!(
                "Showing {} to {} of {} results",
                self.from.unwrap_or_default(),
                self.to.unwrap_or_default(),
                self.total
            )
        } else {
            "No results to display".to_string()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A single entry of the paginator's `links` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationLink {
    pub url: Option<String>,
    pub label: String,
    #[serde(default)]
    pub active: bool,
}

impl PaginationLink {
    /// Previous/next labels arrive as HTML entities; render them as chevrons.
    pub fn display_label(&self) -> String {
        if self.label.contains("Previous") {
            "<<".to_string()
        } else if self.label.contains("Next") {
            ">>".to_string()
        } else {
            self.label.clone()
        }
    }

    pub fn is_navigable(&self) -> bool {
        self.url.is_some()
    }

    /// The page this link leads to, read from its URL's `page` parameter and
    /// falling back to a numeric label.
    pub fn target_page(&self) -> Option<u64> {
        let url = self.url.as_deref()?;
        Url::parse(url)
            .ok()
            .and_then(|url| {
                url.query_pairs()
                    .find(|(key, _)| key == "page")
                    .and_then(|(_, value)| value.parse().ok())
            })
            .or_else(|| self.label.trim().parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn link(url: Option<&str>, label: &str, active: bool) -> PaginationLink {
        PaginationLink {
            url: url.map(str::to_string),
            label: label.to_string(),
            active,
        }
    }

    fn page(current: u64, total: u64, rows: usize, from: Option<u64>, to: Option<u64>) -> Paginator<u8> {
        Paginator {
            data: vec![0; rows],
            current_page: current,
            last_page: total.div_ceil(10).max(1),
            per_page: 10,
            total,
            from,
            to,
            links: vec![],
        }
    }

    #[test]
    fn test_default_matches_empty_listing() {
        let paginator: Paginator<u8> = Paginator::default();
        assert_eq!(paginator.current_page, 1);
        assert_eq!(paginator.last_page, 1);
        assert_eq!(paginator.per_page, 10);
        assert!(paginator.is_consistent());
        assert_eq!(paginator.summary(), "No results to display");
    }

    #[test_case(page(1, 25, 10, Some(1), Some(10)), true ; "full first page")]
    #[test_case(page(3, 25, 5, Some(21), Some(25)), true ; "partial last page")]
    #[test_case(page(3, 25, 10, Some(21), Some(30)), false ; "overrun last page")]
    #[test_case(page(2, 25, 9, Some(11), Some(20)), false ; "missing row")]
    #[test_case(page(4, 25, 0, None, None), true ; "past the end")]
    #[test_case(page(1, 25, 10, Some(1), None), false ; "half bounds")]
    #[test_case(page(u64::MAX / 5, 25, 1, Some(1), Some(1)), false ; "huge page number")]
    #[test_case(page(1, 25, 1, Some(0), Some(u64::MAX)), false ; "huge bounds")]
    fn test_is_consistent(paginator: Paginator<u8>, expected: bool) {
        assert_eq!(paginator.is_consistent(), expected);
    }

    #[test]
    fn test_laravel_envelope_deserializes() {
        let json = r#"{
            "current_page": 2,
            "data": [1, 2],
            "first_page_url": "http://api.test/api/schools?page=1",
            "from": 11,
            "last_page": 2,
            "links": [
                {"url": "http://api.test/api/schools?page=1", "label": "&laquo; Previous", "active": false},
                {"url": "http://api.test/api/schools?page=1", "label": "1", "active": false},
                {"url": "http://api.test/api/schools?page=2", "label": "2", "active": true},
                {"url": null, "label": "Next &raquo;", "active": false}
            ],
            "path": "http://api.test/api/schools",
            "per_page": 10,
            "to": 12,
            "total": 12
        }"#;
        let paginator: Paginator<u8> = serde_json::from_str(json).unwrap();
        assert!(paginator.is_consistent());
        assert_eq!(paginator.summary(), "Showing 11 to 12 of 12 results");
        assert_eq!(paginator.links[0].display_label(), "<<");
        assert_eq!(paginator.links[0].target_page(), Some(1));
        assert!(paginator.links[2].active);
        assert_eq!(paginator.links[3].display_label(), ">>");
        assert!(!paginator.links[3].is_navigable());
        assert_eq!(paginator.links[3].target_page(), None);
    }

    #[test]
    fn test_target_page_falls_back_to_label() {
        let relative = link(Some("/schools"), "4", false);
        assert_eq!(relative.target_page(), Some(4));

        let search = link(Some("http://api.test/api/schools/search?query=oak&page=3"), "3", false);
        assert_eq!(search.target_page(), Some(3));
    }
}
