//! URL-held list state: the page number and optional search query of the
//! schools, products and map listings.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::api::{ApiResult, SchoolApi};
use crate::models::{Paginator, School, SearchRequest};

pub use crate::sequence::{RequestSequencer, Ticket};

/// The `?page=&query=` state of a list route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default = "first_page")]
    pub page: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

const fn first_page() -> u64 {
    1
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: first_page(),
            query: None,
        }
    }
}

/// Which endpoint a listing should hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRequest {
    All { page: u64 },
    Search(SearchRequest),
}

impl ListQuery {
    /// Page zero is read as the first page; blank queries are dropped.
    pub fn new(page: u64, query: Option<&str>) -> Self {
        Self {
            page: page.max(1),
            query: query
                .map(str::trim)
                .filter(|query| !query.is_empty())
                .map(str::to_string),
        }
    }

    /// A fresh search always starts from the first page.
    pub fn searching(query: &str) -> Self {
        Self::new(1, Some(query))
    }

    #[must_use]
    pub fn with_page(&self, page: u64) -> Self {
        Self::new(page, self.query.as_deref())
    }

    pub fn request(&self) -> ListRequest {
        match &self.query {
            Some(query) => ListRequest::Search(SearchRequest {
                query: query.clone(),
                page: self.page,
            }),
            None => ListRequest::All { page: self.page },
        }
    }

    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.append_pair("page", &self.page.to_string());
        if let Some(query) = &self.query {
            serializer.append_pair("query", query);
        }
        serializer.finish()
    }

    /// Link target for this state on the list route `section`.
    pub fn href(&self, section: &str) -> String {
        format!("/{}?{}", section.trim_matches('/'), self.to_query_string())
    }

    /// Reads the state from a query string, with or without the leading `?`.
    /// Unparseable pages fall back to the first page.
    pub fn from_query_string(query_string: &str) -> Self {
        let mut page = None;
        let mut query = None;
        for (key, value) in form_urlencoded::parse(query_string.trim_start_matches('?').as_bytes()) {
            match key.as_ref() {
                "page" => page = value.trim().parse().ok(),
                "query" => query = Some(value.into_owned()),
                _ => {}
            }
        }
        Self::new(page.unwrap_or(1), query.as_deref())
    }
}

/// Fetches the schools a [`ListRequest`] describes.
///
/// # Errors
/// Propagates the API error unchanged.
pub async fn fetch_schools<A>(api: &A, token: &str, request: &ListRequest) -> ApiResult<Paginator<School>>
where
    A: SchoolApi + ?Sized,
{
    match request {
        ListRequest::All { page } => api.list_schools(token, *page).await,
        ListRequest::Search(search) => api.search_schools(token, search).await,
    }
}
