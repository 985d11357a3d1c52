//! arXiv API client.
//!
//! Runs search queries against the arXiv Atom API and yields the raw feed
//! entries. arXiv asks clients to leave a few seconds between requests, so a
//! single [`ArxivClient`] should be created per run and shared by every query:
//! it remembers when its last request went out and waits before the next one.
//!
//! API details:
//! - Endpoint: `GET /api/query` with `search_query`, `sortBy`, `sortOrder`,
//!   `start` and `max_results`
//! - Responses are Atom feeds, one `<entry>` per paper
//! - Results are paged; `start` is the zero-based offset of the page

use crate::error::{PapersError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, Stream, TryStreamExt};
use reqwest::Client;
use serde::Deserialize;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// arXiv API query endpoint
const ARXIV_API_URL: &str = "https://export.arxiv.org/api/query";

/// Entries requested per page
const DEFAULT_PAGE_SIZE: usize = 100;

/// Minimum interval between two requests (arXiv API terms of use)
const DEFAULT_DELAY: Duration = Duration::from_secs(3);

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default cap on the number of results for one search
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Field to sort search results by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortCriterion {
    Relevance,
    LastUpdatedDate,
    SubmittedDate,
}

impl SortCriterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortCriterion::Relevance => "relevance",
            SortCriterion::LastUpdatedDate => "lastUpdatedDate",
            SortCriterion::SubmittedDate => "submittedDate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ascending",
            SortOrder::Descending => "descending",
        }
    }
}

/// A search to run against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search {
    pub query: String,
    pub max_results: usize,
    pub sort_by: SortCriterion,
    pub sort_order: SortOrder,
}

impl Search {
    /// Most recently updated papers first, at most [`DEFAULT_MAX_RESULTS`].
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            max_results: DEFAULT_MAX_RESULTS,
            sort_by: SortCriterion::LastUpdatedDate,
            sort_order: SortOrder::Descending,
        }
    }
}

/// Atom feed returned by the API
#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

/// A raw feed entry, as arXiv returns it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Entry {
    /// Abstract page URL, such as `http://arxiv.org/abs/2503.02829v1`
    pub id: String,
    pub updated: DateTime<Utc>,
    pub published: DateTime<Utc>,
    pub title: String,
    pub summary: String,
    #[serde(rename = "author", default)]
    pub authors: Vec<EntryAuthor>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EntryAuthor {
    pub name: String,
}

/// Parse an Atom feed into its entries.
pub fn parse_feed(xml: &str) -> Result<Vec<Entry>> {
    let feed: Feed = quick_xml::de::from_str(xml)
        .map_err(|e| PapersError::Parse(format!("Failed to parse arXiv feed: {}", e)))?;
    Ok(feed.entries)
}

/// Connection settings for [`ArxivClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Query endpoint
    pub base_url: String,
    /// Entries requested per page
    pub page_size: usize,
    /// Minimum interval between two requests
    pub delay: Duration,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: ARXIV_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            delay: DEFAULT_DELAY,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Executes searches and returns raw entries.
///
/// The orchestrator only depends on this trait, so tests can substitute an
/// in-memory implementation for the network client.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, search: &Search) -> Result<Vec<Entry>>;
}

/// Rate-limited arXiv API client
pub struct ArxivClient {
    client: Client,
    options: ClientOptions,
    last_request: Mutex<Option<Instant>>,
}

impl ArxivClient {
    /// Create a new ArxivClient
    pub fn new(options: ClientOptions) -> Result<Self> {
        let client = Client::builder()
            .timeout(options.timeout)
            .user_agent(concat!("arxiv-papers/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PapersError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            options,
            last_request: Mutex::new(None),
        })
    }

    /// Lazily page through the results of a search.
    ///
    /// A page is only requested once the previous one has been consumed. The
    /// stream ends after `search.max_results` entries or after a short page.
    pub fn results<'a>(&'a self, search: &'a Search) -> impl Stream<Item = Result<Entry>> + Send + 'a {
        stream::try_unfold(Some(0usize), move |offset| self.next_page(search, offset))
            .map_ok(|entries| stream::iter(entries.into_iter().map(Ok::<Entry, PapersError>)))
            .try_flatten()
    }

    /// Fetch the page at `offset`, returning it with the offset of the page after it.
    async fn next_page(
        &self,
        search: &Search,
        offset: Option<usize>,
    ) -> Result<Option<(Vec<Entry>, Option<usize>)>> {
        let Some(offset) = offset else {
            return Ok(None);
        };
        if offset >= search.max_results {
            return Ok(None);
        }

        let wanted = self.options.page_size.max(1).min(search.max_results - offset);
        let entries = self.fetch_page(search, offset, wanted).await?;
        let next = (entries.len() >= wanted).then(|| offset + entries.len());
        Ok(Some((entries, next)))
    }

    async fn fetch_page(&self, search: &Search, start: usize, max_results: usize) -> Result<Vec<Entry>> {
        self.wait_for_rate_limit().await;

        debug!(query = %search.query, start, max_results, "Fetching arXiv page");

        let start = start.to_string();
        let max_results = max_results.to_string();
        let response = self
            .client
            .get(&self.options.base_url)
            .query(&[
                ("search_query", search.query.as_str()),
                ("id_list", ""),
                ("sortBy", search.sort_by.as_str()),
                ("sortOrder", search.sort_order.as_str()),
                ("start", start.as_str()),
                ("max_results", max_results.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PapersError::Api {
                code: status.as_u16(),
                message: format!("arXiv API error: {}", status),
            });
        }

        let body = response.text().await?;
        parse_feed(&body)
    }

    /// Sleep until `delay` has passed since the previous request.
    async fn wait_for_rate_limit(&self) {
        // A poisoned lock still holds a valid timestamp; keep spacing requests.
        let last = *self.last_request.lock().unwrap_or_else(|e| e.into_inner());
        let wait = last.map(|t| self.options.delay.saturating_sub(t.elapsed()));

        if let Some(wait) = wait.filter(|w| !w.is_zero()) {
            debug!(wait_ms = wait.as_millis() as u64, "Waiting for arXiv rate limit");
            tokio::time::sleep(wait).await;
        }

        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(Instant::now());
    }
}

#[async_trait]
impl SearchClient for ArxivClient {
    async fn search(&self, search: &Search) -> Result<Vec<Entry>> {
        let entries: Vec<Entry> = self.results(search).try_collect().await?;
        info!(query = %search.query, count = entries.len(), "arXiv query complete");
        Ok(entries)
    }
}
