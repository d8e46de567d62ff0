//! Registry search lens
//!
//! This module drives the paginated full-text search: a probe request reads
//! the total match count, then pages are fetched one after another and their
//! entries turned into [`Record`]s.
//!
//! # Example
//!
//! ```rust,ignore
//! use ripeq::lens::search::{SearchArgs, SearchLens, SearchProgress};
//! use std::sync::Arc;
//!
//! let lens = SearchLens::new(&ripeq::RipeqConfig::default());
//! let args = SearchArgs::new("EXAMPLE-NET").with_fields(Some(vec!["inetnum".into()]));
//!
//! let callback = Arc::new(|progress: SearchProgress| {
//!     if let SearchProgress::PageStarted { start } = progress {
//!         eprintln!("Fetching results starting from {}...", start);
//!     }
//! });
//! let records = lens.search_with_progress(&args, Some(callback))?;
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::{RipeqConfig, DEFAULT_PAGE_SIZE};
use crate::lens::registry::{extract, phrase_query, Record, RegistryClient, ResultPage, UreqClient};

// =============================================================================
// Progress Tracking Types
// =============================================================================

/// Progress information for search operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchProgress {
    /// The probe request returned the total number of matches
    TotalFound {
        /// Matches reported by the registry
        total: u64,
        /// Number of page requests that will follow
        pages: u64,
    },
    /// A page request is about to be issued
    PageStarted {
        /// Offset of the first result of the page
        start: u64,
    },
    /// A page was fetched and extracted
    PageCompleted {
        /// Offset of the first result of the page
        start: u64,
        /// Records extracted from this page
        records: usize,
    },
    /// A page could not be fetched or decoded and was skipped
    PageFailed {
        /// Offset of the first result of the page
        start: u64,
        /// Failure description
        error: String,
    },
    /// All pages were processed
    Completed {
        /// Total records accumulated
        total_records: usize,
        /// Pages that were skipped because of failures
        failed_pages: u64,
    },
}

/// Type alias for progress callback function
///
/// The callback receives `SearchProgress` updates and can be used to
/// update UI elements, log progress, or perform other actions.
pub type SearchProgressCallback = Arc<dyn Fn(SearchProgress) + Send + Sync>;

// =============================================================================
// Args
// =============================================================================

/// Arguments for a registry search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchArgs {
    /// Search string, sent as a phrase query
    pub query: String,

    /// Selected fields (lowercase); `None` keeps every field
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

impl SearchArgs {
    /// Create new args for a search string
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            fields: None,
        }
    }

    /// Set the field selection
    pub fn with_fields(mut self, fields: Option<Vec<String>>) -> Self {
        self.fields = fields;
        self
    }
}

// =============================================================================
// Lens
// =============================================================================

/// Paginated registry search lens
///
/// Fetches are strictly sequential. A failing probe aborts the search; a
/// failing page is logged, reported and skipped.
pub struct SearchLens<C: RegistryClient = UreqClient> {
    client: C,
    page_size: u64,
}

impl SearchLens<UreqClient> {
    /// Create a search lens talking to the configured endpoint
    pub fn new(config: &RipeqConfig) -> Self {
        Self {
            client: UreqClient::new(&config.api_url),
            page_size: config.page_size.max(1),
        }
    }
}

impl Default for SearchLens<UreqClient> {
    fn default() -> Self {
        Self::new(&RipeqConfig::default())
    }
}

impl<C: RegistryClient> SearchLens<C> {
    /// Create a search lens over any registry client
    pub fn with_client(client: C) -> Self {
        Self {
            client,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the number of results requested per page
    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Number of results requested per page
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Read the total number of matches with a single-result probe request
    pub fn total_results(&self, args: &SearchArgs) -> Result<u64> {
        let query = phrase_query(&args.query);
        let raw = self
            .client
            .fetch(&query, 0, 1)
            .context("Failed to retrieve initial response")?;
        let page = ResultPage::decode(&raw).context("Unexpected response format")?;
        Ok(page.num_found)
    }

    /// Run the search and collect records of every page
    pub fn search(&self, args: &SearchArgs) -> Result<Vec<Record>> {
        self.search_with_progress(args, None)
    }

    /// Run the search, reporting progress through `callback`
    pub fn search_with_progress(
        &self,
        args: &SearchArgs,
        callback: Option<SearchProgressCallback>,
    ) -> Result<Vec<Record>> {
        let report = |progress: SearchProgress| {
            if let Some(cb) = &callback {
                cb(progress);
            }
        };

        let total = self.total_results(args)?;
        let pages = total.div_ceil(self.page_size);
        info!("total results found: {} ({} pages)", total, pages);
        report(SearchProgress::TotalFound { total, pages });

        let query = phrase_query(&args.query);
        let fields = args.fields.as_deref();
        let mut records: Vec<Record> = vec![];
        let mut failed_pages = 0u64;

        let mut start = 0u64;
        while start < total {
            report(SearchProgress::PageStarted { start });
            debug!("fetching results starting from {}", start);

            match self.fetch_page(&query, start) {
                Ok(page) => {
                    let extracted = extract(&page, fields);
                    report(SearchProgress::PageCompleted {
                        start,
                        records: extracted.len(),
                    });
                    records.extend(extracted);
                }
                Err(e) => {
                    warn!("Failed to fetch results for start={}: {:#}", start, e);
                    failed_pages += 1;
                    report(SearchProgress::PageFailed {
                        start,
                        error: format!("{:#}", e),
                    });
                }
            }

            start = start.saturating_add(self.page_size);
        }

        info!(
            "collected {} records, {} pages failed",
            records.len(),
            failed_pages
        );
        report(SearchProgress::Completed {
            total_records: records.len(),
            failed_pages,
        });

        Ok(records)
    }

    fn fetch_page(&self, query: &str, start: u64) -> Result<ResultPage> {
        let raw = self.client.fetch(query, start, self.page_size)?;
        ResultPage::decode(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens::registry::RawResponse;
    use anyhow::anyhow;
    use std::sync::Mutex;

    /// Serves JSON pages out of a fixed list of documents
    struct MockClient {
        total: u64,
        docs: Vec<Vec<(&'static str, &'static str)>>,
        fail_starts: Vec<u64>,
        fail_probe: bool,
        content_type: &'static str,
        calls: Mutex<Vec<(String, u64, u64)>>,
    }

    impl MockClient {
        fn new(docs: Vec<Vec<(&'static str, &'static str)>>) -> Self {
            Self {
                total: docs.len() as u64,
                docs,
                fail_starts: vec![],
                fail_probe: false,
                content_type: "application/json",
                calls: Mutex::new(vec![]),
            }
        }

        fn calls(&self) -> Vec<(String, u64, u64)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl RegistryClient for MockClient {
        fn fetch(&self, query: &str, start: u64, rows: u64) -> Result<RawResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((query.to_string(), start, rows));

            if rows == 1 && start == 0 && self.fail_probe {
                return Err(anyhow!("connection refused"));
            }
            if rows > 1 && self.fail_starts.contains(&start) {
                return Err(anyhow!("HTTP 502"));
            }

            let docs: Vec<serde_json::Value> = self
                .docs
                .iter()
                .skip(start as usize)
                .take(rows as usize)
                .map(|fields| {
                    let strs: Vec<serde_json::Value> = fields
                        .iter()
                        .map(|(n, v)| serde_json::json!({"name": n, "value": v}))
                        .collect();
                    serde_json::json!({ "strs": strs })
                })
                .collect();
            let body = serde_json::json!({
                "result": {"numFound": self.total, "docs": docs}
            });

            Ok(RawResponse {
                content_type: self.content_type.to_string(),
                body: body.to_string(),
            })
        }
    }

    fn numbered_docs(n: usize) -> Vec<Vec<(&'static str, &'static str)>> {
        const NAMES: [&str; 5] = ["NET-0", "NET-1", "NET-2", "NET-3", "NET-4"];
        (0..n).map(|i| vec![("netname", NAMES[i % NAMES.len()])]).collect()
    }

    #[test]
    fn test_paginates_until_total() {
        let client = MockClient::new(numbered_docs(5));
        let lens = SearchLens::with_client(client).with_page_size(2);

        let records = lens.search(&SearchArgs::new("Example")).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(
            records[4].get("netname").map(String::as_str),
            Some("NET-4")
        );

        let calls = lens.client.calls();
        let offsets: Vec<(u64, u64)> = calls.iter().map(|(_, s, r)| (*s, *r)).collect();
        assert_eq!(offsets, vec![(0, 1), (0, 2), (2, 2), (4, 2)]);
        // the search string is sent as a phrase
        assert!(calls.iter().all(|(q, _, _)| q == "\"Example\""));
    }

    #[test]
    fn test_probe_failure_is_fatal() {
        let mut client = MockClient::new(numbered_docs(3));
        client.fail_probe = true;
        let lens = SearchLens::with_client(client);
        assert!(lens.search(&SearchArgs::new("x")).is_err());
    }

    #[test]
    fn test_unexpected_content_type_is_fatal_at_probe() {
        let mut client = MockClient::new(numbered_docs(3));
        client.content_type = "text/html";
        let lens = SearchLens::with_client(client);
        let err = lens.search(&SearchArgs::new("x")).unwrap_err();
        assert!(format!("{:#}", err).contains("Unexpected content type"));
    }

    #[test]
    fn test_failed_page_is_skipped() {
        let mut client = MockClient::new(numbered_docs(5));
        client.fail_starts = vec![2];
        let lens = SearchLens::with_client(client).with_page_size(2);

        let events: Arc<Mutex<Vec<SearchProgress>>> = Arc::new(Mutex::new(vec![]));
        let sink = events.clone();
        let callback: SearchProgressCallback = Arc::new(move |p: SearchProgress| sink.lock().unwrap().push(p));

        let records = lens
            .search_with_progress(&SearchArgs::new("x"), Some(callback))
            .unwrap();
        let names: Vec<&str> = records
            .iter()
            .filter_map(|r| r.get("netname").map(String::as_str))
            .collect();
        assert_eq!(names, vec!["NET-0", "NET-1", "NET-4"]);

        let events = events.lock().unwrap();
        assert_eq!(events[0], SearchProgress::TotalFound { total: 5, pages: 3 });
        assert!(events
            .iter()
            .any(|e| matches!(e, SearchProgress::PageFailed { start: 2, .. })));
        assert_eq!(
            events.last(),
            Some(&SearchProgress::Completed {
                total_records: 3,
                failed_pages: 1
            })
        );
    }

    #[test]
    fn test_zero_results() {
        let client = MockClient::new(vec![]);
        let lens = SearchLens::with_client(client);
        let records = lens.search(&SearchArgs::new("nothing")).unwrap();
        assert!(records.is_empty());
        // only the probe was issued
        assert_eq!(lens.client.calls().len(), 1);
    }

    #[test]
    fn test_field_selection_applies_to_pages() {
        let client = MockClient::new(vec![vec![("netname", "A"), ("descr", "dropped")]]);
        let lens = SearchLens::with_client(client);
        let args = SearchArgs::new("x").with_fields(Some(vec!["netname".to_string()]));
        let records = lens.search(&args).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].contains_key("descr"));
    }

    #[test]
    fn test_offsets_stop_at_u64_max() {
        let mut client = MockClient::new(numbered_docs(2));
        client.total = u64::MAX;
        let half = u64::MAX / 2 + 1;
        let lens = SearchLens::with_client(client).with_page_size(half);

        let records = lens.search(&SearchArgs::new("x")).unwrap();
        assert_eq!(records.len(), 2);

        let offsets: Vec<(u64, u64)> = lens
            .client
            .calls()
            .iter()
            .map(|(_, s, r)| (*s, *r))
            .collect();
        assert_eq!(offsets, vec![(0, 1), (0, half), (half, half)]);
    }

    #[test]
    fn test_page_size_is_at_least_one() {
        let lens = SearchLens::with_client(MockClient::new(vec![])).with_page_size(0);
        assert_eq!(lens.page_size(), 1);
    }
}
