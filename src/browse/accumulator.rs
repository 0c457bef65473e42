//! Page accumulation for infinite scroll.
//!
//! One accumulator instance serves one [`FilterKey`] at a time. Fetches are
//! requested through [`Accumulator::load_next`] and resolved through
//! [`Accumulator::apply`]; the accumulator itself never touches the network.

use std::collections::HashSet;

use crate::provider::ToolPage;
use crate::types::Tool;

use super::key::FilterKey;

/// A request for one catalog page, stamped with the key generation that
/// issued it so late responses for an abandoned key can be recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub key: FilterKey,
    /// 1-based page number to fetch
    pub page: u32,
    pub page_size: u32,
    /// Key generation; bumped on every reset
    pub epoch: u64,
}

/// Completion of a page fetch. Failures carry a display message, not an
/// error type: a failed page load is a view state, not a fault.
#[derive(Debug, Clone)]
pub struct PageOutcome {
    pub request: PageRequest,
    pub result: Result<ToolPage, String>,
}

/// Accumulated catalog pages for the active key.
#[derive(Debug, Clone)]
pub struct Accumulator {
    key: FilterKey,
    epoch: u64,
    page_size: u32,

    tools: Vec<Tool>,
    seen: HashSet<String>,

    /// Last successfully fetched page (0 = none yet)
    cursor: u32,
    has_more: bool,
    in_flight: bool,
    loaded_once: bool,
    load_error: Option<String>,
}

impl Accumulator {
    pub fn new(key: FilterKey, page_size: u32) -> Self {
        Self {
            key,
            epoch: 0,
            page_size,
            tools: Vec::new(),
            seen: HashSet::new(),
            cursor: 0,
            has_more: true,
            in_flight: false,
            loaded_once: false,
            load_error: None,
        }
    }

    pub fn key(&self) -> &FilterKey {
        &self.key
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight
    }

    /// Whether at least one page has been applied for the current key.
    pub fn has_loaded(&self) -> bool {
        self.loaded_once
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Ask for the next page.
    ///
    /// Returns `None` while a fetch is already in flight (rapid scroll
    /// events coalesce into the single outstanding request) or once the
    /// result set is complete. A previous load error does not block the
    /// retry; it is cleared when the retry is issued.
    pub fn load_next(&mut self) -> Option<PageRequest> {
        if self.in_flight || !self.has_more {
            return None;
        }
        self.in_flight = true;
        self.load_error = None;
        Some(PageRequest {
            key: self.key.clone(),
            page: self.cursor + 1,
            page_size: self.page_size,
            epoch: self.epoch,
        })
    }

    /// Apply a completed fetch.
    ///
    /// Outcomes stamped with a stale epoch belong to a key the user has
    /// already left; they are dropped without touching state.
    pub fn apply(&mut self, outcome: PageOutcome) {
        if outcome.request.epoch != self.epoch {
            tracing::debug!(
                page = outcome.request.page,
                "dropping stale page response for abandoned key"
            );
            return;
        }

        self.in_flight = false;
        match outcome.result {
            Ok(page) => self.append_page(outcome.request.page, page),
            Err(message) => {
                tracing::warn!(%message, "page fetch failed; keeping accumulated state");
                self.load_error = Some(message);
            }
        }
    }

    /// Seed the accumulator with a server-provided first page, as when the
    /// initial render already carries page 1.
    pub fn seed_first_page(&mut self, records: Vec<Tool>) {
        let full = records.len() as u32 == self.page_size;
        self.append_page(
            1,
            ToolPage {
                records,
                next_page: if full { Some(2) } else { None },
            },
        );
    }

    fn append_page(&mut self, page: u32, body: ToolPage) {
        let fetched = body.records.len() as u32;
        for tool in body.records {
            // First occurrence wins its position; later duplicates are
            // skipped entirely.
            if self.seen.insert(tool.id.clone()) {
                self.tools.push(tool);
            }
        }
        self.cursor = page;
        self.loaded_once = true;
        self.load_error = None;
        // A short page is terminal even if the provider still handed out a
        // successor token.
        self.has_more = body.next_page.is_some() && fetched == self.page_size;
    }

    /// Hard transition to a new key: discard everything and invalidate any
    /// in-flight fetch by bumping the epoch.
    pub fn reset(&mut self, key: FilterKey) {
        self.key = key;
        self.epoch += 1;
        self.tools.clear();
        self.seen.clear();
        self.cursor = 0;
        self.has_more = true;
        self.in_flight = false;
        self.loaded_once = false;
        self.load_error = None;
    }
}
