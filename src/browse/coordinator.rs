//! The single writer tying URL intent, pagination, local filtering, and
//! favorites into one renderable view model.
//!
//! All methods are synchronous. Methods that need the outside world return
//! [`BrowseEffect`]s; the session driver executes them and feeds the
//! completions back in.

use std::collections::HashSet;

use crate::types::Tool;

use super::accumulator::{Accumulator, PageOutcome, PageRequest};
use super::favorites::{Favorites, FavoritesEffect, FetchOutcome, MutationOutcome};
use super::filter::{SearchIndex, filter};
use super::key::FilterKey;

/// Work for the session driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseEffect {
    /// Fetch one catalog page
    FetchPage(PageRequest),
    /// Favorites store work
    Favorites(FavoritesEffect),
}

/// Why the rendered list is empty. The three cases render differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyKind {
    /// Nothing fetched yet for this key
    Loading,
    /// Data exists, but the live filter excluded all of it
    NoLocalMatches,
    /// The provider's result set for this key is genuinely empty
    EndOfCatalog,
}

/// Everything the presentation layer needs for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseViewModel {
    /// Tools to render, already filtered and ranked
    pub tools: Vec<Tool>,
    /// First load for the active key still outstanding
    pub is_loading: bool,
    /// A later page is being fetched
    pub is_fetching_more: bool,
    pub has_more: bool,
    /// Provider-side search text from the URL key
    pub active_search: String,
    pub active_category: String,
    /// Live filter box contents
    pub live_search: String,
    /// Last page-fetch failure, if the user should be offered a retry
    pub load_error: Option<String>,
    pub empty_state: Option<EmptyKind>,
    /// Favorited ids for annotating the rendered tools
    pub favorite_ids: HashSet<String>,
}

/// The query/filter coordinator.
pub struct Coordinator {
    accumulator: Accumulator,
    favorites: Favorites,
    index: SearchIndex,
    live_search: String,
    threshold: f64,
}

impl Coordinator {
    pub fn new(page_size: u32, threshold: f64) -> Self {
        Self {
            accumulator: Accumulator::new(FilterKey::default(), page_size),
            favorites: Favorites::new(),
            index: SearchIndex::empty(),
            live_search: String::new(),
            threshold,
        }
    }

    pub fn key(&self) -> &FilterKey {
        self.accumulator.key()
    }

    pub fn live_search(&self) -> &str {
        &self.live_search
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// Kick off the first page fetch for the initial key.
    pub fn start(&mut self) -> Vec<BrowseEffect> {
        self.fetch_next().into_iter().collect()
    }

    /// Seed page 1 from data the initial render already carried.
    pub fn seed_first_page(&mut self, records: Vec<Tool>) {
        self.accumulator.seed_first_page(records);
    }

    /// Re-derive intent from the URL query value.
    ///
    /// A changed key is a hard transition: accumulated pages are discarded,
    /// live typing is cleared (the URL seeds local state only on key
    /// change), and page 1 is requested fresh. An unchanged key is a no-op
    /// so this is safe to call on every navigation event.
    pub fn set_url_query(&mut self, query: &str) -> Vec<BrowseEffect> {
        let key = FilterKey::from_url_query(query);
        if key == *self.accumulator.key() {
            // Same key: only kick off the initial fetch if it never ran.
            if !self.accumulator.has_loaded() {
                return self.fetch_next().into_iter().collect();
            }
            return vec![];
        }
        self.accumulator.reset(key);
        self.index = SearchIndex::empty();
        self.live_search.clear();
        self.fetch_next().into_iter().collect()
    }

    /// Update the live filter box. Purely local; never refetches.
    pub fn set_live_search(&mut self, input: &str) {
        self.live_search = input.to_string();
    }

    /// The scroll sentinel came into view.
    ///
    /// While a live search is active the infinite scroll is suspended:
    /// local filtering only operates over already-fetched data, so more
    /// pages would not change what the user sees. Clearing the search
    /// resumes exactly where the accumulator left off.
    pub fn on_scroll_end(&mut self) -> Option<BrowseEffect> {
        if !self.live_search.trim().is_empty() {
            return None;
        }
        self.fetch_next()
    }

    fn fetch_next(&mut self) -> Option<BrowseEffect> {
        self.accumulator.load_next().map(BrowseEffect::FetchPage)
    }

    /// Apply a completed page fetch (stale-key outcomes are dropped inside
    /// the accumulator).
    pub fn apply_page(&mut self, outcome: PageOutcome) {
        self.accumulator.apply(outcome);
    }

    // ------------------------------------------------------------------
    // Favorites passthrough
    // ------------------------------------------------------------------

    pub fn sign_in(&mut self, identity: &str) -> BrowseEffect {
        BrowseEffect::Favorites(self.favorites.sign_in(identity))
    }

    pub fn sign_out(&mut self) {
        self.favorites.sign_out();
    }

    pub fn is_favorited(&self, tool_id: &str) -> bool {
        self.favorites.is_favorited(tool_id)
    }

    pub fn toggle_favorite(&mut self, tool_id: &str) -> Option<BrowseEffect> {
        self.favorites.toggle(tool_id).map(BrowseEffect::Favorites)
    }

    pub fn settle_favorite(&mut self, outcome: MutationOutcome) -> Vec<BrowseEffect> {
        self.favorites
            .settle(outcome)
            .into_iter()
            .map(BrowseEffect::Favorites)
            .collect()
    }

    pub fn apply_favorites_fetch(&mut self, outcome: FetchOutcome) {
        self.favorites.apply_fetch(outcome);
    }

    // ------------------------------------------------------------------
    // View model derivation
    // ------------------------------------------------------------------

    fn ensure_index(&mut self) {
        let epoch = self.accumulator.epoch();
        let len = self.accumulator.tools().len();
        if !self.index.is_current(epoch, len) {
            self.index = SearchIndex::build(self.accumulator.tools(), epoch);
        }
    }

    /// Derive the current view model. Never mutates browse state beyond
    /// refreshing the search index when the accumulated list changed.
    pub fn view_model(&mut self) -> BrowseViewModel {
        self.ensure_index();

        let ranked = filter(&self.index, &self.live_search, self.threshold);
        let accumulated = self.accumulator.tools();
        let tools: Vec<Tool> = ranked
            .iter()
            .map(|r| accumulated[r.position].clone())
            .collect();

        let is_loading = !self.accumulator.has_loaded();
        let is_fetching_more = self.accumulator.is_fetching() && self.accumulator.has_loaded();

        let empty_state = if !tools.is_empty() {
            None
        } else if is_loading {
            Some(EmptyKind::Loading)
        } else if accumulated.is_empty() {
            Some(EmptyKind::EndOfCatalog)
        } else {
            Some(EmptyKind::NoLocalMatches)
        };

        let key = self.accumulator.key();
        BrowseViewModel {
            tools,
            is_loading,
            is_fetching_more,
            has_more: self.accumulator.has_more(),
            active_search: key.search.clone(),
            active_category: key.category.clone(),
            live_search: self.live_search.clone(),
            load_error: self.accumulator.load_error().map(str::to_string),
            empty_state,
            favorite_ids: self.favorites.ids().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ToolPage;

    const PAGE_SIZE: u32 = 3;
    const THRESHOLD: f64 = 0.4;

    fn tool(id: &str, name: &str) -> Tool {
        Tool {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn coordinator() -> Coordinator {
        Coordinator::new(PAGE_SIZE, THRESHOLD)
    }

    fn fetch_request(effects: &[BrowseEffect]) -> PageRequest {
        match effects {
            [BrowseEffect::FetchPage(request)] => request.clone(),
            other => panic!("expected a lone page fetch, got {other:?}"),
        }
    }

    fn apply_ok(coordinator: &mut Coordinator, request: PageRequest, tools: Vec<Tool>, next: Option<u32>) {
        coordinator.apply_page(PageOutcome {
            request,
            result: Ok(ToolPage {
                records: tools,
                next_page: next,
            }),
        });
    }

    #[test]
    fn test_start_requests_page_one() {
        let mut c = coordinator();
        let request = fetch_request(&c.start());
        assert_eq!(request.page, 1);
        assert!(request.key.is_unfiltered());
    }

    #[test]
    fn test_category_token_becomes_category_key() {
        let mut c = coordinator();
        let request = fetch_request(&c.set_url_query("image"));
        assert_eq!(request.key.category, "image");
        assert_eq!(request.key.search, "");
    }

    #[test]
    fn test_free_text_becomes_search_key() {
        let mut c = coordinator();
        let request = fetch_request(&c.set_url_query("chatgpt"));
        assert_eq!(request.key.search, "chatgpt");
        assert_eq!(request.key.category, "all");
    }

    #[test]
    fn test_unchanged_key_is_noop() {
        let mut c = coordinator();
        let request = fetch_request(&c.set_url_query("image"));
        // Same key while the fetch is in flight: nothing new issued.
        assert!(c.set_url_query("image").is_empty());
        assert!(c.set_url_query("IMAGE").is_empty());

        apply_ok(&mut c, request, vec![tool("a", "A")], None);
        assert!(c.set_url_query("image").is_empty());
    }

    #[test]
    fn test_all_token_on_cold_start_fetches_page_one() {
        let mut c = coordinator();
        let request = fetch_request(&c.set_url_query("all"));
        assert_eq!(request.page, 1);
        assert!(request.key.is_unfiltered());
    }

    #[test]
    fn test_key_change_discards_accumulation() {
        let mut c = coordinator();
        let request = fetch_request(&c.start());
        apply_ok(&mut c, request, vec![tool("a", "A"), tool("b", "B"), tool("c", "C")], Some(2));
        assert_eq!(c.view_model().tools.len(), 3);

        let request = fetch_request(&c.set_url_query("video"));
        assert_eq!(request.page, 1);
        let vm = c.view_model();
        assert!(vm.tools.is_empty());
        assert_eq!(vm.empty_state, Some(EmptyKind::Loading));
    }

    #[test]
    fn test_stale_response_not_applied_after_key_change() {
        let mut c = coordinator();
        let stale = fetch_request(&c.start());
        c.set_url_query("video");

        apply_ok(&mut c, stale, vec![tool("zombie", "Zombie")], None);
        assert!(c.view_model().tools.is_empty());
    }

    #[test]
    fn test_live_search_suspends_infinite_scroll() {
        let mut c = coordinator();
        let request = fetch_request(&c.start());
        apply_ok(&mut c, request, vec![tool("a", "Alpha"), tool("b", "Beta"), tool("c", "Gamma")], Some(2));

        c.set_live_search("alpha");
        assert!(c.on_scroll_end().is_none());

        // Clearing the box resumes from page 2, not page 1.
        c.set_live_search("");
        let resumed = c.on_scroll_end().unwrap();
        match resumed {
            BrowseEffect::FetchPage(request) => assert_eq!(request.page, 2),
            other => panic!("expected page fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_live_search_filters_view() {
        let mut c = coordinator();
        let request = fetch_request(&c.start());
        apply_ok(&mut c, request, vec![tool("a", "Alpha"), tool("b", "Beta"), tool("c", "Gamma")], Some(2));

        c.set_live_search("beta");
        let vm = c.view_model();
        assert_eq!(vm.tools.len(), 1);
        assert_eq!(vm.tools[0].id, "b");
        assert_eq!(vm.live_search, "beta");
    }

    #[test]
    fn test_url_change_clears_live_typing() {
        let mut c = coordinator();
        let request = fetch_request(&c.start());
        apply_ok(&mut c, request, vec![tool("a", "Alpha")], None);
        c.set_live_search("alp");

        c.set_url_query("code");
        assert_eq!(c.live_search(), "");
    }

    #[test]
    fn test_empty_state_trichotomy() {
        let mut c = coordinator();
        assert_eq!(c.view_model().empty_state, Some(EmptyKind::Loading));

        let request = fetch_request(&c.start());
        assert_eq!(c.view_model().empty_state, Some(EmptyKind::Loading));

        // Provider returns nothing at all for this key.
        apply_ok(&mut c, request, vec![], None);
        assert_eq!(c.view_model().empty_state, Some(EmptyKind::EndOfCatalog));

        // New key with data, then a filter that matches nothing.
        let request = fetch_request(&c.set_url_query("audio"));
        apply_ok(&mut c, request, vec![tool("a", "Alpha")], None);
        assert_eq!(c.view_model().empty_state, None);

        c.set_live_search("zzzzzzz");
        assert_eq!(c.view_model().empty_state, Some(EmptyKind::NoLocalMatches));
    }

    #[test]
    fn test_load_error_surfaces_and_clears_on_retry() {
        let mut c = coordinator();
        let request = fetch_request(&c.start());
        c.apply_page(PageOutcome {
            request,
            result: Err("connection reset".to_string()),
        });
        assert_eq!(
            c.view_model().load_error.as_deref(),
            Some("connection reset")
        );

        let retry = c.on_scroll_end().unwrap();
        assert!(c.view_model().load_error.is_none());
        match retry {
            BrowseEffect::FetchPage(request) => assert_eq!(request.page, 1),
            other => panic!("expected page fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_is_fetching_more_only_after_first_page() {
        let mut c = coordinator();
        c.start();
        let vm = c.view_model();
        assert!(vm.is_loading);
        assert!(!vm.is_fetching_more);
    }

    #[test]
    fn test_unauthenticated_toggle_redirects() {
        let mut c = coordinator();
        let effect = c.toggle_favorite("t1");
        assert_eq!(
            effect,
            Some(BrowseEffect::Favorites(FavoritesEffect::RedirectToSignIn))
        );
    }

    #[test]
    fn test_favorites_annotate_view_model() {
        let mut c = coordinator();
        c.sign_in("user-1");
        c.apply_favorites_fetch(FetchOutcome {
            identity: "user-1".to_string(),
            result: Ok(vec!["a".to_string()]),
        });

        let request = fetch_request(&c.start());
        apply_ok(&mut c, request, vec![tool("a", "Alpha"), tool("b", "Beta")], None);

        let vm = c.view_model();
        assert!(vm.favorite_ids.contains("a"));
        assert!(!vm.favorite_ids.contains("b"));
        assert!(c.is_favorited("a"));
    }
}
