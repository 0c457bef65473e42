//! Async driver for the browse engine.
//!
//! [`BrowseSession`] owns a [`Coordinator`] plus the two providers, and is
//! the single writer of browse state: every effect the coordinator emits is
//! executed here, sequentially, and its completion fed straight back in
//! before the next effect runs. Errors from the providers are folded into
//! the tagged outcomes the core expects; nothing here is fatal.

use std::collections::VecDeque;

use crate::browse::{
    BrowseEffect, BrowseViewModel, Coordinator, FavoriteOp, FavoritesEffect, FetchOutcome,
    MutationOutcome, PageOutcome, PageRequest,
};
use crate::error::HubError;
use crate::provider::{FavoritesStore, ListProvider, ToolQuery};
use crate::types::SortMode;

/// A coordinator wired to live providers.
pub struct BrowseSession<P, F> {
    coordinator: Coordinator,
    provider: P,
    store: F,
    sort: SortMode,
    /// Set when an unauthenticated toggle asked for a sign-in redirect
    redirect_requested: bool,
}

impl<P: ListProvider, F: FavoritesStore> BrowseSession<P, F> {
    pub fn new(coordinator: Coordinator, provider: P, store: F) -> Self {
        Self {
            coordinator,
            provider,
            store,
            sort: SortMode::default(),
            redirect_requested: false,
        }
    }

    pub fn with_sort(mut self, sort: SortMode) -> Self {
        self.sort = sort;
        self
    }

    pub fn coordinator(&self) -> &Coordinator {
        &self.coordinator
    }

    /// Whether a toggle while signed out requested a sign-in redirect.
    /// Reading the flag clears it.
    pub fn take_redirect_requested(&mut self) -> bool {
        std::mem::take(&mut self.redirect_requested)
    }

    pub fn view_model(&mut self) -> BrowseViewModel {
        self.coordinator.view_model()
    }

    pub async fn start(&mut self) {
        let effects = self.coordinator.start();
        self.run_effects(effects).await;
    }

    pub async fn set_url_query(&mut self, query: &str) {
        let effects = self.coordinator.set_url_query(query);
        self.run_effects(effects).await;
    }

    /// Purely local; provided for symmetry with the other inputs.
    pub fn set_live_search(&mut self, input: &str) {
        self.coordinator.set_live_search(input);
    }

    pub async fn scroll_end(&mut self) {
        let effects = self.coordinator.on_scroll_end().into_iter().collect();
        self.run_effects(effects).await;
    }

    pub async fn sign_in(&mut self, identity: &str) {
        let effect = self.coordinator.sign_in(identity);
        self.run_effects(vec![effect]).await;
    }

    pub fn sign_out(&mut self) {
        self.coordinator.sign_out();
    }

    pub async fn toggle_favorite(&mut self, tool_id: &str) {
        let effects = self.coordinator.toggle_favorite(tool_id).into_iter().collect();
        self.run_effects(effects).await;
    }

    pub fn is_favorited(&self, tool_id: &str) -> bool {
        self.coordinator.is_favorited(tool_id)
    }

    /// Execute effects to completion, including the ones that settlements
    /// spawn in turn (queued mutations, resync fetches).
    async fn run_effects(&mut self, effects: Vec<BrowseEffect>) {
        let mut pending: VecDeque<BrowseEffect> = effects.into();
        while let Some(effect) = pending.pop_front() {
            match effect {
                BrowseEffect::FetchPage(request) => {
                    let outcome = self.fetch_page(request).await;
                    self.coordinator.apply_page(outcome);
                }
                BrowseEffect::Favorites(FavoritesEffect::Mutate(request)) => {
                    let result = match request.op {
                        FavoriteOp::Add => {
                            self.store
                                .add_favorite(&request.identity, &request.tool_id)
                                .await
                        }
                        FavoriteOp::Remove => {
                            self.store
                                .remove_favorite(&request.identity, &request.tool_id)
                                .await
                        }
                    };
                    let followups = self.coordinator.settle_favorite(MutationOutcome {
                        mutation_id: request.mutation_id,
                        result: result.map_err(display_error),
                    });
                    pending.extend(followups);
                }
                BrowseEffect::Favorites(FavoritesEffect::Refetch { identity }) => {
                    let result = self.store.favorite_ids(&identity).await;
                    self.coordinator.apply_favorites_fetch(FetchOutcome {
                        identity,
                        result: result.map_err(display_error),
                    });
                }
                BrowseEffect::Favorites(FavoritesEffect::RedirectToSignIn) => {
                    self.redirect_requested = true;
                }
            }
        }
    }

    async fn fetch_page(&self, request: PageRequest) -> PageOutcome {
        let query = ToolQuery {
            category: Some(request.key.category.clone()),
            search: if request.key.search.is_empty() {
                None
            } else {
                Some(request.key.search.clone())
            },
            sort: self.sort,
            page: request.page,
            page_size: request.page_size,
        };
        let result = self
            .provider
            .list_tools(&query)
            .await
            .map_err(display_error);
        PageOutcome { request, result }
    }
}

fn display_error(error: HubError) -> String {
    error.to_string()
}
