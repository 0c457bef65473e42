//! Catalog provider interfaces.
//!
//! This module defines the contracts the browse engine consumes: a read-only
//! list provider for catalog pages and lookups, and a favorites store for
//! the signed-in user's favorite set. The HTTP implementations live in
//! [`http`]; tests substitute in-memory implementations.

pub mod error;
pub mod http;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{CategoryCount, SortMode, Tool};

pub use http::HttpProvider;

/// Parameters for a catalog list request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolQuery {
    /// Category filter; `None` or "all" means unfiltered
    pub category: Option<String>,
    /// Free-text search forwarded to the provider
    pub search: Option<String>,
    /// Server-side ordering
    pub sort: SortMode,
    /// 1-based page number
    pub page: u32,
    /// Records per page
    pub page_size: u32,
}

/// One page of catalog results.
///
/// `next_page` is `None` when the provider reports no further pages. The
/// accumulator applies its own short-page check on top of this.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolPage {
    #[serde(rename = "data")]
    pub records: Vec<Tool>,

    #[serde(rename = "nextPage")]
    pub next_page: Option<u32>,
}

/// Read-only catalog access.
pub trait ListProvider: Send + Sync {
    /// Fetch one page of tools for the given query.
    fn list_tools(&self, query: &ToolQuery) -> impl std::future::Future<Output = Result<ToolPage>> + Send;

    /// Look up a single tool by id. Unknown ids resolve to `Ok(None)`,
    /// never an error.
    fn get_tool(&self, id: &str) -> impl std::future::Future<Output = Result<Option<Tool>>> + Send;

    /// Trending tools for the featured rail.
    fn featured_tools(&self, limit: u32) -> impl std::future::Future<Output = Result<Vec<Tool>>> + Send;

    /// Tools in the same category, excluding the one being viewed.
    fn related_tools(
        &self,
        category: &str,
        exclude_id: &str,
        limit: u32,
    ) -> impl std::future::Future<Output = Result<Vec<Tool>>> + Send;

    /// Per-category entry counts.
    fn category_counts(&self) -> impl std::future::Future<Output = Result<Vec<CategoryCount>>> + Send;

    /// Total number of catalog entries.
    fn total_tool_count(&self) -> impl std::future::Future<Output = Result<u64>> + Send;
}

/// Favorite-set access, scoped by identity.
pub trait FavoritesStore: Send + Sync {
    /// The user's favorited tool ids. Empty for unknown identities.
    fn favorite_ids(&self, identity: &str) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;

    fn add_favorite(
        &self,
        identity: &str,
        tool_id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    fn remove_favorite(
        &self,
        identity: &str,
        tool_id: &str,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Strip characters that carry meaning in the provider's filter syntax,
/// replacing them with spaces. Matches the server-side sanitizer.
pub fn sanitize_search(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '(' | ')' | ',' | '.' => ' ',
            other => other,
        })
        .collect()
}
