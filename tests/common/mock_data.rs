//! Mock data builders and an in-memory catalog for integration tests.
//!
//! The in-memory catalog implements the same contracts the HTTP client
//! does, including the `nextPage = len == limit ? page + 1 : null`
//! pagination rule, so session tests exercise the real engine paths.

// Shared across test binaries; not every binary uses every helper.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use pickaihub::error::{HubError, Result};
use pickaihub::provider::{FavoritesStore, ListProvider, ToolPage, ToolQuery};
use pickaihub::types::{CategoryCount, Tool, sort_tools};

/// Builder for test tools
pub struct ToolBuilder {
    tool: Tool,
}

impl ToolBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            tool: Tool {
                id: id.to_string(),
                name: format!("Tool {id}"),
                description: "A test tool".to_string(),
                category: "text".to_string(),
                category_label: "Text".to_string(),
                rating: 4.0,
                launch_date: "2024-01-01".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.tool.name = name.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.tool.description = description.to_string();
        self
    }

    pub fn category(mut self, id: &str, label: &str) -> Self {
        self.tool.category = id.to_string();
        self.tool.category_label = label.to_string();
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tool.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.tool.rating = rating;
        self
    }

    pub fn trending(mut self) -> Self {
        self.tool.is_trending = true;
        self
    }

    pub fn build(self) -> Tool {
        self.tool
    }
}

/// Create a basic tool with minimal setup
pub fn mock_tool(id: &str, name: &str) -> Tool {
    ToolBuilder::new(id).name(name).build()
}

/// Create `count` tools in one category, ids `prefix-0..count`
pub fn mock_catalog(prefix: &str, category: &str, label: &str, count: usize) -> Vec<Tool> {
    (0..count)
        .map(|i| {
            ToolBuilder::new(&format!("{prefix}-{i}"))
                .name(&format!("{label} tool {i}"))
                .category(category, label)
                .build()
        })
        .collect()
}

struct Inner {
    tools: Vec<Tool>,
    favorites: Mutex<HashMap<String, HashSet<String>>>,
    fail_mutations: AtomicBool,
    list_calls: AtomicUsize,
}

/// In-memory catalog + favorites store.
#[derive(Clone)]
pub struct MemoryCatalog {
    inner: Arc<Inner>,
}

impl MemoryCatalog {
    pub fn new(tools: Vec<Tool>) -> Self {
        Self {
            inner: Arc::new(Inner {
                tools,
                favorites: Mutex::new(HashMap::new()),
                fail_mutations: AtomicBool::new(false),
                list_calls: AtomicUsize::new(0),
            }),
        }
    }

    /// Pre-seed a favorites set for an identity.
    pub fn seed_favorites(&self, identity: &str, ids: &[&str]) {
        self.inner.favorites.lock().unwrap().insert(
            identity.to_string(),
            ids.iter().map(|s| s.to_string()).collect(),
        );
    }

    /// Make subsequent add/remove calls fail, as if the network dropped.
    pub fn set_offline(&self, offline: bool) {
        self.inner.fail_mutations.store(offline, Ordering::SeqCst);
    }

    /// How many list requests the engine has issued.
    pub fn list_calls(&self) -> usize {
        self.inner.list_calls.load(Ordering::SeqCst)
    }

    /// Authoritative favorite membership, bypassing any overlay.
    pub fn stored_favorite(&self, identity: &str, tool_id: &str) -> bool {
        self.inner
            .favorites
            .lock()
            .unwrap()
            .get(identity)
            .is_some_and(|set| set.contains(tool_id))
    }

    fn matching_tools(&self, query: &ToolQuery) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self
            .inner
            .tools
            .iter()
            .filter(|tool| match &query.category {
                Some(category) if category != "all" => tool.category == *category,
                _ => true,
            })
            .filter(|tool| match &query.search {
                Some(search) if !search.is_empty() => {
                    let needle = search.to_lowercase();
                    tool.name.to_lowercase().contains(&needle)
                        || tool.description.to_lowercase().contains(&needle)
                }
                _ => true,
            })
            .cloned()
            .collect();
        sort_tools(&mut tools, query.sort);
        tools
    }
}

impl ListProvider for MemoryCatalog {
    async fn list_tools(&self, query: &ToolQuery) -> Result<ToolPage> {
        self.inner.list_calls.fetch_add(1, Ordering::SeqCst);

        let matching = self.matching_tools(query);
        let page_size = query.page_size as usize;
        let start = (query.page.saturating_sub(1) as usize) * page_size;
        let records: Vec<Tool> = matching.into_iter().skip(start).take(page_size).collect();
        let next_page = if records.len() == page_size {
            Some(query.page + 1)
        } else {
            None
        };
        Ok(ToolPage { records, next_page })
    }

    async fn get_tool(&self, id: &str) -> Result<Option<Tool>> {
        let by_id = self.inner.tools.iter().find(|t| t.id == id);
        let found = by_id.or_else(|| {
            self.inner
                .tools
                .iter()
                .find(|t| t.name.eq_ignore_ascii_case(id))
        });
        Ok(found.cloned())
    }

    async fn featured_tools(&self, limit: u32) -> Result<Vec<Tool>> {
        let mut featured: Vec<Tool> = self
            .inner
            .tools
            .iter()
            .filter(|t| t.is_trending)
            .cloned()
            .collect();
        featured.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap());
        featured.truncate(limit as usize);
        Ok(featured)
    }

    async fn related_tools(&self, category: &str, exclude_id: &str, limit: u32) -> Result<Vec<Tool>> {
        let mut related: Vec<Tool> = self
            .inner
            .tools
            .iter()
            .filter(|t| t.category == category && t.id != exclude_id)
            .cloned()
            .collect();
        related.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap());
        related.truncate(limit as usize);
        Ok(related)
    }

    async fn category_counts(&self) -> Result<Vec<CategoryCount>> {
        let mut counts: HashMap<String, u64> = HashMap::new();
        for tool in &self.inner.tools {
            *counts.entry(tool.category.clone()).or_default() += 1;
        }
        let mut counts: Vec<CategoryCount> = counts
            .into_iter()
            .map(|(category, count)| CategoryCount { category, count })
            .collect();
        counts.sort_by(|a, b| a.category.cmp(&b.category));
        Ok(counts)
    }

    async fn total_tool_count(&self) -> Result<u64> {
        Ok(self.inner.tools.len() as u64)
    }
}

impl FavoritesStore for MemoryCatalog {
    async fn favorite_ids(&self, identity: &str) -> Result<Vec<String>> {
        let favorites = self.inner.favorites.lock().unwrap();
        let mut ids: Vec<String> = favorites
            .get(identity)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        Ok(ids)
    }

    async fn add_favorite(&self, identity: &str, tool_id: &str) -> Result<()> {
        if self.inner.fail_mutations.load(Ordering::SeqCst) {
            return Err(HubError::Api("simulated network failure".to_string()));
        }
        self.inner
            .favorites
            .lock()
            .unwrap()
            .entry(identity.to_string())
            .or_default()
            .insert(tool_id.to_string());
        Ok(())
    }

    async fn remove_favorite(&self, identity: &str, tool_id: &str) -> Result<()> {
        if self.inner.fail_mutations.load(Ordering::SeqCst) {
            return Err(HubError::Api("simulated network failure".to_string()));
        }
        self.inner
            .favorites
            .lock()
            .unwrap()
            .entry(identity.to_string())
            .or_default()
            .remove(tool_id);
        Ok(())
    }
}
