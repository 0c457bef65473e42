pub mod browse;
pub mod categories;
pub mod commands;
pub mod config;
pub mod display;
pub mod error;
pub mod provider;
pub mod session;
pub mod types;

pub use browse::{
    Accumulator, BrowseEffect, BrowseViewModel, Coordinator, EmptyKind, Favorites,
    FavoritesEffect, FilterKey, PageOutcome, PageRequest, SearchIndex,
};
pub use categories::{ALL_CATEGORIES, CATEGORY_ALL, Category, find_category, is_category_id};
pub use config::Config;
pub use error::{HubError, Result};
pub use provider::{FavoritesStore, HttpProvider, ListProvider, ToolPage, ToolQuery};
pub use session::BrowseSession;
pub use types::{CategoryCount, Pricing, SortMode, Tool, VALID_SORTS, sort_tools};
