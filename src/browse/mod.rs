//! The browse engine: everything between user intent and a renderable list.
//!
//! Four cooperating pieces, all synchronous and effect-driven so they can be
//! unit tested without a runtime:
//!
//! - [`Accumulator`]: grows a de-duplicated list of catalog pages for one
//!   (search, category) key, one in-flight fetch at a time.
//! - [`SearchIndex`] / [`filter`]: instant typo-tolerant filtering over the
//!   already-fetched list, no network.
//! - [`Favorites`]: the optimistic favorite set with rollback.
//! - [`Coordinator`]: the single writer reconciling the above into a
//!   [`BrowseViewModel`].
//!
//! Async lives one layer up, in [`crate::session`], which pumps the effects
//! these machines emit through the provider traits.

pub mod accumulator;
pub mod coordinator;
pub mod favorites;
pub mod filter;
pub mod key;

pub use accumulator::{Accumulator, PageOutcome, PageRequest};
pub use coordinator::{BrowseEffect, BrowseViewModel, Coordinator, EmptyKind};
pub use favorites::{
    FavoriteOp, Favorites, FavoritesEffect, FavoritesPhase, FetchOutcome, MutationOutcome,
    MutationRequest,
};
pub use filter::{RankedTool, SearchIndex, filter};
pub use key::FilterKey;
