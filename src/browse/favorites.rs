//! Optimistic favorites overlay.
//!
//! Local view of the signed-in user's favorite set. Toggles apply
//! immediately and settle against the store later; each mutation carries a
//! pre-image snapshot for rollback, and every settlement schedules an
//! authoritative refetch so the local set cannot drift for long.
//!
//! Mutations for the same tool are serialized through a per-tool queue;
//! mutations for different tools may be in flight concurrently.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

/// Lifecycle of the overlay for the current identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoritesPhase {
    #[default]
    SignedOut,
    Hydrating,
    Hydrated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteOp {
    Add,
    Remove,
}

impl fmt::Display for FavoriteOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteOp::Add => write!(f, "add"),
            FavoriteOp::Remove => write!(f, "remove"),
        }
    }
}

/// A mutation the driver must send to the favorites store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    pub mutation_id: u64,
    pub identity: String,
    pub tool_id: String,
    pub op: FavoriteOp,
}

/// Settlement of a previously dispatched mutation.
#[derive(Debug, Clone)]
pub struct MutationOutcome {
    pub mutation_id: u64,
    pub result: Result<(), String>,
}

/// Completion of an authoritative set fetch.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub identity: String,
    pub result: Result<Vec<String>, String>,
}

/// What the overlay asks the outside world to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesEffect {
    /// Unauthenticated toggle: send the user to sign-in instead
    RedirectToSignIn,
    /// Send a mutation to the store
    Mutate(MutationRequest),
    /// Fetch the authoritative id set
    Refetch { identity: String },
}

#[derive(Debug, Clone)]
struct ActiveMutation {
    mutation_id: u64,
    /// Membership of the tool id before the optimistic flip
    snapshot: bool,
}

#[derive(Debug, Clone)]
struct QueuedMutation {
    op: FavoriteOp,
    snapshot: bool,
}

/// The favorites state machine.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    phase: FavoritesPhase,
    identity: Option<String>,
    set: HashSet<String>,

    next_mutation_id: u64,
    /// At most one in-flight mutation per tool id
    active: HashMap<String, ActiveMutation>,
    /// Toggles issued while one was already in flight
    queued: HashMap<String, VecDeque<QueuedMutation>>,
    /// mutation_id -> tool_id for settlement routing
    by_id: HashMap<u64, String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FavoritesPhase {
        self.phase
    }

    pub fn is_signed_in(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FavoritesPhase::Hydrating
    }

    pub fn is_favorited(&self, tool_id: &str) -> bool {
        self.set.contains(tool_id)
    }

    pub fn ids(&self) -> &HashSet<String> {
        &self.set
    }

    /// Mutations dispatched or queued but not yet settled.
    pub fn pending_mutations(&self) -> usize {
        self.active.len() + self.queued.values().map(VecDeque::len).sum::<usize>()
    }

    /// Begin a session for `identity`; returns the hydration fetch.
    pub fn sign_in(&mut self, identity: impl Into<String>) -> FavoritesEffect {
        let identity = identity.into();
        self.clear_session();
        self.identity = Some(identity.clone());
        self.phase = FavoritesPhase::Hydrating;
        FavoritesEffect::Refetch { identity }
    }

    /// Drop the session; in-flight settlements become no-ops.
    pub fn sign_out(&mut self) {
        self.clear_session();
    }

    fn clear_session(&mut self) {
        self.phase = FavoritesPhase::SignedOut;
        self.identity = None;
        self.set.clear();
        self.active.clear();
        self.queued.clear();
        self.by_id.clear();
    }

    /// Favorite a tool. No-op when it already is.
    pub fn add(&mut self, tool_id: &str) -> Option<FavoritesEffect> {
        if self.is_signed_in() && self.set.contains(tool_id) {
            return None;
        }
        self.toggle(tool_id)
    }

    /// Unfavorite a tool. No-op when it already isn't.
    pub fn remove(&mut self, tool_id: &str) -> Option<FavoritesEffect> {
        if self.is_signed_in() && !self.set.contains(tool_id) {
            return None;
        }
        self.toggle(tool_id)
    }

    /// Flip a tool's favorite state optimistically.
    ///
    /// Signed-out users get a redirect effect and no state change. When a
    /// mutation for the same tool is already in flight the new toggle is
    /// applied locally and queued; it dispatches once the active one
    /// settles.
    pub fn toggle(&mut self, tool_id: &str) -> Option<FavoritesEffect> {
        let Some(identity) = self.identity.clone() else {
            return Some(FavoritesEffect::RedirectToSignIn);
        };

        let was_favorited = self.set.contains(tool_id);
        let op = if was_favorited {
            self.set.remove(tool_id);
            FavoriteOp::Remove
        } else {
            self.set.insert(tool_id.to_string());
            FavoriteOp::Add
        };

        if self.active.contains_key(tool_id) {
            self.queued
                .entry(tool_id.to_string())
                .or_default()
                .push_back(QueuedMutation {
                    op,
                    snapshot: was_favorited,
                });
            return None;
        }

        Some(self.dispatch(identity, tool_id.to_string(), op, was_favorited))
    }

    fn dispatch(
        &mut self,
        identity: String,
        tool_id: String,
        op: FavoriteOp,
        snapshot: bool,
    ) -> FavoritesEffect {
        let mutation_id = self.next_mutation_id;
        self.next_mutation_id += 1;
        self.by_id.insert(mutation_id, tool_id.clone());
        self.active.insert(
            tool_id.clone(),
            ActiveMutation {
                mutation_id,
                snapshot,
            },
        );
        FavoritesEffect::Mutate(MutationRequest {
            mutation_id,
            identity,
            tool_id,
            op,
        })
    }

    /// Settle a mutation.
    ///
    /// Success keeps the optimistic value and dispatches the next queued
    /// toggle for that tool, if any. Failure rolls the tool back to its
    /// pre-mutation snapshot and drops queued follow-ups. Either way the
    /// authoritative set is refetched.
    pub fn settle(&mut self, outcome: MutationOutcome) -> Vec<FavoritesEffect> {
        let Some(tool_id) = self.by_id.remove(&outcome.mutation_id) else {
            tracing::debug!(
                mutation_id = outcome.mutation_id,
                "dropping settlement for a cleared session"
            );
            return vec![];
        };
        let Some(active) = self.active.remove(&tool_id) else {
            return vec![];
        };
        debug_assert_eq!(active.mutation_id, outcome.mutation_id);

        let mut effects = Vec::new();
        match outcome.result {
            Ok(()) => {
                let next = self.queued.get_mut(&tool_id).and_then(VecDeque::pop_front);
                if let Some(next) = next
                    && let Some(identity) = self.identity.clone()
                {
                    effects.push(self.dispatch(identity, tool_id.clone(), next.op, next.snapshot));
                }
            }
            Err(message) => {
                tracing::warn!(%message, tool = %tool_id, "favorite mutation failed; rolling back");
                if active.snapshot {
                    self.set.insert(tool_id.clone());
                } else {
                    self.set.remove(&tool_id);
                }
                self.queued.remove(&tool_id);
            }
        }

        if self.queued.get(&tool_id).is_some_and(VecDeque::is_empty) {
            self.queued.remove(&tool_id);
        }

        if let Some(identity) = self.identity.clone() {
            effects.push(FavoritesEffect::Refetch { identity });
        }
        effects
    }

    /// Apply an authoritative id set.
    ///
    /// Dropped when the identity no longer matches, and deferred while any
    /// mutation is unsettled: an old snapshot must not resurrect state the
    /// in-flight mutation is about to change. The next settlement schedules
    /// a fresh fetch.
    pub fn apply_fetch(&mut self, outcome: FetchOutcome) {
        if self.identity.as_deref() != Some(outcome.identity.as_str()) {
            tracing::debug!("dropping favorites fetch for a different identity");
            return;
        }
        if !self.active.is_empty() {
            tracing::debug!("deferring authoritative favorites; mutations still pending");
            return;
        }

        match outcome.result {
            Ok(ids) => {
                self.set = ids.into_iter().collect();
                self.phase = FavoritesPhase::Hydrated;
            }
            Err(message) => {
                tracing::warn!(%message, "favorites fetch failed");
                // Leave the optimistic set in place; mark hydration done so
                // the UI is not stuck in a loading state.
                self.phase = FavoritesPhase::Hydrated;
            }
        }
    }
}
