//! # Tasklist Runtime
//!
//! Runtime implementation for the task list.
//!
//! This crate provides the [`Store`] that owns the current state snapshot,
//! coordinates reducer execution and interprets effect descriptions.
//!
//! ## Core Components
//!
//! - **Store**: Owns the snapshot, runs the reducer, installs new snapshots
//! - **Snapshot cell**: A `tokio::sync::watch` channel observers subscribe to
//! - **Feedback loop**: `Effect::Send` actions are reduced before installation
//!
//! Everything runs synchronously on the caller's thread. A `send` either
//! installs one complete new snapshot or leaves the current one untouched.
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething)?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field);
//! ```

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tasklist_core::{effect::Effect, reducer::Reducer};
use tokio::sync::watch;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store has been closed and is not accepting new actions
        ///
        /// Returned by `send()` after `close()` was called, typically because
        /// the owning screen was unmounted.
        #[error("Store is closed")]
        Closed,

        /// Effects kept feeding actions back past the configured limit
        ///
        /// Nothing is installed when this is returned; the snapshot that was
        /// current before the `send()` stays current.
        #[error("Feedback limit of {limit} actions exceeded")]
        FeedbackLimitExceeded {
            /// The configured `max_feedback_actions`
            limit: usize,
        },
    }
}

pub use error::StoreError;

/// Configuration for Store behavior
///
/// # Example
///
/// ```
/// use tasklist_runtime::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_name("tasks")
///     .with_max_feedback_actions(8);
/// assert_eq!(config.max_feedback_actions, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Name recorded on tracing spans for this store
    pub name: String,
    /// Maximum number of actions effects may feed back during a single `send`
    pub max_feedback_actions: usize,
}

impl StoreConfig {
    /// Create a new configuration with custom values
    #[must_use]
    pub fn new(name: impl Into<String>, max_feedback_actions: usize) -> Self {
        Self {
            name: name.into(),
            max_feedback_actions,
        }
    }

    /// Set the store name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the feedback action limit
    #[must_use]
    pub const fn with_max_feedback_actions(mut self, limit: usize) -> Self {
        self.max_feedback_actions = limit;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            name: "store".to_string(),
            max_feedback_actions: 64,
        }
    }
}

/// Store module - The runtime for reducers
pub mod store {
    use super::{
        Arc, AtomicBool, AtomicU64, Effect, Ordering, Reducer, StoreConfig, StoreError, VecDeque,
        watch,
    };

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (an `Arc` snapshot published through a watch cell)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with synchronous feedback)
    ///
    /// Snapshots are never mutated after publication. Each `send` reduces a
    /// clone of the current snapshot and, if the result differs by value,
    /// installs it as a fresh `Arc`.
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        snapshot: watch::Sender<Arc<S>>,
        reducer: R,
        environment: E,
        config: StoreConfig,
        closed: AtomicBool,
        revision: AtomicU64,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
        S: Clone + PartialEq,
        A: std::fmt::Debug,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self::with_config(initial_state, reducer, environment, StoreConfig::default())
        }

        /// Create a new store with custom configuration
        #[must_use]
        pub fn with_config(initial_state: S, reducer: R, environment: E, config: StoreConfig) -> Self {
            let (snapshot, _) = watch::channel(Arc::new(initial_state));

            Self {
                snapshot,
                reducer,
                environment,
                config,
                closed: AtomicBool::new(false),
                revision: AtomicU64::new(0),
            }
        }

        /// Send an action to the store
        ///
        /// Runs the reducer on a working copy of the current snapshot, executes
        /// the returned effects (reducing any fed-back actions in order) and
        /// installs the result. Returns `true` if a new snapshot was installed,
        /// `false` if the result was equal to the current snapshot.
        ///
        /// # Errors
        ///
        /// - [`StoreError::Closed`]: the store has been closed
        /// - [`StoreError::FeedbackLimitExceeded`]: effects fed back more than
        ///   `max_feedback_actions` actions; the current snapshot is kept
        #[tracing::instrument(skip(self, action), fields(store = %self.config.name), name = "store_send")]
        pub fn send(&self, action: A) -> Result<bool, StoreError> {
            if self.is_closed() {
                tracing::warn!(?action, "Rejected action: store is closed");
                metrics::counter!("store.actions.rejected").increment(1);
                return Err(StoreError::Closed);
            }

            tracing::debug!(?action, "Processing action");
            metrics::counter!("store.actions.total").increment(1);

            let current = self.snapshot();
            let mut working = S::clone(&current);
            let mut pending = VecDeque::new();

            self.reduce(&mut working, action, &mut pending);

            let mut budget = self.config.max_feedback_actions;
            while let Some(feedback) = pending.pop_front() {
                if budget == 0 {
                    tracing::warn!(
                        limit = self.config.max_feedback_actions,
                        "Feedback limit exceeded, discarding working state"
                    );
                    metrics::counter!("store.actions.rejected").increment(1);
                    return Err(StoreError::FeedbackLimitExceeded {
                        limit: self.config.max_feedback_actions,
                    });
                }
                budget -= 1;
                tracing::trace!(action = ?feedback, "Reducing fed-back action");
                self.reduce(&mut working, feedback, &mut pending);
            }

            if working == *current {
                tracing::trace!("State unchanged, keeping current snapshot");
                return Ok(false);
            }

            self.snapshot.send_replace(Arc::new(working));
            let revision = self.revision.fetch_add(1, Ordering::AcqRel) + 1;
            metrics::counter!("store.snapshots.installed").increment(1);
            tracing::debug!(revision, "Installed new snapshot");

            Ok(true)
        }

        fn reduce(&self, state: &mut S, action: A, pending: &mut VecDeque<A>) {
            let span = tracing::trace_span!("reducer_execution");
            let _enter = span.enter();

            let effects = self.reducer.reduce(state, action, &self.environment);
            tracing::trace!("Reducer completed, returned {} effects", effects.len());

            for effect in effects {
                Self::collect(effect, pending);
            }
        }

        fn collect(effect: Effect<A>, pending: &mut VecDeque<A>) {
            match effect {
                Effect::None => {},
                Effect::Send(action) => pending.push_back(*action),
                Effect::Sequential(effects) => {
                    for effect in effects {
                        Self::collect(effect, pending);
                    }
                },
            }
        }
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        /// Read current state via a closure
        ///
        /// ```ignore
        /// let count = store.state(|s| s.len());
        /// ```
        pub fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            f(&**self.snapshot.borrow())
        }

        /// The current snapshot
        #[must_use]
        pub fn snapshot(&self) -> Arc<S> {
            self.snapshot.borrow().clone()
        }

        /// Subscribe to snapshot changes
        ///
        /// The returned receiver treats the current snapshot as already seen;
        /// `has_changed()` turns true after the next installation.
        #[must_use]
        pub fn subscribe(&self) -> watch::Receiver<Arc<S>> {
            self.snapshot.subscribe()
        }

        /// Number of snapshots installed since creation
        #[must_use]
        pub fn revision(&self) -> u64 {
            self.revision.load(Ordering::Acquire)
        }

        /// Stop accepting actions
        ///
        /// The last snapshot stays readable.
        pub fn close(&self) {
            if !self.closed.swap(true, Ordering::AcqRel) {
                tracing::debug!(store = %self.config.name, "Store closed");
            }
        }

        /// Returns `true` once `close()` has been called
        #[must_use]
        pub fn is_closed(&self) -> bool {
            self.closed.load(Ordering::Acquire)
        }

        /// The store configuration
        #[must_use]
        pub const fn config(&self) -> &StoreConfig {
            &self.config
        }
    }
}

pub use store::Store;
