//! # Tasklist Testing
//!
//! Testing utilities and helpers for the task list.
//!
//! This crate provides:
//! - Deterministic implementations of Environment traits
//! - A Given-When-Then harness for reducers ([`ReducerTest`])
//! - Assertion helpers for effects
//! - Property-based testing strategies
//!
//! ## Example
//!
//! ```ignore
//! use tasklist_testing::{ReducerTest, assertions, test_ids};
//!
//! ReducerTest::new(TaskReducer::new())
//!     .with_env(TaskEnvironment::new(test_ids()))
//!     .given_state(TaskList::new())
//!     .when_action(TaskAction::add("buy milk"))
//!     .then_state(|list| assert_eq!(list.len(), 1))
//!     .then_effects(assertions::assert_no_effects)
//!     .run();
//! ```

use std::sync::Arc;
use tasklist_core::environment::IdGenerator;
use uuid::Uuid;

/// Reducer test harness
pub mod reducer_test;

pub use reducer_test::{ReducerTest, assertions};

/// Deterministic implementations of Environment traits
pub mod mocks {
    use super::{Arc, IdGenerator, Uuid};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Sequential id generator for deterministic tests
    ///
    /// Produces `Uuid::from_u128(start)`, `Uuid::from_u128(start + 1)`, ...
    ///
    /// # Example
    ///
    /// ```
    /// use tasklist_testing::mocks::SequentialIdGenerator;
    /// use tasklist_core::environment::IdGenerator;
    /// use uuid::Uuid;
    ///
    /// let ids = SequentialIdGenerator::new(1);
    /// assert_eq!(ids.next_id(), Uuid::from_u128(1));
    /// assert_eq!(ids.next_id(), Uuid::from_u128(2));
    /// ```
    #[derive(Debug, Default)]
    pub struct SequentialIdGenerator {
        next: AtomicU64,
    }

    impl SequentialIdGenerator {
        /// Create a generator whose first id is `Uuid::from_u128(start)`
        #[must_use]
        pub const fn new(start: u64) -> Self {
            Self {
                next: AtomicU64::new(start),
            }
        }

        /// The id the given zero-based draw produced, for a generator started at 1
        #[must_use]
        pub fn nth(n: u64) -> Uuid {
            Uuid::from_u128(u128::from(n) + 1)
        }
    }

    impl IdGenerator for SequentialIdGenerator {
        fn next_id(&self) -> Uuid {
            Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::Relaxed)))
        }
    }

    /// Id generator replaying a fixed script, then falling back to a sequence
    ///
    /// Used to force collisions with ids already present in state.
    #[derive(Debug)]
    pub struct ScriptedIdGenerator {
        script: std::sync::Mutex<std::collections::VecDeque<Uuid>>,
        fallback: SequentialIdGenerator,
    }

    impl ScriptedIdGenerator {
        /// Replay `script` in order, then continue from `fallback_start`
        #[must_use]
        pub fn new(script: impl IntoIterator<Item = Uuid>, fallback_start: u64) -> Self {
            Self {
                script: std::sync::Mutex::new(script.into_iter().collect()),
                fallback: SequentialIdGenerator::new(fallback_start),
            }
        }
    }

    impl IdGenerator for ScriptedIdGenerator {
        fn next_id(&self) -> Uuid {
            let scripted = match self.script.lock() {
                Ok(mut script) => script.pop_front(),
                Err(poisoned) => poisoned.into_inner().pop_front(),
            };
            scripted.unwrap_or_else(|| self.fallback.next_id())
        }
    }

    /// Shared sequential generator starting at 1
    #[must_use]
    pub fn test_ids() -> Arc<dyn IdGenerator> {
        Arc::new(SequentialIdGenerator::new(1))
    }
}

/// Property-based testing strategies
pub mod properties {
    use proptest::prelude::*;

    /// Non-empty, printable task titles (no surrounding whitespace)
    pub fn title() -> impl Strategy<Value = String> {
        "[A-Za-z0-9]([A-Za-z0-9 ,.!?'-]{0,38}[A-Za-z0-9])?"
    }

    /// Any string a user could type, including empty and whitespace-only
    pub fn raw_title() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[ \t]{1,4}",
            title(),
            "\\PC{0,60}",
        ]
    }

    /// A sequence of titles of the given length range
    pub fn titles(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<String>> {
        proptest::collection::vec(title(), len)
    }
}

/// Install a test-friendly tracing subscriber
///
/// Honors `RUST_LOG`; safe to call from every test (only the first call wins).
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{ScriptedIdGenerator, SequentialIdGenerator, test_ids};
