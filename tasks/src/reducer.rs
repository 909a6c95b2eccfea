//! Reducer logic for the task list.
//!
//! All three operations are total: an id that matches nothing leaves the
//! list unchanged. The reducer never rejects a title; title policy belongs
//! to the add input.

use crate::types::{Task, TaskAction, TaskId, TaskList};
use std::sync::Arc;
use tasklist_core::{
    SmallVec, effect::Effect, environment::IdGenerator, environment::UuidGenerator,
    reducer::Reducer,
};

/// Draws from the injected generator before falling back to random ids
pub const MAX_ID_DRAWS: usize = 8;

/// Environment dependencies for the task reducer
#[derive(Clone)]
pub struct TaskEnvironment {
    /// Source of fresh task ids
    pub ids: Arc<dyn IdGenerator>,
}

impl TaskEnvironment {
    /// Creates a new `TaskEnvironment`
    #[must_use]
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Environment backed by random UUIDs
    #[must_use]
    pub fn production() -> Self {
        Self::new(Arc::new(UuidGenerator))
    }
}

impl std::fmt::Debug for TaskEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskEnvironment").finish_non_exhaustive()
    }
}

/// Reducer for the task list
#[derive(Clone, Debug, Default)]
pub struct TaskReducer;

impl TaskReducer {
    /// Creates a new `TaskReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draws ids until one is not already in the list
    ///
    /// After [`MAX_ID_DRAWS`] collisions the injected generator is abandoned
    /// for random UUIDs, so `Add` terminates whatever generator is injected.
    fn fresh_id(state: &TaskList, env: &TaskEnvironment) -> TaskId {
        for _ in 0..MAX_ID_DRAWS {
            let id = TaskId::from_uuid(env.ids.next_id());
            if !state.contains(&id) {
                return id;
            }
            tracing::warn!(%id, "Generated task id already in use, drawing again");
        }

        tracing::warn!(draws = MAX_ID_DRAWS, "Id generator keeps colliding, using random ids");
        loop {
            let id = TaskId::from_uuid(UuidGenerator.next_id());
            if !state.contains(&id) {
                return id;
            }
        }
    }
}

impl Reducer for TaskReducer {
    type State = TaskList;
    type Action = TaskAction;
    type Environment = TaskEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TaskAction::Add { title } => {
                let id = Self::fresh_id(state, env);
                tracing::debug!(%id, "Task added");
                state.push(Task::new(id, title));
            },
            TaskAction::Toggle { id } => {
                if state.complete(&id) {
                    tracing::debug!(%id, "Task completed");
                } else {
                    tracing::trace!(%id, "Toggle ignored, task unknown or already completed");
                }
            },
            TaskAction::Delete { id } => {
                if state.remove(&id) {
                    tracing::debug!(%id, "Task deleted");
                } else {
                    tracing::trace!(%id, "Delete for unknown task ignored");
                }
            },
        }

        SmallVec::new()
    }
}
