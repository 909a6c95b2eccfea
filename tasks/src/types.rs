//! Domain types for the task list.
//!
//! A task list is an ordered collection of tasks that can be added,
//! completed, and deleted. Order is insertion order.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a task
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a `TaskId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// A single task
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Title as entered by the user
    pub title: String,
    /// Whether the task is completed
    pub completed: bool,
}

impl Task {
    /// Creates a new, not yet completed task
    #[must_use]
    pub const fn new(id: TaskId, title: String) -> Self {
        Self {
            id,
            title,
            completed: false,
        }
    }

    /// Returns a copy of this task marked completed
    #[must_use]
    pub fn completed(&self) -> Self {
        Self {
            completed: true,
            ..self.clone()
        }
    }
}

/// State of the task list
///
/// Tasks are kept in insertion order. Ids are unique within a list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Creates a new empty task list
    #[must_use]
    pub const fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Number of tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns `true` if there are no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of completed tasks
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Number of tasks not yet completed
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.len() - self.completed_count()
    }

    /// Tasks in display order
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Tasks as a slice
    #[must_use]
    pub fn as_slice(&self) -> &[Task] {
        &self.tasks
    }

    /// Returns a task by ID
    #[must_use]
    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Returns the display position of a task
    #[must_use]
    pub fn position(&self, id: &TaskId) -> Option<usize> {
        self.tasks.iter().position(|t| &t.id == id)
    }

    /// Checks if a task exists
    #[must_use]
    pub fn contains(&self, id: &TaskId) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn push(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Marks the task completed; `true` only if it was pending
    pub(crate) fn complete(&mut self, id: &TaskId) -> bool {
        if !self.get(id).is_some_and(|t| !t.completed) {
            return false;
        }
        self.tasks = self
            .tasks
            .iter()
            .map(|t| if &t.id == id { t.completed() } else { t.clone() })
            .collect();
        true
    }

    pub(crate) fn remove(&mut self, id: &TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| &t.id != id);
        self.tasks.len() != before
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

impl FromIterator<Task> for TaskList {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        Self {
            tasks: iter.into_iter().collect(),
        }
    }
}

/// Actions the task list accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskAction {
    /// Append a new task with a fresh id
    Add {
        /// Title of the task
        title: String,
    },

    /// Mark a task completed (one-directional)
    Toggle {
        /// Task to complete
        id: TaskId,
    },

    /// Remove a task
    Delete {
        /// Task to delete
        id: TaskId,
    },
}

impl TaskAction {
    /// Shorthand for [`TaskAction::Add`]
    #[must_use]
    pub fn add(title: impl Into<String>) -> Self {
        Self::Add {
            title: title.into(),
        }
    }

    /// Shorthand for [`TaskAction::Toggle`]
    #[must_use]
    pub fn toggle(id: &TaskId) -> Self {
        Self::Toggle { id: id.clone() }
    }

    /// Shorthand for [`TaskAction::Delete`]
    #[must_use]
    pub fn delete(id: &TaskId) -> Self {
        Self::Delete { id: id.clone() }
    }
}
