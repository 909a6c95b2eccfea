//! View layer: the collaborators and the root composition.
//!
//! [`AddInput`] and [`TaskRow`] are pure event sources. They hold plain
//! closures and know nothing about the store. [`Screen`] owns the store,
//! hands out collaborators wired to it, and re-renders its [`Surface`]
//! whenever the store installs a new snapshot.

use crate::config::{ScreenConfig, TitlePolicy};
use crate::reducer::{TaskEnvironment, TaskReducer};
use crate::types::{Task, TaskAction, TaskId, TaskList};
use std::sync::Arc;
use tasklist_runtime::Store;
use thiserror::Error;
use tokio::sync::watch;

/// The store backing a task screen
pub type TaskStore = Store<TaskList, TaskAction, TaskEnvironment, TaskReducer>;

/// Titles refused by the add input's [`TitlePolicy`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Title was empty
    #[error("Task title cannot be empty")]
    EmptyTitle,

    /// Title exceeded the configured maximum
    #[error("Task title too long ({actual} characters, max {max})")]
    TooLong {
        /// Configured maximum
        max: usize,
        /// Length of the submitted title
        actual: usize,
    },
}

/// Collects a title and hands it to the add callback
pub struct AddInput<F>
where
    F: FnMut(String),
{
    policy: TitlePolicy,
    on_add: F,
}

impl<F> AddInput<F>
where
    F: FnMut(String),
{
    /// Creates an input that applies `policy` before calling `on_add`
    pub const fn new(policy: TitlePolicy, on_add: F) -> Self {
        Self { policy, on_add }
    }

    /// Submit what the user typed
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] when the policy refuses the title; the
    /// callback is not invoked in that case.
    pub fn submit(&mut self, raw: &str) -> Result<(), InputError> {
        let title = if self.policy.trim { raw.trim() } else { raw };

        if self.policy.reject_empty && title.is_empty() {
            return Err(InputError::EmptyTitle);
        }

        if let Some(max) = self.policy.max_chars {
            let actual = title.chars().count();
            if actual > max {
                return Err(InputError::TooLong { max, actual });
            }
        }

        (self.on_add)(title.to_string());
        Ok(())
    }
}

/// Renders one task and reports toggle/delete requests with its id
pub struct TaskRow<'a, T, D>
where
    T: FnMut(&TaskId),
    D: FnMut(&TaskId),
{
    task: &'a Task,
    on_toggle: T,
    on_delete: D,
}

impl<'a, T, D> TaskRow<'a, T, D>
where
    T: FnMut(&TaskId),
    D: FnMut(&TaskId),
{
    /// Creates a row for `task`
    pub const fn new(task: &'a Task, on_toggle: T, on_delete: D) -> Self {
        Self {
            task,
            on_toggle,
            on_delete,
        }
    }

    /// The task this row shows
    #[must_use]
    pub const fn task(&self) -> &'a Task {
        self.task
    }

    /// Row identity
    #[must_use]
    pub const fn key(&self) -> &'a TaskId {
        &self.task.id
    }

    /// Checkbox plus title, e.g. `[x] buy milk`
    #[must_use]
    pub fn label(&self) -> String {
        let mark = if self.task.completed { 'x' } else { ' ' };
        format!("[{mark}] {}", self.task.title)
    }

    /// User asked to complete this task
    pub fn toggle(&mut self) {
        (self.on_toggle)(&self.task.id);
    }

    /// User asked to delete this task
    pub fn delete(&mut self) {
        (self.on_delete)(&self.task.id);
    }
}

/// Host rendering surface
pub trait Surface {
    /// Error raised while rendering
    type Error: std::error::Error + Send + Sync + 'static;

    /// Display the full list
    ///
    /// # Errors
    ///
    /// Implementation defined.
    fn render(&mut self, tasks: &TaskList) -> Result<(), Self::Error>;
}

fn dispatch(store: &TaskStore, action: TaskAction) {
    if let Err(error) = store.send(action) {
        tracing::warn!(%error, "Task action rejected");
    }
}

fn on_toggle(store: &TaskStore) -> impl FnMut(&TaskId) + '_ {
    move |id: &TaskId| dispatch(store, TaskAction::toggle(id))
}

fn on_delete(store: &TaskStore) -> impl FnMut(&TaskId) + '_ {
    move |id: &TaskId| dispatch(store, TaskAction::delete(id))
}

/// Root composition for the task screen
///
/// Lives from [`mount`](Self::mount) to [`unmount`](Self::unmount). The
/// snapshot it renders only changes in [`refresh`](Self::refresh), so rows
/// handed out before a refresh keep showing the tasks they were built from.
pub struct Screen<Sf>
where
    Sf: Surface,
{
    store: TaskStore,
    updates: watch::Receiver<Arc<TaskList>>,
    current: Arc<TaskList>,
    surface: Sf,
    title_policy: TitlePolicy,
}

impl<Sf> Screen<Sf>
where
    Sf: Surface,
{
    /// Create the store with an empty list and render it
    ///
    /// # Errors
    ///
    /// Returns the surface error if the initial render fails.
    pub fn mount(
        environment: TaskEnvironment,
        mut surface: Sf,
        config: ScreenConfig,
    ) -> Result<Self, Sf::Error> {
        let store = Store::with_config(TaskList::new(), TaskReducer::new(), environment, config.store);
        let updates = store.subscribe();
        let current = store.snapshot();

        surface.render(&current)?;
        tracing::debug!("Screen mounted");

        Ok(Self {
            store,
            updates,
            current,
            surface,
            title_policy: config.title_policy,
        })
    }

    /// An add input wired to this screen's store
    pub fn add_input(&self) -> AddInput<impl FnMut(String) + '_> {
        let store = &self.store;
        AddInput::new(self.title_policy, move |title: String| {
            dispatch(store, TaskAction::Add { title });
        })
    }

    /// Rows for the rendered snapshot, in display order
    pub fn rows(
        &self,
    ) -> impl Iterator<Item = TaskRow<'_, impl FnMut(&TaskId) + '_, impl FnMut(&TaskId) + '_>> + '_
    {
        self.current
            .iter()
            .map(move |task| TaskRow::new(task, on_toggle(&self.store), on_delete(&self.store)))
    }

    /// Row for the task with `id`, if it is in the rendered snapshot
    pub fn row<'a>(
        &'a self,
        id: &TaskId,
    ) -> Option<TaskRow<'a, impl FnMut(&TaskId) + use<'a, Sf>, impl FnMut(&TaskId) + use<'a, Sf>>>
    {
        self.current
            .get(id)
            .map(|task| TaskRow::new(task, on_toggle(&self.store), on_delete(&self.store)))
    }

    /// Row at a zero-based display position
    pub fn row_at(
        &self,
        index: usize,
    ) -> Option<TaskRow<'_, impl FnMut(&TaskId) + '_, impl FnMut(&TaskId) + '_>> {
        self.current
            .as_slice()
            .get(index)
            .map(|task| TaskRow::new(task, on_toggle(&self.store), on_delete(&self.store)))
    }

    /// Adopt and render the latest snapshot if it changed
    ///
    /// Returns `true` if the surface was re-rendered.
    ///
    /// # Errors
    ///
    /// Returns the surface error if rendering fails. The new snapshot is
    /// adopted regardless.
    pub fn refresh(&mut self) -> Result<bool, Sf::Error> {
        if !self.updates.has_changed().unwrap_or(false) {
            return Ok(false);
        }

        self.current = self.updates.borrow_and_update().clone();
        tracing::trace!(tasks = self.current.len(), "Rendering snapshot");
        self.surface.render(&self.current)?;
        Ok(true)
    }

    /// Render the current snapshot again, changed or not
    ///
    /// # Errors
    ///
    /// Returns the surface error if rendering fails.
    pub fn redraw(&mut self) -> Result<(), Sf::Error> {
        self.surface.render(&self.current)
    }

    /// The snapshot last rendered
    #[must_use]
    pub const fn snapshot(&self) -> &Arc<TaskList> {
        &self.current
    }

    /// The backing store
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// The rendering surface
    #[must_use]
    pub const fn surface(&self) -> &Sf {
        &self.surface
    }

    /// The rendering surface, for output outside the list
    pub const fn surface_mut(&mut self) -> &mut Sf {
        &mut self.surface
    }

    /// Tear the screen down and hand back the surface
    pub fn unmount(self) -> Sf {
        self.store.close();
        tracing::debug!(tasks = self.current.len(), "Screen unmounted");
        self.surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use tasklist_runtime::StoreConfig;
    use tasklist_testing::{SequentialIdGenerator, test_ids};

    #[derive(Default)]
    struct RecordingSurface {
        frames: Vec<Vec<Task>>,
    }

    impl Surface for RecordingSurface {
        type Error = Infallible;

        fn render(&mut self, tasks: &TaskList) -> Result<(), Infallible> {
            self.frames.push(tasks.as_slice().to_vec());
            Ok(())
        }
    }

    fn mount() -> Screen<RecordingSurface> {
        let Ok(screen) = Screen::mount(
            TaskEnvironment::new(test_ids()),
            RecordingSurface::default(),
            ScreenConfig::default(),
        );
        screen
    }

    fn id(n: u64) -> TaskId {
        TaskId::from_uuid(SequentialIdGenerator::nth(n))
    }

    fn add(screen: &mut Screen<RecordingSurface>, title: &str) {
        assert_eq!(screen.add_input().submit(title), Ok(()));
        assert_eq!(screen.refresh(), Ok(true));
    }

    #[test]
    fn mount_renders_empty_list() {
        let screen = mount();
        assert_eq!(screen.surface().frames, vec![Vec::<Task>::new()]);
        assert!(screen.snapshot().is_empty());
    }

    #[test]
    fn mount_uses_configured_store() {
        let screen = mount();
        assert_eq!(screen.store().config().name, "tasks");
        assert_eq!(screen.store().config().max_feedback_actions, 64);

        let config = ScreenConfig::default().with_store(StoreConfig::default().with_name("inbox"));
        let Ok(screen) = Screen::mount(TaskEnvironment::new(test_ids()), RecordingSurface::default(), config);
        assert_eq!(screen.store().config().name, "inbox");
    }

    #[test]
    fn add_input_trims_and_dispatches() {
        let mut screen = mount();
        add(&mut screen, "  buy milk  ");

        assert_eq!(screen.snapshot().as_slice()[0].title, "buy milk");
        assert_eq!(screen.surface().frames.len(), 2);
    }

    #[test]
    fn add_input_policy_rejections_do_not_dispatch() {
        let policy = TitlePolicy::default().with_max_chars(Some(3));
        let mut submitted = Vec::new();
        let mut input = AddInput::new(policy, |title: String| submitted.push(title));

        assert_eq!(input.submit("   "), Err(InputError::EmptyTitle));
        assert_eq!(input.submit("four"), Err(InputError::TooLong { max: 3, actual: 4 }));
        assert_eq!(input.submit(" abc "), Ok(()));
        drop(input);

        assert_eq!(submitted, vec!["abc".to_string()]);
    }

    #[test]
    fn accept_all_policy_passes_titles_through() {
        let mut submitted = Vec::new();
        let mut input = AddInput::new(TitlePolicy::accept_all(), |title: String| submitted.push(title));

        assert_eq!(input.submit(""), Ok(()));
        assert_eq!(input.submit("  x "), Ok(()));
        drop(input);

        assert_eq!(submitted, vec![String::new(), "  x ".to_string()]);
    }

    #[test]
    fn too_long_counts_characters_not_bytes() {
        let policy = TitlePolicy::default().with_max_chars(Some(2));
        let mut input = AddInput::new(policy, |_: String| {});
        assert_eq!(input.submit("éé"), Ok(()));
    }

    #[test]
    fn row_callbacks_receive_task_id() {
        let task = Task::new(id(0), "buy milk".to_string());
        let mut toggled = Vec::new();
        let mut deleted = Vec::new();

        let mut row = TaskRow::new(&task, |id: &TaskId| toggled.push(id.clone()), |id: &TaskId| {
            deleted.push(id.clone());
        });
        assert_eq!(row.label(), "[ ] buy milk");
        assert_eq!(row.key(), &id(0));
        row.toggle();
        row.delete();
        drop(row);

        assert_eq!(toggled, vec![id(0)]);
        assert_eq!(deleted, vec![id(0)]);
    }

    #[test]
    fn toggle_row_rerenders_with_completed_task() {
        let mut screen = mount();
        add(&mut screen, "buy milk");

        if let Some(mut row) = screen.row_at(0) {
            row.toggle();
        }
        assert_eq!(screen.refresh(), Ok(true));

        let first = id(0);
        let row = screen.row(&first);
        assert_eq!(row.map(|r| r.label()), Some("[x] buy milk".to_string()));
    }

    #[test]
    fn toggling_completed_task_does_not_rerender() {
        let mut screen = mount();
        add(&mut screen, "buy milk");
        if let Some(mut row) = screen.row_at(0) {
            row.toggle();
        }
        assert_eq!(screen.refresh(), Ok(true));
        let frames = screen.surface().frames.len();

        if let Some(mut row) = screen.row_at(0) {
            row.toggle();
        }

        assert_eq!(screen.refresh(), Ok(false));
        assert_eq!(screen.surface().frames.len(), frames);
    }

    #[test]
    fn delete_row_removes_task() {
        let mut screen = mount();
        add(&mut screen, "buy milk");
        add(&mut screen, "call mom");

        let second = id(1);
        if let Some(mut row) = screen.row(&second) {
            row.delete();
        }
        assert_eq!(screen.refresh(), Ok(true));

        let titles: Vec<_> = screen.rows().map(|r| r.task().title.clone()).collect();
        assert_eq!(titles, vec!["buy milk".to_string()]);
    }

    #[test]
    fn rows_keyed_by_id_in_display_order() {
        let mut screen = mount();
        add(&mut screen, "a");
        add(&mut screen, "b");

        let keys: Vec<_> = screen.rows().map(|r| r.key().clone()).collect();
        assert_eq!(keys, vec![id(0), id(1)]);
    }

    #[test]
    fn snapshot_only_changes_on_refresh() {
        let mut screen = mount();
        let before = Arc::clone(screen.snapshot());

        assert_eq!(screen.add_input().submit("a"), Ok(()));
        assert!(Arc::ptr_eq(&before, screen.snapshot()));
        assert_eq!(screen.store().state(TaskList::len), 1);

        assert_eq!(screen.refresh(), Ok(true));
        assert!(!Arc::ptr_eq(&before, screen.snapshot()));
        assert_eq!(before.len(), 0);
    }

    #[test]
    fn redraw_renders_unchanged_snapshot() {
        let mut screen = mount();
        assert_eq!(screen.redraw(), Ok(()));
        assert_eq!(screen.surface().frames.len(), 2);
    }

    #[test]
    fn unmount_returns_surface_with_all_frames() {
        let mut screen = mount();
        add(&mut screen, "a");

        let surface = screen.unmount();
        assert_eq!(surface.frames.len(), 2);
        assert_eq!(surface.frames[1][0].title, "a");
    }
}
