//! Single-screen task list built on the reducer/store architecture.
//!
//! - Domain model: tasks in insertion order, each with a unique id
//! - Reducer: add, complete (one-directional), delete; unknown ids are no-ops
//! - View: an add input and item rows wired to a store by a root [`Screen`]
//! - Host: a line-oriented terminal surface
//!
//! # Quick Start
//!
//! ```
//! use tasklist::{ScreenConfig, Screen, TaskEnvironment, TerminalSurface};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let surface = TerminalSurface::new(Vec::new());
//! let mut screen = Screen::mount(TaskEnvironment::production(), surface, ScreenConfig::default())?;
//!
//! screen.add_input().submit("buy milk")?;
//! screen.refresh()?;
//!
//! if let Some(mut row) = screen.row_at(0) {
//!     row.toggle();
//! }
//! screen.refresh()?;
//!
//! assert_eq!(screen.snapshot().completed_count(), 1);
//!
//! let output = screen.unmount().into_inner();
//! assert!(String::from_utf8(output)?.ends_with("1. [x] buy milk\n"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod config;
pub mod reducer;
pub mod terminal;
pub mod types;
pub mod view;

// Re-export commonly used types
pub use config::{ScreenConfig, TitlePolicy};
pub use reducer::{TaskEnvironment, TaskReducer};
pub use terminal::{Command, CommandError, TerminalSurface};
pub use types::{Task, TaskAction, TaskId, TaskList};
pub use view::{AddInput, InputError, Screen, Surface, TaskRow, TaskStore};
