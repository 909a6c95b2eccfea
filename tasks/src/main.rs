//! Interactive terminal task list.
//!
//! Reads one command per line from stdin and renders the list to stdout
//! after every change. Logs go to stderr; set `RUST_LOG` to see them.

use anyhow::Context;
use std::io::{self, BufRead};
use tasklist::terminal::{self, HELP};
use tasklist::{Command, Screen, ScreenConfig, TaskEnvironment, TerminalSurface};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tasklist=info,tasklist_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut surface = TerminalSurface::new(io::stdout());
    surface.message(HELP)?;

    let mut screen = Screen::mount(TaskEnvironment::production(), surface, ScreenConfig::default())
        .context("initial render failed")?;
    tracing::info!("Task screen ready");

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                tracing::debug!(%error, "Unparseable command");
                screen.surface_mut().message(error)?;
                continue;
            },
        };

        if !terminal::apply(&mut screen, command)? {
            break;
        }
    }

    screen.unmount();
    tracing::info!("Task screen closed");
    Ok(())
}
