//! gridmark-win: an interactive grid canvas with persisted settings
//!
//! Positional arguments mirror the tool's original invocation:
//! `gridmark-win [grid-size] [storage-method]` where the method index picks
//! one of four storage backends (1 mapped view, 2 buffered handle, 3 typed
//! stream, 4 raw handle). Settings load at startup and save at shutdown
//! through the same backend.

mod app;
mod config;
mod domain;
mod platform;
mod ui;

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::config::{Settings, SettingsStore, StorageMethod};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let method = storage_method_from_args(&args);
    let store = SettingsStore::new(method);

    let mut settings = Settings::default();
    store.load(&mut settings);
    debug!(method = method.index(), ?settings, "settings loaded");

    // A command-line grid size overrides whatever the file carried.
    if let Some(grid_size) = grid_size_from_args(&args) {
        settings.grid_size = grid_size;
    }

    let mut ctx = AppContext::from_settings(&settings);
    run_shell(&mut ctx);

    let snapshot = ctx.snapshot_settings();
    if let Err(err) = store.save(&snapshot) {
        warn!(error = %err, "failed to save settings");
    }
}

fn grid_size_from_args(args: &[String]) -> Option<i32> {
    let raw = args.get(1)?;
    match raw.parse::<i32>() {
        Ok(size) if size > 0 => Some(size),
        _ => {
            warn!(argument = %raw, "invalid grid size, keeping loaded value");
            None
        }
    }
}

fn storage_method_from_args(args: &[String]) -> StorageMethod {
    let Some(raw) = args.get(2) else {
        return StorageMethod::default();
    };
    match raw.parse::<u32>().ok().and_then(StorageMethod::from_index) {
        Some(method) => method,
        None => {
            warn!(argument = %raw, "invalid storage method, using mapped view");
            StorageMethod::default()
        }
    }
}

#[cfg(windows)]
fn run_shell(ctx: &mut AppContext) {
    if let Err(err) = platform::window::run(ctx) {
        // Shell failures are the only fatal paths; settings still save below.
        warn!(error = %err, "window shell failed");
    }
}

#[cfg(not(windows))]
fn run_shell(ctx: &mut AppContext) {
    use crate::ui::{SceneLayout, SceneRenderer};
    use tracing::info;

    // No window shell off Windows; render a single frame so the pipeline is
    // exercised end to end, then fall through to the shutdown save.
    match SceneRenderer::new().render(&SceneLayout::from_context(ctx)) {
        Ok(pixmap) => info!(
            width = pixmap.width(),
            height = pixmap.height(),
            "rendered one headless frame; interactive shell requires Windows"
        ),
        Err(err) => warn!(error = %err, "headless rendering failed"),
    }
}
