//! Entry point for snakebar.
//!
//! Responsibilities here are intentionally minimal:
//! - Parse the optional config path argument.
//! - Load configuration from `conf/config.toml`.
//! - Restore the cached session, if any.
//! - Launch the GUI application.

mod app;
mod cache;
mod choreography;
mod config;
mod content;
mod layout;
mod markers;
mod scheduler;
mod visibility;

use crate::app::run_app;
use crate::config::load_config;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

type ReloadHandle = reload::Handle<EnvFilter, tracing_subscriber::Registry>;

static SIGINT_REQUESTED: AtomicBool = AtomicBool::new(false);

/// Consume a pending interrupt request, if one arrived since the last poll.
pub(crate) fn take_sigint_requested() -> bool {
    SIGINT_REQUESTED.swap(false, Ordering::AcqRel)
}

fn main() {
    let reload_handle = init_tracing();
    if let Err(err) = run(&reload_handle) {
        error!("{err:?}");
        std::process::exit(1);
    }
}

fn run(reload_handle: &ReloadHandle) -> Result<()> {
    let config_path = parse_args();
    let config = load_config(&config_path);
    set_log_level(reload_handle, config.log_level.as_filter_str());
    install_interrupt_handler();

    let session = cache::load_session();
    if let Some(session) = &session {
        info!(
            section = session.active_section,
            "Resuming from cached session"
        );
    }
    info!(
        sections = content::SECTION_COUNT,
        markers = markers::MARKER_COUNT,
        level = %config.log_level,
        "Starting snakebar"
    );

    run_app(config, session).context("Failed to start the GUI")?;
    Ok(())
}

fn parse_args() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("conf/config.toml"))
}

fn install_interrupt_handler() {
    if let Err(err) = ctrlc::set_handler(|| SIGINT_REQUESTED.store(true, Ordering::Release)) {
        warn!("Failed to install interrupt handler: {err}");
    }
}

fn init_tracing() -> ReloadHandle {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let (filter_layer, handle) = reload::Layer::new(env_filter);
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_filter(filter_layer),
        )
        .init();
    handle
}

fn set_log_level(handle: &ReloadHandle, level: &str) {
    let parsed = EnvFilter::builder()
        .parse(level)
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    if let Err(err) = handle.modify(|filter| *filter = parsed.clone()) {
        warn!(%level, "Failed to update log level from config: {err}");
    } else {
        info!(%level, "Applied log level from config");
    }
}
