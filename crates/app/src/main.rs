//! Keepmap - terminal dungeon map editor
//!
//! Main editor binary

use anyhow::Context;
use keepmap_config::{EditorConfig, DEFAULT_CONFIG_PATH};
use keepmap_editor::{EditSession, Layout, TerminalUi};
use keepmap_levels::{LevelLoader, MapContainer, FIRST_LEVEL};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Logging goes to a file, so read the config before anything else
    let (config, config_error) = match EditorConfig::load_default() {
        Ok(config) => (config, None),
        Err(e) => (EditorConfig::default(), Some(e.to_string())),
    };

    init_logging(&config)?;

    info!("Keepmap starting up...");
    if let Some(e) = config_error {
        warn!("Failed to load {}: {}", DEFAULT_CONFIG_PATH, e);
        warn!("   Using default configuration");
    }
    config.display();

    let (columns, rows) = crossterm::terminal::size().context("reading terminal size")?;
    let (height, width) = Layout::from_size(columns, rows).grid_size();
    let map = initial_map(&config, height, width)?;

    let ui = TerminalUi::new(FIRST_LEVEL, config.mouse).context("setting up terminal")?;
    let mut session = EditSession::new(map, ui, config.map_file.clone());

    // The terminal is restored when the session (and its UI) is dropped
    let result = session.run();
    drop(session);

    match result {
        Ok(()) => {
            info!("Keepmap shutting down");
            Ok(())
        }
        Err(e) => {
            error!("Editor error: {}", e);
            Err(e).context("editor session failed")
        }
    }
}

fn init_logging(config: &EditorConfig) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

/// Blank level sized to the terminal, or the saved map when asked to load it
fn initial_map(config: &EditorConfig, height: usize, width: usize) -> anyhow::Result<MapContainer> {
    if config.load_on_start && config.map_file.exists() {
        let map = LevelLoader::load_file(&config.map_file)
            .with_context(|| format!("loading {}", config.map_file.display()))?;
        return Ok(map);
    }

    info!("Starting blank {}x{} level", width, height);
    Ok(MapContainer::new(height, width))
}
