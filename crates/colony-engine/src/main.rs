//! Driving loop binary for the colony controller.
//!
//! Wires the controller core to the simulated host room and runs the tick
//! loop. Each iteration executes one controller invocation, then advances
//! the world by one step, so all decisions in a tick observe the same
//! snapshot.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `colony.yaml`
//! 3. Load persisted colony memory, if configured
//! 4. Generate the simulated room from the seeded layout
//! 5. Run the tick loop
//! 6. Persist colony memory and log the result

mod error;

use std::path::Path;
use std::time::Duration;

use colony_core::config::ColonyConfig;
use colony_core::memory::ColonyMemory;
use colony_core::tick;
use colony_sim::{SimLayout, SimRoom};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point for the colony engine.
///
/// # Errors
///
/// Returns an error if configuration, memory persistence, or room
/// generation fails. The tick loop itself never fails.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("colony-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        target_population = config.controller.target_population,
        role = %config.controller.role,
        max_ticks = config.run.max_ticks,
        seed = config.run.seed,
        "Configuration loaded"
    );

    // 3. Load persisted colony memory.
    let mut memory = match config.run.memory_path.as_deref() {
        Some(path) => load_memory(path)?,
        None => ColonyMemory::new(),
    };
    info!(
        pending_commands = memory.spawn_queue.len(),
        agent_records = memory.agents.len(),
        "Colony memory ready"
    );

    // 4. Generate the simulated room.
    let layout = load_layout()?;
    let mut room = SimRoom::generate(config.run.seed, &layout)?;
    info!(
        width = layout.width,
        height = layout.height,
        facilities = layout.facilities,
        sources = layout.sources,
        energy = room.energy(),
        "Simulated room generated"
    );

    // 5. Run the tick loop.
    let interval = Duration::from_millis(config.run.tick_interval_ms);
    for current in 1..=config.run.max_ticks {
        let summary = tick::run_tick(&mut room, &mut memory, &config.controller, current);
        room.step();

        if summary.spawn.failures > 0 || summary.harvest.failures > 0 {
            warn!(
                tick = current,
                spawn_failures = summary.spawn.failures,
                harvest_failures = summary.harvest.failures,
                "tick completed with host rejections"
            );
        }

        if !interval.is_zero() {
            std::thread::sleep(interval);
        }
    }

    // 6. Persist colony memory.
    if let Some(path) = config.run.memory_path.as_deref() {
        save_memory(path, &memory)?;
        info!(path = %path.display(), "Colony memory persisted");
    }

    info!(
        ticks = config.run.max_ticks,
        agents = room.agent_count(),
        energy_remaining = room.energy(),
        pending_commands = memory.spawn_queue.len(),
        "colony-engine shutdown complete"
    );

    Ok(())
}

/// Load the main configuration from `colony.yaml`.
///
/// Looks for the config file relative to the current working directory;
/// an absent file yields defaults.
fn load_config() -> Result<ColonyConfig, EngineError> {
    let config_path = Path::new("colony.yaml");
    if config_path.exists() {
        Ok(ColonyConfig::from_file(config_path)?)
    } else {
        info!("Config file not found, using defaults");
        Ok(ColonyConfig::default())
    }
}

/// Load the room layout from the `sim` section of `colony.yaml`.
///
/// If the file does not exist or lacks the `sim` key, defaults are used.
fn load_layout() -> Result<SimLayout, EngineError> {
    let config_path = Path::new("colony.yaml");
    if !config_path.exists() {
        return Ok(SimLayout::default());
    }

    let contents =
        std::fs::read_to_string(config_path).map_err(|e| EngineError::Memory {
            path: config_path.to_path_buf(),
            message: format!("failed to read config file: {e}"),
        })?;

    // Parse the full YAML and extract just the "sim" section.
    let raw: serde_yml::Value = serde_yml::from_str(&contents)
        .map_err(colony_core::config::ConfigError::from)?;

    match raw.get("sim") {
        Some(sim_value) => serde_yml::from_value(sim_value.clone())
            .map_err(colony_core::config::ConfigError::from)
            .map_err(EngineError::from),
        None => Ok(SimLayout::default()),
    }
}

/// Load colony memory from a JSON file; an absent file yields empty memory.
fn load_memory(path: &Path) -> Result<ColonyMemory, EngineError> {
    if !path.exists() {
        info!(path = %path.display(), "Memory file not found, starting fresh");
        return Ok(ColonyMemory::new());
    }
    let contents = std::fs::read_to_string(path).map_err(|e| EngineError::Memory {
        path: path.to_path_buf(),
        message: format!("read failed: {e}"),
    })?;
    serde_json::from_str(&contents).map_err(|e| EngineError::Memory {
        path: path.to_path_buf(),
        message: format!("parse failed: {e}"),
    })
}

/// Persist colony memory to a JSON file.
fn save_memory(path: &Path, memory: &ColonyMemory) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(memory).map_err(|e| EngineError::Memory {
        path: path.to_path_buf(),
        message: format!("serialize failed: {e}"),
    })?;
    std::fs::write(path, json).map_err(|e| EngineError::Memory {
        path: path.to_path_buf(),
        message: format!("write failed: {e}"),
    })
}
