//! Runs the feeding loop against a simulated bot that slowly starves.
//!
//! Environment:
//! - `AUTOEAT_CONFIG`: path to `autoeat.toml` (defaults apply if unset)
//! - `AUTOEAT_SIM_SECONDS`: how long to run (default 30)
//! - `RUST_LOG`: overrides `general.log_level`

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use autoeat_bot::bridge::NativeState;
use autoeat_bot::hooks::load_catalog;
use autoeat_bot::{SimulatedBot, on_spawn, ready_channel};
use autoeat_core::{Agent, AutoEatConfig};

const SPAWN_FRAME: &str = r#"{
    "food": 20,
    "slots": [
        {"name": "stone_pickaxe", "slot": 0},
        {"name": "cobblestone", "slot": 1, "count": 64},
        null,
        {"name": "cooked_beef", "slot": 3, "count": 3},
        {"name": "bread", "slot": 4, "count": 2}
    ]
}"#;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match std::env::var_os("AUTOEAT_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            AutoEatConfig::from_file(&path)
                .with_context(|| format!("loading config from {}", path.display()))?
        }
        None => AutoEatConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let run_for = std::env::var("AUTOEAT_SIM_SECONDS")
        .ok()
        .and_then(|s| s.parse().ok())
        .map_or(Duration::from_secs(30), Duration::from_secs);

    let catalog = load_catalog(&config);
    let frame = NativeState::from_json(SPAWN_FRAME)?;
    let bot = Arc::new(SimulatedBot::from_native(&frame, config.feeding.inventory_capacity));

    let (notifier, ready) = ready_channel();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(500)).await;
        notifier.fire();
    });

    let Some(mut controller) = on_spawn(Arc::clone(&bot), catalog, &config, ready).await? else {
        return Ok(());
    };

    let started = tokio::time::Instant::now();
    let mut drain = tokio::time::interval(Duration::from_secs(3));
    while started.elapsed() < run_for {
        drain.tick().await;
        bot.starve(2);
        info!(hunger = ?bot.hunger(), "Simulated bot is getting hungry");
    }

    controller.stop();
    let stats = serde_json::to_string_pretty(&controller.stats())?;
    info!("Final feeding stats:\n{stats}");
    Ok(())
}
