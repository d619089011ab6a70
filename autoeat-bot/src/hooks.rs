//! Integration hooks for the bot lifecycle.
//!
//! A bot client signals readiness once, when it has spawned into the world.
//! Feeding must not start before that: hunger and inventory are meaningless
//! until the first state packets arrive. [`on_spawn`] waits for the signal,
//! then builds and starts the [`FeedingController`].

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use autoeat_core::{Agent, AutoEatConfig, FeedingController, FoodCatalog};

use crate::error::BotError;

/// Sending half of the readiness signal, held by the bot client.
#[derive(Debug)]
pub struct ReadyNotifier(watch::Sender<bool>);

/// Receiving half of the readiness signal.
#[derive(Debug, Clone)]
pub struct ReadySignal(watch::Receiver<bool>);

/// Create a linked notifier/signal pair.
#[must_use]
pub fn ready_channel() -> (ReadyNotifier, ReadySignal) {
    let (tx, rx) = watch::channel(false);
    (ReadyNotifier(tx), ReadySignal(rx))
}

impl ReadyNotifier {
    /// Mark the bot as spawned. Only the first call has any effect.
    ///
    /// Returns `true` on that first call.
    pub fn fire(&self) -> bool {
        self.0.send_if_modified(|ready| {
            if *ready {
                false
            } else {
                *ready = true;
                true
            }
        })
    }
}

impl ReadySignal {
    /// Whether the bot has already spawned.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        *self.0.borrow()
    }

    /// Wait until the bot has spawned. Returns immediately if it already has.
    ///
    /// # Errors
    /// [`BotError::NeverReady`] if the notifier is dropped without firing.
    pub async fn wait(&mut self) -> Result<(), BotError> {
        self.0
            .wait_for(|ready| *ready)
            .await
            .map(|_| ())
            .map_err(|_| BotError::NeverReady)
    }
}

/// Load the food catalog named by the config. Never fails; see
/// [`FoodCatalog::load`].
#[must_use]
pub fn load_catalog(config: &AutoEatConfig) -> Arc<FoodCatalog> {
    Arc::new(FoodCatalog::load(&config.feeding.food_list_path))
}

/// Wait for the spawn signal, then start auto-feeding `agent`.
///
/// Returns `Ok(None)` when feeding is disabled in the config.
///
/// # Errors
/// [`BotError::NeverReady`] if the bot never spawns, [`BotError::Core`] if
/// the controller cannot start.
pub async fn on_spawn<A: Agent>(
    agent: A,
    catalog: Arc<FoodCatalog>,
    config: &AutoEatConfig,
    mut ready: ReadySignal,
) -> Result<Option<FeedingController<A>>, BotError> {
    ready.wait().await?;

    if !config.general.enabled {
        info!("Auto-eat disabled by configuration");
        return Ok(None);
    }

    info!(foods = ?catalog.sorted(), "Food module initialized");
    let mut controller = FeedingController::new(agent, catalog, config.feeding.clone());
    controller.start(config.feeding.tick_interval())?;
    Ok(Some(controller))
}
