//! Integration-layer error types.

use thiserror::Error;

use autoeat_core::AutoEatError;

/// Errors raised while wiring autoeat into a bot.
#[derive(Debug, Error)]
pub enum BotError {
    /// The readiness notifier was dropped before the bot ever spawned.
    #[error("Bot was never ready: readiness notifier dropped before firing")]
    NeverReady,

    /// A native state frame could not be decoded.
    #[error("Failed to parse native bot state: {0}")]
    Parse(#[from] serde_json::Error),

    /// Controller setup failed.
    #[error(transparent)]
    Core(#[from] AutoEatError),
}
