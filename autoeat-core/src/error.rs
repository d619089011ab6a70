//! Error types for the autoeat core library.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for autoeat operations that can fail outright.
///
/// Most failures inside a feeding tick are contained and reported as a
/// [`crate::controller::TickOutcome`] instead; this type covers setup and
/// lifecycle errors.
#[derive(Error, Debug)]
pub enum AutoEatError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The timer interval must be non-zero.
    #[error("Invalid tick interval: {0:?} (must be greater than zero)")]
    InvalidInterval(std::time::Duration),

    /// `start` was called on a controller whose timer is already running.
    #[error("Feeding controller is already running")]
    AlreadyRunning,

    /// The timer needs a Tokio runtime and none is active on this thread.
    #[error("No Tokio runtime available to drive the feeding timer")]
    NoRuntime,

    /// Food catalog could not be read.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a food list could not be loaded from its source.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The food list file does not exist.
    #[error("Food list file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The food list file exists but reading it failed.
    #[error("Failed to read food list {}: {source}", .path.display())]
    Read {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

/// A rejected request against the external agent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The agent refused or failed the action.
    #[error("Action rejected: {0}")]
    Rejected(String),

    /// The action was cut short (e.g. hand swapped, damage taken).
    #[error("Action interrupted: {0}")]
    Interrupted(String),

    /// The agent is not connected / spawned.
    #[error("Agent unavailable")]
    Unavailable,
}

/// Failure of one equip-then-consume attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// Equipping the food to the hand failed; consume was not issued.
    #[error("Failed to equip {item}: {source}")]
    Equip {
        /// Identifier of the item being equipped.
        item: String,
        /// What the agent reported.
        #[source]
        source: ActionError,
    },

    /// Consuming the held item failed. The item may remain equipped.
    #[error("Failed to consume {item}: {source}")]
    Consume {
        /// Identifier of the item being consumed.
        item: String,
        /// What the agent reported.
        #[source]
        source: ActionError,
    },
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, AutoEatError>;
