//! # autoeat core library
//!
//! Bot-agnostic automatic feeding: watch an agent's hunger and, when it
//! drops below full, eat the first allowed food found in its inventory.
//!
//! - [`FoodCatalog`]: the normalized set of edible item identifiers
//! - [`selection`]: hunger gating and the ordered inventory scan
//! - [`Agent`]: the seam a bot adapter implements
//! - [`FeedingController`]: the cancellable timer and guarded eat sequence
//!
//! ## Flow
//!
//! ```text
//! foodlist.txt ─► FoodCatalog ─┐
//!                              ▼
//! Agent::hunger ─► should_eat ─► scan_inventory ─► equip(hand) ─► consume
//!                     (every tick_interval_ms, one attempt in flight)
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod agent;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod selection;
pub mod types;

pub use agent::Agent;
pub use catalog::{FoodCatalog, normalize};
pub use config::{AutoEatConfig, FeedingConfig};
pub use controller::{FeedingController, FeedingStats, TickOutcome, attempt_eat};
pub use error::{ActionError, AutoEatError, CatalogError, FeedError};
pub use types::*;
