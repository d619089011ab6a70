//! # autoeat-bot: Bot Integration for autoeat
//!
//! This crate connects the bot-agnostic `autoeat-core` library to a bot
//! client.
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │               Bot client                 │
//! │  spawn ─► ReadyNotifier                  │
//! │  state frames (JSON) ─► bridge           │
//! │  ┌────────────────────────────────────┐  │
//! │  │          autoeat-bot               │  │
//! │  │  hooks::on_spawn ─► controller     │  │
//! │  │  ┌──────────────────────────────┐  │  │
//! │  │  │        autoeat-core          │  │  │
//! │  │  └──────────────────────────────┘  │  │
//! │  └────────────────────────────────────┘  │
//! └──────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `bridge` -- native state frames to core types
//! - `hooks` -- readiness signal and controller startup
//! - `sim` -- in-memory bot implementing `Agent`
//! - `error` -- integration errors

pub mod bridge;
pub mod error;
pub mod hooks;
pub mod sim;

pub use error::BotError;
pub use hooks::{ReadyNotifier, ReadySignal, on_spawn, ready_channel};
pub use sim::{SimBehavior, SimulatedBot};
