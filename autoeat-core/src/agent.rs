//! The agent seam: what the feeding controller needs from a bot.
//!
//! Adapters implement [`Agent`] over a real client (or a simulation) and
//! convert its native inventory and hunger readings into the core value
//! types. Perception is synchronous and polled every tick; actions are
//! asynchronous and may take several game ticks to settle.

use std::future::Future;
use std::sync::Arc;

use crate::error::ActionError;
use crate::types::{EquipDestination, InventoryItem, InventorySnapshot};

/// A controllable game agent.
pub trait Agent: Send + Sync + 'static {
    /// Current hunger (0..=20), or `None` if not yet known.
    fn hunger(&self) -> Option<u8>;

    /// A fresh snapshot of the inventory.
    fn inventory(&self) -> InventorySnapshot;

    /// Move `item` into `destination`.
    fn equip(
        &self,
        item: &InventoryItem,
        destination: EquipDestination,
    ) -> impl Future<Output = Result<(), ActionError>> + Send;

    /// Consume whatever is held in the hand.
    fn consume(&self) -> impl Future<Output = Result<(), ActionError>> + Send;
}

impl<A: Agent> Agent for Arc<A> {
    fn hunger(&self) -> Option<u8> {
        (**self).hunger()
    }

    fn inventory(&self) -> InventorySnapshot {
        (**self).inventory()
    }

    fn equip(
        &self,
        item: &InventoryItem,
        destination: EquipDestination,
    ) -> impl Future<Output = Result<(), ActionError>> + Send {
        (**self).equip(item, destination)
    }

    fn consume(&self) -> impl Future<Output = Result<(), ActionError>> + Send {
        (**self).consume()
    }
}
