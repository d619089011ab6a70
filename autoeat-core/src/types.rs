//! Core value types shared between the controller and agent adapters.
//!
//! These decouple the feeding logic from any bot's native representation:
//! an adapter converts its own inventory and hunger readings into
//! [`InventorySnapshot`] and a plain `Option<u8>` before the controller
//! ever sees them.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Hunger
// ---------------------------------------------------------------------------

/// Hunger value of a fully fed agent. Lower means hungrier.
pub const FULL_HUNGER: u8 = 20;

/// Inventory size exposed by the reference agent (hotbar, main grid, armor,
/// offhand).
pub const DEFAULT_INVENTORY_CAPACITY: usize = 40;

// ---------------------------------------------------------------------------
// Inventory
// ---------------------------------------------------------------------------

/// One occupied inventory slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Item identifier as reported by the agent, e.g. `bread` or
    /// `minecraft:bread`.
    pub identifier: String,
    /// Slot this item occupies.
    pub slot_index: usize,
    /// Stack size.
    #[serde(default = "default_count")]
    pub count: u32,
}

impl InventoryItem {
    /// Create a single-item stack.
    #[must_use]
    pub fn new(identifier: impl Into<String>, slot_index: usize) -> Self {
        Self {
            identifier: identifier.into(),
            slot_index,
            count: 1,
        }
    }

    /// Set the stack size.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

impl fmt::Display for InventoryItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x{} (slot {})", self.identifier, self.count, self.slot_index)
    }
}

/// Read-only view of an agent's inventory at one instant.
///
/// Slots are ordered by index; `slots()[i]` is slot `i`. Never cache a
/// snapshot across ticks, the inventory changes underneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    slots: Vec<Option<InventoryItem>>,
}

impl InventorySnapshot {
    /// Create an all-empty snapshot with `capacity` slots.
    #[must_use]
    pub fn empty(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Build a snapshot of `capacity` slots from occupied items.
    ///
    /// Each item lands at its own `slot_index`; items outside the capacity
    /// are ignored and the first item wins when two claim the same slot.
    #[must_use]
    pub fn from_items(capacity: usize, items: impl IntoIterator<Item = InventoryItem>) -> Self {
        let mut snapshot = Self::empty(capacity);
        for item in items {
            snapshot.place(item);
        }
        snapshot
    }

    /// Put `item` in its slot if that slot exists and is free.
    ///
    /// Returns `false` when the item was not placed.
    pub fn place(&mut self, item: InventoryItem) -> bool {
        match self.slots.get_mut(item.slot_index) {
            Some(slot) if slot.is_none() => {
                *slot = Some(item);
                true
            }
            _ => false,
        }
    }

    /// Take whatever is in `index`, leaving it empty.
    pub fn take(&mut self, index: usize) -> Option<InventoryItem> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// All slots in index order.
    #[must_use]
    pub fn slots(&self) -> &[Option<InventoryItem>] {
        &self.slots
    }

    /// The item in `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&InventoryItem> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Occupied slots in index order.
    pub fn items(&self) -> impl Iterator<Item = &InventoryItem> {
        self.slots.iter().flatten()
    }

    /// Number of slots (occupied or not).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// Where an item is equipped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipDestination {
    /// The primary action hand. Eating always uses this.
    Hand,
    /// The secondary hand.
    OffHand,
}

impl fmt::Display for EquipDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hand => write!(f, "hand"),
            Self::OffHand => write!(f, "off-hand"),
        }
    }
}

fn default_count() -> u32 {
    1
}
