//! Bridge module: maps a bot's native state onto autoeat core types.
//!
//! Bot clients report state in their own shape. The reference client
//! exposes:
//! - `food`: a number that may be missing before the first health packet
//! - `inventory.slots`: an array of `null` or `{ name, slot, count }`
//!
//! The controller only sees `Option<u8>` and [`InventorySnapshot`], so a
//! state frame is converted here and nowhere else.

use serde::{Deserialize, Serialize};
use tracing::debug;

use autoeat_core::{FULL_HUNGER, InventoryItem, InventorySnapshot};

use crate::error::BotError;

/// One occupied slot as the native client reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawItem {
    /// Item name, usually without namespace (`cooked_beef`).
    pub name: String,
    /// Slot the client says the item is in.
    pub slot: usize,
    /// Stack size.
    #[serde(default = "default_count")]
    pub count: u32,
}

impl From<&RawItem> for InventoryItem {
    fn from(raw: &RawItem) -> Self {
        InventoryItem::new(raw.name.clone(), raw.slot).with_count(raw.count)
    }
}

/// A native state frame: hunger plus inventory slots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeState {
    /// Raw hunger reading, absent until known.
    #[serde(default)]
    pub food: Option<f64>,
    /// Slot array; `null` entries are empty.
    #[serde(default)]
    pub slots: Vec<Option<RawItem>>,
}

impl NativeState {
    /// Decode a JSON state frame.
    ///
    /// # Errors
    /// Returns [`BotError::Parse`] if the JSON does not match the frame shape.
    pub fn from_json(json: &str) -> Result<Self, BotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Hunger in the core's 0..=20 range.
    #[must_use]
    pub fn hunger(&self) -> Option<u8> {
        hunger_from_raw(self.food)
    }

    /// Inventory view of `capacity` slots.
    #[must_use]
    pub fn snapshot(&self, capacity: usize) -> InventorySnapshot {
        snapshot_from_raw(&self.slots, capacity)
    }
}

/// Convert a native hunger reading. Non-finite readings count as unknown;
/// everything else is rounded and clamped to `0..=20`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn hunger_from_raw(food: Option<f64>) -> Option<u8> {
    let food = food.filter(|f| f.is_finite())?;
    Some(food.round().clamp(0.0, f64::from(FULL_HUNGER)) as u8)
}

/// Build a fixed-capacity snapshot from native slots.
///
/// Items are placed at the slot they report. Items outside `capacity`, or
/// claiming a slot already taken, are dropped.
#[must_use]
pub fn snapshot_from_raw(slots: &[Option<RawItem>], capacity: usize) -> InventorySnapshot {
    let mut snapshot = InventorySnapshot::empty(capacity);
    for raw in slots.iter().flatten() {
        if !snapshot.place(InventoryItem::from(raw)) {
            debug!(item = %raw.name, slot = raw.slot, capacity, "Dropping native item outside snapshot");
        }
    }
    snapshot
}

fn default_count() -> u32 {
    1
}
