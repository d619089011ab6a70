//! Hunger gating and food selection: the synchronous half of a tick.

use tracing::{debug, trace};

use crate::catalog::FoodCatalog;
use crate::types::{InventoryItem, InventorySnapshot};

/// Whether an agent with this hunger reading should look for food.
///
/// Unknown hunger never triggers eating. `threshold` is exclusive: an agent
/// at exactly the threshold is not hungry.
#[must_use]
pub fn should_eat(hunger: Option<u8>, threshold: u8) -> bool {
    matches!(hunger, Some(level) if level < threshold)
}

/// Find the first edible item, scanning slots `0..capacity` in order.
///
/// The lowest slot index wins; no other criterion (saturation, stack size)
/// is considered.
#[must_use]
pub fn scan_inventory<'a>(
    snapshot: &'a InventorySnapshot,
    catalog: &FoodCatalog,
    capacity: usize,
) -> Option<&'a InventoryItem> {
    let found = snapshot
        .slots()
        .iter()
        .take(capacity)
        .flatten()
        .find(|item| {
            let edible = catalog.contains(&item.identifier);
            trace!(slot = item.slot_index, item = %item.identifier, edible, "Checking inventory slot");
            edible
        });

    match found {
        Some(item) => debug!(slot = item.slot_index, item = %item.identifier, "Found edible item"),
        None => debug!("No edible item in inventory"),
    }

    found
}
