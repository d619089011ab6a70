//! Shared fixtures for the autoeat benchmark suite.

use autoeat_core::{DEFAULT_INVENTORY_CAPACITY, FoodCatalog, InventoryItem, InventorySnapshot};

/// A full 40-slot inventory of non-food with a single food item at `food_slot`.
#[must_use]
pub fn cluttered_inventory(food_slot: Option<usize>) -> InventorySnapshot {
    let items = (0..DEFAULT_INVENTORY_CAPACITY).map(|slot| {
        if Some(slot) == food_slot {
            InventoryItem::new("cooked_beef", slot)
        } else {
            InventoryItem::new(format!("block_{slot}"), slot).with_count(64)
        }
    });
    InventorySnapshot::from_items(DEFAULT_INVENTORY_CAPACITY, items)
}

/// A catalog the size of a hand-written food list.
#[must_use]
pub fn large_catalog() -> FoodCatalog {
    let foods = [
        "apple", "baked_potato", "beetroot", "beetroot_soup", "bread", "carrot",
        "cooked_beef", "cooked_chicken", "cooked_cod", "cooked_mutton", "cooked_porkchop",
        "cooked_rabbit", "cooked_salmon", "cookie", "dried_kelp", "golden_carrot",
        "melon_slice", "mushroom_stew", "pumpkin_pie", "rabbit_stew", "sweet_berries",
    ];
    FoodCatalog::from_entries(foods)
}
