//! In-memory simulated bot.
//!
//! Implements [`Agent`] without a server so the feeding loop can be
//! exercised end to end: equipping checks the item is still where the
//! snapshot said, consuming takes game time, removes one item from the
//! stack and restores hunger. Failures can be injected per action.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tracing::trace;

use autoeat_core::{
    ActionError, Agent, EquipDestination, FULL_HUNGER, InventoryItem, InventorySnapshot,
};

use crate::bridge::NativeState;

/// Tunable behaviour of a [`SimulatedBot`].
#[derive(Debug, Clone)]
pub struct SimBehavior {
    /// Reject every equip request.
    pub fail_equip: bool,
    /// Reject every consume request (after the eating time elapses).
    pub fail_consume: bool,
    /// How long eating takes.
    pub consume_time: Duration,
    /// Hunger restored per item eaten.
    pub restore_per_item: u8,
}

impl Default for SimBehavior {
    fn default() -> Self {
        Self {
            fail_equip: false,
            fail_consume: false,
            // 32 game ticks at 20 TPS.
            consume_time: Duration::from_millis(1600),
            restore_per_item: 6,
        }
    }
}

/// Call counters, for assertions.
#[derive(Debug, Default)]
pub struct SimCounters {
    /// Equip requests received.
    pub equips: AtomicUsize,
    /// Consume requests received.
    pub consumes: AtomicUsize,
    /// Items actually eaten.
    pub eaten: AtomicUsize,
    /// Highest number of overlapping consume calls seen.
    pub peak_concurrent_consumes: AtomicUsize,
    in_flight: AtomicUsize,
}

#[derive(Debug)]
struct SimState {
    hunger: Option<u8>,
    inventory: InventorySnapshot,
    held: Option<InventoryItem>,
}

/// A bot that lives entirely in memory.
#[derive(Debug)]
pub struct SimulatedBot {
    state: Mutex<SimState>,
    behavior: SimBehavior,
    counters: SimCounters,
}

impl SimulatedBot {
    /// A bot with the given hunger and an empty inventory of `capacity` slots.
    #[must_use]
    pub fn new(hunger: Option<u8>, capacity: usize) -> Self {
        Self {
            state: Mutex::new(SimState {
                hunger,
                inventory: InventorySnapshot::empty(capacity),
                held: None,
            }),
            behavior: SimBehavior::default(),
            counters: SimCounters::default(),
        }
    }

    /// A bot seeded from a native state frame.
    #[must_use]
    pub fn from_native(state: &NativeState, capacity: usize) -> Self {
        let bot = Self::new(state.hunger(), capacity);
        bot.state.lock().inventory = state.snapshot(capacity);
        bot
    }

    /// Put items into their slots.
    #[must_use]
    pub fn with_items(self, items: impl IntoIterator<Item = InventoryItem>) -> Self {
        {
            let mut state = self.state.lock();
            for item in items {
                state.inventory.place(item);
            }
        }
        self
    }

    /// Replace the behaviour.
    #[must_use]
    pub fn with_behavior(mut self, behavior: SimBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Overwrite the hunger reading.
    pub fn set_hunger(&self, hunger: Option<u8>) {
        self.state.lock().hunger = hunger;
    }

    /// Lose `amount` hunger points, as sprinting or healing would.
    pub fn starve(&self, amount: u8) {
        let mut state = self.state.lock();
        state.hunger = state.hunger.map(|h| h.saturating_sub(amount));
    }

    /// Item currently in the hand.
    #[must_use]
    pub fn held(&self) -> Option<InventoryItem> {
        self.state.lock().held.clone()
    }

    /// Call counters.
    #[must_use]
    pub fn counters(&self) -> &SimCounters {
        &self.counters
    }

    fn finish_eating(&self) -> Result<(), ActionError> {
        let mut state = self.state.lock();
        let held = state
            .held
            .take()
            .ok_or_else(|| ActionError::Interrupted("hand emptied while eating".into()))?;

        match state.inventory.take(held.slot_index) {
            Some(stack) if stack.identifier == held.identifier => {
                if stack.count > 1 {
                    let left = stack.count - 1;
                    let remaining = stack.with_count(left);
                    state.held = Some(remaining.clone());
                    state.inventory.place(remaining);
                }
            }
            Some(other) => {
                state.inventory.place(other);
                return Err(ActionError::Interrupted("held stack was swapped".into()));
            }
            None => return Err(ActionError::Interrupted("held stack vanished".into())),
        }

        state.hunger = state
            .hunger
            .map(|h| h.saturating_add(self.behavior.restore_per_item).min(FULL_HUNGER));
        self.counters.eaten.fetch_add(1, Ordering::SeqCst);
        trace!(item = %held.identifier, hunger = ?state.hunger, "Simulated bot ate");
        Ok(())
    }
}

impl Agent for SimulatedBot {
    fn hunger(&self) -> Option<u8> {
        self.state.lock().hunger
    }

    fn inventory(&self) -> InventorySnapshot {
        self.state.lock().inventory.clone()
    }

    async fn equip(&self, item: &InventoryItem, destination: EquipDestination) -> Result<(), ActionError> {
        self.counters.equips.fetch_add(1, Ordering::SeqCst);
        if self.behavior.fail_equip {
            return Err(ActionError::Rejected(format!("cannot equip to {destination}")));
        }

        let mut state = self.state.lock();
        let in_slot = state.inventory.get(item.slot_index).cloned();
        match in_slot {
            Some(current) if current.identifier == item.identifier => {
                state.held = Some(current);
                Ok(())
            }
            _ => Err(ActionError::Rejected(format!(
                "{} is no longer in slot {}",
                item.identifier, item.slot_index
            ))),
        }
    }

    async fn consume(&self) -> Result<(), ActionError> {
        self.counters.consumes.fetch_add(1, Ordering::SeqCst);
        if self.state.lock().held.is_none() {
            return Err(ActionError::Rejected("nothing in hand".into()));
        }

        let now = self.counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.counters.peak_concurrent_consumes.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.behavior.consume_time).await;
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.behavior.fail_consume {
            return Err(ActionError::Interrupted("eating was interrupted".into()));
        }
        self.finish_eating()
    }
}
