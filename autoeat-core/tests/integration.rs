//! Integration Tests: timer-driven feeding flows.
//!
//! These run on Tokio's paused clock: sleeping in the test advances virtual
//! time, firing the controller's interval deterministically.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use autoeat_core::{
    ActionError, Agent, EquipDestination, FeedError, FeedingConfig, FeedingController,
    FoodCatalog, InventoryItem, InventorySnapshot, TickOutcome, DEFAULT_INVENTORY_CAPACITY,
};

const TICK: Duration = Duration::from_millis(2000);

#[derive(Default)]
struct ScriptedAgent {
    hunger: Mutex<Option<u8>>,
    items: Vec<InventoryItem>,
    fail_consume: bool,
    consume_delay: Duration,
    inventory_reads: AtomicUsize,
    equips: AtomicUsize,
    consumes_started: AtomicUsize,
    consumes_settled: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    last_equipped: Mutex<Option<InventoryItem>>,
}

impl ScriptedAgent {
    fn hungry(level: u8, items: Vec<InventoryItem>) -> Self {
        Self {
            hunger: Mutex::new(Some(level)),
            items,
            ..Self::default()
        }
    }
}

impl Agent for ScriptedAgent {
    fn hunger(&self) -> Option<u8> {
        *self.hunger.lock()
    }

    fn inventory(&self) -> InventorySnapshot {
        self.inventory_reads.fetch_add(1, Ordering::SeqCst);
        InventorySnapshot::from_items(DEFAULT_INVENTORY_CAPACITY, self.items.clone())
    }

    async fn equip(&self, item: &InventoryItem, destination: EquipDestination) -> Result<(), ActionError> {
        assert_eq!(destination, EquipDestination::Hand);
        self.equips.fetch_add(1, Ordering::SeqCst);
        *self.last_equipped.lock() = Some(item.clone());
        Ok(())
    }

    async fn consume(&self) -> Result<(), ActionError> {
        self.consumes_started.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if !self.consume_delay.is_zero() {
            tokio::time::sleep(self.consume_delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.consumes_settled.fetch_add(1, Ordering::SeqCst);
        if self.fail_consume {
            Err(ActionError::Interrupted("took damage".into()))
        } else {
            Ok(())
        }
    }
}

fn foods() -> Arc<FoodCatalog> {
    Arc::new(FoodCatalog::from_entries(["cooked_beef", "bread"]))
}

fn controller(agent: ScriptedAgent) -> FeedingController<ScriptedAgent> {
    FeedingController::new(agent, foods(), FeedingConfig::default())
}

// ---------------------------------------------------------------------------
// Single ticks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn hunger_gating_only_searches_below_full() {
    for (hunger, searches) in [(None, false), (Some(20), false), (Some(15), true), (Some(0), true)] {
        let agent = ScriptedAgent {
            hunger: Mutex::new(hunger),
            ..ScriptedAgent::default()
        };
        let ctl = controller(agent);
        let outcome = ctl.tick().await;

        assert_eq!(
            ctl.agent().inventory_reads.load(Ordering::SeqCst) == 1,
            searches,
            "hunger {hunger:?}: {outcome:?}"
        );
    }
}

#[tokio::test]
async fn first_matching_slot_is_eaten() {
    let ctl = controller(ScriptedAgent::hungry(
        12,
        vec![
            InventoryItem::new("stone", 0),
            InventoryItem::new("bread", 12),
            InventoryItem::new("minecraft:cooked_beef", 5),
        ],
    ));

    let outcome = ctl.tick().await;
    let TickOutcome::Ate { item } = &outcome else {
        panic!("expected Ate, got {outcome:?}");
    };
    assert_eq!(item.slot_index, 5);
    assert_eq!(
        ctl.agent().last_equipped.lock().as_ref().map(|i| i.slot_index),
        Some(5)
    );
}

#[tokio::test]
async fn no_food_issues_no_actions() {
    let ctl = controller(ScriptedAgent::hungry(
        3,
        vec![InventoryItem::new("stone", 0), InventoryItem::new("rotten_flesh", 9)],
    ));

    assert_eq!(ctl.tick().await, TickOutcome::NoFood { hunger: 3 });
    assert_eq!(ctl.agent().equips.load(Ordering::SeqCst), 0);
    assert_eq!(ctl.agent().consumes_started.load(Ordering::SeqCst), 0);
    assert_eq!(ctl.stats().no_food, 1);
}

#[tokio::test]
async fn consume_failure_is_contained_in_outcome() {
    let ctl = controller(ScriptedAgent {
        fail_consume: true,
        ..ScriptedAgent::hungry(6, vec![InventoryItem::new("bread", 1)])
    });

    let outcome = ctl.tick().await;
    assert!(matches!(
        outcome,
        TickOutcome::Failed { error: FeedError::Consume { .. }, .. }
    ));
    assert!(!ctl.is_busy());
}

#[tokio::test]
async fn overlapping_manual_ticks_are_rejected() {
    let ctl = controller(ScriptedAgent {
        consume_delay: Duration::from_millis(500),
        ..ScriptedAgent::hungry(6, vec![InventoryItem::new("bread", 1)])
    });

    let (first, second) = tokio::join!(ctl.tick(), async {
        tokio::task::yield_now().await;
        ctl.tick().await
    });

    assert!(matches!(first, TickOutcome::Ate { .. }));
    assert_eq!(second, TickOutcome::Busy);
    assert_eq!(ctl.agent().equips.load(Ordering::SeqCst), 1);
}

// ---------------------------------------------------------------------------
// Timer-driven
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn timer_keeps_firing_after_failed_consume() {
    let mut ctl = controller(ScriptedAgent {
        fail_consume: true,
        ..ScriptedAgent::hungry(10, vec![InventoryItem::new("bread", 0)])
    });
    ctl.start(TICK).expect("start");

    tokio::time::sleep(Duration::from_millis(4500)).await;

    assert!(ctl.is_running());
    assert_eq!(ctl.agent().inventory_reads.load(Ordering::SeqCst), 2);
    assert_eq!(ctl.agent().consumes_settled.load(Ordering::SeqCst), 2);
    assert_eq!(ctl.stats().failures, 2);
}

#[tokio::test(start_paused = true)]
async fn first_tick_waits_one_interval() {
    let mut ctl = controller(ScriptedAgent::hungry(10, vec![InventoryItem::new("bread", 0)]));
    ctl.start(TICK).expect("start");

    tokio::time::sleep(Duration::from_millis(1900)).await;
    assert_eq!(ctl.stats().ticks, 0);

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(ctl.stats().ticks, 1);
}

#[tokio::test(start_paused = true)]
async fn in_flight_attempt_blocks_later_ticks() {
    let mut ctl = controller(ScriptedAgent {
        consume_delay: Duration::from_millis(5000),
        ..ScriptedAgent::hungry(10, vec![InventoryItem::new("bread", 0)])
    });
    ctl.start(TICK).expect("start");

    // Ticks at 2s (starts, settles at 7s), 4s and 6s (busy).
    tokio::time::sleep(Duration::from_millis(6500)).await;
    assert!(ctl.is_busy());
    assert_eq!(ctl.agent().equips.load(Ordering::SeqCst), 1);
    assert_eq!(ctl.stats().busy_skips, 2);

    // Tick at 8s starts a fresh attempt once the first has settled.
    tokio::time::sleep(Duration::from_millis(2000)).await;
    assert_eq!(ctl.agent().consumes_settled.load(Ordering::SeqCst), 1);
    assert_eq!(ctl.agent().equips.load(Ordering::SeqCst), 2);
    assert_eq!(ctl.agent().peak_in_flight.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_timer_but_lets_attempt_settle() {
    let mut ctl = controller(ScriptedAgent {
        consume_delay: Duration::from_millis(3000),
        ..ScriptedAgent::hungry(10, vec![InventoryItem::new("bread", 0)])
    });
    ctl.start(TICK).expect("start");

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert!(ctl.is_busy());
    assert!(ctl.stop());
    assert!(!ctl.is_running());

    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(ctl.agent().consumes_settled.load(Ordering::SeqCst), 1);
    assert!(!ctl.is_busy());
    assert_eq!(ctl.stats().ticks, 1);
}

#[tokio::test(start_paused = true)]
async fn controller_can_restart_after_stop() {
    let mut ctl = controller(ScriptedAgent::hungry(10, vec![InventoryItem::new("bread", 0)]));
    ctl.start(TICK).expect("start");
    tokio::time::sleep(Duration::from_millis(2100)).await;
    ctl.stop();

    ctl.start(TICK).expect("restart");
    tokio::time::sleep(Duration::from_millis(2100)).await;
    assert_eq!(ctl.stats().eaten, 2);
}
