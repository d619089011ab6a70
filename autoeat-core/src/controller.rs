//! Feeding controller: the recurring hunger check and eat sequence.
//!
//! Each tick walks a small state machine:
//!
//! ```text
//! IDLE ─► CHECKING ─┬─► NOT_HUNGRY                    (hunger unknown or ≥ threshold)
//!                   └─► SEARCHING ─┬─► NONE_FOUND
//!                                  └─► FOUND ─► EQUIPPING ─► CONSUMING ─► DONE
//! ```
//!
//! ## Concurrency
//!
//! The timer task never waits on a tick: every firing spawns the tick as
//! its own task, so a slow consume cannot delay the schedule. A busy flag,
//! claimed with a compare-exchange at tick entry and released by a drop
//! guard, keeps two equip/consume sequences from racing on the same hand.
//!
//! Failures of the eat sequence are returned as [`FeedError`], logged by the
//! tick, and never reach the timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::agent::Agent;
use crate::catalog::FoodCatalog;
use crate::config::FeedingConfig;
use crate::error::{AutoEatError, FeedError, Result};
use crate::selection::{scan_inventory, should_eat};
use crate::types::{EquipDestination, InventoryItem};

/// How a single tick ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A previous eat attempt was still in flight; nothing was read.
    Busy,
    /// Hunger unknown or at/above the threshold.
    NotHungry {
        /// The reading, if any.
        hunger: Option<u8>,
    },
    /// Hungry, but nothing in the scanned slots is edible.
    NoFood {
        /// The reading that triggered the search.
        hunger: u8,
    },
    /// The item was equipped and consumed.
    Ate {
        /// What was eaten.
        item: InventoryItem,
    },
    /// The eat sequence failed and was contained.
    Failed {
        /// What the controller tried to eat.
        item: InventoryItem,
        /// Which step failed and why.
        error: FeedError,
    },
}

/// Running counters over all ticks of one controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedingStats {
    /// Ticks evaluated, including skipped ones.
    pub ticks: u64,
    /// Ticks skipped because an attempt was in flight.
    pub busy_skips: u64,
    /// Ticks where the agent was not hungry (or hunger was unknown).
    pub not_hungry: u64,
    /// Hungry ticks with no edible item.
    pub no_food: u64,
    /// Equip/consume sequences started.
    pub attempts: u64,
    /// Sequences that completed.
    pub eaten: u64,
    /// Sequences that failed.
    pub failures: u64,
    /// Identifier of the last item eaten.
    pub last_eaten: Option<String>,
    /// When the last item was eaten.
    pub last_eaten_at: Option<DateTime<Utc>>,
}

/// Equip `item` to the hand, then consume it.
///
/// This is the raw sequence; it does not take the controller's busy guard.
///
/// # Errors
/// [`FeedError::Equip`] if equipping fails (consume is then not issued),
/// [`FeedError::Consume`] if consuming fails. No rollback is attempted.
pub async fn attempt_eat<A: Agent>(agent: &A, item: &InventoryItem) -> std::result::Result<(), FeedError> {
    debug!(item = %item.identifier, slot = item.slot_index, "Equipping food");
    agent
        .equip(item, EquipDestination::Hand)
        .await
        .map_err(|source| FeedError::Equip {
            item: item.identifier.clone(),
            source,
        })?;

    debug!(item = %item.identifier, "Consuming food");
    agent.consume().await.map_err(|source| FeedError::Consume {
        item: item.identifier.clone(),
        source,
    })
}

/// Clears the busy flag when the attempt settles, however it settles.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

struct Shared<A> {
    agent: A,
    catalog: Arc<FoodCatalog>,
    config: FeedingConfig,
    busy: AtomicBool,
    stats: Mutex<FeedingStats>,
}

impl<A: Agent> Shared<A> {
    async fn tick(&self) -> TickOutcome {
        self.stats.lock().ticks += 1;

        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            debug!("Previous eat attempt still in flight, skipping tick");
            self.stats.lock().busy_skips += 1;
            return TickOutcome::Busy;
        };

        let hunger = self.agent.hunger();
        debug!(hunger = ?hunger, "Current hunger level");

        let level = match hunger {
            Some(level) if should_eat(hunger, self.config.hunger_threshold) => level,
            _ => {
                debug!(hunger = ?hunger, "Not hungry or already full");
                self.stats.lock().not_hungry += 1;
                return TickOutcome::NotHungry { hunger };
            }
        };

        debug!(hunger = level, "Hunger detected, searching for food");
        let item = {
            let snapshot = self.agent.inventory();
            scan_inventory(&snapshot, &self.catalog, self.config.inventory_capacity).cloned()
        };
        let Some(item) = item else {
            debug!(hunger = level, "No consumable food found in inventory");
            self.stats.lock().no_food += 1;
            return TickOutcome::NoFood { hunger: level };
        };

        self.stats.lock().attempts += 1;
        match attempt_eat(&self.agent, &item).await {
            Ok(()) => {
                info!(item = %item.identifier, slot = item.slot_index, hunger = level, "Consumed food");
                let mut stats = self.stats.lock();
                stats.eaten += 1;
                stats.last_eaten = Some(item.identifier.clone());
                stats.last_eaten_at = Some(Utc::now());
                TickOutcome::Ate { item }
            }
            Err(error) => {
                warn!(error = %error, "Eat attempt failed");
                self.stats.lock().failures += 1;
                TickOutcome::Failed { item, error }
            }
        }
    }
}

/// Owns the feeding timer and the state its ticks share.
///
/// Create it once the agent is ready, then [`start`](Self::start) it.
/// Dropping the controller stops the timer.
pub struct FeedingController<A: Agent> {
    shared: Arc<Shared<A>>,
    timer: Option<JoinHandle<()>>,
}

impl<A: Agent> FeedingController<A> {
    /// Create a stopped controller.
    #[must_use]
    pub fn new(agent: A, catalog: Arc<FoodCatalog>, config: FeedingConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                agent,
                catalog,
                config,
                busy: AtomicBool::new(false),
                stats: Mutex::new(FeedingStats::default()),
            }),
            timer: None,
        }
    }

    /// Start ticking every `tick_interval`. The first tick fires one full
    /// interval from now.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// [`AutoEatError::InvalidInterval`] for a zero interval,
    /// [`AutoEatError::AlreadyRunning`] if the timer is live,
    /// [`AutoEatError::NoRuntime`] outside a Tokio runtime.
    pub fn start(&mut self, tick_interval: Duration) -> Result<()> {
        if tick_interval.is_zero() {
            return Err(AutoEatError::InvalidInterval(tick_interval));
        }
        if self.is_running() {
            return Err(AutoEatError::AlreadyRunning);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|_| AutoEatError::NoRuntime)?;

        let shared = Arc::clone(&self.shared);
        let handle = runtime.spawn(async move {
            let mut interval = tokio::time::interval_at(Instant::now() + tick_interval, tick_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                let shared = Arc::clone(&shared);
                tokio::spawn(async move {
                    shared.tick().await;
                });
            }
        });

        info!(
            interval_ms = u64::try_from(tick_interval.as_millis()).unwrap_or(u64::MAX),
            foods = self.shared.catalog.len(),
            "Auto-eat started"
        );
        self.timer = Some(handle);
        Ok(())
    }

    /// Cancel the timer. An attempt already in flight is left to settle.
    ///
    /// Returns `true` if a running timer was stopped.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(handle) => {
                handle.abort();
                info!("Auto-eat stopped");
                true
            }
            None => false,
        }
    }

    /// Whether the timer is live.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Whether an eat attempt is in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.shared.busy.load(Ordering::Acquire)
    }

    /// Run one tick now, independent of the timer.
    ///
    /// Shares the busy guard with timer-driven ticks.
    pub async fn tick(&self) -> TickOutcome {
        self.shared.tick().await
    }

    /// Counters so far.
    #[must_use]
    pub fn stats(&self) -> FeedingStats {
        self.shared.stats.lock().clone()
    }

    /// The catalog this controller matches against.
    #[must_use]
    pub fn catalog(&self) -> &FoodCatalog {
        &self.shared.catalog
    }

    /// The agent being fed.
    #[must_use]
    pub fn agent(&self) -> &A {
        &self.shared.agent
    }

    /// Feeding settings.
    #[must_use]
    pub fn config(&self) -> &FeedingConfig {
        &self.shared.config
    }
}

impl<A: Agent> Drop for FeedingController<A> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ActionError;
    use crate::types::{DEFAULT_INVENTORY_CAPACITY, InventorySnapshot};
    use std::sync::atomic::AtomicUsize;

    #[derive(Default)]
    struct StubAgent {
        hunger: Option<u8>,
        items: Vec<InventoryItem>,
        fail_equip: bool,
        equips: AtomicUsize,
        consumes: AtomicUsize,
    }

    impl Agent for StubAgent {
        fn hunger(&self) -> Option<u8> {
            self.hunger
        }

        fn inventory(&self) -> InventorySnapshot {
            InventorySnapshot::from_items(DEFAULT_INVENTORY_CAPACITY, self.items.clone())
        }

        async fn equip(&self, _item: &InventoryItem, _destination: EquipDestination) -> std::result::Result<(), ActionError> {
            self.equips.fetch_add(1, Ordering::SeqCst);
            if self.fail_equip {
                Err(ActionError::Rejected("hand busy".into()))
            } else {
                Ok(())
            }
        }

        async fn consume(&self) -> std::result::Result<(), ActionError> {
            self.consumes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn controller(agent: StubAgent) -> FeedingController<StubAgent> {
        FeedingController::new(
            agent,
            Arc::new(FoodCatalog::from_entries(["bread"])),
            FeedingConfig::default(),
        )
    }

    #[test]
    fn busy_guard_is_exclusive_and_releases() {
        let flag = AtomicBool::new(false);
        let guard = BusyGuard::acquire(&flag).expect("free flag");
        assert!(BusyGuard::acquire(&flag).is_none());
        drop(guard);
        assert!(BusyGuard::acquire(&flag).is_some());
    }

    #[tokio::test]
    async fn full_agent_is_not_hungry() {
        let ctl = controller(StubAgent {
            hunger: Some(20),
            items: vec![InventoryItem::new("bread", 0)],
            ..StubAgent::default()
        });
        assert_eq!(ctl.tick().await, TickOutcome::NotHungry { hunger: Some(20) });
        assert_eq!(ctl.agent().equips.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn equip_failure_skips_consume() {
        let ctl = controller(StubAgent {
            hunger: Some(4),
            items: vec![InventoryItem::new("bread", 3)],
            fail_equip: true,
            ..StubAgent::default()
        });
        let outcome = ctl.tick().await;
        assert!(matches!(outcome, TickOutcome::Failed { error: FeedError::Equip { .. }, .. }));
        assert_eq!(ctl.agent().consumes.load(Ordering::SeqCst), 0);
        assert!(!ctl.is_busy());
        assert_eq!(ctl.stats().failures, 1);
    }

    #[tokio::test]
    async fn successful_tick_records_stats() {
        let ctl = controller(StubAgent {
            hunger: Some(10),
            items: vec![InventoryItem::new("minecraft:bread", 8)],
            ..StubAgent::default()
        });
        assert!(matches!(ctl.tick().await, TickOutcome::Ate { .. }));
        let stats = ctl.stats();
        assert_eq!(stats.ticks, 1);
        assert_eq!(stats.eaten, 1);
        assert_eq!(stats.last_eaten.as_deref(), Some("minecraft:bread"));
        assert!(stats.last_eaten_at.is_some());
    }

    #[tokio::test]
    async fn zero_interval_rejected() {
        let mut ctl = controller(StubAgent::default());
        assert!(matches!(ctl.start(Duration::ZERO), Err(AutoEatError::InvalidInterval(_))));
        assert!(!ctl.is_running());
    }

    #[tokio::test]
    async fn double_start_rejected() {
        let mut ctl = controller(StubAgent::default());
        ctl.start(Duration::from_secs(2)).expect("first start");
        assert!(matches!(ctl.start(Duration::from_secs(2)), Err(AutoEatError::AlreadyRunning)));
        assert!(ctl.stop());
        assert!(!ctl.stop());
    }

    #[test]
    fn start_outside_runtime_is_an_error() {
        let mut ctl = controller(StubAgent::default());
        assert!(matches!(ctl.start(Duration::from_secs(2)), Err(AutoEatError::NoRuntime)));
    }
}
