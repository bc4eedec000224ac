use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use log::{debug, info};
use rand::RngCore;
use wealthtracker_market_data::{MarketClock, MarketStatus, PriceSimulator};

use crate::analytics::{AnalyticsEngine, AnalyticsEngineTrait, DerivedMetrics};
use crate::errors::{Result, SchedulerError};
use crate::events::{PortfolioUpdate, PortfolioUpdateSink, SubscriberRegistry, Subscription};
use crate::portfolio::{NewHolding, PortfolioSnapshot, PortfolioState};
use crate::scheduler::{
    SchedulerHandle, SystemTimeSource, TickHandler, TickScheduler, TimeSource,
};
use crate::settings::FeedConfig;

/// Tick pipeline shared with the scheduler tasks.
///
/// `pipeline` is held from the tick until publication returns, so subscribers
/// see updates in sequence order whichever thread drives the tick.
struct FeedCore {
    state: PortfolioState,
    analytics: Arc<dyn AnalyticsEngineTrait>,
    subscribers: SubscriberRegistry,
    current: RwLock<Arc<PortfolioUpdate>>,
    pipeline: Mutex<()>,
}

impl FeedCore {
    fn current(&self) -> Arc<PortfolioUpdate> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Applies one price tick, derives its metrics and publishes both.
    fn price_tick(&self, now: DateTime<Utc>) -> Option<Arc<PortfolioUpdate>> {
        let _pipeline = self.pipeline.lock().unwrap_or_else(PoisonError::into_inner);
        let snapshot = self.state.tick(now)?;
        let metrics = Arc::new(self.analytics.compute(&snapshot));
        let status = self.state.market_clock().status(now);
        let update = Arc::new(PortfolioUpdate::new(snapshot, status, metrics));

        {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            if update.sequence() < current.sequence() {
                debug!("Discarding stale update #{}", update.sequence());
                return None;
            }
            *current = Arc::clone(&update);
        }

        self.subscribers.publish(&update);
        Some(update)
    }

    /// Refreshes the market status. Subscribers hear about it only when the
    /// market opens or closes.
    fn market_check(&self, now: DateTime<Utc>) -> MarketStatus {
        let _pipeline = self.pipeline.lock().unwrap_or_else(PoisonError::into_inner);
        let status = self.state.market_clock().status(now);
        let changed = {
            let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
            let changed = current.market_status.is_open != status.is_open;
            *current = Arc::new(current.with_market_status(status));
            changed.then(|| Arc::clone(&current))
        };

        if let Some(update) = changed {
            info!(
                "Market is now {}",
                if status.is_open { "open" } else { "closed" }
            );
            self.subscribers.publish(&update);
        }
        status
    }
}

impl TickHandler for FeedCore {
    fn on_market_check(&self, now: DateTime<Utc>) {
        self.market_check(now);
    }

    fn on_price_tick(&self, now: DateTime<Utc>) {
        self.price_tick(now);
    }
}

/// Simulated real-time portfolio feed.
///
/// Owns the portfolio state, the analytics engine and the tick scheduler.
/// Consumers either subscribe for push updates or pull the current
/// snapshot, market status and metrics. All three pull accessors read the
/// same published [`PortfolioUpdate`].
///
/// # Lifecycle
///
/// `start` spawns the scheduler on the current Tokio runtime, `stop` ends it
/// and may be followed by another `start`. `dispose` stops the feed for good
/// and drops every subscriber.
pub struct PortfolioFeed {
    core: Arc<FeedCore>,
    scheduler: TickScheduler,
    time_source: Arc<dyn TimeSource>,
    handle: Mutex<Option<SchedulerHandle>>,
    disposed: AtomicBool,
}

impl PortfolioFeed {
    /// Builds a feed on the system clock, seeding random sources from
    /// `config.rng_seed`.
    pub fn new(config: FeedConfig, seed: Vec<NewHolding>) -> Result<Self> {
        let simulator = config.price_simulator();
        let jitter_rng = config.jitter_rng();
        Self::with_sources(config, seed, simulator, jitter_rng, Arc::new(SystemTimeSource))
    }

    /// Builds a feed with explicit random sources and clock.
    pub fn with_sources(
        config: FeedConfig,
        seed: Vec<NewHolding>,
        simulator: PriceSimulator,
        jitter_rng: Box<dyn RngCore + Send>,
        time_source: Arc<dyn TimeSource>,
    ) -> Result<Self> {
        config.validate()?;
        let clock = MarketClock::new(&config.market_hours);
        let state = PortfolioState::new(seed, clock, simulator, time_source.now())?;
        let analytics = Arc::new(AnalyticsEngine::new(
            config.sectors.clone(),
            config.risk.clone(),
            config.cash_balance,
            jitter_rng,
        ));
        Ok(Self::from_parts(&config, state, analytics, time_source))
    }

    /// Assembles a feed from already built components.
    ///
    /// Computes the initial market status and metrics, so the pull accessors
    /// are valid before `start`.
    pub fn from_parts(
        config: &FeedConfig,
        state: PortfolioState,
        analytics: Arc<dyn AnalyticsEngineTrait>,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        let now = time_source.now();
        let snapshot = state.get_snapshot();
        let metrics = Arc::new(analytics.compute(&snapshot));
        let status = state.market_clock().status(now);
        let initial = PortfolioUpdate::new(snapshot, status, metrics);

        let core = Arc::new(FeedCore {
            state,
            analytics,
            subscribers: SubscriberRegistry::new(),
            current: RwLock::new(Arc::new(initial)),
            pipeline: Mutex::new(()),
        });
        let scheduler = TickScheduler::new(
            config.tick_interval,
            config.market_check_interval,
            Arc::clone(&time_source),
        );

        Self {
            core,
            scheduler,
            time_source,
            handle: Mutex::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    /// Registers a subscriber for every published update.
    ///
    /// Updates are delivered one at a time in sequence order. A subscriber
    /// must not call [`tick_now`](Self::tick_now) or
    /// [`check_market_now`](Self::check_market_now) from its callback.
    pub fn subscribe(&self, sink: Arc<dyn PortfolioUpdateSink>) -> Subscription {
        self.core.subscribers.subscribe(sink)
    }

    pub fn subscriber_count(&self) -> usize {
        self.core.subscribers.len()
    }

    pub fn get_snapshot(&self) -> Arc<PortfolioSnapshot> {
        Arc::clone(&self.core.current().snapshot)
    }

    pub fn get_market_status(&self) -> MarketStatus {
        self.core.current().market_status
    }

    pub fn get_metrics(&self) -> Arc<DerivedMetrics> {
        Arc::clone(&self.core.current().metrics)
    }

    /// Snapshot, status and metrics as last published together.
    pub fn current_update(&self) -> Arc<PortfolioUpdate> {
        self.core.current()
    }

    /// Starts the scheduler on the current Tokio runtime.
    pub fn start(&self) -> Result<()> {
        if self.is_disposed() {
            return Err(SchedulerError::Disposed.into());
        }
        let mut handle = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        if handle.as_ref().is_some_and(SchedulerHandle::is_running) {
            return Err(SchedulerError::AlreadyRunning.into());
        }
        let tick_handler: Arc<dyn TickHandler> = self.core.clone();
        *handle = Some(self.scheduler.start(tick_handler)?);
        info!("Portfolio feed started");
        Ok(())
    }

    /// Stops the scheduler and waits for both loops to exit.
    pub async fn stop(&self) -> Result<()> {
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(SchedulerError::NotRunning)?;
        handle.stop().await;
        info!("Portfolio feed stopped");
        Ok(())
    }

    /// Stops the feed if running, drops all subscribers and prevents restarts.
    /// Calling it again is a no-op.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = handle {
            handle.stop().await;
        }
        self.core.subscribers.clear();
        info!("Portfolio feed disposed");
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(SchedulerHandle::is_running)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Runs one price tick now. Returns the published update, or `None` when
    /// the market is closed.
    pub fn tick_now(&self) -> Option<Arc<PortfolioUpdate>> {
        self.core.price_tick(self.time_source.now())
    }

    /// Runs one market-status check now.
    pub fn check_market_now(&self) -> MarketStatus {
        self.core.market_check(self.time_source.now())
    }
}
