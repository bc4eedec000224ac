//! Periodic market-check and price-tick loops.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, info, warn};
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{TickHandler, TimeSource};
use crate::errors::{Error, Result, SchedulerError};

/// Spawns the market-check and price-tick loops on the current Tokio runtime.
///
/// At start the market check runs once synchronously, then the price tick
/// fires immediately; after that each runs on its own period. A tick that
/// falls behind is skipped rather than replayed in a burst.
pub struct TickScheduler {
    tick_interval: Duration,
    market_check_interval: Duration,
    time_source: Arc<dyn TimeSource>,
}

impl TickScheduler {
    pub fn new(
        tick_interval: Duration,
        market_check_interval: Duration,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            tick_interval,
            market_check_interval,
            time_source,
        }
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn market_check_interval(&self) -> Duration {
        self.market_check_interval
    }

    /// Starts both loops. Must be called from within a Tokio runtime.
    pub fn start(&self, handler: Arc<dyn TickHandler>) -> Result<SchedulerHandle> {
        if self.tick_interval.is_zero() || self.market_check_interval.is_zero() {
            return Err(Error::InvalidConfigValue(
                "scheduler intervals must be greater than zero".to_string(),
            ));
        }
        let runtime = Handle::try_current().map_err(|_| SchedulerError::NoRuntime)?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let first_check = Arc::clone(&handler);
        let now = self.time_source.now();
        guarded("market check", || first_check.on_market_check(now));

        let market_task = {
            let handler = Arc::clone(&handler);
            let time_source = Arc::clone(&self.time_source);
            spawn_loop(
                &runtime,
                "market check",
                self.market_check_interval,
                Instant::now() + self.market_check_interval,
                shutdown_rx.clone(),
                move || handler.on_market_check(time_source.now()),
            )
        };

        let price_task = {
            let time_source = Arc::clone(&self.time_source);
            spawn_loop(
                &runtime,
                "price tick",
                self.tick_interval,
                Instant::now(),
                shutdown_rx,
                move || handler.on_price_tick(time_source.now()),
            )
        };

        info!(
            "Tick scheduler started (price tick every {:?}, market check every {:?})",
            self.tick_interval, self.market_check_interval
        );

        Ok(SchedulerHandle {
            shutdown: shutdown_tx,
            tasks: vec![market_task, price_task],
        })
    }
}

/// Controls a running scheduler.
///
/// Dropping the handle also ends both loops, without waiting for them.
pub struct SchedulerHandle {
    shutdown: watch::Sender<bool>,
    tasks: Vec<JoinHandle<()>>,
}

impl SchedulerHandle {
    /// Signals both loops and waits until they have exited. A tick that is
    /// already running completes first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        for task in self.tasks {
            if let Err(e) = task.await {
                warn!("Scheduler task ended abnormally: {}", e);
            }
        }
        info!("Tick scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.tasks.iter().any(|task| !task.is_finished())
    }
}

fn spawn_loop<F>(
    runtime: &Handle,
    name: &'static str,
    period: Duration,
    first_tick: Instant,
    mut shutdown: watch::Receiver<bool>,
    activity: F,
) -> JoinHandle<()>
where
    F: Fn() + Send + 'static,
{
    runtime.spawn(async move {
        let mut ticker = interval_at(first_tick, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = ticker.tick() => guarded(name, &activity),
            }
        }
        debug!("Scheduler loop '{}' exited", name);
    })
}

/// Runs one activity, containing any panic so the cadence keeps going.
fn guarded(name: &str, activity: impl Fn()) {
    if catch_unwind(AssertUnwindSafe(activity)).is_err() {
        error!("Scheduler {} handler panicked; continuing on next cadence", name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::{FixedTimeSource, SystemTimeSource};
    use chrono::{DateTime, TimeZone, Utc};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        events: Mutex<Vec<(&'static str, DateTime<Utc>)>>,
        panic_on_tick: bool,
    }

    impl RecordingHandler {
        fn count(&self, kind: &str) -> usize {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|(k, _)| *k == kind)
                .count()
        }
    }

    impl TickHandler for RecordingHandler {
        fn on_market_check(&self, now: DateTime<Utc>) {
            self.events.lock().unwrap().push(("check", now));
        }

        fn on_price_tick(&self, now: DateTime<Utc>) {
            self.events.lock().unwrap().push(("tick", now));
            if self.panic_on_tick {
                panic!("tick handler failure");
            }
        }
    }

    fn scheduler(tick_ms: u64, check_ms: u64) -> TickScheduler {
        TickScheduler::new(
            Duration::from_millis(tick_ms),
            Duration::from_millis(check_ms),
            Arc::new(SystemTimeSource),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_cadences_run_independently() {
        let handler = Arc::new(RecordingHandler::default());
        let handle = scheduler(3_000, 60_000).start(handler.clone()).unwrap();

        tokio::time::sleep(Duration::from_millis(9_500)).await;
        assert_eq!(handler.count("tick"), 4);
        assert_eq!(handler.count("check"), 1);

        tokio::time::sleep(Duration::from_millis(60_000)).await;
        assert_eq!(handler.count("check"), 2);
        assert_eq!(handler.count("tick"), 24);

        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_market_check_runs_first() {
        let handler = Arc::new(RecordingHandler::default());
        let handle = scheduler(3_000, 60_000).start(handler.clone()).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        let events = handler.events.lock().unwrap().clone();
        assert_eq!(events[0].0, "check");
        assert_eq!(events[1].0, "tick");
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_both_loops() {
        let handler = Arc::new(RecordingHandler::default());
        let handle = scheduler(1_000, 5_000).start(handler.clone()).unwrap();
        tokio::time::sleep(Duration::from_millis(2_500)).await;
        assert!(handle.is_running());

        handle.stop().await;
        let recorded = handler.events.lock().unwrap().len();

        tokio::time::sleep(Duration::from_millis(30_000)).await;
        assert_eq!(handler.events.lock().unwrap().len(), recorded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_handler_keeps_cadence() {
        let handler = Arc::new(RecordingHandler {
            panic_on_tick: true,
            ..RecordingHandler::default()
        });
        let handle = scheduler(3_000, 60_000).start(handler.clone()).unwrap();

        tokio::time::sleep(Duration::from_millis(6_500)).await;
        assert_eq!(handler.count("tick"), 3);
        assert!(handle.is_running());
        handle.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_handlers_receive_time_source_instant() {
        let at = Utc.with_ymd_and_hms(2024, 9, 11, 14, 0, 0).unwrap();
        let handler = Arc::new(RecordingHandler::default());
        let handle = TickScheduler::new(
            Duration::from_secs(3),
            Duration::from_secs(60),
            Arc::new(FixedTimeSource::new(at)),
        )
        .start(handler.clone())
        .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.stop().await;

        assert!(handler.events.lock().unwrap().iter().all(|(_, now)| *now == at));
    }

    #[test]
    fn test_start_without_runtime_fails() {
        let result = scheduler(3_000, 60_000).start(Arc::new(RecordingHandler::default()));
        assert!(matches!(
            result,
            Err(Error::Scheduler(SchedulerError::NoRuntime))
        ));
    }

    #[tokio::test]
    async fn test_zero_interval_rejected() {
        let result = scheduler(0, 60_000).start(Arc::new(RecordingHandler::default()));
        assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
    }
}
