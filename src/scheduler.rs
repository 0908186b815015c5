use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// A repeating background task that runs `tick` every `period`.
///
/// The first tick fires one full period after start. Stopping only prevents
/// future ticks: a tick already running is left to finish. Dropping the handle
/// stops the task the same way.
#[derive(Debug)]
pub struct LiveUpdates {
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl LiveUpdates {
    /// Spawn the task on the current tokio runtime.
    pub fn start<F, Fut>(period: Duration, tick: F) -> Self
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop, mut stopped) = watch::channel(false);
        let period = period.max(Duration::from_millis(1));
        info!(period_ms = period.as_millis() as u64, "starting live updates");

        let handle = tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = stopped.changed() => break,
                    _ = timer.tick() => {}
                }
                debug!("live update tick");
                tick().await;
            }
            debug!("live updates stopped");
        });

        Self { stop, handle }
    }

    /// Signal the task to stop after any in-flight tick.
    pub fn stop(self) -> JoinHandle<()> {
        // Err means the task already exited.
        let _ = self.stop.send(true);
        self.handle
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
