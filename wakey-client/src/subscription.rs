use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Counts subscriptions that are still running.
#[derive(Debug, Clone, Default)]
pub struct LiveCount(Arc<AtomicUsize>);

impl LiveCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

/// A periodic background task that stops when the handle is dropped.
///
/// Ticks that fall behind are skipped rather than bunched up.
#[derive(Debug)]
pub struct Subscription {
    name: &'static str,
    handle: JoinHandle<()>,
    live: LiveCount,
}

impl Subscription {
    /// Ticks every `period`, the first time immediately.
    pub fn every<F, Fut>(name: &'static str, period: Duration, live: &LiveCount, tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::spawn(name, Instant::now(), period, live, tick)
    }

    /// Like [`every`](Self::every), but the first tick waits one period.
    pub fn every_after<F, Fut>(
        name: &'static str,
        period: Duration,
        live: &LiveCount,
        tick: F,
    ) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        Self::spawn(name, Instant::now() + period, period, live, tick)
    }

    fn spawn<F, Fut>(
        name: &'static str,
        start: Instant,
        period: Duration,
        live: &LiveCount,
        mut tick: F,
    ) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        live.0.fetch_add(1, Ordering::SeqCst);
        tracing::debug!("Starting {} subscription every {:?}", name, period);

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                tick().await;
            }
        });

        Self {
            name,
            handle,
            live: live.clone(),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
        self.live.0.fetch_sub(1, Ordering::SeqCst);
        tracing::debug!("Released {} subscription", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drop_stops_ticking() {
        let live = LiveCount::new();
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = ticks.clone();
        let subscription = Subscription::every("test", Duration::from_millis(10), &live, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        assert_eq!(live.get(), 1);

        time::sleep(Duration::from_millis(55)).await;
        drop(subscription);
        assert_eq!(live.get(), 0);

        let seen = ticks.load(Ordering::SeqCst);
        assert!(seen >= 2);

        time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), seen);
    }

    #[tokio::test]
    async fn test_every_after_skips_immediate_tick() {
        let live = LiveCount::new();
        let ticks = Arc::new(AtomicUsize::new(0));

        let counter = ticks.clone();
        let period = Duration::from_millis(40);
        let _subscription = Subscription::every_after("test", period, &live, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        time::sleep(Duration::from_millis(15)).await;
        assert_eq!(ticks.load(Ordering::SeqCst), 0);

        time::sleep(Duration::from_millis(60)).await;
        assert!(ticks.load(Ordering::SeqCst) >= 1);
    }
}
