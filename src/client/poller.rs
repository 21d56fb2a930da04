use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

/// Runs a fetch closure on a fixed interval. `refresh_now` fires the closure
/// immediately and restarts the countdown. Dropping the poller aborts the
/// task, which is how a view stops polling on teardown.
pub struct Poller {
    handle: JoinHandle<()>,
    refresh: Arc<Notify>,
}

impl Poller {
    pub fn spawn<F, Fut>(period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let refresh = Arc::new(Notify::new());
        let wakeup = refresh.clone();
        let handle = tokio::spawn(async move {
            loop {
                tick().await;
                tokio::select! {
                    _ = tokio::time::sleep(period) => {}
                    _ = wakeup.notified() => {}
                }
            }
        });
        Self { handle, refresh }
    }

    /// Re-issues the request immediately; the interval timer starts over.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn ticks_repeatedly_on_interval() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let _poller = Poller::spawn(Duration::from_millis(10), move || {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(55)).await;
        assert!(count.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn refresh_now_triggers_an_immediate_tick() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let poller = Poller::spawn(Duration::from_secs(60), move || {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        // Let the initial tick land, then force a second one long before the
        // interval would fire.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);

        poller.refresh_now();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn drop_stops_polling() {
        let count = Arc::new(AtomicUsize::new(0));
        let seen = count.clone();
        let poller = Poller::spawn(Duration::from_millis(10), move || {
            let seen = seen.clone();
            async move {
                seen.fetch_add(1, Ordering::SeqCst);
            }
        });

        tokio::time::sleep(Duration::from_millis(25)).await;
        drop(poller);
        // Give any in-flight tick a moment to settle before sampling.
        tokio::time::sleep(Duration::from_millis(5)).await;
        let after_drop = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
