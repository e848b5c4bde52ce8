//! Keystroke debouncing for search inputs
//!
//! Every edit to a search field calls [`Debouncer::trigger`]; only the
//! call that is still the latest one after the quiet period reports
//! `true`, so a burst of keystrokes produces a single request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

pub const TYPING_DELAY: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Wait out the quiet period; returns whether this trigger is still
    /// the latest one and should issue the request.
    pub async fn trigger(&self) -> bool {
        let my_generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        sleep(self.delay).await;
        self.generation.load(Ordering::SeqCst) == my_generation
    }

    /// Cancel any trigger currently waiting
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(TYPING_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[tokio::test(start_paused = true)]
    async fn burst_of_triggers_issues_one_request() {
        let debouncer = Debouncer::new(Duration::from_millis(500));
        let requests = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let debouncer = debouncer.clone();
            let requests = requests.clone();
            handles.push(tokio::spawn(async move {
                if debouncer.trigger().await {
                    requests.fetch_add(1, Ordering::SeqCst);
                }
            }));
            // Keystrokes 100ms apart, well inside the quiet period
            tokio::time::advance(Duration::from_millis(100)).await;
        }

        tokio::time::advance(Duration::from_millis(500)).await;
        for handle in handles {
            handle.await.unwrap();
        }
        assert_eq!(requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn triggers_separated_by_the_quiet_period_both_fire() {
        let debouncer = Debouncer::new(Duration::from_millis(500));

        let first = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.trigger().await }
        });
        tokio::time::advance(Duration::from_millis(600)).await;
        assert!(first.await.unwrap());

        let second = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.trigger().await }
        });
        tokio::time::advance(Duration::from_millis(600)).await;
        assert!(second.await.unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_suppresses_a_pending_trigger() {
        let debouncer = Debouncer::new(Duration::from_millis(500));

        let pending = tokio::spawn({
            let debouncer = debouncer.clone();
            async move { debouncer.trigger().await }
        });
        tokio::time::advance(Duration::from_millis(100)).await;
        debouncer.cancel();
        tokio::time::advance(Duration::from_millis(500)).await;

        assert!(!pending.await.unwrap());
    }
}
