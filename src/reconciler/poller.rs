use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Handle to a running poll loop. Cancel it on view teardown; the loop also
/// stops when the handle is dropped.
pub struct PollerHandle {
    name: String,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl PollerHandle {
    /// Signal the loop to stop after the current tick.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Cancel and wait for the loop to finish.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Run `tick` every `interval` until cancelled.
///
/// The first tick runs after one interval, matching a view that renders its
/// initial read itself and only polls for drift afterwards.
pub fn spawn_poller<F>(name: &str, interval: Duration, mut tick: F) -> PollerHandle
where
    F: FnMut() + Send + 'static,
{
    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    let loop_name = name.to_string();

    let handle = tokio::spawn(async move {
        debug!("Poller {} started ({:?})", loop_name, interval);
        loop {
            tokio::select! {
                _ = loop_cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => tick(),
            }
        }
        debug!("Poller {} stopped", loop_name);
    });

    PollerHandle {
        name: name.to_string(),
        cancel,
        handle: Some(handle),
    }
}

/// Re-derive a value every `interval` and invoke `on_change` when it differs
/// from the previous one. `on_change` also fires once with the initial value.
///
/// This is the drift-healing path: `fetch` should re-read from the
/// repositories, so changes made by another process (which never reach the
/// in-process event bus) become visible within one interval.
pub fn spawn_watch<T, F, C>(name: &str, interval: Duration, mut fetch: F, mut on_change: C) -> PollerHandle
where
    T: PartialEq + Send + 'static,
    F: FnMut() -> T + Send + 'static,
    C: FnMut(&T) + Send + 'static,
{
    let cancel = CancellationToken::new();
    let loop_cancel = cancel.clone();
    let loop_name = name.to_string();

    let handle = tokio::spawn(async move {
        debug!("Watch {} started ({:?})", loop_name, interval);
        let mut last = fetch();
        on_change(&last);

        loop {
            tokio::select! {
                _ = loop_cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {
                    let value = fetch();
                    if value != last {
                        on_change(&value);
                        last = value;
                    }
                }
            }
        }
        debug!("Watch {} stopped", loop_name);
    });

    PollerHandle {
        name: name.to_string(),
        cancel,
        handle: Some(handle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn test_poller_ticks_until_cancelled() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        let poller = spawn_poller("test", Duration::from_millis(10), move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        poller.shutdown().await;
        let ticks = count.load(Ordering::SeqCst);
        assert!(ticks >= 2, "expected at least 2 ticks, got {}", ticks);

        // No more ticks after shutdown.
        let after = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), after);
    }

    #[tokio::test]
    async fn test_watch_fires_only_on_change() {
        let source = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));

        let source_clone = source.clone();
        let seen_clone = seen.clone();
        let watch = spawn_watch(
            "test",
            Duration::from_millis(10),
            move || source_clone.load(Ordering::SeqCst),
            move |value| seen_clone.lock().unwrap().push(*value),
        );

        tokio::time::sleep(Duration::from_millis(40)).await;
        source.store(7, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(40)).await;
        watch.shutdown().await;

        let seen = seen.lock().unwrap();
        // Initial value once, then the single change once.
        assert_eq!(seen.as_slice(), &[0, 7]);
    }

    #[tokio::test]
    async fn test_dropping_handle_cancels_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let count_clone = count.clone();

        let poller = spawn_poller("test", Duration::from_millis(10), move || {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });
        drop(poller);

        tokio::time::sleep(Duration::from_millis(50)).await;
        let after_drop = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(count.load(Ordering::SeqCst), after_drop);
    }
}
