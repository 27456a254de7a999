//! Cancellable debounce timer.
//!
//! Each [`Debouncer::call`] replaces any pending invocation, so a burst of
//! keystrokes collapses into one callback after the quiescent interval.
//! [`Debouncer::cancel`] is the teardown hook: the owning controller calls
//! it (or just drops the debouncer) when the view unmounts, and no callback
//! fires afterwards.
//!
//! Must be used from within a tokio runtime.

use std::time::Duration;

use tokio::task::JoinHandle;

pub struct Debouncer {
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `f` to run after the quiescent interval, replacing any
    /// previously scheduled call that has not fired yet.
    pub fn call<F>(&mut self, f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        }));
    }

    /// Abort the pending call, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_last_call() {
        let (tx, mut rx) = mpsc::unbounded_channel::<&str>();
        let mut debouncer = Debouncer::from_millis(300);

        for text in ["p", "pr", "printer"] {
            let tx = tx.clone();
            debouncer.call(move || {
                let _ = tx.send(text);
            });
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(rx.try_recv(), Ok("printer"));
        assert!(rx.try_recv().is_err(), "only the last call may fire");
        assert!(!debouncer.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_suppresses_pending_call() {
        let (tx, mut rx) = mpsc::unbounded_channel::<&str>();
        let mut debouncer = Debouncer::from_millis(300);

        let sender = tx.clone();
        debouncer.call(move || {
            let _ = sender.send("fired");
        });
        debouncer.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_acts_as_teardown() {
        let (tx, mut rx) = mpsc::unbounded_channel::<&str>();

        {
            let mut debouncer = Debouncer::from_millis(300);
            let sender = tx.clone();
            debouncer.call(move || {
                let _ = sender.send("fired");
            });
        }

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_separate_quiet_periods_each_fire() {
        let (tx, mut rx) = mpsc::unbounded_channel::<u32>();
        let mut debouncer = Debouncer::from_millis(100);

        let sender = tx.clone();
        debouncer.call(move || {
            let _ = sender.send(1);
        });
        tokio::time::sleep(Duration::from_millis(200)).await;

        let sender = tx.clone();
        debouncer.call(move || {
            let _ = sender.send(2);
        });
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(rx.try_recv(), Ok(1));
        assert_eq!(rx.try_recv(), Ok(2));
    }
}
