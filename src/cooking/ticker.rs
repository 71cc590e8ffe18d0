use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Periodic tick source backed by a tokio task.
///
/// Dropping the ticker aborts the task and discards queued ticks, so a
/// stopped ticker can never deliver a late tick.
pub struct Ticker {
    task: JoinHandle<()>,
    ticks: mpsc::UnboundedReceiver<()>,
}

impl Ticker {
    /// Start ticking every `period`, first tick one period from now.
    /// Must be called from within a tokio runtime.
    pub fn start(period: Duration) -> Self {
        let (tx, ticks) = mpsc::unbounded_channel();
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(()).is_err() {
                    break;
                }
            }
        });
        Ticker { task, ticks }
    }

    /// Wait for the next tick.
    pub async fn tick(&mut self) -> Option<()> {
        self.ticks.recv().await
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
