//! Search input debouncing.
//!
//! Keystrokes arrive on a channel; a background task forwards only the last
//! value of each burst once the input has been quiet for the window.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Default quiet window before a search value is applied
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Input side of a debouncer. Dropping it flushes any pending value and
/// stops the background task.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    sender: mpsc::Sender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawn the debouncing task on the current tokio runtime.
    pub fn spawn(window: Duration, buffer_size: usize) -> (Self, mpsc::Receiver<T>) {
        let (sender, input) = mpsc::channel(buffer_size);
        let (output, receiver) = mpsc::channel(buffer_size);
        tokio::spawn(run(input, output, window));
        (Self { sender }, receiver)
    }

    /// Offer a new value; returns `false` once the task has stopped.
    pub async fn push(&self, value: T) -> bool {
        self.sender.send(value).await.is_ok()
    }
}

async fn run<T>(mut input: mpsc::Receiver<T>, output: mpsc::Sender<T>, window: Duration) {
    let mut pending: Option<T> = None;
    loop {
        let Some(value) = pending.take() else {
            match input.recv().await {
                Some(value) => {
                    pending = Some(value);
                    continue;
                }
                None => break,
            }
        };

        tokio::select! {
            next = input.recv() => match next {
                Some(newer) => pending = Some(newer),
                None => {
                    let _ = output.send(value).await;
                    break;
                }
            },
            () = tokio::time::sleep(window) => {
                debug!(window = ?window, "Debounce window elapsed");
                if output.send(value).await.is_err() {
                    warn!("Debounce receiver dropped");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_value() {
        let (debouncer, mut out) = Debouncer::spawn(DEFAULT_DEBOUNCE, 16);
        for value in ["v", "ve", "ver", "vero"] {
            assert!(debouncer.push(value.to_string()).await);
        }

        assert_eq!(out.recv().await.as_deref(), Some("vero"));

        drop(debouncer);
        assert_eq!(out.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn separated_bursts_emit_separately() {
        let (debouncer, mut out) = Debouncer::spawn(DEFAULT_DEBOUNCE, 16);

        debouncer.push("arts").await;
        tokio::time::sleep(Duration::from_millis(400)).await;
        debouncer.push("science").await;
        tokio::time::sleep(Duration::from_millis(100)).await;
        debouncer.push("sci").await;

        assert_eq!(out.recv().await.as_deref(), Some("arts"));
        assert_eq!(out.recv().await.as_deref(), Some("sci"));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_input_flushes_pending_value() {
        let (debouncer, mut out) = Debouncer::spawn(Duration::from_secs(60), 4);
        debouncer.push(1).await;
        drop(debouncer);

        assert_eq!(out.recv().await, Some(1));
        assert_eq!(out.recv().await, None);
    }
}
