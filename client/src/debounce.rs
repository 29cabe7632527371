//! [`Debouncer`] of rapidly changing inputs.

use std::time::Duration;

use tokio::{sync::mpsc, time};

/// Default quiet period of a [`Debouncer`].
pub const DEFAULT_PERIOD: Duration = Duration::from_millis(500);

/// Debouncer emitting only the latest of rapidly changing values.
///
/// Every input restarts the quiet period, and the latest value is emitted
/// once the quiet period elapses without any further input.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    /// Sender of the inputs to the debouncing task.
    input: mpsc::UnboundedSender<T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Spawns a new debouncing task with the provided quiet `period`,
    /// returning the [`Debouncer`] feeding it and the receiver of the
    /// debounced values.
    ///
    /// Once all the [`Debouncer`] clones are dropped, the pending value (if
    /// any) is emitted immediately and the task stops.
    #[must_use]
    pub fn spawn(period: Duration) -> (Self, mpsc::UnboundedReceiver<T>) {
        let (input, mut inputs) = mpsc::unbounded_channel();
        let (output, outputs) = mpsc::unbounded_channel();

        drop(tokio::spawn(async move {
            while let Some(mut latest) = inputs.recv().await {
                loop {
                    tokio::select! {
                        next = inputs.recv() => match next {
                            Some(value) => latest = value,
                            None => break,
                        },
                        () = time::sleep(period) => break,
                    }
                }
                if output.send(latest).is_err() {
                    break;
                }
            }
        }));

        (Self { input }, outputs)
    }

    /// Feeds the provided `value`, restarting the quiet period.
    pub fn input(&self, value: T) {
        if self.input.send(value).is_err() {
            tracing::debug!("debouncing task has stopped");
        }
    }
}
