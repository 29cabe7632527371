//! Modal [`Dialogs`] awaiting an answer of the user.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use derive_more::Display;
use tokio::sync::{mpsc, oneshot};

/// ID of a [`Dialog`] request.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub struct RequestId(u64);

/// Visual variant of a [`Dialog`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Variant {
    /// Neutral dialog.
    #[default]
    Primary,

    /// Successfully completed operation.
    Success,

    /// Destructive or failed operation.
    Error,
}

/// Modal dialog shown to the user.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Dialog {
    /// Question to be either confirmed or cancelled.
    Confirm {
        /// Title of the dialog.
        title: String,

        /// Question being asked.
        message: String,

        /// Label of the confirming button.
        confirm_text: String,

        /// Label of the cancelling button.
        cancel_text: String,

        /// [`Variant`] of the dialog.
        variant: Variant,
    },

    /// Notice to be acknowledged.
    Alert {
        /// Title of the dialog.
        title: String,

        /// Notice text.
        message: String,

        /// Label of the acknowledging button.
        confirm_text: String,

        /// [`Variant`] of the dialog.
        variant: Variant,
    },
}

/// State of a [`Dialog`] request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Requested, but nobody waits for the answer yet.
    Idle,

    /// Shown, waiting for the user to answer.
    AwaitingResponse,

    /// Answered, but the answer is not consumed yet.
    Resolved(bool),
}

/// Pending [`Dialog`] request.
#[derive(Debug)]
struct Pending {
    /// [`State`] of this request.
    state: State,

    /// Sender of the answer, taken once answered.
    answer: Option<oneshot::Sender<bool>>,

    /// Receiver of the answer, taken once waited for.
    waiter: Option<oneshot::Receiver<bool>>,
}

/// Table of the pending [`Dialog`] requests.
///
/// Callers wait for answers with [`Dialogs::wait()`], while the UI renders
/// the [`Dialog`]s received from [`Dialogs::new()`] and posts answers with
/// [`Dialogs::respond()`]. Clones share the same table.
#[derive(Clone, Debug)]
pub struct Dialogs {
    /// Shared table state.
    inner: Arc<Mutex<Inner>>,

    /// Sender of the requested [`Dialog`]s to the UI.
    shown: mpsc::UnboundedSender<(RequestId, Dialog)>,
}

/// State of [`Dialogs`].
#[derive(Debug, Default)]
struct Inner {
    /// Last issued [`RequestId`].
    last_id: u64,

    /// Pending requests.
    pending: HashMap<RequestId, Pending>,
}

impl Dialogs {
    /// Creates new [`Dialogs`], returning them along with the receiver of
    /// the requested [`Dialog`]s to be rendered by the UI.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(RequestId, Dialog)>) {
        let (shown, requests) = mpsc::unbounded_channel();
        (
            Self {
                inner: Arc::new(Mutex::new(Inner::default())),
                shown,
            },
            requests,
        )
    }

    /// Runs the provided function over the locked table state.
    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        f(&mut self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Requests the provided [`Dialog`] to be shown.
    pub fn request(&self, dialog: Dialog) -> RequestId {
        let (answer, waiter) = oneshot::channel();
        let id = self.with(|inner| {
            inner.last_id += 1;
            let id = RequestId(inner.last_id);
            _ = inner.pending.insert(
                id,
                Pending {
                    state: State::Idle,
                    answer: Some(answer),
                    waiter: Some(waiter),
                },
            );
            id
        });

        if self.shown.send((id, dialog)).is_err() {
            tracing::warn!("no UI renders dialogs, dismissing `{id}`");
            _ = self.with(|inner| inner.pending.remove(&id));
        }
        id
    }

    /// Returns the [`State`] of the request with the provided ID.
    ///
    /// [`None`] is returned for unknown or consumed requests.
    #[must_use]
    pub fn state(&self, id: RequestId) -> Option<State> {
        self.with(|inner| inner.pending.get(&id).map(|p| p.state))
    }

    /// Answers the request with the provided ID.
    ///
    /// Returns `false` if the request is unknown or answered already.
    pub fn respond(&self, id: RequestId, answer: bool) -> bool {
        self.with(|inner| {
            let Some(pending) = inner.pending.get_mut(&id) else {
                return false;
            };
            let Some(sender) = pending.answer.take() else {
                return false;
            };
            pending.state = State::Resolved(answer);
            sender.send(answer).is_ok()
        })
    }

    /// Dismisses the request with the provided ID without an answer, so its
    /// waiter resolves to [`None`].
    ///
    /// Returns `false` if the request is unknown or answered already.
    pub fn dismiss(&self, id: RequestId) -> bool {
        self.with(|inner| {
            inner
                .pending
                .get_mut(&id)
                .and_then(|pending| pending.answer.take())
                .is_some()
        })
    }

    /// Waits for the answer of the request with the provided ID, consuming
    /// it.
    ///
    /// [`None`] is returned if the request is unknown, waited for already, or
    /// dropped without an answer.
    pub async fn wait(&self, id: RequestId) -> Option<bool> {
        let waiter = self.with(|inner| {
            let pending = inner.pending.get_mut(&id)?;
            if pending.state == State::Idle {
                pending.state = State::AwaitingResponse;
            }
            pending.waiter.take()
        })?;

        let answer = waiter.await.ok();
        _ = self.with(|inner| inner.pending.remove(&id));
        answer
    }

    /// Asks the user to confirm the provided [`Dialog`].
    ///
    /// Resolves to `false` if the dialog is dismissed without an answer.
    pub async fn confirm(&self, dialog: Dialog) -> bool {
        let id = self.request(dialog);
        self.wait(id).await.unwrap_or(false)
    }

    /// Shows the provided [`Dialog`] and waits until the user acknowledges
    /// it.
    pub async fn alert(&self, dialog: Dialog) {
        let id = self.request(dialog);
        _ = self.wait(id).await;
    }
}

#[cfg(test)]
mod spec {
    use super::{Dialog, Dialogs, State, Variant};

    fn alert() -> Dialog {
        Dialog::Alert {
            title: "Saved".into(),
            message: "Done".into(),
            confirm_text: "OK".into(),
            variant: Variant::Success,
        }
    }

    fn confirm() -> Dialog {
        Dialog::Confirm {
            title: "Delete".into(),
            message: "Sure?".into(),
            confirm_text: "Delete".into(),
            cancel_text: "Cancel".into(),
            variant: Variant::Error,
        }
    }

    #[tokio::test]
    async fn transitions_through_states() {
        let (dialogs, mut shown) = Dialogs::new();

        let id = dialogs.request(alert());
        assert_eq!(dialogs.state(id), Some(State::Idle));
        assert_eq!(shown.recv().await, Some((id, alert())));

        let waiting = dialogs.clone();
        let answer = tokio::spawn(async move { waiting.wait(id).await });
        tokio::task::yield_now().await;
        assert_eq!(dialogs.state(id), Some(State::AwaitingResponse));

        assert!(dialogs.respond(id, true));
        assert!(!dialogs.respond(id, false));

        assert_eq!(answer.await.unwrap(), Some(true));
        assert_eq!(dialogs.state(id), None);
    }

    #[tokio::test]
    async fn keeps_early_answer() {
        let (dialogs, _shown) = Dialogs::new();

        let id = dialogs.request(alert());
        assert!(dialogs.respond(id, false));
        assert_eq!(dialogs.state(id), Some(State::Resolved(false)));

        assert_eq!(dialogs.wait(id).await, Some(false));
        assert_eq!(dialogs.wait(id).await, None);
    }

    #[tokio::test]
    async fn dismisses_dialogs_without_ui() {
        let (dialogs, shown) = Dialogs::new();
        drop(shown);

        let id = dialogs.request(alert());
        assert_eq!(dialogs.state(id), None);
        assert_eq!(dialogs.wait(id).await, None);

        assert!(!dialogs.confirm(confirm()).await);
        dialogs.alert(alert()).await;
    }

    #[tokio::test]
    async fn resolves_dismissed_request() {
        let (dialogs, _shown) = Dialogs::new();

        let id = dialogs.request(confirm());
        let waiting = dialogs.clone();
        let answer = tokio::spawn(async move { waiting.wait(id).await });
        tokio::task::yield_now().await;

        assert!(dialogs.dismiss(id));
        assert!(!dialogs.dismiss(id));
        assert!(!dialogs.respond(id, true));

        assert_eq!(answer.await.unwrap(), None);
        assert_eq!(dialogs.state(id), None);
    }

    #[tokio::test]
    async fn confirms_through_ui() {
        let (dialogs, mut shown) = Dialogs::new();

        let ui = dialogs.clone();
        drop(tokio::spawn(async move {
            while let Some((id, dialog)) = shown.recv().await {
                _ = ui.respond(id, matches!(dialog, Dialog::Confirm { .. }));
            }
        }));

        assert!(dialogs.confirm(confirm()).await);
        dialogs.alert(alert()).await;
    }
}
