//! Three-state (loading / success / error) notifications tied to a mutation.

mod toaster;

pub(crate) use toaster::{ToastQueue, Toaster};

use crate::error::StoreResult;
use crate::store::MutationFuture;
use futures::FutureExt;
use leptos::logging::warn;
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct ToastId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum ToastKind {
    Loading,
    Success,
    Error,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ToastMessages {
    pub loading: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

pub(crate) const RESTORE_MESSAGES: ToastMessages = ToastMessages {
    loading: "Restoring note...",
    success: "Note restored!",
    error: "Failed to restore note.",
};

pub(crate) const REMOVE_MESSAGES: ToastMessages = ToastMessages {
    loading: "Deleting note...",
    success: "Note deleted!",
    error: "Failed to delete note.",
};

pub(crate) const TRASH_MESSAGES: ToastMessages = ToastMessages {
    loading: "Moving to trash...",
    success: "Note moved to trash!",
    error: "Failed to archive note.",
};

pub(crate) trait Notifier: Send + Sync {
    fn open(&self, kind: ToastKind, message: &str) -> ToastId;
    fn update(&self, id: ToastId, kind: ToastKind, message: &str);
}

/// Shows the loading toast now and swaps it for exactly one outcome toast once
/// `mutation` resolves. The outcome is passed through so callers can react to it.
pub(crate) fn toast_promise(
    notifier: Arc<dyn Notifier>,
    mutation: MutationFuture,
    messages: ToastMessages,
) -> MutationFuture {
    let id = notifier.open(ToastKind::Loading, messages.loading);

    async move {
        let outcome: StoreResult<()> = mutation.await;
        match &outcome {
            Ok(()) => notifier.update(id, ToastKind::Success, messages.success),
            Err(e) => {
                warn!("{}: {e}", messages.error);
                notifier.update(id, ToastKind::Error, messages.error);
            }
        }
        outcome
    }
    .boxed_local()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Records every state a toast passes through, keyed by toast id.
    #[derive(Default)]
    pub(crate) struct RecordingNotifier {
        pub events: Mutex<Vec<(ToastId, ToastKind, String)>>,
    }

    impl RecordingNotifier {
        pub fn kinds(&self) -> Vec<ToastKind> {
            self.events.lock().unwrap().iter().map(|e| e.1).collect()
        }

        pub fn messages(&self) -> Vec<String> {
            self.events.lock().unwrap().iter().map(|e| e.2.clone()).collect()
        }
    }

    impl Notifier for RecordingNotifier {
        fn open(&self, kind: ToastKind, message: &str) -> ToastId {
            let mut events = self.events.lock().unwrap();
            let id = ToastId(events.len() as u64);
            events.push((id, kind, message.to_string()));
            id
        }

        fn update(&self, id: ToastId, kind: ToastKind, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push((id, kind, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingNotifier;
    use super::*;
    use crate::error::StoreError;
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_loading_is_shown_before_the_mutation_runs() {
        let notifier = Arc::new(RecordingNotifier::default());
        let fut = toast_promise(
            notifier.clone(),
            async { Ok::<(), StoreError>(()) }.boxed_local(),
            RESTORE_MESSAGES,
        );

        assert_eq!(notifier.kinds(), vec![ToastKind::Loading]);
        drop(fut);
    }

    #[test]
    fn test_success_replaces_loading() {
        let notifier = Arc::new(RecordingNotifier::default());
        let out = block_on(toast_promise(
            notifier.clone(),
            async { Ok::<(), StoreError>(()) }.boxed_local(),
            RESTORE_MESSAGES,
        ));

        assert!(out.is_ok());
        assert_eq!(notifier.kinds(), vec![ToastKind::Loading, ToastKind::Success]);
        assert_eq!(
            notifier.messages(),
            vec!["Restoring note...".to_string(), "Note restored!".to_string()]
        );
        let events = notifier.events.lock().unwrap();
        assert_eq!(events[0].0, events[1].0);
    }

    #[test]
    fn test_error_replaces_loading_and_is_returned() {
        let notifier = Arc::new(RecordingNotifier::default());
        let out = block_on(toast_promise(
            notifier.clone(),
            async { Err::<(), _>(StoreError::transient("offline")) }.boxed_local(),
            REMOVE_MESSAGES,
        ));

        assert!(out.is_err());
        assert_eq!(notifier.kinds(), vec![ToastKind::Loading, ToastKind::Error]);
        assert_eq!(notifier.messages()[1], "Failed to delete note.");
    }
}
