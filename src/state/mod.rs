use crate::config::EnvConfig;
use crate::notify::{Notifier, ToastQueue};
use crate::store::{open_store, DocumentStore};
use leptos::logging::log;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    /// Shared handle to the Document Store; the only owner of document state.
    pub store: Arc<dyn DocumentStore>,

    pub toasts: ToastQueue,
}

impl AppState {
    pub fn new() -> Self {
        let config = EnvConfig::new();
        log!("document store backend: {} ({})", config.store, config.api_url);
        let store = open_store(&config);

        Self {
            store,
            toasts: ToastQueue::new(),
        }
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::new(self.toasts)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub(crate) struct AppContext(pub AppState);
