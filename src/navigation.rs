use crate::models::DocumentId;
use leptos::logging::log;
use leptos::prelude::*;
use leptos_router::hooks::use_params;
use leptos_router::params::Params;
use leptos_router::NavigateOptions;
use std::sync::Arc;

pub(crate) const DOCUMENTS_PATH: &str = "/documents";

pub(crate) fn document_path(id: &DocumentId) -> String {
    format!("{}/{}", DOCUMENTS_PATH, urlencoding::encode(id.as_str()))
}

pub(crate) fn preview_path(id: &DocumentId) -> String {
    format!("/preview/{}", urlencoding::encode(id.as_str()))
}

#[derive(Params, PartialEq, Clone, Debug)]
pub(crate) struct DocumentRouteParams {
    pub document_id: Option<String>,
}

/// Id of the document named by the current route, if any.
pub(crate) fn use_route_document_id() -> Signal<Option<DocumentId>> {
    let params = use_params::<DocumentRouteParams>();
    Signal::derive(move || {
        params
            .get()
            .ok()
            .and_then(|p| p.document_id)
            .filter(|id| !id.is_empty())
            .map(DocumentId::new)
    })
}

/// Best-effort route transition. Failing to navigate is not reported.
pub(crate) trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}

/// Adapts the router's `use_navigate()` closure.
pub(crate) struct RouterNavigator<F> {
    navigate: F,
}

impl<F> RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions) + Send + Sync,
{
    pub fn new(navigate: F) -> Self {
        Self { navigate }
    }
}

impl<F> Navigator for RouterNavigator<F>
where
    F: Fn(&str, NavigateOptions) + Send + Sync,
{
    fn navigate_to(&self, path: &str) {
        (self.navigate)(path, NavigateOptions::default());
    }
}

#[derive(Clone)]
pub(crate) struct NavigationCoordinator {
    navigator: Arc<dyn Navigator>,
    fallback: String,
}

impl NavigationCoordinator {
    pub fn new(navigator: Arc<dyn Navigator>) -> Self {
        Self {
            navigator,
            fallback: DOCUMENTS_PATH.to_string(),
        }
    }

    /// Redirects away from `removed` if it is the document currently open.
    ///
    /// Issued on intent: callers invoke this right after dispatching the removal,
    /// without waiting for the mutation to resolve.
    pub fn on_removed(&self, removed: &DocumentId, currently_open: Option<&DocumentId>) -> bool {
        if currently_open != Some(removed) {
            return false;
        }
        log!("document {removed} removed while open, redirecting to {}", self.fallback);
        self.navigator.navigate_to(&self.fallback);
        true
    }

    pub fn open(&self, id: &DocumentId) {
        self.navigator.navigate_to(&document_path(id));
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNavigator;
    use super::*;

    fn coordinator() -> (Arc<RecordingNavigator>, NavigationCoordinator) {
        let nav = Arc::new(RecordingNavigator::default());
        let coordinator = NavigationCoordinator::new(nav.clone());
        (nav, coordinator)
    }

    #[test]
    fn test_redirects_when_removed_document_is_open() {
        let (nav, c) = coordinator();
        let b = DocumentId::new("b");

        assert!(c.on_removed(&b, Some(&b)));
        assert_eq!(nav.visits(), vec!["/documents".to_string()]);
    }

    #[test]
    fn test_no_redirect_for_other_or_no_open_document() {
        let (nav, c) = coordinator();
        let a = DocumentId::new("a");
        let b = DocumentId::new("b");

        assert!(!c.on_removed(&a, Some(&b)));
        assert!(!c.on_removed(&a, None));
        assert!(nav.visits().is_empty());
    }

    #[test]
    fn test_paths_encode_ids() {
        let id = DocumentId::new("a b/c");
        assert_eq!(document_path(&id), "/documents/a%20b%2Fc");
        assert_eq!(preview_path(&id), "/preview/a%20b%2Fc");
    }

    #[test]
    fn test_open_navigates_to_document() {
        let (nav, c) = coordinator();
        c.open(&DocumentId::new("k1"));
        assert_eq!(nav.visits(), vec!["/documents/k1".to_string()]);
    }
}
