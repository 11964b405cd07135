use crate::notify::Toaster;
use crate::pages::DocumentsPage;
use crate::preview::PreviewPage;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Redirect, Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    let toasts = state.toasts;
    provide_context(AppContext(state));

    // Router hooks (`use_params`, `use_navigate`) require a <Router> context.
    view! {
        <Router>
            <Routes fallback=|| view! { <div class="px-4 py-8 text-xs text-muted-foreground">"Not found"</div> }>
                <Route path=path!("documents") view=DocumentsPage />
                <Route path=path!("documents/:document_id") view=DocumentsPage />
                <Route path=path!("preview/:document_id") view=PreviewPage />
                <Route path=path!("") view=|| view! { <Redirect path="/documents" /> } />
            </Routes>
        </Router>
        <Toaster queue=toasts />
    }
}
