use super::cover::Cover;
use super::toolbar::Toolbar;
use super::{layout, EditorSlot, PreviewBinding, PreviewState, RenderContext};
use crate::components::ui::{Spinner, SpinnerSize};
use crate::editor::ReadOnlyEditor;
use crate::models::{Document, DocumentId};
use crate::navigation::use_route_document_id;
use crate::state::AppContext;
use crate::store::Lookup;
use crate::subscription::Subscription;
use leptos::prelude::*;
use std::sync::Arc;
use tw_merge::tw_merge;

/// Public read-only page at `/preview/:document_id`.
#[component]
pub fn PreviewPage() -> impl IntoView {
    let id = use_route_document_id();

    view! {
        <div class="min-h-full dark:bg-[#1F1F1F]">
            <DocumentPreview id=id />
        </div>
    }
}

/// Reactive read of one document, re-subscribed whenever `id` changes.
///
/// The previous subscription is cancelled before the new one is opened, so a
/// late snapshot for an old id never reaches the returned state.
pub(crate) fn use_document(id: Signal<Option<DocumentId>>) -> Memo<PreviewState> {
    let app_state = expect_context::<AppContext>();
    let store = StoredValue::new(app_state.0.store.clone());

    let binding: RwSignal<PreviewBinding> = RwSignal::new(PreviewBinding::default());
    let subscription: StoredValue<Option<Subscription>> = StoredValue::new(None);

    Effect::new(move |_| {
        let next = id.get();
        let Some(generation) = binding.try_update(|b| b.bind(next.clone())).flatten() else {
            return;
        };
        subscription.update_value(|s| *s = None);

        let Some(doc_id) = next else {
            binding.update(|b| {
                b.apply(generation, Lookup::NotFound);
            });
            return;
        };

        let handle = store.with_value(|s| {
            s.get_by_id(
                &doc_id,
                Arc::new(move |lookup: Lookup| {
                    binding.try_update(|b| b.apply(generation, lookup));
                }),
            )
        });
        subscription.set_value(Some(handle));
    });

    on_cleanup(move || {
        subscription.try_update_value(|s| s.take());
    });

    Memo::new(move |_| binding.with(|b| b.state().clone()))
}

#[component]
pub(crate) fn DocumentPreview(#[prop(into)] id: Signal<Option<DocumentId>>) -> impl IntoView {
    let state = use_document(id);

    move || match state.get() {
        PreviewState::Resolving => view! { <ResolvingDocument /> }.into_any(),
        PreviewState::NotFound => view! { <MissingDocument /> }.into_any(),
        PreviewState::Found(document) => view! { <DocumentView document=document /> }.into_any(),
    }
}

#[component]
pub(crate) fn ResolvingDocument() -> impl IntoView {
    view! {
        <div class="flex h-full items-center justify-center p-10">
            <Spinner size=SpinnerSize::Lg />
        </div>
    }
}

#[component]
pub(crate) fn MissingDocument() -> impl IntoView {
    view! { <div class="px-4 py-8 text-center text-sm text-muted-foreground">"Not found"</div> }
}

/// Cover, toolbar and editor for a resolved document. Nothing here writes back.
#[component]
pub(crate) fn DocumentView(document: Document) -> impl IntoView {
    let layout = layout(&document, RenderContext::current());
    let container = tw_merge!("mx-auto", layout.width.class());
    let content = document.content.clone();

    view! {
        <div class="pb-40" data-name="DocumentView">
            <Cover url=layout.cover_url />
            <div class=container data-width=format!("{:?}", layout.width)>
                <Toolbar document=document />
                {match layout.editor {
                    EditorSlot::ReadOnly => view! { <ReadOnlyEditor content=content /> }.into_any(),
                    EditorSlot::Deferred => view! { <div class="pl-[54px] pr-4" /> }.into_any(),
                }}
            </div>
        </div>
    }
}
