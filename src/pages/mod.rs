use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::models::{Document, DocumentId};
use crate::navigation::{preview_path, use_route_document_id};
use crate::notify::{toast_promise, TRASH_MESSAGES};
use crate::preview::{use_document, DocumentView, MissingDocument, PreviewState, ResolvingDocument};
use crate::state::AppContext;
use crate::trash::TrashBox;
use icons::{Eye, Trash};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Workspace shell for `/documents` and `/documents/:document_id`: the trash
/// sidebar plus the open document, if the route names one.
#[component]
pub fn DocumentsPage() -> impl IntoView {
    let open_id = use_route_document_id();

    view! {
        <div class="min-h-screen bg-background text-foreground">
            <div class="mx-auto flex min-h-screen w-full max-w-6xl gap-4 px-4 py-6">
                <aside class="w-72 shrink-0">
                    <div class="sticky top-6 space-y-2">
                        <h2 class="px-2 text-sm font-medium text-foreground">"Trash"</h2>
                        <TrashBox currently_open=open_id />
                    </div>
                </aside>

                <main class="min-w-0 flex-1">
                    <Show
                        when=move || open_id.get().is_some()
                        fallback=|| view! {
                            <div class="px-4 py-8 text-sm text-muted-foreground">
                                "Select a page to open it."
                            </div>
                        }
                    >
                        <OpenDocument id=open_id />
                    </Show>
                </main>
            </div>
        </div>
    }
}

#[component]
fn OpenDocument(id: Signal<Option<DocumentId>>) -> impl IntoView {
    let state = use_document(id);

    move || match state.get() {
        PreviewState::Resolving => view! { <ResolvingDocument /> }.into_any(),
        PreviewState::NotFound => view! { <MissingDocument /> }.into_any(),
        PreviewState::Found(document) => view! {
            <div>
                <DocumentActions document=document.clone() />
                <DocumentView document=document />
            </div>
        }
        .into_any(),
    }
}

#[component]
fn DocumentActions(document: Document) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let store = StoredValue::new(app_state.0.store.clone());
    let notifier = StoredValue::new(app_state.0.notifier());
    let id = StoredValue::new(document.id.clone());
    let busy: RwSignal<bool> = RwSignal::new(false);

    let on_trash = move |_: web_sys::MouseEvent| {
        if busy.get_untracked() {
            return;
        }
        busy.set(true);
        let pending = toast_promise(
            notifier.get_value(),
            store.with_value(|s| id.with_value(|id| s.trash(id))),
            TRASH_MESSAGES,
        );
        spawn_local(async move {
            let _ = pending.await;
            busy.try_set(false);
        });
    };

    let preview_href = preview_path(&document.id);
    let is_trashed = document.is_trashed;

    view! {
        <div class="mb-2 flex items-center justify-end gap-2">
            <a
                href=preview_href
                target="_blank"
                class="inline-flex items-center gap-1 text-xs text-muted-foreground hover:underline"
            >
                <Eye class="size-4" />
                "Preview"
            </a>
            <Show
                when=move || !is_trashed
                fallback=|| view! {
                    <div class="rounded-md bg-rose-500 px-3 py-1 text-xs text-white">
                        "This page is in the Trash."
                    </div>
                }
            >
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    attr:disabled=move || busy.get()
                    on:click=on_trash
                >
                    <Trash class="size-4" />
                    "Move to trash"
                </Button>
            </Show>
        </div>
    }
}
