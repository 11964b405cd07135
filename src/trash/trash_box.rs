use super::{TrashActions, TrashList, TrashView};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, ConfirmPrompt, Input, Spinner, SpinnerSize,
};
use crate::models::{Document, DocumentId};
use crate::navigation::{NavigationCoordinator, RouterNavigator};
use crate::state::AppContext;
use icons::{Search, Trash, Undo};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::use_navigate;
use std::sync::Arc;

#[component]
pub(crate) fn TrashBox(#[prop(into)] currently_open: Signal<Option<DocumentId>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let navigator = RouterNavigator::new(use_navigate());
    let actions = StoredValue::new(TrashActions::new(
        app_state.0.store.clone(),
        app_state.0.notifier(),
        NavigationCoordinator::new(Arc::new(navigator)),
    ));

    let list: RwSignal<TrashList> = RwSignal::new(TrashList::default());
    let search: RwSignal<String> = RwSignal::new(String::new());

    // Snapshots delivered after this component is gone are dropped by `try_update`.
    let sub = app_state.0.store.list_trashed(Arc::new(move |docs: Vec<Document>| {
        list.try_update(|l| l.apply_snapshot(docs));
    }));
    on_cleanup(move || sub.cancel());

    let current = Memo::new(move |_| list.with(|l| l.view(&search.get())));

    view! {
        <div class="text-sm" data-name="TrashBox">
            <div class="flex items-center gap-x-1 p-2">
                <Search class="size-4 text-muted-foreground" />
                <Input
                    class="h-7 bg-secondary px-2 focus-visible:ring-transparent"
                    placeholder="Filter by page title..."
                    bind_value=search
                />
            </div>
            <div class="mt-2 px-1 pb-1">
                {move || match current.get() {
                    TrashView::Loading => view! {
                        <div class="flex h-full items-center justify-center p-4">
                            <Spinner size=SpinnerSize::Lg />
                        </div>
                    }
                    .into_any(),
                    TrashView::Empty => view! {
                        <p class="pb-2 text-center text-xs text-muted-foreground">"No pages found."</p>
                    }
                    .into_any(),
                    TrashView::NoMatches => view! {
                        <p class="pb-2 text-center text-xs text-muted-foreground">"No matching pages."</p>
                    }
                    .into_any(),
                    TrashView::Items(docs) => docs
                        .into_iter()
                        .map(|document| view! {
                            <TrashRow document=document list=list currently_open=currently_open actions=actions />
                        })
                        .collect_view()
                        .into_any(),
                }}
            </div>
        </div>
    }
}

#[component]
fn TrashRow(
    document: Document,
    list: RwSignal<TrashList>,
    currently_open: Signal<Option<DocumentId>>,
    actions: StoredValue<TrashActions>,
) -> impl IntoView {
    let id = StoredValue::new(document.id.clone());
    let confirming = move || id.with_value(|id| list.with(|l| l.is_confirming(id)));

    let on_open = move |_: web_sys::MouseEvent| {
        actions.with_value(|a| id.with_value(|id| a.open(id)));
    };

    let on_restore = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        let pending = actions.with_value(|a| id.with_value(|id| a.restore(id)));
        spawn_local(async move {
            // Outcome is already reported by the toast.
            let _ = pending.await;
        });
    };

    let on_request_remove = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        list.update(|l| l.request_remove(id.get_value()));
    };

    let on_confirm = Callback::new(move |_| {
        let Some(target) = list
            .try_update(|l| id.with_value(|id| l.confirm_remove(id)))
            .flatten()
        else {
            return;
        };
        let open = currently_open.get_untracked();
        let pending = actions.with_value(|a| a.remove(&target, open.as_ref()));
        spawn_local(async move {
            if pending.await.is_ok() {
                list.try_update(|l| l.mark_purged(target));
            }
        });
    });

    let on_cancel = Callback::new(move |_| list.update(|l| l.cancel_remove()));

    let title = if document.title.is_empty() {
        "Untitled".to_string()
    } else {
        document.title.clone()
    };

    view! {
        <div
            role="button"
            data-document-id=document.id.to_string()
            class="flex w-full items-center justify-between rounded-sm text-sm text-primary hover:bg-primary/5"
            on:click=on_open
        >
            <span class="truncate pl-2">{title}</span>
            <div class="flex items-center">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::IconSm
                    attr:title="Restore"
                    on:click=on_restore
                >
                    <Undo class="size-4 text-muted-foreground" />
                </Button>
                <Show
                    when=confirming
                    fallback=move || view! {
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::IconSm
                            attr:title="Delete"
                            on:click=on_request_remove
                        >
                            <Trash class="size-4 text-muted-foreground" />
                        </Button>
                    }
                >
                    <ConfirmPrompt on_confirm=on_confirm on_cancel=on_cancel />
                </Show>
            </div>
        </div>
    }
}
