use super::{Notifier, ToastId, ToastKind};
use icons::{CircleAlert, CircleCheck, LoaderCircle};
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

const DISMISS_AFTER_MS: i32 = 4000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Toast {
    pub id: ToastId,
    pub kind: ToastKind,
    pub message: String,
}

/// Visible toasts, oldest first.
#[derive(Clone, Debug, Default)]
pub(crate) struct ToastList {
    next_id: u64,
    toasts: Vec<Toast>,
}

impl ToastList {
    pub fn open(&mut self, kind: ToastKind, message: &str) -> ToastId {
        let id = ToastId(self.next_id);
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            message: message.to_string(),
        });
        id
    }

    /// Replaces a toast in place. A toast already dismissed stays dismissed.
    pub fn update(&mut self, id: ToastId, kind: ToastKind, message: &str) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(t) => {
                t.kind = kind;
                t.message = message.to_string();
                true
            }
            None => false,
        }
    }

    pub fn dismiss(&mut self, id: ToastId) {
        self.toasts.retain(|t| t.id != id);
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}

#[derive(Clone, Copy)]
pub(crate) struct ToastQueue {
    list: RwSignal<ToastList>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self {
            list: RwSignal::new(ToastList::default()),
        }
    }

    pub fn dismiss(&self, id: ToastId) {
        self.list.update(|l| l.dismiss(id));
    }

    fn schedule_dismiss(&self, id: ToastId) {
        let Some(win) = web_sys::window() else {
            return;
        };
        let queue = *self;
        let cb = wasm_bindgen::closure::Closure::once_into_js(move || queue.dismiss(id));
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            cb.unchecked_ref(),
            DISMISS_AFTER_MS,
        );
    }
}

impl Default for ToastQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastQueue {
    fn open(&self, kind: ToastKind, message: &str) -> ToastId {
        let mut id = ToastId(0);
        self.list.update(|l| id = l.open(kind, message));
        id
    }

    fn update(&self, id: ToastId, kind: ToastKind, message: &str) {
        let mut updated = false;
        self.list.update(|l| updated = l.update(id, kind, message));
        if updated && kind != ToastKind::Loading {
            self.schedule_dismiss(id);
        }
    }
}

#[component]
pub(crate) fn Toaster(queue: ToastQueue) -> impl IntoView {
    view! {
        <div class="fixed bottom-4 right-4 z-50 flex flex-col gap-2">
            <For
                each=move || queue.list.get().toasts().to_vec()
                key=|t| (t.id, t.kind)
                children=move |t: Toast| {
                    let class = tw_merge!(
                        "flex items-center gap-2 rounded-md border bg-card px-3 py-2 text-sm shadow-md",
                        match t.kind {
                            ToastKind::Error => "border-destructive/30 text-destructive",
                            _ => "border-border text-foreground",
                        }
                    );
                    let id = t.id;
                    view! {
                        <div
                            class=class
                            role="status"
                            data-kind=t.kind.as_ref().to_string()
                            on:click=move |_| queue.dismiss(id)
                        >
                            {match t.kind {
                                ToastKind::Loading => view! { <LoaderCircle class="size-4 animate-spin" /> }.into_any(),
                                ToastKind::Success => view! { <CircleCheck class="size-4" /> }.into_any(),
                                ToastKind::Error => view! { <CircleAlert class="size-4" /> }.into_any(),
                            }}
                            <span>{t.message}</span>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_rewrites_the_same_toast() {
        let mut list = ToastList::default();
        let id = list.open(ToastKind::Loading, "Restoring note...");
        assert!(list.update(id, ToastKind::Success, "Note restored!"));

        assert_eq!(list.toasts().len(), 1);
        assert_eq!(list.toasts()[0].kind, ToastKind::Success);
        assert_eq!(list.toasts()[0].message, "Note restored!");
    }

    #[test]
    fn test_dismissed_toast_is_not_resurrected() {
        let mut list = ToastList::default();
        let a = list.open(ToastKind::Loading, "a");
        let b = list.open(ToastKind::Loading, "b");
        assert_ne!(a, b);

        list.dismiss(a);
        assert!(!list.update(a, ToastKind::Error, "late"));
        assert_eq!(list.toasts().len(), 1);
        assert_eq!(list.toasts()[0].id, b);
    }
}
