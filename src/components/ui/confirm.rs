use super::{Button, ButtonSize, ButtonVariant};
use icons::{Check, X};
use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {ConfirmGroup, div, "flex items-center gap-1 rounded-sm bg-secondary pl-2"}
    clx! {ConfirmLabel, span, "text-xs font-medium text-muted-foreground"}
}

pub use components::*;

/// Inline confirmation for destructive actions. Only the check button commits;
/// the X button dismisses without side effects. Clicks never reach the
/// surrounding element.
#[component]
pub fn ConfirmPrompt(
    #[prop(into, default = "Confirm deletion?".to_string())] label: String,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <ConfirmGroup attr:role="alertdialog">
            <ConfirmLabel>{label}</ConfirmLabel>
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::IconSm
                class="text-destructive"
                attr:title="Delete forever"
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    on_confirm.run(());
                }
            >
                <Check class="size-4" />
            </Button>
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::IconSm
                attr:title="Cancel"
                on:click=move |ev: web_sys::MouseEvent| {
                    ev.stop_propagation();
                    on_cancel.run(());
                }
            >
                <X class="size-4" />
            </Button>
        </ConfirmGroup>
    }
}
