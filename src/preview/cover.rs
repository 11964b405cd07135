use leptos::prelude::*;

/// Cover region in preview mode. Renders the image only when a reference is
/// present and never offers change/remove controls.
#[component]
pub(crate) fn Cover(url: Option<String>) -> impl IntoView {
    match url {
        Some(url) => view! {
            <div data-name="Cover" class="group relative h-[35vh] w-full">
                <img src=url alt="Cover" class="h-full w-full object-cover" />
            </div>
        }
        .into_any(),
        None => view! { <div data-name="Cover" class="h-[12vh] w-full" /> }.into_any(),
    }
}
