use crate::models::Document;
use leptos::prelude::*;

#[component]
pub(crate) fn Toolbar(document: Document) -> impl IntoView {
    let title = if document.title.is_empty() {
        "Untitled".to_string()
    } else {
        document.title
    };

    view! {
        <div data-name="Toolbar" class="group relative pl-[54px]">
            {document.icon.map(|icon| view! { <p class="pt-6 text-6xl">{icon}</p> })}
            <div class="break-words pb-[11.5px] text-5xl font-bold text-[#3F3F3F] outline-none dark:text-[#CFCFCF]">
                {title}
            </div>
        </div>
    }
}
