use icons::Loader;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinnerSize {
    #[default]
    Default,
    Lg,
}

impl SpinnerSize {
    fn class(self) -> &'static str {
        match self {
            SpinnerSize::Default => "size-4",
            SpinnerSize::Lg => "size-6",
        }
    }
}

#[component]
pub fn Spinner(
    #[prop(optional)] size: SpinnerSize,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let merged_class = tw_merge!("animate-spin text-muted-foreground", size.class(), class);

    view! { <Loader class=merged_class attr:role="status" attr:aria-label="Loading" /> }
}
