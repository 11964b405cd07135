//! Read-only rendering of a single document.

mod cover;
mod page;
mod toolbar;

pub(crate) use page::{use_document, DocumentView, MissingDocument, PreviewPage, ResolvingDocument};

use crate::models::{Document, DocumentId};
use crate::store::Lookup;

#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) enum PreviewState {
    #[default]
    Resolving,
    NotFound,
    Found(Document),
}

impl From<Lookup> for PreviewState {
    fn from(lookup: Lookup) -> Self {
        match lookup {
            Lookup::Found(doc) => PreviewState::Found(doc),
            Lookup::NotFound => PreviewState::NotFound,
        }
    }
}

/// Ties the rendered state to the id it was resolved for.
///
/// Every new id bumps the generation and resets the state to `Resolving`.
/// Lookups carry the generation they were requested under, so a result that
/// arrives for a previous id is ignored.
#[derive(Clone, Debug, Default)]
pub(crate) struct PreviewBinding {
    id: Option<DocumentId>,
    generation: u64,
    state: PreviewState,
}

impl PreviewBinding {
    /// Returns the new generation when `id` differs from the bound one.
    pub fn bind(&mut self, id: Option<DocumentId>) -> Option<u64> {
        if self.id == id && self.generation > 0 {
            return None;
        }
        self.id = id;
        self.generation += 1;
        self.state = PreviewState::Resolving;
        Some(self.generation)
    }

    pub fn apply(&mut self, generation: u64, lookup: Lookup) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = lookup.into();
        true
    }

    #[cfg(test)]
    pub fn id(&self) -> Option<&DocumentId> {
        self.id.as_ref()
    }

    pub fn state(&self) -> &PreviewState {
        &self.state
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ContentWidth {
    Full,
    Reading,
}

impl ContentWidth {
    pub fn of(doc: &Document) -> Self {
        if doc.is_full_width {
            ContentWidth::Full
        } else {
            ContentWidth::Reading
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            ContentWidth::Full => "max-w-full",
            ContentWidth::Reading => "md:max-w-3xl lg:max-w-4xl",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RenderContext {
    Client,
    Server,
}

impl RenderContext {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            RenderContext::Client
        } else {
            RenderContext::Server
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum EditorSlot {
    /// No client to run the editor on; a placeholder is rendered instead.
    Deferred,
    ReadOnly,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PreviewLayout {
    pub cover_url: Option<String>,
    pub width: ContentWidth,
    pub editor: EditorSlot,
}

pub(crate) fn layout(doc: &Document, ctx: RenderContext) -> PreviewLayout {
    PreviewLayout {
        cover_url: doc.cover_image.clone().filter(|url| !url.trim().is_empty()),
        width: ContentWidth::of(doc),
        editor: match ctx {
            RenderContext::Client => EditorSlot::ReadOnly,
            RenderContext::Server => EditorSlot::Deferred,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_binding_resolves_first() {
        let mut b = PreviewBinding::default();
        assert_eq!(b.bind(Some(DocumentId::new("a"))), Some(1));
        assert_eq!(b.state(), &PreviewState::Resolving);
    }

    #[test]
    fn test_rebinding_same_id_is_a_noop() {
        let mut b = PreviewBinding::default();
        let generation = b.bind(Some(DocumentId::new("a"))).expect("first bind");
        assert!(b.apply(generation, Lookup::Found(Document::active("a", "A"))));

        assert_eq!(b.bind(Some(DocumentId::new("a"))), None);
        assert!(matches!(b.state(), PreviewState::Found(_)));
    }

    #[test]
    fn test_id_change_never_shows_previous_document() {
        let mut b = PreviewBinding::default();
        let first = b.bind(Some(DocumentId::new("a"))).expect("first bind");
        assert!(b.apply(first, Lookup::Found(Document::active("a", "A"))));

        let second = b.bind(Some(DocumentId::new("b"))).expect("id changed");
        assert_eq!(b.state(), &PreviewState::Resolving);

        // Late delivery for "a" after the switch.
        assert!(!b.apply(first, Lookup::Found(Document::active("a", "A v2"))));
        assert_eq!(b.state(), &PreviewState::Resolving);

        assert!(b.apply(second, Lookup::NotFound));
        assert_eq!(b.state(), &PreviewState::NotFound);
        assert_eq!(b.id(), Some(&DocumentId::new("b")));
    }

    #[test]
    fn test_missing_document_is_not_found() {
        let mut b = PreviewBinding::default();
        let generation = b.bind(Some(DocumentId::new("missing"))).expect("first bind");
        b.apply(generation, Lookup::NotFound);
        assert_eq!(b.state(), &PreviewState::NotFound);
    }

    #[test]
    fn test_full_width_is_unconstrained() {
        let mut doc = Document::active("a", "A");
        doc.is_full_width = true;
        assert_eq!(layout(&doc, RenderContext::Client).width, ContentWidth::Full);
        assert_eq!(ContentWidth::Full.class(), "max-w-full");

        doc.is_full_width = false;
        let constrained = layout(&doc, RenderContext::Client).width;
        assert_eq!(constrained, ContentWidth::Reading);
        assert!(constrained.class().contains("max-w-3xl"));
    }

    #[test]
    fn test_editor_is_deferred_without_a_client() {
        let doc = Document::active("a", "A");
        assert_eq!(layout(&doc, RenderContext::Server).editor, EditorSlot::Deferred);
        assert_eq!(layout(&doc, RenderContext::Client).editor, EditorSlot::ReadOnly);
    }

    #[test]
    fn test_cover_only_with_a_reference() {
        let mut doc = Document::active("a", "A");
        assert_eq!(layout(&doc, RenderContext::Client).cover_url, None);

        doc.cover_image = Some("  ".to_string());
        assert_eq!(layout(&doc, RenderContext::Client).cover_url, None);

        doc.cover_image = Some("https://img.example/cover.png".to_string());
        assert_eq!(
            layout(&doc, RenderContext::Client).cover_url.as_deref(),
            Some("https://img.example/cover.png")
        );
    }
}
