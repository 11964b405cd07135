use crate::error::LifecycleError;
use serde::{Deserialize, Serialize};

/// Opaque document identifier, stable for the document's lifetime.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub(crate) struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Document as delivered by the store.
///
/// The backend speaks camelCase and keys documents by `_id`.
/// `content` is the editor's serialized body and is never interpreted here
/// beyond read-only display.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Document {
    #[serde(rename = "_id", alias = "id")]
    pub id: DocumentId,

    #[serde(default)]
    pub title: String,

    #[serde(alias = "isArchived")]
    pub is_trashed: bool,

    #[serde(default)]
    pub cover_image: Option<String>,

    #[serde(default)]
    pub icon: Option<String>,

    #[serde(default)]
    pub is_full_width: bool,

    #[serde(default)]
    pub content: Option<String>,
}

impl Document {
    #[cfg(test)]
    pub(crate) fn trashed(id: &str, title: &str) -> Self {
        Self {
            id: DocumentId::new(id),
            title: title.to_string(),
            is_trashed: true,
            cover_image: None,
            icon: None,
            is_full_width: false,
            content: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn active(id: &str, title: &str) -> Self {
        Self {
            is_trashed: false,
            ..Self::trashed(id, title)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Lifecycle {
    Active,
    Trashed,
    Deleted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum LifecycleEvent {
    Trash,
    Restore,
    Remove,
}

impl Lifecycle {
    pub fn of(doc: &Document) -> Self {
        if doc.is_trashed {
            Lifecycle::Trashed
        } else {
            Lifecycle::Active
        }
    }

    /// Active -> Trashed -> Deleted, with Trashed -> Active on restore.
    /// Deleted is terminal.
    pub fn apply(self, event: LifecycleEvent) -> Result<Lifecycle, LifecycleError> {
        match (self, event) {
            (Lifecycle::Active, LifecycleEvent::Trash) => Ok(Lifecycle::Trashed),
            (Lifecycle::Trashed, LifecycleEvent::Restore) => Ok(Lifecycle::Active),
            (Lifecycle::Trashed, LifecycleEvent::Remove) => Ok(Lifecycle::Deleted),
            (from, event) => Err(LifecycleError::InvalidTransition { from, event }),
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Lifecycle::Deleted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use Lifecycle::*;
        use LifecycleEvent::*;

        assert_eq!(Active.apply(Trash), Ok(Trashed));
        assert_eq!(Trashed.apply(Restore), Ok(Active));
        assert_eq!(Trashed.apply(Remove), Ok(Deleted));

        // Permanent removal only from the trash.
        assert!(Active.apply(Remove).is_err());
        assert!(Active.apply(Restore).is_err());
        assert!(Trashed.apply(Trash).is_err());

        for event in [Trash, Restore, Remove] {
            assert_eq!(
                Deleted.apply(event),
                Err(LifecycleError::InvalidTransition {
                    from: Deleted,
                    event
                })
            );
        }
        assert!(Deleted.is_terminal());
        assert!(!Trashed.is_terminal());
    }

    #[test]
    fn test_document_contract_deserialize() {
        let json = r#"{
            "_id": "k17abc",
            "title": "Meeting Notes",
            "isArchived": true,
            "coverImage": "https://files.example.com/cover.png",
            "isFullWidth": true,
            "content": "[]",
            "userId": "user_1"
        }"#;
        let doc: Document = serde_json::from_str(json).expect("document should parse");
        assert_eq!(doc.id.as_str(), "k17abc");
        assert!(doc.is_trashed);
        assert!(doc.is_full_width);
        assert_eq!(
            doc.cover_image.as_deref(),
            Some("https://files.example.com/cover.png")
        );
        assert_eq!(Lifecycle::of(&doc), Lifecycle::Trashed);
    }

    #[test]
    fn test_document_defaults_for_missing_optional_fields() {
        let json = r#"{"id": "a", "isTrashed": false}"#;
        let doc: Document = serde_json::from_str(json).expect("document should parse");
        assert_eq!(doc.title, "");
        assert!(!doc.is_full_width);
        assert!(doc.cover_image.is_none());
        assert_eq!(Lifecycle::of(&doc), Lifecycle::Active);
    }

    #[test]
    fn test_document_serializes_with_backend_keys() {
        let v = serde_json::to_value(Document::trashed("a", "A")).expect("should serialize");
        assert_eq!(v["_id"], "a");
        assert_eq!(v["isTrashed"], true);
        assert_eq!(v["isFullWidth"], false);
    }
}
