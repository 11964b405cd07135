use crate::models::Document;

/// Case-insensitive substring match of `search` against `title`.
/// An empty search matches every title.
pub(crate) fn title_matches(title: &str, search: &str) -> bool {
    title.to_lowercase().contains(&search.to_lowercase())
}

/// Derives the visible rows from a snapshot without touching the snapshot.
/// Source order is preserved.
pub(crate) fn filter_by_title(documents: &[Document], search: &str) -> Vec<Document> {
    documents
        .iter()
        .filter(|d| title_matches(&d.title, search))
        .cloned()
        .collect()
}
