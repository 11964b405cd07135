use super::{DocumentStore, Lookup, MutationFuture};
use crate::error::{StoreError, StoreResult};
use crate::models::{Document, DocumentId};
use crate::subscription::{Observer, Subscription, Topic};
use futures::FutureExt;
use leptos::logging::{log, warn};
use leptos::task::spawn_local;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct DocumentIdRequest {
    pub id: DocumentId,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct GetDocumentRequest {
    #[serde(rename = "document-id")]
    pub document_id: DocumentId,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct TrashListResponse {
    #[serde(default)]
    pub documents: Vec<Document>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct DocumentResponse {
    #[serde(default)]
    pub document: Option<Document>,
}

/// Orders responses fetched for the same read; a response is applied only if
/// nothing newer has been applied already.
#[derive(Default)]
struct Sequencer {
    issued: AtomicU64,
    applied: AtomicU64,
}

impl Sequencer {
    fn next(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn accept(&self, ticket: u64) -> bool {
        self.applied.fetch_max(ticket, Ordering::SeqCst) < ticket
    }
}

struct Channel<T> {
    topic: Topic<T>,
    seq: Arc<Sequencer>,
}

impl<T> Clone for Channel<T> {
    fn clone(&self) -> Self {
        Self {
            topic: self.topic.clone(),
            seq: Arc::clone(&self.seq),
        }
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self {
            topic: Topic::default(),
            seq: Arc::default(),
        }
    }
}

/// Document Store backed by the workspace HTTP API.
///
/// Reads are refreshed on subscribe and after every successful mutation, which
/// is what turns the request/response API into pushed snapshots.
#[derive(Clone)]
pub(crate) struct RemoteStore {
    base_url: String,
    client: reqwest::Client,
    trashed: Channel<Vec<Document>>,
    lookups: Arc<Mutex<HashMap<DocumentId, Channel<Lookup>>>>,
}

impl RemoteStore {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            trashed: Channel::default(),
            lookups: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> StoreResult<reqwest::Response> {
        self.client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await
            .map_err(StoreError::network)
    }

    async fn fetch_trash(&self) -> StoreResult<Vec<Document>> {
        let res = self
            .post("documents/get-trash", &serde_json::json!({}))
            .await?;

        if res.status().is_success() {
            let body: TrashListResponse = res.json().await.map_err(StoreError::parse)?;
            Ok(body.documents)
        } else {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            Err(StoreError::http(status, text, "Load trash"))
        }
    }

    async fn fetch_document(&self, id: &DocumentId) -> StoreResult<Lookup> {
        let res = self
            .post(
                "documents/get-by-id",
                &GetDocumentRequest {
                    document_id: id.clone(),
                },
            )
            .await?;

        let status = res.status();
        if status.as_u16() == 404 {
            return Ok(Lookup::NotFound);
        }
        if status.is_success() {
            let body: DocumentResponse = res.json().await.map_err(StoreError::parse)?;
            Ok(body.document.map_or(Lookup::NotFound, Lookup::Found))
        } else {
            let text = res.text().await.unwrap_or_default();
            Err(StoreError::http(status, text, "Load document"))
        }
    }

    async fn mutate(&self, path: &str, id: &DocumentId, ctx: &str) -> StoreResult<()> {
        let res = self.post(path, &DocumentIdRequest { id: id.clone() }).await?;
        let status = res.status();
        if status.is_success() {
            Ok(())
        } else if status.as_u16() == 404 {
            Err(StoreError::not_found(id))
        } else {
            let text = res.text().await.unwrap_or_default();
            Err(StoreError::http(status, text, ctx))
        }
    }

    fn lookup_channel(&self, id: &DocumentId) -> Channel<Lookup> {
        let mut lookups = self.lookups.lock().unwrap_or_else(PoisonError::into_inner);
        lookups.entry(id.clone()).or_default().clone()
    }

    fn watched_channel(&self, id: &DocumentId) -> Option<Channel<Lookup>> {
        let lookups = self.lookups.lock().unwrap_or_else(PoisonError::into_inner);
        lookups.get(id).cloned()
    }

    fn refresh_trash(&self) {
        let store = self.clone();
        let ticket = self.trashed.seq.next();
        spawn_local(async move {
            match store.fetch_trash().await {
                Ok(docs) => {
                    if store.trashed.seq.accept(ticket) {
                        store.trashed.topic.publish(docs);
                    } else {
                        log!("discarding superseded trash snapshot #{ticket}");
                    }
                }
                Err(e) => warn!("trash refresh failed: {e}"),
            }
        });
    }

    fn refresh_lookup(&self, id: DocumentId, channel: Channel<Lookup>) {
        let store = self.clone();
        let ticket = channel.seq.next();
        spawn_local(async move {
            match store.fetch_document(&id).await {
                Ok(lookup) => {
                    if channel.seq.accept(ticket) {
                        channel.topic.publish(lookup);
                    } else {
                        log!("discarding superseded snapshot #{ticket} for document {id}");
                    }
                }
                Err(e) => warn!("document {id} refresh failed: {e}"),
            }
        });
    }

    fn after_commit(&self, id: &DocumentId, purged: bool) {
        self.refresh_trash();
        let Some(channel) = self.watched_channel(id) else {
            return;
        };
        if purged {
            // Deleted is terminal; no need to ask the backend.
            let ticket = channel.seq.next();
            if channel.seq.accept(ticket) {
                channel.topic.publish(Lookup::NotFound);
            }
        } else {
            self.refresh_lookup(id.clone(), channel);
        }
    }

    fn mutation(
        &self,
        path: &'static str,
        id: &DocumentId,
        ctx: &'static str,
        purges: bool,
    ) -> MutationFuture {
        let store = self.clone();
        let id = id.clone();
        async move {
            store.mutate(path, &id, ctx).await?;
            store.after_commit(&id, purges);
            Ok(())
        }
        .boxed_local()
    }
}

impl DocumentStore for RemoteStore {
    fn list_trashed(&self, observer: Observer<Vec<Document>>) -> Subscription {
        let sub = self.trashed.topic.subscribe(observer);
        self.refresh_trash();
        sub
    }

    fn get_by_id(&self, id: &DocumentId, observer: Observer<Lookup>) -> Subscription {
        let channel = self.lookup_channel(id);
        let sub = channel.topic.subscribe(observer);
        self.refresh_lookup(id.clone(), channel);
        sub
    }

    fn trash(&self, id: &DocumentId) -> MutationFuture {
        self.mutation("documents/archive", id, "Move to trash", false)
    }

    fn restore(&self, id: &DocumentId) -> MutationFuture {
        self.mutation("documents/restore", id, "Restore", false)
    }

    fn remove_permanently(&self, id: &DocumentId) -> MutationFuture {
        self.mutation("documents/remove", id, "Remove", true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let store = RemoteStore::new("http://localhost:6689/".to_string());
        assert_eq!(
            store.endpoint("documents/get-trash"),
            "http://localhost:6689/documents/get-trash"
        );
    }

    #[test]
    fn test_get_document_request_uses_kebab_key() {
        let req = GetDocumentRequest {
            document_id: DocumentId::new("k1"),
        };
        let v = serde_json::to_value(req).expect("should serialize");
        assert_eq!(v["document-id"], "k1");
    }

    #[test]
    fn test_mutation_request_shape() {
        let v = serde_json::to_value(DocumentIdRequest {
            id: DocumentId::new("k1"),
        })
        .expect("should serialize");
        assert_eq!(v, serde_json::json!({"id": "k1"}));
    }

    #[test]
    fn test_trash_list_response_contract_deserialize() {
        let json = r#"{
            "documents": [
                {"_id": "a", "title": "Meeting Notes", "isArchived": true},
                {"_id": "b", "title": "Budget", "isArchived": true, "isFullWidth": true}
            ]
        }"#;
        let parsed: TrashListResponse = serde_json::from_str(json).expect("should parse");
        assert_eq!(parsed.documents.len(), 2);
        assert!(parsed.documents.iter().all(|d| d.is_trashed));
    }

    #[test]
    fn test_document_response_null_is_not_found() {
        let parsed: DocumentResponse =
            serde_json::from_str(r#"{"document": null}"#).expect("should parse");
        assert_eq!(
            parsed.document.map_or(Lookup::NotFound, Lookup::Found),
            Lookup::NotFound
        );
    }

    #[test]
    fn test_sequencer_discards_superseded_responses() {
        let seq = Sequencer::default();
        let first = seq.next();
        let second = seq.next();

        // The newer response lands first; the older one must not overwrite it.
        assert!(seq.accept(second));
        assert!(!seq.accept(first));

        let third = seq.next();
        assert!(seq.accept(third));
    }
}
