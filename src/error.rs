use crate::models::{DocumentId, Lifecycle, LifecycleEvent};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StoreErrorKind {
    Permission,
    NotFound,
    Conflict,
    Network,
    Http,
    Parse,
}

/// Failure reported by a [`crate::store::DocumentStore`] read or mutation.
#[derive(Clone, Debug, Error)]
#[error("{message}")]
pub(crate) struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub(crate) fn network(e: reqwest::Error) -> Self {
        Self {
            kind: StoreErrorKind::Network,
            message: e.to_string(),
        }
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        Self {
            kind: StoreErrorKind::Parse,
            message: e.to_string(),
        }
    }

    pub(crate) fn permission() -> Self {
        Self {
            kind: StoreErrorKind::Permission,
            message: "Permission denied".to_string(),
        }
    }

    pub(crate) fn not_found(id: &DocumentId) -> Self {
        Self {
            kind: StoreErrorKind::NotFound,
            message: format!("Document {id} not found"),
        }
    }

    pub(crate) fn http(status: reqwest::StatusCode, body: String, ctx: &str) -> Self {
        match status.as_u16() {
            401 | 403 => Self::permission(),
            _ => Self {
                kind: StoreErrorKind::Http,
                message: format!("{ctx} ({status}): {body}"),
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn transient(message: &str) -> Self {
        Self {
            kind: StoreErrorKind::Network,
            message: message.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum LifecycleError {
    #[error("cannot {event} a document that is {from}")]
    InvalidTransition {
        from: Lifecycle,
        event: LifecycleEvent,
    },
}

impl From<LifecycleError> for StoreError {
    fn from(e: LifecycleError) -> Self {
        Self {
            kind: StoreErrorKind::Conflict,
            message: e.to_string(),
        }
    }
}

pub(crate) type StoreResult<T> = Result<T, StoreError>;
