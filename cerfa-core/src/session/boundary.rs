//! Abstract contracts with the outside world.
//!
//! The engine never talks HTTP or touches the filesystem itself; it goes
//! through these traits. Concrete backends live in sibling crates
//! (`cerfa-api` for the remote endpoints, `cerfa-session` for local
//! snapshot storage) and tests substitute in-memory doubles.

use std::collections::BTreeMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ConfigOverride, DocumentId, FieldValue, FormData, FormSnapshot, RemoteSession, SessionPayload};

/// Suggested field values produced by the AI analysis of a free-text
/// project description.
pub type FieldSuggestions = BTreeMap<String, FieldValue>;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("remote session error: {0}")]
    Remote(String),

    #[error("local storage error: {0}")]
    Storage(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("suggestion service error: {0}")]
    Service(String),

    #[error("unusable suggestion payload: {0}")]
    Payload(String),
}

/// Local persistent storage for the form snapshot: one namespaced slot,
/// read once at mount and overwritten on every change.
pub trait SnapshotStore: Send + Sync {
    /// The previously persisted snapshot, or `None` when the slot is empty.
    fn load(&self) -> Result<Option<FormSnapshot>, SessionError>;

    fn save(&self, snapshot: &FormSnapshot) -> Result<(), SessionError>;

    fn clear(&self) -> Result<(), SessionError>;
}

/// The remote session and dossier endpoints.
///
/// Anonymous mode is first-class: without a credential `fetch` yields
/// `None` and `push` silently does nothing — working locally only is a
/// valid way to fill the form.
#[async_trait]
pub trait SessionApi: Send + Sync {
    /// The server-side session for the current user, if any.
    async fn fetch(&self) -> Result<Option<RemoteSession>, SessionError>;

    /// Upsert the session; the payload carries a monotonic sequence number
    /// so the backend may reject writes that land out of order.
    async fn push(&self, payload: &SessionPayload) -> Result<(), SessionError>;

    /// Persist the finished declaration as a completed dossier.
    async fn finalize(&self, data: &FormData) -> Result<(), SessionError>;
}

/// AI-assisted suggestions. Every operation is a single request/response
/// round trip with no retry policy; callers degrade failures to "no
/// suggestion available" and never block the wizard on them.
#[async_trait]
pub trait AiService: Send + Sync {
    /// Analyze a free-text description into suggested field values.
    async fn analyze_project(&self, description: &str)
    -> Result<Option<FieldSuggestions>, AiError>;

    /// Build a configuration override for a project outside the catalog.
    async fn configure_project(&self, description: &str)
    -> Result<Option<ConfigOverride>, AiError>;

    /// Draft a project description from the selected works tags.
    async fn generate_description(
        &self,
        works_type: &str,
        natures: &[String],
        other_nature: &str,
    ) -> Result<Option<String>, AiError>;

    /// Suggest which DP documents the described project needs.
    async fn suggest_documents(&self, description: &str)
    -> Result<Option<Vec<DocumentId>>, AiError>;
}
