//! Remote session and dossier client.

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use cerfa_core::models::{FormData, RemoteSession, SessionPayload};
use cerfa_core::session::{SessionApi, SessionError};

/// `reqwest` implementation of [`SessionApi`] against the backend's
/// `/sessions/` and `/dossiers/` routes.
///
/// Without a bearer token the client runs in anonymous mode: loads yield
/// nothing, autosave pushes are skipped, and only the explicit finalize
/// action refuses to proceed.
pub struct HttpSessionApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSessionApi {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn remote(err: reqwest::Error) -> SessionError {
    SessionError::Remote(err.to_string())
}

#[async_trait]
impl SessionApi for HttpSessionApi {
    async fn fetch(&self) -> Result<Option<RemoteSession>, SessionError> {
        let Some(token) = self.bearer() else {
            debug!("no credential, skipping remote session load");
            return Ok(None);
        };

        let response = self
            .client
            .get(self.url("/sessions/"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(remote)?;

        if !response.status().is_success() {
            return Err(SessionError::Remote(format!(
                "session load failed with status {}",
                response.status()
            )));
        }

        let session: RemoteSession = response.json().await.map_err(remote)?;
        Ok(Some(session))
    }

    async fn push(&self, payload: &SessionPayload) -> Result<(), SessionError> {
        let Some(token) = self.bearer() else {
            debug!("no credential, skipping remote session save");
            return Ok(());
        };

        let response = self
            .client
            .post(self.url("/sessions/"))
            .bearer_auth(token)
            .json(payload)
            .send()
            .await
            .map_err(remote)?;

        if !response.status().is_success() {
            return Err(SessionError::Remote(format!(
                "session save failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn finalize(&self, data: &FormData) -> Result<(), SessionError> {
        let Some(token) = self.bearer() else {
            return Err(SessionError::Remote(
                "finalizing a dossier requires a credential".to_string(),
            ));
        };

        let response = self
            .client
            .post(self.url("/dossiers/"))
            .bearer_auth(token)
            .json(&json!({ "data": data, "status": "completed" }))
            .send()
            .await
            .map_err(remote)?;

        if !response.status().is_success() {
            return Err(SessionError::Remote(format!(
                "dossier save failed with status {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn anonymous_mode_skips_load_and_save() {
        // Deliberately unroutable base URL: anonymous calls must not hit it.
        let api = HttpSessionApi::new("http://invalid.localdomain/api", None);

        let loaded = api.fetch().await.unwrap();
        assert!(loaded.is_none());

        let payload = SessionPayload {
            data: FormData::new(),
            current_step: 0,
            seq: 1,
        };
        api.push(&payload).await.unwrap();
    }

    #[tokio::test]
    async fn anonymous_finalize_is_refused() {
        let api = HttpSessionApi::new("http://invalid.localdomain/api", None);

        let result = api.finalize(&FormData::new()).await;

        assert!(matches!(result, Err(SessionError::Remote(_))));
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let api = HttpSessionApi::new("http://localhost:8010/api/", None);

        assert_eq!(api.url("/sessions/"), "http://localhost:8010/api/sessions/");
    }
}
