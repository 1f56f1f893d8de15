//! AI suggestion client.

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::debug;

use cerfa_core::models::{ConfigOverride, DocumentId};
use cerfa_core::session::{AiError, AiService, FieldSuggestions};

/// `reqwest` implementation of [`AiService`] against the backend's `/ai/*`
/// routes. All operations are best-effort: without a credential every call
/// yields `Ok(None)` so the wizard keeps working without suggestions.
pub struct HttpAiService {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpAiService {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn post(&self, path: &str, body: Value) -> Result<Option<Value>, AiError> {
        let Some(token) = self.token.as_deref() else {
            debug!(path, "no credential, skipping suggestion call");
            return Ok(None);
        };

        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Service(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AiError::Service(format!(
                "suggestion call {path} failed with status {}",
                response.status()
            )));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AiError::Payload(e.to_string()))?;
        Ok(Some(value))
    }
}

/// The description endpoint answers either a bare string or an object
/// wrapping it under `description`.
fn extract_description(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

/// The documents endpoint answers a bare tag array or an object wrapping it
/// under `documents`. Unknown tags are dropped.
fn extract_documents(value: &Value) -> Option<Vec<DocumentId>> {
    let tags = match value {
        Value::Array(items) => items,
        Value::Object(map) => map.get("documents")?.as_array()?,
        _ => return None,
    };
    Some(
        tags.iter()
            .filter_map(Value::as_str)
            .filter_map(DocumentId::from_tag)
            .collect(),
    )
}

#[async_trait]
impl AiService for HttpAiService {
    async fn analyze_project(
        &self,
        description: &str,
    ) -> Result<Option<FieldSuggestions>, AiError> {
        let Some(value) = self
            .post("/ai/analyze-project/", json!({ "description": description }))
            .await?
        else {
            return Ok(None);
        };

        let suggestions: FieldSuggestions =
            serde_json::from_value(value).map_err(|e| AiError::Payload(e.to_string()))?;
        Ok(Some(suggestions))
    }

    async fn configure_project(
        &self,
        description: &str,
    ) -> Result<Option<ConfigOverride>, AiError> {
        let Some(value) = self
            .post(
                "/ai/configure-project/",
                json!({ "description": description }),
            )
            .await?
        else {
            return Ok(None);
        };

        let config: ConfigOverride =
            serde_json::from_value(value).map_err(|e| AiError::Payload(e.to_string()))?;
        Ok(Some(config))
    }

    async fn generate_description(
        &self,
        works_type: &str,
        natures: &[String],
        other_nature: &str,
    ) -> Result<Option<String>, AiError> {
        let body = json!({
            "type_travaux": works_type,
            "nature_travaux": natures,
            "autre_nature": other_nature,
        });
        let Some(value) = self.post("/ai/generate-description/", body).await? else {
            return Ok(None);
        };

        match extract_description(&value) {
            Some(text) => Ok(Some(text)),
            None => Err(AiError::Payload(
                "description response carries no text".to_string(),
            )),
        }
    }

    async fn suggest_documents(
        &self,
        description: &str,
    ) -> Result<Option<Vec<DocumentId>>, AiError> {
        let Some(value) = self
            .post(
                "/ai/suggest-documents/",
                json!({ "description": description }),
            )
            .await?
        else {
            return Ok(None);
        };

        match extract_documents(&value) {
            Some(documents) => Ok(Some(documents)),
            None => Err(AiError::Payload(
                "documents response carries no tag list".to_string(),
            )),
        }
    }
}
