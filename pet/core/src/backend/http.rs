//! HTTP Pet Backend
//!
//! [`PetBackend`] over the pet service's JSON API.
//!
//! # Pet Service API
//!
//! Every endpoint answers with an envelope `{ code, data, message }`; `code`
//! zero means success.
//!
//! - `GET  /api/fish_pet/my/get` - caller's pet
//! - `GET  /api/fish_pet/other/get?otherUserId=` - another account's pet
//! - `POST /api/fish_pet/create` - `{ name, petUrl }`
//! - `POST /api/fish_pet/feed` - `{ petId }`
//! - `POST /api/fish_pet/pat` - `{ petId }`
//! - `POST /api/fish_pet/update/name` - `{ petId, name }`

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::traits::{ApiResponse, PetBackend};
use crate::config::PetConfig;
use crate::snapshot::{PetId, PetSnapshot};

const OWN_PET_PATH: &str = "/api/fish_pet/my/get";
const OTHER_PET_PATH: &str = "/api/fish_pet/other/get";
const CREATE_PATH: &str = "/api/fish_pet/create";
const FEED_PATH: &str = "/api/fish_pet/feed";
const PAT_PATH: &str = "/api/fish_pet/pat";
const RENAME_PATH: &str = "/api/fish_pet/update/name";

/// Response envelope used by every endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    code: i64,
    data: Option<T>,
    message: Option<String>,
}

impl<T> From<Envelope<T>> for ApiResponse<T> {
    fn from(envelope: Envelope<T>) -> Self {
        Self {
            success: envelope.code == 0,
            data: envelope.data,
            message: envelope.message,
        }
    }
}

/// Pet service client
#[derive(Clone)]
pub struct HttpPetBackend {
    /// Base URL without trailing slash
    base_url: String,
    /// Bearer token, if the service needs one
    token: Option<String>,
    /// HTTP client
    http_client: reqwest::Client,
}

impl HttpPetBackend {
    /// Create a client for `base_url`
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            token,
            http_client,
        })
    }

    /// Create from loaded configuration
    ///
    /// # Errors
    ///
    /// Fails when the HTTP client cannot be built.
    pub fn from_config(config: &PetConfig) -> anyhow::Result<Self> {
        Self::new(
            config.base_url.clone(),
            config.token.clone(),
            config.request_timeout,
        )
    }

    /// Base URL the client talks to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.token {
            Some(ref token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> anyhow::Result<ApiResponse<T>> {
        let request = self.authorize(self.http_client.get(self.url(path)).query(query));
        Self::read_envelope(request.send().await?).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> anyhow::Result<ApiResponse<T>> {
        let request = self.authorize(self.http_client.post(self.url(path)).json(body));
        Self::read_envelope(request.send().await?).await
    }

    async fn read_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> anyhow::Result<ApiResponse<T>> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Pet service returned {status}: {body}");
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.into())
    }
}

#[async_trait]
impl PetBackend for HttpPetBackend {
    fn name(&self) -> &'static str {
        "HTTP"
    }

    async fn get_own_pet(&self) -> anyhow::Result<ApiResponse<PetSnapshot>> {
        self.get(OWN_PET_PATH, &[]).await
    }

    async fn get_other_pet(&self, subject_id: &str) -> anyhow::Result<ApiResponse<PetSnapshot>> {
        self.get(OTHER_PET_PATH, &[("otherUserId", subject_id)])
            .await
    }

    async fn create_pet(
        &self,
        name: &str,
        avatar_url: &str,
    ) -> anyhow::Result<ApiResponse<PetSnapshot>> {
        let body = serde_json::json!({
            "name": name,
            "petUrl": avatar_url,
        });
        self.post(CREATE_PATH, &body).await
    }

    async fn feed_pet(&self, id: &PetId) -> anyhow::Result<ApiResponse<PetSnapshot>> {
        let body = serde_json::json!({ "petId": id });
        self.post(FEED_PATH, &body).await
    }

    async fn pat_pet(&self, id: &PetId) -> anyhow::Result<ApiResponse<PetSnapshot>> {
        let body = serde_json::json!({ "petId": id });
        self.post(PAT_PATH, &body).await
    }

    async fn rename_pet(&self, id: &PetId, name: &str) -> anyhow::Result<ApiResponse<bool>> {
        let body = serde_json::json!({
            "petId": id,
            "name": name,
        });
        self.post(RENAME_PATH, &body).await
    }
}
