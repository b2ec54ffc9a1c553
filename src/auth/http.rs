use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;
use url::Url;

use super::provider::{AuthError, AuthFlow, IdentityProvider, Strategy};

/// Identity service reached over HTTP.
///
/// - `POST {endpoint}/v1/oauth/start` with `{"strategy": "..."}` returns
///   `{"created_session_id": "..." | null}`
/// - `POST {endpoint}/v1/sessions/{id}/activate` activates a session
///
/// Every request carries the publishable key as a bearer token.
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    endpoint: Url,
    publishable_key: SecretString,
}

#[derive(Serialize)]
struct StartFlowRequest {
    strategy: Strategy,
}

impl HttpIdentityProvider {
    pub fn new(endpoint: &str, publishable_key: SecretString) -> Result<Self, AuthError> {
        let mut endpoint = Url::parse(endpoint)?;
        // Url::join replaces the last path segment unless the base ends in '/'
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            publishable_key,
        })
    }

    /// `{endpoint}/v1/sessions/{id}/activate`, with `id` percent-encoded as
    /// a single path segment.
    fn activate_url(&self, session_id: &str) -> Result<Url, AuthError> {
        let mut activate = self.endpoint.clone();
        activate
            .path_segments_mut()
            .map_err(|()| {
                AuthError::InvalidEndpoint(url::ParseError::RelativeUrlWithCannotBeABaseBase)
            })?
            .pop_if_empty()
            .extend(["v1", "sessions", session_id, "activate"]);
        Ok(activate)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<reqwest::Response, AuthError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(self.publishable_key.expose_secret())
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn start_auth_flow(&self, strategy: Strategy) -> Result<AuthFlow, AuthError> {
        tracing::debug!(strategy = strategy.as_str(), "Starting OAuth flow");
        let response = self
            .post(
                self.endpoint.join("v1/oauth/start")?,
                &StartFlowRequest { strategy },
            )
            .await?;
        Ok(response.json::<AuthFlow>().await?)
    }

    async fn set_active(&self, session_id: &str) -> Result<(), AuthError> {
        let url = self.activate_url(session_id)?;
        self.post(url, &serde_json::json!({})).await?;
        tracing::debug!(session_id = %session_id, "Session activated");
        Ok(())
    }
}

impl std::fmt::Debug for HttpIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpIdentityProvider")
            .field("endpoint", &self.endpoint.as_str())
            .field("publishable_key", &"[REDACTED]")
            .finish()
    }
}
