//! HTTP implementation of [`UserBackend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::COOKIE;
use serde::de::DeserializeOwned;
use url::Url;

use super::error::BackendError;
use super::types::{AskRequest, AskResult, DataEnvelope, Role, RoleUpdate, User};
use super::{Credentials, UserBackend};
use crate::config::BackendConfig;

/// `reqwest` client for the users endpoint.
///
/// # Example
///
/// ```rust,no_run
/// use user_console::backend::{HttpBackend, UserBackend};
/// use user_console::config::BackendConfig;
///
/// # async fn example(config: BackendConfig) -> Result<(), Box<dyn std::error::Error>> {
/// let backend = HttpBackend::new(&config)?;
/// let users = backend.list_users().await?;
/// println!("{} users", users.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpBackend {
    http: reqwest::Client,
    api_base: Url,
    ask_url: Url,
}

impl HttpBackend {
    /// Build a client from the backend configuration.
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_client(config, http)
    }

    /// Build a client around an existing `reqwest::Client`.
    pub fn with_client(config: &BackendConfig, http: reqwest::Client) -> Result<Self, BackendError> {
        let api_base = parse_url(&config.api_base)?;
        let ask_url = match &config.ask_url {
            Some(url) => parse_url(url)?,
            None => api_base.clone(),
        };
        Ok(Self {
            http,
            api_base,
            ask_url,
        })
    }

    /// Base URL of the users collection.
    #[must_use]
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// URL of a single user record: `{api_base}/{id}`.
    fn record_url(&self, id: &str) -> Result<Url, BackendError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl(self.api_base.to_string()))?
            .pop_if_empty()
            .push(id);
        Ok(url)
    }

    async fn read_data<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<Option<T>, BackendError> {
        let response = Self::check_status(response).await?;
        let bytes = response.bytes().await?;
        let envelope: DataEnvelope<T> = serde_json::from_slice(&bytes)?;
        Ok(envelope.data)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.json::<serde_json::Value>().await.ok();
        Err(BackendError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Attach the forwarded browser cookie, if any.
fn with_credentials(
    request: reqwest::RequestBuilder,
    credentials: &Credentials,
) -> reqwest::RequestBuilder {
    match credentials.cookie() {
        Some(cookie) => request.header(COOKIE, cookie),
        None => request,
    }
}

fn parse_url(raw: &str) -> Result<Url, BackendError> {
    Url::parse(raw).map_err(|e| BackendError::InvalidUrl(format!("{raw}: {e}")))
}

#[async_trait]
impl UserBackend for HttpBackend {
    async fn list_users(&self) -> Result<Vec<User>, BackendError> {
        let response = self.http.get(self.api_base.clone()).send().await?;
        let users: Option<Vec<User>> = Self::read_data(response).await?;
        users.ok_or_else(|| {
            BackendError::Decode(serde::de::Error::missing_field("data"))
        })
    }

    async fn ask(
        &self,
        request: &AskRequest,
        credentials: &Credentials,
    ) -> Result<Option<AskResult>, BackendError> {
        let response = with_credentials(self.http.post(self.ask_url.clone()), credentials)
            .json(request)
            .send()
            .await?;
        Self::read_data(response).await
    }

    async fn delete_user(&self, id: &str, credentials: &Credentials) -> Result<(), BackendError> {
        let url = self.record_url(id)?;
        let response = with_credentials(self.http.delete(url), credentials)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn update_role(
        &self,
        id: &str,
        role: Role,
        credentials: &Credentials,
    ) -> Result<(), BackendError> {
        let url = self.record_url(id)?;
        let response = with_credentials(self.http.patch(url), credentials)
            .json(&RoleUpdate { role })
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_base: &str, ask_url: Option<&str>) -> BackendConfig {
        BackendConfig {
            api_base: api_base.to_string(),
            ask_url: ask_url.map(String::from),
            auth_url: None,
            timeout_secs: 5,
            top_k: 5,
        }
    }

    #[test]
    fn test_ask_url_defaults_to_api_base() {
        let backend = HttpBackend::new(&config("http://localhost:5000/api/users", None)).unwrap();
        assert_eq!(backend.ask_url, backend.api_base);

        let backend = HttpBackend::new(&config(
            "http://localhost:5000/api/users",
            Some("http://localhost:5000/api/users/ask"),
        ))
        .unwrap();
        assert_eq!(backend.ask_url.path(), "/api/users/ask");
    }

    #[test]
    fn test_record_url() {
        let backend = HttpBackend::new(&config("http://localhost:5000/api/users/", None)).unwrap();
        let url = backend.record_url("abc 1").unwrap();
        assert_eq!(url.as_str(), "http://localhost:5000/api/users/abc%201");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpBackend::new(&config("not a url", None)).unwrap_err();
        assert!(matches!(err, BackendError::InvalidUrl(_)));
    }
}
