//! Core Bookkeeping client implementation.

use bookkeeping_core::config::ClientConfig;
use bookkeeping_core::envelope::DataEnvelope;
use bookkeeping_core::{BookkeepingError, Result};
use reqwest::header::ACCEPT;
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// A session against one Bookkeeping deployment.
///
/// Holds the base URL, the bearer token and one HTTP connection pool. Cloning
/// is cheap and clones share the pool, so one client can serve many tasks.
///
/// # Example
///
/// ```no_run
/// use bookkeeping_client::BookkeepingClient;
/// use bookkeeping_core::run::{EndRun, RunQuality};
///
/// # async fn example() -> Result<(), bookkeeping_core::BookkeepingError> {
/// let client = BookkeepingClient::new("http://localhost:4000/api", "my-token")?;
/// let run = client.end_run(80, &EndRun::new().with_quality(RunQuality::Bad)).await?;
/// println!("Run {} quality: {:?}", run.run_number, run.run_quality);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct BookkeepingClient {
    /// Base URL without trailing slash, e.g. `http://localhost:4000/api`.
    base_url: String,
    token: String,
    http: HttpClient,
}

impl fmt::Debug for BookkeepingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BookkeepingClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl BookkeepingClient {
    /// Create a client with the default user agent and transport settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not http(s) or the HTTP client cannot be created.
    /// Reachability and token validity are only checked by the first request.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::from_config(ClientConfig::new(base_url, token))
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(BookkeepingError::InvalidUrl(format!(
                "URL must start with http:// or https://, got: {}",
                config.base_url
            )));
        }

        let mut builder = HttpClient::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        let http = builder.build()?;

        tracing::debug!(base_url = %base_url, "Bookkeeping client created");

        Ok(Self {
            base_url,
            token: config.token,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a full URL from a path relative to the API root.
    fn url(&self, path: &str) -> String {
        let path = path.strip_prefix('/').unwrap_or(path);
        format!("{}/{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url(path))
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
    }

    /// GET a single `{"data": ...}` resource.
    pub(crate) async fn get_data<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let no_query: [(&str, &str); 0] = [];
        let envelope: DataEnvelope<T> = self.get_query(path, &no_query).await?;
        Ok(envelope.data)
    }

    /// GET with query parameters, decoding the whole body as `T`.
    pub(crate) async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(method = "GET", path, "Sending bookkeeping request");
        let response = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await
            .map_err(|e| log_failure("GET", path, e.into()))?;

        self.handle_response(response)
            .await
            .map_err(|e| log_failure("GET", path, e))
    }

    /// Send a JSON body and unwrap the `{"data": ...}` answer.
    pub(crate) async fn send_data<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let method_name = method.as_str().to_string();
        tracing::debug!(method = %method_name, path, "Sending bookkeeping request");

        let response = self
            .request(method, path)
            .json(body)
            .send()
            .await
            .map_err(|e| log_failure(&method_name, path, e.into()))?;

        let envelope: DataEnvelope<T> = self
            .handle_response(response)
            .await
            .map_err(|e| log_failure(&method_name, path, e))?;
        Ok(envelope.data)
    }

    /// Handle a response and deserialize JSON.
    async fn handle_response<T: DeserializeOwned>(&self, response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BookkeepingError::from_response_body(status.as_u16(), &body));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

fn log_failure(method: &str, path: &str, error: BookkeepingError) -> BookkeepingError {
    tracing::warn!(method, path, error = %error, "Bookkeeping request failed");
    error
}

/// Percent-encodes one path segment (FLP names, environment ids).
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_new() {
        let client = BookkeepingClient::new("http://localhost:4000/api", "token").unwrap();
        assert_eq!(client.base_url(), "http://localhost:4000/api");
        assert_eq!(client.token, "token");
    }

    #[test]
    fn test_client_invalid_url() {
        let result = BookkeepingClient::new("localhost:4000/api", "token");
        assert!(matches!(result, Err(BookkeepingError::InvalidUrl(_))));
    }

    #[test]
    fn test_url_building() {
        let client = BookkeepingClient::new("http://localhost:4000/api/", "token").unwrap();
        assert_eq!(client.url("runs"), "http://localhost:4000/api/runs");
        assert_eq!(client.url("/runs/80"), "http://localhost:4000/api/runs/80");
    }

    #[test]
    fn test_client_from_config_with_timeouts() {
        let config = ClientConfig::new("https://ali-bookkeeping.cern.ch/api", "token")
            .with_timeout(Duration::from_secs(10))
            .with_connect_timeout(Duration::from_secs(2))
            .with_user_agent("TestAgent/1.0");
        assert!(BookkeepingClient::from_config(config).is_ok());
    }

    #[test]
    fn test_debug_redacts_token() {
        let client = BookkeepingClient::new("http://localhost:4000/api", "super-secret").unwrap();
        assert!(!format!("{:?}", client).contains("super-secret"));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("flp 1/a"), "flp%201%2Fa");
        assert_eq!(segment("Dxi029djX"), "Dxi029djX");
    }
}
