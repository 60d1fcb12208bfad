//! Main OpenCTI GraphQL client implementation.

use reqwest::header::RETRY_AFTER;
use reqwest::Client as HttpClient;
use seal_isac_core::{IsacError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::api::{IndicatorApi, ObservableApi, RelationshipApi};

/// The SEAL-ISAC production host
pub const DEFAULT_HOST: &str = "https://sealisac.org";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for an OpenCTI-compatible threat-intel platform
#[derive(Clone)]
pub struct OpenCtiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: HttpClient,
    api_key: String,
    endpoint: Url,
}

#[derive(Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

impl OpenCtiClient {
    /// Create a client for the default host
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        OpenCtiClientBuilder::new(api_key).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(api_key: impl Into<String>) -> OpenCtiClientBuilder {
        OpenCtiClientBuilder::new(api_key)
    }

    /// The GraphQL endpoint requests are sent to
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Access cyber-observable operations
    #[must_use]
    pub fn observables(&self) -> ObservableApi<'_> {
        ObservableApi::new(self)
    }

    /// Access indicator operations
    #[must_use]
    pub fn indicators(&self) -> IndicatorApi<'_> {
        IndicatorApi::new(self)
    }

    /// Access relationship operations
    #[must_use]
    pub fn relationships(&self) -> RelationshipApi<'_> {
        RelationshipApi::new(self)
    }

    /// Run a GraphQL operation and decode its `data` payload
    pub(crate) async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T> {
        debug!(operation, endpoint = %self.inner.endpoint, "GraphQL request");

        let response = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .bearer_auth(&self.inner.api_key)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Self::handle_error(status.as_u16(), response).await;
        }

        let body = response.text().await.map_err(map_transport_error)?;
        let decoded: GraphQlResponse<T> = serde_json::from_str(&body)?;

        if !decoded.errors.is_empty() {
            let message = decoded
                .errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(IsacError::GraphQl(message));
        }

        decoded
            .data
            .ok_or_else(|| IsacError::MissingData(format!("{operation} returned no data")))
    }

    /// Convert an error response to an `IsacError`
    async fn handle_error<T>(status: u16, response: reqwest::Response) -> Result<T> {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let body = response.text().await.unwrap_or_default();

        // Try to parse error message from JSON
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("errors")
                    .and_then(|e| e.get(0))
                    .and_then(|e| e.get("message"))
                    .and_then(Value::as_str)
                    .map(String::from)
            })
            .unwrap_or(body);

        match status {
            401 | 403 => Err(IsacError::Unauthorized),
            429 => {
                warn!("Rate limited by threat-intel store");
                Err(IsacError::RateLimited { retry_after })
            }
            _ => Err(IsacError::Api {
                code: status,
                message,
            }),
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> IsacError {
    if err.is_timeout() {
        IsacError::Timeout(err.to_string())
    } else if err.is_connect() {
        IsacError::Connection(err.to_string())
    } else {
        IsacError::Http(err.to_string())
    }
}

/// Builder for configuring an [`OpenCtiClient`]
pub struct OpenCtiClientBuilder {
    api_key: String,
    host: String,
    timeout: Duration,
    user_agent: String,
}

impl OpenCtiClientBuilder {
    /// Create a new builder with the given API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            host: DEFAULT_HOST.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("seal-isac/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the platform host (useful for staging and testing)
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<OpenCtiClient> {
        let base = Url::parse(&format!("{}/", self.host.trim_end_matches('/')))?;
        let endpoint = base.join("graphql")?;

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| IsacError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(OpenCtiClient {
            inner: Arc::new(ClientInner {
                http,
                api_key: self.api_key,
                endpoint,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_endpoint_from_host() {
        let client = OpenCtiClient::builder("k")
            .host("https://sealisac.dev/")
            .build()
            .unwrap();
        assert_eq!(client.endpoint().as_str(), "https://sealisac.dev/graphql");

        let client = OpenCtiClient::new("k").unwrap();
        assert_eq!(client.endpoint().as_str(), "https://sealisac.org/graphql");
    }

    #[test]
    fn test_invalid_host() {
        let err = OpenCtiClient::builder("k").host("not a host").build();
        assert!(matches!(err, Err(IsacError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_sends_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": { "ok": 1 } })))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenCtiClient::builder("secret").host(server.uri()).build().unwrap();
        let data: Value = client.graphql("Ping", "query { ok }", json!({})).await.unwrap();
        assert_eq!(data["ok"], 1);
    }

    #[tokio::test]
    async fn test_graphql_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "ForbiddenAccess" }, { "message": "second" }]
            })))
            .mount(&server)
            .await;

        let client = OpenCtiClient::builder("k").host(server.uri()).build().unwrap();
        let err = client
            .graphql::<Value>("Ping", "query { ok }", json!({}))
            .await
            .unwrap_err();
        match err {
            IsacError::GraphQl(message) => assert_eq!(message, "ForbiddenAccess; second"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
            .mount(&server)
            .await;

        let client = OpenCtiClient::builder("k").host(server.uri()).build().unwrap();
        let err = client
            .graphql::<Value>("Ping", "query { ok }", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, IsacError::MissingData(_)));
    }

    #[tokio::test]
    async fn test_http_status_mapping() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer bad"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer busy"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(header("authorization", "Bearer broken"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({ "errors": [{ "message": "database down" }] })),
            )
            .mount(&server)
            .await;

        let call = |key: &'static str| {
            let uri = server.uri();
            async move {
                OpenCtiClient::builder(key)
                    .host(uri)
                    .build()
                    .unwrap()
                    .graphql::<Value>("Ping", "query { ok }", json!({}))
                    .await
                    .unwrap_err()
            }
        };

        assert!(call("bad").await.is_auth_error());
        assert!(matches!(
            call("busy").await,
            IsacError::RateLimited { retry_after: Some(7) }
        ));
        match call("broken").await {
            IsacError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "database down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
