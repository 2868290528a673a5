//! HTTP client for the Cellosaurus REST API.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::models::{CellLineRequest, Format, SearchRequest};
use crate::params::{BuildParams, QueryParameters, release_info_params};

pub const BASE_URL: &str = "https://api.cellosaurus.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure talking to the remote API.
#[derive(Debug)]
pub enum TransportError {
    InvalidUrl(String),
    Timeout(String),
    Request(String),
    Status { status: u16, url: String, body: String },
    Decode(String),
}

impl TransportError {
    fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(describe(err))
        } else if err.is_decode() {
            Self::Decode(describe(err))
        } else {
            Self::Request(describe(err))
        }
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(message) => write!(f, "invalid request url: {message}"),
            Self::Timeout(message) => write!(f, "request timed out: {message}"),
            Self::Request(message) => write!(f, "request failed: {message}"),
            Self::Status { status, url, body } => {
                if body.is_empty() {
                    write!(f, "HTTP {status} from {url}")
                } else {
                    write!(f, "HTTP {status} from {url}: {body}")
                }
            }
            Self::Decode(message) => write!(f, "invalid JSON response: {message}"),
        }
    }
}

impl Error for TransportError {}

// reqwest keeps the useful part (connect refused, dns, ...) in the source chain.
fn describe(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Connection settings for [`CellosaurusClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("cellosaurus-mcp/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Url::parse(BASE_URL).expect("valid Cellosaurus base URL"))
    }
}

/// Issues GET requests against the API and decodes the JSON body.
///
/// The underlying `reqwest::Client` is internally reference counted, so a
/// single instance can be shared across concurrent tool calls.
#[derive(Debug, Clone)]
pub struct CellosaurusClient {
    http: Client,
    config: ClientConfig,
}

impl CellosaurusClient {
    /// Builds a client from the given configuration.
    ///
    /// # Errors
    /// Returns `TransportError::Request` if the HTTP client cannot be built
    /// (for example when no TLS backend is available).
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| TransportError::from_reqwest(&err))?;
        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Runs a search against `/search/cell-line`.
    ///
    /// # Errors
    /// Returns `TransportError` on timeout, connection failure, non-2xx status,
    /// or a body that is not valid JSON.
    pub async fn search(&self, request: &SearchRequest) -> Result<Value, TransportError> {
        self.get(&["search", "cell-line"], &request.build_params(), request.format())
            .await
    }

    /// Fetches one record from `/cell-line/<accession>`.
    ///
    /// # Errors
    /// Returns `TransportError` on timeout, connection failure, non-2xx status,
    /// or a body that is not valid JSON.
    pub async fn lookup(&self, request: &CellLineRequest) -> Result<Value, TransportError> {
        self.get(
            &["cell-line", request.accession()],
            &request.build_params(),
            request.format(),
        )
        .await
    }

    /// Fetches release metadata from `/release-info`.
    ///
    /// # Errors
    /// Returns `TransportError` on any transport or decoding failure.
    pub async fn release_info(&self, format: Format) -> Result<Value, TransportError> {
        self.get(&["release-info"], &release_info_params(format), format)
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.config.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(
        &self,
        segments: &[&str],
        params: &QueryParameters,
        format: Format,
    ) -> Result<Value, TransportError> {
        let url = self.endpoint(segments)?;
        debug!(url = %url, params = params.len(), timeout = ?self.config.timeout, "GET cellosaurus");

        let response = self
            .http
            .get(url.clone())
            .query(&params.to_pairs())
            .send()
            .await
            .map_err(|err| TransportError::from_reqwest(&err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body: body.trim().to_string(),
            });
        }

        // JSON is decoded from the raw bytes so invalid UTF-8 is rejected, not replaced.
        if format.is_json() {
            response
                .json::<Value>()
                .await
                .map_err(|err| TransportError::from_reqwest(&err))
        } else {
            let body = response
                .text()
                .await
                .map_err(|err| TransportError::from_reqwest(&err))?;
            Ok(Value::String(body))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::CellosaurusField;
    use crate::models::SearchOptions;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> CellosaurusClient {
        let base_url = Url::parse(&server.uri()).expect("mock server uri");
        CellosaurusClient::new(ClientConfig::new(base_url).with_timeout(timeout))
            .expect("client builds")
    }

    #[test]
    fn default_config_points_at_public_api() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url.as_str(), "https://api.cellosaurus.org/");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert!(config.user_agent.starts_with("cellosaurus-mcp/"));
    }

    #[tokio::test]
    async fn search_sends_built_params_and_returns_body() {
        let server = MockServer::start().await;
        let body = json!({"results": [{"id": "HeLa", "ac": "CVCL_0030"}], "total_found": 1});

        Mock::given(method("GET"))
            .and(path("/search/cell-line"))
            .and(query_param("q", "id:HeLa"))
            .and(query_param("fields", "id,ac"))
            .and(query_param("start", "0"))
            .and(query_param("rows", "5"))
            .and(header("user-agent", ClientConfig::default().user_agent.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let request = SearchRequest::try_from(SearchOptions {
            fields: Some(vec![CellosaurusField::Id, CellosaurusField::Ac]),
            rows: 5,
            ..SearchOptions::default()
        })
        .expect("valid request");
        let client = client_for(&server, Duration::from_secs(5));

        let result = client.search(&request).await.expect("search succeeds");
        assert_eq!(result, body);
    }

    #[tokio::test]
    async fn lookup_uses_accession_path() {
        let server = MockServer::start().await;
        let body = json!({"Cellosaurus": {"cell-line-list": [{"accession-list": []}]}});

        Mock::given(method("GET"))
            .and(path("/cell-line/CVCL_0030"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let request = CellLineRequest::new("CVCL_0030", None, Format::Json).expect("valid");
        let client = client_for(&server, Duration::from_secs(5));

        assert_eq!(client.lookup(&request).await.expect("lookup succeeds"), body);
    }

    #[test]
    fn accession_is_a_single_path_segment() {
        let client = CellosaurusClient::new(ClientConfig::default()).expect("client builds");
        let url = client.endpoint(&["cell-line", "a/b c"]).expect("url builds");
        assert_eq!(url.as_str(), "https://api.cellosaurus.org/cell-line/a%2Fb%20c");
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cell-line/CVCL_XXXX"))
            .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
            .mount(&server)
            .await;

        let request = CellLineRequest::new("CVCL_XXXX", None, Format::Json).expect("valid");
        let err = client_for(&server, Duration::from_secs(5))
            .lookup(&request)
            .await
            .expect_err("404 should fail");

        match &err {
            TransportError::Status { status, body, .. } => {
                assert_eq!(*status, 404);
                assert_eq!(body, "not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("HTTP 404 from "));
    }

    #[tokio::test]
    async fn malformed_json_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/cell-line"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5))
            .search(&SearchRequest::default())
            .await
            .expect_err("html body should fail");
        assert!(matches!(err, TransportError::Decode(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn invalid_utf8_body_is_a_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/cell-line/CVCL_0030"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(b"{\"id\": \"He\xFFLa\"}".to_vec(), "application/json"),
            )
            .mount(&server)
            .await;

        let request = CellLineRequest::new("CVCL_0030", None, Format::Json).expect("valid");
        let err = client_for(&server, Duration::from_secs(5))
            .lookup(&request)
            .await
            .expect_err("invalid UTF-8 must not be decoded");
        assert!(matches!(err, TransportError::Decode(_)), "got {err:?}");
        assert!(err.to_string().starts_with("invalid JSON response: "), "{err}");
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/release-info"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"version": "50.0"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_millis(50))
            .release_info(Format::Json)
            .await
            .expect_err("delay exceeds timeout");
        assert!(matches!(err, TransportError::Timeout(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn non_json_format_returns_raw_text() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/release-info"))
            .and(query_param("format", "txt"))
            .respond_with(ResponseTemplate::new(200).set_body_string("Version: 50.0\n"))
            .mount(&server)
            .await;

        let result = client_for(&server, Duration::from_secs(5))
            .release_info(Format::Txt)
            .await
            .expect("text body is accepted");
        assert_eq!(result, Value::String("Version: 50.0\n".to_string()));
    }
}
