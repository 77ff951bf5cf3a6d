//! # Limitless API Client
//!
//! Authenticated GET requests against the Limitless TCG REST API.
//!
//! Every request first sends the credential as the `key` query parameter. If that
//! attempt fails for any reason (transport error, non-success status, unparseable
//! body) the identical request is sent once more with the credential in the
//! `X-Access-Key` header instead. A failure in header mode is returned to the caller.

pub mod auth;
pub mod query;

use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, error, warn};

pub use auth::{AuthMode, ACCESS_KEY_HEADER, KEY_QUERY_PARAM};
pub use query::{QueryParams, QueryValue};

use crate::config::{ApiKey, ServerConfig};
use crate::error::{ClientError, ClientResult};

/// Strip exactly one leading `/` from an endpoint path.
pub fn normalize_endpoint(endpoint: &str) -> &str {
    endpoint.strip_prefix('/').unwrap_or(endpoint)
}

/// HTTP client for the Limitless TCG API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct LimitlessClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
}

impl LimitlessClient {
    pub fn new(config: &ServerConfig) -> ClientResult<Self> {
        let http = Client::builder()
            .user_agent(format!("limitless-mcp/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key().clone(),
            base_url: config.base_url().to_string(),
        })
    }

    /// GET `endpoint` and return the parsed JSON body, starting in query mode.
    pub async fn get_json(&self, endpoint: &str, params: &QueryParams) -> ClientResult<Value> {
        self.get_json_with_mode(endpoint, params, AuthMode::default())
            .await
    }

    /// GET `endpoint` starting in `mode`, falling back per [`AuthMode::fallback`].
    pub async fn get_json_with_mode(
        &self,
        endpoint: &str,
        params: &QueryParams,
        mode: AuthMode,
    ) -> ClientResult<Value> {
        let mut mode = mode;
        loop {
            match self.attempt(endpoint, params, mode).await {
                Ok(value) => return Ok(value),
                Err(e) => match mode.fallback() {
                    Some(next) => {
                        warn!(
                            endpoint = %endpoint,
                            auth_mode = %mode,
                            error = %e,
                            "Limitless API request failed, retrying with {} authentication",
                            next
                        );
                        mode = next;
                    }
                    None => {
                        error!(
                            endpoint = %endpoint,
                            auth_mode = %mode,
                            status = ?e.status(),
                            error = %e,
                            "Limitless API request failed"
                        );
                        return Err(e);
                    }
                },
            }
        }
    }

    /// Request URL for `endpoint` with `params`, excluding the credential.
    pub fn endpoint_url(&self, endpoint: &str, params: &QueryParams) -> ClientResult<Url> {
        let path = normalize_endpoint(endpoint);
        let mut url = Url::parse(&format!("{}/{}", self.base_url, path)).map_err(|e| {
            ClientError::Url {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            }
        })?;

        if !params.is_empty() {
            let mut query_pairs = url.query_pairs_mut();
            for (name, value) in params.pairs() {
                query_pairs.append_pair(name, &value);
            }
        }

        Ok(url)
    }

    async fn attempt(
        &self,
        endpoint: &str,
        params: &QueryParams,
        mode: AuthMode,
    ) -> ClientResult<Value> {
        let mut url = self.endpoint_url(endpoint, params)?;
        debug!(url = %url, auth_mode = %mode, "Sending Limitless API request");

        let request = match mode {
            AuthMode::Query => {
                url.query_pairs_mut()
                    .append_pair(KEY_QUERY_PARAM, self.api_key.expose());
                self.http.get(url)
            }
            AuthMode::Header => self
                .http
                .get(url)
                .header(ACCESS_KEY_HEADER, self.api_key.expose()),
        };

        // reqwest errors render the request URL, which carries the key in query mode.
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::upstream_status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::Transport(e.without_url()))?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TEST_KEY: &str = "test-key";

    fn client_for(server: &MockServer) -> LimitlessClient {
        let config = ServerConfig::new(TEST_KEY, &server.uri()).unwrap();
        LimitlessClient::new(&config).unwrap()
    }

    #[test]
    fn test_normalize_endpoint() {
        assert_eq!(normalize_endpoint("/tournaments"), "tournaments");
        assert_eq!(normalize_endpoint("tournaments"), "tournaments");
        assert_eq!(normalize_endpoint("//tournaments"), "/tournaments");
        assert_eq!(
            normalize_endpoint("/tournaments/1/standings"),
            "tournaments/1/standings"
        );
    }

    #[test]
    fn test_endpoint_url_strips_one_leading_separator() {
        let config = ServerConfig::new(TEST_KEY, "https://play.limitlesstcg.com/api").unwrap();
        let client = LimitlessClient::new(&config).unwrap();

        let with_slash = client
            .endpoint_url("/tournaments", &QueryParams::new())
            .unwrap();
        let without_slash = client
            .endpoint_url("tournaments", &QueryParams::new())
            .unwrap();
        assert_eq!(with_slash, without_slash);
        assert_eq!(
            with_slash.as_str(),
            "https://play.limitlesstcg.com/api/tournaments"
        );
    }

    #[test]
    fn test_endpoint_url_omits_absent_params_and_credential() {
        let config = ServerConfig::new(TEST_KEY, "https://play.limitlesstcg.com/api").unwrap();
        let client = LimitlessClient::new(&config).unwrap();
        let params = QueryParams::new()
            .with("game", Some("VGC"))
            .with::<&str>("format", None)
            .with("limit", Some(10u32));

        let url = client.endpoint_url("tournaments", &params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://play.limitlesstcg.com/api/tournaments?game=VGC&limit=10"
        );
        assert!(!url.as_str().contains(TEST_KEY));
    }

    #[tokio::test]
    async fn test_query_mode_success_sends_key_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .and(query_param("key", TEST_KEY))
            .and(query_param("game", "VGC"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "abc"}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let params = QueryParams::new().with("game", Some("VGC"));
        let result = client.get_json("/tournaments", &params).await.unwrap();
        assert_eq!(result, json!([{"id": "abc"}]));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get(ACCESS_KEY_HEADER).is_none());
    }

    #[tokio::test]
    async fn test_falls_back_to_header_mode() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tournaments/123/standings"))
            .and(query_param("key", TEST_KEY))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tournaments/123/standings"))
            .and(header(ACCESS_KEY_HEADER, TEST_KEY))
            .and(query_param_is_missing("key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"placing": 1}])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client
            .get_json("tournaments/123/standings", &QueryParams::new())
            .await
            .unwrap();
        assert_eq!(result, json!([{"placing": 1}]));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);

        let first = &requests[0];
        assert!(first.headers.get(ACCESS_KEY_HEADER).is_none());
        assert!(first
            .url
            .query_pairs()
            .any(|(k, v)| k == "key" && v == TEST_KEY));

        let second = &requests[1];
        assert_eq!(
            second.headers.get(ACCESS_KEY_HEADER).unwrap().to_str().unwrap(),
            TEST_KEY
        );
        assert!(!second.url.query_pairs().any(|(k, _)| k == "key"));
    }

    #[tokio::test]
    async fn test_fallback_resends_identical_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .and(query_param("key", TEST_KEY))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .and(header(ACCESS_KEY_HEADER, TEST_KEY))
            .and(query_param_is_missing("key"))
            .and(query_param("game", "VGC"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let params = QueryParams::new()
            .with("game", Some("VGC"))
            .with::<&str>("format", None)
            .with("limit", Some(10u32));
        client.get_json("tournaments", &params).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 2);
        for request in &requests {
            let pairs: Vec<(String, String)> = request
                .url
                .query_pairs()
                .filter(|(k, _)| k != "key")
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            assert_eq!(
                pairs,
                vec![
                    ("game".to_string(), "VGC".to_string()),
                    ("limit".to_string(), "10".to_string()),
                ]
            );
        }
        assert!(requests[1].headers.get(ACCESS_KEY_HEADER).is_some());
        assert!(!requests[1].url.query_pairs().any(|(k, _)| k == "key"));
    }

    #[tokio::test]
    async fn test_header_mode_failure_propagates_after_one_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .get_json_with_mode("tournaments", &QueryParams::new(), AuthMode::Header)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get(ACCESS_KEY_HEADER).is_some());
    }

    #[tokio::test]
    async fn test_both_modes_fail_returns_last_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tournaments/missing/details"))
            .respond_with(ResponseTemplate::new(404))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .get_json("tournaments/missing/details", &QueryParams::new())
            .await
            .unwrap_err();
        match err {
            ClientError::UpstreamStatus {
                status,
                status_text,
            } => {
                assert_eq!(status, 404);
                assert_eq!(status_text, "Not Found");
            }
            other => panic!("Expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error_after_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tournaments"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .get_json("tournaments", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        // Nothing listens on port 9 (discard) in the test environment.
        let config = ServerConfig::new(TEST_KEY, "http://127.0.0.1:9").unwrap();
        let client = LimitlessClient::new(&config).unwrap();
        let err = client
            .get_json("tournaments", &QueryParams::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
    }

    #[tokio::test]
    async fn test_query_mode_transport_error_does_not_render_key() {
        let config = ServerConfig::new("sekrit-key", "http://127.0.0.1:9").unwrap();
        let client = LimitlessClient::new(&config).unwrap();
        let err = client
            .attempt("tournaments", &QueryParams::new(), AuthMode::Query)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)));
        assert!(!err.to_string().contains("sekrit-key"));
        assert!(!format!("{err:?}").contains("sekrit-key"));
    }
}
