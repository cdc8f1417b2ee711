//! Typed client for the status backend routes

use std::sync::Arc;

use serde::Deserialize;

use crate::endpoint::{CheckResult, Endpoint, EndpointId, NewEndpoint};
use crate::io::{HttpClient, HttpResponse};
use crate::StatusboardError;

#[derive(Debug, Deserialize)]
struct EndpointsResponse {
    endpoints: Vec<Endpoint>,
}

#[derive(Debug, Deserialize)]
struct EndpointResponse {
    endpoint: Endpoint,
}

#[derive(Debug, Deserialize)]
struct CheckStatusResponse {
    results: Vec<CheckResult>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Client for `/api/endpoints` and `/api/check-status`
pub struct BackendClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl BackendClient {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        tracing::debug!("Created BackendClient for {}", base_url);
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/endpoints`
    pub async fn list_endpoints(&self) -> crate::Result<Vec<Endpoint>> {
        let url = format!("{}/api/endpoints", self.base_url);
        let response = self.http.get(&url).await?;
        let parsed: EndpointsResponse = decode(&url, &response)?;
        tracing::debug!("Fetched {} endpoints", parsed.endpoints.len());
        Ok(parsed.endpoints)
    }

    /// `POST /api/endpoints`. A non-2xx `error` body becomes a validation
    /// failure for 4xx and a backend error otherwise.
    pub async fn add_endpoint(&self, new_endpoint: &NewEndpoint) -> crate::Result<Endpoint> {
        let url = format!("{}/api/endpoints", self.base_url);
        let body = serde_json::to_value(new_endpoint)?;
        let response = self.http.post_json(&url, &body).await?;

        if !response.is_success() {
            if let Ok(rejected) = serde_json::from_str::<ErrorResponse>(&response.body) {
                if (400..500).contains(&response.status) {
                    return Err(StatusboardError::Validation(rejected.error));
                }
                return Err(StatusboardError::Backend {
                    status: response.status,
                    message: rejected.error,
                });
            }
        }

        let parsed: EndpointResponse = decode(&url, &response)?;
        Ok(parsed.endpoint)
    }

    /// `POST /api/check-status` for a whole batch of ids in one round trip
    pub async fn check_status(&self, ids: &[EndpointId]) -> crate::Result<Vec<CheckResult>> {
        let url = format!("{}/api/check-status", self.base_url);
        let body = serde_json::json!({ "endpoint_ids": ids });
        let response = self.http.post_json(&url, &body).await?;
        let parsed: CheckStatusResponse = decode(&url, &response)?;
        tracing::debug!(
            "Checked {} endpoints, {} results",
            ids.len(),
            parsed.results.len()
        );
        Ok(parsed.results)
    }
}

fn decode<T: serde::de::DeserializeOwned>(url: &str, response: &HttpResponse) -> crate::Result<T> {
    if !response.is_success() {
        let detail = serde_json::from_str::<ErrorResponse>(&response.body)
            .map(|e| e.error)
            .unwrap_or_else(|_| response.body.clone());
        return Err(StatusboardError::Network(format!(
            "{} returned status {}: {}",
            url, response.status, detail
        )));
    }
    serde_json::from_str(&response.body).map_err(|e| {
        StatusboardError::Network(format!("Decoding response from {}: {}", url, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointStatus;
    use crate::io::MockHttpClient;

    const BASE: &str = "http://backend.test";

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn list_endpoints_parses_payload() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .withf(|url| url == "http://backend.test/api/endpoints")
            .returning(|_| {
                Box::pin(async {
                    Ok(ok(
                        r#"{"endpoints": [{"id": 1, "url": "http://a", "name": "A", "current_status": "Down"}]}"#,
                    ))
                })
            });

        let client = BackendClient::new(BASE, Arc::new(mock));
        let endpoints = client.list_endpoints().await.unwrap();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].current_status, EndpointStatus::Down);
    }

    #[tokio::test]
    async fn trailing_slash_is_trimmed() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .withf(|url| url == "http://backend.test/api/endpoints")
            .returning(|_| Box::pin(async { Ok(ok(r#"{"endpoints": []}"#)) }));

        let client = BackendClient::new("http://backend.test/", Arc::new(mock));
        assert!(client.list_endpoints().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_endpoints_non_2xx_is_network_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_get().returning(|_| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 503,
                    body: "unavailable".to_string(),
                })
            })
        });

        let client = BackendClient::new(BASE, Arc::new(mock));
        let err = client.list_endpoints().await.unwrap_err();
        assert!(matches!(err, StatusboardError::Network(_)));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn list_endpoints_bad_body_is_network_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_get()
            .returning(|_| Box::pin(async { Ok(ok("<html>oops</html>")) }));

        let client = BackendClient::new(BASE, Arc::new(mock));
        let err = client.list_endpoints().await.unwrap_err();
        assert!(matches!(err, StatusboardError::Network(_)));
    }

    #[tokio::test]
    async fn add_endpoint_posts_payload() {
        let mut mock = MockHttpClient::new();
        mock.expect_post_json()
            .withf(|url, body| {
                url == "http://backend.test/api/endpoints"
                    && body["url"] == "https://example.com"
                    && body["name"] == "Example"
                    && body["expected_status"] == 200
            })
            .returning(|_, _| {
                Box::pin(async {
                    Ok(HttpResponse {
                        status: 201,
                        body: r#"{"endpoint": {"id": 9, "url": "https://example.com", "name": "Example"}}"#
                            .to_string(),
                    })
                })
            });

        let client = BackendClient::new(BASE, Arc::new(mock));
        let endpoint = client
            .add_endpoint(&NewEndpoint {
                url: "https://example.com".to_string(),
                name: "Example".to_string(),
                expected_status: 200,
            })
            .await
            .unwrap();
        assert_eq!(endpoint.id, EndpointId::Number(9));
    }

    #[tokio::test]
    async fn add_endpoint_rejection_is_validation_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_post_json().returning(|_, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 400,
                    body: r#"{"error": "URL must start with http:// or https://"}"#.to_string(),
                })
            })
        });

        let client = BackendClient::new(BASE, Arc::new(mock));
        let err = client
            .add_endpoint(&NewEndpoint {
                url: "ftp://example.com".to_string(),
                name: "Example".to_string(),
                expected_status: 200,
            })
            .await
            .unwrap_err();
        match err {
            StatusboardError::Validation(msg) => {
                assert_eq!(msg, "URL must start with http:// or https://")
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_endpoint_server_error_keeps_backend_message() {
        let mut mock = MockHttpClient::new();
        mock.expect_post_json().returning(|_, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 500,
                    body: r#"{"error": "Database is locked"}"#.to_string(),
                })
            })
        });

        let client = BackendClient::new(BASE, Arc::new(mock));
        let err = client
            .add_endpoint(&NewEndpoint {
                url: "https://example.com".to_string(),
                name: "Example".to_string(),
                expected_status: 200,
            })
            .await
            .unwrap_err();
        match err {
            StatusboardError::Backend { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Database is locked");
            }
            other => panic!("expected backend error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_endpoint_server_error_without_body_is_network_error() {
        let mut mock = MockHttpClient::new();
        mock.expect_post_json().returning(|_, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 502,
                    body: "Bad Gateway".to_string(),
                })
            })
        });

        let client = BackendClient::new(BASE, Arc::new(mock));
        let err = client
            .add_endpoint(&NewEndpoint {
                url: "https://example.com".to_string(),
                name: "Example".to_string(),
                expected_status: 200,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, StatusboardError::Network(_)));
    }

    #[tokio::test]
    async fn check_status_sends_all_ids_in_one_request() {
        let mut mock = MockHttpClient::new();
        mock.expect_post_json()
            .times(1)
            .withf(|url, body| {
                url == "http://backend.test/api/check-status"
                    && body == &serde_json::json!({"endpoint_ids": [1, 2, "three"]})
            })
            .returning(|_, _| {
                Box::pin(async {
                    Ok(ok(
                        r#"{"results": [{"id": 1, "current_status": "Operational", "response_time": 42.0}]}"#,
                    ))
                })
            });

        let client = BackendClient::new(BASE, Arc::new(mock));
        let ids = vec![EndpointId::from(1), EndpointId::from(2), EndpointId::from("three")];
        let results = client.check_status(&ids).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].current_status, EndpointStatus::Operational);
        assert_eq!(results[0].response_time, Some(42.0));
    }

    #[tokio::test]
    async fn check_status_500_carries_error_detail() {
        let mut mock = MockHttpClient::new();
        mock.expect_post_json().returning(|_, _| {
            Box::pin(async {
                Ok(HttpResponse {
                    status: 500,
                    body: r#"{"error": "checker crashed"}"#.to_string(),
                })
            })
        });

        let client = BackendClient::new(BASE, Arc::new(mock));
        let err = client.check_status(&[EndpointId::from(1)]).await.unwrap_err();
        assert!(err.to_string().contains("checker crashed"));
    }
}
