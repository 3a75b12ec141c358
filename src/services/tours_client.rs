//! Client for the tours REST API.
//!
//! Provides typed access to:
//! - Tour, festival, hotel and testimonial listings
//! - Single tour lookup (with a distinct not-found error)
//! - Form submission endpoints (as a [`FormSubmitter`])
//!
//! Reads are retried with exponential backoff on transient failures. Form
//! submissions are sent exactly once per call; retrying is left to the user.

use async_trait::async_trait;
use backoff::ExponentialBackoff;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ClientSettings;
use crate::domain::{Festival, Hotel, Testimonial, Tour};
use crate::forms::{FormSubmitter, SubmissionError};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Tours API unavailable: {0}")]
    Network(String),

    #[error("Tours API error ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Invalid tours API response: {0}")]
    Decode(String),

    #[error("Invalid tours API URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to create HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Envelope used by every read endpoint
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// Error body returned by the API
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for the tours API.
#[derive(Clone)]
pub struct ToursApiClient {
    client: Client,
    base_url: Url,
    max_retry: Duration,
}

impl ToursApiClient {
    /// Create a new tours API client.
    pub fn new(
        base_url: &str,
        timeout_seconds: u64,
        max_retry_seconds: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        // Without a trailing slash `join` would drop the last path segment.
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url = Url::parse(&base)?;

        tracing::info!(base_url = %base_url, "Tours API client initialized");

        Ok(Self {
            client,
            base_url,
            max_retry: Duration::from_secs(max_retry_seconds),
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ClientError> {
        Self::new(
            &settings.api_url,
            settings.timeout_seconds,
            settings.max_retry_seconds,
        )
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// GET `path` and unwrap the `data` envelope, retrying transient failures.
    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path)?;
        let policy = ExponentialBackoff {
            max_elapsed_time: Some(self.max_retry),
            ..Default::default()
        };

        let client = &self.client;
        let target = &url;
        backoff::future::retry(policy, || async move {
            debug!(url = %target, "Tours API request");

            let response = client.get(target.clone()).send().await.map_err(|e| {
                warn!(url = %target, error = %e, "Tours API request failed");
                backoff::Error::transient(ClientError::Network(e.to_string()))
            })?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(backoff::Error::permanent(ClientError::NotFound(
                    target.path().to_string(),
                )));
            }
            if !status.is_success() {
                let message = response
                    .json::<ApiErrorBody>()
                    .await
                    .map(|body| body.message)
                    .unwrap_or_else(|_| status.to_string());
                let error = ClientError::Status {
                    status: status.as_u16(),
                    message,
                };
                return Err(if status.is_server_error() {
                    backoff::Error::transient(error)
                } else {
                    backoff::Error::permanent(error)
                });
            }

            response
                .json::<DataEnvelope<T>>()
                .await
                .map(|envelope| envelope.data)
                .map_err(|e| backoff::Error::permanent(ClientError::Decode(e.to_string())))
        })
        .await
    }

    /// Full tour catalog, in catalog order.
    #[instrument(skip(self))]
    pub async fn list_tours(&self) -> Result<Vec<Tour>, ClientError> {
        self.get("/api/tours?showAll=true").await
    }

    /// Single tour; an unknown id is [`ClientError::NotFound`].
    #[instrument(skip(self))]
    pub async fn get_tour(&self, id: Uuid) -> Result<Tour, ClientError> {
        self.get(&format!("/api/tours/{}", id)).await
    }

    #[instrument(skip(self))]
    pub async fn list_festivals(&self) -> Result<Vec<Festival>, ClientError> {
        self.get("/api/festivals").await
    }

    #[instrument(skip(self))]
    pub async fn list_hotels(&self) -> Result<Vec<Hotel>, ClientError> {
        self.get("/api/hotels").await
    }

    #[instrument(skip(self))]
    pub async fn list_testimonials(&self) -> Result<Vec<Testimonial>, ClientError> {
        self.get("/api/testimonials").await
    }
}

#[async_trait]
impl FormSubmitter for ToursApiClient {
    async fn submit(
        &self,
        endpoint: &str,
        payload: &serde_json::Value,
    ) -> Result<(), SubmissionError> {
        let url = self
            .url(endpoint)
            .map_err(|e| SubmissionError::Network(e.to_string()))?;

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(endpoint = endpoint, error = %e, "Form submission request failed");
                SubmissionError::Network(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .map(|body| body.message);
        warn!(endpoint = endpoint, status = %status, "Form submission rejected");

        Err(SubmissionError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_join_onto_base_with_or_without_slash() {
        for base in ["http://localhost:8080", "http://localhost:8080/"] {
            let client = ToursApiClient::new(base, 5, 1).unwrap();
            assert_eq!(
                client.url("/api/tours").unwrap().as_str(),
                "http://localhost:8080/api/tours"
            );
        }
    }

    #[test]
    fn base_path_prefix_is_kept() {
        let client = ToursApiClient::new("https://example.bt/backend", 5, 1).unwrap();
        assert_eq!(
            client.url("/api/quote-requests").unwrap().as_str(),
            "https://example.bt/backend/api/quote-requests"
        );
        assert_eq!(
            client.url("api/tours?showAll=true").unwrap().as_str(),
            "https://example.bt/backend/api/tours?showAll=true"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            ToursApiClient::new("not a url", 5, 1),
            Err(ClientError::Url(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_submission_error() {
        // Port 9 (discard) on localhost is not expected to accept HTTP.
        let client = ToursApiClient::new("http://127.0.0.1:9", 1, 0).unwrap();
        let result = client
            .submit("/api/contact-messages", &serde_json::json!({"name": "x"}))
            .await;
        assert!(matches!(result, Err(SubmissionError::Network(_))));
    }

    mod against_local_server {
        use super::*;
        use axum::{
            http::StatusCode as AxumStatus,
            routing::{get, post},
            Json, Router,
        };
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        /// Serve `router` on an ephemeral port and return its base URL.
        async fn serve(router: Router) -> String {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });
            format!("http://{}", addr)
        }

        fn catalog_api() -> Router {
            Router::new()
                .route(
                    "/api/tours",
                    get(|| async {
                        Json(serde_json::json!({
                            "data": [{
                                "id": "00000000-0000-0000-0000-000000000001",
                                "name": "Paro Valley Discovery",
                                "category": "Cultural",
                                "link": "/tours/00000000-0000-0000-0000-000000000001"
                            }],
                            "meta": {"total": 1, "shown": 1, "hasMore": false, "showAll": true}
                        }))
                    }),
                )
                .route(
                    "/api/tours/:tour_id",
                    get(|| async {
                        (
                            AxumStatus::NOT_FOUND,
                            Json(serde_json::json!({"code": "NOT_FOUND", "message": "Tour not found"})),
                        )
                    }),
                )
                .route(
                    "/api/quote-requests",
                    post(|| async {
                        (
                            AxumStatus::UNPROCESSABLE_ENTITY,
                            Json(serde_json::json!({
                                "code": "VALIDATION_FAILED",
                                "message": "Please correct the highlighted fields",
                                "fields": {"groupSize": "Group Size is required"}
                            })),
                        )
                    }),
                )
        }

        #[tokio::test]
        async fn list_unwraps_data_envelope() {
            let client = ToursApiClient::new(&serve(catalog_api()).await, 5, 0).unwrap();

            let tours = client.list_tours().await.unwrap();

            assert_eq!(tours.len(), 1);
            assert_eq!(tours[0].name, "Paro Valley Discovery");
            assert_eq!(tours[0].price, None);
        }

        #[tokio::test]
        async fn missing_tour_is_not_found() {
            let client = ToursApiClient::new(&serve(catalog_api()).await, 5, 0).unwrap();

            let result = client.get_tour(Uuid::from_u128(42)).await;

            assert!(matches!(result, Err(ClientError::NotFound(_))), "{:?}", result.err());
        }

        #[tokio::test]
        async fn rejected_submission_carries_status_and_message() {
            let client = ToursApiClient::new(&serve(catalog_api()).await, 5, 0).unwrap();

            let result = client
                .submit("/api/quote-requests", &serde_json::json!({"name": "Dechen"}))
                .await;

            assert_eq!(
                result,
                Err(SubmissionError::Rejected {
                    status: 422,
                    message: Some("Please correct the highlighted fields".to_string()),
                })
            );
        }

        #[tokio::test]
        async fn failed_submission_is_sent_once() {
            let hits = Arc::new(AtomicUsize::new(0));
            let router = Router::new().route(
                "/api/bookings",
                post({
                    let hits = hits.clone();
                    move || {
                        let hits = hits.clone();
                        async move {
                            hits.fetch_add(1, Ordering::SeqCst);
                            (AxumStatus::SERVICE_UNAVAILABLE, "maintenance")
                        }
                    }
                }),
            );
            let client = ToursApiClient::new(&serve(router).await, 5, 30).unwrap();

            let result = client
                .submit("/api/bookings", &serde_json::json!({"name": "Tashi"}))
                .await;

            assert_eq!(
                result,
                Err(SubmissionError::Rejected {
                    status: 503,
                    message: None,
                })
            );
            assert_eq!(hits.load(Ordering::SeqCst), 1);
        }
    }
}
