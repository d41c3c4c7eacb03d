/// HTTP implementation of the catalog gateway
///
/// One shared `reqwest::Client` per gateway. Every request carries a fresh
/// `x-request-id` for correlation with the service's logs, and a bearer token
/// when one is configured — an absent token omits the header rather than
/// failing locally, so authorization outcomes are always the service's call.
use std::time::Duration;

use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::{
    config::Config,
    error::{FeedError, FeedResult},
    models::InteractionKind,
};

use super::{CatalogGateway, ListPayload, RecommendationEnvelope, SubmitAck};

/// HTTP header name for the outbound request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct HttpGateway {
    http_client: HttpClient,
    base_url: String,
    auth_token: Option<String>,
}

impl HttpGateway {
    /// Creates a gateway against `base_url` with reqwest's default settings
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: normalize_base_url(base_url.into()),
            auth_token,
        }
    }

    /// Creates a gateway from application configuration
    pub fn from_config(config: &Config) -> FeedResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            base_url: normalize_base_url(config.catalog_api_url.clone()),
            auth_token: config.catalog_api_token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.decorate(self.http_client.get(self.endpoint(path)))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.decorate(self.http_client.post(self.endpoint(path)))
    }

    fn decorate(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Checks the status and decodes the body, keeping the two failure modes
    /// distinct: a bad status maps through the error taxonomy, an undecodable
    /// body on a good status is a malformed payload.
    async fn read_json(response: Response) -> FeedResult<Value> {
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::from_status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "Failed to parse catalog response body");
            FeedError::malformed(format!("invalid JSON body: {}", e))
        })
    }

    /// GETs a list endpoint and normalizes both accepted response shapes
    async fn fetch_list(&self, path: &str) -> FeedResult<Vec<Value>> {
        let response = self.get(path).send().await?;
        let payload = Self::read_json(response).await?;

        let list: ListPayload = serde_json::from_value(payload)
            .map_err(|_| FeedError::malformed(format!("expected a content list at {}", path)))?;
        let items = list.into_items();

        tracing::debug!(path = %path, items = items.len(), "Content list fetched");
        Ok(items)
    }

    async fn submit(&self, path: &str, body: Value) -> FeedResult<bool> {
        let response = self.post(path).json(&body).send().await?;
        let payload = Self::read_json(response).await?;

        let ack: SubmitAck = serde_json::from_value(payload)
            .map_err(|_| FeedError::malformed(format!("unexpected acknowledgement at {}", path)))?;
        Ok(ack.success)
    }
}

#[async_trait::async_trait]
impl CatalogGateway for HttpGateway {
    async fn list_trending(&self) -> FeedResult<Vec<Value>> {
        self.fetch_list("/movies/trending/").await
    }

    async fn list_new_releases(&self) -> FeedResult<Vec<Value>> {
        self.fetch_list("/movies/new-releases/").await
    }

    async fn list_top_rated(&self) -> FeedResult<Vec<Value>> {
        self.fetch_list("/movies/top-rated/").await
    }

    async fn movie_details(&self, movie_id: i64) -> FeedResult<Value> {
        let response = self
            .get(&format!("/movies/{}/", movie_id))
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn list_recommendations(&self, count: usize) -> FeedResult<Vec<Value>> {
        let response = self
            .get("/recommendations/")
            .query(&[("count", count)])
            .send()
            .await?;
        let payload = Self::read_json(response).await?;

        let envelope: RecommendationEnvelope = serde_json::from_value(payload)
            .map_err(|_| FeedError::malformed("unexpected recommendation envelope"))?;

        if !envelope.success {
            return Err(FeedError::malformed(
                "recommendation service reported failure",
            ));
        }

        tracing::debug!(
            items = envelope.recommendations.len(),
            personalized = envelope.is_personalized.unwrap_or(false),
            "Recommendations fetched"
        );
        Ok(envelope.recommendations)
    }

    async fn submit_rating(&self, movie_id: i64, rating: u8) -> FeedResult<bool> {
        self.submit(
            "/ratings/",
            json!({ "movie_id": movie_id, "rating": rating }),
        )
        .await
    }

    async fn submit_interaction(&self, movie_id: i64, kind: InteractionKind) -> FeedResult<bool> {
        self.submit(
            "/interactions/",
            json!({ "movie_id": movie_id, "type": kind.as_str() }),
        )
        .await
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}
