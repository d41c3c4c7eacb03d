use serde::Deserialize;
use serde_json::Value;

/// Remote catalog gateway abstraction
///
/// This module is the single boundary to the catalog/recommendation service.
/// Everything above it works with normalized `Vec<Value>` item lists; the two
/// response shapes the service emits (bare array vs wrapped object) are
/// collapsed here and nowhere else.
use crate::{
    error::{FeedError, FeedResult},
    models::{ContentRecord, InteractionKind},
    services::validator,
};

pub mod http;

pub use http::HttpGateway;

/// Trait for catalog/recommendation service clients
///
/// Consumers hold `Arc<dyn CatalogGateway>` so section controllers and the
/// feedback coordinator can share one client, and tests can substitute an
/// in-memory implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogGateway: Send + Sync {
    /// Fetch the trending list as normalized raw items
    async fn list_trending(&self) -> FeedResult<Vec<Value>>;

    /// Fetch the new-releases list as normalized raw items
    async fn list_new_releases(&self) -> FeedResult<Vec<Value>>;

    /// Fetch the top-rated list as normalized raw items
    async fn list_top_rated(&self) -> FeedResult<Vec<Value>>;

    /// Fetch one catalog item's raw detail object
    async fn movie_details(&self, movie_id: i64) -> FeedResult<Value>;

    /// Fetch up to `count` scored recommendations as raw items
    async fn list_recommendations(&self, count: usize) -> FeedResult<Vec<Value>>;

    /// Submit a rating; the returned flag is the service's `success` field
    async fn submit_rating(&self, movie_id: i64, rating: u8) -> FeedResult<bool>;

    /// Submit a non-rating interaction event
    async fn submit_interaction(&self, movie_id: i64, kind: InteractionKind) -> FeedResult<bool>;
}

/// Fetches and validates a single catalog item
///
/// A detail object that fails required-field validation is an unusable
/// response, not a silently dropped list element.
pub async fn fetch_movie(gateway: &dyn CatalogGateway, movie_id: i64) -> FeedResult<ContentRecord> {
    let raw = gateway.movie_details(movie_id).await?;
    validator::validate_one(&raw)
        .ok_or_else(|| FeedError::malformed(format!("movie {} failed validation", movie_id)))
}

/// The two list shapes the catalog service responds with
///
/// List endpoints return either a bare JSON array or `{"data": [...]}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListPayload {
    Bare(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

impl ListPayload {
    pub(crate) fn into_items(self) -> Vec<Value> {
        match self {
            ListPayload::Bare(items) => items,
            ListPayload::Wrapped { data } => data,
        }
    }
}

/// Envelope of the recommendation endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationEnvelope {
    pub success: bool,
    #[serde(default)]
    pub recommendations: Vec<Value>,
    #[serde(default)]
    pub is_personalized: Option<bool>,
}

/// Acknowledgement body of the feedback endpoints
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitAck {
    #[serde(default)]
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_payload_bare_array() {
        let payload: ListPayload = serde_json::from_value(json!([{"id": 1}, {"id": 2}])).unwrap();
        assert_eq!(payload.into_items().len(), 2);
    }

    #[test]
    fn test_list_payload_wrapped_object() {
        let payload: ListPayload =
            serde_json::from_value(json!({"data": [{"id": 1}]})).unwrap();
        assert_eq!(payload.into_items().len(), 1);
    }

    #[test]
    fn test_list_payload_rejects_non_list_shape() {
        let result: Result<ListPayload, _> = serde_json::from_value(json!({"items": []}));
        assert!(result.is_err());
    }

    #[test]
    fn test_recommendation_envelope_defaults() {
        let envelope: RecommendationEnvelope =
            serde_json::from_value(json!({"success": true})).unwrap();
        assert!(envelope.success);
        assert!(envelope.recommendations.is_empty());
        assert_eq!(envelope.is_personalized, None);
    }

    #[test]
    fn test_submit_ack_missing_success_is_false() {
        let ack: SubmitAck = serde_json::from_value(json!({})).unwrap();
        assert!(!ack.success);
    }

    #[tokio::test]
    async fn test_fetch_movie_validates_detail_object() {
        let mut gateway = MockCatalogGateway::new();
        gateway
            .expect_movie_details()
            .returning(|_| Ok(json!({"id": 7, "title": "X"})));

        let record = fetch_movie(&gateway, 7).await.unwrap();
        assert_eq!(record.id, 7);
        assert_eq!(record.title, "X");
    }

    #[tokio::test]
    async fn test_fetch_movie_rejects_invalid_detail() {
        let mut gateway = MockCatalogGateway::new();
        gateway
            .expect_movie_details()
            .returning(|_| Ok(json!({"title": "no id"})));

        let err = fetch_movie(&gateway, 7).await.unwrap_err();
        assert_eq!(err.to_string(), "failed to load content");
    }
}
