use std::fmt::Display;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    error::FeedResult,
    gateway::CatalogGateway,
    models::{ContentRecord, RecommendationRecord},
    services::validator,
};

/// One independently fetched, independently stated content list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Trending,
    NewReleases,
    TopRated,
    Recommendations,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Trending,
        Section::NewReleases,
        Section::TopRated,
        Section::Recommendations,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Trending => "trending",
            Section::NewReleases => "new_releases",
            Section::TopRated => "top_rated",
            Section::Recommendations => "recommendations",
        }
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of one section's content
///
/// Transitions are total: `start()` moves any state to `Loading`, and the
/// fetch outcome moves `Loading` to `Loaded` or `Failed`. There is no
/// automatic retry; a retry is simply another `start()`.
#[derive(Debug, Clone, PartialEq)]
pub enum SectionState {
    Idle,
    Loading,
    Loaded(Vec<ContentRecord>),
    Failed(String),
}

impl SectionState {
    /// Whether the section has left `Loading` (or never entered it)
    pub fn is_settled(&self) -> bool {
        matches!(self, SectionState::Loaded(_) | SectionState::Failed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SectionState::Failed(_))
    }

    pub fn loaded_records(&self) -> Option<&[ContentRecord]> {
        match self {
            SectionState::Loaded(records) => Some(records),
            _ => None,
        }
    }
}

struct Slot {
    state: SectionState,
    /// Records from the most recent successful load, kept on display while a
    /// refresh is in flight or after a refresh fails
    visible: Vec<ContentRecord>,
}

/// Drives fetches for one section and owns its state exclusively
///
/// Controllers never talk to each other; a failure here is invisible to every
/// other section. In-flight fetches are never aborted: whichever response
/// completes last writes the state, regardless of start order.
pub struct SectionController {
    section: Section,
    gateway: Arc<dyn CatalogGateway>,
    recommendation_count: usize,
    slot: RwLock<Slot>,
}

impl SectionController {
    pub fn new(
        section: Section,
        gateway: Arc<dyn CatalogGateway>,
        recommendation_count: usize,
    ) -> Self {
        Self {
            section,
            gateway,
            recommendation_count,
            slot: RwLock::new(Slot {
                state: SectionState::Idle,
                visible: Vec::new(),
            }),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Runs one fetch cycle: `Loading`, then `Loaded` or `Failed`
    ///
    /// Re-entrant; previously loaded records stay visible until this fetch
    /// resolves.
    pub async fn start(&self) {
        {
            let mut slot = self.slot.write().await;
            slot.state = SectionState::Loading;
        }
        tracing::debug!(section = %self.section, "Section fetch started");

        let result = self.fetch_records().await;

        let mut slot = self.slot.write().await;
        match result {
            Ok(records) => {
                tracing::info!(
                    section = %self.section,
                    records = records.len(),
                    "Section loaded"
                );
                slot.visible = records.clone();
                slot.state = SectionState::Loaded(records);
            }
            Err(e) => {
                tracing::warn!(section = %self.section, error = %e, "Section fetch failed");
                slot.state = SectionState::Failed(e.to_string());
            }
        }
    }

    /// Gateway call plus the section's raw→canonical mapping step
    async fn fetch_records(&self) -> FeedResult<Vec<ContentRecord>> {
        match self.section {
            Section::Trending => Ok(validator::validate_items(
                &self.gateway.list_trending().await?,
            )),
            Section::NewReleases => Ok(validator::validate_items(
                &self.gateway.list_new_releases().await?,
            )),
            Section::TopRated => Ok(validator::validate_items(
                &self.gateway.list_top_rated().await?,
            )),
            Section::Recommendations => {
                let items = self
                    .gateway
                    .list_recommendations(self.recommendation_count)
                    .await?;
                Ok(map_recommendations(&items))
            }
        }
    }

    pub async fn state(&self) -> SectionState {
        self.slot.read().await.state.clone()
    }

    /// Records from the most recent successful load
    pub async fn records(&self) -> Vec<ContentRecord> {
        self.slot.read().await.visible.clone()
    }

    pub async fn is_settled(&self) -> bool {
        self.slot.read().await.state.is_settled()
    }

    pub async fn is_failed(&self) -> bool {
        self.slot.read().await.state.is_failed()
    }
}

/// Maps scored recommendation items into canonical records, dropping entries
/// that do not carry the scored shape and keeping input order
fn map_recommendations(items: &[Value]) -> Vec<ContentRecord> {
    let records: Vec<ContentRecord> = items
        .iter()
        .filter_map(|item| {
            serde_json::from_value::<RecommendationRecord>(item.clone())
                .map(ContentRecord::from)
                .ok()
        })
        .collect();

    if records.len() < items.len() {
        tracing::debug!(
            kept = records.len(),
            dropped = items.len() - records.len(),
            "Dropped malformed recommendation entries"
        );
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FeedError;
    use crate::gateway::MockCatalogGateway;
    use serde_json::json;

    fn catalog_items() -> Vec<Value> {
        vec![
            json!({"id": 1, "title": "First"}),
            json!({"id": 2, "title": "Second"}),
        ]
    }

    #[tokio::test]
    async fn test_controller_starts_idle() {
        let gateway = Arc::new(MockCatalogGateway::new());
        let controller = SectionController::new(Section::Trending, gateway, 10);
        assert_eq!(controller.state().await, SectionState::Idle);
        assert!(controller.records().await.is_empty());
    }

    #[tokio::test]
    async fn test_successful_fetch_loads_validated_records() {
        let mut gateway = MockCatalogGateway::new();
        gateway.expect_list_trending().returning(|| {
            Ok(vec![
                json!({"id": 1, "title": "First"}),
                json!({"title": "rejected, no id"}),
                json!({"id": 2, "title": "Second"}),
            ])
        });

        let controller = SectionController::new(Section::Trending, Arc::new(gateway), 10);
        controller.start().await;

        match controller.state().await {
            SectionState::Loaded(records) => {
                assert_eq!(records.len(), 2);
                assert_eq!(records[0].title, "First");
                assert_eq!(records[1].title, "Second");
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
        assert_eq!(controller.records().await.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_fetch_stores_error_message() {
        let mut gateway = MockCatalogGateway::new();
        gateway
            .expect_list_top_rated()
            .returning(|| Err(FeedError::Server(503)));

        let controller = SectionController::new(Section::TopRated, Arc::new(gateway), 10);
        controller.start().await;

        assert_eq!(
            controller.state().await,
            SectionState::Failed("server error".to_string())
        );
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let mut gateway = MockCatalogGateway::new();
        gateway
            .expect_list_new_releases()
            .returning(|| Err(FeedError::NotFound));

        let controller = SectionController::new(Section::NewReleases, Arc::new(gateway), 10);
        controller.start().await;

        assert_eq!(
            controller.state().await,
            SectionState::Failed("resource not found".to_string())
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_keeps_previous_records_visible() {
        let mut gateway = MockCatalogGateway::new();
        gateway
            .expect_list_trending()
            .times(1)
            .returning(|| Ok(vec![json!({"id": 1, "title": "First"})]));
        gateway
            .expect_list_trending()
            .times(1)
            .returning(|| Err(FeedError::Server(500)));

        let controller = SectionController::new(Section::Trending, Arc::new(gateway), 10);
        controller.start().await;
        assert_eq!(controller.records().await.len(), 1);

        controller.start().await;
        assert!(controller.state().await.is_failed());
        // content loaded before the failed refresh is still on display
        assert_eq!(controller.records().await.len(), 1);
        assert_eq!(controller.records().await[0].title, "First");
    }

    #[tokio::test]
    async fn test_recommendations_use_scored_mapping() {
        let mut gateway = MockCatalogGateway::new();
        gateway
            .expect_list_recommendations()
            .withf(|count| *count == 5)
            .returning(|_| {
                Ok(vec![
                    json!({"movie_id": 11, "score": 0.9, "title": "Top pick"}),
                    json!({"title": "missing movie_id and score"}),
                ])
            });

        let controller = SectionController::new(Section::Recommendations, Arc::new(gateway), 5);
        controller.start().await;

        match controller.state().await {
            SectionState::Loaded(records) => {
                assert_eq!(records.len(), 1);
                assert_eq!(records[0].id, 11);
                assert_eq!(records[0].title, "Top pick");
            }
            other => panic!("expected Loaded, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_sections_fail_independently() {
        let mut gateway = MockCatalogGateway::new();
        gateway
            .expect_list_trending()
            .returning(|| Err(FeedError::Server(500)));
        gateway
            .expect_list_top_rated()
            .returning(|| Ok(catalog_items()));

        let gateway: Arc<dyn CatalogGateway> = Arc::new(gateway);
        let trending = SectionController::new(Section::Trending, Arc::clone(&gateway), 10);
        let top_rated = SectionController::new(Section::TopRated, Arc::clone(&gateway), 10);

        tokio::join!(trending.start(), top_rated.start());

        assert_eq!(
            trending.state().await,
            SectionState::Failed("server error".to_string())
        );
        assert_eq!(top_rated.records().await.len(), 2);
    }

    #[test]
    fn test_section_state_predicates() {
        assert!(!SectionState::Idle.is_settled());
        assert!(!SectionState::Loading.is_settled());
        assert!(SectionState::Loaded(Vec::new()).is_settled());
        assert!(SectionState::Failed("x".to_string()).is_settled());
        assert!(SectionState::Failed("x".to_string()).is_failed());
        assert!(SectionState::Loaded(Vec::new()).loaded_records().is_some());
        assert!(SectionState::Loading.loaded_records().is_none());
    }
}
