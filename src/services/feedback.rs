use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use crate::{
    gateway::CatalogGateway,
    models::{FeedbackEvent, InteractionKind},
    services::section::SectionController,
};

/// Submits user feedback and keeps the recommendations section fresh
///
/// Every submission degrades to a `bool`: transport failures, non-2xx
/// statuses, and service-side rejections all come back as `false`, logged but
/// never raised and never retried. Accepted *significant* events schedule one
/// debounced refresh of the recommendations section; bursts collapse onto a
/// single timer where the latest event wins.
pub struct FeedbackCoordinator {
    gateway: Arc<dyn CatalogGateway>,
    recommendations: Arc<SectionController>,
    debounce: Duration,
    /// The single owned refresh timer; rescheduling aborts the previous one
    pending_refresh: Mutex<Option<JoinHandle<()>>>,
    /// Optimistic cache of the last rating submitted per content item, used
    /// to pre-fill UI, never to gate submissions
    rating_cache: RwLock<HashMap<i64, u8>>,
}

impl FeedbackCoordinator {
    pub fn new(
        gateway: Arc<dyn CatalogGateway>,
        recommendations: Arc<SectionController>,
        debounce: Duration,
    ) -> Self {
        Self {
            gateway,
            recommendations,
            debounce,
            pending_refresh: Mutex::new(None),
            rating_cache: RwLock::new(HashMap::new()),
        }
    }

    /// Submits a 1..=5 star rating
    ///
    /// Out-of-range values are refused locally: the service would reject them
    /// with a 400 anyway, so the round trip is skipped.
    pub async fn submit_rating(&self, content_id: i64, rating: u8) -> bool {
        if !(1..=5).contains(&rating) {
            tracing::warn!(content_id, rating, "Rating outside 1..=5 refused locally");
            return false;
        }
        self.dispatch(FeedbackEvent::rating(content_id, rating)).await
    }

    /// Submits a non-rating interaction event
    pub async fn submit_interaction(&self, content_id: i64, kind: InteractionKind) -> bool {
        if kind == InteractionKind::Rate {
            tracing::warn!(content_id, "Ratings must go through submit_rating");
            return false;
        }
        self.dispatch(FeedbackEvent::interaction(content_id, kind)).await
    }

    /// Last rating submitted for a content item, if any
    pub async fn last_rating(&self, content_id: i64) -> Option<u8> {
        self.rating_cache.read().await.get(&content_id).copied()
    }

    /// Whether a debounced refresh is currently scheduled and not yet fired
    pub async fn refresh_pending(&self) -> bool {
        self.pending_refresh
            .lock()
            .await
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }

    async fn dispatch(&self, event: FeedbackEvent) -> bool {
        let result = match event.rating {
            Some(rating) => self.gateway.submit_rating(event.content_id, rating).await,
            None => {
                self.gateway
                    .submit_interaction(event.content_id, event.kind)
                    .await
            }
        };

        match result {
            Ok(true) => {
                tracing::info!(
                    content_id = event.content_id,
                    kind = event.kind.as_str(),
                    "Feedback accepted"
                );
                if let Some(rating) = event.rating {
                    self.rating_cache.write().await.insert(event.content_id, rating);
                }
                if event.kind.is_significant() {
                    self.schedule_refresh().await;
                }
                true
            }
            Ok(false) => {
                tracing::warn!(
                    content_id = event.content_id,
                    kind = event.kind.as_str(),
                    "Feedback rejected by service"
                );
                false
            }
            Err(e) => {
                tracing::warn!(
                    content_id = event.content_id,
                    kind = event.kind.as_str(),
                    error = %e,
                    "Feedback submission failed"
                );
                false
            }
        }
    }

    /// Arms the refresh timer, cancelling any timer already pending so bursts
    /// of significant events produce exactly one refresh
    async fn schedule_refresh(&self) {
        let controller = Arc::clone(&self.recommendations);
        let debounce = self.debounce;

        let task = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            tracing::debug!("Debounced recommendations refresh firing");
            controller.start().await;
        });

        let mut pending = self.pending_refresh.lock().await;
        if let Some(previous) = pending.replace(task) {
            previous.abort();
        }
    }
}
