use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    config::Config,
    gateway::CatalogGateway,
    models::ContentRecord,
    services::{
        feedback::FeedbackCoordinator,
        section::{Section, SectionController, SectionState},
    },
};

/// Fallback order for the primary carousel: first non-empty loaded list wins
const CAROUSEL_PRIORITY: [Section; 3] = [Section::Trending, Section::TopRated, Section::NewReleases];

/// Point-in-time view of one section
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub state: SectionState,
    /// Records currently on display, which may predate a refresh in flight
    pub records: Vec<ContentRecord>,
}

/// Read-only derived view over all sections, recomputed per call
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    sections: HashMap<Section, SectionView>,
}

impl FeedSnapshot {
    pub fn section(&self, section: Section) -> Option<&SectionView> {
        self.sections.get(&section)
    }

    /// The aggregate ready signal: every section has left `Loading`
    pub fn all_settled(&self) -> bool {
        self.sections.values().all(|view| view.state.is_settled())
    }
}

/// Composes the per-section controllers and the feedback coordinator
///
/// Sections are fetched in parallel and settle independently; the aggregate
/// view is derived on demand and never mutated in place.
pub struct FeedOrchestrator {
    controllers: HashMap<Section, Arc<SectionController>>,
    feedback: FeedbackCoordinator,
}

impl FeedOrchestrator {
    pub fn new(gateway: Arc<dyn CatalogGateway>, config: &Config) -> Self {
        let mut controllers = HashMap::new();
        for section in Section::ALL {
            controllers.insert(
                section,
                Arc::new(SectionController::new(
                    section,
                    Arc::clone(&gateway),
                    config.recommendation_count,
                )),
            );
        }

        let recommendations = Arc::clone(&controllers[&Section::Recommendations]);
        let feedback = FeedbackCoordinator::new(
            gateway,
            recommendations,
            Duration::from_millis(config.feedback_debounce_ms),
        );

        Self {
            controllers,
            feedback,
        }
    }

    /// Starts every section fetch concurrently and waits for all to settle
    ///
    /// Completion order is unconstrained and no section's failure prevents
    /// any other from completing; returning is the logical AND of every
    /// controller leaving `Loading`.
    pub async fn start_all(&self) {
        let mut tasks = Vec::new();
        for controller in self.controllers.values() {
            let controller = Arc::clone(controller);
            tasks.push(tokio::spawn(async move { controller.start().await }));
        }

        for task in tasks {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Section task join error");
            }
        }
        tracing::debug!("All sections settled");
    }

    /// Per-section controller, e.g. for a section-level reload affordance
    pub fn controller(&self, section: Section) -> Option<&Arc<SectionController>> {
        self.controllers.get(&section)
    }

    pub fn feedback(&self) -> &FeedbackCoordinator {
        &self.feedback
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let mut sections = HashMap::new();
        for (section, controller) in &self.controllers {
            sections.insert(
                *section,
                SectionView {
                    state: controller.state().await,
                    records: controller.records().await,
                },
            );
        }
        FeedSnapshot { sections }
    }

    /// Source of the primary carousel: the first non-empty loaded section in
    /// priority order, or empty when everything is empty or failed
    pub async fn primary_carousel(&self) -> Vec<ContentRecord> {
        for section in CAROUSEL_PRIORITY {
            if let Some(controller) = self.controllers.get(&section) {
                if let SectionState::Loaded(records) = controller.state().await {
                    if !records.is_empty() {
                        tracing::debug!(section = %section, "Primary carousel source selected");
                        return records;
                    }
                }
            }
        }
        Vec::new()
    }

    /// Re-starts every section currently `Failed`; a no-op when none are.
    /// Returns how many reloads were started.
    pub async fn reload_failed(&self) -> usize {
        let mut tasks = Vec::new();
        for controller in self.controllers.values() {
            if controller.is_failed().await {
                tracing::info!(section = %controller.section(), "Reloading failed section");
                let controller = Arc::clone(controller);
                tasks.push(tokio::spawn(async move { controller.start().await }));
            }
        }

        let reloaded = tasks.len();
        for task in tasks {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "Section reload join error");
            }
        }
        reloaded
    }
}
