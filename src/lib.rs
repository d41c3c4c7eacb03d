pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{FeedError, FeedResult};
pub use gateway::{fetch_movie, CatalogGateway, HttpGateway};
pub use models::{ContentRecord, FeedbackEvent, InteractionKind, RecommendationRecord};
pub use services::{
    FeedOrchestrator, FeedSnapshot, FeedbackCoordinator, Section, SectionController, SectionState,
    SectionView,
};
