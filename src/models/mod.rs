pub mod content;
pub mod feedback;

pub use content::{ContentRecord, RecommendationRecord};
pub use feedback::{FeedbackEvent, InteractionKind};
