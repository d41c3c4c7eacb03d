pub mod feedback;
pub mod orchestrator;
pub mod section;
pub mod validator;

pub use feedback::FeedbackCoordinator;
pub use orchestrator::{FeedOrchestrator, FeedSnapshot, SectionView};
pub use section::{Section, SectionController, SectionState};
