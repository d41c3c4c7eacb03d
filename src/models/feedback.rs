use serde::{Deserialize, Serialize};

/// Kind of feedback a user can emit about a catalog item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    View,
    Like,
    Dislike,
    Share,
    Rate,
    WatchlistAdd,
    WatchlistRemove,
}

impl InteractionKind {
    /// Wire name accepted by the interactions endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Like => "like",
            InteractionKind::Dislike => "dislike",
            InteractionKind::Share => "share",
            InteractionKind::Rate => "rate",
            InteractionKind::WatchlistAdd => "watchlist_add",
            InteractionKind::WatchlistRemove => "watchlist_remove",
        }
    }

    /// Whether this kind is strong enough preference evidence to warrant
    /// recomputing recommendations
    pub fn is_significant(&self) -> bool {
        matches!(
            self,
            InteractionKind::Rate
                | InteractionKind::Like
                | InteractionKind::Dislike
                | InteractionKind::WatchlistAdd
        )
    }
}

/// A single user feedback event, constructed, submitted, and discarded
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct FeedbackEvent {
    pub content_id: i64,
    pub kind: InteractionKind,
    /// 1..=5, present only when `kind` is `Rate`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
}

impl FeedbackEvent {
    pub fn rating(content_id: i64, rating: u8) -> Self {
        Self {
            content_id,
            kind: InteractionKind::Rate,
            rating: Some(rating),
        }
    }

    pub fn interaction(content_id: i64, kind: InteractionKind) -> Self {
        Self {
            content_id,
            kind,
            rating: None,
        }
    }
}
