use chrono::Datelike;
use serde::{Deserialize, Serialize};

/// Default overview text for records missing a description
pub const DEFAULT_OVERVIEW: &str = "No description available";

/// Poster path used when the catalog has no artwork for a record
pub const PLACEHOLDER_POSTER: &str = "/static/img/poster-placeholder.png";

/// Canonical in-memory representation of a catalog item
///
/// Every record that leaves the validator has a non-zero `id` and a non-empty
/// `title`; all other fields carry documented defaults instead of failing
/// when the remote payload omits or mistypes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentRecord {
    /// Unique catalog identifier
    pub id: i64,
    pub title: String,
    pub overview: String,
    pub year: i32,
    pub genres: Vec<String>,
    pub average_rating: f64,
    pub runtime_minutes: Option<u32>,
    pub poster_url: String,
    pub backdrop_url: String,
    /// Comma-separated principal cast, as the catalog stores it
    pub cast: Option<String>,
    pub director: Option<String>,
    pub popularity: Option<f64>,
    pub vote_count: Option<i64>,
    /// External catalog reference (IMDB-style identifier)
    pub external_id: Option<String>,
}

impl ContentRecord {
    /// Creates a record with every optional field at its documented default
    pub fn with_defaults(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            overview: DEFAULT_OVERVIEW.to_string(),
            year: current_year(),
            genres: Vec::new(),
            average_rating: 0.0,
            runtime_minutes: None,
            poster_url: PLACEHOLDER_POSTER.to_string(),
            backdrop_url: String::new(),
            cast: None,
            director: None,
            popularity: None,
            vote_count: None,
            external_id: None,
        }
    }
}

/// Current calendar year, the default for records missing a release year
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Splits the catalog's comma-separated genre storage format into a list
pub(crate) fn split_genres(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

// ============================================================================
// Recommendation API Types
// ============================================================================

/// One entry of the recommendation service's scored response
///
/// The scoring endpoint returns a slimmer shape than the catalog endpoints:
/// `movie_id` + `score` plus whatever enrichment fields the service attached.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RecommendationRecord {
    pub movie_id: i64,
    pub score: f64,
    pub title: String,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub poster_url: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

impl From<RecommendationRecord> for ContentRecord {
    fn from(rec: RecommendationRecord) -> Self {
        let mut record = ContentRecord::with_defaults(rec.movie_id, rec.title);

        if let Some(overview) = rec.overview.filter(|o| !o.is_empty()) {
            record.overview = overview;
        }
        if let Some(year) = rec.year {
            record.year = year;
        }
        if let Some(genres) = rec.genres.as_deref() {
            record.genres = split_genres(genres);
        }
        if let Some(poster) = rec.poster_url.filter(|p| !p.is_empty()) {
            record.poster_url = poster;
        }
        if let Some(vote_average) = rec.vote_average {
            record.average_rating = vote_average;
        }

        record
    }
}
