/// Payload validation
///
/// Turns untrusted remote JSON into canonical `ContentRecord`s. Records
/// missing a usable `id` or `title` are rejected; every other field coerces
/// to its declared type or falls back to a documented default. Nothing in
/// here returns an error or panics — bad input only shrinks the output.
use serde_json::Value;

use crate::models::content::{self, ContentRecord};

/// Validates a single raw catalog object
///
/// Returns `None` when `raw` is not an object, or when `id`/`title` are
/// missing, empty, or of an unusable type.
pub fn validate_one(raw: &Value) -> Option<ContentRecord> {
    let obj = raw.as_object()?;

    let id = id_field(obj.get("id"))?;
    let title = obj
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())?
        .to_string();

    let mut record = ContentRecord::with_defaults(id, title);

    if let Some(overview) = string_field(obj.get("overview")) {
        record.overview = overview;
    }
    if let Some(year) = int_field(obj.get("year")).and_then(|y| i32::try_from(y).ok()) {
        record.year = year;
    }
    record.genres = genre_field(obj.get("genres"));
    if let Some(rating) = float_field(obj.get("vote_average"))
        .or_else(|| float_field(obj.get("average_rating")))
    {
        record.average_rating = rating;
    }
    record.runtime_minutes = int_field(obj.get("runtime"))
        .or_else(|| int_field(obj.get("runtime_minutes")))
        .and_then(|r| u32::try_from(r).ok());
    if let Some(poster) = string_field(obj.get("poster_url")) {
        record.poster_url = poster;
    }
    if let Some(backdrop) = string_field(obj.get("backdrop_url")) {
        record.backdrop_url = backdrop;
    }
    record.cast = string_field(obj.get("cast")).or_else(|| string_field(obj.get("actors")));
    record.director = string_field(obj.get("director"));
    record.popularity = float_field(obj.get("popularity"));
    record.vote_count = int_field(obj.get("vote_count"));
    record.external_id =
        string_field(obj.get("imdb_id")).or_else(|| string_field(obj.get("external_id")));

    Some(record)
}

/// Validates an arbitrary raw payload as a content list
///
/// Non-array input yields an empty list with a diagnostic; array input maps
/// each element through `validate_one`, keeping accepted records in input
/// order. A partially malformed batch never fails as a whole.
pub fn validate_many(raw: &Value) -> Vec<ContentRecord> {
    match raw.as_array() {
        Some(items) => validate_items(items),
        None => {
            tracing::warn!(kind = value_kind(raw), "Expected a content array, got non-array payload");
            Vec::new()
        }
    }
}

/// Slice-level worker used once the gateway has normalized the list shape
pub fn validate_items(items: &[Value]) -> Vec<ContentRecord> {
    let records: Vec<ContentRecord> = items.iter().filter_map(validate_one).collect();

    if records.len() < items.len() {
        tracing::debug!(
            kept = records.len(),
            dropped = items.len() - records.len(),
            "Dropped records failing validation"
        );
    }

    records
}

/// Required identifier: a non-zero integer, or a string holding one
fn id_field(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    let id = match value {
        Value::Number(_) => int_value(value)?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    (id != 0).then_some(id)
}

fn string_field(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn int_field(value: Option<&Value>) -> Option<i64> {
    value.and_then(int_value)
}

/// Integer coercion accepting whole-valued floats, which JSON round-trips
/// through other tooling often produce
fn int_value(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    (f.fract() == 0.0 && f.is_finite()).then_some(f as i64)
}

fn float_field(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64)
}

/// Genres arrive either as a JSON array of strings or as the catalog's
/// comma-separated storage format
fn genre_field(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .filter(|g| !g.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::String(s)) => content::split_genres(s),
        _ => Vec::new(),
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
