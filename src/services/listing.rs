use std::collections::HashMap;

use super::error::{ServiceError, ServiceResult};

/// A venue or artist as it appears in listings and search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: u64,
}

/// Venues sharing a (city, state) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area<T> {
    pub city: String,
    pub state: String,
    pub venues: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<RecordSummary>,
}

impl From<Vec<RecordSummary>> for SearchResults {
    fn from(data: Vec<RecordSummary>) -> Self {
        Self {
            count: data.len(),
            data,
        }
    }
}

/// Group items by (city, state).
///
/// Areas appear in the order their first item was seen and items keep their
/// input order inside each area. Only pairs that actually occur produce an area.
pub fn group_by_area<T>(items: impl IntoIterator<Item = (String, String, T)>) -> Vec<Area<T>> {
    let mut index: HashMap<(String, String), usize> = HashMap::new();
    let mut areas: Vec<Area<T>> = Vec::new();

    for (city, state, item) in items {
        match index.get(&(city.clone(), state.clone())) {
            Some(&position) => areas[position].venues.push(item),
            None => {
                index.insert((city.clone(), state.clone()), areas.len());
                areas.push(Area {
                    city,
                    state,
                    venues: vec![item],
                });
            }
        }
    }

    areas
}

/// Keep the `(id, name)` pairs whose name contains `term`, ignoring case.
///
/// Case folding is Unicode-aware, so "élysée" finds "Café Élysée". SQLite's
/// `LIKE` only folds ASCII letters, so matching happens here instead.
pub fn filter_by_name(records: Vec<(i64, String)>, term: &str) -> Vec<(i64, String)> {
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|(_, name)| name.to_lowercase().contains(&needle))
        .collect()
}

pub fn encode_genres(genres: &[String]) -> String {
    serde_json::to_string(genres).unwrap_or_else(|_| "[]".to_string())
}

pub fn decode_genres(entity: &'static str, id: i64, raw: &str) -> ServiceResult<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|source| ServiceError::MalformedGenres { entity, id, source })
}
