pub mod artists;
pub mod home;
pub mod shows;
pub mod venues;

use serde::Deserialize;

/// Body of the venue and artist search boxes.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}
