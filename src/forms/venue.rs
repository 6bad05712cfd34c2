use serde::Deserialize;

use super::choices::{GENRES, STATES};
use super::{FormErrors, checkbox, link, many_of, one_of, optional, phone, required};
use crate::services::venue::{Venue, VenueInput};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
}

impl VenueForm {
    /// Prefill the edit form with the stored record.
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website: venue.website.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent.then(|| "y".to_string()),
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn seeking_talent(&self) -> bool {
        checkbox(self.seeking_talent.as_deref())
    }

    pub fn validate(&self) -> Result<VenueInput, FormErrors> {
        let mut errors = FormErrors::default();

        let input = VenueInput {
            name: required(&mut errors, "name", &self.name),
            city: required(&mut errors, "city", &self.city),
            state: one_of(&mut errors, "state", &self.state, STATES),
            address: required(&mut errors, "address", &self.address),
            phone: phone(&mut errors, "phone", &self.phone),
            genres: many_of(&mut errors, "genres", &self.genres, GENRES),
            image_link: link(&mut errors, "image_link", &self.image_link),
            facebook_link: link(&mut errors, "facebook_link", &self.facebook_link),
            website: link(&mut errors, "website", &self.website),
            seeking_talent: self.seeking_talent(),
            seeking_description: optional(&self.seeking_description),
        };

        errors.finish(input)
    }
}
