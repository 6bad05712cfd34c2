use serde::Deserialize;

use super::choices::{GENRES, STATES};
use super::{FormErrors, checkbox, link, many_of, one_of, optional, phone, required};
use crate::services::artist::{Artist, ArtistInput};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website: artist.website.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue.then(|| "y".to_string()),
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn seeking_venue(&self) -> bool {
        checkbox(self.seeking_venue.as_deref())
    }

    pub fn validate(&self) -> Result<ArtistInput, FormErrors> {
        let mut errors = FormErrors::default();

        let input = ArtistInput {
            name: required(&mut errors, "name", &self.name),
            city: required(&mut errors, "city", &self.city),
            state: one_of(&mut errors, "state", &self.state, STATES),
            phone: phone(&mut errors, "phone", &self.phone),
            genres: many_of(&mut errors, "genres", &self.genres, GENRES),
            image_link: link(&mut errors, "image_link", &self.image_link),
            facebook_link: link(&mut errors, "facebook_link", &self.facebook_link),
            website: link(&mut errors, "website", &self.website),
            seeking_venue: self.seeking_venue(),
            seeking_description: optional(&self.seeking_description),
        };

        errors.finish(input)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_edit_prefill_validates_unchanged() {
        let artist = Artist {
            id: 4,
            name: "Guns N Petals".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("326-123-5000".into()),
            genres: vec!["Rock n Roll".into()],
            image_link: None,
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            website: Some("https://www.gunsnpetalsband.com".into()),
            seeking_venue: true,
            seeking_description: Some("Looking for shows to perform at.".into()),
            created_at: Utc::now(),
        };

        let form = ArtistForm::from_artist(&artist);
        assert_eq!(form.image_link, "");

        let input = form.validate().unwrap();
        assert_eq!(input.name, artist.name);
        assert_eq!(input.image_link, None);
        assert_eq!(input.website, artist.website);
        assert!(input.seeking_venue);
    }

    #[test]
    fn test_bad_links_are_reported() {
        let form = ArtistForm {
            name: "Matt Quevedo".into(),
            city: "New York".into(),
            state: "NY".into(),
            genres: vec!["Jazz".into()],
            facebook_link: "facebook.com/mattquevedo".into(),
            website: "mailto:matt@example.com".into(),
            ..Default::default()
        };

        let errors = form.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["facebook_link", "website"]);
    }
}
