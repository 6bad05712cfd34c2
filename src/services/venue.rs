use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

use crate::database::Database;
use crate::entities;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::listing::{
    Area, RecordSummary, SearchResults, decode_genres, encode_genres, filter_by_name,
    group_by_area,
};
use crate::services::schedule::{self, Schedule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<entities::venue::Model> for Venue {
    type Error = ServiceError;

    fn try_from(model: entities::venue::Model) -> Result<Self, Self::Error> {
        let genres = decode_genres("Venue", model.id, &model.genres)?;
        Ok(Venue {
            id: model.id,
            name: model.name,
            address: model.address,
            city: model.city,
            state: model.state,
            phone: model.phone,
            genres,
            image_link: model.image_link,
            facebook_link: model.facebook_link,
            website: model.website,
            seeking_talent: model.seeking_talent,
            seeking_description: model.seeking_description,
            created_at: model.created_at,
        })
    }
}

/// Validated venue fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueInput {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueInput {
    fn apply(self, model: &mut entities::venue::ActiveModel) {
        model.name = Set(self.name);
        model.address = Set(self.address);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.phone = Set(self.phone);
        model.genres = Set(encode_genres(&self.genres));
        model.image_link = Set(self.image_link);
        model.facebook_link = Set(self.facebook_link);
        model.website = Set(self.website);
        model.seeking_talent = Set(self.seeking_talent);
        model.seeking_description = Set(self.seeking_description);
    }
}

#[derive(Debug, Clone)]
pub struct VenueDetail {
    pub venue: Venue,
    pub schedule: Schedule,
}

pub struct VenueService {
    db: Arc<Database>,
}

impl VenueService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All venues grouped by (city, state), with their upcoming show counts.
    pub async fn list_areas(&self, now: DateTime<Utc>) -> ServiceResult<Vec<Area<RecordSummary>>> {
        let venues = entities::venue::Entity::find()
            .order_by_asc(entities::venue::Column::Id)
            .all(&self.db.conn)
            .await?;

        let counts = schedule::upcoming_counts(
            &self.db.conn,
            entities::show::Column::VenueId,
            None,
            now,
        )
        .await?;

        Ok(group_by_area(venues.into_iter().map(|venue| {
            let summary = RecordSummary {
                id: venue.id,
                num_upcoming_shows: counts.get(&venue.id).copied().unwrap_or(0),
                name: venue.name,
            };
            (venue.city, venue.state, summary)
        })))
    }

    /// Case-insensitive substring search on the venue name.
    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> ServiceResult<SearchResults> {
        let venues = entities::venue::Entity::find()
            .select_only()
            .column(entities::venue::Column::Id)
            .column(entities::venue::Column::Name)
            .order_by_asc(entities::venue::Column::Id)
            .into_tuple::<(i64, String)>()
            .all(&self.db.conn)
            .await?;
        let venues = filter_by_name(venues, term);

        let ids: Vec<i64> = venues.iter().map(|(id, _)| *id).collect();
        let counts = schedule::upcoming_counts(
            &self.db.conn,
            entities::show::Column::VenueId,
            Some(&ids),
            now,
        )
        .await?;

        tracing::debug!("Venue search '{}' matched {} venues", term, venues.len());

        Ok(SearchResults::from(
            venues
                .into_iter()
                .map(|(id, name)| RecordSummary {
                    id,
                    name,
                    num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
                })
                .collect::<Vec<_>>(),
        ))
    }

    pub async fn get(&self, venue_id: i64) -> ServiceResult<Venue> {
        entities::venue::Entity::find_by_id(venue_id)
            .one(&self.db.conn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue", venue_id))?
            .try_into()
    }

    /// The venue with its shows split around `now`.
    pub async fn detail(&self, venue_id: i64, now: DateTime<Utc>) -> ServiceResult<VenueDetail> {
        let venue = self.get(venue_id).await?;
        let schedule = schedule::venue_schedule(&self.db.conn, venue_id, now).await?;
        Ok(VenueDetail { venue, schedule })
    }

    /// Most recently listed venues, newest first.
    pub async fn recent(&self, limit: u64) -> ServiceResult<Vec<Venue>> {
        entities::venue::Entity::find()
            .order_by_desc(entities::venue::Column::CreatedAt)
            .order_by_desc(entities::venue::Column::Id)
            .limit(limit)
            .all(&self.db.conn)
            .await?
            .into_iter()
            .map(Venue::try_from)
            .collect()
    }

    pub async fn create(&self, input: VenueInput) -> ServiceResult<Venue> {
        let txn = self.db.conn.begin().await?;

        let mut venue = <entities::venue::ActiveModel as Default>::default();
        input.apply(&mut venue);
        let model = venue.insert(&txn).await?;

        txn.commit().await?;

        tracing::info!("Venue created: '{}' (ID: {})", model.name, model.id);
        model.try_into()
    }

    pub async fn update(&self, venue_id: i64, input: VenueInput) -> ServiceResult<Venue> {
        let txn = self.db.conn.begin().await?;

        let existing = entities::venue::Entity::find_by_id(venue_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue", venue_id))?;

        let mut venue: entities::venue::ActiveModel = existing.into();
        input.apply(&mut venue);
        let model = venue.update(&txn).await?;

        txn.commit().await?;

        tracing::info!("Venue updated: '{}' (ID: {})", model.name, model.id);
        model.try_into()
    }

    /// Delete a venue together with every show booked there. Returns the deleted venue's name.
    pub async fn delete(&self, venue_id: i64) -> ServiceResult<String> {
        let txn = self.db.conn.begin().await?;

        let existing = entities::venue::Entity::find_by_id(venue_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue", venue_id))?;

        let shows = entities::show::Entity::delete_many()
            .filter(entities::show::Column::VenueId.eq(venue_id))
            .exec(&txn)
            .await?;
        entities::venue::Entity::delete_by_id(venue_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Venue deleted: '{}' (ID: {}), removed {} shows",
            existing.name,
            venue_id,
            shows.rows_affected
        );
        Ok(existing.name)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::test_utils::{fixed_now, insert_artist, insert_show, insert_venue, test_db};

    fn input(name: &str, city: &str, state: &str) -> VenueInput {
        VenueInput {
            name: name.into(),
            address: "335 Delancey Street".into(),
            city: city.into(),
            state: state.into(),
            phone: Some("914-003-1132".into()),
            genres: vec!["Jazz".into(), "Reggae".into()],
            image_link: None,
            facebook_link: None,
            website: Some("https://www.themusicalhop.com".into()),
            seeking_talent: true,
            seeking_description: Some("We are on the lookout for a local artist".into()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let db = test_db().await;
        let service = VenueService::new(db);

        let created = service
            .create(input("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();
        let fetched = service.get(created.id).await.unwrap();

        assert_eq!(fetched, created);
        assert!(fetched.created_at > fixed_now());
        assert_eq!(fetched.genres, vec!["Jazz", "Reggae"]);
        assert!(fetched.seeking_talent);
    }

    #[tokio::test]
    async fn test_get_missing_venue() {
        let db = test_db().await;
        let service = VenueService::new(db);

        let err = service.get(404).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::NotFound {
                entity: "Venue",
                id: 404
            }
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_created_at() {
        let db = test_db().await;
        let service = VenueService::new(db);
        let created = service
            .create(input("The Musical Hop", "San Francisco", "CA"))
            .await
            .unwrap();

        let mut changes = input("The Dueling Pianos Bar", "New York", "NY");
        changes.genres = vec!["Classical".into()];
        let updated = service.update(created.id, changes).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "The Dueling Pianos Bar");
        assert_eq!(updated.city, "New York");
        assert_eq!(updated.genres, vec!["Classical"]);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_update_missing_venue() {
        let db = test_db().await;
        let service = VenueService::new(db);

        let err = service
            .update(99, input("Nowhere", "Austin", "TX"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound { id: 99, .. }));
    }

    #[tokio::test]
    async fn test_list_areas_counts_upcoming_shows() {
        let db = test_db().await;
        let now = fixed_now();
        let a = insert_venue(&db, "Venue A", "Austin", "TX").await;
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let b = insert_venue(&db, "Venue B", "Austin", "TX").await;
        let artist = insert_artist(&db, "Guns N Petals").await;

        insert_show(&db, a.id, artist.id, now + Duration::days(1)).await;
        insert_show(&db, a.id, artist.id, now + Duration::days(3)).await;
        insert_show(&db, a.id, artist.id, now - Duration::days(3)).await;

        let service = VenueService::new(db);
        let areas = service.list_areas(now).await.unwrap();

        assert_eq!(areas.len(), 2);
        assert_eq!((areas[0].city.as_str(), areas[0].state.as_str()), ("Austin", "TX"));
        assert_eq!(areas[1].city, "San Francisco");

        let austin: Vec<(i64, u64)> = areas[0]
            .venues
            .iter()
            .map(|v| (v.id, v.num_upcoming_shows))
            .collect();
        assert_eq!(austin, vec![(a.id, 2), (b.id, 0)]);
        assert_eq!(areas[1].venues[0].id, hop.id);

        let appearances = areas
            .iter()
            .flat_map(|area| area.venues.iter())
            .filter(|v| v.id == a.id)
            .count();
        assert_eq!(appearances, 1);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let db = test_db().await;
        let now = fixed_now();
        let marty = insert_venue(&db, "Marty's Bar", "Austin", "TX").await;
        insert_venue(&db, "The Dueling Pianists", "New York", "NY").await;
        insert_venue(&db, "ART HOUSE", "Austin", "TX").await;
        let artist = insert_artist(&db, "Matt Quevedo").await;
        insert_show(&db, marty.id, artist.id, now + Duration::days(1)).await;

        let service = VenueService::new(db);
        let results = service.search("art", now).await.unwrap();

        assert_eq!(results.count, 2);
        let names: Vec<&str> = results.data.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Marty's Bar", "ART HOUSE"]);
        assert_eq!(results.data[0].num_upcoming_shows, 1);
        assert_eq!(results.data[1].num_upcoming_shows, 0);
    }

    #[tokio::test]
    async fn test_search_folds_accented_letters() {
        let db = test_db().await;
        let cafe = insert_venue(&db, "Café Élysée", "New York", "NY").await;
        insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;

        let service = VenueService::new(db);
        for term in ["élysée", "ÉLYSÉE", "Élysée", "CAFÉ"] {
            let results = service.search(term, fixed_now()).await.unwrap();
            assert_eq!(results.count, 1, "search term {term:?}");
            assert_eq!(results.data[0].id, cafe.id);
        }
    }

    #[tokio::test]
    async fn test_search_treats_wildcards_literally() {
        let db = test_db().await;
        insert_venue(&db, "100% Live", "Austin", "TX").await;
        insert_venue(&db, "1000 Lights", "Austin", "TX").await;

        let service = VenueService::new(db);
        let results = service.search("100%", fixed_now()).await.unwrap();

        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].name, "100% Live");
    }

    #[tokio::test]
    async fn test_delete_removes_shows() {
        let db = test_db().await;
        let now = fixed_now();
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let other = insert_venue(&db, "Park Square Live", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, venue.id, artist.id, now + Duration::days(1)).await;
        insert_show(&db, venue.id, artist.id, now - Duration::days(1)).await;
        insert_show(&db, other.id, artist.id, now + Duration::days(1)).await;

        let service = VenueService::new(db.clone());
        let name = service.delete(venue.id).await.unwrap();
        assert_eq!(name, "The Musical Hop");

        let remaining = entities::show::Entity::find()
            .filter(entities::show::Column::VenueId.eq(venue.id))
            .count(&db.conn)
            .await
            .unwrap();
        assert_eq!(remaining, 0);

        let total = entities::show::Entity::find().count(&db.conn).await.unwrap();
        assert_eq!(total, 1);
        assert!(matches!(
            service.get(venue.id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_recent_is_newest_first() {
        let db = test_db().await;
        let first = insert_venue(&db, "First", "Austin", "TX").await;
        let second = insert_venue(&db, "Second", "Austin", "TX").await;
        let third = insert_venue(&db, "Third", "Austin", "TX").await;

        let service = VenueService::new(db);
        let recent = service.recent(2).await.unwrap();

        let ids: Vec<i64> = recent.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![third.id, second.id]);
        assert!(!ids.contains(&first.id));
    }
}
