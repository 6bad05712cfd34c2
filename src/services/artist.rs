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
    RecordSummary, SearchResults, decode_genres, encode_genres, filter_by_name,
};
use crate::services::schedule::{self, Schedule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<entities::artist::Model> for Artist {
    type Error = ServiceError;

    fn try_from(model: entities::artist::Model) -> Result<Self, Self::Error> {
        let genres = decode_genres("Artist", model.id, &model.genres)?;
        Ok(Artist {
            id: model.id,
            name: model.name,
            city: model.city,
            state: model.state,
            phone: model.phone,
            genres,
            image_link: model.image_link,
            facebook_link: model.facebook_link,
            website: model.website,
            seeking_venue: model.seeking_venue,
            seeking_description: model.seeking_description,
            created_at: model.created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistInput {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistInput {
    fn apply(self, model: &mut entities::artist::ActiveModel) {
        model.name = Set(self.name);
        model.city = Set(self.city);
        model.state = Set(self.state);
        model.phone = Set(self.phone);
        model.genres = Set(encode_genres(&self.genres));
        model.image_link = Set(self.image_link);
        model.facebook_link = Set(self.facebook_link);
        model.website = Set(self.website);
        model.seeking_venue = Set(self.seeking_venue);
        model.seeking_description = Set(self.seeking_description);
    }
}

#[derive(Debug, Clone)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub schedule: Schedule,
}

pub struct ArtistService {
    db: Arc<Database>,
}

impl ArtistService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Every artist as (id, name), in insertion order.
    pub async fn list(&self) -> ServiceResult<Vec<(i64, String)>> {
        let artists = entities::artist::Entity::find()
            .select_only()
            .column(entities::artist::Column::Id)
            .column(entities::artist::Column::Name)
            .order_by_asc(entities::artist::Column::Id)
            .into_tuple::<(i64, String)>()
            .all(&self.db.conn)
            .await?;
        Ok(artists)
    }

    pub async fn search(&self, term: &str, now: DateTime<Utc>) -> ServiceResult<SearchResults> {
        let artists = entities::artist::Entity::find()
            .select_only()
            .column(entities::artist::Column::Id)
            .column(entities::artist::Column::Name)
            .order_by_asc(entities::artist::Column::Id)
            .into_tuple::<(i64, String)>()
            .all(&self.db.conn)
            .await?;
        let artists = filter_by_name(artists, term);

        let ids: Vec<i64> = artists.iter().map(|(id, _)| *id).collect();
        let counts = schedule::upcoming_counts(
            &self.db.conn,
            entities::show::Column::ArtistId,
            Some(&ids),
            now,
        )
        .await?;

        tracing::debug!("Artist search '{}' matched {} artists", term, artists.len());

        Ok(SearchResults::from(
            artists
                .into_iter()
                .map(|(id, name)| RecordSummary {
                    id,
                    name,
                    num_upcoming_shows: counts.get(&id).copied().unwrap_or(0),
                })
                .collect::<Vec<_>>(),
        ))
    }

    pub async fn get(&self, artist_id: i64) -> ServiceResult<Artist> {
        entities::artist::Entity::find_by_id(artist_id)
            .one(&self.db.conn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Artist", artist_id))?
            .try_into()
    }

    pub async fn detail(&self, artist_id: i64, now: DateTime<Utc>) -> ServiceResult<ArtistDetail> {
        let artist = self.get(artist_id).await?;
        let schedule = schedule::artist_schedule(&self.db.conn, artist_id, now).await?;
        Ok(ArtistDetail { artist, schedule })
    }

    pub async fn recent(&self, limit: u64) -> ServiceResult<Vec<Artist>> {
        entities::artist::Entity::find()
            .order_by_desc(entities::artist::Column::CreatedAt)
            .order_by_desc(entities::artist::Column::Id)
            .limit(limit)
            .all(&self.db.conn)
            .await?
            .into_iter()
            .map(Artist::try_from)
            .collect()
    }

    pub async fn create(&self, input: ArtistInput) -> ServiceResult<Artist> {
        let txn = self.db.conn.begin().await?;

        let mut artist = <entities::artist::ActiveModel as Default>::default();
        input.apply(&mut artist);
        let model = artist.insert(&txn).await?;

        txn.commit().await?;

        tracing::info!("Artist created: '{}' (ID: {})", model.name, model.id);
        model.try_into()
    }

    pub async fn update(&self, artist_id: i64, input: ArtistInput) -> ServiceResult<Artist> {
        let txn = self.db.conn.begin().await?;

        let existing = entities::artist::Entity::find_by_id(artist_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Artist", artist_id))?;

        let mut artist: entities::artist::ActiveModel = existing.into();
        input.apply(&mut artist);
        let model = artist.update(&txn).await?;

        txn.commit().await?;

        tracing::info!("Artist updated: '{}' (ID: {})", model.name, model.id);
        model.try_into()
    }

    /// Delete an artist and all of their shows. Returns the deleted artist's name.
    pub async fn delete(&self, artist_id: i64) -> ServiceResult<String> {
        let txn = self.db.conn.begin().await?;

        let existing = entities::artist::Entity::find_by_id(artist_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Artist", artist_id))?;

        let shows = entities::show::Entity::delete_many()
            .filter(entities::show::Column::ArtistId.eq(artist_id))
            .exec(&txn)
            .await?;
        entities::artist::Entity::delete_by_id(artist_id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        tracing::info!(
            "Artist deleted: '{}' (ID: {}), removed {} shows",
            existing.name,
            artist_id,
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

    fn input(name: &str) -> ArtistInput {
        ArtistInput {
            name: name.into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: Some("326-123-5000".into()),
            genres: vec!["Rock n Roll".into()],
            image_link: Some("https://images.example.com/guns.jpg".into()),
            facebook_link: Some("https://www.facebook.com/GunsNPetals".into()),
            website: None,
            seeking_venue: true,
            seeking_description: Some("Looking for shows in the San Francisco Bay Area".into()),
        }
    }

    #[tokio::test]
    async fn test_create_update_roundtrip() {
        let db = test_db().await;
        let service = ArtistService::new(db);

        let created = service.create(input("Guns N Petals")).await.unwrap();
        assert_eq!(service.get(created.id).await.unwrap(), created);

        let mut changes = input("Guns N Roses");
        changes.seeking_venue = false;
        changes.seeking_description = None;
        let updated = service.update(created.id, changes).await.unwrap();

        assert_eq!(updated.name, "Guns N Roses");
        assert!(!updated.seeking_venue);
        assert_eq!(updated.seeking_description, None);
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_list_in_insertion_order() {
        let db = test_db().await;
        let first = insert_artist(&db, "The Wild Sax Band").await;
        let second = insert_artist(&db, "Matt Quevedo").await;

        let service = ArtistService::new(db);
        let artists = service.list().await.unwrap();

        assert_eq!(
            artists,
            vec![
                (first.id, "The Wild Sax Band".to_string()),
                (second.id, "Matt Quevedo".to_string())
            ]
        );
    }

    #[tokio::test]
    async fn test_search_counts_upcoming_shows() {
        let db = test_db().await;
        let now = fixed_now();
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let marty = insert_artist(&db, "Marty Mcfly").await;
        insert_artist(&db, "Guns N Petals").await;
        insert_show(&db, venue.id, marty.id, now + Duration::days(1)).await;
        insert_show(&db, venue.id, marty.id, now - Duration::days(1)).await;

        let service = ArtistService::new(db);
        let results = service.search("ART", now).await.unwrap();

        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].id, marty.id);
        assert_eq!(results.data[0].num_upcoming_shows, 1);

        let everyone = service.search("", now).await.unwrap();
        assert_eq!(everyone.count, 2);
    }

    #[tokio::test]
    async fn test_search_folds_accented_letters() {
        let db = test_db().await;
        let beyonce = insert_artist(&db, "Beyoncé Ørsted").await;
        insert_artist(&db, "Guns N Petals").await;

        let service = ArtistService::new(db);
        let results = service.search("BEYONCÉ ØR", fixed_now()).await.unwrap();

        assert_eq!(results.count, 1);
        assert_eq!(results.data[0].id, beyonce.id);
        assert_eq!(results.data[0].name, "Beyoncé Ørsted");
    }

    #[tokio::test]
    async fn test_detail_splits_shows() {
        let db = test_db().await;
        let now = fixed_now();
        let venue = insert_venue(&db, "Park Square Live", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "The Wild Sax Band").await;
        insert_show(&db, venue.id, artist.id, now - Duration::days(2)).await;
        insert_show(&db, venue.id, artist.id, now + Duration::days(2)).await;
        insert_show(&db, venue.id, artist.id, now + Duration::days(4)).await;

        let service = ArtistService::new(db);
        let detail = service.detail(artist.id, now).await.unwrap();

        assert_eq!(detail.artist.name, "The Wild Sax Band");
        assert_eq!(detail.schedule.past_shows_count(), 1);
        assert_eq!(detail.schedule.upcoming_shows_count(), 2);
        assert_eq!(
            detail.schedule.upcoming_shows[0].counterpart_name,
            "Park Square Live"
        );
    }

    #[tokio::test]
    async fn test_delete_removes_shows() {
        let db = test_db().await;
        let now = fixed_now();
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        let other = insert_artist(&db, "Matt Quevedo").await;
        insert_show(&db, venue.id, artist.id, now + Duration::days(1)).await;
        insert_show(&db, venue.id, other.id, now + Duration::days(1)).await;

        let service = ArtistService::new(db.clone());
        assert_eq!(service.delete(artist.id).await.unwrap(), "Guns N Petals");

        let remaining = entities::show::Entity::find()
            .filter(entities::show::Column::ArtistId.eq(artist.id))
            .count(&db.conn)
            .await
            .unwrap();
        assert_eq!(remaining, 0);
        assert_eq!(
            entities::show::Entity::find().count(&db.conn).await.unwrap(),
            1
        );

        assert!(matches!(
            service.delete(artist.id).await,
            Err(ServiceError::NotFound { .. })
        ));
    }
}
