use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::database::Database;
use crate::entities;
use crate::services::error::{ServiceError, ServiceResult};
use crate::services::schedule::TimeWindow;

/// A row on the shows page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowListing {
    pub show_id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl ShowListing {
    pub fn window(&self, now: DateTime<Utc>) -> TimeWindow {
        TimeWindow::of(self.start_time, now)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowInput {
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

pub struct ShowService {
    db: Arc<Database>,
}

impl ShowService {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// All shows, earliest first.
    pub async fn list(&self) -> ServiceResult<Vec<ShowListing>> {
        let rows = entities::show::Entity::find()
            .order_by_asc(entities::show::Column::StartTime)
            .order_by_asc(entities::show::Column::Id)
            .find_also_related(entities::artist::Entity)
            .all(&self.db.conn)
            .await?;

        let mut venue_ids: Vec<i64> = rows.iter().map(|(show, _)| show.venue_id).collect();
        venue_ids.sort_unstable();
        venue_ids.dedup();

        let venue_names: HashMap<i64, String> = if venue_ids.is_empty() {
            HashMap::new()
        } else {
            entities::venue::Entity::find()
                .filter(entities::venue::Column::Id.is_in(venue_ids))
                .all(&self.db.conn)
                .await?
                .into_iter()
                .map(|venue| (venue.id, venue.name))
                .collect()
        };

        Ok(rows
            .into_iter()
            .filter_map(|(show, artist)| {
                let Some(artist) = artist else {
                    tracing::warn!("Show {} references missing artist {}", show.id, show.artist_id);
                    return None;
                };
                let Some(venue_name) = venue_names.get(&show.venue_id) else {
                    tracing::warn!("Show {} references missing venue {}", show.id, show.venue_id);
                    return None;
                };
                Some(ShowListing {
                    show_id: show.id,
                    venue_id: show.venue_id,
                    venue_name: venue_name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name,
                    artist_image_link: artist.image_link,
                    start_time: show.start_time,
                })
            })
            .collect())
    }

    /// Record a show. Both the venue and the artist must exist.
    pub async fn create(&self, input: ShowInput) -> ServiceResult<entities::show::Model> {
        let txn = self.db.conn.begin().await?;

        entities::venue::Entity::find_by_id(input.venue_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Venue", input.venue_id))?;
        entities::artist::Entity::find_by_id(input.artist_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Artist", input.artist_id))?;

        let show = entities::show::ActiveModel {
            venue_id: Set(input.venue_id),
            artist_id: Set(input.artist_id),
            start_time: Set(input.start_time),
            ..Default::default()
        };
        let model = show.insert(&txn).await?;

        txn.commit().await?;

        tracing::info!(
            "Show created (ID: {}): artist {} at venue {} on {}",
            model.id,
            model.artist_id,
            model.venue_id,
            model.start_time
        );
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use sea_orm::PaginatorTrait;

    use super::*;
    use crate::test_utils::{fixed_now, insert_artist, insert_show, insert_venue, test_db};

    #[tokio::test]
    async fn test_list_orders_by_start_time() {
        let db = test_db().await;
        let now = fixed_now();
        let hop = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let park = insert_venue(&db, "Park Square Live", "San Francisco", "CA").await;
        let guns = insert_artist(&db, "Guns N Petals").await;
        let sax = insert_artist(&db, "The Wild Sax Band").await;

        insert_show(&db, park.id, sax.id, now + Duration::days(3)).await;
        insert_show(&db, hop.id, guns.id, now - Duration::days(3)).await;
        insert_show(&db, hop.id, sax.id, now + Duration::days(1)).await;

        let service = ShowService::new(db);
        let shows = service.list().await.unwrap();

        let rows: Vec<(&str, &str)> = shows
            .iter()
            .map(|s| (s.venue_name.as_str(), s.artist_name.as_str()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("The Musical Hop", "Guns N Petals"),
                ("The Musical Hop", "The Wild Sax Band"),
                ("Park Square Live", "The Wild Sax Band"),
            ]
        );
        assert_eq!(shows[0].window(now), TimeWindow::Past);
        assert_eq!(shows[1].window(now), TimeWindow::Upcoming);
    }

    #[tokio::test]
    async fn test_list_empty() {
        let db = test_db().await;
        let service = ShowService::new(db);
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_existing_parties() {
        let db = test_db().await;
        let now = fixed_now();
        let venue = insert_venue(&db, "The Musical Hop", "San Francisco", "CA").await;
        let artist = insert_artist(&db, "Guns N Petals").await;
        let service = ShowService::new(db.clone());

        let created = service
            .create(ShowInput {
                venue_id: venue.id,
                artist_id: artist.id,
                start_time: now + Duration::days(7),
            })
            .await
            .unwrap();
        assert_eq!(created.start_time, now + Duration::days(7));

        let missing_artist = service
            .create(ShowInput {
                venue_id: venue.id,
                artist_id: artist.id + 100,
                start_time: now,
            })
            .await;
        assert!(matches!(
            missing_artist,
            Err(ServiceError::NotFound { entity: "Artist", .. })
        ));

        let missing_venue = service
            .create(ShowInput {
                venue_id: venue.id + 100,
                artist_id: artist.id,
                start_time: now,
            })
            .await;
        assert!(matches!(
            missing_venue,
            Err(ServiceError::NotFound { entity: "Venue", .. })
        ));

        assert_eq!(
            entities::show::Entity::find().count(&db.conn).await.unwrap(),
            1
        );
    }
}
