use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

use crate::entities;

/// Which side of the request-time "now" a show falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    /// start_time <= now
    Past,
    /// start_time > now
    Upcoming,
}

impl TimeWindow {
    pub fn of(start_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if start_time > now {
            TimeWindow::Upcoming
        } else {
            TimeWindow::Past
        }
    }

    pub fn condition(self, now: DateTime<Utc>) -> Condition {
        let column = entities::show::Column::StartTime;
        match self {
            TimeWindow::Past => Condition::all().add(column.lte(now)),
            TimeWindow::Upcoming => Condition::all().add(column.gt(now)),
        }
    }
}

/// One show seen from a venue or artist page: the other party plus the start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    pub show_id: i64,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    pub past_shows: Vec<Appearance>,
    pub upcoming_shows: Vec<Appearance>,
}

impl Schedule {
    pub fn past_shows_count(&self) -> usize {
        self.past_shows.len()
    }

    pub fn upcoming_shows_count(&self) -> usize {
        self.upcoming_shows.len()
    }
}

/// Shows played at a venue within a window, each paired with its artist.
pub async fn venue_appearances<C: ConnectionTrait>(
    conn: &C,
    venue_id: i64,
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Result<Vec<Appearance>, DbErr> {
    let rows = entities::show::Entity::find()
        .filter(entities::show::Column::VenueId.eq(venue_id))
        .filter(window.condition(now))
        .order_by_asc(entities::show::Column::StartTime)
        .order_by_asc(entities::show::Column::Id)
        .find_also_related(entities::artist::Entity)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(show, artist)| {
            let Some(artist) = artist else {
                tracing::warn!("Show {} references missing artist {}", show.id, show.artist_id);
                return None;
            };
            Some(Appearance {
                show_id: show.id,
                counterpart_id: artist.id,
                counterpart_name: artist.name,
                counterpart_image_link: artist.image_link,
                start_time: show.start_time,
            })
        })
        .collect())
}

/// Shows an artist plays within a window, each paired with its venue.
pub async fn artist_appearances<C: ConnectionTrait>(
    conn: &C,
    artist_id: i64,
    window: TimeWindow,
    now: DateTime<Utc>,
) -> Result<Vec<Appearance>, DbErr> {
    let rows = entities::show::Entity::find()
        .filter(entities::show::Column::ArtistId.eq(artist_id))
        .filter(window.condition(now))
        .order_by_asc(entities::show::Column::StartTime)
        .order_by_asc(entities::show::Column::Id)
        .find_also_related(entities::venue::Entity)
        .all(conn)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(show, venue)| {
            let Some(venue) = venue else {
                tracing::warn!("Show {} references missing venue {}", show.id, show.venue_id);
                return None;
            };
            Some(Appearance {
                show_id: show.id,
                counterpart_id: venue.id,
                counterpart_name: venue.name,
                counterpart_image_link: venue.image_link,
                start_time: show.start_time,
            })
        })
        .collect())
}

pub async fn venue_schedule<C: ConnectionTrait>(
    conn: &C,
    venue_id: i64,
    now: DateTime<Utc>,
) -> Result<Schedule, DbErr> {
    Ok(Schedule {
        past_shows: venue_appearances(conn, venue_id, TimeWindow::Past, now).await?,
        upcoming_shows: venue_appearances(conn, venue_id, TimeWindow::Upcoming, now).await?,
    })
}

pub async fn artist_schedule<C: ConnectionTrait>(
    conn: &C,
    artist_id: i64,
    now: DateTime<Utc>,
) -> Result<Schedule, DbErr> {
    Ok(Schedule {
        past_shows: artist_appearances(conn, artist_id, TimeWindow::Past, now).await?,
        upcoming_shows: artist_appearances(conn, artist_id, TimeWindow::Upcoming, now).await?,
    })
}

/// Count upcoming shows per owner, where `owner` is `show.venue_id` or `show.artist_id`.
///
/// When `ids` is given only those owners are looked up. Owners without upcoming
/// shows are absent from the map.
pub async fn upcoming_counts<C: ConnectionTrait>(
    conn: &C,
    owner: entities::show::Column,
    ids: Option<&[i64]>,
    now: DateTime<Utc>,
) -> Result<HashMap<i64, u64>, DbErr> {
    let mut query = entities::show::Entity::find()
        .select_only()
        .column(owner)
        .filter(TimeWindow::Upcoming.condition(now));

    if let Some(ids) = ids {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        query = query.filter(owner.is_in(ids.iter().copied()));
    }

    let owners = query.into_tuple::<i64>().all(conn).await?;

    let mut counts = HashMap::new();
    for owner_id in owners {
        *counts.entry(owner_id).or_insert(0) += 1;
    }
    Ok(counts)
}
