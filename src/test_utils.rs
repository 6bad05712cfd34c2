use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, ConnectionTrait, Database as SeaDatabase, Set};

use crate::database::Database;
use crate::entities;

pub async fn test_db() -> Arc<Database> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    // Every pooled connection to :memory: would get its own empty database
    opt.max_connections(1).sqlx_logging(false);

    let conn = SeaDatabase::connect(opt).await.unwrap();

    conn.execute_unprepared("PRAGMA foreign_keys = ON")
        .await
        .unwrap();

    migration::Migrator::up(&conn, None).await.unwrap();

    Arc::new(Database { conn })
}

/// 2024-06-01 20:00 UTC, the fixed "now" used across tests
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 20, 0, 0).unwrap()
}

pub async fn insert_venue(
    db: &Database,
    name: &str,
    city: &str,
    state: &str,
) -> entities::venue::Model {
    let venue = entities::venue::ActiveModel {
        name: Set(name.into()),
        address: Set("1 Main St".into()),
        city: Set(city.into()),
        state: Set(state.into()),
        genres: Set(r#"["Jazz"]"#.into()),
        ..Default::default()
    };
    venue.insert(&db.conn).await.unwrap()
}

pub async fn insert_artist(db: &Database, name: &str) -> entities::artist::Model {
    let artist = entities::artist::ActiveModel {
        name: Set(name.into()),
        city: Set("San Francisco".into()),
        state: Set("CA".into()),
        genres: Set(r#"["Rock n Roll"]"#.into()),
        ..Default::default()
    };
    artist.insert(&db.conn).await.unwrap()
}

pub async fn insert_show(
    db: &Database,
    venue_id: i64,
    artist_id: i64,
    start_time: DateTime<Utc>,
) -> entities::show::Model {
    let show = entities::show::ActiveModel {
        venue_id: Set(venue_id),
        artist_id: Set(artist_id),
        start_time: Set(start_time),
        ..Default::default()
    };
    show.insert(&db.conn).await.unwrap()
}
