pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_venue_and_artist;
mod m20240301_000002_create_show;
mod m20240318_000001_index_show_start_time;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_venue_and_artist::Migration),
            Box::new(m20240301_000002_create_show::Migration),
            Box::new(m20240318_000001_index_show_start_time::Migration),
        ]
    }
}
