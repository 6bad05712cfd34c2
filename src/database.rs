use color_eyre::{Result, eyre::Context};
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database as SeaDatabase, DatabaseConnection};
use std::path::Path;
use std::time::Duration;

pub struct Database {
    pub conn: DatabaseConnection,
}

impl Database {
    /// Open or create the database at the given path and apply pending migrations
    pub async fn open(path: &Path) -> Result<Self> {
        let database = Self::connect(path).await?;

        tracing::debug!("Running database migrations");
        migration::Migrator::up(&database.conn, None)
            .await
            .context("Failed to run database migrations")?;

        tracing::info!("Database ready at: {}", path.display());
        Ok(database)
    }

    /// Open the database without touching the schema
    pub async fn connect(path: &Path) -> Result<Self> {
        tracing::debug!("Opening database at: {}", path.display());

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).context(format!(
                "Failed to create database directory: {}",
                parent.display()
            ))?;
        }

        let url = format!("sqlite://{}?mode=rwc", path.display());

        let mut opt = ConnectOptions::new(url);
        opt.max_connections(16)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(8))
            .acquire_timeout(Duration::from_secs(8))
            .sqlx_logging(false);

        let conn = SeaDatabase::connect(opt)
            .await
            .context(format!("Failed to open database: {}", path.display()))?;

        Ok(Database { conn })
    }

    pub async fn migrate_up(&self) -> Result<()> {
        migration::Migrator::up(&self.conn, None)
            .await
            .context("Failed to apply migrations")
    }

    pub async fn migrate_down(&self, steps: u32) -> Result<()> {
        migration::Migrator::down(&self.conn, Some(steps))
            .await
            .context("Failed to roll back migrations")
    }

    pub async fn migration_status(&self) -> Result<()> {
        migration::Migrator::status(&self.conn)
            .await
            .context("Failed to read migration status")
    }
}
