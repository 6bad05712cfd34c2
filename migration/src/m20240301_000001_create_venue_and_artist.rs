use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Venue::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Venue::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Venue::Name).string().not_null())
                    .col(ColumnDef::new(Venue::Address).string_len(120).not_null())
                    .col(ColumnDef::new(Venue::City).string_len(120).not_null())
                    .col(ColumnDef::new(Venue::State).string_len(120).not_null())
                    .col(ColumnDef::new(Venue::Phone).string_len(120))
                    // JSON array of genre names
                    .col(
                        ColumnDef::new(Venue::Genres)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Venue::ImageLink).string_len(500))
                    .col(ColumnDef::new(Venue::FacebookLink).string_len(120))
                    .col(ColumnDef::new(Venue::Website).string_len(120))
                    .col(
                        ColumnDef::new(Venue::SeekingTalent)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Venue::SeekingDescription).string_len(500))
                    .col(ColumnDef::new(Venue::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Artist::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Artist::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Artist::Name).string().not_null())
                    .col(ColumnDef::new(Artist::City).string_len(120).not_null())
                    .col(ColumnDef::new(Artist::State).string_len(120).not_null())
                    .col(ColumnDef::new(Artist::Phone).string_len(120))
                    .col(
                        ColumnDef::new(Artist::Genres)
                            .string()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Artist::ImageLink).string_len(500))
                    .col(ColumnDef::new(Artist::FacebookLink).string_len(120))
                    .col(ColumnDef::new(Artist::Website).string_len(120))
                    .col(
                        ColumnDef::new(Artist::SeekingVenue)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Artist::SeekingDescription).string_len(500))
                    .col(ColumnDef::new(Artist::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_venue_city_state")
                    .table(Venue::Table)
                    .col(Venue::City)
                    .col(Venue::State)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Artist::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Venue::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Venue {
    Table,
    Id,
    Name,
    Address,
    City,
    State,
    Phone,
    Genres,
    ImageLink,
    FacebookLink,
    Website,
    SeekingTalent,
    SeekingDescription,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Artist {
    Table,
    Id,
    Name,
    City,
    State,
    Phone,
    Genres,
    ImageLink,
    FacebookLink,
    Website,
    SeekingVenue,
    SeekingDescription,
    CreatedAt,
}
