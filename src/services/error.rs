use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("{entity} {id} has malformed genres: {source}")]
    MalformedGenres {
        entity: &'static str,
        id: i64,
        source: serde_json::Error,
    },
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
