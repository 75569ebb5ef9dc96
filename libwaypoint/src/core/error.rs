//! Objects related to reporting errors from this library

/// A list of error types that can occur within this library
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Location {0} not found")]
    LocationNotFound(i64),

    #[error("invalid name: a location name must not be empty")]
    InvalidName,

    #[error("invalid latitude {0}: must be between -90 and 90 degrees")]
    InvalidLatitude(f64),

    #[error("invalid longitude {0}: must be between -180 and 180 degrees")]
    InvalidLongitude(f64),

    #[error("can't update the object, no id was specified")]
    InvalidUpdateObjectNotFound,

    #[error("can't insert the object, it already exists in the database with id = {}", .0)]
    InvalidInsertObjectAlreadyExists(i64),

    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),

    #[error(transparent)]
    DatabaseMigrationError(#[from] sqlx::migrate::MigrateError),
}

impl Error {
    /// Whether this error was caused by data that the caller supplied, as opposed to a
    /// failure of the storage backend
    pub fn is_invalid_data(&self) -> bool {
        matches!(
            self,
            Error::InvalidName | Error::InvalidLatitude(_) | Error::InvalidLongitude(_)
        )
    }
}

/// A convenience type alias for a [Result] with [Error] as its error type
pub type Result<T, E = Error> = std::result::Result<T, E>;
