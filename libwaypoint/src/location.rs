//! Objects to manage the named locations that a device can be tracked against
use crate::{
    Database, Error, Result,
    core::query::{DynFilterPart, FilterPart, SortOrder, SortSpec, ToSql},
    geo::Coordinates,
};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Row, Sqlite};
use strum_macros::{Display, EnumIter, EnumString};

/// The name of the location that is inserted into an empty database
pub const DEFAULT_LOCATION_NAME: &str = "Default Location";

/// A type for specifying fields that can be used for filtering a database query
/// for locations
#[derive(Clone, Debug)]
pub enum Filter {
    /// Match the ID of the location to the given value
    Id(i64),

    /// Names that contain the given text. LIKE only folds ASCII case, so names with
    /// any character outside printable ASCII are always selected and need to be
    /// checked with [LocationQuery::matches()] afterwards.
    NameContains(String),
}

/// Escapes the LIKE wildcards so that they match literally with `ESCAPE '\'`
fn escape_like(frag: &str) -> String {
    let mut escaped = String::with_capacity(frag.len());
    for c in frag.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

impl FilterPart for Filter {
    fn add_to_query(&self, builder: &mut sqlx::QueryBuilder<sqlx::Sqlite>) {
        match self {
            Self::Id(id) => _ = builder.push(" L.id = ").push_bind(*id),
            Self::NameContains(frag) => {
                builder
                    .push(" (L.name LIKE ")
                    .push_bind(format!("%{}%", escape_like(frag)))
                    .push(" ESCAPE '\\' OR L.name GLOB '*[^ -~]*')");
            }
        }
    }
}

/// The fields that a list of locations can be sorted by
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Display, EnumIter, EnumString, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortField {
    #[default]
    Id,
    Name,
}

impl ToSql for SortField {
    fn to_sql(&self) -> String {
        match self {
            Self::Id => "L.id",
            Self::Name => "L.name",
        }
        .into()
    }
}

/// Parameters for listing locations
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocationQuery {
    /// Only return locations whose name contains this string, ignoring case
    pub name_contains: Option<String>,
    pub sort: SortSpec<SortField>,
}

impl LocationQuery {
    pub fn new(name_contains: Option<String>, sort: SortField, order: SortOrder) -> Self {
        Self {
            name_contains: name_contains.filter(|s| !s.trim().is_empty()),
            sort: SortSpec::new(sort, order),
        }
    }

    fn filter(&self) -> Option<DynFilterPart> {
        self.name_contains
            .as_ref()
            .map(|s| Filter::NameContains(s.trim().to_string()).into())
    }

    /// Whether the given location would be returned by this query
    pub fn matches(&self, location: &Location) -> bool {
        match &self.name_contains {
            None => true,
            Some(frag) => location
                .name
                .to_lowercase()
                .contains(&frag.trim().to_lowercase()),
        }
    }
}

/// A named point on the earth that a device can be tracked against
#[derive(Debug, sqlx::FromRow, Deserialize, Serialize, PartialEq, Clone)]
pub struct Location {
    /// A unique ID that identifies this location in the database
    pub id: i64,

    /// The name of the location
    pub name: String,

    /// Latitude in degrees, between -90 and 90
    pub latitude: f64,

    /// Longitude in degrees, between -180 and 180
    pub longitude: f64,
}

impl Location {
    /// Creates a new location object with the given data. It will initially have
    /// an invalid ID until it is inserted into the database
    pub fn new(name: String, latitude: f64, longitude: f64) -> Self {
        Self {
            id: Self::invalid_id(),
            name,
            latitude,
            longitude,
        }
    }

    /// The location that is stored when the database is first initialized
    pub fn default_location() -> Self {
        Self::new(DEFAULT_LOCATION_NAME.to_string(), 0.0, 0.0)
    }

    pub fn invalid_id() -> i64 {
        -1
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Checks that the name is not blank and that the coordinates are within range
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidName);
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(Error::InvalidLatitude(self.latitude));
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(Error::InvalidLongitude(self.longitude));
        }
        Ok(())
    }

    fn build_query(
        filter: Option<DynFilterPart>,
        sort: Option<&SortSpec<SortField>>,
    ) -> QueryBuilder<'static, Sqlite> {
        let mut qb = QueryBuilder::new(
            "SELECT L.id AS id, L.name AS name, L.latitude AS latitude, L.longitude AS longitude FROM locations L",
        );
        if let Some(f) = filter {
            qb.push(" WHERE ");
            f.add_to_query(&mut qb);
        }
        if let Some(sort) = sort {
            qb.push(" ORDER BY ").push(sort.to_sql());
            if sort.field != SortField::Id {
                qb.push(", L.id ").push(sort.order.to_sql());
            }
        }
        qb
    }

    /// Loads the location with the given id, returning `None` if there is no such row
    pub async fn find(id: i64, db: &Database) -> Result<Option<Self>> {
        Self::build_query(Some(Filter::Id(id).into()), None)
            .build_query_as()
            .fetch_optional(db.pool())
            .await
            .map_err(|e| e.into())
    }

    /// Loads the location with the given id, or fails with [Error::LocationNotFound]
    pub async fn load(id: i64, db: &Database) -> Result<Self> {
        Self::find(id, db).await?.ok_or(Error::LocationNotFound(id))
    }

    /// Loads all matching locations from the database
    pub async fn load_all(query: &LocationQuery, db: &Database) -> Result<Vec<Self>> {
        let mut locations: Vec<Self> = Self::build_query(query.filter(), Some(&query.sort))
            .build_query_as()
            .fetch_all(db.pool())
            .await?;
        locations.retain(|loc| query.matches(loc));
        Ok(locations)
    }

    pub async fn count(db: &Database) -> Result<i64> {
        sqlx::query("SELECT COUNT(*) as nlocations FROM locations")
            .fetch_one(db.pool())
            .await?
            .try_get("nlocations")
            .map_err(|e| e.into())
    }

    /// Add this location to the database. If this call completes successfully,
    /// the id of this object will be updated to the ID of the inserted row in the
    /// database
    pub async fn insert(&mut self, db: &Database) -> Result<i64> {
        if self.id != Self::invalid_id() {
            return Err(Error::InvalidInsertObjectAlreadyExists(self.id));
        }
        self.validate()?;

        let res = sqlx::query("INSERT INTO locations (name, latitude, longitude) VALUES (?, ?, ?)")
            .bind(self.name.trim())
            .bind(self.latitude)
            .bind(self.longitude)
            .execute(db.pool())
            .await?;
        self.id = res.last_insert_rowid();
        self.name = self.name.trim().to_string();
        Ok(self.id)
    }

    /// Update the location in the database such that it matches this object
    pub async fn update(&self, db: &Database) -> Result<()> {
        if self.id < 0 {
            return Err(Error::InvalidUpdateObjectNotFound);
        }
        self.validate()?;

        let res = sqlx::query("UPDATE locations SET name=?, latitude=?, longitude=? WHERE id=?")
            .bind(self.name.trim())
            .bind(self.latitude)
            .bind(self.longitude)
            .bind(self.id)
            .execute(db.pool())
            .await?;
        match res.rows_affected() {
            0 => Err(Error::LocationNotFound(self.id)),
            _ => Ok(()),
        }
    }

    pub async fn delete_id(id: i64, db: &Database) -> Result<()> {
        let res = sqlx::query("DELETE FROM locations WHERE id=?")
            .bind(id)
            .execute(db.pool())
            .await?;
        match res.rows_affected() {
            0 => Err(Error::LocationNotFound(id)),
            _ => Ok(()),
        }
    }
}
