//! The storage abstraction that the rest of the application uses to get at locations.
//!
//! [Database] is the persistent implementation. [MemoryStore] keeps everything in
//! process and is mostly useful for tests.
use crate::{
    Database, Error, Result,
    location::{Location, LocationQuery, SortField},
    core::query::SortOrder,
};
use async_trait::async_trait;
use std::{cmp::Ordering, collections::BTreeMap};
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Operations for reading and modifying the stored locations
#[async_trait]
pub trait LocationStore: Send + Sync + std::fmt::Debug {
    /// Look up a single location, returning `None` if the id is unknown
    async fn get(&self, id: i64) -> Result<Option<Location>>;

    /// List all locations that match the query
    async fn list(&self, query: &LocationQuery) -> Result<Vec<Location>>;

    /// Store a new location and set its id. The location must not have an id yet.
    async fn insert(&self, location: &mut Location) -> Result<i64>;

    /// Replace the stored location that has the same id as `location`
    async fn update(&self, location: &Location) -> Result<()>;

    /// Remove the location with the given id
    async fn delete(&self, id: i64) -> Result<()>;

    /// The number of stored locations
    async fn count(&self) -> Result<i64>;

    /// Like [LocationStore::get()], but an unknown id is an [Error::LocationNotFound]
    async fn load(&self, id: i64) -> Result<Location> {
        self.get(id).await?.ok_or(Error::LocationNotFound(id))
    }
}

#[async_trait]
impl LocationStore for Database {
    async fn get(&self, id: i64) -> Result<Option<Location>> {
        Location::find(id, self).await
    }

    async fn list(&self, query: &LocationQuery) -> Result<Vec<Location>> {
        Location::load_all(query, self).await
    }

    async fn insert(&self, location: &mut Location) -> Result<i64> {
        location.insert(self).await
    }

    async fn update(&self, location: &Location) -> Result<()> {
        location.update(self).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        Location::delete_id(id, self).await
    }

    async fn count(&self) -> Result<i64> {
        Location::count(self).await
    }
}

#[derive(Debug, Default)]
struct MemoryRows {
    rows: BTreeMap<i64, Location>,
    last_id: i64,
}

/// A [LocationStore] that keeps its locations in memory. Ids are handed out the same
/// way as the database does it: increasing, and never reused after a delete.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<MemoryRows>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already contains the given locations. Locations with an
    /// invalid id get a new one assigned.
    pub fn with_locations<I: IntoIterator<Item = Location>>(locations: I) -> Self {
        let mut rows = MemoryRows::default();
        for mut loc in locations {
            if loc.id == Location::invalid_id() {
                loc.id = rows.last_id + 1;
            }
            rows.last_id = rows.last_id.max(loc.id);
            rows.rows.insert(loc.id, loc);
        }
        Self {
            inner: RwLock::new(rows),
        }
    }
}

fn compare(a: &Location, b: &Location, field: SortField) -> Ordering {
    match field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Name => a.name.cmp(&b.name).then(a.id.cmp(&b.id)),
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn get(&self, id: i64) -> Result<Option<Location>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn list(&self, query: &LocationQuery) -> Result<Vec<Location>> {
        let inner = self.inner.read().await;
        let mut locations: Vec<Location> = inner
            .rows
            .values()
            .filter(|loc| query.matches(loc))
            .cloned()
            .collect();
        locations.sort_by(|a, b| compare(a, b, query.sort.field));
        if query.sort.order == SortOrder::Descending {
            locations.reverse();
        }
        Ok(locations)
    }

    async fn insert(&self, location: &mut Location) -> Result<i64> {
        if location.id != Location::invalid_id() {
            return Err(Error::InvalidInsertObjectAlreadyExists(location.id));
        }
        location.validate()?;
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        location.id = inner.last_id;
        location.name = location.name.trim().to_string();
        inner.rows.insert(location.id, location.clone());
        Ok(location.id)
    }

    async fn update(&self, location: &Location) -> Result<()> {
        if location.id < 0 {
            return Err(Error::InvalidUpdateObjectNotFound);
        }
        location.validate()?;
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&location.id) {
            Some(row) => {
                *row = location.clone();
                row.name = row.name.trim().to_string();
                Ok(())
            }
            None => Err(Error::LocationNotFound(location.id)),
        }
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.inner
            .write()
            .await
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(Error::LocationNotFound(id))
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.inner.read().await.rows.len() as i64)
    }
}

/// Makes sure that there is at least one location to choose from by inserting
/// [Location::default_location()] into an empty store. Returns the inserted location,
/// if any.
pub async fn ensure_seeded(store: &dyn LocationStore) -> Result<Option<Location>> {
    let n = store.count().await?;
    if n > 0 {
        debug!(n, "store already contains locations, not seeding");
        return Ok(None);
    }
    let mut loc = Location::default_location();
    store.insert(&mut loc).await?;
    info!(loc.id, %loc.name, "Seeded empty store with default location");
    Ok(Some(loc))
}
