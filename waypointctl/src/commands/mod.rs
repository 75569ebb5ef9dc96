pub(crate) mod locations;
pub(crate) mod tracking;

use anyhow::Result;
use libwaypoint::store::{LocationStore, ensure_seeded};

/// Handle the `waypointctl init` command. The database schema is created when the
/// database is opened, so all that is left is making sure there is a location.
pub(crate) async fn init(store: &dyn LocationStore) -> Result<String> {
    Ok(match ensure_seeded(store).await? {
        Some(loc) => format!("Added location {}: '{}'", loc.id, loc.name),
        None => format!(
            "Database already contains {} locations",
            store.count().await?
        ),
    })
}
