//! Commands related to stored [Location]s
use crate::{
    cli::LocationCommands,
    output::{self, rows::LocationRow},
};
use anyhow::{Result, anyhow};
use libwaypoint::{
    Error::LocationNotFound,
    location::{Location, LocationQuery},
    store::LocationStore,
};
use tracing::debug;

/// Handle the `waypointctl locations` command and its subcommands, returning the
/// text that should be printed
pub(crate) async fn handle_command(
    command: LocationCommands,
    store: &dyn LocationStore,
) -> Result<String> {
    match command {
        LocationCommands::List {
            filter,
            sort,
            order,
            output,
        } => {
            let query = LocationQuery::new(filter, sort, order);
            debug!(?query, "listing locations");
            let locations = store.list(&query).await?;
            output::format_seq(locations.iter().map(LocationRow::new), output.format)
        }
        LocationCommands::Show { id, output } => match store.load(id).await {
            Ok(loc) => output::format_one(LocationRow::new(&loc), output.format),
            Err(LocationNotFound(_)) => Ok(format!("Location {id} not found")),
            Err(e) => Err(e.into()),
        },
        LocationCommands::Add {
            name,
            latitude,
            longitude,
        } => {
            let mut loc = Location::new(name, latitude, longitude);
            let id = store.insert(&mut loc).await?;
            Ok(format!("Added location {id}: '{}'", loc.name))
        }
        LocationCommands::Remove { id } => {
            store
                .delete(id)
                .await
                .map_err(|e| anyhow!(e).context(format!("Unable to remove location {id}")))?;
            Ok(format!("Removed location {id}"))
        }
        LocationCommands::Modify {
            id,
            name,
            latitude,
            longitude,
        } => {
            if name.is_none() && latitude.is_none() && longitude.is_none() {
                return Err(anyhow!("Cannot modify location without new values"));
            }
            let mut loc = store.load(id).await?;
            if let Some(name) = name {
                loc.name = name;
            }
            if let Some(n) = latitude {
                loc.latitude = n;
            }
            if let Some(n) = longitude {
                loc.longitude = n;
            }
            store.update(&loc).await?;
            Ok(format!("Modified location {id}"))
        }
    }
}
