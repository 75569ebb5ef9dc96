//! Commands for measuring the way to stored locations
use crate::output::{
    self, OutputFormat,
    rows::{LegRow, TrackRow},
};
use anyhow::Result;
use libwaypoint::{
    store::LocationStore,
    tracker::{self, Leg, Reading},
};

/// Handle the `waypointctl track` command
pub(crate) async fn track(
    store: &dyn LocationStore,
    reading: Reading,
    id: i64,
    format: OutputFormat,
) -> Result<String> {
    let report = tracker::track(store, &reading, id).await?;
    output::format_one(TrackRow::new(&report), format)
}

/// Handle the `waypointctl distance` command
pub(crate) async fn distance(
    store: &dyn LocationStore,
    from: i64,
    to: i64,
    format: OutputFormat,
) -> Result<String> {
    let a = store.load(from).await?;
    let b = store.load(to).await?;
    let leg = Leg::between(&a.coordinates(), &b.coordinates());
    output::format_one(LegRow::new(&a, &b, &leg), format)
}
