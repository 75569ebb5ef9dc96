//! Utilities for printing data from the database
use anyhow::anyhow;
use clap::ValueEnum;
use serde::Serialize;
use table::WaypointTable;
use tabled::{Table, Tabled};

pub(crate) mod rows;
pub(crate) mod table;

/// Data format for printing objects
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub(crate) enum OutputFormat {
    /// Human readable table of data
    Table,
    /// Comma-separated values for importing into a spreadsheet
    Csv,
    /// JSON-formatted objects
    Json,
    /// YAML-formatted objects
    Yaml,
}

/// Serialize a single object into the given data format
pub(crate) fn format_one<T>(item: T, fmt: OutputFormat) -> anyhow::Result<String>
where
    T: Tabled + Serialize + 'static,
{
    match fmt {
        OutputFormat::Table => {
            let tbuilder = Table::builder(vec![item]).index().column(0).transpose();
            Ok(format!("{}", tbuilder.build().styled()))
        }
        OutputFormat::Csv => Err(anyhow!("CSV format is not valid for single items")),
        OutputFormat::Json => serde_json::to_string(&item).map_err(|e| e.into()),
        OutputFormat::Yaml => serde_yaml::to_string(&item).map_err(|e| e.into()),
    }
}

/// Serialize a sequence of objects into the given data format
pub(crate) fn format_seq<I>(items: I, fmt: OutputFormat) -> anyhow::Result<String>
where
    I: IntoIterator,
    <I as IntoIterator>::Item: Tabled + Serialize + 'static,
{
    let iter = items.into_iter();
    match fmt {
        OutputFormat::Table => {
            let mut table = Table::new(iter);
            let n = table.count_rows() - 1;
            Ok(format!("{}\n{} records found", table.styled(), n))
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(vec![]);
            iter.map(|item| writer.serialize(item))
                .collect::<Result<Vec<_>, _>>()?;
            writer.flush()?;
            String::from_utf8(writer.into_inner()?).map_err(|e| e.into())
        }
        OutputFormat::Json => {
            serde_json::to_string(&iter.collect::<Vec<_>>()).map_err(|e| e.into())
        }
        OutputFormat::Yaml => {
            serde_yaml::to_string(&iter.collect::<Vec<_>>()).map_err(|e| e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{rows::LocationRow, *};
    use libwaypoint::location::Location;

    fn locations() -> Vec<Location> {
        vec![
            Location {
                id: 1,
                name: "Big Ben".into(),
                latitude: 51.5007,
                longitude: -0.1246,
            },
            Location {
                id: 2,
                name: "Paris".into(),
                latitude: 48.8566,
                longitude: 2.3522,
            },
        ]
    }

    #[test]
    fn test_format_seq() {
        let locs = locations();
        let csv = format_seq(locs.iter().map(LocationRow::new), OutputFormat::Csv).unwrap();
        assert_eq!(
            csv,
            "id,name,latitude,longitude\n1,Big Ben,51.5007,-0.1246\n2,Paris,48.8566,2.3522\n"
        );

        let json = format_seq(locs.iter().map(LocationRow::new), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["name"], "Paris");

        let table = format_seq(locs.iter().map(LocationRow::new), OutputFormat::Table).unwrap();
        assert!(table.contains("Big Ben"));
        assert!(table.ends_with("2 records found"));

        let empty: Vec<LocationRow> = vec![];
        let table = format_seq(empty, OutputFormat::Table).unwrap();
        assert!(table.ends_with("0 records found"));
    }

    #[test]
    fn test_format_one() {
        let locs = locations();
        assert!(format_one(LocationRow::new(&locs[0]), OutputFormat::Csv).is_err());
        let yaml = format_one(LocationRow::new(&locs[0]), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("name: Big Ben"));
        let table = format_one(LocationRow::new(&locs[1]), OutputFormat::Table).unwrap();
        assert!(table.contains("Paris"));
        assert!(table.contains("48.8566"));
    }
}
