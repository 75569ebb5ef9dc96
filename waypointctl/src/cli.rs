use crate::output::OutputFormat;
use clap::{Args, Parser, Subcommand};
use libwaypoint::{core::query::SortOrder, location::SortField};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(short, long, default_value = "locations.db")]
    pub database: PathBuf,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct OutputOptions {
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Create the database if necessary and add a default location to it")]
    Init,
    #[command(about = "Manage locations")]
    Locations {
        #[command(subcommand)]
        command: LocationCommands,
    },
    #[command(about = "Show the distance and direction from a position to a stored location")]
    Track {
        #[arg(long = "lat", allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long = "long", allow_negative_numbers = true)]
        longitude: f64,
        #[arg(
            long,
            allow_negative_numbers = true,
            help = "The compass heading of the device, in degrees"
        )]
        heading: Option<f64>,
        #[arg(help = "ID of the location to track")]
        id: i64,
        #[command(flatten)]
        output: OutputOptions,
    },
    #[command(about = "Show the distance and direction between two stored locations")]
    Distance {
        from: i64,
        to: i64,
        #[command(flatten)]
        output: OutputOptions,
    },
}

#[derive(Subcommand, Debug)]
pub enum LocationCommands {
    #[command(about = "List all locations")]
    List {
        #[arg(long, help = "Only show locations whose name contains this string")]
        filter: Option<String>,
        #[arg(long, default_value = "id", help = "Sort by 'id' or 'name'")]
        sort: SortField,
        #[arg(long, default_value = "asc", help = "Sort order, 'asc' or 'desc'")]
        order: SortOrder,
        #[command(flatten)]
        output: OutputOptions,
    },
    #[command(about = "Show a single location")]
    Show {
        id: i64,
        #[command(flatten)]
        output: OutputOptions,
    },
    #[command(about = "Add a new location to the database")]
    Add {
        #[arg(long)]
        name: String,
        #[arg(long = "lat", allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long = "long", allow_negative_numbers = true)]
        longitude: f64,
    },
    #[command(about = "Remove an existing location from the database")]
    Remove { id: i64 },
    #[command(
        about="Modify properties of a location",
        group(
            clap::ArgGroup::new("modify")
                .required(true)
                .multiple(true)
                .args(&["name", "latitude", "longitude"]),
        ))]
    Modify {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "lat", allow_negative_numbers = true)]
        latitude: Option<f64>,
        #[arg(long = "long", allow_negative_numbers = true)]
        longitude: Option<f64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_track() {
        let cli = Cli::try_parse_from([
            "waypointctl",
            "track",
            "--lat",
            "51.5",
            "--long",
            "-0.12",
            "2",
            "-o",
            "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Track {
                latitude,
                longitude,
                heading,
                id,
                output,
            } => {
                assert_eq!((latitude, longitude, heading, id), (51.5, -0.12, None, 2));
                assert_eq!(output.format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert_eq!(cli.database, PathBuf::from("locations.db"));
    }

    #[test]
    fn test_parse_locations() {
        let cli = Cli::try_parse_from([
            "waypointctl",
            "-d",
            "other.db",
            "locations",
            "list",
            "--sort",
            "name",
            "--order",
            "desc",
        ])
        .unwrap();
        assert_eq!(cli.database, PathBuf::from("other.db"));
        match cli.command {
            Commands::Locations {
                command:
                    LocationCommands::List {
                        filter,
                        sort,
                        order,
                        output,
                    },
            } => {
                assert_eq!(filter, None);
                assert_eq!(sort, SortField::Name);
                assert_eq!(order, SortOrder::Descending);
                assert_eq!(output.format, OutputFormat::Table);
            }
            other => panic!("unexpected command {other:?}"),
        }

        assert!(Cli::try_parse_from(["waypointctl", "locations", "modify", "--id", "1"]).is_err());
        assert!(
            Cli::try_parse_from(["waypointctl", "locations", "list", "--sort", "height"]).is_err()
        );
    }
}
