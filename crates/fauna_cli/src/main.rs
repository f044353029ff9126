//! Command-line query tool for a fauna database.
//!
//! # Responsibility
//! - Open a database file and run read-side queries against it.
//! - Print results as pretty JSON so the core's wire shapes are visible.

use clap::{Parser, Subcommand};
use fauna_core::db::open_db;
use fauna_core::{
    default_log_level, init_logging, AnimalService, CategoryService, GeoPolygon,
    RelationalResolver, SpeciesId, SpeciesService, SqliteAnimalRepository,
    SqliteCategoryRepository, SqliteSpeciesRepository,
};
use serde::Serialize;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Query tracked animals, species and categories.
#[derive(Parser, Debug)]
#[command(name = "fauna")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SQLite database file; created and migrated when missing
    #[arg(long, default_value = "./fauna.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging stays off when unset
    #[arg(long)]
    log_dir: Option<String>,

    /// Log level: trace|debug|info|warn|error; needs --log-dir
    #[arg(long, requires = "log_dir")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List categories
    Categories,

    /// List species as plain records
    Species,

    /// List animals
    Animals {
        /// Skip species/category resolution
        #[arg(long)]
        raw: bool,
    },

    /// Animals inside a rectangle, resolved
    #[command(name = "box")]
    WithinBox {
        /// Corner as "longitude,latitude"
        #[arg(long, allow_hyphen_values = true)]
        top_right: String,
        /// Opposite corner as "longitude,latitude"
        #[arg(long, allow_hyphen_values = true)]
        bottom_left: String,
    },

    /// Species whose range intersects a polygon
    Area {
        /// Ring as JSON, e.g. '[[4,4],[4,6],[6,6],[6,4]]', or a GeoJSON Polygon
        #[arg(long)]
        polygon: String,
    },

    /// Animals of one species, unresolved
    BySpecies {
        species_id: SpeciesId,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let conn = open_db(&cli.db)?;
    let categories = CategoryService::new(SqliteCategoryRepository::try_new(&conn)?);
    let species = SpeciesService::new(SqliteSpeciesRepository::try_new(&conn)?);
    let animals = AnimalService::new(
        SqliteAnimalRepository::try_new(&conn)?,
        RelationalResolver::new(
            SqliteSpeciesRepository::try_new(&conn)?,
            SqliteCategoryRepository::try_new(&conn)?,
        ),
    );

    match cli.command {
        Command::Categories => print_json(&categories.list()?),
        Command::Species => print_json(&species.list()?),
        Command::Animals { raw } => print_json(&animals.list(!raw)?),
        Command::WithinBox {
            top_right,
            bottom_left,
        } => print_json(&animals.find_within_box(&top_right, &bottom_left)?),
        Command::Area { polygon } => {
            let area: GeoPolygon = serde_json::from_str(&polygon)?;
            print_json(&species.find_by_area(&area)?)
        }
        Command::BySpecies { species_id } => print_json(&animals.find_by_species(species_id)?),
    }
}

fn print_json(value: &impl Serialize) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::error::ErrorKind;
    use clap::Parser;

    #[test]
    fn log_level_without_log_dir_is_rejected() {
        let err = Cli::try_parse_from(["fauna", "--log-level", "debug", "categories"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn log_level_with_log_dir_is_accepted() {
        let cli = Cli::try_parse_from([
            "fauna",
            "--log-dir",
            "/tmp/fauna-logs",
            "--log-level",
            "debug",
            "categories",
        ])
        .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Command::Categories));
    }

    #[test]
    fn box_corners_accept_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "fauna",
            "box",
            "--top-right",
            "-10,5",
            "--bottom-left",
            "-20,-5",
        ])
        .unwrap();
        match cli.command {
            Command::WithinBox {
                top_right,
                bottom_left,
            } => {
                assert_eq!(top_right, "-10,5");
                assert_eq!(bottom_left, "-20,-5");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
