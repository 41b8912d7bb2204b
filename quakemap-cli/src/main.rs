//! QuakeMap CLI - Command-line interface
//!
//! This binary renders the earthquake and plate boundary map page and
//! manages the QuakeMap configuration file.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::common::BaseStyle;
use commands::config::ConfigCommands;
use commands::render::RenderArgs;

#[derive(Parser)]
#[command(name = "quakemap")]
#[command(version = quakemap::VERSION)]
#[command(about = "Map the past week of earthquakes over tectonic plate boundaries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the feeds and write a self-contained HTML map
    Render {
        /// Output file path (default: map.output from config)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Mapbox access token (overrides mapbox.access_token)
        #[arg(long)]
        access_token: Option<String>,

        /// Base layer shown when the page opens
        #[arg(long, value_enum)]
        base: Option<BaseStyle>,

        /// Earthquake GeoJSON feed URL
        #[arg(long)]
        earthquakes_url: Option<String>,

        /// Plate boundary GeoJSON URL
        #[arg(long)]
        plates_url: Option<String>,

        /// Page title
        #[arg(long)]
        title: Option<String>,

        /// Enable debug logging and echo log events to stdout
        #[arg(long)]
        debug: bool,
    },

    /// Print the magnitude color legend
    Legend,

    /// View or change configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            output,
            access_token,
            base,
            earthquakes_url,
            plates_url,
            title,
            debug,
        } => commands::render::run(RenderArgs {
            output,
            access_token,
            base,
            earthquakes_url,
            plates_url,
            title,
            debug,
        }),
        Commands::Legend => commands::legend::run(),
        Commands::Config { command } => commands::config::run(command),
    };

    if let Err(e) = result {
        e.exit();
    }
}
