extern crate log;
pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod geofile;
pub mod records;
use crate::catalog::services::build_catalog;
use crate::config::{Config, Dataset};
use crate::convert::converter::run_conversion;
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Convert tabular records with latitude/longitude fields to GeoJSON for the map server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert datasets to GeoJSON FeatureCollections.
    ///
    /// Without a config file the housing and registry datasets are read from
    /// ../lotspy/data/<name>.json and written to provider-data/<name>.geojson, relative to the
    /// current working directory. Run it from the project root or pass --config-filepath.
    Convert {
        /// Path to a YAML config file listing datasets. Relative dataset paths resolve against
        /// the config file's directory. Without it the built-in housing and registry datasets
        /// are converted, relative to the current working directory.
        #[arg(short, long, conflicts_with = "input")]
        config_filepath: Option<PathBuf>,

        /// Only convert the dataset with this name.
        #[arg(short, long, conflicts_with = "input")]
        dataset: Option<String>,

        /// Input JSON file for a one-off conversion.
        #[arg(short, long, requires = "output")]
        input: Option<PathBuf>,

        /// Output GeoJSON file for a one-off conversion.
        #[arg(short, long, requires = "input")]
        output: Option<PathBuf>,
    },
    /// Print the GeoJSON layers available in a provider data directory.
    Catalog {
        #[arg(long, default_value = "provider-data")]
        data_dir: PathBuf,

        /// Prefix for the service URLs, e.g. http://localhost:8080.
        #[arg(long, default_value = "")]
        base_url: String,
    },
}

fn get_datasets(
    config_filepath: Option<PathBuf>,
    dataset: Option<String>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<Vec<Dataset>> {
    if let (Some(input), Some(output)) = (input, output) {
        return Ok(vec![Dataset::from_paths(input, output)]);
    }
    let config = match config_filepath {
        Some(config_filepath) => Config::load_from_file(&config_filepath)?,
        None => Config::default(),
    };
    Ok(config
        .select(dataset.as_deref())?
        .into_iter()
        .cloned()
        .collect())
}

fn try_main(args: Args) -> anyhow::Result<()> {
    match args.command {
        Command::Convert {
            config_filepath,
            dataset,
            input,
            output,
        } => {
            let datasets = get_datasets(config_filepath, dataset, input, output)?;
            for dataset in &datasets {
                let summary = run_conversion(dataset)
                    .with_context(|| format!("Converting dataset '{}'", dataset.name))?;
                log::info!(
                    "{}: wrote {} of {} records from {:?} to {:?}, skipped {} without usable coordinates",
                    summary.name,
                    summary.features_written,
                    summary.records_loaded,
                    summary.input_path,
                    summary.output_path,
                    summary.records_skipped()
                );
            }
            log::info!("Conversion completed successfully!");
        }
        Command::Catalog { data_dir, base_url } => {
            let catalog = build_catalog(&data_dir, &base_url)?;
            println!("{}", serde_json::to_string_pretty(&catalog)?);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(e) = try_main(Args::parse()) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
