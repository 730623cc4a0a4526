use std::path::PathBuf;

use indicatif::ProgressBar;

use crate::{
    config::Dataset,
    error::ConvertResult,
    geofile::{feature::to_feature, geojson::write_feature_collection},
    records::{
        coordinate::has_valid_coordinates,
        record::{load_records, Record},
    },
};

/// Counts reported after converting one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionSummary {
    pub name: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub records_loaded: usize,
    pub features_written: usize,
}

impl ConversionSummary {
    pub fn records_skipped(&self) -> usize {
        self.records_loaded - self.features_written
    }
}

/// Convert records with usable coordinates to point features, keeping input order.
/// Records without usable coordinates are dropped silently.
pub fn convert(records: &[Record]) -> geojson::FeatureCollection {
    let bar = ProgressBar::new(records.len() as u64);
    let mut features = Vec::new();
    for record in records {
        bar.inc(1);
        if !has_valid_coordinates(record) {
            continue;
        }
        match to_feature(record) {
            Ok(feature) => features.push(feature),
            Err(err) => log::debug!("Skipping record: {}", err),
        }
    }
    bar.finish_and_clear();

    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Load, convert and write one dataset.
pub fn run_conversion(dataset: &Dataset) -> ConvertResult<ConversionSummary> {
    log::info!(
        "Loading {} data from: {:?}",
        dataset.name,
        dataset.input_path
    );
    let records = load_records(&dataset.input_path)?;
    log::info!("Loaded {} {} records", records.len(), dataset.name);

    let feature_collection = convert(&records);
    log::info!(
        "Converted to {} GeoJSON features",
        feature_collection.features.len()
    );

    write_feature_collection(&feature_collection, &dataset.output_path)?;
    log::info!("GeoJSON file created: {:?}", dataset.output_path);

    Ok(ConversionSummary {
        name: dataset.name.clone(),
        input_path: dataset.input_path.clone(),
        output_path: dataset.output_path.clone(),
        records_loaded: records.len(),
        features_written: feature_collection.features.len(),
    })
}
