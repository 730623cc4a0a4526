use std::{
    collections::HashSet,
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::anyhow;
use serde::Deserialize;

/// Datasets converted when no config file is given. Inputs are expected in a sibling data
/// directory, outputs land in the map server's provider data directory.
pub const DEFAULT_DATASET_NAMES: [&str; 2] = ["housing", "registry"];
const DEFAULT_INPUT_DIR: &str = "../lotspy/data";
const DEFAULT_OUTPUT_DIR: &str = "provider-data";

/// One input file converted to one GeoJSON output file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

impl Dataset {
    /// Ad-hoc dataset named after the input file stem.
    pub fn from_paths(input_path: PathBuf, output_path: PathBuf) -> Self {
        let name = input_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "records".to_string());
        Self {
            name,
            input_path,
            output_path,
        }
    }

    fn default_for(name: &str) -> Self {
        Self {
            name: name.to_string(),
            input_path: Path::new(DEFAULT_INPUT_DIR).join(format!("{name}.json")),
            output_path: Path::new(DEFAULT_OUTPUT_DIR).join(format!("{name}.geojson")),
        }
    }

    fn resolved_against(self, base_dir: &Path) -> Self {
        Self {
            name: self.name,
            input_path: base_dir.join(self.input_path),
            output_path: base_dir.join(self.output_path),
        }
    }
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct Config {
    pub datasets: Vec<Dataset>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            datasets: DEFAULT_DATASET_NAMES
                .iter()
                .map(|name| Dataset::default_for(name))
                .collect(),
        }
    }
}

impl Config {
    /// Read a YAML config file. Relative dataset paths are resolved against the directory holding
    /// the config file.
    pub fn load_from_file(config_filepath: &Path) -> anyhow::Result<Self> {
        if !config_filepath.exists() {
            return Err(anyhow!("Config file {:?} not found", config_filepath));
        }
        let config_contents = read_to_string(config_filepath)?;
        let config = Self::from_yaml(&config_contents)?;
        let base_dir = config_filepath.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self {
            datasets: config
                .datasets
                .into_iter()
                .map(|dataset| dataset.resolved_against(base_dir))
                .collect(),
        })
    }

    pub fn from_yaml(config_contents: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(config_contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.datasets.is_empty() {
            return Err(anyhow!("Config does not list any datasets"));
        }
        let mut names = HashSet::new();
        for dataset in &self.datasets {
            if !names.insert(dataset.name.as_str()) {
                return Err(anyhow!("Dataset '{}' is listed more than once", dataset.name));
            }
        }
        Ok(())
    }

    /// All datasets, or only the one called `name`.
    pub fn select(&self, name: Option<&str>) -> anyhow::Result<Vec<&Dataset>> {
        match name {
            None => Ok(self.datasets.iter().collect()),
            Some(name) => self
                .datasets
                .iter()
                .find(|dataset| dataset.name == name)
                .map(|dataset| vec![dataset])
                .ok_or_else(|| {
                    let available: Vec<&str> = self
                        .datasets
                        .iter()
                        .map(|dataset| dataset.name.as_str())
                        .collect();
                    anyhow!(
                        "Unknown dataset '{}', available datasets: {}",
                        name,
                        available.join(", ")
                    )
                }),
        }
    }
}
