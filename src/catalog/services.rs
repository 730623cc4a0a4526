use std::{fs, io, path::Path};

use serde::Serialize;

use crate::error::{ConvertError, ConvertResult};

pub const GEOJSON_EXTENSION: &str = ".geojson";
const SERVICE_TYPE: &str = "FeatureServer";

/// A GeoJSON layer as the map server exposes it.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ServiceEntry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub service_type: String,
    pub url: String,
    #[serde(rename = "queryUrl")]
    pub query_url: String,
}

impl ServiceEntry {
    pub fn new(layer_id: &str, base_url: &str) -> Self {
        let url = format!(
            "{}/file-geojson/rest/services/{}/{}",
            base_url.trim_end_matches('/'),
            layer_id,
            SERVICE_TYPE
        );
        Self {
            id: layer_id.to_string(),
            name: layer_display_name(layer_id),
            service_type: SERVICE_TYPE.to_string(),
            query_url: format!("{url}/0/query"),
            url,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Catalog {
    pub services: Vec<ServiceEntry>,
    pub count: usize,
}

/// List the `.geojson` files in `data_dir` as services, sorted by layer id.
pub fn build_catalog(data_dir: &Path, base_url: &str) -> ConvertResult<Catalog> {
    let read_error = |source: io::Error| ConvertError::CatalogRead {
        path: data_dir.to_path_buf(),
        source,
    };

    let mut layer_ids = Vec::new();
    for entry in fs::read_dir(data_dir).map_err(read_error)? {
        let file_name = entry.map_err(read_error)?.file_name();
        let file_name = file_name.to_string_lossy();
        if let Some(layer_id) = file_name.strip_suffix(GEOJSON_EXTENSION) {
            if !layer_id.is_empty() {
                layer_ids.push(layer_id.to_string());
            }
        }
    }
    layer_ids.sort();
    log::debug!("Found {} layers in {:?}", layer_ids.len(), data_dir);

    let services: Vec<ServiceEntry> = layer_ids
        .iter()
        .map(|layer_id| ServiceEntry::new(layer_id, base_url))
        .collect();
    Ok(Catalog {
        count: services.len(),
        services,
    })
}

/// Human readable layer name: dashes become spaces and every word starts upper-case, e.g.
/// `affordable-housing` becomes `Affordable Housing`.
pub fn layer_display_name(layer_id: &str) -> String {
    let mut name = String::with_capacity(layer_id.len());
    let mut previous_is_word = false;
    for c in layer_id.chars().map(|c| if c == '-' { ' ' } else { c }) {
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !previous_is_word {
            name.push(c.to_ascii_uppercase());
        } else {
            name.push(c);
        }
        previous_is_word = is_word;
    }
    name
}
