use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{ConvertError, ConvertResult};

/// A flat input object. Keys keep their insertion order so properties are written back in the
/// order they were read.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Read the whole file at `filepath` and parse it as a JSON array of objects.
pub fn load_records(filepath: &Path) -> ConvertResult<Vec<Record>> {
    if !filepath.exists() {
        return Err(ConvertError::InputNotFound {
            path: absolute_path(filepath),
        });
    }
    let contents = fs::read_to_string(filepath).map_err(|source| ConvertError::InputRead {
        path: filepath.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ConvertError::ParseError {
        path: filepath.to_path_buf(),
        source,
    })
}

fn absolute_path(filepath: &Path) -> PathBuf {
    std::env::current_dir()
        .map(|dir| dir.join(filepath))
        .unwrap_or_else(|_| filepath.to_path_buf())
}
