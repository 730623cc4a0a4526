use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::{ConvertError, ConvertResult};

/// Write the feature collection as pretty-printed JSON, replacing any existing file.
///
/// The contents go to a temporary file next to the output which is then renamed into place, so a
/// failed write leaves any previous output untouched. Missing parent directories are not created.
pub fn write_feature_collection(
    feature_collection: &geojson::FeatureCollection,
    output_filepath: &Path,
) -> ConvertResult<()> {
    let geojson_contents = serde_json::to_string_pretty(feature_collection)?;
    let write_error = |source: std::io::Error| ConvertError::OutputWriteError {
        path: output_filepath.to_path_buf(),
        source,
    };

    let temp_filepath = temp_filepath_for(output_filepath);
    fs::write(&temp_filepath, geojson_contents).map_err(|err| {
        let _ = fs::remove_file(&temp_filepath);
        write_error(err)
    })?;
    fs::rename(&temp_filepath, output_filepath).map_err(|err| {
        let _ = fs::remove_file(&temp_filepath);
        write_error(err)
    })
}

fn temp_filepath_for(output_filepath: &Path) -> PathBuf {
    let mut temp_filepath = output_filepath.as_os_str().to_owned();
    temp_filepath.push(".tmp");
    PathBuf::from(temp_filepath)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use testdir::testdir;

    use super::{temp_filepath_for, write_feature_collection};
    use crate::error::ConvertError;

    fn empty_collection() -> geojson::FeatureCollection {
        geojson::FeatureCollection {
            bbox: None,
            features: vec![],
            foreign_members: None,
        }
    }

    #[test]
    fn test_write_feature_collection_pretty_printed() {
        let output_filepath = testdir!().join("empty.geojson");
        write_feature_collection(&empty_collection(), &output_filepath).unwrap();

        let contents = fs::read_to_string(&output_filepath).unwrap();
        assert_eq!(contents, "{\n  \"type\": \"FeatureCollection\",\n  \"features\": []\n}");
    }

    #[test]
    fn test_write_feature_collection_overwrites() {
        let output_filepath = testdir!().join("housing.geojson");
        fs::write(&output_filepath, "stale contents that are longer than the new output").unwrap();

        write_feature_collection(&empty_collection(), &output_filepath).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output_filepath).unwrap()).unwrap();
        assert_eq!(written, json!({"type": "FeatureCollection", "features": []}));
    }

    #[test]
    fn test_write_feature_collection_missing_parent_dir() {
        let output_filepath = testdir!().join("no_such_dir").join("housing.geojson");
        let result = write_feature_collection(&empty_collection(), &output_filepath);
        match result {
            Err(ConvertError::OutputWriteError { path, .. }) => assert_eq!(path, output_filepath),
            other => panic!("Expected OutputWriteError, got {:?}", other),
        }
        assert!(!output_filepath.exists());
    }

    #[test]
    fn test_write_feature_collection_leaves_no_temp_file() {
        let output_filepath = testdir!().join("registry.geojson");
        write_feature_collection(&empty_collection(), &output_filepath).unwrap();

        assert!(output_filepath.exists());
        assert!(!temp_filepath_for(&output_filepath).exists());
    }

    #[test]
    fn test_write_feature_collection_failed_replace_keeps_target() {
        // A directory cannot be replaced by a file, so the final rename fails.
        let output_filepath = testdir!().join("housing.geojson");
        fs::create_dir(&output_filepath).unwrap();
        fs::write(output_filepath.join("keep.txt"), "previous output").unwrap();

        let result = write_feature_collection(&empty_collection(), &output_filepath);
        assert!(matches!(result, Err(ConvertError::OutputWriteError { .. })));
        assert!(!temp_filepath_for(&output_filepath).exists());
        assert_eq!(
            fs::read_to_string(output_filepath.join("keep.txt")).unwrap(),
            "previous output"
        );
    }
}
