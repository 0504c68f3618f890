//! Loading and filtering of dataset records.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// One conversation turn. Only `value` is read; other keys (`from`, ...) are kept as-is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Turn {
    #[serde(default)]
    pub value: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One dataset item.
///
/// `image` is a path relative to the images folder. Records without it are
/// text-only and are dropped by [`filter_data`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Record {
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub conversations: Option<Vec<Turn>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    pub fn has_image(&self) -> bool {
        self.image.as_deref().is_some_and(|p| !p.is_empty())
    }

    pub fn turns(&self) -> &[Turn] {
        self.conversations.as_deref().unwrap_or(&[])
    }
}

/// Errors that can occur while loading a dataset file.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a JSON array of records into memory.
pub fn load_data(json_path: &Path) -> Result<Vec<Record>, DatasetError> {
    let contents = fs::read_to_string(json_path).map_err(|source| DatasetError::Io {
        path: json_path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| DatasetError::Parse {
        path: json_path.to_path_buf(),
        source,
    })
}

/// Records that reference an image, in input order.
pub fn filter_data(data: &[Record]) -> Vec<&Record> {
    data.iter().filter(|r| r.has_image()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(v: Value) -> Vec<Record> {
        serde_json::from_value(v).expect("valid records")
    }

    #[test]
    fn filter_keeps_image_records_in_order() {
        let data = records(json!([
            {"id": "a", "image": "a.png"},
            {"id": "b"},
            {"id": "c", "image": ""},
            {"id": "d", "image": "d.jpg", "conversations": []},
            {"id": "e", "image": null},
        ]));
        let filtered = filter_data(&data);
        let ids: Vec<&str> = filtered
            .iter()
            .map(|r| r.extra["id"].as_str().unwrap_or_default())
            .collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert!(filtered.len() <= data.len());
    }

    #[test]
    fn filter_of_empty_is_empty() {
        assert!(filter_data(&[]).is_empty());
    }

    #[test]
    fn extra_keys_are_retained() {
        let data = records(json!([{
            "id": "x",
            "image": "x.png",
            "conversations": [{"from": "human", "value": "hello"}]
        }]));
        let turn = &data[0].turns()[0];
        assert_eq!(turn.value, "hello");
        assert_eq!(turn.extra["from"], json!("human"));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_data(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }

    #[test]
    fn non_array_is_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        fs::write(&path, r#"{"image": "a.png"}"#).expect("write");
        let err = load_data(&path).unwrap_err();
        assert!(matches!(err, DatasetError::Parse { .. }));
    }
}
