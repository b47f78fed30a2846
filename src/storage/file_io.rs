//! File I/O utilities with atomic writes
//!
//! Safe JSON persistence for the session cache, and payload loading for the
//! report commands (a file path, or `-` for stdin).

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::CarteiraError;

/// Source name that means "read standard input"
pub const STDIN_SOURCE: &str = "-";

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, CarteiraError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| CarteiraError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| CarteiraError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or left untouched.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), CarteiraError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CarteiraError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory, so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| CarteiraError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| CarteiraError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| CarteiraError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| CarteiraError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        CarteiraError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Parse a saved backend payload from any reader
pub fn read_payload_from<R: Read>(reader: R, source: &str) -> Result<Value, CarteiraError> {
    let value: Value = serde_json::from_reader(BufReader::new(reader))
        .map_err(|e| CarteiraError::Validation(format!("{} is not valid JSON: {}", source, e)))?;
    debug!(source, "payload loaded");
    Ok(value)
}

/// Load a saved backend payload from a file path, or stdin for `-`
pub fn read_payload(source: &str) -> Result<Value, CarteiraError> {
    if source == STDIN_SOURCE {
        return read_payload_from(io::stdin().lock(), "stdin");
    }

    let path = Path::new(source);
    if !path.exists() {
        return Err(CarteiraError::file_not_found(source));
    }

    let file = File::open(path)
        .map_err(|e| CarteiraError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;
    read_payload_from(file, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct Cache {
        name: String,
        value: i32,
    }

    #[test]
    fn test_read_nonexistent_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let data: Cache = read_json(&path).unwrap();
        assert_eq!(data, Cache::default());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("session.json");

        let data = Cache {
            name: "Ana".to_string(),
            value: 42,
        };

        write_json_atomic(&path, &data).unwrap();
        assert!(path.exists());
        assert!(!temp_dir.path().join("nested").join("session.json.tmp").exists());

        let loaded: Cache = read_json(&path).unwrap();
        assert_eq!(data, loaded);
    }

    #[test]
    fn test_read_corrupt_file_is_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_json::<Cache, _>(&path).unwrap_err();
        assert!(matches!(err, CarteiraError::Storage(_)));
    }

    #[test]
    fn test_read_payload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("categorias.json");
        fs::write(&path, r#"[{"id": 1, "name": "Renda"}]"#).unwrap();

        let value = read_payload(path.to_str().unwrap()).unwrap();
        assert_eq!(value[0]["name"], "Renda");

        let missing = read_payload(temp_dir.path().join("nope.json").to_str().unwrap());
        assert!(missing.unwrap_err().is_not_found());
    }

    #[test]
    fn test_read_payload_from_reader() {
        let value = read_payload_from(&b"{\"total_entries\": 10}"[..], "test").unwrap();
        assert_eq!(value["total_entries"], 10);

        let err = read_payload_from(&b"oops"[..], "test").unwrap_err();
        assert!(err.is_validation());
    }
}
