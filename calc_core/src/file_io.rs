//! # File I/O Module
//!
//! Writes exported artifacts (PDF, XLSX, JSON, settings) and reads job files.
//!
//! - **Atomic writes**: Write to `<name>.tmp`, sync, rename over the target,
//!   so an interrupted export never leaves a half-written report
//! - **Parent directories** are created on demand
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::write_atomic;
//! use std::path::Path;
//!
//! write_atomic(Path::new("informes/presupuesto.xlsx"), b"...")?;
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;

use crate::errors::{CalcError, CalcResult};

/// Sibling temp path: `report.pdf` → `report.pdf.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("artifact"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write bytes to `path` atomically.
///
/// # Errors
///
/// `FileError` naming the failed step (create dir, create temp file,
/// write, sync, rename).
pub fn write_atomic(path: &Path, bytes: &[u8]) -> CalcResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            CalcError::file_error("create directory", parent.display().to_string(), e.to_string())
        })?;
    }

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(bytes).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "artifact written");
    Ok(())
}

/// Serialize `value` as pretty JSON and write it atomically.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_atomic(path, json.as_bytes())
}

/// Read and deserialize a JSON file.
///
/// # Errors
///
/// `FileError` if the file cannot be read, `SerializationError` if the
/// JSON does not match `T`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> CalcResult<T> {
    let text = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;

    use crate::calculations::{CalculationItem, StairCostInput};

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("forja_test_{}", name))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/out/informe.pdf")),
            Path::new("/out/informe.pdf.tmp")
        );
    }

    #[test]
    fn test_atomic_write_leaves_no_tmp_file() {
        let path = temp_path("atomic.bin");
        write_atomic(&path, b"%PDF-1.7 test").unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7 test");

        // Overwrite replaces the content
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = temp_path("nested_dir");
        let path = dir.join("a").join("b.txt");
        let _ = fs::remove_dir_all(&dir);

        write_atomic(&path, b"ok").unwrap();
        assert!(path.exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_json_roundtrip() {
        let path = temp_path("job.json");
        let item = CalculationItem::StairCost(StairCostInput::default());

        write_json(&path, &item).unwrap();
        let loaded: CalculationItem = read_json(&path).unwrap();
        assert_eq!(loaded, item);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_read_errors() {
        let missing = temp_path("missing.json");
        let _ = fs::remove_file(&missing);
        let err = read_json::<CalculationItem>(&missing).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");

        let bad = temp_path("bad.json");
        fs::write(&bad, "{\"type\": \"Bridge\"}").unwrap();
        let err = read_json::<CalculationItem>(&bad).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&bad);
    }
}
