//! Atomic JSON writes

use crate::StoreError;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize `value` as pretty JSON and move it into place atomically.
///
/// The temp file is created in the target's parent directory so the
/// final rename stays on one filesystem.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(&mut tmp, value)?;
    tmp.write_all(b"\n")?;
    tmp.persist(path)
        .map_err(|e| StoreError::Persist(format!("{}: {}", path.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/c.json");

        write_json_atomic(&path, &json!({"ok": true})).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"ok\""));
        assert!(contents.ends_with('\n'));
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.json");

        write_json_atomic(&path, &json!({"v": 1})).unwrap();
        write_json_atomic(&path, &json!({"v": 2})).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"v\": 2"));
        assert!(!contents.contains("\"v\": 1"));
    }
}
