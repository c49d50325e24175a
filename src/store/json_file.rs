use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::TasquestError;
use crate::models::Document;
use crate::store::DocumentStore;

/// Pretty-printed JSON file. Saves go through a temp file in the same
/// directory and a rename, so readers never see a half-written document.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty document if the file is missing.
    /// Returns true when a new file was written.
    pub fn ensure_exists(&self) -> Result<bool, TasquestError> {
        if self.path.exists() {
            return Ok(false);
        }
        self.save(&Document::default())?;
        Ok(true)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn try_load(&self) -> Result<Option<Document>, TasquestError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let doc = serde_json::from_str(&raw).map_err(|e| {
            TasquestError::persistence(format!("{}: {e}", self.path.display()))
        })?;
        Ok(Some(doc))
    }

    fn save(&self, doc: &Document) -> Result<(), TasquestError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, doc)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)?;
        tracing::debug!(path = %self.path.display(), "document saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goal, Milestone, Task};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn sample() -> Document {
        let mut child = Task::new("bbbbbb".into(), "child", Some("aaaaaa".into()), None);
        child.completed = true;
        child.completed_at = Some(Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap());
        let mut goal = Goal::new(
            "gggggg".into(),
            "TOEIC 900",
            Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap(),
        );
        goal.milestones.push(Milestone::new("mmmmmm".into(), "800"));
        Document {
            tasks: vec![
                Task::new(
                    "aaaaaa".into(),
                    "root",
                    None,
                    crate::models::parse_deadline("2025-06-01T18:00"),
                ),
                child,
            ],
            goals: vec![goal],
            points: 7,
        }
    }

    #[test]
    fn round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("tasks.json"));
        let doc = sample();
        store.save(&doc).unwrap();
        assert_eq!(store.try_load().unwrap(), Some(doc.clone()));
        let again = store.load();
        store.save(&again).unwrap();
        assert_eq!(store.load(), doc);
    }

    #[test]
    fn offset_and_fractional_deadlines_survive_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        let deadlines = ["2025-06-01T09:00:00+09:00", "2025-06-01T09:30:00.500Z"];
        let doc = Document {
            tasks: deadlines
                .iter()
                .enumerate()
                .map(|(i, raw)| {
                    let deadline = crate::models::parse_deadline(raw);
                    assert!(deadline.is_some(), "{raw} should parse");
                    Task::new(format!("task0{i}"), "due", None, deadline)
                })
                .collect(),
            ..Default::default()
        };
        store.save(&doc).unwrap();
        assert_eq!(store.try_load().unwrap(), Some(doc));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"2025-06-01T09:00\""));
        assert!(raw.contains("\"2025-06-01T09:30\""));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        assert_eq!(store.try_load().unwrap(), None);
        assert_eq!(store.load(), Document::default());
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.try_load().is_err());
        assert_eq!(store.load(), Document::default());
    }

    #[test]
    fn ensure_exists_writes_once() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("d").join("tasks.json"));
        assert!(store.ensure_exists().unwrap());
        assert!(!store.ensure_exists().unwrap());
        let raw = fs::read_to_string(store.path()).unwrap();
        let v: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(v["points"], 0);
        assert!(v["tasks"].as_array().unwrap().is_empty());
    }
}
