use crate::i18n::Language;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Preferences tracked by the pointer file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub data_file: PathBuf,
    pub language: Language,
    pub auto_select: bool,
}

/// The shortcut list: display name mapped to an absolute target path.
///
/// Serializes as a bare JSON object whose key order is the display order,
/// so the file stays hand-editable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection(IndexMap<String, String>);

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert or overwrite. An existing name keeps its position in the list;
    /// only the target path is replaced.
    pub fn insert(&mut self, name: impl Into<String>, path: impl Into<String>) {
        self.0.insert(name.into(), path.into());
    }

    /// Add `path` under its final component as the display name. Returns the
    /// name used, or None when the path has no usable final component.
    pub fn add_path(&mut self, path: &str) -> Option<String> {
        let name = Path::new(path).file_name()?.to_string_lossy().into_owned();
        self.0.insert(name.clone(), path.to_string());
        Some(name)
    }

    /// Remove by name. The remaining entries keep their relative order.
    pub fn remove(&mut self, name: &str) -> bool {
        self.0.shift_remove(name).is_some()
    }

    /// Move the entry at `from` so it sits at `to`, shifting the rows in
    /// between.
    pub fn move_entry(&mut self, from: usize, to: usize) -> bool {
        if from == to || from >= self.0.len() || to >= self.0.len() {
            return false;
        }
        self.0.move_index(from, to);
        true
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn get_index(&self, index: usize) -> Option<(&str, &str)> {
        self.0.get_index(index).map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.get_index_of(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.keys().map(String::as_str)
    }
}

/// How a target should be decorated in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Missing,
    Directory,
    Executable,
    File,
}

/// Probe a target path. Anything unreadable counts as missing; the entry
/// itself stays in the list either way.
pub fn classify(path: &Path) -> EntryKind {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(_) => return EntryKind::Missing,
    };
    if meta.is_dir() {
        EntryKind::Directory
    } else if is_executable(path, &meta) {
        EntryKind::Executable
    } else {
        EntryKind::File
    }
}

#[cfg(unix)]
fn is_executable(_path: &Path, meta: &std::fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(path: &Path, _meta: &std::fs::Metadata) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ["exe", "bat", "cmd", "com", "lnk"].iter().any(|k| ext.eq_ignore_ascii_case(k))
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_of(c: &Collection) -> Vec<&str> {
        c.names().collect()
    }

    #[test]
    fn insert_keeps_position_on_overwrite() {
        let mut c = Collection::new();
        c.insert("a", "/old/a");
        c.insert("b", "/data/b");
        c.insert("a", "/new/a");
        assert_eq!(names_of(&c), vec!["a", "b"]);
        assert_eq!(c.get("a"), Some("/new/a"));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn add_path_uses_final_component() {
        let mut c = Collection::new();
        assert_eq!(c.add_path("/home/u/docs/report.pdf").as_deref(), Some("report.pdf"));
        assert_eq!(c.add_path("/home/u/音乐/").as_deref(), Some("音乐"));
        assert_eq!(c.get("report.pdf"), Some("/home/u/docs/report.pdf"));
        assert_eq!(c.get("音乐"), Some("/home/u/音乐/"));
    }

    #[test]
    fn add_path_rejects_rootlike_paths() {
        let mut c = Collection::new();
        assert_eq!(c.add_path("/"), None);
        assert!(c.is_empty());
    }

    #[test]
    fn remove_preserves_remaining_order() {
        let mut c = Collection::new();
        c.insert("a", "/a");
        c.insert("b", "/b");
        c.insert("c", "/c");
        assert!(c.remove("b"));
        assert!(!c.remove("b"));
        assert_eq!(names_of(&c), vec!["a", "c"]);
    }

    #[test]
    fn move_entry_shifts_rows() {
        let mut c = Collection::new();
        c.insert("x", "/x");
        c.insert("y", "/y");
        c.insert("z", "/z");
        assert!(c.move_entry(0, 2));
        assert_eq!(names_of(&c), vec!["y", "z", "x"]);
        assert!(c.move_entry(2, 1));
        assert_eq!(names_of(&c), vec!["y", "x", "z"]);
        assert!(!c.move_entry(1, 1));
        assert!(!c.move_entry(5, 0));
    }

    #[test]
    fn index_lookups_match_iteration_order() {
        let mut c = Collection::new();
        c.insert("a", "/a");
        c.insert("b", "/b");
        assert_eq!(c.get_index(1), Some(("b", "/b")));
        assert_eq!(c.index_of("b"), Some(1));
        assert_eq!(c.get_index(2), None);
    }

    #[test]
    fn classify_reports_missing_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "hi").unwrap();

        assert_eq!(classify(dir.path()), EntryKind::Directory);
        assert_eq!(classify(&dir.path().join("gone.txt")), EntryKind::Missing);
        assert_eq!(classify(&file), EntryKind::File);
    }

    #[cfg(unix)]
    #[test]
    fn classify_detects_executables() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("tool.sh");
        std::fs::write(&tool, "#!/bin/sh\n").unwrap();
        std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();
        assert_eq!(classify(&tool), EntryKind::Executable);
    }
}
