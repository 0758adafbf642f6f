use crate::i18n::Language;
use crate::model::{Collection, Preferences};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "quickstart";
const POINTER_FILE: &str = "path_pointer.txt";
const DEFAULT_DATA_FILE: &str = "my_shortcuts.json";

/// Per-user application directory. Created lazily by the save paths.
pub fn app_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Fixed location of the pointer file. Everything else is relocatable; this
/// one file is how a fresh process finds the rest.
pub fn pointer_path() -> PathBuf {
    app_dir().join(POINTER_FILE)
}

pub fn default_data_file() -> PathBuf {
    app_dir().join(DEFAULT_DATA_FILE)
}

pub fn default_prefs() -> Preferences {
    Preferences {
        data_file: default_data_file(),
        language: Language::detect(),
        auto_select: true,
    }
}

/// Read preferences from the pointer file. Never fails: a missing or mangled
/// record falls back to defaults, field by field.
pub fn load_prefs() -> Preferences {
    load_prefs_from(&pointer_path())
}

pub(crate) fn load_prefs_from(pointer: &Path) -> Preferences {
    match fs::read_to_string(pointer) {
        Ok(line) => parse_pointer_line(&line, default_prefs()),
        Err(_) => default_prefs(),
    }
}

/// Parse a `path|lang|auto_select` record. Each field recovers on its own:
/// a record that only names the data file still honors that path while the
/// other two keep their defaults.
pub(crate) fn parse_pointer_line(line: &str, defaults: Preferences) -> Preferences {
    let mut prefs = defaults;
    let mut fields = line.trim().split('|');
    if let Some(path) = fields.next() {
        if !path.trim().is_empty() {
            prefs.data_file = PathBuf::from(path.trim());
        }
    }
    if let Some(code) = fields.next() {
        if let Some(lang) = Language::from_code(code) {
            prefs.language = lang;
        }
    }
    if let Some(flag) = fields.next() {
        if let Some(auto) = parse_bool_field(flag) {
            prefs.auto_select = auto;
        }
    }
    prefs
}

// Earlier releases wrote `True`/`False`; keep reading those.
fn parse_bool_field(field: &str) -> Option<bool> {
    match field.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

pub(crate) fn format_pointer_line(prefs: &Preferences) -> String {
    format!(
        "{}|{}|{}",
        prefs.data_file.display(),
        prefs.language.code(),
        prefs.auto_select
    )
}

/// Rewrite the pointer record. Callers treat failure as non-fatal; the
/// running session keeps its in-memory preferences either way.
pub fn save_prefs(prefs: &Preferences) -> Result<()> {
    save_prefs_to(&pointer_path(), prefs)
}

pub(crate) fn save_prefs_to(pointer: &Path, prefs: &Preferences) -> Result<()> {
    ensure_parent(pointer)?;
    fs::write(pointer, format_pointer_line(prefs))
        .with_context(|| format!("write {}", pointer.display()))
}

/// Load the collection stored at `path`. Absent or malformed files read as
/// an empty collection so a bad data file never blocks startup.
pub fn load_entries(path: &Path) -> Collection {
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).unwrap_or_default(),
        Err(_) => Collection::default(),
    }
}

/// Write the collection as indented JSON. Key order is the display order;
/// non-ASCII names are written literally, not escaped.
pub fn save_entries(path: &Path, entries: &Collection) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(entries).context("serialize shortcuts")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))
}

/// Copy the current data file ahead of switching to a new location. Best
/// effort: the caller proceeds to the new path even when the copy fails, and
/// a source that never existed is not an error.
pub fn relocate_entries(old: &Path, new: &Path) -> Result<()> {
    if old == new || !old.exists() {
        return Ok(());
    }
    ensure_parent(new)?;
    fs::copy(old, new)
        .map(|_| ())
        .with_context(|| format!("copy {} to {}", old.display(), new.display()))
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }
    Ok(())
}
