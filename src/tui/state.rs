use crate::i18n::Messages;
use crate::model::{Collection, Preferences};
use ratatui::{
    style::Color,
    style::Style,
    text::{Line, Span},
};
use std::collections::HashSet;
use std::path::Path;

/// What the bottom input line is collecting, if anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    None,
    AddPath,
    DataFile,
}

pub struct UiState {
    pub tab: usize,
    pub prefs: Preferences,
    pub entries: Collection,

    // List cursor and the marked set. Marks are by name so they survive
    // reordering.
    pub selected: usize,
    pub marked: HashSet<String>,

    pub info: String,
    pub prompt: Prompt,
    pub input: String,
}

impl UiState {
    pub fn new(prefs: Preferences, entries: Collection) -> Self {
        let mut state = Self {
            tab: 0,
            prefs,
            entries,
            selected: 0,
            marked: HashSet::new(),
            info: String::new(),
            prompt: Prompt::None,
            input: String::new(),
        };
        // Auto-select applies once, at startup. Reloads never re-mark.
        if state.prefs.auto_select {
            state.mark_all();
        }
        state
    }

    pub fn messages(&self) -> &'static Messages {
        self.prefs.language.messages()
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    pub fn clamp_selection(&mut self) {
        if self.selected >= self.entries.len() {
            self.selected = self.entries.len().saturating_sub(1);
        }
    }

    pub fn selected_entry(&self) -> Option<(&str, &str)> {
        self.entries.get_index(self.selected)
    }

    pub fn toggle_mark(&mut self) {
        if let Some((name, _)) = self.entries.get_index(self.selected) {
            let name = name.to_string();
            if !self.marked.remove(&name) {
                self.marked.insert(name);
            }
        }
    }

    pub fn mark_all(&mut self) {
        self.marked = self.entries.names().map(str::to_string).collect();
    }

    pub fn clear_marks(&mut self) {
        self.marked.clear();
    }

    /// Drop marks that no longer name an entry, after a reload or relocate.
    pub fn retain_valid_marks(&mut self) {
        let entries = &self.entries;
        self.marked.retain(|name| entries.get(name).is_some());
    }

    /// The rows the next launch or delete applies to: the marked set in list
    /// order, or the cursor row when nothing is marked.
    pub fn selection(&self) -> Vec<(String, String)> {
        if self.marked.is_empty() {
            return self
                .selected_entry()
                .map(|(n, p)| vec![(n.to_string(), p.to_string())])
                .unwrap_or_default();
        }
        self.entries
            .iter()
            .filter(|(name, _)| self.marked.contains(*name))
            .map(|(n, p)| (n.to_string(), p.to_string()))
            .collect()
    }

    /// Remove the current selection. Returns how many rows went away; the
    /// cursor clamps to the shortened list.
    pub fn delete_selection(&mut self) -> usize {
        let doomed = self.selection();
        for (name, _) in &doomed {
            self.entries.remove(name);
            self.marked.remove(name);
        }
        self.clamp_selection();
        doomed.len()
    }

    /// Move the cursor row one step up or down; the cursor follows the row.
    pub fn move_selected(&mut self, delta: isize) -> bool {
        let len = self.entries.len();
        if len < 2 {
            return false;
        }
        let from = self.selected;
        let to = from as isize + delta;
        if to < 0 || to as usize >= len {
            return false;
        }
        let to = to as usize;
        if !self.entries.move_entry(from, to) {
            return false;
        }
        self.selected = to;
        true
    }

    /// Insert an entry for every candidate path in a drop or paste payload
    /// that exists on disk. Returns the number inserted.
    pub fn add_dropped(&mut self, payload: &str) -> usize {
        let mut candidates = parse_drop_payload(payload);
        // Some emulators paste a spaced path with no quoting at all. When
        // nothing from the split exists but the raw line does, take it whole.
        if !candidates.iter().any(|p| Path::new(p).exists()) {
            let whole = payload.trim();
            let whole = whole.strip_prefix("file://").unwrap_or(whole);
            if !whole.is_empty() && Path::new(whole).exists() {
                candidates = vec![whole.to_string()];
            }
        }

        let mut added = 0;
        for path in candidates {
            if !Path::new(&path).exists() {
                continue;
            }
            if self.entries.add_path(&path).is_some() {
                added += 1;
            }
        }
        added
    }
}

/// Split a drop/paste payload into candidate paths. Terminals deliver
/// dropped files as pasted text: whitespace-separated, quoted when the path
/// contains spaces, sometimes `file://`-prefixed, with backslash escapes on
/// Linux.
pub fn parse_drop_payload(payload: &str) -> Vec<String> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for ch in payload.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if quote != Some('\'') => escaped = true,
            '\'' | '"' => {
                if quote == Some(ch) {
                    quote = None;
                } else if quote.is_none() {
                    quote = Some(ch);
                } else {
                    current.push(ch);
                }
            }
            c if c.is_whitespace() && quote.is_none() => take_path(&mut current, &mut paths),
            c => current.push(c),
        }
    }
    take_path(&mut current, &mut paths);
    paths
}

fn take_path(buf: &mut String, out: &mut Vec<String>) {
    if buf.is_empty() {
        return;
    }
    let path = buf.strip_prefix("file://").unwrap_or(buf.as_str());
    out.push(path.to_string());
    buf.clear();
}

pub fn push_wrapped_status_kv(
    out: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    status_area_width: u16,
) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    // Account for borders (2 chars on each side)
    let usable_width = status_area_width.saturating_sub(4).max(1);
    let label_text = format!("{label}:");
    let label_width = label_text.chars().count() as u16;

    let value_chars: Vec<char> = value.chars().collect();
    let mut remaining = value_chars.as_slice();
    let mut first = true;

    while !remaining.is_empty() {
        let line_width = if first {
            usable_width.saturating_sub(label_width + 1).max(1)
        } else {
            usable_width.saturating_sub(2).max(1)
        };

        let chars_to_take = (remaining.len() as u16).min(line_width) as usize;
        let (line_chars, rest) = remaining.split_at(chars_to_take);
        let line_text: String = line_chars.iter().collect();

        if first {
            out.push(Line::from(vec![
                Span::styled(label_text.clone(), Style::default().fg(Color::Gray)),
                Span::raw(" "),
                Span::raw(line_text),
            ]));
            first = false;
        } else {
            out.push(Line::from(vec![Span::raw("  "), Span::raw(line_text)]));
        }

        remaining = rest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use std::path::PathBuf;

    fn prefs(auto_select: bool) -> Preferences {
        Preferences {
            data_file: PathBuf::from("/tmp/list.json"),
            language: Language::En,
            auto_select,
        }
    }

    fn three_entries() -> Collection {
        let mut c = Collection::new();
        c.insert("a", "/a");
        c.insert("b", "/b");
        c.insert("c", "/c");
        c
    }

    #[test]
    fn auto_select_marks_everything_once() {
        let state = UiState::new(prefs(true), three_entries());
        assert_eq!(state.marked.len(), 3);

        let state = UiState::new(prefs(false), three_entries());
        assert!(state.marked.is_empty());
    }

    #[test]
    fn cursor_stays_inside_the_list() {
        let mut state = UiState::new(prefs(false), three_entries());
        state.select_prev();
        assert_eq!(state.selected, 0);
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected, 2);
    }

    #[test]
    fn selection_falls_back_to_cursor_row() {
        let mut state = UiState::new(prefs(false), three_entries());
        state.selected = 1;
        assert_eq!(state.selection(), vec![("b".to_string(), "/b".to_string())]);

        state.toggle_mark();
        state.selected = 0;
        state.toggle_mark();
        // Marked rows come back in list order, not mark order.
        let names: Vec<String> = state.selection().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn toggle_mark_flips() {
        let mut state = UiState::new(prefs(false), three_entries());
        state.toggle_mark();
        assert!(state.marked.contains("a"));
        state.toggle_mark();
        assert!(state.marked.is_empty());
    }

    #[test]
    fn delete_selection_clamps_cursor() {
        let mut state = UiState::new(prefs(false), three_entries());
        state.selected = 2;
        assert_eq!(state.delete_selection(), 1);
        assert_eq!(state.entries.len(), 2);
        assert_eq!(state.selected, 1);

        state.mark_all();
        assert_eq!(state.delete_selection(), 2);
        assert!(state.entries.is_empty());
        assert_eq!(state.selected, 0);
        assert!(state.marked.is_empty());
    }

    #[test]
    fn delete_on_empty_list_is_a_no_op() {
        let mut state = UiState::new(prefs(false), Collection::new());
        assert_eq!(state.delete_selection(), 0);
    }

    #[test]
    fn move_selected_carries_the_cursor() {
        let mut state = UiState::new(prefs(false), three_entries());
        state.selected = 0;
        assert!(state.move_selected(1));
        assert_eq!(state.selected, 1);
        assert_eq!(state.entries.names().collect::<Vec<_>>(), vec!["b", "a", "c"]);

        assert!(state.move_selected(-1));
        assert_eq!(state.selected, 0);
        assert_eq!(state.entries.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert!(!state.move_selected(-1));
    }

    #[test]
    fn marks_survive_reordering() {
        let mut state = UiState::new(prefs(false), three_entries());
        state.toggle_mark(); // marks "a"
        state.move_selected(1);
        state.move_selected(1);
        assert!(state.marked.contains("a"));
        let names: Vec<String> = state.selection().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a"]);
    }

    #[test]
    fn retain_valid_marks_drops_stale_names() {
        let mut state = UiState::new(prefs(true), three_entries());
        let mut fresh = Collection::new();
        fresh.insert("b", "/b");
        state.entries = fresh;
        state.retain_valid_marks();
        assert_eq!(state.marked.len(), 1);
        assert!(state.marked.contains("b"));
    }

    #[test]
    fn payload_splits_on_whitespace_and_quotes() {
        assert_eq!(
            parse_drop_payload("/tmp/a.txt /tmp/b.txt"),
            vec!["/tmp/a.txt", "/tmp/b.txt"]
        );
        assert_eq!(
            parse_drop_payload("'/tmp/with space.txt' \"/tmp/other file\""),
            vec!["/tmp/with space.txt", "/tmp/other file"]
        );
        assert_eq!(
            parse_drop_payload("/tmp/with\\ space.txt"),
            vec!["/tmp/with space.txt"]
        );
        assert_eq!(
            parse_drop_payload("file:///tmp/a.txt\nfile:///tmp/b.txt"),
            vec!["/tmp/a.txt", "/tmp/b.txt"]
        );
        assert!(parse_drop_payload("   \n ").is_empty());
    }

    #[test]
    fn add_dropped_filters_to_real_paths() {
        let dir = tempfile::tempdir().unwrap();
        let real = dir.path().join("real.txt");
        std::fs::write(&real, "x").unwrap();

        let mut state = UiState::new(prefs(false), Collection::new());
        let payload = format!("{} /no/such/file", real.display());
        assert_eq!(state.add_dropped(&payload), 1);
        assert_eq!(state.entries.get("real.txt"), Some(real.to_str().unwrap()));
    }

    #[test]
    fn add_dropped_takes_unquoted_spaced_path_whole() {
        let dir = tempfile::tempdir().unwrap();
        let spaced = dir.path().join("two words.txt");
        std::fs::write(&spaced, "x").unwrap();

        let mut state = UiState::new(prefs(false), Collection::new());
        assert_eq!(state.add_dropped(&spaced.display().to_string()), 1);
        assert_eq!(state.entries.len(), 1);
        assert!(state.entries.get("two words.txt").is_some());
    }

    #[test]
    fn wrapped_kv_splits_long_values() {
        let mut lines = Vec::new();
        push_wrapped_status_kv(&mut lines, "Target", &"x".repeat(100), 40);
        assert!(lines.len() > 1);

        let mut lines = Vec::new();
        push_wrapped_status_kv(&mut lines, "Target", "  ", 40);
        assert!(lines.is_empty());
    }
}
