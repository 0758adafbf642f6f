mod clipboard;
mod help;
mod state;

use crate::launch;
use crate::model::{classify, EntryKind, Preferences};
use crate::storage;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Terminal,
};
use state::{push_wrapped_status_kv, Prompt, UiState};
use std::io;
use std::path::Path;
use std::time::Duration;

pub fn run(prefs: Preferences) -> Result<()> {
    let entries = storage::load_entries(&prefs.data_file);
    let mut state = UiState::new(prefs, entries);

    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    // Bracketed paste is how terminals deliver drag-and-dropped files.
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let res = loop {
        terminal.draw(|f| draw(f.area(), f, &state)).ok();

        // Input drives every mutation, so a generous poll keeps the loop
        // idle between keystrokes.
        if !event::poll(Duration::from_millis(250)).unwrap_or(false) {
            continue;
        }
        let ev = match event::read() {
            Ok(ev) => ev,
            Err(_) => continue,
        };

        match ev {
            Event::Paste(payload) => {
                if state.prompt != Prompt::None {
                    state.input.push_str(payload.trim());
                } else {
                    handle_drop(&mut state, &payload);
                }
            }
            Event::Key(k) => {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if state.prompt != Prompt::None {
                    handle_prompt_key(&mut state, k);
                    continue;
                }
                match (k.modifiers, k.code) {
                    (_, KeyCode::Char('q')) | (KeyModifiers::CONTROL, KeyCode::Char('c')) => {
                        break Ok(());
                    }
                    (_, KeyCode::Tab) => {
                        state.tab = (state.tab + 1) % 3;
                    }
                    (_, KeyCode::Char('?')) => {
                        state.tab = 2;
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('a')) => {
                        if state.tab == 0 {
                            state.mark_all();
                        }
                    }
                    (KeyModifiers::SHIFT, KeyCode::Up) | (_, KeyCode::Char('K')) => {
                        if state.tab == 0 && state.move_selected(-1) {
                            persist_entries(&mut state);
                        }
                    }
                    (KeyModifiers::SHIFT, KeyCode::Down) | (_, KeyCode::Char('J')) => {
                        if state.tab == 0 && state.move_selected(1) {
                            persist_entries(&mut state);
                        }
                    }
                    (_, KeyCode::Up) | (_, KeyCode::Char('k')) => {
                        if state.tab == 0 {
                            state.select_prev();
                        }
                    }
                    (_, KeyCode::Down) | (_, KeyCode::Char('j')) => {
                        if state.tab == 0 {
                            state.select_next();
                        }
                    }
                    (_, KeyCode::Char(' ')) => {
                        if state.tab == 0 {
                            state.toggle_mark();
                        }
                    }
                    (_, KeyCode::Esc) => {
                        if state.tab == 0 {
                            state.clear_marks();
                        }
                    }
                    (_, KeyCode::Enter) => {
                        if state.tab == 0 {
                            launch_selection(&mut state);
                        }
                    }
                    (_, KeyCode::Delete) | (_, KeyCode::Char('d')) => {
                        if state.tab == 0 {
                            let removed = state.delete_selection();
                            if removed > 0 && persist_entries(&mut state) {
                                state.info =
                                    format!("{} {removed}", state.messages().deleted);
                            }
                        }
                    }
                    (_, KeyCode::Char('y')) => {
                        if state.tab == 0 {
                            copy_selected_path(&mut state);
                        }
                    }
                    (_, KeyCode::Char('i')) => {
                        if state.tab == 0 {
                            state.prompt = Prompt::AddPath;
                            state.input.clear();
                        }
                    }
                    (_, KeyCode::Char('r')) => {
                        if state.tab == 0 {
                            reload_entries(&mut state);
                        }
                    }
                    (_, KeyCode::Char('a')) => {
                        state.prefs.auto_select = !state.prefs.auto_select;
                        let _ = storage::save_prefs(&state.prefs);
                        let m = state.messages();
                        state.info = format!(
                            "{}: {}",
                            m.auto_select_label,
                            if state.prefs.auto_select {
                                m.on_label
                            } else {
                                m.off_label
                            }
                        );
                    }
                    (_, KeyCode::Char('l')) => {
                        state.prefs.language = state.prefs.language.toggle();
                        let _ = storage::save_prefs(&state.prefs);
                        let m = state.messages();
                        state.info =
                            format!("{}: {}", m.language_label, state.prefs.language.label());
                    }
                    (_, KeyCode::Char('s')) => {
                        state.prompt = Prompt::DataFile;
                        state.input = state.prefs.data_file.display().to_string();
                    }
                    (_, KeyCode::Char('o')) => {
                        open_data_folder(&state);
                    }
                    _ => {}
                }
            }
            _ => {}
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen).ok();
    res
}

/// Write the list back to disk. On failure the info line reports it and the
/// in-memory list stays as the user arranged it.
fn persist_entries(state: &mut UiState) -> bool {
    match storage::save_entries(&state.prefs.data_file, &state.entries) {
        Ok(()) => true,
        Err(e) => {
            state.info = format!("{}: {e:#}", state.messages().save_failed);
            false
        }
    }
}

fn handle_drop(state: &mut UiState, payload: &str) {
    let added = state.add_dropped(payload);
    if added == 0 {
        state.info = state.messages().nothing_added.to_string();
        return;
    }
    if persist_entries(state) {
        state.info = format!("{} {added}", state.messages().added);
    }
}

fn handle_prompt_key(state: &mut UiState, k: KeyEvent) {
    match k.code {
        KeyCode::Esc => {
            state.prompt = Prompt::None;
            state.input.clear();
        }
        KeyCode::Enter => {
            let purpose = state.prompt;
            let text = state.input.trim().to_string();
            state.prompt = Prompt::None;
            state.input.clear();
            if !text.is_empty() {
                commit_prompt(state, purpose, &text);
            }
        }
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Char(c) if !k.modifiers.contains(KeyModifiers::CONTROL) => {
            state.input.push(c);
        }
        _ => {}
    }
}

fn commit_prompt(state: &mut UiState, purpose: Prompt, text: &str) {
    match purpose {
        Prompt::AddPath => handle_drop(state, text),
        Prompt::DataFile => change_data_file(state, Path::new(text)),
        Prompt::None => {}
    }
}

/// Launch everything in the current selection with the OS default handler.
/// Failures are ignored; a stale row keeps its warning icon.
fn launch_selection(state: &mut UiState) {
    for (_, path) in state.selection() {
        let _ = launch::open_path(Path::new(&path));
    }
}

fn copy_selected_path(state: &mut UiState) {
    let path = match state.selected_entry() {
        Some((_, path)) => path.to_string(),
        None => return,
    };
    let m = state.messages();
    match clipboard::copy_to_clipboard(&path) {
        Ok(()) => {
            let display_path = if path.chars().count() > 60 {
                let head: String = path.chars().take(57).collect();
                format!("{head}...")
            } else {
                path
            };
            state.info = format!("✓ {}: {display_path}", m.copied);
        }
        Err(e) => {
            state.info = format!("{}: {e:#}", m.copy_failed);
        }
    }
}

/// Re-read the data file, keeping marks for names that still exist.
/// Auto-select does not re-apply here.
fn reload_entries(state: &mut UiState) {
    let old_count = state.entries.len();
    state.entries = storage::load_entries(&state.prefs.data_file);
    state.retain_valid_marks();
    state.clamp_selection();
    let new_count = state.entries.len();
    let m = state.messages();
    state.info = if new_count >= old_count {
        format!("{} (+{})", m.reloaded, new_count - old_count)
    } else {
        format!("{} (-{})", m.reloaded, old_count - new_count)
    };
}

/// Point the pointer file at a new data file, copying the current one there
/// first so nothing is lost in the move.
fn change_data_file(state: &mut UiState, new_path: &Path) {
    let new_path = new_path.to_path_buf();
    let old_path = state.prefs.data_file.clone();
    if new_path == old_path {
        return;
    }

    // Flush the current list so the copy below picks it up. Both steps are
    // best effort; switching proceeds even when they fail.
    let _ = storage::save_entries(&old_path, &state.entries);
    let _ = storage::relocate_entries(&old_path, &new_path);

    state.prefs.data_file = new_path;
    let _ = storage::save_prefs(&state.prefs);
    state.entries = storage::load_entries(&state.prefs.data_file);
    state.retain_valid_marks();
    state.clamp_selection();
    state.info = format!(
        "{}: {}",
        state.messages().data_file_label,
        state.prefs.data_file.display()
    );
}

fn open_data_folder(state: &UiState) {
    let dir = match state.prefs.data_file.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => storage::app_dir(),
    };
    let _ = launch::reveal_dir(&dir);
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let m = state.messages();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(7),
            ]
            .as_ref(),
        )
        .split(area);

    let tabs = Tabs::new(vec![
        Line::from(m.tab_shortcuts),
        Line::from(m.tab_settings),
        Line::from(m.tab_help),
    ])
    .select(state.tab)
    .block(Block::default().borders(Borders::ALL).title(m.title))
    .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, chunks[0]);

    match state.tab {
        0 => draw_list(chunks[1], f, state),
        1 => draw_settings(chunks[1], f, state),
        _ => help::draw_help(chunks[1], f, m),
    }

    if state.prompt != Prompt::None {
        draw_prompt(chunks[2], f, state);
    } else {
        draw_status(chunks[2], f, state);
    }
}

/// Row decoration: a warning glyph for a missing target, otherwise a
/// type glyph.
fn entry_icon(kind: EntryKind) -> (&'static str, Color) {
    match kind {
        EntryKind::Missing => ("⚠", Color::Red),
        EntryKind::Directory => ("▸", Color::Blue),
        EntryKind::Executable => ("»", Color::Green),
        EntryKind::File => ("·", Color::Gray),
    }
}

fn draw_list(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let m = state.messages();
    let mut lines: Vec<Line> = Vec::new();

    // Header and blank line take two rows, borders two more.
    let max_items = (area.height as usize).saturating_sub(4).max(1);
    let total = state.entries.len();
    let pos = if total > 0 { state.selected + 1 } else { 0 };

    lines.push(Line::from(vec![
        Span::raw(format!("{} ({}/{})", m.tab_shortcuts, pos, total)),
        Span::raw("   "),
        Span::styled(
            format!("{}: {}/{}", m.marked_label, state.marked.len(), total),
            Style::default().fg(Color::Gray),
        ),
    ]));
    lines.push(Line::from(""));

    if total == 0 {
        lines.push(Line::from(m.empty_list));
    }

    // Keep the cursor row visible; everything above the window scrolls away.
    let scroll_offset = state.selected.saturating_sub(max_items.saturating_sub(1));

    for (idx, (name, path)) in state
        .entries
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(max_items)
    {
        let is_selected = idx == state.selected;
        let (icon, icon_color) = entry_icon(classify(Path::new(path)));
        let marked = state.marked.contains(name);

        let style = if is_selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };

        lines.push(Line::from(vec![
            Span::styled(
                format!("{:>2}. ", idx + 1),
                if is_selected {
                    style
                } else {
                    Style::default().fg(Color::Gray)
                },
            ),
            Span::styled(if is_selected { "> " } else { "  " }, style),
            Span::styled(
                if marked { "● " } else { "  " },
                if is_selected {
                    style
                } else {
                    Style::default().fg(Color::Yellow)
                },
            ),
            Span::styled(
                format!("{icon} "),
                if is_selected {
                    style
                } else {
                    Style::default().fg(icon_color)
                },
            ),
            Span::styled(name.to_string(), style),
        ]));
    }

    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(m.tab_shortcuts));
    f.render_widget(p, area);
}

fn draw_settings(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let m = state.messages();
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)].as_ref())
        .split(area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{}: ", m.language_label),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(state.prefs.language.label()),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{}: ", m.auto_select_label),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                if state.prefs.auto_select {
                    m.on_label
                } else {
                    m.off_label
                },
                Style::default().fg(if state.prefs.auto_select {
                    Color::Green
                } else {
                    Color::Red
                }),
            ),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{}: ", m.entries_label),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(state.entries.len().to_string()),
        ]),
        Line::from(""),
    ];
    push_wrapped_status_kv(
        &mut lines,
        m.data_file_label,
        &state.prefs.data_file.display().to_string(),
        cols[0].width,
    );

    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(m.tab_settings));
    f.render_widget(p, cols[0]);

    let hint_rows = [
        ("l", m.hint_language),
        ("a", m.hint_auto_select),
        ("s", m.hint_set_path),
        ("o", m.hint_open_folder),
    ];
    let hints: Vec<Line> = hint_rows
        .iter()
        .map(|(key, text)| {
            Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{key:<4}"), Style::default().fg(Color::Magenta)),
                Span::raw(*text),
            ])
        })
        .collect();
    let p = Paragraph::new(hints).block(
        Block::default()
            .borders(Borders::ALL)
            .title(m.settings_keys_title),
    );
    f.render_widget(p, cols[1]);
}

fn draw_status(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let m = state.messages();
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!("{}: ", m.marked_label),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(format!("{}/{}", state.marked.len(), state.entries.len())),
        Span::raw("   "),
        Span::styled(
            format!("{}: ", m.auto_select_label),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            if state.prefs.auto_select {
                m.on_label
            } else {
                m.off_label
            },
            Style::default().fg(if state.prefs.auto_select {
                Color::Green
            } else {
                Color::Red
            }),
        ),
        Span::raw("   "),
        Span::styled(
            format!("{}: ", m.language_label),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(state.prefs.language.label()),
    ])];

    if let Some((_, path)) = state.selected_entry() {
        push_wrapped_status_kv(&mut lines, m.target_label, path, area.width);
    }

    if !state.info.is_empty() {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", m.info_label),
                Style::default().fg(Color::Gray),
            ),
            Span::raw(state.info.clone()),
        ]));
    }

    lines.push(Line::from(Span::styled(
        m.key_line,
        Style::default().fg(Color::DarkGray),
    )));

    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(m.status_title));
    f.render_widget(p, area);
}

fn draw_prompt(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let m = state.messages();
    let title = match state.prompt {
        Prompt::DataFile => m.prompt_data_file,
        _ => m.prompt_add_path,
    };
    let lines = vec![
        Line::from(vec![
            Span::raw("> "),
            Span::raw(state.input.clone()),
            Span::styled("▏", Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            m.prompt_hint,
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, area);
}
