use crate::i18n::Language;
use crate::launch;
use crate::model::{classify, EntryKind, Preferences};
use crate::storage;
use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser, Clone)]
#[command(
    name = "quickstart",
    version,
    about = "Keyboard-driven shortcut launcher with optional TUI"
)]
pub struct Cli {
    /// Print the shortcut list and exit (no TUI)
    #[arg(long)]
    pub list: bool,

    /// Add shortcuts for the given paths and exit
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub add: Vec<PathBuf>,

    /// Remove the named shortcuts and exit
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub remove: Vec<String>,

    /// Launch the named shortcuts and exit
    #[arg(long, value_name = "NAME", num_args = 1..)]
    pub launch: Vec<String>,

    /// Use a specific data file instead of the one the pointer file names
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Display language for this run (zh or en)
    #[arg(long, value_name = "CODE")]
    pub lang: Option<String>,

    /// Use --auto-select true or --auto-select false to override
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub auto_select: Option<bool>,
}

/// Stored preferences with CLI overrides layered on top. Overrides apply to
/// this run only; the pointer file is not rewritten here.
pub fn effective_prefs(args: &Cli) -> Result<Preferences> {
    let mut prefs = storage::load_prefs();
    if let Some(path) = args.data_file.as_ref() {
        prefs.data_file = path.clone();
    }
    if let Some(code) = args.lang.as_deref() {
        prefs.language = Language::from_code(code)
            .with_context(|| format!("unknown language code '{code}' (expected zh or en)"))?;
    }
    if let Some(auto) = args.auto_select {
        prefs.auto_select = auto;
    }
    Ok(prefs)
}

pub fn run(args: Cli) -> Result<()> {
    let prefs = effective_prefs(&args)?;

    let one_shot =
        args.list || !args.add.is_empty() || !args.remove.is_empty() || !args.launch.is_empty();
    if one_shot {
        return run_batch(&prefs, &args);
    }

    #[cfg(feature = "tui")]
    {
        crate::tui::run(prefs)
    }
    #[cfg(not(feature = "tui"))]
    {
        // Fallback when built without TUI support.
        run_list(&prefs)
    }
}

/// Apply the scripting flags in a fixed order: adds, then removals, then
/// launches, then the listing.
fn run_batch(prefs: &Preferences, args: &Cli) -> Result<()> {
    let mut entries = storage::load_entries(&prefs.data_file);
    let mut dirty = false;

    for path in &args.add {
        let absolute = absolutize(path);
        if !absolute.exists() {
            eprintln!("skipping {}: no such path", absolute.display());
            continue;
        }
        match entries.add_path(&absolute.to_string_lossy()) {
            Some(name) => {
                eprintln!("added {name}");
                dirty = true;
            }
            None => eprintln!("skipping {}: no usable name", absolute.display()),
        }
    }

    for name in &args.remove {
        if entries.remove(name) {
            eprintln!("removed {name}");
            dirty = true;
        } else {
            eprintln!("no shortcut named {name}");
        }
    }

    if dirty {
        storage::save_entries(&prefs.data_file, &entries)
            .with_context(|| format!("save {}", prefs.data_file.display()))?;
    }

    for name in &args.launch {
        match entries.get(name) {
            // Launch failures are ignored; a stale entry stays in the list.
            Some(path) => {
                let _ = launch::open_path(Path::new(path));
            }
            None => eprintln!("no shortcut named {name}"),
        }
    }

    if args.list {
        run_list(prefs)?;
    }
    Ok(())
}

fn run_list(prefs: &Preferences) -> Result<()> {
    let entries = storage::load_entries(&prefs.data_file);
    let stdout = std::io::stdout();
    let mut out = std::io::LineWriter::new(stdout.lock());
    for (name, path) in entries.iter() {
        let marker = match classify(Path::new(path)) {
            EntryKind::Missing => "! ",
            _ => "  ",
        };
        writeln!(out, "{marker}{name}\t{path}")?;
    }
    out.flush()?;
    Ok(())
}

/// Absolutize without resolving symlinks, so a link keeps its own name.
fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
