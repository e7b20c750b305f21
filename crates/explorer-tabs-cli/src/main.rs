//! explorer-tabs - drive the Explorer++ tab container from a script
//!
//! Opens a set of folder tabs, replays tab commands line by line and
//! prints the tab strip after each step.

mod config;
mod fs_browser;
mod icon_resolver;
mod script;

use crate::config::{Config, StripConfig};
use crate::icon_resolver::{icon_name, FsIconResolver};
use crate::script::ScriptAction;
use anyhow::{Context, Result};
use clap::Parser;
use explorer_tabs::{
    FixedWidthStrip, TabBarVisibility, TabContainer, TabSettings, TaskbarProxies, WindowTitle,
};
use explorer_tabs_core::{DefaultIcon, Location, SessionRecord, TabEvent, TabQuery};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "explorer-tabs",
    about = "Script the Explorer++ tab container against the local filesystem",
    version
)]
struct Args {
    /// Folders to open, one tab each
    paths: Vec<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session file to restore from and save to
    #[arg(long)]
    session: Option<PathBuf>,

    /// Script to replay instead of reading commands from stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::from_default_env()
            .add_directive("explorer_tabs=debug".parse()?)
            .add_directive("explorer_tabs_core=debug".parse()?)
    } else {
        EnvFilter::from_default_env()
            .add_directive("explorer_tabs=info".parse()?)
            .add_directive("explorer_tabs_core=info".parse()?)
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    let config = Config::load(args.config.as_deref()).unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load configuration: {:#}", e);
        eprintln!("Using default configuration...");
        Config::default()
    });

    let mut tabs = TabContainer::new(
        config.tabs.clone(),
        fs_browser::factory(),
        FsIconResolver::new(),
    );
    let title = WindowTitle::attach(&mut tabs);
    let tab_bar = TabBarVisibility::attach(&mut tabs);
    let taskbar = TaskbarProxies::attach(&mut tabs);
    tabs.subscribe(|event: &TabEvent, _: &dyn TabQuery| tracing::debug!("{:?}", event));

    open_initial_tabs(&mut tabs, &args)?;
    settle_icons(&mut tabs, &config.strip).await;
    print_strip(&tabs, title.borrow().title(), tab_bar.borrow().is_visible());

    let reader: Box<dyn AsyncBufRead + Unpin> = match &args.script {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("Failed to open script {:?}", path))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(tokio::io::stdin())),
    };

    let mut lines = reader.lines();
    let mut number = 0;
    while let Some(line) = lines.next_line().await.context("Failed to read script")? {
        number += 1;
        let action = match script::parse_line(number, &line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        if let Err(e) = run_action(&mut tabs, &config.strip, &action) {
            eprintln!("line {}: {:#}", number, e);
        }
        settle_icons(&mut tabs, &config.strip).await;

        if matches!(action, ScriptAction::List) {
            print_entries(&tabs);
            print_closed_tabs(&tabs);
        }
        print_strip(&tabs, title.borrow().title(), tab_bar.borrow().is_visible());

        if tabs.shutdown_requested() {
            tracing::info!("Last tab closed; shutting down");
            break;
        }
    }

    taskbar.borrow_mut().clear();

    if let Some(path) = &args.session {
        tabs.export_session()
            .save(path)
            .with_context(|| format!("Failed to save session to {:?}", path))?;
        tracing::info!("Saved {} tabs to {:?}", tabs.len(), path);
    }

    Ok(())
}

/// Restores the session file if there is one, else opens `paths`.
fn open_initial_tabs(tabs: &mut TabContainer, args: &Args) -> Result<()> {
    if let Some(path) = args.session.as_ref().filter(|path| path.exists()) {
        let session = SessionRecord::load(path)
            .with_context(|| format!("Failed to load session from {:?}", path))?;
        let restored = tabs.restore_session(&session);
        tracing::info!("Restored {} tabs from {:?}", restored.len(), path);
        if !restored.is_empty() {
            return Ok(());
        }
    }

    if args.paths.is_empty() {
        tabs.create_tab_in_default_directory(TabSettings::foreground());
        return Ok(());
    }

    for (index, path) in args.paths.iter().enumerate() {
        let settings = if index == 0 {
            TabSettings::foreground()
        } else {
            TabSettings::background()
        };
        let created = tabs.create_tab(Location::from_path(path), settings);
        if let Err(e) = &created.navigation {
            eprintln!("Warning: could not open {:?}: {}", path, e);
        }
    }
    Ok(())
}

fn run_action(tabs: &mut TabContainer, strip: &StripConfig, action: &ScriptAction) -> Result<()> {
    match action {
        ScriptAction::Command(command) => tabs.handle_command(command.clone())?,
        ScriptAction::Drag { from, to } => drag(tabs, strip, *from, *to)?,
        ScriptAction::List => {}
    }
    Ok(())
}

/// Replays a pointer drag from the centre of tab `from` across the strip,
/// one tab at a time, until it reaches `to`.
fn drag(tabs: &mut TabContainer, strip: &StripConfig, from: usize, to: usize) -> Result<()> {
    let geometry = FixedWidthStrip::new(strip.tab_width, strip.tab_height, tabs.len());
    tabs.begin_drag(from, &geometry)?;

    let to = to.min(tabs.len().saturating_sub(1));
    let mut index = from;
    while index != to {
        index = if to > index { index + 1 } else { index - 1 };
        tabs.drag_pointer_move(geometry.center_of(index), &geometry);
    }

    if let Some((tab, from, to)) = tabs.end_drag() {
        tracing::info!("Dragged tab {} from {} to {}", tab, from, to);
    }
    Ok(())
}

/// Applies icon lookups as they arrive, giving up after the configured
/// wait.
async fn settle_icons(tabs: &mut TabContainer, strip: &StripConfig) {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(strip.icon_wait_ms);

    while tabs.pending_icon_lookups() > 0 {
        let next = tokio::time::timeout_at(deadline, tabs.next_icon_result()).await;
        match next {
            Ok(Some(_)) => {}
            Ok(None) => break,
            Err(_) => {
                tracing::debug!(
                    "{} icon lookups still pending",
                    tabs.pending_icon_lookups()
                );
                break;
            }
        }
    }
    tabs.drain_icon_results();
}

fn print_strip(tabs: &TabContainer, title: &str, tab_bar_visible: bool) {
    println!("== {} ==", title);
    if !tab_bar_visible {
        return;
    }

    for record in tabs.tabs_in_order() {
        let marker = if tabs.is_selected(record.id()) { '*' } else { ' ' };
        let lock = if record.is_locked() {
            format!(" [{:?}]", record.lock_state())
        } else {
            String::new()
        };
        let icon = tabs
            .icon_slots()
            .folder_icon(record.icon_slot())
            .map(icon_name)
            .or_else(|| {
                tabs.icon_slots()
                    .default_kind(record.icon_slot())
                    .map(|kind| match kind {
                        DefaultIcon::Lock => "lock",
                        DefaultIcon::GenericFolder => "folder",
                    })
            })
            .unwrap_or("?");
        let location = record
            .location()
            .map(|location| location.to_string())
            .unwrap_or_else(|| "<unresolved>".to_string());

        println!(
            "{}{:>3} {:<20} {:<7} {}{}",
            marker,
            record.id(),
            record.display_name(),
            icon,
            location,
            lock
        );
    }
}

/// Contents of the selected tab's folder.
fn selected_entries(tabs: &TabContainer) -> Vec<String> {
    tabs.selected_tab()
        .map(|tab| tab.browser().entries())
        .unwrap_or_default()
}

fn print_entries(tabs: &TabContainer) {
    for entry in selected_entries(tabs) {
        println!("  {}", entry);
    }
}

fn print_closed_tabs(tabs: &TabContainer) {
    for closed in tabs.closed_tabs().iter() {
        println!(
            "  closed {} (was at {}) {}",
            closed.location,
            closed.index,
            closed.closed_at.format("%H:%M:%S")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use explorer_tabs_core::TabConfig;
    use std::fs;
    use tempfile::TempDir;

    fn container(root: &std::path::Path) -> TabContainer {
        let config = TabConfig {
            default_tab_directory: Location::from_path(root),
            ..TabConfig::default()
        };
        TabContainer::new(
            config,
            fs_browser::factory(),
            FsIconResolver::with_home(None),
        )
    }

    fn args(paths: Vec<PathBuf>, session: Option<PathBuf>) -> Args {
        Args {
            paths,
            config: None,
            session,
            script: None,
            verbose: false,
        }
    }

    fn folders(root: &std::path::Path, names: &[&str]) -> Vec<PathBuf> {
        names
            .iter()
            .map(|name| {
                let path = root.join(name);
                fs::create_dir(&path).unwrap();
                path.canonicalize().unwrap()
            })
            .collect()
    }

    #[test]
    fn test_paths_open_one_tab_each() {
        let temp_dir = TempDir::new().unwrap();
        let paths = folders(temp_dir.path(), &["a", "b"]);
        let mut tabs = container(temp_dir.path());

        open_initial_tabs(&mut tabs, &args(paths.clone(), None)).unwrap();

        assert_eq!(tabs.len(), 2);
        let first = tabs.tab_at_index(0).unwrap();
        assert!(tabs.is_selected(first.id()));
        assert_eq!(first.location(), Some(Location::from_path(&paths[0])));
    }

    #[test]
    fn test_no_paths_opens_default_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut tabs = container(temp_dir.path());

        open_initial_tabs(&mut tabs, &args(Vec::new(), None)).unwrap();

        assert_eq!(tabs.len(), 1);
        let expected = Location::from_path(&temp_dir.path().canonicalize().unwrap());
        assert_eq!(tabs.selected_tab().and_then(|tab| tab.location()), Some(expected));
    }

    #[test]
    fn test_session_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = folders(temp_dir.path(), &["a", "b", "c"]);
        let session = temp_dir.path().join("state").join("session.json");

        let mut tabs = container(temp_dir.path());
        open_initial_tabs(&mut tabs, &args(paths.clone(), Some(session.clone()))).unwrap();
        let last = tabs.tab_at_index(2).unwrap().id();
        tabs.select(last);
        tabs.rename(last, Some("Third".to_string()));
        tabs.export_session().save(&session).unwrap();

        let mut restored = container(temp_dir.path());
        open_initial_tabs(&mut restored, &args(Vec::new(), Some(session))).unwrap();

        assert_eq!(restored.len(), 3);
        let selected = restored.selected_tab().unwrap();
        assert_eq!(selected.custom_name(), Some("Third"));
        assert_eq!(selected.location(), Some(Location::from_path(&paths[2])));
    }

    #[test]
    fn test_selected_entries_follow_selection() {
        let temp_dir = TempDir::new().unwrap();
        let paths = folders(temp_dir.path(), &["a", "b"]);
        fs::write(paths[0].join("notes.txt"), "").unwrap();
        fs::create_dir(paths[1].join("src")).unwrap();
        let mut tabs = container(temp_dir.path());
        open_initial_tabs(&mut tabs, &args(paths, None)).unwrap();

        assert_eq!(selected_entries(&tabs), ["notes.txt"]);
        tabs.select_adjacent(true);
        assert_eq!(selected_entries(&tabs), ["src"]);
    }

    #[test]
    fn test_drag_across_strip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = folders(temp_dir.path(), &["a", "b", "c"]);
        let mut tabs = container(temp_dir.path());
        open_initial_tabs(&mut tabs, &args(paths, None)).unwrap();
        let before = tabs.tab_ids().to_vec();

        drag(&mut tabs, &StripConfig::default(), 0, 2).unwrap();
        assert_eq!(tabs.tab_ids(), [before[1], before[2], before[0]]);

        drag(&mut tabs, &StripConfig::default(), 2, 0).unwrap();
        assert_eq!(tabs.tab_ids(), before.as_slice());

        assert!(drag(&mut tabs, &StripConfig::default(), 7, 0).is_err());
    }

    #[test]
    fn test_script_actions_drive_the_container() {
        let temp_dir = TempDir::new().unwrap();
        let paths = folders(temp_dir.path(), &["a", "b"]);
        let mut tabs = container(temp_dir.path());
        open_initial_tabs(&mut tabs, &args(paths, None)).unwrap();

        let actions = script::parse_script("next\nlock 2\nclose 2\nindex 0\n").unwrap();
        for action in &actions {
            run_action(&mut tabs, &StripConfig::default(), action).unwrap();
        }

        // the locked tab survives the close
        assert_eq!(tabs.len(), 2);
        assert_eq!(tabs.selected_id(), Some(1));

        let err = run_action(
            &mut tabs,
            &StripConfig::default(),
            &ScriptAction::Command(explorer_tabs_core::TabCommand::Select(99)),
        );
        assert!(err.is_err());
    }
}
