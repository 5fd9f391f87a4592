use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use super::{Cli, Commands};
use crate::clipboard::{SystemClipboard, copy_to_clipboard};
use crate::history::{format_list_item, reverse_lines};
use crate::logging;
use crate::monitor::{ClipboardMonitor, normalize_clip};
use crate::storage::{DEFAULT_EXPORT_FILENAME, DataPaths, SettingsUpdate, Store};
use crate::utils::{format_path_with_tilde, sanitize_for_terminal};

pub fn dispatch(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let paths = DataPaths::resolve()?;
    if matches!(command, Commands::Ui) {
        logging::init_file(&paths.log, cli.verbose)?;
    } else {
        logging::init_stderr(cli.verbose);
    }
    let mut store = Store::open(paths);

    match command {
        Commands::Ui => run_ui(store),
        Commands::Watch { once } => watch(&mut store, once),
        Commands::Add { text } => add(&mut store, text),
        Commands::List { favorites } => {
            list(&store, favorites);
            Ok(())
        }
        Commands::Show { position } => show(&store, position),
        Commands::Search { query } => {
            search(&store, &query);
            Ok(())
        }
        Commands::Copy { position, reverse_lines } => copy(&store, position, reverse_lines),
        Commands::Combine { positions } => combine(&store, &positions),
        Commands::Delete { position } => delete(&mut store, position),
        Commands::Fav { position } => fav(&mut store, position),
        Commands::Clear { yes } => clear(&mut store, yes),
        Commands::Export { path } => export(&store, path),
        Commands::Import { path } => import(&mut store, &path),
        Commands::Config { max_history, poll_ms, session_only, reverse_lines } => {
            let update = SettingsUpdate { max_history, poll_ms, session_only, wrap_mode: reverse_lines };
            config(&mut store, update)
        }
        Commands::Stats => {
            show_stats(&store);
            Ok(())
        }
        Commands::Paths => {
            show_paths(store.paths());
            Ok(())
        }
    }
}

/// List label safe to print
fn label(item: &str, favorite: bool) -> String {
    sanitize_for_terminal(&format_list_item(item, favorite)).into_owned()
}

/// Convert a 1-based CLI position to a history index
fn to_index(store: &Store, position: usize) -> Result<usize> {
    let len = store.history().len();
    if position == 0 || position > len {
        bail!("No history item #{} (history has {} items)", position, len);
    }
    Ok(position - 1)
}

/// Fail the command when the last mutation could not be written to disk
fn ensure_saved(store: &mut Store) -> Result<()> {
    match store.take_save_error() {
        Some(error) => bail!("Could not save to {}: {}", store.paths().data_dir.display(), error),
        None => Ok(()),
    }
}

fn default_export_path() -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    Ok(cwd.join(DEFAULT_EXPORT_FILENAME))
}

fn run_ui(store: Store) -> Result<()> {
    let store = crate::tui::run_interactive(store, default_export_path()?)?;
    println!(
        "Loaded {} items. Favorites: {}. Data: {}",
        store.history().len(),
        store.history().favorites().len(),
        format_path_with_tilde(&store.paths().data_dir)
    );
    Ok(())
}

fn watch(store: &mut Store, once: bool) -> Result<()> {
    let mut clipboard = SystemClipboard::new()?;
    let mut monitor = ClipboardMonitor::new();

    if once {
        match monitor.poll(&mut clipboard, store) {
            Some(text) => println!("Captured: {}", label(&text, false).trim_start()),
            None => println!("Nothing new on the clipboard"),
        }
        return Ok(());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    stop_on_ctrl_c(Arc::clone(&shutdown))?;

    println!("Watching clipboard every {} ms (Ctrl+C to stop)", store.settings().poll_ms);
    monitor.run(&mut clipboard, store, shutdown, |text| {
        println!("Captured: {}", label(text, false).trim_start());
    })?;
    println!("Stopped watching. History: {} items", store.history().len());
    Ok(())
}

/// Set `shutdown` when Ctrl+C arrives instead of killing the process
fn stop_on_ctrl_c(shutdown: Arc<AtomicBool>) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start signal handler")?;

    thread::spawn(move || {
        runtime.block_on(async {
            match tokio::signal::ctrl_c().await {
                Ok(()) => shutdown.store(true, Ordering::Relaxed),
                Err(e) => warn!(error = %e, "cannot listen for Ctrl+C"),
            }
        });
    });
    Ok(())
}

fn add(store: &mut Store, text: Option<String>) -> Result<()> {
    let raw = match text {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).context("Failed to read stdin")?;
            buf
        }
    };

    let text = normalize_clip(&raw);
    if text.is_empty() {
        bail!("Nothing to add: text is empty");
    }

    if store.record(&text) {
        ensure_saved(store)?;
        info!(items = store.history().len(), "recorded item");
        println!("Added item #{}", store.history().len());
    } else {
        println!("Already the newest item");
    }
    Ok(())
}

fn list(store: &Store, favorites: bool) {
    let history = store.history();
    if favorites {
        if history.favorites().is_empty() {
            println!("No favorites");
        }
        for (i, item) in history.favorites().iter().enumerate() {
            println!("{:>4} {}", i + 1, label(item, true));
        }
        return;
    }

    if history.is_empty() {
        println!("History is empty");
    }
    for (i, item) in history.items().enumerate() {
        println!("{:>4} {}", i + 1, label(item, history.is_favorite(item)));
    }
}

fn show(store: &Store, position: usize) -> Result<()> {
    let index = to_index(store, position)?;
    if let Some(item) = store.history().get(index) {
        println!("{}", sanitize_for_terminal(item));
    }
    Ok(())
}

fn search(store: &Store, query: &str) {
    let query = query.trim();
    if query.is_empty() {
        println!("Search cleared.");
        return;
    }

    let history = store.history();
    let matches = history.search(query);
    if matches.is_empty() {
        println!("No matches for: {}", query);
        return;
    }

    println!("Found {} matches for: {}", matches.len(), query);
    for index in matches {
        if let Some(item) = history.get(index) {
            println!("{:>4} {}", index + 1, label(item, history.is_favorite(item)));
        }
    }
}

fn copy(store: &Store, position: usize, force_reverse: bool) -> Result<()> {
    let index = to_index(store, position)?;
    let text = match (force_reverse, store.history().get(index)) {
        (true, Some(item)) => reverse_lines(item),
        _ => store.copy_text(index).context("History item disappeared")?,
    };

    copy_to_clipboard(&text)?;
    println!("Copied item #{} to clipboard", position);
    Ok(())
}

fn combine(store: &Store, positions: &[usize]) -> Result<()> {
    let indices = positions.iter().map(|&p| to_index(store, p)).collect::<Result<Vec<_>>>()?;
    let combined = store.history().combine(&indices).context("Nothing to combine")?;

    copy_to_clipboard(&combined)?;
    println!("Combined {} items and copied.", indices.len());
    Ok(())
}

fn delete(store: &mut Store, position: usize) -> Result<()> {
    let index = to_index(store, position)?;
    let removed = store.delete(index)?;
    ensure_saved(store)?;
    println!("Deleted: {}", label(&removed, false).trim_start());
    Ok(())
}

fn fav(store: &mut Store, position: usize) -> Result<()> {
    let index = to_index(store, position)?;
    let favorite = store.toggle_favorite(index)?;
    ensure_saved(store)?;
    if favorite {
        println!("★ Added item #{} to favorites", position);
    } else {
        println!("Removed item #{} from favorites", position);
    }
    Ok(())
}

fn clear(store: &mut Store, yes: bool) -> Result<()> {
    if !yes {
        bail!("Refusing to clear {} items without --yes", store.history().len());
    }
    let count = store.history().len();
    store.clear();
    ensure_saved(store)?;
    println!("Cleared {} items", count);
    Ok(())
}

fn export(store: &Store, path: Option<PathBuf>) -> Result<()> {
    let path = match path {
        Some(path) => path,
        None => default_export_path()?,
    };
    let bundle = store.export_to(&path)?;
    println!(
        "Exported {} items and {} favorites to {}",
        bundle.history.len(),
        bundle.favorites.len(),
        path.display()
    );
    Ok(())
}

fn import(store: &mut Store, path: &Path) -> Result<()> {
    store.import_from(path).context("Import failed")?;
    ensure_saved(store)?;
    println!(
        "Imported from {}. History: {} items, favorites: {}",
        path.display(),
        store.history().len(),
        store.history().favorites().len()
    );
    Ok(())
}

fn config(store: &mut Store, update: SettingsUpdate) -> Result<()> {
    if !update.is_empty() {
        store.update_settings(update);
        ensure_saved(store)?;
        info!("settings updated");
    }

    let settings = store.settings();
    println!("max_history = {}", settings.max_history);
    println!("poll_ms = {}", settings.poll_ms);
    println!("session_only = {}", settings.session_only);
    println!("reverse_lines = {}", settings.wrap_mode);
    Ok(())
}

fn show_stats(store: &Store) {
    let history = store.history();
    let settings = store.settings();

    println!("Copy 2.0 History Statistics");
    println!("===========================");
    println!("History items: {} / {}", history.len(), history.capacity());
    println!("Favorites: {}", history.favorites().len());
    println!("Poll interval: {} ms", settings.poll_ms);
    println!("Session only: {}", if settings.session_only { "yes" } else { "no" });
    println!("Reverse-lines copy: {}", if settings.wrap_mode { "on" } else { "off" });
    println!();
    println!("Data directory: {}", format_path_with_tilde(&store.paths().data_dir));

    if let Some(newest) = history.items().last() {
        println!("Newest item: {}", label(newest, false).trim_start());
    }
}

fn show_paths(paths: &DataPaths) {
    println!("data:      {}", paths.data_dir.display());
    println!("config:    {}", paths.config.display());
    println!("history:   {}", paths.history.display());
    println!("favorites: {}", paths.favorites.display());
    println!("log:       {}", paths.log.display());
}
