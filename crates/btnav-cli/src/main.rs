//! btnav - behaviour-tree navigation from the command line.
//!
//! Every command opens the project session (replaying the saved stack),
//! applies one navigation step and lets the session persist it:
//! - `btnav open` / `push` / `pop` / `crumb` / `clear` - navigate
//! - `btnav status` - breadcrumb trail and recent journal entries
//! - `btnav watch` - clear the selection when the displayed tree is deleted

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tracing_subscriber::{fmt, EnvFilter};

use btnav_core::format_trail;
use btnav_project::config::CONFIG_PATH;
use btnav_project::{NavigatorConfig, ProjectSession};

#[derive(Parser)]
#[command(name = "btnav")]
#[command(about = "Navigate nested behaviour trees", version)]
struct Cli {
    /// Project root directory
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a project
    Init,

    /// List tree documents
    List,

    /// Show the breadcrumb trail and recent activity
    Status {
        /// Number of journal entries to show
        #[arg(long, default_value = "5")]
        recent: usize,
    },

    /// Open a tree as the new root
    Open {
        /// Tree document, relative to the assets directory
        path: String,
    },

    /// Drill into a sub-tree of the displayed tree
    Push {
        /// Tree document, relative to the assets directory
        path: String,
    },

    /// Pop back to a depth
    Pop {
        /// Stack depth to keep
        depth: usize,
    },

    /// Jump to a breadcrumb (0 is the root)
    Crumb { index: usize },

    /// Clear the selection
    Clear,

    /// Report a tree document as deleted
    Delete { path: String },

    /// Watch the assets directory and react to deleted trees
    Watch,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let project_root = match cli.project {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to get current directory")?,
    };

    match cli.command {
        Commands::Init => init_project(&project_root),
        Commands::List => list_trees(&project_root),
        Commands::Status { recent } => show_status(&project_root, recent),
        Commands::Open { path } => navigate(&project_root, |s| s.open_tree(&path)),
        Commands::Push { path } => navigate(&project_root, |s| s.push_tree(&path)),
        Commands::Pop { depth } => navigate(&project_root, |s| {
            s.navigator_mut().pop_to_depth(depth, None);
            Ok(())
        }),
        Commands::Crumb { index } => navigate(&project_root, |s| {
            s.navigator_mut().click_breadcrumb(index)?;
            Ok(())
        }),
        Commands::Clear => navigate(&project_root, |s| {
            s.navigator_mut().select_root(None);
            Ok(())
        }),
        Commands::Delete { path } => navigate(&project_root, |s| {
            let file = s.resolver().root().join(s.asset_path(&path)?.as_str());
            if !s.notify_deleted(&file) {
                println!("{} is not the displayed tree", path);
            }
            Ok(())
        }),
        Commands::Watch => watch(&project_root),
    }
}

fn navigate<F>(project_root: &Path, step: F) -> Result<()>
where
    F: FnOnce(&mut ProjectSession) -> Result<()>,
{
    let mut session = ProjectSession::open(project_root)?;
    step(&mut session)?;
    print_trail(&session);
    Ok(())
}

fn print_trail(session: &ProjectSession) {
    let crumbs = session.navigator().breadcrumbs();
    if crumbs.is_empty() {
        println!("(no tree selected)");
    } else {
        println!("{}", format_trail(&crumbs));
    }
}

fn init_project(project_root: &Path) -> Result<()> {
    let config_path = project_root.join(CONFIG_PATH);
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    if !config_path.exists() {
        std::fs::write(&config_path, NavigatorConfig::template())
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
    }

    println!("Initialized btnav project at {}", project_root.display());
    println!();
    println!("Created:");
    println!("  {} - navigator configuration", CONFIG_PATH);
    println!();
    println!("Next steps:");
    println!("  1. btnav list");
    println!("  2. btnav open <tree>");

    Ok(())
}

fn list_trees(project_root: &Path) -> Result<()> {
    let mut config = NavigatorConfig::load_from_project(project_root)?;
    config.resolve_paths(project_root);
    config.restore_on_open = false;
    let session = ProjectSession::with_config(project_root, config)?;

    let trees = session.resolver().list();
    println!("Tree documents: {}", trees.len());
    for tree in &trees {
        println!("  {} ({})", tree.name(), tree.key());
    }
    Ok(())
}

fn show_status(project_root: &Path, recent: usize) -> Result<()> {
    let session = ProjectSession::open(project_root)?;
    let navigator = session.navigator();

    println!("btnav status");
    println!("============");
    println!();
    println!("Project: {}", project_root.display());
    println!("Depth: {}", navigator.depth());
    for crumb in navigator.breadcrumbs() {
        println!("  [{}] {} ({})", crumb.depth, crumb.label, crumb.context.key());
    }
    println!();
    println!("Recent events:");
    for entry in navigator.views().read_recent(recent) {
        println!(
            "  [{}] {} {}",
            entry.timestamp.format("%H:%M:%S"),
            entry.event_type,
            entry.tree.as_deref().unwrap_or("")
        );
    }
    Ok(())
}

fn watch(project_root: &Path) -> Result<()> {
    let mut session = ProjectSession::open(project_root)?;
    print_trail(&session);

    let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    let assets_dir = session.resolver().root().to_path_buf();
    watcher
        .watch(&assets_dir, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", assets_dir.display()))?;

    tracing::info!(dir = %assets_dir.display(), "Watching for deleted trees");

    // Events arrive on the watcher thread and are handled here, one at a time.
    for result in rx {
        let event = match result {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(error = %err, "File watcher error");
                continue;
            }
        };

        if !is_removal(&event.kind) {
            continue;
        }

        for path in &event.paths {
            if !session.resolver().is_tree_file(path) {
                continue;
            }
            tracing::debug!(path = %path.display(), "Tree document removed");
            if session.notify_deleted(path) {
                println!("{} was deleted", path.display());
                print_trail(&session);
            }
        }
    }

    Ok(())
}

fn is_removal(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(RenameMode::From))
    )
}
