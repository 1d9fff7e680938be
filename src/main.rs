//! Planner — track URLs to read, watch and practise, by section and tag.
//!
//! Command-line front end. Every invocation opens the store, performs one
//! action against it, prints the reloaded view and exits.

use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use planner::app::App;
use planner::managers::item_lifecycle::MutationKind;
use planner::managers::navigation::nav_entries;
use planner::platform;
use planner::services::chart_renderer::{render_charts, TextChartRenderer};
use planner::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use planner::types::section::{Section, CHARTS_ID};
use planner::types::view::{ItemView, ListKind, SectionView};

#[derive(Parser)]
#[command(
    name = "planner",
    version,
    about = "Track URLs by section and tag",
    after_help = "Examples:\n  planner add -s videos -t rust https://a.com https://b.com\n  pbpaste | planner add -s writeups -t xss\n  planner list videos --search rust\n  planner toggle 3\n  planner delete 3 --yes\n  planner export --out ~/backups\n  planner charts"
)]
struct Cli {
    /// Database file (default: platform data dir)
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Settings file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<String>,
    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Save URLs under a section; reads one URL per line from stdin when none are given
    Add {
        /// Section id: writeups, hackerone-reports, videos, labs
        #[arg(short, long)]
        section: String,
        /// Tag shared by every URL in this batch
        #[arg(short, long)]
        tag: String,
        urls: Vec<String>,
    },
    /// Show the pending and completed lists of a section
    List {
        /// Section id (default: the first section)
        section: Option<String>,
        /// Only show items whose URL or tag contains this text
        #[arg(long)]
        search: Option<String>,
    },
    /// Flip a record between pending and completed
    Toggle { id: i64 },
    /// Delete a record
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Search URLs and tags, in one section or all of them
    Search {
        query: String,
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Write every record to planner-export-<date>.json
    Export {
        /// Target directory (default: settings or current dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Show completion, timeline and distribution charts
    Charts,
    /// List the navigation sections
    Sections,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => planner::logging::level_from_settings(cli.config.as_deref()),
        1 => "info".to_string(),
        _ => "debug".to_string(),
    };
    planner::logging::init(&level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn open_app(cli: &Cli) -> Result<App, Box<dyn std::error::Error>> {
    let mut engine = SettingsEngine::new(cli.config.clone());
    let configured = engine.load().ok().and_then(|s| s.storage.database_path);
    let db_path = cli
        .db
        .clone()
        .or_else(|| configured.map(PathBuf::from))
        .unwrap_or_else(platform::default_database_path);

    App::with_settings(&db_path.to_string_lossy(), engine).map_err(|err| {
        tracing::error!(%err, path = %db_path.display(), "failed to open record store");
        err
    })
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Action::Sections = cli.action {
        for entry in nav_entries() {
            println!("{:<18} {}", entry.id, entry.label);
        }
        return Ok(());
    }

    let mut app = open_app(&cli)?;

    match cli.action {
        Action::Add { section, tag, urls } => {
            let section: Section = section.parse()?;
            let input = if urls.is_empty() {
                let mut buf = String::new();
                io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                urls.join("\n")
            };
            app.select(section.id())?;
            let outcome = app.save(&input, &tag)?;
            println!("Saved {} URL(s) to {}", outcome.ids.len(), section.label());
            print_view(app.rendered());
        }
        Action::List { section, search } => {
            let id = section.unwrap_or_else(|| Section::ALL[0].id().to_string());
            if id == CHARTS_ID {
                return Err("use `planner charts` for the chart view".into());
            }
            let layout = app.select(&id)?;
            println!("{}", layout.title);
            let view = match search {
                Some(query) => app.search(&query),
                None => app.rendered(),
            };
            print_view(view);
        }
        Action::Toggle { id } => {
            let outcome = app.toggle(id)?;
            let state = match outcome.kind {
                MutationKind::Toggled { completed: true } => "completed",
                _ => "pending",
            };
            println!("Record {} is now {}", id, state);
        }
        Action::Delete { id, yes } => {
            let confirm = |prompt: &str| yes || ask(prompt);
            let outcome = app.delete(id, &confirm)?;
            if outcome.needs_reload() {
                println!("Deleted record {}", id);
            } else {
                println!("Kept record {}", id);
            }
        }
        Action::Search { query, section } => {
            let sections: Vec<Section> = match section {
                Some(id) => vec![id.parse()?],
                None => Section::ALL.to_vec(),
            };
            for section in sections {
                app.select(section.id())?;
                let view = app.search(&query);
                if view.visible(ListKind::Pending).is_empty() && view.visible(ListKind::Completed).is_empty() {
                    continue;
                }
                println!("{}", section.label());
                print_view(view);
            }
        }
        Action::Export { out } => {
            let path = app.export(out.as_deref())?;
            println!("Exported to {}", path.display());
        }
        Action::Charts => {
            app.select(CHARTS_ID)?;
            let data = app.chart_data()?;
            let mut renderer = TextChartRenderer::default();
            render_charts(&mut renderer, &data);
            print!("{}", renderer.finish());
        }
        Action::Sections => {}
    }
    Ok(())
}

/// Asks on stderr and reads a y/N answer from stdin.
fn ask(prompt: &str) -> bool {
    eprint!("{} [y/N] ", prompt);
    let _ = io::stderr().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_view(view: &SectionView) {
    print_list("Pending", &view.visible(ListKind::Pending));
    print_list("Completed", &view.visible(ListKind::Completed));
}

fn print_list(title: &str, items: &[&ItemView]) {
    println!("  {} ({})", title, items.len());
    for item in items {
        println!(
            "    [{}] {}  tag: {}  added: {}",
            item.id, item.url, item.tag, item.date_label
        );
    }
}
