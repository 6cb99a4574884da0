use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use asset_selector::catalog::{self, AssetFilter, ViewSelection};
use asset_selector::config::{ConsoleConfig, DEFAULT_SNAPSHOT_FILE};
use asset_selector::console::{Outcome, Session, HELP};
use asset_selector::{parse_query, CatalogSnapshot};

/// Filter a catalog snapshot with selection queries.
#[derive(Debug, Parser)]
#[command(name = "asset-selector", version)]
struct Cli {
    /// Catalog snapshot JSON (assets, catalogViews, favorites)
    #[arg(long, default_value = DEFAULT_SNAPSHOT_FILE)]
    snapshot: PathBuf,

    /// View to start from: `all`, `favorites` or a catalog view id
    #[arg(long)]
    view: Option<String>,

    /// Evaluate this query, print the matching keys and exit
    query: Option<String>,
}

impl Cli {
    fn config(&self) -> ConsoleConfig {
        ConsoleConfig {
            snapshot_path: self.snapshot.clone(),
            default_view: self.view.clone(),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    let snapshot = CatalogSnapshot::load_or_empty(&config.snapshot_path);

    if let Some(query) = &cli.query {
        run_once(&snapshot, &config, query);
        return Ok(());
    }

    run_console(snapshot, &config)
}

/// Applies the view, then the query, and prints one dotted key per line.
fn run_once(snapshot: &CatalogSnapshot, config: &ConsoleConfig, query: &str) {
    let filter = AssetFilter {
        view: config.default_view.as_deref().map(ViewSelection::from).unwrap_or_default(),
        ..Default::default()
    };
    for asset in catalog::select(filter.apply(snapshot), &parse_query(query)) {
        println!("{}", asset.key.dotted());
    }
}

fn run_console(snapshot: CatalogSnapshot, config: &ConsoleConfig) -> Result<()> {
    println!(
        "--- asset-selector: {} assets, {} catalog views ---",
        snapshot.assets.len(),
        snapshot.catalog_views.len()
    );
    println!("{}\n", HELP);

    let mut session = Session::new(snapshot);
    if let Some(view) = &config.default_view {
        print_lines(session.execute(&format!(":view {}", view)));
    }

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("selector> ") {
            Ok(line) => {
                if !line.trim().is_empty() {
                    editor.add_history_entry(line.as_str())?;
                }
                let outcome = session.execute(&line);
                if matches!(outcome, Outcome::Quit) {
                    break;
                }
                print_lines(outcome);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

fn print_lines(outcome: Outcome) {
    if let Outcome::Print(lines) = outcome {
        for line in lines {
            println!("{}", line);
        }
    }
}
