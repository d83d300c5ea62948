//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use brandscope_core::pipeline::{ProgressReporter, extract_website, parse_target_url};
use brandscope_fetcher::{FetchPolicy, Fetcher};
use brandscope_shared::{
    AppConfig, ExtractedData, ExtractionId, ExtractionRecord, init_config, load_config,
    load_config_from,
};
use brandscope_storage::Storage;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Extract design tokens and brand voice from a website.
#[derive(Parser)]
#[command(
    name = "brandscope",
    version,
    about = "Extract design tokens and brand voice from a website.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (defaults to ~/.brandscope/brandscope.toml).
    #[arg(long, global = true, env = "BRANDSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Extract design tokens and voice from a URL and print the JSON document.
    Extract {
        /// Page URL (http or https).
        url: String,

        /// Also store the document in the local database.
        #[arg(long)]
        save: bool,

        /// Print single-line JSON instead of pretty output.
        #[arg(long)]
        compact: bool,
    },

    /// List stored extractions, newest first.
    List,

    /// Print one stored extraction.
    Get {
        /// Extraction ID.
        id: String,
    },

    /// Delete one stored extraction.
    Delete {
        /// Extraction ID.
        id: String,
    },

    /// Search stored extractions by URL, title, or description.
    Search {
        /// Case-insensitive substring.
        term: String,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "brandscope=info",
        1 => "brandscope=debug",
        _ => "brandscope=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays clean JSON.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Extract { url, save, compact } => {
            cmd_extract(config_path, &url, save, compact).await
        }
        Command::List => cmd_list(config_path).await,
        Command::Get { id } => cmd_get(config_path, &id).await,
        Command::Delete { id } => cmd_delete(config_path, &id).await,
        Command::Search { term } => cmd_search(config_path, &term).await,
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init().await,
            ConfigAction::Show => cmd_config_show(config_path).await,
        },
    }
}

fn resolve_config(path: Option<&Path>) -> Result<AppConfig> {
    Ok(match path {
        Some(p) => load_config_from(p)?,
        None => load_config()?,
    })
}

fn parse_id(id: &str) -> Result<ExtractionId> {
    id.parse()
        .map_err(|e| eyre!("invalid extraction id '{id}': {e}"))
}

/// Open the database read-only, or `None` if nothing has been stored yet.
async fn open_existing(config: &AppConfig) -> Result<Option<Storage>> {
    let db_path = config.storage.resolved_database_path()?;
    if !db_path.exists() {
        return Ok(None);
    }
    Ok(Some(Storage::open_readonly(&db_path).await?))
}

fn print_json(data: &impl serde::Serialize, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    println!("{out}");
    Ok(())
}

fn print_records(records: &[ExtractionRecord]) {
    if records.is_empty() {
        println!("No extractions found.");
        return;
    }
    for record in records {
        println!(
            "{}  {}  {}  {}",
            record.id,
            record.created_at.format("%Y-%m-%d %H:%M"),
            record.url,
            record.title
        );
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_extract(
    config_path: Option<&Path>,
    url: &str,
    save: bool,
    compact: bool,
) -> Result<()> {
    let config = resolve_config(config_path)?;
    let target = parse_target_url(url)?;
    let fetcher = Fetcher::new(FetchPolicy::from(&config))?;

    info!(url = %target, save, "extracting website");

    let reporter = CliProgress::new();
    let result = extract_website(&target, &fetcher, &reporter).await;
    reporter.finish();
    let data = result?;

    if save {
        let db_path = config.storage.resolved_database_path()?;
        let storage = Storage::open(&db_path).await?;
        let record = storage.store(&data).await?;
        eprintln!("Saved extraction {}", record.id);
    }

    print_json(&data, compact)
}

async fn cmd_list(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let records = match open_existing(&config).await? {
        Some(storage) => storage.list().await?,
        None => Vec::new(),
    };
    info!(count = records.len(), "listing extractions");
    print_records(&records);
    Ok(())
}

async fn cmd_get(config_path: Option<&Path>, id: &str) -> Result<()> {
    let config = resolve_config(config_path)?;
    let id = parse_id(id)?;
    let record = match open_existing(&config).await? {
        Some(storage) => storage.get_by_id(&id).await?,
        None => None,
    };
    let record = record.ok_or_else(|| eyre!("no extraction with id '{id}'"))?;
    print_json(&record, false)
}

async fn cmd_delete(config_path: Option<&Path>, id: &str) -> Result<()> {
    let config = resolve_config(config_path)?;
    let id = parse_id(id)?;
    let db_path = config.storage.resolved_database_path()?;
    if !db_path.exists() {
        return Err(eyre!("no extraction with id '{id}'"));
    }

    let storage = Storage::open(&db_path).await?;
    if storage.delete(&id).await? {
        println!("Deleted extraction {id}");
        Ok(())
    } else {
        Err(eyre!("no extraction with id '{id}'"))
    }
}

async fn cmd_search(config_path: Option<&Path>, term: &str) -> Result<()> {
    let config = resolve_config(config_path)?;
    let records = match open_existing(&config).await? {
        Some(storage) => storage.search(term).await?,
        None => Vec::new(),
    };
    print_records(&records);
    Ok(())
}

async fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

async fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = resolve_config(config_path)?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap()
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }

    fn finish(&self) {
        if !self.spinner.is_finished() {
            self.spinner.finish_and_clear();
        }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn stylesheets_settled(&self, fetched: usize, failed: usize) {
        self.spinner
            .set_message(format!("Stylesheets: {fetched} fetched, {failed} skipped"));
    }

    fn done(&self, data: &ExtractedData) {
        self.spinner.finish_and_clear();
        info!(url = %data.url, "document assembled");
    }
}
