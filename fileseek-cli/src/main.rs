use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use fileseek::{MatchMode, MatchRecord, SearchConfig, SearchSession};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Find files by name or content under a directory tree, streaming
/// results as they are discovered.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Literal term to search for
    term: Option<String>,

    /// Root directory to search in
    #[arg(short = 'd', long, default_value = ".")]
    root: PathBuf,

    /// Match mode (contains|starts-with|ends-with|content)
    #[arg(short, long, default_value = "contains")]
    mode: MatchMode,

    /// Poll cadence in milliseconds
    #[arg(short = 'i', long, default_value = "100")]
    interval: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Configuration file (YAML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit each record as a JSON line instead of formatted output
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let json = cli.json;

    let cli_config = SearchConfig {
        root_path: cli.root,
        term: cli.term.unwrap_or_default(),
        mode: cli.mode,
        log_level: cli.log_level,
        poll_interval_ms: cli.interval,
    };

    // An explicit config file must load; the implicit locations are
    // optional and fall back to CLI values alone.
    let config = if let Some(path) = cli.config.as_deref() {
        SearchConfig::load_from(Some(path))
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .merge_with_cli(cli_config)
    } else {
        match SearchConfig::load() {
            Ok(file_config) => file_config.merge_with_cli(cli_config),
            Err(_) => cli_config,
        }
    };

    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(
        "Searching {} for '{}' ({}), polling every {}ms",
        config.root_path.display(),
        config.term,
        config.mode,
        config.poll_interval_ms
    );

    let interval = Duration::from_millis(config.poll_interval_ms);
    let mut session = SearchSession::start(config)?;

    let spinner = if json {
        ProgressBar::hidden()
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} searching... {pos} found")
                .expect("static template"),
        );
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    };

    let mut total = 0usize;
    loop {
        let poll = session.poll();
        for record in &poll.records {
            total += 1;
            spinner.inc(1);
            if json {
                println!("{}", serde_json::to_string(record)?);
            } else {
                spinner.suspend(|| print_record(record));
            }
        }
        if poll.done {
            break;
        }
        thread::sleep(interval);
    }
    spinner.finish_and_clear();

    if !json {
        println!(
            "\nFound {} matching file{}",
            total,
            if total == 1 { "" } else { "s" }
        );
    }
    Ok(())
}

fn print_record(record: &MatchRecord) {
    println!(
        "{:<30} {:<22} {:>6} {:>10}  {}",
        record.file_name.green(),
        humantime::format_rfc3339_seconds(record.modified).to_string(),
        record.extension,
        human_size(record.size_bytes),
        record.path.display().to_string().blue()
    );
}

/// Formats bytes as KB or MB depending on scale.
fn human_size(size: u64) -> String {
    let kb = size / 1000;
    if kb > 1000 {
        format!("{:.1} MB", kb as f64 / 1000.0)
    } else {
        format!("{} KB", kb)
    }
}
