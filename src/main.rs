//! devkit - Developer Toolbox
//!
//! Command-line front end for the naming convention converter, the Unix
//! timestamp converter and QR batch splitting.
//!
//! # Usage
//!
//! ```bash
//! devkit detect userName               # Detect the naming convention
//! devkit convert user_name             # Show all six conventions
//! devkit convert user_name --to kebab  # Convert to one convention
//! devkit timestamp 1700000000000       # Milliseconds to local date
//! devkit timestamp 1700000000 -s --save  # Seconds, saved to history
//! devkit now --watch                   # Live clock (q to quit)
//! devkit history list --search 2023    # Fuzzy search saved conversions
//! devkit batch "a,b,c" --save          # Split a batch, record it for QR codes
//! devkit qr-history list               # Generated QR texts, newest first
//! devkit config --unit seconds         # Change the default unit
//! ```

use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use devkit::config::{self, AppConfig};
use devkit::core::batch::{self, Separator};
use devkit::core::history;
use devkit::core::naming::{self, NamingConvention};
use devkit::core::timestamp::{self, CurrentTime, TimestampUnit};
use devkit::utils::truncate_string;
use shadow_rs::shadow;
use std::process::ExitCode;
use uuid::Uuid;

shadow!(build);

#[derive(Parser)]
#[command(name = "devkit", version = build::PKG_VERSION, long_version = build::CLAP_LONG_VERSION)]
#[command(about = "Developer toolbox - naming convention and timestamp converters", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the naming convention of an identifier
    Detect {
        #[arg(allow_hyphen_values = true)]
        identifier: String,
    },
    /// Convert an identifier to one or all naming conventions
    Convert {
        #[arg(allow_hyphen_values = true)]
        identifier: String,
        /// Target convention (camel, pascal, snake, kebab, constant, spaced)
        #[arg(short, long, value_name = "CONVENTION")]
        to: Option<NamingConvention>,
        /// Print all conversions as JSON
        #[arg(long, conflicts_with = "to")]
        json: bool,
    },
    /// Show the words an identifier splits into
    Words {
        #[arg(allow_hyphen_values = true)]
        identifier: String,
    },
    /// Convert a Unix timestamp to a date
    Timestamp {
        #[arg(allow_negative_numbers = true)]
        value: String,
        /// Treat the value as seconds
        #[arg(short, long, conflicts_with = "millis")]
        seconds: bool,
        /// Treat the value as milliseconds
        #[arg(short, long)]
        millis: bool,
        /// Render in UTC instead of the local time zone
        #[arg(long)]
        utc: bool,
        /// Save the conversion to history
        #[arg(long)]
        save: bool,
    },
    /// Show the current date and millisecond timestamp
    Now {
        /// Refresh every second until q, Esc or Ctrl-C
        #[arg(short, long)]
        watch: bool,
        /// Render in UTC instead of the local time zone
        #[arg(long)]
        utc: bool,
    },
    /// Manage saved timestamp conversions
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Split text into QR batch items (reads stdin without INPUT)
    Batch {
        #[arg(allow_hyphen_values = true)]
        input: Option<String>,
        /// newline, comma, semicolon, tab, space, pipe, dash or any literal
        /// (detected when omitted)
        #[arg(short, long, value_name = "SEP")]
        separator: Option<Separator>,
        /// Record the items in QR history as one batch
        #[arg(long)]
        save: bool,
    },
    /// Manage the history of generated QR texts
    QrHistory {
        #[command(subcommand)]
        action: QrHistoryAction,
    },
    /// Show settings, or update the ones given
    Config {
        /// Default timestamp unit (seconds or milliseconds)
        #[arg(long, value_name = "UNIT")]
        unit: Option<TimestampUnit>,
        /// strftime format for converted dates
        #[arg(long, value_name = "FORMAT")]
        date_format: Option<String>,
        /// Maximum number of saved conversions
        #[arg(long, value_name = "N")]
        max_history: Option<usize>,
        /// Log to a file in the state directory instead of stderr
        #[arg(long, value_name = "BOOL")]
        log_to_file: Option<bool>,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List saved conversions, optionally fuzzy-filtered
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Delete one saved conversion
    Delete { id: Uuid },
    /// Delete all saved conversions
    Clear,
}

#[derive(Subcommand)]
enum QrHistoryAction {
    /// List generated texts, newest first
    List {
        /// Only show the batch this entry belongs to
        #[arg(short, long, value_name = "ID")]
        batch: Option<Uuid>,
    },
    /// Delete one entry
    Delete { id: Uuid },
    /// Delete all entries
    Clear,
}

fn main() -> ExitCode {
    let _ = devkit::utils::ensure_dirs();
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(handle_cli(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            let translation = e.translate();
            eprintln!("Error: {}", translation.user_message);
            for suggestion in &translation.suggestions {
                eprintln!("  hint: {suggestion}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_to_file: bool, verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    if log_to_file && let Some(mut log_path) = devkit::utils::get_state_dir() {
        log_path.push("devkit.log");
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
        {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn handle_cli(cli: Cli) -> devkit::Result<()> {
    let (config, config_error) = match config::try_load_config().await {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    init_logging(config.log_to_file, cli.verbose);
    if let Some(e) = config_error {
        tracing::warn!("Ignoring saved settings: {e}");
        eprintln!("Warning: ignoring saved settings ({e}); using defaults");
    }

    match cli.command {
        Commands::Detect { identifier } => {
            let convention = naming::detect(&identifier);
            println!("{}", convention.label());
        }
        Commands::Convert {
            identifier,
            to,
            json,
        } => {
            if let Some(target) = to {
                println!("{}", naming::convert(&identifier, target));
            } else {
                let all = naming::convert_all(&identifier);
                if json {
                    println!("{}", serde_json::to_string_pretty(&all)?);
                } else {
                    for (convention, value) in &all {
                        println!("{:<36} {value}", convention.label());
                    }
                }
            }
        }
        Commands::Words { identifier } => {
            for word in naming::tokenize(&identifier) {
                println!("{word}");
            }
        }
        Commands::Timestamp {
            value,
            seconds,
            millis,
            utc,
            save,
        } => {
            let unit = if seconds {
                TimestampUnit::Seconds
            } else if millis {
                TimestampUnit::Milliseconds
            } else {
                config.default_unit
            };

            let converted = if utc {
                timestamp::convert_timestamp(&value, unit, &Utc, &config.date_format)?
            } else {
                timestamp::convert_timestamp(&value, unit, &Local, &config.date_format)?
            };
            println!("{converted}");

            if save {
                save_to_history(&config, &value, unit, &converted).await?;
            }
        }
        Commands::Now { watch, utc } => {
            timestamp::validate_date_format(&config.date_format)?;
            if watch {
                watch_clock(utc, &config.date_format)?;
            } else {
                let current = current_time(utc, &config.date_format);
                println!("{}", current.formatted);
                println!("{}", current.millis);
            }
        }
        Commands::History { action } => {
            let path = history::history_path()?;
            match action {
                HistoryAction::List { search } => {
                    let history = history::load_history_from(&path).await;
                    let results = history.search(search.as_deref().unwrap_or_default());
                    if results.is_empty() {
                        println!("No saved conversions.");
                    }
                    for (item, _) in results {
                        let unit = if item.is_milliseconds { "ms" } else { "s" };
                        println!(
                            "{}  {:>16} {:<2}  {}  (saved {})",
                            item.id,
                            truncate_string(&item.timestamp, 16),
                            unit,
                            item.converted_time,
                            item.create_time
                                .with_timezone(&Local)
                                .format(timestamp::DEFAULT_DATE_FORMAT),
                        );
                    }
                }
                HistoryAction::Delete { id } => {
                    let mut history = history::load_history_from(&path).await;
                    if history.remove(id).is_none() {
                        return Err(devkit::Error::NotFound(format!("History entry {id}")));
                    }
                    history::save_history_to(&path, &history).await?;
                    println!("Deleted {id}.");
                }
                HistoryAction::Clear => {
                    history::delete_history_file(&path).await?;
                    println!("History cleared.");
                }
            }
        }
        Commands::Batch {
            input,
            separator,
            save,
        } => {
            let text = match input {
                Some(text) => text,
                None => std::io::read_to_string(std::io::stdin())?,
            };
            let separator = separator.unwrap_or_else(|| batch::detect_separator(&text));
            let parts = batch::split_batch(&text, &separator);
            tracing::debug!("Split batch on {separator} into {} items", parts.len());

            if parts.is_empty() {
                println!("No items.");
                return Ok(());
            }
            for part in &parts {
                println!("{part}");
            }

            if save {
                let path = batch::qr_history_path()?;
                let mut qr_history = batch::load_qr_history_from(&path).await;
                let record = qr_history.record_batch(&parts);
                qr_history.enforce_limit(config.max_history_entries);
                batch::save_qr_history_to(&path, &qr_history).await?;
                eprintln!(
                    "Saved {} items ({} already in history).",
                    record.added, record.skipped
                );
            }
        }
        Commands::QrHistory { action } => {
            let path = batch::qr_history_path()?;
            let mut qr_history = batch::load_qr_history_from(&path).await;
            match action {
                QrHistoryAction::List { batch: member } => {
                    let items: Vec<_> = match member {
                        Some(id) => {
                            let entry = qr_history.get(id).ok_or_else(|| {
                                devkit::Error::NotFound(format!("QR history entry {id}"))
                            })?;
                            let stamp = entry
                                .batch_timestamp
                                .ok_or_else(|| devkit::Error::Validation {
                                    field: "batch".into(),
                                    message: format!("entry {id} was not generated in a batch"),
                                })?;
                            qr_history.batch_items(stamp)
                        }
                        None => qr_history.iter().collect(),
                    };
                    if items.is_empty() {
                        println!("No generated QR codes.");
                    }
                    for item in items {
                        let position = item
                            .batch_index
                            .map(|index| format!("#{index}"))
                            .unwrap_or_default();
                        println!(
                            "{}  {:>4}  {}  (created {})",
                            item.id,
                            position,
                            truncate_string(&item.text, 48),
                            item.create_time
                                .with_timezone(&Local)
                                .format(timestamp::DEFAULT_DATE_FORMAT),
                        );
                    }
                }
                QrHistoryAction::Delete { id } => {
                    if qr_history.remove(id).is_none() {
                        return Err(devkit::Error::NotFound(format!("QR history entry {id}")));
                    }
                    batch::save_qr_history_to(&path, &qr_history).await?;
                    println!("Deleted {id}.");
                }
                QrHistoryAction::Clear => {
                    batch::delete_qr_history_file(&path).await?;
                    println!("QR history cleared.");
                }
            }
        }
        Commands::Config {
            unit,
            date_format,
            max_history,
            log_to_file,
        } => {
            if unit.is_none()
                && date_format.is_none()
                && max_history.is_none()
                && log_to_file.is_none()
            {
                println!("{}", serde_json::to_string_pretty(&config)?);
                return Ok(());
            }

            let mut updated = config;
            if let Some(unit) = unit {
                updated.default_unit = unit;
            }
            if let Some(format) = date_format {
                updated.date_format = format;
            }
            if let Some(max) = max_history {
                updated.max_history_entries = max;
            }
            if let Some(log_to_file) = log_to_file {
                updated.log_to_file = log_to_file;
            }

            config::save_config(&updated).await?;
            tracing::info!("Settings updated");
            println!("Settings saved.");
        }
    }
    Ok(())
}

async fn save_to_history(
    config: &AppConfig,
    value: &str,
    unit: TimestampUnit,
    converted: &str,
) -> devkit::Result<()> {
    let path = history::history_path()?;
    let mut history = history::load_history_from(&path).await;

    let Some(id) = history.record(value, unit, converted).map(|item| item.id) else {
        println!("Already in history.");
        return Ok(());
    };
    history.enforce_limit(config.max_history_entries);
    history::save_history_to(&path, &history).await?;

    tracing::info!("Recorded history entry {id}");
    println!("Saved to history ({id}).");
    Ok(())
}

fn current_time(utc: bool, format: &str) -> CurrentTime {
    if utc {
        timestamp::current_time(&Utc, Utc::now(), format)
    } else {
        timestamp::current_time(&Local, Utc::now(), format)
    }
}

/// Live clock with keypress polling
///
/// Redraws the current time roughly once a second:
/// - 'q', Esc or Ctrl-C: Stop
/// - Any other key: Ignored
fn watch_clock(utc: bool, format: &str) -> std::io::Result<()> {
    // Enable raw mode for immediate keypress detection
    crossterm::terminal::enable_raw_mode()?;

    let result = tick_until_quit(utc, format);

    // Always restore terminal to normal mode
    let _ = crossterm::terminal::disable_raw_mode();
    println!();
    result
}

fn tick_until_quit(utc: bool, format: &str) -> std::io::Result<()> {
    use crossterm::event::{self, Event, KeyCode, KeyModifiers};
    use std::io::Write;

    loop {
        let current = current_time(utc, format);
        print!(
            "\r{}  {}   [q=quit]\x1b[K",
            current.formatted, current.millis
        );
        std::io::stdout().flush()?;

        // Poll for keypresses for 1 second
        if event::poll(std::time::Duration::from_secs(1))?
            && let Event::Key(key) = event::read()?
        {
            match key.code {
                KeyCode::Char('q' | 'Q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                _ => {
                    // Any other key ignored, keep ticking
                }
            }
        }
    }
}
