//! Runetrie - Main entrypoint.
//!
//! Loads configuration, initializes logging, seeds a trie from an optional
//! word list and then runs the requested command against it.

use clap::{Parser, Subcommand};
use runetrie_lib::config::{self, AppConfig, ConfigLoader, LogConfig};
use runetrie_lib::data_structures::Trie;
use runetrie_lib::error::{AppError, AppResult};
use runetrie_lib::shell::{self, Command as ShellCommand, Session};
use serde_json::Value;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line arguments for runetrie.
#[derive(Parser, Debug)]
#[clap(name = "runetrie", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Word list to load, overriding `dictionary.path`
    #[clap(short, long, value_parser)]
    dict: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Read commands from stdin, one per line
    Shell,

    /// Look a single key up
    Find {
        /// Key to look up
        key: String,

        /// Report the prefix index in code points instead of bytes
        #[clap(long)]
        runes: bool,
    },

    /// List every key starting with a prefix
    Prefix {
        /// Prefix to enumerate
        #[clap(default_value = "")]
        prefix: String,
    },

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr so
/// that command output on stdout stays machine readable.
fn init_logging(log: &LogConfig) -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_line_number(log.source_location)
        .with_file(log.source_location)
        .with_thread_names(true);

    let result = if log.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.pretty().finish())
    };

    result.map_err(|e| AppError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

/// Loads the configuration, exiting on failure.
///
/// Logging is not up yet at this point, so failures go straight to stderr.
fn load_config(loader: &ConfigLoader) -> AppConfig {
    match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    }
}

/// Builds the trie, seeding it from the configured word list if any.
fn build_trie(config: &AppConfig, dict: Option<PathBuf>) -> AppResult<Trie<Value>> {
    let trie = Trie::new();
    if let Some(path) = dict.or_else(|| config.dictionary.path.clone()) {
        shell::load_dictionary_file(&trie, &path, &config.dictionary)?;
    }
    Ok(trie)
}

/// Runs one shell command and prints its result.
fn run_once(session: &Session<'_>, command: ShellCommand) -> AppResult<()> {
    let result = session.execute(command)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{result}")?;
    Ok(())
}

/// Main entry point for the application.
fn main() -> AppResult<()> {
    let args = Args::parse();

    let loader = ConfigLoader::new(args.config.as_deref(), config::ENV_PREFIX);

    match args.command.unwrap_or(Command::Shell) {
        Command::Validate => {
            load_config(&loader);
            println!("Configuration is valid");
            Ok(())
        }
        Command::GenConfig { output } => {
            let default_config = AppConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = toml::to_string_pretty(&default_config)
                .map_err(|e| AppError::Custom(format!("Failed to serialize config: {e}")))?;
            std::fs::write(&output, toml)?;

            println!("Default configuration written to {}", output.display());
            Ok(())
        }
        command => {
            let config = load_config(&loader);
            init_logging(&config.log)?;
            info!(version = runetrie_lib::VERSION, "Starting runetrie");

            let trie = build_trie(&config, args.dict)?;
            let session = Session::new(&trie, &config.dictionary);

            match command {
                Command::Find { key, runes: false } => run_once(&session, ShellCommand::Find { key }),
                Command::Find { key, runes: true } => {
                    run_once(&session, ShellCommand::FindRunes { key })
                }
                Command::Prefix { prefix } => run_once(&session, ShellCommand::Prefix { prefix }),
                _ => {
                    let stats = session.run(io::stdin().lock(), io::stdout().lock())?;
                    info!(
                        executed = stats.executed,
                        rejected = stats.rejected,
                        size = trie.size(),
                        "Session finished"
                    );
                    Ok(())
                }
            }
        }
    }
}
