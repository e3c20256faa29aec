// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use app_controller::{Controller, RunRequest};
use chronometer::Chronometer;

mod app_config;
mod app_controller;
mod chronometer;
mod errors;
mod file_utils;
mod subtitle_processor;
mod timecode;
mod track_merger;
mod transcript_coalescer;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate subtitles from speech recognition chunk files (default command)
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Generate shell completions for subgen
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Directory containing speech recognition chunk JSON files
    #[arg(value_name = "CHUNK_DIR")]
    chunk_dir: Option<PathBuf>,

    /// Output SRT file path, or a directory for the default file name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Merge the generated subtitles into the existing output file
    #[arg(short, long)]
    merge: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subgen - Subtitle Generation from Speech Recognition
///
/// Turns timestamped speech-recognition transcript chunks into a single
/// SRT subtitle track, optionally merging it into an existing one.
#[derive(Parser, Debug)]
#[command(name = "subgen")]
#[command(version)]
#[command(about = "Subtitle track generation from speech recognition output")]
#[command(long_about = "subgen coalesces timestamped transcript fragments into an SRT subtitle track.

EXAMPLES:
    subgen tmp/                          # Generate from chunk files in tmp/
    subgen tmp/ -o movie.srt             # Write the track to movie.srt
    subgen tmp/ -o movie.srt -m          # Merge into an existing movie.srt
    subgen --log-level debug tmp/        # Generate with debug logging
    subgen completions bash > subgen.bash  # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.

CHUNK FILES:
    Each chunk file is a JSON document with a 'segments' list of objects
    carrying 'start', 'end' (seconds) and 'text'. Chunk files are processed
    in lexicographic name order; a name ending in HHMMSS_HHMMSS.json places
    the chunk at that offset in the full audio timeline.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory containing speech recognition chunk JSON files
    #[arg(value_name = "CHUNK_DIR")]
    chunk_dir: Option<PathBuf>,

    /// Output SRT file path, or a directory for the default file name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Merge the generated subtitles into the existing output file
    #[arg(short, long)]
    merge: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subgen", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args),
        None => {
            // Default behavior - use top-level args
            let args = GenerateArgs {
                chunk_dir: cli.chunk_dir,
                output: cli.output,
                merge: cli.merge,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(args)
        }
    }
}

/// Run the generation workflow wrapped in a chronometer.
fn run_generate(options: GenerateArgs) -> Result<()> {
    let mut chrono = Chronometer::new();
    chrono.start();

    let result = execute_generation(&options);

    chrono.stop();
    info!("Total execution time: {}", chrono.formatted_duration());

    result
}

fn execute_generation(options: &GenerateArgs) -> Result<()> {
    // Apply the command line log level before anything else logs
    if let Some(log_level) = &options.log_level {
        let level: app_config::LogLevel = log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let mut config = if Path::new(config_path).exists() {
        Config::from_file(config_path)?
    } else {
        warn!(
            "Config file not found at '{}', creating default config.",
            config_path
        );

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        std::fs::write(config_path, config_json)
            .with_context(|| format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Override config with CLI options if provided
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    // Validate the configuration after loading and overriding
    config
        .validate()
        .context("Configuration validation failed")?;

    log::set_max_level(config.log_level.to_level_filter());

    let chunk_dir = options
        .chunk_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.chunk_dir));
    let output = options.output.clone().unwrap_or_else(|| PathBuf::from("."));

    let controller = Controller::with_config(config)?;
    let request = RunRequest {
        chunk_dir,
        output,
        merge: options.merge,
    };

    controller.run(&request)
}
