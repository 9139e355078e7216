//! rpnsheet - Solve a grid of RPN cell expressions.

mod config;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use rpnsheet_core::storage::{write_values, write_values_content};
use rpnsheet_core::{Document, OutputOptions, OutputStyle};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "rpnsheet", version)]
#[command(about = "Solve a grid of RPN cell expressions")]
struct Cli {
    /// Sheet file to solve (reads stdin when omitted or "-")
    file: Option<PathBuf>,

    /// Write values to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output layout
    #[arg(long, value_enum)]
    style: Option<StyleArg>,

    /// Digits after the decimal point (default 5)
    #[arg(long)]
    precision: Option<usize>,

    /// Load settings from this TOML file instead of the user config dir
    #[arg(long, conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    Lines,
    Table,
}

impl From<StyleArg> for OutputStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Lines => OutputStyle::Lines,
            StyleArg::Table => OutputStyle::Table,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn output_options(cli: &Cli) -> Result<OutputOptions> {
    let mut options = if cli.no_config {
        OutputOptions::default()
    } else {
        let (options, warnings) = config::load_config(cli.config.as_deref());
        for warning in warnings {
            log::warn!("{}", warning);
        }
        options
    };

    if let Some(style) = cli.style {
        options.style = style.into();
    }
    if let Some(precision) = cli.precision {
        options.precision = config::check_precision(precision).map_err(anyhow::Error::msg)?;
    }
    Ok(options)
}

fn load_document(file: Option<&Path>) -> Result<Document> {
    match file {
        Some(path) if path != Path::new("-") => Document::load_file(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        _ => Document::load_reader(std::io::stdin().lock()).context("Failed to read stdin"),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = output_options(cli)?;
    let doc = load_document(cli.file.as_deref())?;
    let solution = doc.solve()?;

    match &cli.output {
        Some(path) => write_values(path, &solution.grid, &options)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let content = write_values_content(&solution.grid, &options);
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
