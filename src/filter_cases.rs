/*
cargo run --bin filter_cases

cargo run --bin filter_cases -- \
    data/data.json \
    -o data/data_filtered.json \
    --layout pretty \
    --report logs/dropped_questions.json
*/

use std::fs::{create_dir_all, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use case_filter::{filter_file, store, OutputLayout};
use chrono::Local;
use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

// --layout values, mapped onto the library's OutputLayout
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    Python,
    Compact,
    Pretty,
}

impl From<Layout> for OutputLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Python => OutputLayout::Python,
            Layout::Compact => OutputLayout::Compact,
            Layout::Pretty => OutputLayout::Pretty,
        }
    }
}

// Drop repeated questions per case group and renumber the rest
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    // Data file with nominativ / akkusativ / genitiv / dativ arrays
    #[arg(default_value = "./data.json")]
    input: PathBuf,

    // Where to write the result (defaults to rewriting INPUT in place)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "python")]
    layout: Layout,

    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    // Optional JSON file listing the dropped questions per group
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    // Filter and report only, leave the data file untouched
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // logging setup
    create_dir_all(&cli.log_dir)
        .with_context(|| format!("creating log directory {}", cli.log_dir.display()))?;
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let log_path = cli.log_dir.join(format!("filter_cases_{ts}.log"));
    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(&log_path).with_context(|| format!("creating {}", log_path.display()))?,
    )?;

    let output = cli.output.clone().unwrap_or_else(|| cli.input.clone());
    info!("Starting case filter");
    info!("Input: {:?}  Output: {:?}  Layout: {:?}", cli.input, output, cli.layout);
    if cli.dry_run {
        info!("Dry run, nothing will be written to {:?}", output);
    }

    let target = (!cli.dry_run).then_some(output.as_path());
    let report = filter_file(&cli.input, target, cli.layout.into())
        .with_context(|| format!("filtering {}", cli.input.display()))?;

    for group in &report.groups {
        info!("{}", group.summary_line());
        println!("{}", group.summary_line());
    }

    if let Some(path) = &cli.report {
        store::write_report(path, &report)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!("Report written to {:?}", path);
    }

    info!(
        "Done: {} of {} entries kept",
        report.total_kept(),
        report.total_input()
    );
    if cli.dry_run {
        println!("Dry run: {} of {} entries would be kept", report.total_kept(), report.total_input());
    } else {
        println!(
            "Wrote {} entries → {}",
            report.total_kept(),
            output.display()
        );
    }
    Ok(())
}
