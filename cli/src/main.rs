//! pdftoc CLI - PDF outline extraction tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdftoc::batch::discover_pdfs;
use pdftoc::model::{to_json, JsonFormat};
use pdftoc::BatchOptions;

#[derive(Parser)]
#[command(name = "pdftoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF outlines (title + H1-H3 headings) to JSON", long_about = None)]
struct Cli {
    /// Input PDF file or directory
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory (batch) or file (single document)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in a directory, one JSON file per document
    Batch {
        /// Input directory
        #[arg(value_name = "DIR")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "output")]
        output: PathBuf,

        /// Worker count (default: half the available CPU units)
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Extract one document's outline
    Outline {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Compare produced JSON against reference JSON (precision/recall)
    Eval {
        /// Directory of produced JSON files
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Directory of reference JSON files
        #[arg(value_name = "REFERENCE_DIR")]
        reference_dir: PathBuf,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Batch {
            input,
            output,
            workers,
        }) => cmd_batch(&input, &output, workers),
        Some(Commands::Outline {
            input,
            output,
            compact,
        }) => cmd_outline(&input, output.as_deref(), compact),
        Some(Commands::Eval {
            output_dir,
            reference_dir,
        }) => cmd_eval(&output_dir, &reference_dir),
        None => match cli.input {
            // Default behavior: directories run the batch, files print the
            // outline.
            Some(input) if input.is_dir() => {
                let output = cli.output.unwrap_or_else(|| PathBuf::from("output"));
                cmd_batch(&input, &output, None)
            }
            Some(input) => cmd_outline(&input, cli.output.as_deref(), false),
            None => {
                println!("{}", "Usage: pdftoc <INPUT> [OUTPUT]".yellow());
                println!("       pdftoc --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input: &Path,
    output: &Path,
    workers: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let count = discover_pdfs(input)?.len();
    if count == 0 {
        println!("{}", format!("No PDF documents found in {}", input.display()).yellow());
        return Ok(());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb.set_message(format!("Processing {count} file(s)..."));

    let mut options = BatchOptions::new();
    if let Some(workers) = workers {
        options = options.with_workers(workers);
    }
    let summary = pdftoc::process_directory(input, output, &options)?;

    pb.finish_and_clear();

    for report in &summary.reports {
        if report.is_success() {
            println!("{}", report.log_line());
        } else {
            println!("{}", report.log_line().red());
        }
    }
    println!("Total headings found: {}", summary.total_headings);
    println!(
        "Total processing time: {:.2} seconds",
        summary.elapsed.as_secs_f64()
    );

    if summary.failure_count() > 0 {
        println!(
            "{}",
            format!("{} file(s) failed", summary.failure_count()).yellow()
        );
    }
    Ok(())
}

fn cmd_outline(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let outline = pdftoc::extract_file(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = to_json(&outline, format)?;

    match output {
        Some(path) => {
            fs::write(path, json)?;
            println!(
                "{} {} ({} headings)",
                "Wrote".green(),
                path.display(),
                outline.heading_count()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_eval(output_dir: &Path, reference_dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let results = pdftoc::evaluate_directory(output_dir, reference_dir)?;

    if results.is_empty() {
        println!(
            "{}",
            format!("No reference JSON found in {}", reference_dir.display()).yellow()
        );
        return Ok(());
    }

    for (name, scores) in &results {
        match scores {
            Some(s) => println!(
                "{}: Precision={:.2}, Recall={:.2}",
                name, s.precision, s.recall
            ),
            None => println!("{}", format!("{name}: skipped").yellow()),
        }
    }
    Ok(())
}
