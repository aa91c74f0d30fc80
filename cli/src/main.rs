//! docgrid CLI - extraction tool for saved document-analysis responses

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use docgrid::{AnalysisOutput, BlockType, JsonFormat};

#[derive(Parser)]
#[command(name = "docgrid")]
#[command(version)]
#[command(about = "Extract text, tables, and forms from saved analysis responses", long_about = None)]
struct Cli {
    /// Input response JSON file(s), in page order
    #[arg(value_name = "FILE")]
    inputs: Vec<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print all line text
    Text {
        /// Input response JSON file(s), in page order
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print reconstructed tables
    Tables {
        /// Input response JSON file(s), in page order
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Table output format
        #[arg(long, value_enum, default_value = "tsv")]
        format: TableFormat,
    },

    /// Print form key/value pairs
    Forms {
        /// Input response JSON file(s), in page order
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Serialize the structured extraction (text, tables, forms) as JSON
    Json {
        /// Input response JSON file(s), in page order
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show response information
    Info {
        /// Input response JSON file(s), in page order
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum TableFormat {
    /// Tab-separated rows
    Tsv,
    /// JSON array of row arrays
    Json,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Text { inputs, output }) => cmd_text(&inputs, output.as_deref()),
        Some(Commands::Tables {
            inputs,
            output,
            format,
        }) => cmd_tables(&inputs, output.as_deref(), format),
        Some(Commands::Forms { inputs, output }) => cmd_forms(&inputs, output.as_deref()),
        Some(Commands::Json {
            inputs,
            output,
            compact,
        }) => cmd_json(&inputs, output.as_deref(), compact),
        Some(Commands::Info { inputs }) => cmd_info(&inputs),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: print text if inputs are provided
            if !cli.inputs.is_empty() {
                cmd_text(&cli.inputs, None)
            } else {
                println!("{}", "Usage: docgrid <FILE>...".yellow());
                println!("       docgrid --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load one or more saved response files and merge them as result pages.
fn load_output(inputs: &[PathBuf]) -> Result<AnalysisOutput, Box<dyn std::error::Error>> {
    if inputs.len() <= 1 {
        let pages = docgrid::parse_response_files(inputs)?;
        return Ok(AnalysisOutput::from_pages(pages));
    }

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Loading pages...");

    let mut pages = Vec::with_capacity(inputs.len());
    for input in inputs {
        pages.push(docgrid::parse_response_file(input)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    Ok(AnalysisOutput::from_pages(pages))
}

fn write_or_print(content: &str, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_text(inputs: &[PathBuf], output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = load_output(inputs)?;
    write_or_print(&analysis.text(), output)
}

fn cmd_tables(
    inputs: &[PathBuf],
    output: Option<&Path>,
    format: TableFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = load_output(inputs)?;
    let grids = analysis.tables();

    if grids.is_empty() {
        println!("{}", "No tables found".yellow());
        return Ok(());
    }

    let content = match format {
        TableFormat::Tsv => grids
            .iter()
            .map(|g| g.to_tsv())
            .collect::<Vec<_>>()
            .join("\n\n"),
        TableFormat::Json => serde_json::to_string_pretty(&grids)?,
    };

    write_or_print(&content, output)
}

fn cmd_forms(inputs: &[PathBuf], output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = load_output(inputs)?;

    // Sorted for stable output
    let fields: BTreeMap<String, String> = analysis.form_fields().into_iter().collect();
    if fields.is_empty() {
        println!("{}", "No form fields found".yellow());
        return Ok(());
    }

    let content = fields
        .iter()
        .map(|(k, v)| format!("{}: {}", k, v))
        .collect::<Vec<_>>()
        .join("\n");

    write_or_print(&content, output)
}

fn cmd_json(
    inputs: &[PathBuf],
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = load_output(inputs)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = analysis.to_json(format)?;
    write_or_print(&json, output)
}

fn cmd_info(inputs: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = load_output(inputs)?;

    println!("{}", "Response Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for input in inputs {
        println!("{}: {}", "File".bold(), input.display());
    }
    println!("{}: {}", "Result pages".bold(), analysis.pages().len());
    println!("{}: {}", "Document pages".bold(), analysis.page_count());
    println!("{}: {}", "Blocks".bold(), analysis.block_map().len());

    println!();
    println!("{}", "Block Types".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for block in analysis.block_map().blocks() {
        *counts.entry(format!("{:?}", block.block_type)).or_default() += 1;
    }
    for (block_type, count) in &counts {
        println!("{}: {}", block_type.bold(), count);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let tables = analysis.block_map().blocks_of_type(BlockType::Table).count();
    let words = analysis.block_map().blocks_of_type(BlockType::Word).count();
    let fields = analysis.form_fields().len();

    println!("{}: {}", "Words".bold(), words);
    println!("{}: {}", "Tables".bold(), tables);
    println!("{}: {}", "Form fields".bold(), fields);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "docgrid".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Document-analysis response extraction tool");
    println!();
    println!("License: MIT");
}
