//! funcproc CLI - apply y = -5 * x + 1 to a CSV column
//!
//! ```bash
//! funcproc process -i in/ -o out/    # in/data.csv -> out/data.csv
//! funcproc show out/data.csv         # Print the table
//! funcproc summary out/data.csv      # Print per-column statistics
//! ```

use clap::{Parser, Subcommand};
use funcproc::{
    get_data_summary, load_and_display, load_table, print_summary, read_output_csv, run_logged,
    CoercionPolicy, ProcessOptions, Summary,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "funcproc")]
#[command(about = "Process CSV data with mathematical function y = -5*x + 1", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Transform <input>/data.csv into <output>/data.csv
    Process {
        /// Input folder containing data.csv
        #[arg(short, long)]
        input: PathBuf,

        /// Output folder for results
        #[arg(short, long)]
        output: PathBuf,

        /// Fail on the first x value that is not a number instead of dropping it
        #[arg(long)]
        strict: bool,

        /// Do not copy companion files into the output folder
        #[arg(long)]
        no_copy: bool,

        /// Folder to take companion files from (default: next to the executable)
        #[arg(long)]
        companion_dir: Option<PathBuf>,
    },

    /// Load a CSV file and print its contents
    Show {
        /// CSV file
        file: PathBuf,
    },

    /// Print summary statistics of a CSV file's numeric columns
    Summary {
        /// CSV file
        file: PathBuf,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Process {
            input,
            output,
            strict,
            no_copy,
            companion_dir,
        } => cmd_process(&input, &output, strict, no_copy, companion_dir),

        Commands::Show { file } => cmd_show(&file),

        Commands::Summary { file, json } => cmd_summary(&file, json),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_process(
    input: &Path,
    output: &Path,
    strict: bool,
    no_copy: bool,
    companion_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !input.exists() {
        return Err(format!("Input folder '{}' does not exist.", input.display()).into());
    }

    let mut options = ProcessOptions::from_env();
    if strict {
        options = options.with_coercion(CoercionPolicy::Strict);
    }
    if no_copy {
        options = options.without_companions();
    }
    if let Some(dir) = companion_dir {
        options = options.with_companion_dir(dir);
    }

    eprintln!("📄 Starting data processing...");
    if !run_logged(input, output, &options) {
        return Err("Processing failed!".into());
    }

    eprintln!("\n✨ Processing completed successfully!");
    Ok(())
}

fn cmd_show(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if load_and_display(file).is_none() {
        return Err(format!("Could not load {}", file.display()).into());
    }
    Ok(())
}

fn cmd_summary(file: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        // Load quietly so stdout holds only the JSON document
        let summary = Summary::of(&load_table(file)?);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let table = read_output_csv(file);
    print_summary(get_data_summary(table.as_ref()).as_ref());

    Ok(())
}
