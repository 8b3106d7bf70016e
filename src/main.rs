use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use rust_sqltables::{merge_extractions, report, scan, scan_ctes, ScanOptions};

#[derive(Parser)]
#[command(name = "rust-sqltables")]
#[command(author, version, about = "Extract real table names from SQL, excluding CTEs")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract table references from .sql, .py and .sh files
    Tables {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Glob pattern of paths to skip (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Print one combined report instead of one per file
        #[arg(short, long)]
        merge: bool,

        /// Also write the report to this file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// List CTE names defined by WITH clauses
    Ctes {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Glob pattern of paths to skip (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Enable verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tables {
            paths,
            exclude,
            merge,
            output,
            verbose,
        } => {
            let options = ScanOptions {
                inputs: paths,
                exclude,
                verbose,
            };

            let extractions = scan(&options)?;
            let text = if merge {
                report::format_extraction(&merge_extractions(&extractions))
            } else {
                extractions
                    .iter()
                    .map(report::format_file_extraction)
                    .collect::<Vec<_>>()
                    .join("\n\n")
            };

            println!("{}", text);

            if let Some(output) = output {
                std::fs::write(&output, format!("{}\n", text))?;
                if verbose {
                    println!("Report written to: {}", output.display());
                }
            }
        }
        Commands::Ctes {
            paths,
            exclude,
            verbose,
        } => {
            let options = ScanOptions {
                inputs: paths,
                exclude,
                verbose,
            };

            for cte_report in scan_ctes(&options)? {
                println!("{}\n", report::format_cte_file_report(&cte_report));
            }
        }
    }

    Ok(())
}
