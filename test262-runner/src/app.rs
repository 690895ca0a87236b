use std::time::Instant;

use clap::Parser;
use colored::Colorize;

use crate::cli::Cli;
use crate::discovery::collect_test_files;
use crate::execution::{Failure, SuiteSummary, init_thread_pool, run_suite};
use crate::stats::print_analysis;

pub fn run() {
    let cli = Cli::parse();
    let start = Instant::now();

    init_thread_pool();

    let files = collect_test_files(&cli.path);
    println!(
        "{} {} test files...\n",
        "Parsing".bold().cyan(),
        files.len()
    );

    let summary = run_suite(&cli.path, &files, cli.verbose, cli.analyze);
    print_totals(&summary, start.elapsed().as_secs_f64());

    if cli.analyze {
        print_analysis(&summary.analysis);
    }

    if summary.failed() > 0 && !cli.verbose {
        print_failure_sample(&summary.failures, cli.sample);
    }

    if summary.failed() > 0 {
        std::process::exit(1);
    }
}

fn print_totals(summary: &SuiteSummary, elapsed_secs: f64) {
    println!("\n{}", "=".repeat(60));
    println!(
        "Passed: {} | Failed: {} | Skipped: {}",
        summary.passed.to_string().green().bold(),
        summary.failed().to_string().red().bold(),
        summary.skipped.to_string().yellow().bold()
    );
    println!("Completed in {:.2}s", elapsed_secs);
    println!("{}", "=".repeat(60));
}

fn print_failure_sample(failures: &[Failure], max_rows: usize) {
    let shown = failures.len().min(max_rows);

    println!("\n{}", "Sample failures:".red().bold());
    for failure in failures.iter().take(shown) {
        println!(
            "  {} - {}: {}",
            failure.path.display(),
            failure.kind.label(),
            failure.reason
        );
    }
    if failures.len() > shown {
        println!(
            "  ... and {} more (use --verbose for all)",
            failures.len() - shown
        );
    }
}
