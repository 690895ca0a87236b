use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use colored::Colorize;
use rayon::prelude::*;

use crate::metadata::{TestMetadata, parse_frontmatter};
use crate::runner::{FailureKind, TestResult, run_test};
use crate::stats::Analysis;

pub struct Failure {
    pub path: PathBuf,
    pub kind: FailureKind,
    pub reason: String,
}

#[derive(Default)]
pub struct SuiteSummary {
    pub passed: usize,
    pub skipped: usize,
    pub failures: Vec<Failure>,
    pub analysis: Analysis,
}

impl SuiteSummary {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Deeply nested tests recurse far in the parser, so workers get big stacks.
pub fn init_thread_pool() {
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(8);

    rayon::ThreadPoolBuilder::new()
        .stack_size(16 * 1024 * 1024)
        .num_threads(threads)
        .build_global()
        .ok();
}

/// Parse every file on the rayon pool, then fold the results in path order.
pub fn run_suite(root: &Path, files: &[PathBuf], verbose: bool, analyze: bool) -> SuiteSummary {
    let mut results: Vec<(&PathBuf, TestResult)> =
        files.par_iter().map(|path| (path, run_case(path))).collect();
    results.sort_by(|a, b| a.0.cmp(b.0));

    let mut summary = SuiteSummary::default();
    for (path, result) in results {
        if analyze {
            summary.analysis.record(root, path, &result);
        }
        if verbose {
            print_result(path, &result);
        }
        match result {
            TestResult::Passed => summary.passed += 1,
            TestResult::Skipped(_) => summary.skipped += 1,
            TestResult::Failed(kind, reason) => summary.failures.push(Failure {
                path: path.clone(),
                kind,
                reason,
            }),
        }
    }
    summary
}

fn run_case(path: &Path) -> TestResult {
    let source = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => return TestResult::Skipped(format!("failed to read test: {err}")),
    };

    let meta = parse_frontmatter(&source).unwrap_or_else(TestMetadata::default);
    panic::catch_unwind(AssertUnwindSafe(|| run_test(&source, &meta)))
        .unwrap_or_else(|payload| TestResult::Failed(FailureKind::Panicked, panic_text(payload)))
}

fn print_result(path: &Path, result: &TestResult) {
    match result {
        TestResult::Passed => println!("{} {}", "PASS".green(), path.display()),
        TestResult::Failed(kind, reason) => println!(
            "{} {} - {}: {}",
            "FAIL".red(),
            path.display(),
            kind.label(),
            reason
        ),
        TestResult::Skipped(reason) => {
            println!("{} {} - {}", "SKIP".yellow(), path.display(), reason)
        }
    }
}

fn panic_text(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|msg| msg.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "panic without message".to_string())
}
