use std::cmp::Reverse;
use std::collections::HashMap;
use std::hash::Hash;

use colored::Colorize;

use super::Analysis;

pub fn print_analysis(analysis: &Analysis) {
    println!("\n{}", "Analysis (--analyze)".bold().cyan());
    print_sections(analysis);

    let kinds: HashMap<&str, usize> = analysis
        .failure_kinds
        .iter()
        .map(|(kind, count)| (kind.label(), *count))
        .collect();
    print_ranked("Failures by kind:", &kinds, 3);
    print_ranked("Most common parse errors on valid tests:", &analysis.parse_errors, 10);
    print_ranked("Most common skip reasons:", &analysis.skip_reasons, 5);
}

fn print_sections(analysis: &Analysis) {
    const MIN_TESTS: usize = 25;

    let mut sections: Vec<_> = analysis
        .sections
        .iter()
        .filter(|(_, stats)| stats.total >= MIN_TESTS)
        .collect();
    if sections.is_empty() {
        return;
    }
    sections.sort_by(|a, b| {
        a.1.pass_rate()
            .total_cmp(&b.1.pass_rate())
            .then_with(|| b.1.total.cmp(&a.1.total))
    });

    println!(
        "\n{} {MIN_TESTS} tests):",
        "Weakest sections (by pass rate, >=".bold()
    );
    for (name, stats) in sections.iter().take(10) {
        println!(
            "  {:36} pass {:>6.1}% | {:>5} pass {:>5} fail {:>5} skip",
            name,
            stats.pass_rate() * 100.0,
            stats.passed,
            stats.failed,
            stats.skipped
        );
    }
}

fn print_ranked<K: Hash + Eq + std::fmt::Display>(
    title: &str,
    counts: &HashMap<K, usize>,
    limit: usize,
) {
    if counts.is_empty() {
        return;
    }
    let mut rows: Vec<_> = counts.iter().collect();
    rows.sort_by_key(|(_, count)| Reverse(**count));

    println!("\n{}", title.bold());
    for (label, count) in rows.into_iter().take(limit) {
        println!("  {:>5}x {}", count, label);
    }
}
