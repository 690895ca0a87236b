use std::collections::HashMap;
use std::path::{Component, Path};

use crate::runner::{FailureKind, TestResult};

#[derive(Default, Clone, Copy)]
pub struct SectionStats {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}

impl SectionStats {
    pub fn pass_rate(&self) -> f64 {
        if self.total == self.skipped {
            return 1.0;
        }
        self.passed as f64 / (self.total - self.skipped) as f64
    }
}

/// Per-directory counts plus the most frequent causes of failures and skips.
#[derive(Default)]
pub struct Analysis {
    pub sections: HashMap<String, SectionStats>,
    pub failure_kinds: HashMap<FailureKind, usize>,
    pub parse_errors: HashMap<String, usize>,
    pub skip_reasons: HashMap<String, usize>,
}

impl Analysis {
    pub fn record(&mut self, root: &Path, path: &Path, result: &TestResult) {
        let stats = self.sections.entry(section_of(root, path)).or_default();
        stats.total += 1;

        match result {
            TestResult::Passed => stats.passed += 1,
            TestResult::Failed(kind, reason) => {
                stats.failed += 1;
                *self.failure_kinds.entry(*kind).or_default() += 1;
                if *kind == FailureKind::Rejected {
                    *self.parse_errors.entry(error_shape(reason)).or_default() += 1;
                }
            }
            TestResult::Skipped(reason) => {
                stats.skipped += 1;
                *self.skip_reasons.entry(reason.clone()).or_default() += 1;
            }
        }
    }
}

/// First two directories below the suite root, e.g. `language/expressions`.
fn section_of(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let dirs: Vec<_> = rel
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .take(2)
        .collect();
    if dirs.is_empty() {
        "(root)".to_string()
    } else {
        dirs.join("/")
    }
}

/// Group parse errors by message with the position suffix and any quoted
/// token text removed, so one parser gap counts once.
fn error_shape(message: &str) -> String {
    let message = message.split(" (").next().unwrap_or(message);
    let mut shape = String::with_capacity(message.len());
    let mut in_quote = false;
    for ch in message.chars() {
        if ch == '`' {
            if !in_quote {
                shape.push_str("`…");
            }
            in_quote = !in_quote;
        }
        if !in_quote {
            shape.push(ch);
        }
    }
    shape
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_use_two_directories() {
        let root = Path::new("test");
        assert_eq!(
            section_of(root, Path::new("test/language/expressions/class/a.js")),
            "language/expressions"
        );
        assert_eq!(section_of(root, Path::new("test/a.js")), "(root)");
    }

    #[test]
    fn error_shape_drops_position_and_token_text() {
        assert_eq!(
            error_shape("SyntaxError: unknown label `foo` for `break` (3:4)"),
            "SyntaxError: unknown label `…` for `…`"
        );
    }

    #[test]
    fn pass_rate_ignores_skips() {
        let stats = SectionStats {
            total: 4,
            passed: 1,
            failed: 1,
            skipped: 2,
        };
        assert!((stats.pass_rate() - 0.5).abs() < f64::EPSILON);
    }
}
