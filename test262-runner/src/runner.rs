use kaiju::{ParseOptions, SourceType};

use crate::metadata::TestMetadata;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A valid test was rejected.
    Rejected,
    /// A `negative: phase: parse` test was accepted.
    Accepted,
    Panicked,
}

impl FailureKind {
    pub fn label(self) -> &'static str {
        match self {
            FailureKind::Rejected => "rejected valid source",
            FailureKind::Accepted => "accepted invalid source",
            FailureKind::Panicked => "parser panicked",
        }
    }
}

#[derive(Debug, Clone)]
pub enum TestResult {
    Passed,
    Failed(FailureKind, String),
    Skipped(String),
}

/// Parse one test and compare the outcome with its front matter.
pub fn run_test(source: &str, metadata: &TestMetadata) -> TestResult {
    if let Some(feature) = metadata.unsupported_feature() {
        return TestResult::Skipped(format!("unsupported feature: {feature}"));
    }
    // strict-mode early errors are out of scope
    if metadata.expects_parse_error() && metadata.is_only_strict() {
        return TestResult::Skipped("strict-mode early error".into());
    }

    let source_type = if metadata.is_module() {
        SourceType::Module
    } else {
        SourceType::Script
    };
    let options = ParseOptions::new().with_source_type(source_type);

    match (kaiju::parse_with_options(source, &options), metadata.expects_parse_error()) {
        (Ok(_), false) | (Err(_), true) => TestResult::Passed,
        (Ok(_), true) => TestResult::Failed(
            FailureKind::Accepted,
            "expected SyntaxError but parse succeeded".into(),
        ),
        (Err(err), false) => TestResult::Failed(FailureKind::Rejected, err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::parse_frontmatter;

    fn run(source: &str) -> TestResult {
        let meta = parse_frontmatter(source).unwrap_or_default();
        run_test(source, &meta)
    }

    #[test]
    fn valid_source_passes() {
        assert!(matches!(run("var x = [1, 2];"), TestResult::Passed));
    }

    #[test]
    fn negative_parse_test_passes_on_error() {
        let source = "/*---\nnegative:\n  phase: parse\n  type: SyntaxError\n---*/\nvar = ;";
        assert!(matches!(run(source), TestResult::Passed));
    }

    #[test]
    fn accepted_negative_test_fails() {
        let source = "/*---\nnegative:\n  phase: parse\n  type: SyntaxError\n---*/\nvar a;";
        assert!(matches!(
            run(source),
            TestResult::Failed(FailureKind::Accepted, _)
        ));
    }

    #[test]
    fn module_flag_enables_import() {
        let source = "/*---\nflags: [module]\n---*/\nimport a from './a.js';";
        assert!(matches!(run(source), TestResult::Passed));
        assert!(matches!(
            run("import a from './a.js';"),
            TestResult::Failed(FailureKind::Rejected, _)
        ));
    }

    #[test]
    fn unsupported_features_are_skipped() {
        let source = "/*---\nfeatures: [BigInt]\n---*/\n1n;";
        assert!(matches!(run(source), TestResult::Skipped(_)));
    }
}
