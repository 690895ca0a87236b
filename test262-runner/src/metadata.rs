use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Negative {
    pub phase: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

/// YAML front matter of a Test262 file, limited to what a parse-only run needs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TestMetadata {
    #[serde(default)]
    pub flags: Vec<String>,
    #[serde(default)]
    pub negative: Option<Negative>,
    #[serde(default)]
    pub features: Vec<String>,
}

/// Features whose syntax lies outside the ES2017 + object rest/spread grammar.
const UNSUPPORTED_FEATURES: &[&str] = &[
    "arbitrary-module-namespace-names",
    "async-iteration",
    "BigInt",
    "class-fields-private",
    "class-fields-private-in",
    "class-fields-public",
    "class-methods-private",
    "class-static-block",
    "class-static-fields-private",
    "class-static-fields-public",
    "class-static-methods-private",
    "coalesce-expression",
    "decorators",
    "dynamic-import",
    "explicit-resource-management",
    "export-star-as-namespace-from-module",
    "import-assertions",
    "import-attributes",
    "import-defer",
    "import.meta",
    "json-modules",
    "json-superset",
    "logical-assignment-operators",
    "new.target",
    "numeric-separator-literal",
    "optional-catch-binding",
    "optional-chaining",
    "regexp-dotall",
    "regexp-duplicate-named-groups",
    "regexp-lookbehind",
    "regexp-match-indices",
    "regexp-modifiers",
    "regexp-named-groups",
    "regexp-unicode-property-escapes",
    "regexp-v-flag",
    "source-phase-imports",
    "top-level-await",
];

impl TestMetadata {
    pub fn is_module(&self) -> bool {
        self.has_flag("module")
    }

    pub fn is_only_strict(&self) -> bool {
        self.has_flag("onlyStrict")
    }

    fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// The test must fail to parse.
    pub fn expects_parse_error(&self) -> bool {
        self.negative
            .as_ref()
            .is_some_and(|negative| negative.phase == "parse")
    }

    pub fn unsupported_feature(&self) -> Option<&str> {
        self.features
            .iter()
            .map(String::as_str)
            .find(|feature| UNSUPPORTED_FEATURES.contains(feature))
    }
}

pub fn parse_frontmatter(source: &str) -> Option<TestMetadata> {
    let start_marker = "/*---";
    let end_marker = "---*/";

    let start = source.find(start_marker)?;
    let yaml_start = start + start_marker.len();
    let end = source[yaml_start..].find(end_marker)?;
    let yaml_str = &source[yaml_start..yaml_start + end];

    serde_yaml::from_str(yaml_str).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_frontmatter() {
        let source = r#"// Copyright
/*---
includes: [propertyHelper.js]
flags: [onlyStrict]
features: [destructuring-binding]
---*/
var x = 1;
"#;
        let meta = parse_frontmatter(source).unwrap();
        assert!(meta.is_only_strict());
        assert!(!meta.expects_parse_error());
        assert_eq!(meta.unsupported_feature(), None);
    }

    #[test]
    fn test_negative_frontmatter() {
        let source = r#"/*---
negative:
  phase: parse
  type: SyntaxError
flags:
  - module
---*/
export var a, a;
"#;
        let meta = parse_frontmatter(source).unwrap();
        let neg = meta.negative.as_ref().unwrap();
        assert_eq!(neg.error_type, "SyntaxError");
        assert!(meta.expects_parse_error());
        assert!(meta.is_module());
    }

    #[test]
    fn test_runtime_negative_is_not_a_parse_error() {
        let source = "/*---\nnegative:\n  phase: runtime\n  type: TypeError\n---*/";
        let meta = parse_frontmatter(source).unwrap();
        assert!(!meta.expects_parse_error());
    }

    #[test]
    fn test_unsupported_feature() {
        let source = "/*---\nfeatures: [Symbol, optional-chaining]\n---*/\na?.b;";
        let meta = parse_frontmatter(source).unwrap();
        assert_eq!(meta.unsupported_feature(), Some("optional-chaining"));
    }

    #[test]
    fn test_no_frontmatter() {
        let source = "var x = 1;";
        assert!(parse_frontmatter(source).is_none());
    }
}
