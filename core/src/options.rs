use serde::Serialize;

/// Goal symbol of the parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    #[default]
    Script,
    /// Enables top-level `import` and `export`.
    Module,
}

/// Nesting limit used unless a caller raises it. Deeper input fails with
/// a `ParseError` rather than exhausting the thread's stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs accepted by [`crate::parse_with_options`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub source_type: SourceType,
    pub allow_return_outside_function: bool,
    /// Statements, expressions and patterns that may be open at once.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            source_type: SourceType::default(),
            allow_return_outside_function: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn module() -> Self {
        Self::default().with_source_type(SourceType::Module)
    }

    pub fn with_source_type(mut self, source_type: SourceType) -> Self {
        self.source_type = source_type;
        self
    }

    pub fn with_allow_return_outside_function(mut self, allow: bool) -> Self {
        self.allow_return_outside_function = allow;
        self
    }

    /// Callers running on a large stack can accept deeper nesting.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_module(&self) -> bool {
        self.source_type == SourceType::Module
    }
}
