/// Default bound on nested parser runs
pub const DEFAULT_MAX_DEPTH: usize = 2048;

/// Configuration for a parse run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Name of the source, prefixed to error messages
    pub module: Option<String>,
    /// Maximum nesting of parser runs before the parse aborts
    pub max_depth: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            module: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseConfig {
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
