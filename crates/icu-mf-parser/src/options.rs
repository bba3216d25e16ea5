use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Switches that change how a message is parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Treat `<` and `>` as plain text instead of tag delimiters.
    pub ignore_tag: bool,
    /// Interpret skeletons into structured options. When off, number skeletons
    /// are only tokenized and date/time skeletons are kept as raw patterns.
    pub should_parse_skeletons: bool,
    /// Carried on the options for formatters; the parser does not read it.
    pub locale: Option<String>,
    /// Record source locations on AST nodes.
    pub capture_location: bool,
    /// Fail plural and select arguments that lack an `other` branch.
    pub requires_other_clause: bool,
    /// Deepest allowed nesting of sub-messages and tags.
    pub max_nesting_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            ignore_tag: false,
            should_parse_skeletons: true,
            locale: None,
            capture_location: true,
            requires_other_clause: true,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ParserOptions {
    pub fn with_ignore_tag(mut self, ignore_tag: bool) -> Self {
        self.ignore_tag = ignore_tag;
        self
    }

    pub fn with_should_parse_skeletons(mut self, should_parse_skeletons: bool) -> Self {
        self.should_parse_skeletons = should_parse_skeletons;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_capture_location(mut self, capture_location: bool) -> Self {
        self.capture_location = capture_location;
        self
    }

    pub fn with_requires_other_clause(mut self, requires_other_clause: bool) -> Self {
        self.requires_other_clause = requires_other_clause;
        self
    }

    pub fn with_max_nesting_depth(mut self, max_nesting_depth: usize) -> Self {
        self.max_nesting_depth = max_nesting_depth;
        self
    }
}
