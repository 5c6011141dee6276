use thiserror::Error;

/// Source location information for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize) -> Self {
        Self { line }
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}", self.line)
    }
}

/// Errors raised at the conversion boundary.
///
/// Converting text never fails; only interpreting caller-supplied settings can.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The requested direction name is not recognised.
    #[error("Unknown conversion direction: '{0}' (expected 'o2c' or 'c2o')")]
    UnknownDirection(String),
}

/// Non-fatal warnings raised when a region had to be closed implicitly
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionWarning {
    /// Frontmatter opened with `---` but never closed
    UnclosedFrontmatter {
        /// Line where the frontmatter started
        location: SourceLocation,
    },
    /// Code fence opened but never closed
    UnclosedCodeFence {
        /// Line where the fence (or `code:` header) started
        location: SourceLocation,
        /// Language tag carried by the fence
        lang: String,
    },
    /// Dataview fence opened but never closed
    UnclosedDataviewFence {
        /// Line where the fence started
        location: SourceLocation,
    },
}

impl ConversionWarning {
    /// Get the location of this warning
    pub fn location(&self) -> &SourceLocation {
        match self {
            ConversionWarning::UnclosedFrontmatter { location } => location,
            ConversionWarning::UnclosedCodeFence { location, .. } => location,
            ConversionWarning::UnclosedDataviewFence { location } => location,
        }
    }
}

impl std::fmt::Display for ConversionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionWarning::UnclosedFrontmatter { location } => {
                write!(f, "Unclosed frontmatter: {}", location)
            }
            ConversionWarning::UnclosedCodeFence { location, lang } => {
                write!(f, "Unclosed code fence ({}): {}", lang, location)
            }
            ConversionWarning::UnclosedDataviewFence { location } => {
                write!(f, "Unclosed dataview fence: {}", location)
            }
        }
    }
}

/// Collection of conversion diagnostics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionDiagnostics {
    /// List of non-fatal warnings
    pub warnings: Vec<ConversionWarning>,
}

impl ConversionDiagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a warning to the diagnostics collection
    pub fn add_warning(&mut self, warning: ConversionWarning) {
        self.warnings.push(warning);
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Get total count of all diagnostics
    pub fn count(&self) -> usize {
        self.warnings.len()
    }
}
