#![deny(missing_docs)]
//! Consense core: line-oriented conversion between Obsidian Markdown and the
//! Consense outliner dialect.
//!
//! A conversion runs in two passes. A block segmenter walks the document
//! line by line and splits every output line into structural markup and
//! prose. The inline rewriter then converts the prose segments only.

/// Fence and region-header helpers shared by both segmenters.
pub mod code_fence;
/// Core error and diagnostic types.
pub mod error;
/// Markdown -> Consense block segmenter.
pub mod forward;
/// Frontmatter flattening.
pub mod frontmatter;
/// Inline style rewriting in both directions.
pub mod inline;
/// Output lines split into markup and text segments.
pub mod line;
/// Conversion direction.
pub mod options;
/// Consense -> Markdown block segmenter.
pub mod reverse;
/// Table row helpers.
pub mod table;

pub use error::{ConversionDiagnostics, ConversionWarning, ConvertError, SourceLocation};
pub use inline::{to_consense_inline, to_markdown_inline};
pub use line::{Line, Segment, Segmented, render_lines};
pub use options::Direction;

/// Converted text together with anything noticed along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversion {
    /// Converted document.
    pub output: String,
    /// Regions that had to be closed at end of input.
    pub diagnostics: ConversionDiagnostics,
}

/// Convert an Obsidian Markdown document to Consense.
pub fn to_consense(input: &str) -> String {
    convert(input, Direction::ToConsense)
}

/// Convert a Consense document to Obsidian Markdown.
pub fn to_markdown(input: &str) -> String {
    convert(input, Direction::ToMarkdown)
}

/// Convert `input` in the given direction.
pub fn convert(input: &str, direction: Direction) -> String {
    convert_with_diagnostics(input, direction).output
}

/// Convert `input` and report unclosed regions.
///
/// Conversion never fails; malformed input is passed through and anything
/// that had to be closed implicitly is listed in the diagnostics.
pub fn convert_with_diagnostics(input: &str, direction: Direction) -> Conversion {
    let Segmented { lines, diagnostics } = match direction {
        Direction::ToConsense => forward::segment(input),
        Direction::ToMarkdown => reverse::segment(input),
    };

    let output = match direction {
        Direction::ToConsense => render_lines(&lines, inline::to_consense_line),
        Direction::ToMarkdown => render_lines(&lines, inline::to_markdown_line),
    };

    log::debug!(
        "{direction}: {} input bytes -> {} lines, {} warnings",
        input.len(),
        lines.len(),
        diagnostics.count()
    );

    Conversion {
        output,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(to_consense(""), "");
        assert_eq!(to_markdown(""), "");
    }

    #[test]
    fn convert_dispatches_on_direction() {
        assert_eq!(convert("# Title", Direction::ToConsense), "[**** Title]");
        assert_eq!(convert("[**** Title]", Direction::ToMarkdown), "# Title");
    }

    #[test]
    fn headings_convert_their_text() {
        assert_eq!(to_consense("## A **b**"), "[*** A [* b]]");
        assert_eq!(to_markdown("[*** A [* b]]"), "## A **b**");
    }

    #[test]
    fn code_interior_is_never_restyled() {
        assert_eq!(
            to_consense("```\n**x**\n```"),
            "code:text\n **x**"
        );
        assert_eq!(to_markdown("code:text\n [* x]"), "```text\n[* x]\n```");
    }

    #[test]
    fn diagnostics_report_unclosed_fence() {
        let result = convert_with_diagnostics("```rust\nfn x() {}", Direction::ToConsense);
        assert_eq!(result.output, "code:rust\n fn x() {}");
        assert_eq!(result.diagnostics.count(), 1);
        assert_eq!(
            result.diagnostics.warnings[0].location(),
            &SourceLocation::new(1)
        );
    }

    #[test]
    fn reverse_never_warns() {
        let result = convert_with_diagnostics("code:js\n let a;", Direction::ToMarkdown);
        assert_eq!(result.output, "```js\nlet a;\n```");
        assert!(!result.diagnostics.has_warnings());
    }
}
