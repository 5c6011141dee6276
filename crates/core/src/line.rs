//! Output lines produced by the block segmenters.
//!
//! A segmenter knows which parts of a line are structure it emitted itself
//! (heading brackets, bullets, table separators, fence lines, code interiors)
//! and which parts are prose carried over from the input. Only prose is handed
//! to the inline transformer, so structural markers can never be rewritten as
//! emphasis and inline matches never cross a line boundary.

use crate::error::ConversionDiagnostics;

/// One piece of an output line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Structural text emitted verbatim.
    Markup(String),
    /// Prose eligible for inline style rewriting.
    Text(String),
}

/// A single output line built from segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    /// Empty line builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A line made entirely of literal markup.
    pub fn markup(text: impl Into<String>) -> Self {
        Self::new().push_markup(text)
    }

    /// A line made entirely of prose.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new().push_text(text)
    }

    /// Append a markup segment.
    pub fn push_markup(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment::Markup(text));
        }
        self
    }

    /// Append a prose segment.
    pub fn push_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.segments.push(Segment::Text(text));
        }
        self
    }

    /// Segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The line with every segment emitted verbatim.
    pub fn raw(&self) -> String {
        self.render(|text| text.to_string())
    }

    /// Render the line, passing prose segments through `inline`.
    pub fn render<F>(&self, inline: F) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Markup(text) => out.push_str(text),
                Segment::Text(text) => out.push_str(&inline(text)),
            }
        }
        out
    }
}

/// Output of a segmenter pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmented {
    /// Lines in document order.
    pub lines: Vec<Line>,
    /// Implicit closures noticed while segmenting.
    pub diagnostics: ConversionDiagnostics,
}

/// Render a sequence of lines and join them with `\n`.
pub fn render_lines<F>(lines: &[Line], inline: F) -> String
where
    F: Fn(&str) -> String,
{
    lines
        .iter()
        .map(|line| line.render(&inline))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_only_touches_text_segments() {
        let line = Line::markup("[** ").push_text("abc").push_markup("]");
        let out = line.render(|t| t.to_uppercase());
        assert_eq!(out, "[** ABC]");
        assert_eq!(line.raw(), "[** abc]");
    }

    #[test]
    fn empty_segments_are_skipped() {
        let line = Line::markup("").push_text("");
        assert!(line.segments().is_empty());
        assert_eq!(line.raw(), "");
    }

    #[test]
    fn joins_lines_with_newline() {
        let lines = vec![Line::text("a"), Line::new(), Line::markup("b")];
        assert_eq!(render_lines(&lines, |t| t.to_string()), "a\n\nb");
    }

    #[test]
    fn default_segmented_output_has_no_warnings() {
        let out = Segmented::default();
        assert!(out.lines.is_empty());
        assert_eq!(out.diagnostics, ConversionDiagnostics::new());
    }
}
