//! Block segmenter for Markdown -> Consense.
//!
//! Each input line is handled by exactly one state handler. `Normal` tries the
//! block rules in priority order (frontmatter, fences, heading, rule,
//! checklist, list, blockquote, table row) and falls back to prose.

use std::sync::LazyLock;

use regex::Regex;

use crate::code_fence::{FenceLine, classify_fence_line, is_bare_fence, mark_region_line};
use crate::error::{ConversionDiagnostics, ConversionWarning, SourceLocation};
use crate::frontmatter::flatten_frontmatter;
use crate::line::{Line, Segmented};
use crate::table::{
    TABLE_HEADER, consense_row, is_delimiter_row, is_markdown_row, markdown_cells,
};

/// Consense token for a horizontal rule.
pub const RULE_TOKEN: &str = "----";

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static RULE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:-{3,}|\*{3,}|_{3,})$").unwrap());
static CHECKLIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\s*)(?:[-*]|\d+\.)\s+\[([x\s])\]\s+(.*)$").unwrap()
});
static LIST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)([-*]|\d+\.)\s+(.*)$").unwrap());
static CALLOUT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[(!\w+)\]\s*(.*)$").unwrap());

/// Number of bracket stars for a Markdown heading level.
///
/// Levels 5 and 6 share level 4's single star; the reverse direction cannot
/// tell them apart.
pub fn stars_for_level(level: usize) -> usize {
    match level {
        1 => 4,
        2 => 3,
        3 => 2,
        _ => 1,
    }
}

/// Consense indentation for a list item with `leading` whitespace characters.
pub fn list_indent(leading: &str) -> String {
    " ".repeat(leading.chars().count() / 2 + 1)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ForwardState {
    #[default]
    Normal,
    Frontmatter {
        opened_at: usize,
        buffer: Vec<String>,
    },
    CodeFence {
        opened_at: usize,
        lang: String,
    },
    DataviewFence {
        opened_at: usize,
    },
    Table,
}

/// Line-at-a-time Markdown segmenter.
#[derive(Debug, Default)]
pub struct ForwardSegmenter {
    state: ForwardState,
    lines: Vec<Line>,
    diagnostics: ConversionDiagnostics,
}

impl ForwardSegmenter {
    /// Fresh segmenter in the `Normal` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the line at zero-based `index`.
    pub fn push_line(&mut self, index: usize, line: &str) {
        let state = std::mem::take(&mut self.state);
        let next = match state {
            ForwardState::Normal => self.normal(index, line),
            ForwardState::Frontmatter {
                opened_at,
                mut buffer,
            } => {
                if line.trim() == "---" {
                    self.flush_frontmatter(&buffer);
                    ForwardState::Normal
                } else {
                    buffer.push(line.to_string());
                    ForwardState::Frontmatter { opened_at, buffer }
                }
            }
            ForwardState::CodeFence { opened_at, lang } => match classify_fence_line(line) {
                Some(FenceLine::Code { .. }) => ForwardState::Normal,
                _ => {
                    self.emit(Line::markup(mark_region_line(line)));
                    ForwardState::CodeFence { opened_at, lang }
                }
            },
            ForwardState::DataviewFence { opened_at } => {
                if is_bare_fence(line) || classify_fence_line(line) == Some(FenceLine::Dataview) {
                    ForwardState::Normal
                } else {
                    self.emit(Line::markup(mark_region_line(line)));
                    ForwardState::DataviewFence { opened_at }
                }
            }
            ForwardState::Table => {
                if is_markdown_row(line) {
                    self.table_row(line);
                    ForwardState::Table
                } else {
                    self.normal(index, line)
                }
            }
        };
        log::trace!("forward line {}: {:?}", index + 1, next);
        self.state = next;
    }

    /// Close whatever region is still open and return the output.
    pub fn finish(mut self) -> Segmented {
        match std::mem::take(&mut self.state) {
            ForwardState::Frontmatter { opened_at, buffer } => {
                self.flush_frontmatter(&buffer);
                self.diagnostics
                    .add_warning(ConversionWarning::UnclosedFrontmatter {
                        location: SourceLocation::new(opened_at),
                    });
            }
            ForwardState::CodeFence { opened_at, lang } => {
                self.diagnostics.add_warning(ConversionWarning::UnclosedCodeFence {
                    location: SourceLocation::new(opened_at),
                    lang,
                });
            }
            ForwardState::DataviewFence { opened_at } => {
                self.diagnostics
                    .add_warning(ConversionWarning::UnclosedDataviewFence {
                        location: SourceLocation::new(opened_at),
                    });
            }
            ForwardState::Normal | ForwardState::Table => {}
        }
        Segmented {
            lines: self.lines,
            diagnostics: self.diagnostics,
        }
    }

    fn emit(&mut self, line: Line) {
        self.lines.push(line);
    }

    fn flush_frontmatter(&mut self, buffer: &[String]) {
        for entry in flatten_frontmatter(buffer) {
            self.emit(Line::markup(entry));
        }
    }

    fn normal(&mut self, index: usize, line: &str) -> ForwardState {
        if index == 0 && line.trim() == "---" {
            return ForwardState::Frontmatter {
                opened_at: index + 1,
                buffer: Vec::new(),
            };
        }

        match classify_fence_line(line) {
            Some(FenceLine::Code { lang }) => {
                self.emit(Line::markup(format!("code:{lang}")));
                return ForwardState::CodeFence {
                    opened_at: index + 1,
                    lang,
                };
            }
            Some(FenceLine::Dataview) => {
                self.emit(Line::markup("dataview:"));
                return ForwardState::DataviewFence {
                    opened_at: index + 1,
                };
            }
            None => {}
        }

        if let Some(caps) = HEADING.captures(line) {
            let stars = "*".repeat(stars_for_level(caps[1].len()));
            self.emit(
                Line::markup(format!("[{stars} "))
                    .push_text(caps[2].trim())
                    .push_markup("]"),
            );
            return ForwardState::Normal;
        }

        if RULE.is_match(line) {
            self.emit(Line::markup(RULE_TOKEN));
            return ForwardState::Normal;
        }

        if let Some(caps) = CHECKLIST.captures(line) {
            let indent = list_indent(&caps[1]);
            self.emit(Line::markup(format!("{indent}[{}] ", &caps[2])).push_text(&caps[3]));
            return ForwardState::Normal;
        }

        if let Some(caps) = LIST_ITEM.captures(line) {
            let indent = list_indent(&caps[1]);
            let bullet = &caps[2];
            let head = if bullet.ends_with('.') {
                format!("{indent}{bullet} ")
            } else {
                indent
            };
            self.emit(Line::markup(head).push_text(&caps[3]));
            return ForwardState::Normal;
        }

        if line.starts_with('>') {
            self.blockquote(line);
            return ForwardState::Normal;
        }

        if is_markdown_row(line) {
            self.emit(Line::markup(TABLE_HEADER));
            self.table_row(line);
            return ForwardState::Table;
        }

        self.emit(Line::text(line));
        ForwardState::Normal
    }

    fn blockquote(&mut self, line: &str) {
        let mut rest = line;
        let mut depth = 0usize;
        while let Some(stripped) = rest.strip_prefix('>') {
            rest = stripped.trim_start();
            depth += 1;
        }
        let indent = " ".repeat(depth);
        let out = match CALLOUT.captures(rest) {
            Some(caps) => Line::markup(format!("{indent}[{}] ", &caps[1])).push_text(&caps[2]),
            None => Line::markup(indent).push_text(rest),
        };
        self.emit(out);
    }

    fn table_row(&mut self, line: &str) {
        if is_delimiter_row(line) {
            return;
        }
        let cells = markdown_cells(line);
        self.emit(consense_row(&cells));
    }
}

/// Segment a whole Markdown document.
pub fn segment(input: &str) -> Segmented {
    let mut segmenter = ForwardSegmenter::new();
    for (index, line) in input.split('\n').enumerate() {
        segmenter.push_line(index, line);
    }
    segmenter.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(input: &str) -> Vec<String> {
        segment(input).lines.iter().map(Line::raw).collect()
    }

    #[test]
    fn heading_levels_map_to_star_runs() {
        assert_eq!(raw("# A"), vec!["[**** A]"]);
        assert_eq!(raw("## A"), vec!["[*** A]"]);
        assert_eq!(raw("### A"), vec!["[** A]"]);
        assert_eq!(raw("#### A"), vec!["[* A]"]);
        assert_eq!(raw("##### A"), vec!["[* A]"]);
        assert_eq!(raw("###### A"), vec!["[* A]"]);
    }

    #[test]
    fn hashtag_at_line_start_is_not_a_heading() {
        assert_eq!(raw("#tag here"), vec!["#tag here"]);
        assert_eq!(raw("####### seven"), vec!["####### seven"]);
    }

    #[test]
    fn frontmatter_is_flattened() {
        let out = raw("---\ntitle: Hello: World\ndraft:\n---\nBody");
        assert_eq!(out, vec!["title: Hello: World", "draft", "----", "Body"]);
    }

    #[test]
    fn empty_frontmatter_emits_nothing() {
        assert_eq!(raw("---\n---\nBody"), vec!["Body"]);
    }

    #[test]
    fn rule_not_at_start_is_horizontal_rule() {
        assert_eq!(raw("a\n---\n***\n___"), vec!["a", "----", "----", "----"]);
    }

    #[test]
    fn unterminated_frontmatter_is_flushed_with_warning() {
        let result = segment("---\ntitle: x");
        let out: Vec<String> = result.lines.iter().map(Line::raw).collect();
        assert_eq!(out, vec!["title: x", "----"]);
        assert_eq!(
            result.diagnostics.warnings,
            vec![ConversionWarning::UnclosedFrontmatter {
                location: SourceLocation::new(1)
            }]
        );
    }

    #[test]
    fn code_fence_interior_is_marked_verbatim() {
        let out = raw("```Rust\nfn main() {\n    # not a heading\n}\n```\nafter");
        assert_eq!(
            out,
            vec![
                "code:rust",
                " fn main() {",
                "     # not a heading",
                " }",
                "after"
            ]
        );
    }

    #[test]
    fn code_fence_without_language_defaults_to_text() {
        assert_eq!(raw("```\nx\n```"), vec!["code:text", " x"]);
    }

    #[test]
    fn unterminated_code_fence_warns() {
        let result = segment("intro\n```js\nlet a;");
        assert_eq!(
            result.diagnostics.warnings,
            vec![ConversionWarning::UnclosedCodeFence {
                location: SourceLocation::new(2),
                lang: "js".to_string()
            }]
        );
        assert_eq!(result.lines.last().map(Line::raw).as_deref(), Some(" let a;"));
    }

    #[test]
    fn dataview_fence_has_its_own_header() {
        let out = raw("```dataview\nLIST FROM #tag\n```\ndone");
        assert_eq!(out, vec!["dataview:", " LIST FROM #tag", "done"]);
    }

    #[test]
    fn dataview_does_not_close_on_language_fence() {
        let out = raw("```dataview\n```js\n```");
        assert_eq!(out, vec!["dataview:", " ```js"]);
    }

    #[test]
    fn checklists_carry_state_and_indent() {
        assert_eq!(
            raw("- [ ] todo\n  - [x] done\n1. [x] numbered"),
            vec![" [ ] todo", "  [x] done", " [x] numbered"]
        );
        assert_eq!(raw("- [x] top")[0], " [x] top");
    }

    #[test]
    fn list_indent_halves_and_floors() {
        assert_eq!(
            raw("- a\n  - b\n   - c\n    - d"),
            vec![" a", "  b", "  c", "   d"]
        );
    }

    #[test]
    fn numbered_items_keep_numeral() {
        assert_eq!(raw("1. first\n10. tenth"), vec![" 1. first", " 10. tenth"]);
    }

    #[test]
    fn blockquotes_count_depth() {
        assert_eq!(raw("> quote"), vec![" quote"]);
        assert_eq!(raw(">> > deep"), vec!["   deep"]);
    }

    #[test]
    fn callouts_keep_their_tag() {
        assert_eq!(raw("> [!note] Heads up"), vec![" [!note] Heads up"]);
        assert_eq!(raw("> [!WARNING]"), vec![" [!WARNING] "]);
    }

    #[test]
    fn table_gets_header_and_drops_delimiter() {
        let out = raw("| A | B |\n|---|:--:|\n| 1 | 2 |\ntext");
        assert_eq!(out, vec!["table:", " A | B", " 1 | 2", "text"]);
    }

    #[test]
    fn separate_tables_get_separate_headers() {
        let out = raw("| a |\n\n| b |");
        assert_eq!(out, vec!["table:", " a", "", "table:", " b"]);
    }

    #[test]
    fn prose_falls_through_as_text() {
        let result = segment("plain *text*");
        assert_eq!(
            result.lines[0].segments(),
            &[crate::line::Segment::Text("plain *text*".to_string())]
        );
    }
}
