//! Block segmenter for Consense -> Markdown.
//!
//! Consense regions have no closing delimiter: a `code:` or `table:` region
//! lasts while lines carry the one-space region marker. The segmenter sees
//! each line together with the next one, so a region can end without
//! rewinding the line stream. A handler either consumes its line, consumes the
//! lookahead as well, or hands the same line back to `Normal`.

use std::sync::LazyLock;

use regex::Regex;

use crate::code_fence::{RegionHeader, is_region_line, parse_region_header, strip_region_marker};
use crate::forward::RULE_TOKEN;
use crate::line::{Line, Segmented};
use crate::table::{consense_cells, is_separator_only, markdown_delimiter, markdown_row};

static CHECKLIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)\[([x\s])\]\s+(.*)$").unwrap());
static INDENTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\s+)(.*)$").unwrap());
static NUMBERED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+\.\s+)(.*)$").unwrap());

/// Markdown heading level for a bracket star count.
///
/// Only 4/3/2 stars have dedicated levels; everything else reads as level 4.
pub fn level_for_stars(stars: usize) -> usize {
    match stars {
        4 => 1,
        3 => 2,
        2 => 3,
        _ => 4,
    }
}

/// Markdown indentation for a Consense line with `leading` whitespace characters.
pub fn markdown_indent(leading: &str) -> String {
    "  ".repeat(leading.chars().count().saturating_sub(1))
}

/// Parse a whole-line heading token such as `[*** Title]`.
///
/// The bracket opened at the start of the line must be the one closed by its
/// final character, so `[* a] and [/ b]` is not a heading.
pub fn parse_heading_token(line: &str) -> Option<(usize, &str)> {
    if !line.starts_with('[') || closing_bracket(line) != Some(line.len() - 1) {
        return None;
    }
    let inner = &line[1..line.len() - 1];
    let stars = inner.chars().take_while(|c| *c == '*').count();
    if !(1..=6).contains(&stars) {
        return None;
    }
    let rest = &inner[stars..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((stars, rest.trim()))
}

/// Byte index of the `]` balancing the `[` at the start of `text`.
fn closing_bracket(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum ReverseState {
    #[default]
    Normal,
    Code {
        lang: String,
    },
    Table,
}

/// What a handler did with its line.
#[derive(Debug)]
enum Flow {
    /// Line consumed.
    Next(ReverseState),
    /// Line and lookahead consumed.
    SkipNext(ReverseState),
    /// Line not consumed; handle it again in the given state.
    Reprocess(ReverseState),
}

/// Line-at-a-time Consense segmenter with one line of lookahead.
#[derive(Debug, Default)]
pub struct ReverseSegmenter {
    state: ReverseState,
    lines: Vec<Line>,
}

impl ReverseSegmenter {
    /// Fresh segmenter in the `Normal` state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line with the line that follows it, if any.
    ///
    /// Returns `true` when the lookahead line was consumed too and must be
    /// skipped by the caller.
    pub fn push_line(&mut self, line: &str, lookahead: Option<&str>) -> bool {
        let mut state = std::mem::take(&mut self.state);
        loop {
            let flow = match state {
                ReverseState::Normal => self.normal(line, lookahead),
                ReverseState::Code { lang } => self.code(lang, line, lookahead),
                ReverseState::Table => self.table(line, lookahead),
            };
            log::trace!("reverse {:?}", flow);
            match flow {
                Flow::Next(next) => {
                    self.state = next;
                    return false;
                }
                Flow::SkipNext(next) => {
                    self.state = next;
                    return true;
                }
                Flow::Reprocess(next) => state = next,
            }
        }
    }

    /// Close an open code region and return the output.
    pub fn finish(mut self) -> Segmented {
        if let ReverseState::Code { .. } = self.state {
            self.emit(Line::markup("```"));
        }
        Segmented {
            lines: self.lines,
            diagnostics: Default::default(),
        }
    }

    fn emit(&mut self, line: Line) {
        self.lines.push(line);
    }

    fn code(&mut self, lang: String, line: &str, lookahead: Option<&str>) -> Flow {
        let blank = line.trim().is_empty();
        let region_follows = lookahead.is_some_and(is_region_line);

        if is_region_line(line) {
            self.emit(Line::markup(strip_region_marker(line)));
            if blank && !region_follows {
                self.emit(Line::markup("```"));
                return Flow::Next(ReverseState::Normal);
            }
            return Flow::Next(ReverseState::Code { lang });
        }

        if blank && region_follows {
            self.emit(Line::markup(strip_region_marker(line)));
            return Flow::Next(ReverseState::Code { lang });
        }

        self.emit(Line::markup("```"));
        Flow::Reprocess(ReverseState::Normal)
    }

    fn table(&mut self, line: &str, lookahead: Option<&str>) -> Flow {
        let blank = line.trim().is_empty();
        if !blank && !is_region_line(line) {
            return Flow::Reprocess(ReverseState::Normal);
        }
        if blank && !lookahead.is_some_and(is_region_line) {
            return Flow::Reprocess(ReverseState::Normal);
        }

        let row = strip_region_marker(line).trim();
        if row.is_empty() {
            return Flow::Next(ReverseState::Table);
        }
        if is_separator_only(row) || !row.contains('|') {
            return Flow::Reprocess(ReverseState::Normal);
        }
        self.emit(markdown_row(&consense_cells(row)));
        Flow::Next(ReverseState::Table)
    }

    fn normal(&mut self, line: &str, lookahead: Option<&str>) -> Flow {
        match parse_region_header(line) {
            Some(RegionHeader::Code { lang }) => {
                self.emit(Line::markup(format!("```{lang}")));
                return Flow::Next(ReverseState::Code { lang });
            }
            Some(RegionHeader::Table) => {
                let header = lookahead
                    .filter(|next| is_region_line(next))
                    .map(|next| strip_region_marker(next).trim())
                    .filter(|row| row.contains('|'));
                return match header {
                    Some(row) => {
                        let cells = consense_cells(row);
                        self.emit(markdown_row(&cells));
                        self.emit(markdown_delimiter(cells.len()));
                        Flow::SkipNext(ReverseState::Table)
                    }
                    None => {
                        self.emit(Line::markup(line));
                        Flow::Next(ReverseState::Normal)
                    }
                };
            }
            None => {}
        }

        if let Some((stars, text)) = parse_heading_token(line) {
            let hashes = "#".repeat(level_for_stars(stars));
            self.emit(Line::markup(format!("{hashes} ")).push_text(text));
            return Flow::Next(ReverseState::Normal);
        }

        if line.trim() == RULE_TOKEN {
            self.emit(Line::markup("---"));
            return Flow::Next(ReverseState::Normal);
        }

        if let Some(caps) = CHECKLIST.captures(line) {
            let indent = markdown_indent(&caps[1]);
            self.emit(Line::markup(format!("{indent}- [{}] ", &caps[2])).push_text(&caps[3]));
            return Flow::Next(ReverseState::Normal);
        }

        if let Some(caps) = INDENTED.captures(line) {
            let content = &caps[2];
            if content.trim().is_empty() {
                self.emit(Line::markup(line));
                return Flow::Next(ReverseState::Normal);
            }
            let indent = markdown_indent(&caps[1]);
            let out = match NUMBERED.captures(content) {
                Some(num) => Line::markup(format!("{indent}{}", &num[1])).push_text(&num[2]),
                None => Line::markup(format!("{indent}- ")).push_text(content),
            };
            self.emit(out);
            return Flow::Next(ReverseState::Normal);
        }

        self.emit(Line::text(line));
        Flow::Next(ReverseState::Normal)
    }
}

/// Segment a whole Consense document.
pub fn segment(input: &str) -> Segmented {
    let mut segmenter = ReverseSegmenter::new();
    let mut lines = input.split('\n').peekable();
    while let Some(line) = lines.next() {
        let lookahead = lines.peek().copied();
        if segmenter.push_line(line, lookahead) {
            lines.next();
        }
    }
    segmenter.finish()
}
