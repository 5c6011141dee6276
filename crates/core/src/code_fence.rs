//! Fence and region line classification.
//!
//! Markdown delimits literal regions with backtick fences. Consense opens a
//! region with a `code:<lang>`, `dataview:` or `table:` header and marks each
//! interior line with one leading space; the region ends at the first line
//! without that marker.

/// Language recorded when a fence carries no info string.
pub const DEFAULT_LANG: &str = "text";

/// Character marking a line as belonging to the current Consense region.
pub const REGION_MARKER: char = ' ';

/// A Markdown line that opens or closes a fenced region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenceLine {
    /// A generic code fence with its normalized language tag.
    Code {
        /// Lowercased, trimmed info string (or [`DEFAULT_LANG`]).
        lang: String,
    },
    /// A fence whose info string starts with `dataview`.
    Dataview,
}

/// Classify a Markdown line as a fence delimiter.
pub fn classify_fence_line(line: &str) -> Option<FenceLine> {
    let trimmed = line.trim();
    if !trimmed.starts_with("```") {
        return None;
    }
    if is_dataview_fence(trimmed) {
        return Some(FenceLine::Dataview);
    }
    let info = trimmed.trim_start_matches('`').trim();
    let lang = if info.is_empty() {
        DEFAULT_LANG.to_string()
    } else {
        info.to_lowercase()
    };
    Some(FenceLine::Code { lang })
}

fn is_dataview_fence(trimmed: &str) -> bool {
    trimmed.to_lowercase().starts_with("```dataview")
}

/// A bare closing fence (` ``` ` with nothing else on the line).
pub fn is_bare_fence(line: &str) -> bool {
    line.trim() == "```"
}

/// Header line that opens a Consense region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionHeader {
    /// `code:<lang>` or `dataview:`; the payload is the fence language.
    Code {
        /// Language to write after the opening fence.
        lang: String,
    },
    /// `table:`.
    Table,
}

/// Recognise `code:`, `dataview:` and `table:` headers (case-insensitive).
pub fn parse_region_header(line: &str) -> Option<RegionHeader> {
    let lower = line.to_lowercase();
    if lower.starts_with("dataview:") {
        return Some(RegionHeader::Code {
            lang: "dataview".to_string(),
        });
    }
    if lower.starts_with("code:") {
        let lang = line
            .split_once(':')
            .map(|(_, rest)| rest.trim())
            .filter(|rest| !rest.is_empty())
            .unwrap_or(DEFAULT_LANG);
        return Some(RegionHeader::Code {
            lang: lang.to_string(),
        });
    }
    if lower.starts_with("table:") {
        return Some(RegionHeader::Table);
    }
    None
}

/// Prefix a literal line with the region marker.
pub fn mark_region_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 1);
    out.push(REGION_MARKER);
    out.push_str(line);
    out
}

/// Whether a Consense line carries the region marker.
pub fn is_region_line(line: &str) -> bool {
    line.starts_with(REGION_MARKER)
}

/// Drop exactly one leading character, the region marker.
pub fn strip_region_marker(line: &str) -> &str {
    let mut chars = line.chars();
    chars.next();
    chars.as_str()
}
