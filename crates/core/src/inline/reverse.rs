use super::links::{BracketTarget, classify_bracket};
use super::literal_token_len;

/// Consense style prefixes, most specific first, with the Markdown markers
/// written before and after the content.
const STYLES: &[(&str, &str, &str)] = &[
    ("-/***", "~~***", "***~~"),
    ("-*", "~~**", "**~~"),
    ("-/*", "~~*", "*~~"),
    ("/***", "***", "***"),
    ("*", "**", "**"),
    ("/", "*", "*"),
    ("-", "~~", "~~"),
];

/// Brackets nested deeper than this are copied through as written.
pub const MAX_NESTING: usize = 32;

/// Convert one line of Consense prose to Markdown inline syntax.
pub fn convert_line(line: &str) -> String {
    convert_span(line, 0)
}

fn convert_span(text: &str, depth: usize) -> String {
    let pairs = bracket_pairs(text);
    let mut out = String::with_capacity(text.len() + 8);
    let mut pos = 0;

    while let Some(c) = text[pos..].chars().next() {
        let rest = &text[pos..];
        if let Some(len) = literal_token_len(rest) {
            out.push_str(&rest[..len]);
            pos += len;
            continue;
        }
        if c == '['
            && depth < MAX_NESTING
            && let Some(close) = closing_for(&pairs, pos)
        {
            out.push_str(&bracket(&text[pos + 1..close], depth + 1));
            pos = close + 1;
            continue;
        }
        out.push(c);
        pos += c.len_utf8();
    }

    out
}

/// Every matched `[`/`]` pair in `text` as byte offsets, sorted by opener.
fn bracket_pairs(text: &str) -> Vec<(usize, usize)> {
    let mut open = Vec::new();
    let mut pairs = Vec::new();
    for (idx, ch) in text.char_indices() {
        match ch {
            '[' => open.push(idx),
            ']' => {
                if let Some(start) = open.pop() {
                    pairs.push((start, idx));
                }
            }
            _ => {}
        }
    }
    pairs.sort_unstable();
    pairs
}

fn closing_for(pairs: &[(usize, usize)], open: usize) -> Option<usize> {
    pairs
        .binary_search_by_key(&open, |&(start, _)| start)
        .ok()
        .map(|idx| pairs[idx].1)
}

fn bracket(content: &str, depth: usize) -> String {
    if let Some(styled) = styled(content, depth) {
        return styled;
    }
    match classify_bracket(content) {
        Some(BracketTarget::Image { src, alt }) => format!("![{alt}]({src})"),
        Some(BracketTarget::Link { url, label }) => {
            format!("[{}]({url})", convert_span(&label, depth))
        }
        None => format!("[{}]", convert_span(content, depth)),
    }
}

fn styled(content: &str, depth: usize) -> Option<String> {
    STYLES.iter().find_map(|(prefix, open, close)| {
        let after = content.strip_prefix(prefix)?;
        if !after.starts_with(char::is_whitespace) {
            return None;
        }
        let inner = after.trim();
        if inner.is_empty() {
            return None;
        }
        Some(format!("{open}{}{close}", convert_span(inner, depth)))
    })
}
