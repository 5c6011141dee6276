use std::sync::LazyLock;

use regex::Regex;

use super::links::{consense_bracket, strip_anchor_caret};
use super::{is_word_char, literal_token_len};

static BLOCK_REFERENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s\^[\w-]+$").unwrap());

/// Emphasis runs allowed directly inside `~~`, longest first, with the
/// Consense token each one produces.
const STRIKE_WRAPPED: &[(&str, &str)] = &[
    ("***", "-/***"),
    ("___", "-/***"),
    ("**", "-*"),
    ("__", "-*"),
    ("*", "-/*"),
    ("_", "-/*"),
];

/// Convert one line of Markdown prose to Consense inline syntax.
pub fn convert_line(line: &str) -> String {
    let line = BLOCK_REFERENCE.replace(line, "");
    convert_span(&line)
}

fn convert_span(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut rest = text;
    let mut prev: Option<char> = None;

    while let Some(c) = rest.chars().next() {
        if let Some((rendered, consumed)) = match_construct(rest, prev) {
            out.push_str(&rendered);
            prev = rest[..consumed].chars().next_back();
            rest = &rest[consumed..];
            continue;
        }
        out.push(c);
        prev = Some(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Rendered replacement and consumed byte length for the construct at `rest`.
fn match_construct(rest: &str, prev: Option<char>) -> Option<(String, usize)> {
    if let Some(len) = literal_token_len(rest) {
        return Some((rest[..len].to_string(), len));
    }
    anchor(rest)
        .or_else(|| image(rest))
        .or_else(|| link(rest))
        .or_else(|| strikethrough(rest))
        .or_else(|| emphasis(rest, prev))
}

/// `#^id` -> `#id`
fn anchor(rest: &str) -> Option<(String, usize)> {
    let id = rest.strip_prefix("#^")?;
    let len = id
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '-'))
        .unwrap_or(id.len());
    (len > 0).then(|| (format!("#{}", &id[..len]), 2 + len))
}

fn image(rest: &str) -> Option<(String, usize)> {
    let (alt, src, len) = link_parts(rest.strip_prefix('!')?)?;
    Some((consense_bracket(&strip_anchor_caret(src), alt), 1 + len))
}

fn link(rest: &str) -> Option<(String, usize)> {
    let (label, url, len) = link_parts(rest)?;
    let caption = convert_span(label.trim());
    Some((consense_bracket(&strip_anchor_caret(url), &caption), len))
}

/// Split `[label](target)` into label, target and total length.
fn link_parts(text: &str) -> Option<(&str, &str, usize)> {
    let body = text.strip_prefix('[')?;
    let close = body.find(']')?;
    let label = &body[..close];
    if label.contains('[') {
        return None;
    }
    let after = body[close + 1..].strip_prefix('(')?;
    let end = closing_paren(after).or_else(|| after.find(')'))?;
    let target = &after[..end];
    if target.trim().is_empty() {
        return None;
    }
    Some((label, target, 1 + close + 2 + end + 1))
}

/// The `)` closing a link target, skipping balanced pairs such as
/// `Rust_(language)`.
fn closing_paren(target: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in target.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(idx),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

fn strikethrough(rest: &str) -> Option<(String, usize)> {
    let body = rest.strip_prefix("~~")?;

    for (marker, token) in STRIKE_WRAPPED {
        let Some(inner_start) = body.strip_prefix(marker) else {
            continue;
        };
        let closer = format!("{marker}~~");
        if let Some(end) = inner_start.find(&closer)
            && end > 0
        {
            let consumed = 2 + marker.len() + end + closer.len();
            return Some((wrap(token, &inner_start[..end]), consumed));
        }
    }

    let end = body.find("~~")?;
    if end == 0 {
        return None;
    }
    Some((wrap("-", &body[..end]), 2 + end + 2))
}

fn emphasis(rest: &str, prev: Option<char>) -> Option<(String, usize)> {
    let ch = rest.chars().next().filter(|c| *c == '*' || *c == '_')?;
    // underscores never open emphasis inside a word
    if ch == '_' && prev.is_some_and(is_word_char) {
        return None;
    }
    let run = rest.chars().take_while(|c| *c == ch).count();
    (1..=run.min(3))
        .rev()
        .find_map(|width| close_emphasis(rest, ch, width))
}

fn close_emphasis(rest: &str, ch: char, width: usize) -> Option<(String, usize)> {
    let marker = &rest[..width];
    let body = &rest[width..];

    let end = if width == 3 {
        body.find(marker)?
    } else {
        // single and double emphasis may not contain their own marker char
        let end = body.find(ch)?;
        if !body[end..].starts_with(marker) {
            return None;
        }
        end
    };

    let inner = &body[..end];
    if inner.is_empty() || inner.starts_with(char::is_whitespace) || inner.ends_with(char::is_whitespace)
    {
        return None;
    }

    let consumed = width + end + width;
    if ch == '_' && rest[consumed..].chars().next().is_some_and(is_word_char) {
        return None;
    }

    let token = match width {
        3 => "/***",
        2 => "*",
        _ => "/",
    };
    Some((wrap(token, inner), consumed))
}

fn wrap(token: &str, inner: &str) -> String {
    format!("[{token} {}]", convert_span(inner.trim()))
}
