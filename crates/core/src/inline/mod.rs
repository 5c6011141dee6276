//! Inline style rewriting.
//!
//! Both directions are a single left-to-right scan over one line of prose.
//! At each position the longest recognised construct wins and its whole span
//! is consumed, so a rewritten span can never be matched again by a weaker
//! rule. Literal tokens (code spans, wiki-links, hashtags, bare URLs) are
//! copied through untouched in both directions.

/// Markdown -> Consense rewriting.
pub mod forward;
/// Link and image bracket classification.
pub mod links;
/// Consense -> Markdown rewriting.
pub mod reverse;

pub use forward::convert_line as to_consense_line;
pub use reverse::convert_line as to_markdown_line;

/// Rewrite Markdown inline styles in `text`, line by line.
pub fn to_consense_inline(text: &str) -> String {
    map_lines(text, to_consense_line)
}

/// Rewrite Consense inline styles in `text`, line by line.
pub fn to_markdown_inline(text: &str) -> String {
    map_lines(text, to_markdown_line)
}

fn map_lines(text: &str, convert: fn(&str) -> String) -> String {
    text.split('\n').map(convert).collect::<Vec<_>>().join("\n")
}

/// Length of a literal token starting at `rest`, if one starts there.
pub(crate) fn literal_token_len(rest: &str) -> Option<usize> {
    code_span_len(rest)
        .or_else(|| wiki_link_len(rest))
        .or_else(|| bare_url_len(rest))
        .or_else(|| hashtag_len(rest))
}

/// `` `code` `` with a matching backtick run.
fn code_span_len(rest: &str) -> Option<usize> {
    let ticks = rest.chars().take_while(|c| *c == '`').count();
    if ticks == 0 {
        return None;
    }
    let fence = &rest[..ticks];
    let body = &rest[ticks..];
    body.find(fence).map(|end| ticks + end + ticks)
}

/// `[[Page]]`, `[[Page|alias]]` and friends.
fn wiki_link_len(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix("[[")?;
    body.find("]]").map(|end| 2 + end + 2)
}

fn bare_url_len(rest: &str) -> Option<usize> {
    if !(rest.starts_with("http://") || rest.starts_with("https://")) {
        return None;
    }
    Some(rest.find(char::is_whitespace).unwrap_or(rest.len()))
}

/// `#tag` runs to the next whitespace. `#^id` anchors are not tags.
fn hashtag_len(rest: &str) -> Option<usize> {
    let body = rest.strip_prefix('#')?;
    let first = body.chars().next()?;
    if first.is_whitespace() || first == '#' || first == '^' {
        return None;
    }
    Some(1 + body.find(char::is_whitespace).unwrap_or(body.len()))
}

/// Characters that make up a word for intraword checks.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_spans_need_matching_run() {
        assert_eq!(literal_token_len("`a*b*` rest"), Some(6));
        assert_eq!(literal_token_len("``a`b`` rest"), Some(7));
        assert_eq!(literal_token_len("`open"), None);
    }

    #[test]
    fn wiki_links_are_literal() {
        assert_eq!(literal_token_len("[[Page|*alias*]] x"), Some(16));
        assert_eq!(literal_token_len("[[unclosed"), None);
    }

    #[test]
    fn urls_and_tags_run_to_whitespace() {
        assert_eq!(literal_token_len("https://a.dev/x_y_z more"), Some(19));
        assert_eq!(literal_token_len("#snake_case_tag!"), Some(16));
        assert_eq!(literal_token_len("# heading"), None);
        assert_eq!(literal_token_len("#^block"), None);
    }

    #[test]
    fn multi_line_text_is_converted_per_line() {
        assert_eq!(to_consense_inline("**a\nb**"), "**a\nb**");
        assert_eq!(to_consense_inline("**a**\n*b*"), "[* a]\n[/ b]");
        assert_eq!(to_markdown_inline("[* a]\n[/ b]"), "**a**\n*b*");
    }
}
