//! Link and image brackets.
//!
//! Markdown `[label](url)` and `![alt](src)` both become a Consense bracket
//! `[target caption]`. Going back, a bracket is an image when its first or
//! last word looks like an image path, a link when its first or last word
//! looks like a URL, and anything else is left alone.

/// File extensions recognised as images (case-insensitive).
pub const IMAGE_EXTENSIONS: &[&str] = &["jpeg", "jpg", "gif", "png", "svg", "webp", "bmp"];

/// What a Consense bracket refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BracketTarget<'a> {
    /// An embedded image.
    Image {
        /// Image path or URL.
        src: &'a str,
        /// Alternative text, possibly empty.
        alt: String,
    },
    /// An external link.
    Link {
        /// Link target.
        url: &'a str,
        /// Visible label; the URL itself when none was given.
        label: String,
    },
}

/// Whether `token` ends in a known image extension.
pub fn is_image_path(token: &str) -> bool {
    token
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| {
            !stem.is_empty()
                && IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Whether `token` looks like a URL (`http://`, `https://` or `www.`).
pub fn is_url(token: &str) -> bool {
    token.starts_with("http://") || token.starts_with("https://") || token.starts_with("www.")
}

/// Classify the inside of a Consense bracket.
pub fn classify_bracket(content: &str) -> Option<BracketTarget<'_>> {
    let parts: Vec<&str> = content.split_whitespace().collect();
    let (&first, &last) = (parts.first()?, parts.last()?);
    let head_rest = || parts[1..].join(" ");
    let tail_rest = || parts[..parts.len() - 1].join(" ");

    if is_image_path(first) {
        return Some(BracketTarget::Image {
            src: first,
            alt: head_rest(),
        });
    }
    if parts.len() > 1 && is_image_path(last) {
        return Some(BracketTarget::Image {
            src: last,
            alt: tail_rest(),
        });
    }
    if is_url(first) {
        let label = head_rest();
        return Some(BracketTarget::Link {
            url: first,
            label: if label.is_empty() {
                first.to_string()
            } else {
                label
            },
        });
    }
    if parts.len() > 1 && is_url(last) {
        return Some(BracketTarget::Link {
            url: last,
            label: tail_rest(),
        });
    }
    None
}

/// Consense bracket for a Markdown link or image.
pub fn consense_bracket(target: &str, caption: &str) -> String {
    let target = target.trim();
    let caption = caption.trim();
    if caption.is_empty() {
        format!("[{target}]")
    } else {
        format!("[{target} {caption}]")
    }
}

/// Rewrite heading block-reference anchors (`#^id` -> `#id`).
pub fn strip_anchor_caret(target: &str) -> String {
    target.replace("#^", "#")
}
