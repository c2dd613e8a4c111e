//! Character-level range finders used by the tokenizer passes.
//!
//! Every finder returns byte ranges relative to the slice it was given.
//! Markers inside quoted strings are ignored.

use std::ops::Range;

/// Finds line and block comments outside quoted strings.
///
/// A line comment stops before its newline. An unterminated block comment
/// runs to the end of the text.
pub(crate) fn comment_ranges(
    text: &str,
    quote: char,
    escape: char,
    line: Option<&str>,
    block: Option<(&str, &str)>,
) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut strings = StringState::new(quote, escape);
    let mut pos = 0;
    while let Some(c) = text[pos..].chars().next() {
        if strings.step(c) {
            pos += c.len_utf8();
            continue;
        }
        let rest = &text[pos..];
        if let Some(marker) = line.filter(|m| rest.starts_with(m)) {
            let end = line_end(text, pos + marker.len());
            out.push(pos..end);
            pos = end;
        } else if let Some((open, close)) = block.filter(|(o, _)| rest.starts_with(o)) {
            let body = pos + open.len();
            let end = text[body..]
                .find(close)
                .map_or(text.len(), |n| body + n + close.len());
            out.push(pos..end);
            pos = end;
        } else {
            pos += c.len_utf8();
        }
    }
    out
}

/// Finds lines introduced by `prefix` outside quoted strings.
///
/// The prefix must not be followed by an identifier character, so `` `if``
/// does not claim `` `ifdef``. The range stops before the newline.
pub(crate) fn prefixed_line_ranges(
    text: &str,
    prefix: &str,
    quote: char,
    escape: char,
) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut strings = StringState::new(quote, escape);
    let mut pos = 0;
    while let Some(c) = text[pos..].chars().next() {
        if strings.step(c) {
            pos += c.len_utf8();
            continue;
        }
        let after = pos + prefix.len();
        if text[pos..].starts_with(prefix) && !text[after..].starts_with(is_ident_char) {
            let end = line_end(text, after);
            out.push(pos..end);
            pos = end;
        } else {
            pos += c.len_utf8();
        }
    }
    out
}

/// Finds quoted strings, honoring escapes. An unterminated string runs to
/// the end of the text.
pub(crate) fn quoted_ranges(text: &str, quote: char, escape: char) -> Vec<Range<usize>> {
    let mut out = Vec::new();
    let mut start = None;
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        match start {
            None if c == quote => start = Some(i),
            None => {}
            Some(_) if escaped => escaped = false,
            Some(_) if c == escape => escaped = true,
            Some(s) if c == quote => {
                out.push(s..i + c.len_utf8());
                start = None;
            }
            Some(_) => {}
        }
    }
    if let Some(s) = start {
        out.push(s..text.len());
    }
    out
}

fn line_end(text: &str, from: usize) -> usize {
    text[from..].find('\n').map_or(text.len(), |n| from + n)
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Tracks whether a left-to-right character walk is inside a string.
struct StringState {
    quote: char,
    escape: char,
    inside: bool,
    escaped: bool,
}

impl StringState {
    fn new(quote: char, escape: char) -> Self {
        Self {
            quote,
            escape,
            inside: false,
            escaped: false,
        }
    }

    /// Feeds one character. Returns `true` if it belongs to a string.
    fn step(&mut self, c: char) -> bool {
        if self.inside {
            if self.escaped {
                self.escaped = false;
            } else if c == self.escape {
                self.escaped = true;
            } else if c == self.quote {
                self.inside = false;
            }
            true
        } else if c == self.quote {
            self.inside = true;
            true
        } else {
            false
        }
    }
}
