//! Chat-sized reply parts.

use chatgate_core::text::{compact_message, enforce_reply_limits, non_empty_lines};
use serde::Serialize;

use crate::{MAX_REPLY_LENGTH, MAX_REPLY_LINES, MULTIPART_SEPARATOR, SAFE_FALLBACK};

/// Most parts a single reply may be sent as.
pub const MAX_REPLY_PARTS: usize = 2;

/// One to two messages, each within the reply budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyParts(Vec<String>);

impl ReplyParts {
    pub fn single(text: impl Into<String>) -> Self {
        Self(vec![text.into()])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// All parts joined by a newline, e.g. to remember as the last reply.
    pub fn joined(&self) -> String {
        self.0.join("\n")
    }
}

impl<'a> IntoIterator for &'a ReplyParts {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

fn fits(text: &str) -> bool {
    text.chars().count() <= MAX_REPLY_LENGTH && text.lines().count() <= MAX_REPLY_LINES
}

/// Char index just past the newline that ends line `n`, if the text has
/// more than `n` lines.
fn end_of_line(chars: &[char], n: usize) -> Option<usize> {
    chars
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == '\n')
        .nth(n.saturating_sub(1))
        .map(|(i, _)| i + 1)
}

/// Where to end the first chunk: a newline in the second half of the
/// window, else a sentence end there, else whitespace, else the window end.
fn first_cut(window: &[char]) -> usize {
    let floor = window.len() / 2;
    let last = |pred: &dyn Fn(char) -> bool| (floor..window.len()).rev().find(|&i| pred(window[i]));

    last(&|c| c == '\n')
        .or_else(|| last(&|c| matches!(c, '.' | '!' | '?' | '…')).map(|i| i + 1))
        .or_else(|| last(&char::is_whitespace))
        .unwrap_or(window.len())
}

/// Squeeze a remainder into one message: extra lines fold into the last
/// allowed line, then the whole is compacted.
fn fold_remainder(rest: &str) -> String {
    let mut lines = non_empty_lines(rest);
    if lines.len() > MAX_REPLY_LINES {
        let tail = lines.split_off(MAX_REPLY_LINES - 1).join(" ");
        lines.push(tail);
    }
    compact_message(&lines.join("\n"), MAX_REPLY_LENGTH)
}

fn split_into_chunks(text: &str) -> ReplyParts {
    if fits(text) {
        return ReplyParts::single(text);
    }

    let chars: Vec<char> = text.chars().collect();
    let mut window_end = chars.len().min(MAX_REPLY_LENGTH);
    if let Some(line_end) = end_of_line(&chars, MAX_REPLY_LINES) {
        window_end = window_end.min(line_end);
    }

    let cut = first_cut(&chars[..window_end]);
    let first: String = chars[..cut].iter().collect();
    let rest: String = chars[cut..].iter().collect();

    let first = first.trim().to_string();
    let rest = rest.trim();
    if rest.is_empty() {
        return ReplyParts::single(first);
    }
    if first.is_empty() {
        return ReplyParts::single(fold_remainder(rest));
    }
    ReplyParts(vec![first, fold_remainder(rest)])
}

/// Split a final reply into at most two chat messages.
///
/// An explicit [`MULTIPART_SEPARATOR`] with two or more non-empty segments
/// wins: the first two segments become the parts. Otherwise the text is cut
/// at natural boundaries and any overflow is compacted into the last part.
pub fn format_reply(text: &str) -> ReplyParts {
    if text.contains(MULTIPART_SEPARATOR) {
        let segments: Vec<String> = text
            .split(MULTIPART_SEPARATOR)
            .map(|s| enforce_reply_limits(s, MAX_REPLY_LINES, MAX_REPLY_LENGTH))
            .filter(|s| !s.is_empty())
            .take(MAX_REPLY_PARTS)
            .collect();
        if segments.len() == MAX_REPLY_PARTS {
            return ReplyParts(segments);
        }
    }

    let cleaned = non_empty_lines(&text.replace(MULTIPART_SEPARATOR, " ")).join("\n");
    if cleaned.is_empty() {
        return ReplyParts::single(SAFE_FALLBACK);
    }
    split_into_chunks(&cleaned)
}
