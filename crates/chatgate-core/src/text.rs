//! Text primitives shared by the prompt builder, the quality gate and the
//! reply formatter.
//!
//! Every length here is counted in `char`s, never bytes: chat budgets are
//! enforced on what the viewer sees.

/// Collapse every whitespace run into a single space and trim both ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Lowercase and strip the diacritics used in Portuguese and Spanish.
pub fn fold_accents(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        other => other,
    }
}

/// Folded, whitespace-collapsed form used for prefix and equality checks
/// that must keep punctuation (e.g. `"confianca:"`).
pub fn fold_line(text: &str) -> String {
    collapse_whitespace(&fold_accents(text))
}

/// Build a keyword-matching key: folded, punctuation turned into spaces and
/// padded with a single space on both sides.
///
/// Pair with [`has_term`], which matches terms at word starts.
pub fn match_key(text: &str) -> String {
    let spaced: String = fold_accents(text)
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '%' { c } else { ' ' })
        .collect();
    format!(" {} ", collapse_whitespace(&spaced))
}

/// Whether `term` (already folded) starts a word inside a [`match_key`].
///
/// A trailing space in `term` pins it to a whole word (`"ha "`).
pub fn has_term(key: &str, term: &str) -> bool {
    key.contains(&format!(" {term}"))
}

/// Whether any of `terms` occurs in `key`.
pub fn any_term(key: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| has_term(key, t))
}

/// Number of distinct `terms` present in `key`.
pub fn count_terms(key: &str, terms: &[&str]) -> usize {
    terms.iter().filter(|t| has_term(key, t)).count()
}

/// Split into trimmed, whitespace-collapsed, non-empty lines.
pub fn non_empty_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(collapse_whitespace)
        .filter(|l| !l.is_empty())
        .collect()
}

pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn is_sentence_end(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '…')
}

/// Index of the last char at or after `floor` that satisfies `pred`.
fn last_index(chars: &[char], floor: usize, pred: impl Fn(char) -> bool) -> Option<usize> {
    (floor..chars.len()).rev().find(|&i| pred(chars[i]))
}

/// Shrink `text` to at most `max_len` chars, ending with an ellipsis.
///
/// Text already within budget is returned unchanged. Otherwise the text is
/// cropped to `max_len - 3` and cut back to the last sentence end in the
/// second half of that window, else the last whitespace there, else cut hard.
pub fn compact_message(text: &str, max_len: usize) -> String {
    if char_len(text) <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return text.chars().take(max_len).collect();
    }

    let budget = max_len - 3;
    let cropped: Vec<char> = text.chars().take(budget).collect();
    let floor = budget / 2;
    let cut = last_index(&cropped, floor, is_sentence_end)
        .map(|i| i + 1)
        .or_else(|| last_index(&cropped, floor, char::is_whitespace))
        .unwrap_or(budget);

    let head: String = cropped[..cut].iter().collect();
    format!("{}…", head.trim_end())
}

/// Fit `text` into a chat message: at most `max_lines` non-empty lines and
/// `max_length` chars.
///
/// Overlong text closes on a sentence end found at 35% of the budget or
/// later, else on a word boundary at 55% or later, else it is hard-cropped.
/// The last two cases end with a period.
pub fn enforce_reply_limits(text: &str, max_lines: usize, max_length: usize) -> String {
    let joined = non_empty_lines(text)
        .into_iter()
        .take(max_lines)
        .collect::<Vec<_>>()
        .join("\n");

    let chars: Vec<char> = joined.chars().collect();
    if chars.len() <= max_length {
        return joined;
    }
    if max_length == 0 {
        return String::new();
    }

    let window = &chars[..max_length];
    if let Some(i) = last_index(window, max_length * 35 / 100, is_sentence_end) {
        let head: String = window[..=i].iter().collect();
        return head.trim_end().to_string();
    }

    if let Some(i) = last_index(window, max_length * 55 / 100, char::is_whitespace) {
        let head: String = window[..i].iter().collect();
        let head = head.trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | ':' | '-'));
        return format!("{head}.");
    }

    let head: String = chars[..max_length - 1].iter().collect();
    format!("{}.", head.trim_end())
}

/// Single-line preview: whitespace collapsed, then compacted.
pub fn preview(text: &str, max_len: usize) -> String {
    compact_message(&collapse_whitespace(text), max_len)
}
