//! Text cleanup for document chunks.
//!
//! PDF extraction leaves escape sequences, odd Unicode forms and stray
//! control characters in chunk text; responses carry the cleaned form.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static ESCAPE_SEQUENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\[a-zA-Z]").expect("Invalid regex"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Clean a chunk of extracted document text.
///
/// Applies NFKD normalization, turns newlines and tabs into spaces, removes
/// backslash escape sequences and control characters, and collapses
/// whitespace runs.
pub fn clean_text(text: &str) -> String {
    let normalized: String = text.nfkd().collect();
    let flattened = normalized.replace(['\n', '\t'], " ");
    let without_escapes = ESCAPE_SEQUENCE.replace_all(&flattened, "");
    let collapsed = WHITESPACE_RUN.replace_all(&without_escapes, " ");
    collapsed
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}
