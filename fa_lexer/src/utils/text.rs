//! Line-oriented string helpers used by the rule-file loader.

/// Split `line` on `delimiter`.
///
/// Behaves like reading delimited fields from a stream: an empty input
/// yields no pieces and a trailing empty piece is dropped, while interior
/// empty pieces are kept. `","` therefore yields `[""]`.
pub fn tokenize(line: &str, delimiter: char) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut pieces: Vec<String> = line.split(delimiter).map(str::to_string).collect();
    if pieces.last().is_some_and(|last| last.is_empty()) {
        pieces.pop();
    }
    pieces
}

/// Copy of `text` with every occurrence of `ch` removed.
pub fn remove_char(text: &str, ch: char) -> String {
    text.chars().filter(|&c| c != ch).collect()
}
