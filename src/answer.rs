use crate::session::Mode;

/// Checks `given` against `expected` for the active mode.
///
/// Input is trimmed; romanized answers are compared case-insensitively, kana
/// answers exactly.
pub fn is_correct(mode: Mode, expected: &str, given: &str) -> bool {
    let given = given.trim();
    match mode {
        Mode::SymbolToRomanized => given.to_lowercase() == expected.to_lowercase(),
        Mode::RomanizedToSymbol => given == expected,
    }
}

fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{309F}' // hiragana
        | '\u{30A0}'..='\u{30FF}' // katakana
        | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
    )
}

/// True when `text` contains any hiragana, katakana or kanji.
pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese_char)
}
