//! Character-class tokenizer.

/// Token class of a single character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Letters and digits outside the CJK blocks; consecutive ones form a word.
    Word,
    /// Han, kana, hangul and full-width forms; each is its own token.
    Cjk,
    /// Whitespace, punctuation and symbols; each is its own token.
    Other,
}

/// Whether `ch` belongs to a CJK block that is laid out one glyph per token.
pub fn is_cjk(ch: char) -> bool {
    matches!(
        ch as u32,
        0x1100..=0x11FF     // Hangul Jamo
        | 0x2E80..=0x2FDF   // CJK radicals, Kangxi radicals
        | 0x3000..=0x303F   // CJK symbols and punctuation
        | 0x3040..=0x30FF   // Hiragana, Katakana
        | 0x3100..=0x31FF   // Bopomofo, Hangul compatibility, Katakana ext.
        | 0x3400..=0x4DBF   // CJK extension A
        | 0x4E00..=0x9FFF   // CJK unified ideographs
        | 0xAC00..=0xD7AF   // Hangul syllables
        | 0xF900..=0xFAFF   // CJK compatibility ideographs
        | 0xFE30..=0xFE4F   // CJK compatibility forms
        | 0xFF00..=0xFFEF   // Half-width and full-width forms
        | 0x20000..=0x2FA1F // CJK extensions B-F, compatibility supplement
    )
}

pub fn classify(ch: char) -> CharClass {
    if is_cjk(ch) {
        CharClass::Cjk
    } else if ch.is_alphanumeric() {
        CharClass::Word
    } else {
        CharClass::Other
    }
}

/// Split `title` into layout tokens.
///
/// Tokens borrow from `title` and concatenate back to it exactly.
///
/// ```
/// use title_art::segment;
///
/// assert_eq!(segment("Rust 编程 v2!"), ["Rust", " ", "编", "程", " ", "v2", "!"]);
/// ```
pub fn segment(title: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut word_start: Option<usize> = None;

    for (idx, ch) in title.char_indices() {
        match classify(ch) {
            CharClass::Word => {
                word_start.get_or_insert(idx);
            }
            CharClass::Cjk | CharClass::Other => {
                if let Some(start) = word_start.take() {
                    tokens.push(&title[start..idx]);
                }
                tokens.push(&title[idx..idx + ch.len_utf8()]);
            }
        }
    }
    if let Some(start) = word_start {
        tokens.push(&title[start..]);
    }

    tokens
}
