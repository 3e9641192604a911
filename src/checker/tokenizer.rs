use unicode_segmentation::UnicodeSegmentation;

/// A word found in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Character offset of the first character.
    pub offset: usize,
    /// Length in characters.
    pub len: usize,
}

/// Split text into words, tracking character offsets.
///
/// Apostrophes and hyphens are kept inside a word but never start or end one.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut word_start: Option<(usize, usize)> = None;
    let mut chars_seen = 0;

    for (byte, grapheme) in text.grapheme_indices(true) {
        let ch = grapheme.chars().next().unwrap_or(' ');
        let joiner = ch == '\'' || ch == '\u{2019}' || ch == '-';

        if ch.is_alphabetic() || (joiner && word_start.is_some()) {
            if word_start.is_none() {
                word_start = Some((byte, chars_seen));
            }
        } else if let Some((start_byte, start_char)) = word_start.take() {
            push_token(&mut tokens, &text[start_byte..byte], start_char);
        }

        chars_seen += grapheme.chars().count();
    }

    if let Some((start_byte, start_char)) = word_start {
        push_token(&mut tokens, &text[start_byte..], start_char);
    }

    tokens
}

fn push_token<'a>(tokens: &mut Vec<Token<'a>>, raw: &'a str, offset: usize) {
    let text = raw.trim_end_matches(|c| c == '\'' || c == '\u{2019}' || c == '-');
    if !text.is_empty() {
        tokens.push(Token {
            text,
            offset,
            len: text.chars().count(),
        });
    }
}
