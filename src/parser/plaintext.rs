use crate::checker::TextChunk;

/// One chunk per paragraph; blank lines separate paragraphs.
pub fn segment(text: &str, base: usize) -> Vec<TextChunk> {
    let mut chunks = Vec::new();
    let mut paragraph: Option<(usize, usize)> = None;
    let mut byte = 0;
    let mut chars = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().is_empty() {
            if let Some((start_byte, start_char)) = paragraph.take() {
                chunks.push(TextChunk::new(base + start_char, &text[start_byte..byte]));
            }
        } else if paragraph.is_none() {
            paragraph = Some((byte, chars));
        }

        byte += line.len();
        chars += line.chars().count();
    }

    if let Some((start_byte, start_char)) = paragraph {
        chunks.push(TextChunk::new(base + start_char, &text[start_byte..]));
    }

    chunks
}
