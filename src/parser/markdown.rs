use super::CharCursor;
use crate::checker::TextChunk;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};

/// One chunk per text run, skipping code blocks, inline code and raw HTML.
///
/// Chunk text is the source slice, so offsets stay aligned with the
/// document even where markdown escapes change the rendered text.
pub fn segment(text: &str, base: usize) -> Vec<TextChunk> {
    let mut chunks = Vec::new();
    let mut cursor = CharCursor::new(text);
    let mut code_depth = 0usize;

    for (event, range) in Parser::new(text).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code_depth += 1,
            Event::End(TagEnd::CodeBlock) => code_depth = code_depth.saturating_sub(1),
            Event::Text(_) if code_depth == 0 => {
                let source = &text[range.clone()];
                if source.trim().is_empty() {
                    continue;
                }
                let start = cursor.char_offset(range.start);
                chunks.push(TextChunk::new(base + start, source));
            }
            _ => {}
        }
    }

    chunks
}
