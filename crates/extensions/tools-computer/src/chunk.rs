//! Splitting text for key injection.

/// Characters sent per `type` command.
///
/// Input-injection utilities drop keystrokes when handed long strings.
pub const TYPING_CHUNK_SIZE: usize = 50;

/// Split `text` into consecutive pieces of at most `size` characters.
///
/// Pieces never split a character and concatenate back to `text`. Empty
/// input yields no pieces.
pub fn chunk_text(text: &str, size: usize) -> Vec<&str> {
    let size = size.max(1);
    let mut chunks = Vec::with_capacity(text.len().div_ceil(size));
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == size {
            chunks.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}
