//! Naive sentence-boundary splitting for the parse endpoint.

/// Splits text into sentences on `.`, `!` and `?`.
///
/// A terminator only closes a sentence when followed by whitespace or the end
/// of input, so decimals ("3.14") and terminator runs ("Wait?!") stay inside
/// one sentence. Fragments are trimmed and empty ones dropped; text after the
/// last terminator is kept as a final sentence.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if matches!(c, '.' | '!' | '?') {
            let at_boundary = match chars.peek() {
                None => true,
                Some(next) => next.is_whitespace(),
            };
            if at_boundary {
                push_trimmed(&mut sentences, &current);
                current.clear();
            }
        }
    }
    push_trimmed(&mut sentences, &current);

    sentences
}

fn push_trimmed(sentences: &mut Vec<String>, fragment: &str) {
    let trimmed = fragment.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
}
