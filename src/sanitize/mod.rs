/// Strip markdown fence markers a model sometimes wraps around file content:
/// an opening ``` (optionally followed by a language tag on the same line) at
/// the very start, and a closing ``` at the very end. Surrounding whitespace
/// is trimmed. Models occasionally nest fences, so stripping repeats until a
/// fixed point is reached; the result is idempotent for every input. Clean
/// input passes through unchanged.
pub fn sanitize(text: &str) -> String {
    let mut current = text.trim().to_string();
    loop {
        let next = strip_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn strip_once(text: &str) -> String {
    let mut out = text.trim();

    if out.starts_with("```") {
        // Drop the fence and its language tag up to the end of that line.
        out = match out.find('\n') {
            Some(i) => &out[i + 1..],
            None => "",
        };
    }

    let trimmed = out.trim_end();
    if trimmed.ends_with("```") {
        out = &trimmed[..trimmed.len() - 3];
    }

    out.trim().to_string()
}
