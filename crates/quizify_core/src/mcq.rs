/// Cosmetic class of a line inside an MCQ block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Starts with a number and a period, e.g. `12. What is ...`.
    Question,
    /// Starts with a single `A`-`D` and a period.
    Option,
    /// Answers, explanations and anything else.
    Answer,
}

/// Split result text into question blocks at every run of two or more line breaks.
///
/// `\r\n` counts as a single break. Blocks that are blank are dropped; the rest are
/// returned verbatim, including any internal single line breaks.
pub fn split_mcq_blocks(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut blocks = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let Some(first_len) = line_break_at(bytes, i) else {
            i += 1;
            continue;
        };
        let mut end = i + first_len;
        let mut breaks = 1;
        while let Some(len) = line_break_at(bytes, end) {
            end += len;
            breaks += 1;
        }
        if breaks >= 2 {
            push_block(&mut blocks, &text[start..i]);
            start = end;
        }
        i = end;
    }
    push_block(&mut blocks, &text[start..]);
    blocks
}

fn line_break_at(bytes: &[u8], at: usize) -> Option<usize> {
    match bytes.get(at) {
        Some(b'\n') => Some(1),
        Some(b'\r') if bytes.get(at + 1) == Some(&b'\n') => Some(2),
        _ => None,
    }
}

fn push_block<'a>(blocks: &mut Vec<&'a str>, block: &'a str) {
    if !block.trim().is_empty() {
        blocks.push(block);
    }
}

/// Classify one line. Matching is anchored at the first character; no trimming.
pub fn classify_line(line: &str) -> LineKind {
    let bytes = line.as_bytes();
    let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits > 0 && bytes.get(digits) == Some(&b'.') {
        return LineKind::Question;
    }
    match bytes {
        [b'A'..=b'D', b'.', ..] => LineKind::Option,
        _ => LineKind::Answer,
    }
}
