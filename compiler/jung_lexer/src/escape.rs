//! String body cooking: escape processing and `${}` segment splitting.

use crate::token::StrPart;

/// Split a raw string body into literal text and embedded code segments.
///
/// `first_line` is the line the opening quote sits on; code segments record
/// the line their `${` starts on so errors inside them point at the right
/// place. The body is already known to be well formed: every `${` has a
/// matching `}`.
pub(crate) fn cook_string(body: &str, first_line: u32) -> Vec<StrPart> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut line = first_line;
    let mut chars = body.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, 'n')) => text.push('\n'),
                Some((_, 't')) => text.push('\t'),
                Some((_, 'r')) => text.push('\r'),
                Some((_, escaped)) => {
                    if escaped == '\n' {
                        line += 1;
                    }
                    text.push(escaped);
                }
                None => text.push('\\'),
            },
            '$' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                let start = i + 2;
                let code_line = line;
                let mut depth = 1usize;
                let mut end = body.len();
                while let Some((j, inner)) = chars.next() {
                    match inner {
                        '{' => depth += 1,
                        '}' => {
                            depth -= 1;
                            if depth == 0 {
                                end = j;
                                break;
                            }
                        }
                        '"' => {
                            let skipped = crate::raw_token::skip_quoted(body.as_bytes(), j + 1);
                            while chars.next_if(|&(k, _)| k < skipped).is_some() {}
                            line += body[j..skipped].matches('\n').count() as u32;
                        }
                        '\n' => line += 1,
                        _ => {}
                    }
                }
                if !text.is_empty() {
                    parts.push(StrPart::Text(std::mem::take(&mut text)));
                }
                parts.push(StrPart::Code {
                    source: body[start..end].to_string(),
                    line: code_line,
                });
            }
            '\n' => {
                line += 1;
                text.push(c);
            }
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        parts.push(StrPart::Text(text));
    }
    parts
}
