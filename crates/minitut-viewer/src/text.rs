//! Whitespace cleanup for embedded code listings.
//!
//! Sections often inline code examples whose markup indentation would
//! otherwise show up in `<pre>` blocks. Elements flagged with
//! `data-gobble` get their text cleaned: leading/trailing blank lines
//! stripped and the common leading indentation removed.

/// Strip leading lines that contain only whitespace.
pub fn remove_leading_blank_lines(text: &str) -> String {
    let mut rest = text;
    while let Some(newline) = rest.find('\n') {
        if rest[..newline].trim().is_empty() {
            rest = &rest[newline + 1..];
        } else {
            break;
        }
    }
    rest.to_string()
}

/// Strip trailing lines that contain only whitespace, and any trailing
/// whitespace on the last kept line.
pub fn remove_trailing_blank_lines(text: &str) -> String {
    text.trim_end().to_string()
}

/// Remove the whitespace prefix shared by all non-blank lines. The
/// prefix is measured in characters; whitespace of mixed byte widths
/// must never split a line inside a multi-byte character.
pub fn dedent(text: &str) -> String {
    let prefix_len = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min()
        .unwrap_or(0);
    if prefix_len == 0 {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let mut rest = line;
        for _ in 0..prefix_len {
            match rest.chars().next() {
                Some(c) if c.is_whitespace() => rest = &rest[c.len_utf8()..],
                _ => break,
            }
        }
        out.push_str(rest);
    }
    out
}

/// Full cleanup applied to `data-gobble` text content.
pub fn gobble(text: &str) -> String {
    let text = remove_leading_blank_lines(text);
    let text = remove_trailing_blank_lines(&text);
    dedent(&text)
}
