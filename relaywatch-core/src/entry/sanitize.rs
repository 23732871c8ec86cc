use std::borrow::Cow;

/// Strips control characters that would corrupt a terminal. Newlines are kept
/// since messages may span several lines, tabs become spaces.
pub fn printable(input: &str) -> Cow<'_, str> {
    if !input.chars().any(|c| c.is_control() && c != '\n') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push(' '),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}
