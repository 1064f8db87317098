use std::cmp::Ordering;
use std::path::{Path, PathBuf};

/// Compare two names so that embedded digit runs order by value (`file2 < file10`).
///
/// Both names are split into alternating text and digit-run tokens, and the token sequences are
/// compared lexicographically: text literally, digit runs by numeric value, and a sequence that
/// is a strict prefix of the other first. Names whose token sequences tie (`f01` and `f1`) are
/// then compared literally, so the result is a strict total order and `Equal` means identical.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ta = Tokens { rest: a };
    let mut tb = Tokens { rest: b };
    loop {
        match (ta.next(), tb.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = cmp_tokens(x, y);
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

/// Sort paths by the natural order of their final component.
pub fn sort_by_file_name(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&file_name_lossy(a), &file_name_lossy(b)));
}

fn file_name_lossy(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy())
}

// Maximal runs of ASCII digits or of anything else. Splits only at ASCII bytes, so every token
// is valid UTF-8.
struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let first = *self.rest.as_bytes().first()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .bytes()
            .position(|b| b.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (token, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(token)
    }
}

fn is_digit_token(token: &str) -> bool {
    token.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

// A text token starts with a non-digit byte, which sorts either below or above every digit, so
// mixed pairs are ranked by their first bytes alone.
fn cmp_tokens(x: &str, y: &str) -> Ordering {
    match (is_digit_token(x), is_digit_token(y)) {
        (true, true) => cmp_digits(x, y),
        (false, false) => x.cmp(y),
        _ => x.as_bytes().first().cmp(&y.as_bytes().first()),
    }
}

// Integer comparison of two ASCII digit strings of any length.
fn cmp_digits(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
#[path = "../../tests/unit/sources/natural.rs"]
mod tests;
