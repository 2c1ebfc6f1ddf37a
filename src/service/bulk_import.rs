use crate::service::tracking_number::MIN_LEN;
use std::collections::HashSet;

fn is_separator(c: char) -> bool {
    c == ',' || c == ';' || c.is_whitespace()
}

/// Split pasted bulk input into tracking numbers.
///
/// Tokens are separated by newlines, commas, semicolons or whitespace.
/// Tokens shorter than [`MIN_LEN`] characters are dropped, as are repeats.
pub fn tokenize<'a, I>(inputs: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    inputs
        .into_iter()
        .flat_map(|s| s.split(is_separator))
        .map(str::trim)
        .filter(|t| t.chars().count() >= MIN_LEN)
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}
