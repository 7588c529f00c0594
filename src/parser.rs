//! Line-oriented field extraction over text already read from /proc and /etc.
//!
//! Everything here is a pure function of its input. Lines that do not match
//! the expected shape are skipped, never reported.

use std::str::FromStr;

/// Returns the token following `key` on the first line whose first
/// whitespace-delimited token equals `key`.
///
/// `key` must include any trailing separator the file uses, e.g. `"MemTotal:"`.
/// Lines carrying the key but no value are skipped.
pub fn value_of<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    text.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(first), Some(value)) if first == key => Some(value),
            _ => None,
        }
    })
}

/// Returns every token following `key` on the first line that starts with it.
pub fn values_of<'a>(text: &'a str, key: &str) -> Option<std::str::SplitWhitespace<'a>> {
    text.lines().find_map(|line| {
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some(first) if first == key => Some(tokens),
            _ => None,
        }
    })
}

/// Looks up `key` in `KEY=value` rows (os-release style).
///
/// Surrounding quotes are removed from the value; embedded spaces are kept.
pub fn assignment_of(text: &str, key: &str) -> Option<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| unquote(v.trim()).to_string())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Splits a `/proc/<pid>/stat` line into its columns.
///
/// The second column is the command name in parentheses and may itself
/// contain spaces or parentheses; it is kept as a single token (including
/// the parentheses) so later columns keep their kernel-defined positions.
/// Lines without a parenthesized name are split on whitespace alone.
pub fn stat_tokens(line: &str) -> Vec<&str> {
    let (Some(open), Some(close)) = (line.find('('), line.rfind(')')) else {
        return line.split_whitespace().collect();
    };
    if close < open {
        return line.split_whitespace().collect();
    }

    let mut tokens: Vec<&str> = line[..open].split_whitespace().collect();
    tokens.push(&line[open..=close]);
    tokens.extend(line[close + 1..].split_whitespace());
    tokens
}

/// Parses `token`, falling back to the type's default on absence or garbage.
pub fn parse_or_default<T>(token: Option<&str>) -> T
where
    T: FromStr + Default,
{
    token.and_then(|t| t.parse().ok()).unwrap_or_default()
}

/// Parses every token as `u64`; `None` if any of them is not a number.
pub fn parse_all_u64<'a, I>(tokens: I) -> Option<Vec<u64>>
where
    I: IntoIterator<Item = &'a str>,
{
    tokens.into_iter().map(|t| t.parse().ok()).collect()
}
