//! Message template rendering
//!
//! Templates may contain `{percent}`, `{available}`, `{used}` and `{total}`.
//! Any other brace sequence is copied through untouched.

use crate::disk::UsageSnapshot;

const PLACEHOLDERS: [&str; 4] = ["{percent}", "{available}", "{used}", "{total}"];

fn placeholder_value<'a>(token: &str, snapshot: &'a UsageSnapshot, percent: &'a str) -> &'a str {
    match token {
        "{percent}" => percent,
        "{available}" => &snapshot.available,
        "{used}" => &snapshot.used,
        _ => &snapshot.total,
    }
}

/// Substitute snapshot values into a message template.
///
/// Single pass, left to right: inserted values are never scanned again, so a
/// size string that happens to contain a placeholder stays as it is.
pub fn render(template: &str, snapshot: &UsageSnapshot) -> String {
    let percent = format!("{:.0}", snapshot.usage_percent);
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];

        match PLACEHOLDERS.iter().find(|token| tail.starts_with(**token)) {
            Some(token) => {
                out.push_str(placeholder_value(token, snapshot, &percent));
                rest = &tail[token.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }

    out.push_str(rest);
    out
}
