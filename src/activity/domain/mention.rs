//! Mention token extraction from free text.

/// Extracts candidate `@name` tokens from free text.
///
/// A token starts at an `@` that does not directly follow an alphanumeric
/// character (so addresses like `user@example.com` are not treated as
/// mentions) and runs over alphanumerics, `_`, and `-`. Tokens are
/// deduplicated case-insensitively, preserving first-occurrence order.
/// Resolution against a project's member list happens in the fan-out
/// service; unresolvable tokens are silently ignored there.
#[must_use]
pub fn mention_tokens(text: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut seen: Vec<String> = Vec::new();
    let mut prev: Option<char> = None;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '@' || prev.is_some_and(char::is_alphanumeric) {
            prev = Some(ch);
            continue;
        }
        let mut token = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_alphanumeric() || next == '_' || next == '-' {
                token.push(next);
                chars.next();
            } else {
                break;
            }
        }
        prev = token.chars().last().or(Some(ch));
        if token.is_empty() {
            continue;
        }
        let folded = token.to_lowercase();
        if !seen.contains(&folded) {
            seen.push(folded);
            tokens.push(token);
        }
    }

    tokens
}
