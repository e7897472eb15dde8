//! Convenience tokenizer for raw input lines.
//!
//! The resolver itself consumes pre-tokenized input; quoting rules belong
//! to the token producer. This helper covers the common case: whitespace
//! splitting with double-quote grouping and backslash escapes inside
//! quotes.

/// Splits an input line into tokens.
///
/// # Examples
///
/// ```
/// use command_graph_dispatch::tokenize;
///
/// assert_eq!(tokenize("warp home 3"), vec!["warp", "home", "3"]);
/// assert_eq!(
///     tokenize(r#"say "hello there" now"#),
///     vec!["say", "hello there", "now"]
/// );
/// assert_eq!(tokenize(r#"tag """#), vec!["tag", ""]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;
    // Tracks whether the current token saw quotes, so `""` yields an empty
    // token instead of nothing.
    let mut quoted = false;

    for ch in line.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if in_quotes => escaped = true,
            '"' => {
                in_quotes = !in_quotes;
                quoted = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                    quoted = false;
                }
            }
            c => current.push(c),
        }
    }
    if escaped {
        current.push('\\');
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_whitespace_split() {
        assert_eq!(tokenize("a  b\tc"), vec!["a", "b", "c"]);
        assert!(tokenize("   ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_quotes_group_and_may_be_empty() {
        assert_eq!(tokenize(r#"say "two words""#), vec!["say", "two words"]);
        assert_eq!(tokenize(r#"set """#), vec!["set", ""]);
    }

    #[test]
    fn test_escape_inside_quotes() {
        assert_eq!(tokenize(r#"say "a \"b\" c""#), vec!["say", r#"a "b" c"#]);
    }

    #[test]
    fn test_unterminated_quote_takes_rest() {
        assert_eq!(tokenize(r#"say "rest of line"#), vec!["say", "rest of line"]);
    }
}
