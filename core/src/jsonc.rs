//! Comment stripping for JSON-with-comments documents

/// Remove `//` line comments and `/* */` block comments that sit outside
/// string literals.
///
/// Newlines inside block comments are preserved so that parse errors on the
/// stripped output still point at the right line.
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                // Drop everything up to (not including) the newline
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    if next == '\n' {
                        out.push('\n');
                    }
                    prev = next;
                }
            }
            _ => out.push(c),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_line_comment() {
        let input = "// header\n{\"a\": 1}";
        assert_eq!(strip_comments(input), "\n{\"a\": 1}");
    }

    #[test]
    fn test_trailing_comment() {
        let input = "{\"a\": 1} // trailing";
        assert_eq!(strip_comments(input).trim_end(), "{\"a\": 1}");
    }

    #[test]
    fn test_slashes_inside_string_kept() {
        let input = r#"{"url": "http://example.com"} // note"#;
        assert_eq!(
            strip_comments(input).trim_end(),
            r#"{"url": "http://example.com"}"#
        );
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let input = r#"{"s": "say \"//hi\""}"#;
        assert_eq!(strip_comments(input), input);
    }

    #[test]
    fn test_block_comment_keeps_newlines() {
        let input = "{/* one\ntwo */\"a\": 1}";
        let stripped = strip_comments(input);
        assert_eq!(stripped, "{\n\"a\": 1}");
        let value: serde_json::Value = serde_json::from_str(&stripped).unwrap();
        assert_eq!(value["a"], 1);
    }

    #[test]
    fn test_unterminated_block_comment_swallows_rest() {
        assert_eq!(strip_comments("{} /* open"), "{} ");
    }

    #[test]
    fn test_plain_json_untouched() {
        let input = "{\"a\": [1, 2, 3], \"b\": \"x/y\"}";
        assert_eq!(strip_comments(input), input);
    }
}
