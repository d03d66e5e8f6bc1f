//! Title sanitization to a portable character set.

/// Keeps ASCII alphanumerics plus space, `.`, `_` and `-`; drops everything else
/// and strips trailing whitespace. Leading characters that survive are kept as-is.
pub fn sanitize_title(raw: &str) -> String {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-'))
        .collect();
    kept.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_punctuation_and_slashes() {
        assert_eq!(sanitize_title("Review: Part 1/2!!"), "Review Part 12");
    }

    #[test]
    fn keeps_allowed_punctuation() {
        assert_eq!(sanitize_title("a.b_c-d e"), "a.b_c-d e");
    }

    #[test]
    fn strips_trailing_but_not_leading_whitespace() {
        assert_eq!(sanitize_title("  intro  "), "  intro");
        assert_eq!(sanitize_title("end ?!"), "end");
    }

    #[test]
    fn removes_control_and_non_ascii() {
        assert_eq!(sanitize_title("caf\u{e9}\t\n2024"), "caf2024");
    }

    #[test]
    fn output_only_contains_allowed_chars() {
        let inputs = [
            "Review: Part 1/2!!",
            "<script>alert(1)</script>",
            "..\\..\\etc/passwd",
            "emoji \u{1f600} title",
            "\"quoted\" | piped * star?",
        ];
        for input in inputs {
            let out = sanitize_title(input);
            assert!(
                out.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-')),
                "unexpected char in {:?}",
                out
            );
            assert!(!out.ends_with(char::is_whitespace));
        }
    }
}
