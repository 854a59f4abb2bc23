//! Whitespace normalization for generated text
//!
//! Generation output is otherwise treated as opaque display text. The rule
//! set is fixed and small:
//!
//! 1. insert a space where a digit or `%` is directly followed by a letter
//! 2. collapse runs of spaces and tabs into one space
//! 3. trim leading and trailing whitespace

use regex::Regex;
use std::sync::LazyLock;

static DIGIT_LETTER_SEAM: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"([0-9%])([A-Za-z])").unwrap()
});

static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"[ \t]{2,}").unwrap()
});

/// Apply the fixed whitespace normalization rules
pub fn normalize_whitespace(text: &str) -> String {
    let seamed = DIGIT_LETTER_SEAM.replace_all(text, "$1 $2");
    let collapsed = SPACE_RUNS.replace_all(&seamed, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_letter_seam() {
        assert_eq!(
            normalize_whitespace("trading at $132.02with a decrease"),
            "trading at $132.02 with a decrease"
        );
        assert_eq!(normalize_whitespace("down 1.18%on the day"), "down 1.18% on the day");
    }

    #[test]
    fn test_space_runs_collapse() {
        assert_eq!(normalize_whitespace("a  b\t\tc"), "a b c");
    }

    #[test]
    fn test_trim() {
        assert_eq!(normalize_whitespace("  text  "), "text");
    }

    #[test]
    fn test_well_formed_text_unchanged() {
        let text = "Apple (AAPL) is trading at $211.16, up 1.20%, with strong earnings.";
        assert_eq!(normalize_whitespace(text), text);
    }

    #[test]
    fn test_newlines_preserved() {
        assert_eq!(normalize_whitespace("line one\nline two"), "line one\nline two");
    }
}
