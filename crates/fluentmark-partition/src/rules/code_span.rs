use std::sync::OnceLock;

use crate::scanner::CharacterScanner;

/// Inline code delimited by single backticks on one line.
///
/// A backtick preceded by `\` does not open a span. Backslashes inside the
/// span are literal, so `` `a\` `` closes at the second backtick.
#[derive(Debug)]
pub struct CodeSpanRule<T> {
    token: T,
    /// Line delimiters, copied from the first scanner the rule sees.
    delimiters: OnceLock<Vec<&'static str>>,
}

impl<T: Copy> CodeSpanRule<T> {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';
    pub const ESCAPE: char = '\\';

    pub fn new(token: T) -> Self {
        Self {
            token,
            delimiters: OnceLock::new(),
        }
    }

    pub fn token(&self) -> T {
        self.token
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        let delimiters = self.delimiters.get_or_init(|| {
            let mut delimiters = scanner.legal_line_delimiters().to_vec();
            delimiters.sort_by_key(|d| std::cmp::Reverse(d.len()));
            delimiters
        });

        if scanner.column() > 0 && scanner.peek_back() == Some(Self::ESCAPE) {
            return None;
        }
        if scanner.read() != Some(Self::TICK) {
            return None;
        }

        loop {
            let c = scanner.read()?;
            if c == Self::TICK {
                return Some(self.token);
            }
            let starts_delimiter = delimiters.iter().any(|d| {
                d.starts_with(c) && scanner.looking_at(&d[c.len_utf8()..])
            });
            if starts_delimiter {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::{run, run_at};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Span;

    #[rstest]
    #[case::simple("`code` b", "`code`")]
    #[case::operators("`complex = expressions - 5 * a` in", "`complex = expressions - 5 * a`")]
    #[case::trailing_backslash("`code with a backslash\\` rest", "`code with a backslash\\`")]
    #[case::empty("``x", "``")]
    fn matches_code_span(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(run(CodeSpanRule::new(Span), input), (Some(Span), expected.to_string()));
    }

    #[rstest]
    #[case::unclosed("`not-closed")]
    #[case::line_break("`broken\ncode`")]
    #[case::crlf("`broken\r\ncode`")]
    #[case::no_tick("code`")]
    fn rejects_unclosed_span(#[case] input: &str) {
        assert_eq!(run(CodeSpanRule::new(Span), input), (None, String::new()));
    }

    #[test]
    fn mid_line_span_matches() {
        assert_eq!(
            run_at(CodeSpanRule::new(Span), "a `code` b", 2),
            (Some(Span), "`code`".to_string())
        );
    }

    #[test]
    fn escaped_tick_does_not_open() {
        // column 3 of "a \`not-closed": the tick right after the backslash
        assert_eq!(
            run_at(CodeSpanRule::new(Span), "a \\`not` closed", 3),
            (None, String::new())
        );
    }

    #[test]
    fn backslash_before_line_start_is_ignored() {
        // at column 0 the preceding character belongs to the previous line
        let input = "x\\\n`code`";
        assert_eq!(
            run_at(CodeSpanRule::new(Span), input, 3),
            (Some(Span), "`code`".to_string())
        );
    }

    #[test]
    fn delimiter_table_is_cached_once() {
        let rule = CodeSpanRule::new(Span);
        assert!(rule.delimiters.get().is_none());
        let mut scanner = CharacterScanner::new("`a`");
        assert_eq!(rule.scan(&mut scanner), Some(Span));
        assert_eq!(rule.delimiters.get().map(Vec::len), Some(3));
        assert_eq!(rule.delimiters.get().unwrap()[0], "\r\n");
    }
}
