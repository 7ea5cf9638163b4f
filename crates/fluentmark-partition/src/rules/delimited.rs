use crate::scanner::CharacterScanner;

/// A token bounded by a start sequence and an end sequence.
///
/// Single-line rules also end at a line delimiter, which is consumed and
/// counts as a successful match. An empty end sequence therefore means "to the
/// end of the line". Reaching the end of input succeeds only when
/// `breaks_on_eof` is set, which single-line rules start with.
#[derive(Debug, Clone)]
pub struct DelimitedRule<T> {
    start: String,
    end: String,
    token: T,
    escape: Option<char>,
    breaks_on_eol: bool,
    breaks_on_eof: bool,
}

impl<T> DelimitedRule<T> {
    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }
}

impl<T: Copy> DelimitedRule<T> {
    pub fn multi_line(start: impl Into<String>, end: impl Into<String>, token: T) -> Self {
        Self::build(start.into(), end.into(), token, false)
    }

    pub fn single_line(start: impl Into<String>, end: impl Into<String>, token: T) -> Self {
        Self::build(start.into(), end.into(), token, true)
    }

    fn build(start: String, end: String, token: T, breaks_on_eol: bool) -> Self {
        assert!(!start.is_empty(), "delimited rule needs a start sequence");
        Self {
            start,
            end,
            token,
            escape: None,
            breaks_on_eol,
            breaks_on_eof: breaks_on_eol,
        }
    }

    /// Character that suppresses recognition of the character following it.
    #[must_use]
    pub fn with_escape(mut self, escape: char) -> Self {
        self.escape = Some(escape);
        self
    }

    #[must_use]
    pub fn breaks_on_eof(mut self, breaks_on_eof: bool) -> Self {
        self.breaks_on_eof = breaks_on_eof;
        self
    }

    pub fn token(&self) -> T {
        self.token
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        if !scanner.consume(&self.start) {
            return None;
        }

        let end_first = self.end.chars().next();
        while let Some(c) = scanner.read() {
            if Some(c) == self.escape {
                scanner.read();
            } else if Some(c) == end_first && scanner.looking_at(&self.end[c.len_utf8()..]) {
                scanner.consume(&self.end[c.len_utf8()..]);
                return Some(self.token);
            } else if self.breaks_on_eol && scanner.finish_line_delimiter(c) {
                return Some(self.token);
            }
        }

        self.breaks_on_eof.then_some(self.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::run;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Comment;

    fn html_comment() -> DelimitedRule<Comment> {
        DelimitedRule::multi_line("<!--", "-->", Comment).with_escape('\\')
    }

    #[rstest]
    #[case::simple("<!-- c1 -->\n# H", "<!-- c1 -->")]
    #[case::extra_dashes("<!--- c2 --->\n", "<!--- c2 --->")]
    #[case::spans_lines("<!--\nline\nline\n-->x", "<!--\nline\nline\n-->")]
    #[case::escaped_end("<!-- a \\--> b -->", "<!-- a \\--> b -->")]
    fn multi_line_comment_matches(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(run(html_comment(), input), (Some(Comment), expected.to_string()));
    }

    #[rstest]
    #[case::unterminated("<!-- never closed\n")]
    #[case::no_start("<!- x -->")]
    #[case::not_at_start("x<!-- y -->")]
    fn multi_line_comment_rewinds(#[case] input: &str) {
        assert_eq!(run(html_comment(), input), (None, String::new()));
    }

    #[test]
    fn multi_line_breaks_on_eof_when_configured() {
        let rule = DelimitedRule::multi_line("/'", "'/", Comment).breaks_on_eof(true);
        assert_eq!(
            run(rule, "/' open\nstill"),
            (Some(Comment), "/' open\nstill".to_string())
        );
    }

    #[test]
    fn single_line_ends_at_line_delimiter() {
        let rule = DelimitedRule::single_line("\"", "\"", Comment);
        assert_eq!(run(rule, "\"open\nnext"), (Some(Comment), "\"open\n".to_string()));
    }

    #[test]
    fn single_line_consumes_crlf_pair() {
        let rule = DelimitedRule::single_line("'", "", Comment).breaks_on_eof(true);
        assert_eq!(run(rule, "' note\r\nx"), (Some(Comment), "' note\r\n".to_string()));
    }

    #[test]
    fn single_line_accepts_end_of_input_unless_disabled() {
        let lenient = DelimitedRule::single_line("'", "", Comment);
        assert_eq!(run(lenient, "' trailing"), (Some(Comment), "' trailing".to_string()));

        let strict = DelimitedRule::single_line("'", "", Comment).breaks_on_eof(false);
        assert_eq!(run(strict, "' trailing"), (None, String::new()));
    }

    #[test]
    fn fence_closes_on_first_closing_sequence() {
        let rule = DelimitedRule::multi_line("```", "```", Comment).with_escape('\\');
        let input = "```rust\nlet a = 1;\n```\nafter";
        assert_eq!(run(rule, input), (Some(Comment), "```rust\nlet a = 1;\n```".to_string()));
    }
}
