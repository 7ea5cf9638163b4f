use crate::{
    rules::{is_eol, is_hws},
    scanner::CharacterScanner,
};

/// Raw HTML block opened by a block-level tag at the start of a line.
///
/// The block runs until the line before the next blank line, or to the end of
/// input. The delimiter of its last line is left outside the token.
#[derive(Debug, Clone)]
pub struct HtmlBlockRule<T> {
    token: T,
}

impl<T: Copy> HtmlBlockRule<T> {
    pub const OPEN: char = '<';

    /// Tags that open an HTML block, compared case-insensitively.
    pub const BLOCK_TAGS: &'static [&'static str] = &[
        "address", "article", "aside", "base", "basefont", "blockquote", "body", "caption",
        "center", "col", "colgroup", "dd", "details", "dialog", "dir", "div", "dl", "dt",
        "fieldset", "figcaption", "figure", "footer", "form", "frame", "frameset", "h1", "h2",
        "h3", "h4", "h5", "h6", "head", "header", "hr", "html", "iframe", "legend", "li", "link",
        "main", "menu", "menuitem", "nav", "noframes", "ol", "optgroup", "option", "p", "param",
        "search", "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "title",
        "tr", "track", "ul",
    ];

    pub fn new(token: T) -> Self {
        Self { token }
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        if scanner.column() != 0 || scanner.read()? != Self::OPEN {
            return None;
        }
        if scanner.peek() == Some('/') {
            scanner.read();
        }

        let mut tag = String::new();
        while let Some(c) = scanner.peek().filter(char::is_ascii_alphanumeric) {
            scanner.read();
            tag.push(c.to_ascii_lowercase());
        }
        if !tag.starts_with(|c: char| c.is_ascii_alphabetic())
            || !Self::BLOCK_TAGS.contains(&tag.as_str())
        {
            return None;
        }
        let tag_ends = match scanner.peek() {
            None => true,
            Some(c) => c.is_whitespace() || c == '>' || scanner.looking_at("/>"),
        };
        if !tag_ends {
            return None;
        }

        loop {
            let line_end = scanner.mark();
            let Some(c) = scanner.read() else {
                return Some(self.token);
            };
            if !scanner.finish_line_delimiter(c) {
                continue;
            }
            while scanner.peek().is_some_and(is_hws) {
                scanner.read();
            }
            if scanner.peek().is_none_or(is_eol) {
                scanner.reset(line_end);
                return Some(self.token);
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
    struct Html;

    #[rstest]
    #[case::single_line("<div>text</div>\n\nafter", "<div>text</div>")]
    #[case::multi_line("<table>\n  <tr><td>1</td></tr>\n</table>\n\npara", "<table>\n  <tr><td>1</td></tr>\n</table>")]
    #[case::closing_tag("</div>\n\n", "</div>")]
    #[case::attributes("<DIV class=\"x\">\nbody\n", "<DIV class=\"x\">\nbody")]
    #[case::self_closing("<hr/>", "<hr/>")]
    #[case::whitespace_blank_line("<p>\na\n   \nb", "<p>\na")]
    fn matches_block(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(run(HtmlBlockRule::new(Html), input), (Some(Html), expected.to_string()));
    }

    #[rstest]
    #[case::inline_tag("<span>x</span>\n")]
    #[case::prefix_of_tag("<divider>\n")]
    #[case::not_a_tag("< div>\n")]
    #[case::autolink("<https://example.com>\n")]
    #[case::comment("<!-- c -->\n")]
    fn rejects(#[case] input: &str) {
        assert_eq!(run(HtmlBlockRule::new(Html), input), (None, String::new()));
    }

    #[test]
    fn only_at_line_start() {
        assert_eq!(run_at(HtmlBlockRule::new(Html), "x <div>\n", 2), (None, String::new()));
    }
}
