use fluentmark_config::DEFAULT_TAB_WIDTH;

use crate::{
    rules::{is_eol, is_hws},
    scanner::CharacterScanner,
};

/// A block of lines each indented by at least [`Self::CODE_INDENT`] columns.
///
/// The rule only starts at the beginning of a line that follows a blank line
/// (or the document start), since indented code cannot interrupt a paragraph.
/// The first line must carry content and must not be a list item. Later lines
/// that are whitespace only but still indented continue the block; an empty
/// line ends it. Every accepted line is consumed through its line delimiter.
#[derive(Debug, Clone)]
pub struct IndentedCodeRule<T> {
    token: T,
    tab_width: usize,
}

impl<T: Copy> IndentedCodeRule<T> {
    /// Minimum indentation, in columns, of a code line.
    pub const CODE_INDENT: usize = 4;

    /// Widths below 2 fall back to the default tab width.
    pub fn new(token: T, tab_width: usize) -> Self {
        let tab_width = if tab_width < 2 {
            DEFAULT_TAB_WIDTH
        } else {
            tab_width
        };
        Self { token, tab_width }
    }

    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        if scanner.column() != 0 || !scanner.peek().is_some_and(is_hws) {
            return None;
        }
        if !follows_blank_line(scanner.preceding_text()) {
            return None;
        }
        if !self.code_line(scanner, true) {
            return None;
        }
        while self.code_line(scanner, false) {}
        Some(self.token)
    }

    /// Consumes one code line through its delimiter, or leaves the scanner at
    /// the line start and returns false.
    fn code_line(&self, scanner: &mut CharacterScanner<'_>, first: bool) -> bool {
        let bol = scanner.mark();

        let mut width = 0;
        while let Some(c) = scanner.peek().filter(|c| is_hws(*c)) {
            scanner.read();
            width = self.advance(width, c);
        }

        let blank = scanner.peek().is_none_or(is_eol);
        let accepted =
            width >= Self::CODE_INDENT && !(first && (blank || starts_list_item(scanner)));
        if !accepted {
            scanner.reset(bol);
            return false;
        }

        while let Some(c) = scanner.read() {
            if scanner.finish_line_delimiter(c) {
                break;
            }
        }
        true
    }

    fn advance(&self, width: usize, c: char) -> usize {
        if c == '\t' {
            width + self.tab_width - width % self.tab_width
        } else {
            width + 1
        }
    }
}

/// True at the document start or when the line before the current one holds
/// only whitespace.
fn follows_blank_line(preceding: &str) -> bool {
    if preceding.is_empty() {
        return true;
    }
    let Some(previous) = preceding
        .strip_suffix("\r\n")
        .or_else(|| preceding.strip_suffix(['\n', '\r']))
    else {
        return false;
    };
    let line_start = previous.rfind(['\n', '\r']).map_or(0, |i| i + 1);
    previous[line_start..].chars().all(is_hws)
}

/// Unordered (`-`, `+`, `*`) or ordered (digits) list marker followed by
/// horizontal whitespace. Never moves the scanner.
fn starts_list_item(scanner: &mut CharacterScanner<'_>) -> bool {
    let mark = scanner.mark();
    let list = match scanner.read() {
        Some('-' | '+' | '*') => scanner.peek().is_some_and(is_hws),
        Some(c) if c.is_ascii_digit() => {
            while scanner.peek().is_some_and(|c| c.is_ascii_digit()) {
                scanner.read();
            }
            scanner.peek().is_some_and(is_hws)
        }
        _ => false,
    };
    scanner.reset(mark);
    list
}
