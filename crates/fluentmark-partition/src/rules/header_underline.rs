use crate::{rules::is_hws, scanner::CharacterScanner};

/// Setext heading: a text line followed by a line of `=` or `-`.
///
/// The token covers both lines and the underline's line delimiter. Only tried
/// at the start of a line; the text line must not be blank.
#[derive(Debug, Clone)]
pub struct HeaderUnderlineRule<T> {
    token: T,
}

impl<T: Copy> HeaderUnderlineRule<T> {
    pub fn new(token: T) -> Self {
        Self { token }
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        if scanner.column() != 0 {
            return None;
        }

        let mut blank = true;
        loop {
            let c = scanner.read()?;
            if scanner.finish_line_delimiter(c) {
                break;
            }
            blank &= c.is_whitespace();
        }
        if blank {
            return None;
        }

        if !is_underline(scanner.read()?) {
            return None;
        }

        loop {
            let Some(c) = scanner.read() else {
                return Some(self.token);
            };
            if scanner.finish_line_delimiter(c) {
                return Some(self.token);
            }
            if !(is_underline(c) || is_hws(c)) {
                return None;
            }
        }
    }
}

fn is_underline(c: char) -> bool {
    c == '=' || c == '-'
}
