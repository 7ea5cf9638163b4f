use crate::scanner::CharacterScanner;

/// Metadata block at the very start of a document:
///
/// ```text
/// ---
/// title: X
/// ---
/// ```
///
/// Both marker lines must be exactly `---`. The closing marker's line
/// delimiter stays outside the token. Without a closing marker there is no
/// front matter.
#[derive(Debug, Clone)]
pub struct FrontMatterRule<T> {
    token: T,
}

impl<T: Copy> FrontMatterRule<T> {
    pub const MARKER: &'static str = "---";
    pub const ESCAPE: char = '\\';

    pub fn new(token: T) -> Self {
        Self { token }
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        if scanner.offset() != 0 || !scanner.consume(Self::MARKER) {
            return None;
        }
        let c = scanner.read()?;
        if !scanner.finish_line_delimiter(c) {
            return None;
        }

        let mut line_start = true;
        loop {
            if line_start && scanner.consume(Self::MARKER) {
                if scanner.peek().is_none_or(|c| c == '\n' || c == '\r') {
                    return Some(self.token);
                }
                line_start = false;
                continue;
            }
            let c = scanner.read()?;
            if c == Self::ESCAPE {
                scanner.read();
                line_start = false;
            } else {
                line_start = scanner.finish_line_delimiter(c);
            }
        }
    }
}
