use crate::{rules::is_eol, scanner::CharacterScanner};

/// Inline TeX math such as `$x^2$`.
///
/// The opening `$` must be followed by a non-whitespace character, the
/// closing `$` must follow a non-whitespace character and must not be followed
/// by a digit, so that prices like `$5 and $6` stay plain text. The formula
/// cannot span lines; `\$` inside it is literal.
#[derive(Debug, Clone)]
pub struct InlineMathRule<T> {
    token: T,
}

impl<T: Copy> InlineMathRule<T> {
    pub const DOLLAR: char = '$';
    pub const ESCAPE: char = '\\';

    pub fn new(token: T) -> Self {
        Self { token }
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        if scanner.read()? != Self::DOLLAR {
            return None;
        }
        let first = scanner.read()?;
        if first.is_whitespace() || first == Self::DOLLAR {
            return None;
        }

        let mut previous = first;
        if first == Self::ESCAPE {
            previous = scanner.read()?;
        }
        loop {
            let c = scanner.read()?;
            if is_eol(c) {
                return None;
            }
            if c == Self::ESCAPE {
                previous = scanner.read()?;
                continue;
            }
            if c == Self::DOLLAR
                && !previous.is_whitespace()
                && !scanner.peek().is_some_and(|n| n.is_ascii_digit())
            {
                return Some(self.token);
            }
            previous = c;
        }
    }
}
