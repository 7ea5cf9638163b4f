use crate::{rules::is_eol, scanner::CharacterScanner};

/// Markdown image link to a PlantUML file, such as `![diagram](uml/flow.puml)`.
///
/// The label runs to the first `]` on the same line. The path may only hold
/// alphanumerics, `_`, `-`, `.`, `/` and spaces, and must end in `.puml)`.
#[derive(Debug, Clone)]
pub struct FileInclusionRule<T> {
    token: T,
}

impl<T: Copy> FileInclusionRule<T> {
    pub const OPEN: &'static str = "![";
    pub const LABEL_CLOSE: char = ']';
    pub const TARGET_OPEN: char = '(';
    /// What follows the final `.` of a PlantUML path, including the closing paren.
    pub const SUFFIX: &'static str = "puml)";

    pub fn new(token: T) -> Self {
        Self { token }
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        if !scanner.consume(Self::OPEN) {
            return None;
        }

        loop {
            let c = scanner.read()?;
            if is_eol(c) {
                return None;
            }
            if c == Self::LABEL_CLOSE {
                break;
            }
        }

        if scanner.read()? != Self::TARGET_OPEN {
            return None;
        }

        loop {
            let c = scanner.read()?;
            if !is_path_char(c) {
                return None;
            }
            if c == '.' && scanner.looking_at(Self::SUFFIX) {
                break;
            }
        }

        scanner.consume(Self::SUFFIX).then_some(self.token)
    }
}

fn is_path_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ' ' | '.' | '/')
}
