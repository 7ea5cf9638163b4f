use crate::{rules::is_hws, scanner::CharacterScanner};

/// Graphviz graph written directly in the document:
///
/// ```text
/// digraph G {
///   a -> b;
/// }
/// ```
///
/// Starts at the beginning of a line with `graph` or `digraph`, optionally
/// after `strict`, and ends at the brace that balances the first `{`. Braces
/// inside quoted strings do not count.
#[derive(Debug, Clone)]
pub struct DotBlockRule<T> {
    token: T,
}

impl<T: Copy> DotBlockRule<T> {
    pub const STRICT: &'static str = "strict";
    pub const KEYWORDS: [&'static str; 2] = ["digraph", "graph"];
    pub const OPEN: char = '{';
    pub const CLOSE: char = '}';

    pub fn new(token: T) -> Self {
        Self { token }
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        if scanner.column() != 0 {
            return None;
        }
        if scanner.consume(Self::STRICT) && !skip_hws(scanner) {
            return None;
        }
        let keyword = *Self::KEYWORDS.iter().find(|k| scanner.looking_at(k))?;
        scanner.consume(keyword);
        if !matches!(scanner.peek(), Some(c) if c.is_whitespace() || c == Self::OPEN) {
            return None;
        }

        // graph id up to the opening brace
        loop {
            let c = scanner.read()?;
            if c == Self::OPEN {
                break;
            }
            if c == Self::CLOSE || c == ';' {
                return None;
            }
        }

        let mut depth = 1usize;
        let mut quoted = false;
        while depth > 0 {
            let c = scanner.read()?;
            match c {
                '\\' if quoted => {
                    scanner.read();
                }
                '"' => quoted = !quoted,
                c if c == Self::OPEN && !quoted => depth += 1,
                c if c == Self::CLOSE && !quoted => depth -= 1,
                _ => {}
            }
        }
        Some(self.token)
    }
}

/// Consumes horizontal whitespace, returning whether there was any.
fn skip_hws(scanner: &mut CharacterScanner<'_>) -> bool {
    let mut any = false;
    while scanner.peek().is_some_and(is_hws) {
        scanner.read();
        any = true;
    }
    any
}
