use rustc_hash::FxHashMap;

use crate::scanner::CharacterScanner;

/// Decides which characters make up a word.
#[derive(Debug, Clone, Copy)]
pub struct WordDetector {
    pub is_start: fn(char) -> bool,
    pub is_part: fn(char) -> bool,
}

impl WordDetector {
    /// Identifiers: a letter, `_` or `@` followed by letters, digits, `_` and `@`.
    pub const IDENTIFIER: WordDetector = WordDetector {
        is_start: |c| c.is_alphabetic() || c == '_' || c == '@',
        is_part: |c| c.is_alphanumeric() || c == '_' || c == '@',
    };

    /// Runs of arrow and bracket punctuation, plus `!` preprocessor directives.
    pub const SYMBOL: WordDetector = WordDetector {
        is_start: |c| matches!(c, '{' | '}' | '[' | ']' | '(' | ')' | '<' | '>' | '-' | '!'),
        is_part: |c| matches!(c, '-' | '<' | '>') || c.is_ascii_alphabetic(),
    };
}

/// Reads a maximal word and looks it up in a table of registered words.
///
/// Unregistered words yield the default token when one is configured and
/// are rejected otherwise.
#[derive(Debug, Clone)]
pub struct WordRule<T> {
    detector: WordDetector,
    words: FxHashMap<String, T>,
    default: Option<T>,
    ignore_case: bool,
}

impl<T: Copy> WordRule<T> {
    pub fn new(detector: WordDetector) -> Self {
        Self {
            detector,
            words: FxHashMap::default(),
            default: None,
            ignore_case: false,
        }
    }

    #[must_use]
    pub fn with_default(mut self, token: T) -> Self {
        self.default = Some(token);
        self
    }

    #[must_use]
    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    #[must_use]
    pub fn with_words<'w>(mut self, words: impl IntoIterator<Item = &'w str>, token: T) -> Self {
        for word in words {
            self.add_word(word, token);
        }
        self
    }

    pub fn add_word(&mut self, word: &str, token: T) {
        let key = if self.ignore_case {
            word.to_lowercase()
        } else {
            word.to_string()
        };
        self.words.insert(key, token);
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        let start = scanner.mark();
        if !scanner.peek().is_some_and(self.detector.is_start) {
            return None;
        }
        scanner.read();
        while scanner.peek().is_some_and(self.detector.is_part) {
            scanner.read();
        }

        let word = scanner.consumed_since(start);
        let token = if self.ignore_case {
            self.words.get(&word.to_lowercase())
        } else {
            self.words.get(word)
        };
        token.copied().or(self.default)
    }
}

/// A run of whitespace, line delimiters included.
#[derive(Debug, Clone)]
pub struct WhitespaceRule<T> {
    token: T,
}

impl<T: Copy> WhitespaceRule<T> {
    pub fn new(token: T) -> Self {
        Self { token }
    }

    pub(crate) fn scan(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        if !scanner.peek().is_some_and(char::is_whitespace) {
            return None;
        }
        while scanner.peek().is_some_and(char::is_whitespace) {
            scanner.read();
        }
        Some(self.token)
    }
}
