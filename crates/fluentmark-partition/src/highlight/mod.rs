//! # Highlighting
//!
//! Token scanning inside a single partition. Unlike the partition scanner,
//! every character is classified: positions no rule matches become
//! one-character default tokens, and nothing is merged.
//!
//! [`Highlighter::markup`] classifies default Markdown content and
//! [`Highlighter::uml`] classifies PlantUML source, both yielding
//! [`HighlightClass`] values.

use serde::Serialize;

use crate::{
    partition::schemes::{ESCAPE, UML_BLOCKS},
    rules::{DelimitedRule, HeaderUnderlineRule, Rule, WhitespaceRule, WordDetector, WordRule},
    scanner::CharacterScanner,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightClass {
    Default,
    Keyword,
    Type,
    Symbol,
    String,
    Comment,
    Heading,
    Whitespace,
}

/// A classified span produced by a [`TokenScanner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HighlightToken<T> {
    pub offset: usize,
    pub length: usize,
    pub token: T,
}

const UML_KEYWORDS: &[&str] = &[
    "as", "also", "autonumber", "caption", "title", "newpage", "box", "alt", "else", "opt", "loop",
    "par", "break", "critical", "note", "rnote", "hnote", "legend", "group", "left", "right", "of",
    "on", "link", "over", "end", "activate", "deactivate", "destroy", "create", "footbox", "hide",
    "show", "skinparam", "skin", "top", "bottom", "package", "namespace", "page", "up", "down", "if",
    "elseif", "endif", "partition", "footer", "header", "center", "rotate", "ref", "return", "is",
    "repeat", "start", "stop", "while", "endwhile", "fork", "again", "kill", "order",
];

const UML_TYPES: &[&str] = &[
    "actor", "participant", "usecase", "class", "interface", "abstract", "enum", "component",
    "state", "object", "artifact", "folder", "rectangle", "node", "frame", "cloud", "database",
    "storage", "agent", "stack", "boundary", "control", "collections", "entity", "card", "file",
    "queue", "archimate",
];

const UML_PREPROCESSOR: &[&str] = &[
    "!exit", "!include", "!pragma", "!define", "!undef", "!if", "!ifdef", "!endif", "!ifndef",
    "!else", "!definelong", "!enddefinelong",
];

const UML_SYMBOLS: &[&str] = &[
    "{", "}", "[", "]", "<-", "<--", "<---", "-", "--", "---", "->", "-->", "--->", "(", ")",
];

/// Setext headings and whitespace.
pub fn markup_rules() -> Vec<Rule<HighlightClass>> {
    vec![
        HeaderUnderlineRule::new(HighlightClass::Heading).into(),
        WhitespaceRule::new(HighlightClass::Whitespace).into(),
    ]
}

/// Comments, strings, keywords, diagram types, symbols and whitespace.
///
/// Keyword lookup has no fallback token so that unregistered words still
/// reach the type table, whose fallback is the default class.
pub fn uml_rules() -> Vec<Rule<HighlightClass>> {
    let markers = UML_BLOCKS.iter().flat_map(|(start, end)| [*start, *end]);
    let keywords = WordRule::new(WordDetector::IDENTIFIER)
        .ignore_case()
        .with_words(markers, HighlightClass::Keyword)
        .with_words(UML_KEYWORDS.iter().copied(), HighlightClass::Keyword);
    let types = WordRule::new(WordDetector::IDENTIFIER)
        .ignore_case()
        .with_default(HighlightClass::Default)
        .with_words(UML_TYPES.iter().copied(), HighlightClass::Type);
    let symbols = WordRule::new(WordDetector::SYMBOL)
        .ignore_case()
        .with_default(HighlightClass::Default)
        .with_words(UML_SYMBOLS.iter().copied(), HighlightClass::Symbol)
        .with_words(UML_PREPROCESSOR.iter().copied(), HighlightClass::Symbol);

    vec![
        DelimitedRule::multi_line("/'", "'/", HighlightClass::Comment)
            .with_escape(ESCAPE)
            .breaks_on_eof(true)
            .into(),
        DelimitedRule::single_line("'", "", HighlightClass::Comment)
            .with_escape(ESCAPE)
            .breaks_on_eof(true)
            .into(),
        DelimitedRule::single_line("\"", "\"", HighlightClass::String)
            .with_escape(ESCAPE)
            .breaks_on_eof(true)
            .into(),
        keywords.into(),
        types.into(),
        symbols.into(),
        WhitespaceRule::new(HighlightClass::Whitespace).into(),
    ]
}

/// An ordered rule set with a fallback token for unmatched characters.
#[derive(Debug)]
pub struct Highlighter<T> {
    rules: Vec<Rule<T>>,
    default: T,
}

impl<T: Copy> Highlighter<T> {
    pub fn new(rules: Vec<Rule<T>>, default: T) -> Self {
        Self { rules, default }
    }

    /// A token scanner over `length` bytes of `text` starting at `offset`.
    pub fn scanner<'a>(&'a self, text: &'a str, offset: usize, length: usize) -> TokenScanner<'a, T> {
        TokenScanner {
            rules: &self.rules,
            scanner: CharacterScanner::with_range(text, offset, length),
            default: self.default,
        }
    }

    pub fn tokens(&self, text: &str) -> Vec<HighlightToken<T>> {
        self.scanner(text, 0, text.len()).collect()
    }
}

impl Highlighter<HighlightClass> {
    pub fn markup() -> Self {
        Self::new(markup_rules(), HighlightClass::Default)
    }

    pub fn uml() -> Self {
        Self::new(uml_rules(), HighlightClass::Default)
    }
}

/// Classifies every character of its range.
pub struct TokenScanner<'a, T> {
    rules: &'a [Rule<T>],
    scanner: CharacterScanner<'a>,
    default: T,
}

impl<T: Copy> TokenScanner<'_, T> {
    pub fn next_token(&mut self) -> Option<HighlightToken<T>> {
        let start = self.scanner.offset();
        if self.scanner.at_eof() {
            return None;
        }

        let matched = self
            .rules
            .iter()
            .find_map(|rule| rule.evaluate(&mut self.scanner));
        let token = match matched {
            Some(token) if self.scanner.offset() > start => token,
            _ => {
                self.scanner.read();
                self.default
            }
        };
        Some(HighlightToken {
            offset: start,
            length: self.scanner.offset() - start,
            token,
        })
    }
}

impl<T: Copy> Iterator for TokenScanner<'_, T> {
    type Item = HighlightToken<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
