//! # Scanner rules
//!
//! A rule looks at the scanner position and either consumes a token and
//! returns its success value, or returns `None` with the scanner exactly where
//! it started. The set of rule kinds is closed: [`Rule`] dispatches to the
//! concrete rule and restores the entry mark whenever a rule reports no match,
//! so individual rules may bail out from any intermediate position.
//!
//! Each rule owns the delimiters it recognizes as associated constants
//! (`FileInclusionRule::OPEN`, `CodeSpanRule::TICK`, ...).

pub mod code_span;
pub mod delimited;
pub mod dot_block;
pub mod file_inclusion;
pub mod front_matter;
pub mod header_underline;
pub mod html_block;
pub mod indented_code;
pub mod inline_math;
pub mod word;

pub use code_span::CodeSpanRule;
pub use delimited::DelimitedRule;
pub use dot_block::DotBlockRule;
pub use file_inclusion::FileInclusionRule;
pub use front_matter::FrontMatterRule;
pub use header_underline::HeaderUnderlineRule;
pub use html_block::HtmlBlockRule;
pub use indented_code::IndentedCodeRule;
pub use inline_math::InlineMathRule;
pub use word::{WhitespaceRule, WordDetector, WordRule};

use crate::scanner::CharacterScanner;

pub enum Rule<T> {
    Delimited(DelimitedRule<T>),
    CodeSpan(CodeSpanRule<T>),
    IndentedCode(IndentedCodeRule<T>),
    FrontMatter(FrontMatterRule<T>),
    FileInclusion(FileInclusionRule<T>),
    HeaderUnderline(HeaderUnderlineRule<T>),
    HtmlBlock(HtmlBlockRule<T>),
    DotBlock(DotBlockRule<T>),
    InlineMath(InlineMathRule<T>),
    Word(WordRule<T>),
    Whitespace(WhitespaceRule<T>),
}

impl<T: Copy> Rule<T> {
    /// Tries the rule at the current scanner position.
    pub fn evaluate(&self, scanner: &mut CharacterScanner<'_>) -> Option<T> {
        let entry = scanner.mark();
        let token = match self {
            Rule::Delimited(rule) => rule.scan(scanner),
            Rule::CodeSpan(rule) => rule.scan(scanner),
            Rule::IndentedCode(rule) => rule.scan(scanner),
            Rule::FrontMatter(rule) => rule.scan(scanner),
            Rule::FileInclusion(rule) => rule.scan(scanner),
            Rule::HeaderUnderline(rule) => rule.scan(scanner),
            Rule::HtmlBlock(rule) => rule.scan(scanner),
            Rule::DotBlock(rule) => rule.scan(scanner),
            Rule::InlineMath(rule) => rule.scan(scanner),
            Rule::Word(rule) => rule.scan(scanner),
            Rule::Whitespace(rule) => rule.scan(scanner),
        };
        if token.is_none() {
            scanner.reset(entry);
        }
        token
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Rule::Delimited(_) => "delimited",
            Rule::CodeSpan(_) => "code-span",
            Rule::IndentedCode(_) => "indented-code",
            Rule::FrontMatter(_) => "front-matter",
            Rule::FileInclusion(_) => "file-inclusion",
            Rule::HeaderUnderline(_) => "header-underline",
            Rule::HtmlBlock(_) => "html-block",
            Rule::DotBlock(_) => "dot-block",
            Rule::InlineMath(_) => "inline-math",
            Rule::Word(_) => "word",
            Rule::Whitespace(_) => "whitespace",
        }
    }
}

impl<T> std::fmt::Debug for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Rule::Delimited(rule) => return write!(f, "Rule::Delimited({:?})", rule.start()),
            Rule::CodeSpan(_) => "CodeSpan",
            Rule::IndentedCode(_) => "IndentedCode",
            Rule::FrontMatter(_) => "FrontMatter",
            Rule::FileInclusion(_) => "FileInclusion",
            Rule::HeaderUnderline(_) => "HeaderUnderline",
            Rule::HtmlBlock(_) => "HtmlBlock",
            Rule::DotBlock(_) => "DotBlock",
            Rule::InlineMath(_) => "InlineMath",
            Rule::Word(_) => "Word",
            Rule::Whitespace(_) => "Whitespace",
        };
        write!(f, "Rule::{name}")
    }
}

macro_rules! impl_from_rule {
    ($($variant:ident => $ty:ident),* $(,)?) => {
        $(
            impl<T> From<$ty<T>> for Rule<T> {
                fn from(rule: $ty<T>) -> Self {
                    Rule::$variant(rule)
                }
            }
        )*
    };
}

impl_from_rule! {
    Delimited => DelimitedRule,
    CodeSpan => CodeSpanRule,
    IndentedCode => IndentedCodeRule,
    FrontMatter => FrontMatterRule,
    FileInclusion => FileInclusionRule,
    HeaderUnderline => HeaderUnderlineRule,
    HtmlBlock => HtmlBlockRule,
    DotBlock => DotBlockRule,
    InlineMath => InlineMathRule,
    Word => WordRule,
    Whitespace => WhitespaceRule,
}

/// Horizontal whitespace inside a line.
pub(crate) fn is_hws(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// True for the characters that can start a line delimiter.
pub(crate) fn is_eol(c: char) -> bool {
    c == '\n' || c == '\r'
}
