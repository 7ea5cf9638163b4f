//! Rule sets for the built-in partitionings. Order matters: at each position
//! the first matching rule wins.

use fluentmark_config::PartitioningConfig;

use crate::{
    partition::ContentType,
    rules::{
        CodeSpanRule, DelimitedRule, DotBlockRule, FileInclusionRule, FrontMatterRule,
        HtmlBlockRule, IndentedCodeRule, InlineMathRule, Rule,
    },
};

pub const ESCAPE: char = '\\';

/// Diagram blocks embedded in Markdown, as start/end marker pairs.
pub const UML_BLOCKS: &[(&str, &str)] = &[
    ("@startdot", "@enddot"),
    ("@startuml", "@enduml"),
    ("@startsalt", "@endsalt"),
    ("@startyaml", "@endyaml"),
    ("@startjson", "@endjson"),
    ("@startmindmap", "@endmindmap"),
    ("@startgantt", "@endgantt"),
    ("@startwbs", "@endwbs"),
];

pub const CODE_FENCES: &[&str] = &["~~~", "```"];

pub fn markdown_rules(config: &PartitioningConfig) -> Vec<Rule<ContentType>> {
    let mut rules: Vec<Rule<ContentType>> = Vec::new();

    if config.front_matter {
        rules.push(FrontMatterRule::new(ContentType::FrontMatter).into());
    }
    rules.push(multi_line("<!--", "-->", ContentType::Comment));
    rules.push(multi_line("$$", "$$", ContentType::MathBlock));
    rules.push(InlineMathRule::new(ContentType::MathBlock).into());
    rules.push(FileInclusionRule::new(ContentType::PlantUmlInclude).into());
    rules.push(HtmlBlockRule::new(ContentType::HtmlBlock).into());
    rules.push(DotBlockRule::new(ContentType::DotBlock).into());
    for (start, end) in UML_BLOCKS {
        rules.push(multi_line(start, end, ContentType::UmlBlock));
    }
    for fence in CODE_FENCES {
        rules.push(multi_line(fence, fence, ContentType::CodeBlock));
    }
    rules.push(CodeSpanRule::new(ContentType::CodeSpan).into());
    rules.push(
        IndentedCodeRule::new(ContentType::CodeBlock, config.effective_tab_width()).into(),
    );

    rules
}

pub fn plantuml_rules() -> Vec<Rule<ContentType>> {
    vec![
        DelimitedRule::multi_line("/'", "'/", ContentType::Comment)
            .with_escape(ESCAPE)
            .breaks_on_eof(true)
            .into(),
        DelimitedRule::single_line("'", "", ContentType::Comment)
            .with_escape(ESCAPE)
            .breaks_on_eof(true)
            .into(),
    ]
}

fn multi_line(start: &str, end: &str, content_type: ContentType) -> Rule<ContentType> {
    DelimitedRule::multi_line(start, end, content_type)
        .with_escape(ESCAPE)
        .into()
}
