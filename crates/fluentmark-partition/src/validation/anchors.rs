use std::{collections::BTreeMap, ops::Range, sync::OnceLock};

use pulldown_cmark::{Event, Options, Parser, Tag};
use regex::Regex;

use crate::{
    document::Document,
    models::{FileKind, SourceFile},
    partition::{ContentType, PartitioningId, TypedRegion},
    validation::{Issue, IssueSink, IssueType, Severity, TypedRegionValidator},
};

/// Checks explicit heading anchors (`# Title {#anchor}`) in default
/// Markdown content: every anchor id must be well formed and unique within
/// the region.
#[derive(Debug, Default)]
pub struct AnchorValidator;

/// An anchor id found in region text, with its byte range in that text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AnchorMatch {
    id: String,
    range: Range<usize>,
}

fn heading_anchor_regex() -> &'static Regex {
    static HEADING_ANCHOR: OnceLock<Regex> = OnceLock::new();
    HEADING_ANCHOR.get_or_init(|| {
        Regex::new(r"#+\s.*\{#(?<anchor>.*)\}\s*").expect("Invalid heading anchor regex")
    })
}

fn valid_anchor_regex() -> &'static Regex {
    static VALID_ANCHOR: OnceLock<Regex> = OnceLock::new();
    VALID_ANCHOR
        .get_or_init(|| Regex::new(r"^[A-Za-z][A-Za-z0-9\-_:.]*$").expect("Invalid anchor id regex"))
}

pub fn is_valid_anchor_id(id: &str) -> bool {
    valid_anchor_regex().is_match(id)
}

/// Anchor ids declared on ATX heading lines of `text`.
fn find_heading_anchors(text: &str) -> Vec<AnchorMatch> {
    let heading_lines = Parser::new_ext(text, Options::ENABLE_HEADING_ATTRIBUTES)
        .into_offset_iter()
        .filter_map(|(event, range)| match event {
            Event::Start(Tag::Heading { .. }) => Some(line_around(text, range.start)),
            _ => None,
        });

    let mut anchors = Vec::new();
    for line in heading_lines {
        for captures in heading_anchor_regex().captures_iter(&text[line.clone()]) {
            if let Some(anchor) = captures.name("anchor") {
                anchors.push(AnchorMatch {
                    id: anchor.as_str().to_string(),
                    range: line.start + anchor.start()..line.start + anchor.end(),
                });
            }
        }
    }
    anchors
}

/// Byte range of the line containing `offset`, without its delimiter.
fn line_around(text: &str, offset: usize) -> Range<usize> {
    let start = text[..offset].rfind(['\r', '\n']).map_or(0, |i| i + 1);
    let end = text[offset..]
        .find(['\r', '\n'])
        .map_or(text.len(), |i| offset + i);
    start..end
}

impl AnchorValidator {
    pub fn new() -> Self {
        Self
    }

    fn issue(
        &self,
        document: &Document,
        file: &SourceFile,
        range: Range<usize>,
        message: String,
    ) -> Issue {
        Issue {
            file: file.relative_path().to_relative_path_buf(),
            issue_type: IssueType::Markdown,
            severity: Severity::Error,
            message,
            line: line_number(document, range.start),
            start_offset: range.start,
            end_offset: range.end,
        }
    }
}

fn line_number(document: &Document, offset: usize) -> usize {
    document.line_of_offset(offset).map_or(0, |line| line + 1)
}

impl TypedRegionValidator for AnchorValidator {
    fn required_partitioning(&self, _file: &SourceFile) -> PartitioningId {
        PartitioningId::Markdown
    }

    fn is_validator_for_file(&self, file: &SourceFile) -> bool {
        file.kind() == FileKind::Markdown
    }

    fn is_validator_for_region(&self, region: &TypedRegion, _file: &SourceFile) -> bool {
        region.content_type == ContentType::Default
    }

    fn validate_region(
        &self,
        region: &TypedRegion,
        document: &Document,
        file: &SourceFile,
        sink: &mut dyn IssueSink,
    ) {
        let text = match document.get(region.span()) {
            Ok(text) => text,
            Err(err) => {
                log::warn!("skipping anchor validation of {}: {err}", file.relative_path());
                return;
            }
        };

        let mut anchors: BTreeMap<String, Vec<Range<usize>>> = BTreeMap::new();
        for anchor in find_heading_anchors(&text) {
            // from the `#` of `{#` to the end of the id, in document offsets
            let range = region.offset + anchor.range.start - 1..region.offset + anchor.range.end;
            anchors.entry(anchor.id).or_default().push(range);
        }

        for (id, ranges) in &anchors {
            if is_valid_anchor_id(id) {
                continue;
            }
            for range in ranges {
                let message = format!(
                    "The anchor identifier \"{id}\" is invalid. It has to contain at least one \
                     character, must start with a letter, and is allowed to contain any number of \
                     the following characters in the remainder: letters ([A-Za-z]), digits \
                     ([0-9]), hyphens (\"-\"), underscores (\"_\"), colons (\":\"), and periods \
                     (\".\")."
                );
                sink.report(self.issue(document, file, range.clone(), message));
            }
        }

        for (id, ranges) in anchors.iter().filter(|(_, ranges)| ranges.len() > 1) {
            let lines = ranges
                .iter()
                .map(|range| line_number(document, range.start + 1).to_string())
                .collect::<Vec<_>>()
                .join(", ");
            for range in ranges {
                let message = format!(
                    "The anchor identifier \"{id}\" is not unique. The same identifier is used in \
                     the following lines: {lines}"
                );
                sink.report(self.issue(document, file, range.clone(), message));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::CollectingSink;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn validate(text: &str) -> Vec<Issue> {
        let document = Document::new(text);
        let region = TypedRegion::new(0, text.len(), ContentType::Default);
        let mut sink = CollectingSink::new();
        AnchorValidator::new().validate_region(&region, &document, &SourceFile::from("doc.md"), &mut sink);
        sink.into_issues()
    }

    #[rstest]
    #[case("a", true)]
    #[case("intro-1_b:c.d", true)]
    #[case("1st", false)]
    #[case("has space", false)]
    #[case("", false)]
    #[case("ümlaut", false)]
    fn anchor_id_syntax(#[case] id: &str, #[case] valid: bool) {
        assert_eq!(is_valid_anchor_id(id), valid);
    }

    #[test]
    fn finds_anchor_on_heading_lines_only() {
        let text = "# Title {#top}\n\nnot a heading {#nope}\n\n## Sub {#sub}\n";
        let ids: Vec<_> = find_heading_anchors(text).into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["top", "sub"]);
    }

    #[test]
    fn anchor_range_covers_the_id() {
        let text = "# Title {#top}\n";
        let anchors = find_heading_anchors(text);
        assert_eq!(&text[anchors[0].range.clone()], "top");
    }

    #[test]
    fn valid_unique_anchors_pass() {
        assert!(validate("# One {#one}\n\n# Two {#two}\n").is_empty());
    }

    #[test]
    fn invalid_anchor_is_reported() {
        let text = "intro\n\n# Bad {#1bad}\n";
        let issues = validate(text);
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.line, 3);
        assert_eq!(&text[issue.start_offset..issue.end_offset], "#1bad");
        assert!(issue.message.starts_with("The anchor identifier \"1bad\" is invalid."));
    }

    #[test]
    fn duplicate_anchors_report_every_line() {
        let text = "# A {#dup}\n\ntext\n\n# B {#dup}\n";
        let issues = validate(text);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues.iter().map(|i| i.line).collect::<Vec<_>>(), vec![1, 5]);
        for issue in &issues {
            assert_eq!(
                issue.message,
                "The anchor identifier \"dup\" is not unique. The same identifier is used in the \
                 following lines: 1, 5"
            );
        }
    }

    #[rstest]
    #[case::lf("# A {#dup}\n\n# B {#dup}\n")]
    #[case::crlf("# A {#dup}\r\n\r\n# B {#dup}\r\n")]
    #[case::cr_only("# A {#dup}\r\r# B {#dup}\r")]
    fn duplicates_are_found_with_any_line_delimiter(#[case] text: &str) {
        let issues = validate(text);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues.iter().map(|i| i.line).collect::<Vec<_>>(), vec![1, 3]);
        for issue in &issues {
            assert_eq!(&text[issue.start_offset..issue.end_offset], "#dup");
            assert!(issue.message.ends_with("following lines: 1, 3"));
        }
    }

    #[test]
    fn applies_to_default_markdown_regions() {
        let validator = AnchorValidator::new();
        let markdown = SourceFile::from("a.md");
        assert!(validator.is_validator_for_file(&markdown));
        assert!(!validator.is_validator_for_file(&SourceFile::from("a.puml")));
        assert!(validator.is_validator_for_region(&TypedRegion::new(0, 1, ContentType::Default), &markdown));
        assert!(!validator.is_validator_for_region(&TypedRegion::new(0, 1, ContentType::CodeBlock), &markdown));
    }
}
