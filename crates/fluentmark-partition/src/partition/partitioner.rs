use std::ops::Range;

use fluentmark_config::PartitioningConfig;

use crate::{
    document::{Document, Span},
    error::PartitionError,
    partition::{
        ContentType, PartitionScanner, PartitioningId, TypedRegion,
        scanner::ScannedRegion, schemes,
    },
    rules::Rule,
};

/// An ordered rule set bound to a partitioning id.
///
/// A partitioner holds no per-document state, so one instance is shared
/// (behind an `Arc`) by every document using its partitioning.
#[derive(Debug)]
pub struct Partitioner {
    id: PartitioningId,
    rules: Vec<Rule<ContentType>>,
}

impl Partitioner {
    pub fn new(id: PartitioningId, rules: Vec<Rule<ContentType>>) -> Self {
        log::debug!(
            "{id}: {} rules [{}]",
            rules.len(),
            rules.iter().map(Rule::kind_name).collect::<Vec<_>>().join(", ")
        );
        Self { id, rules }
    }

    pub fn markdown(config: &PartitioningConfig) -> Self {
        Self::new(PartitioningId::Markdown, schemes::markdown_rules(config))
    }

    pub fn plantuml() -> Self {
        Self::new(PartitioningId::PlantUml, schemes::plantuml_rules())
    }

    pub fn partitioning_id(&self) -> PartitioningId {
        self.id
    }

    pub fn content_types(&self) -> &'static [ContentType] {
        self.id.content_types()
    }

    pub fn rules(&self) -> &[Rule<ContentType>] {
        &self.rules
    }

    /// A partition scanner positioned at the start of `text`.
    pub fn scanner<'a>(&'a self, text: &'a str) -> PartitionScanner<'a> {
        PartitionScanner::new(&self.rules, text)
    }

    /// Regions covering the whole document.
    pub fn compute_partitions(&self, document: &Document) -> Vec<TypedRegion> {
        self.partition_text(&document.text())
    }

    /// Regions covering exactly `range` of the document, scanned as if the
    /// range were all there is.
    ///
    /// # Errors
    /// [`PartitionError::BadLocation`] when the range leaves the document or
    /// splits a character.
    pub fn compute_partitions_in(
        &self,
        document: &Document,
        range: Range<usize>,
    ) -> Result<Vec<TypedRegion>, PartitionError> {
        let text = document.text();
        let span = Span::from(range);
        let valid = span.start <= span.end
            && span.end <= text.len()
            && text.is_char_boundary(span.start)
            && text.is_char_boundary(span.end);
        if !valid {
            return Err(PartitionError::BadLocation {
                offset: span.start,
                length: span.len(),
                document_length: text.len(),
            });
        }
        Ok(self
            .scan(&text, span.start, span.len())
            .into_iter()
            .map(|scanned| scanned.region)
            .collect())
    }

    /// Regions covering all of `text`.
    pub fn partition_text(&self, text: &str) -> Vec<TypedRegion> {
        self.scan(text, 0, text.len())
            .into_iter()
            .map(|scanned| scanned.region)
            .collect()
    }

    pub(crate) fn scan(&self, text: &str, offset: usize, length: usize) -> Vec<ScannedRegion> {
        let mut scanner = self.scanner(text);
        scanner.set_range(offset, length);
        let regions: Vec<_> = std::iter::from_fn(|| scanner.next_scanned()).collect();
        log::trace!(
            "{}: {} regions in {}..{}",
            self.id,
            regions.len(),
            offset,
            offset + length
        );
        regions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn markdown() -> Partitioner {
        Partitioner::markdown(&PartitioningConfig::default())
    }

    #[test]
    fn whole_document_is_covered() {
        let document = Document::new("# Title\n\nSome `code` here.\n");
        let regions = markdown().compute_partitions(&document);
        assert_eq!(
            regions,
            vec![
                TypedRegion::new(0, 14, ContentType::Default),
                TypedRegion::new(14, 6, ContentType::CodeSpan),
                TypedRegion::new(20, 7, ContentType::Default),
            ]
        );
    }

    #[test]
    fn sub_range_is_scanned_alone() {
        let document = Document::new("aaa `x` bbb <!-- c --> ccc");
        let regions = markdown().compute_partitions_in(&document, 4..22).unwrap();
        assert_eq!(
            regions,
            vec![
                TypedRegion::new(4, 3, ContentType::CodeSpan),
                TypedRegion::new(7, 5, ContentType::Default),
                TypedRegion::new(12, 10, ContentType::Comment),
            ]
        );
    }

    #[test]
    fn sub_range_outside_document_is_rejected() {
        let document = Document::new("short");
        let err = markdown().compute_partitions_in(&document, 2..10).unwrap_err();
        assert!(matches!(err, PartitionError::BadLocation { .. }));
    }

    #[test]
    fn empty_document_has_no_regions() {
        assert!(markdown().partition_text("").is_empty());
    }

    #[test]
    fn plantuml_partitioner_finds_comments() {
        let regions = Partitioner::plantuml().partition_text("A -> B ' note\nB -> C\n");
        assert_eq!(
            regions,
            vec![
                TypedRegion::new(0, 7, ContentType::Default),
                TypedRegion::new(7, 7, ContentType::Comment),
                TypedRegion::new(14, 7, ContentType::Default),
            ]
        );
    }

    #[test]
    fn rule_kinds_follow_priority_order() {
        let partitioner = markdown();
        let kinds: Vec<_> = partitioner.rules().iter().map(Rule::kind_name).collect();
        assert_eq!(kinds.first(), Some(&"front-matter"));
        assert_eq!(kinds.last(), Some(&"indented-code"));
        assert_eq!(kinds.iter().filter(|kind| **kind == "delimited").count(), 12);
    }

    #[test]
    fn partitioners_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Partitioner>();
    }
}
