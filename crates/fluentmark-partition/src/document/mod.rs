//! # Documents
//!
//! A [`Document`] is the text being partitioned: an `xi_rope::Rope` buffer plus
//! the partitionings attached to it. Offsets are UTF-8 byte offsets and always
//! fall on `char` boundaries.
//!
//! Partitioners are attached per partitioning id with
//! [`Document::setup_partitioner`]. Every edit made through
//! [`Document::replace`] is forwarded to all attached partitionings, which
//! re-scan only the damaged part of the text.

pub mod span;

use std::{borrow::Cow, collections::HashMap, fmt, ops::Range, sync::Arc};

use uuid::Uuid;
use xi_rope::{Rope, delta::Builder};

pub use span::Span;

use crate::{
    error::PartitionError,
    partition::{DocumentPartitioning, Partitioner, PartitioningId, TypedRegion},
    scanner::line_at,
};

/// Line delimiters every document accepts, longest first so that `\r\n` is
/// recognized as one delimiter rather than `\r` followed by `\n`.
pub const LEGAL_LINE_DELIMITERS: &[&str] = &["\r\n", "\n", "\r"];

/// Identity of a document, stable across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A replacement applied to a document, in pre-edit coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte offset where the edit starts.
    pub offset: usize,
    /// Number of bytes removed at `offset`.
    pub deleted: usize,
    /// Number of bytes inserted at `offset`.
    pub inserted: usize,
}

impl TextEdit {
    /// End of the inserted text in post-edit coordinates.
    #[must_use]
    pub fn new_end(&self) -> usize {
        self.offset + self.inserted
    }

    /// End of the removed text in pre-edit coordinates.
    #[must_use]
    pub fn old_end(&self) -> usize {
        self.offset + self.deleted
    }

    /// Maps a pre-edit offset at or after the removed text to post-edit coordinates.
    #[must_use]
    pub fn shift(&self, old_offset: usize) -> usize {
        debug_assert!(old_offset >= self.old_end());
        old_offset - self.deleted + self.inserted
    }
}

pub struct Document {
    id: DocumentId,
    buffer: Rope,
    /// Incremented on every edit.
    version: u64,
    partitionings: HashMap<PartitioningId, DocumentPartitioning>,
}

impl Document {
    pub fn new(text: &str) -> Self {
        Self {
            id: DocumentId::new(),
            buffer: Rope::from(text),
            version: 0,
            partitionings: HashMap::new(),
        }
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Length of the document in bytes.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn legal_line_delimiters(&self) -> &'static [&'static str] {
        LEGAL_LINE_DELIMITERS
    }

    /// The whole document text. Borrows when the rope is a single leaf.
    pub fn text(&self) -> Cow<'_, str> {
        self.buffer.slice_to_cow(..)
    }

    /// Extracts the text for a span as an owned String.
    ///
    /// # Errors
    /// [`PartitionError::BadLocation`] when the span leaves the document.
    pub fn get(&self, span: Span) -> Result<String, PartitionError> {
        self.check_span(span)?;
        Ok(self.buffer.slice_to_cow(span.to_range()).into_owned())
    }

    /// Zero-based line number containing `offset`. Lines end at any of the
    /// [`LEGAL_LINE_DELIMITERS`], the way the scanner counts them.
    ///
    /// # Errors
    /// [`PartitionError::BadLocation`] when `offset` is past the end.
    pub fn line_of_offset(&self, offset: usize) -> Result<usize, PartitionError> {
        if offset > self.len() {
            return Err(PartitionError::BadLocation {
                offset,
                length: 0,
                document_length: self.len(),
            });
        }
        Ok(line_at(&self.buffer.slice_to_cow(..), offset))
    }

    /// Replaces `range` with `text` and updates every attached partitioning.
    ///
    /// # Errors
    /// [`PartitionError::BadLocation`] when the range leaves the document or
    /// splits a character.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> Result<TextEdit, PartitionError> {
        let span = Span::from(range);
        self.check_span(span)?;

        let edit = TextEdit {
            offset: span.start,
            deleted: span.len(),
            inserted: text.len(),
        };

        let mut builder = Builder::new(self.buffer.len());
        builder.replace(span.to_range(), Rope::from(text));
        let delta = builder.build();
        self.buffer = delta.apply(&self.buffer);
        self.version += 1;

        let content = self.buffer.slice_to_cow(..);
        for partitioning in self.partitionings.values_mut() {
            partitioning.document_changed(&content, edit);
        }
        log::trace!(
            "document {} v{}: replaced {}..{} with {} bytes",
            self.id,
            self.version,
            span.start,
            span.end,
            text.len()
        );

        Ok(edit)
    }

    /// Attaches `partitioner` under its partitioning id unless one is already
    /// installed for that id. Returns true if it was installed.
    pub fn setup_partitioner(&mut self, partitioner: Arc<Partitioner>) -> bool {
        let id = partitioner.partitioning_id();
        if self.partitionings.contains_key(&id) {
            return false;
        }
        log::debug!("document {}: installing partitioner {id}", self.id);
        self.partitionings
            .insert(id, DocumentPartitioning::new(partitioner));
        true
    }

    /// The partitioning attached for `id`, if any.
    pub fn partitioning(&self, id: PartitioningId) -> Option<&DocumentPartitioning> {
        self.partitionings.get(&id)
    }

    pub fn has_partitioning(&self, id: PartitioningId) -> bool {
        self.partitionings.contains_key(&id)
    }

    /// Current regions for the partitioning `id`, computing them on first use.
    ///
    /// # Errors
    /// [`PartitionError::PartitionerNotInstalled`] when no partitioner for `id`
    /// is attached.
    pub fn compute_partitioning(
        &mut self,
        id: PartitioningId,
    ) -> Result<&[TypedRegion], PartitionError> {
        let document_id = self.id;
        let content = self.buffer.slice_to_cow(..);
        let partitioning = self
            .partitionings
            .get_mut(&id)
            .ok_or(PartitionError::PartitionerNotInstalled {
                partitioning: id,
                document: document_id,
            })?;
        Ok(partitioning.regions(&content))
    }

    fn check_span(&self, span: Span) -> Result<(), PartitionError> {
        let content = self.buffer.slice_to_cow(..);
        let valid = span.start <= span.end
            && span.end <= content.len()
            && content.is_char_boundary(span.start)
            && content.is_char_boundary(span.end);
        if valid {
            Ok(())
        } else {
            Err(PartitionError::BadLocation {
                offset: span.start,
                length: span.len(),
                document_length: content.len(),
            })
        }
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("id", &self.id)
            .field("len", &self.len())
            .field("version", &self.version)
            .field("partitionings", &self.partitionings.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::{ContentType, PartitionerRegistry};
    use pretty_assertions::assert_eq;

    #[test]
    fn documents_have_distinct_ids() {
        let a = Document::new("a");
        let b = Document::new("a");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn get_returns_exact_slice() {
        let doc = Document::new("hello world");
        assert_eq!(doc.get(Span::new(6, 11)).unwrap(), "world");
        assert_eq!(doc.get(Span::new(0, 0)).unwrap(), "");
    }

    #[test]
    fn get_rejects_out_of_range_span() {
        let doc = Document::new("hello");
        let err = doc.get(Span::new(2, 9)).unwrap_err();
        assert!(matches!(
            err,
            PartitionError::BadLocation {
                offset: 2,
                length: 7,
                document_length: 5
            }
        ));
    }

    #[test]
    fn get_rejects_split_characters() {
        let doc = Document::new("aé");
        assert!(doc.get(Span::new(0, 2)).is_err());
        assert_eq!(doc.get(Span::new(0, 3)).unwrap(), "aé");
    }

    #[test]
    fn line_of_offset_counts_lines() {
        let doc = Document::new("one\ntwo\nthree");
        assert_eq!(doc.line_of_offset(0).unwrap(), 0);
        assert_eq!(doc.line_of_offset(4).unwrap(), 1);
        assert_eq!(doc.line_of_offset(10).unwrap(), 2);
        assert!(doc.line_of_offset(100).is_err());
    }

    #[test]
    fn line_of_offset_counts_lone_carriage_returns() {
        let doc = Document::new("one\rtwo\r\nthree");
        assert_eq!(doc.line_of_offset(4).unwrap(), 1);
        assert_eq!(doc.line_of_offset(9).unwrap(), 2);
    }

    #[test]
    fn replace_updates_text_and_version() {
        let mut doc = Document::new("Hello World");
        let edit = doc.replace(6..11, "Universe").unwrap();
        assert_eq!(doc.text(), "Hello Universe");
        assert_eq!(doc.version(), 1);
        assert_eq!(
            edit,
            TextEdit {
                offset: 6,
                deleted: 5,
                inserted: 8
            }
        );
        assert_eq!(edit.new_end(), 14);
        assert_eq!(edit.shift(11), 14);
    }

    #[test]
    fn setup_partitioner_installs_once_per_id() {
        let registry = PartitionerRegistry::default();
        let mut doc = Document::new("text");
        let markdown = registry.markdown();

        assert!(doc.setup_partitioner(markdown.clone()));
        assert!(!doc.setup_partitioner(markdown));
        assert!(doc.has_partitioning(PartitioningId::Markdown));
        assert!(!doc.has_partitioning(PartitioningId::PlantUml));
    }

    #[test]
    fn compute_partitioning_requires_installed_partitioner() {
        let mut doc = Document::new("text");
        let err = doc.compute_partitioning(PartitioningId::Markdown).unwrap_err();
        assert!(matches!(err, PartitionError::PartitionerNotInstalled { .. }));
    }

    #[test]
    fn edits_keep_attached_partitionings_current() {
        let registry = PartitionerRegistry::default();
        let mut doc = Document::new("# Title\n\ntext\n");
        doc.setup_partitioner(registry.markdown());

        let before = doc.compute_partitioning(PartitioningId::Markdown).unwrap().to_vec();
        assert_eq!(before.len(), 1);

        doc.replace(9..9, "<!-- note -->").unwrap();
        let regions = doc.compute_partitioning(PartitioningId::Markdown).unwrap();
        let types: Vec<_> = regions.iter().map(|r| r.content_type).collect();
        assert_eq!(
            types,
            vec![ContentType::Default, ContentType::Comment, ContentType::Default]
        );
        assert_eq!(regions[1].span(), Span::new(9, 22));
    }
}
