//! # fluentmark-partition
//!
//! Splits Markdown and PlantUML source into typed regions (front matter,
//! fenced and indented code, code spans, comments, HTML, DOT, diagram and
//! math blocks) with hand-written character rules, and keeps those regions
//! current while the document is edited.
//!
//! - [`scanner`]: the [`CharacterScanner`] cursor the rules read through
//! - [`rules`]: the closed set of scanning rules
//! - [`partition`]: partition scanner, partitioners, incremental
//!   re-partitioning and the region cache
//! - [`document`]: rope-backed documents with attached partitionings
//! - [`highlight`]: per-partition token scanning
//! - [`validation`]: region validators and issue reporting

pub mod document;
pub mod error;
pub mod highlight;
pub mod io;
pub mod models;
pub mod partition;
pub mod rules;
pub mod scanner;
pub mod snapshot;
pub mod validation;

// Re-export key types for easier usage
pub use document::{Document, DocumentId, Span, TextEdit};
pub use error::PartitionError;
pub use highlight::{HighlightClass, HighlightToken, Highlighter, TokenScanner};
pub use io::{IoError, read_document, scan_source_files};
pub use models::{FileKind, SourceFile};
pub use partition::{
    ContentType, DocumentPartitioning, PartitionCache, PartitionScanner, Partitioner,
    PartitionerRegistry, PartitioningId, TypedRegion,
};
pub use rules::Rule;
pub use scanner::{CharacterScanner, Mark};
pub use validation::{
    AnchorValidator, CollectingSink, FileValidator, Issue, IssueSink, IssueType, Severity,
    TypedRegionValidator,
};
