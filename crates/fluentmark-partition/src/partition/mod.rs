//! # Partitioning
//!
//! Splits a document into an ordered, gap-free sequence of [`TypedRegion`]s.
//! Each region is either default content or one of the constructs recognized
//! by the partitioning's rule set (fenced code, comments, math, ...).
//!
//! ## Structure
//!
//! - [`scanner`]: the [`PartitionScanner`] state machine that tries the rules
//!   at each position and accumulates unmatched text into default regions
//! - [`partitioner`]: a rule set bound to a [`PartitioningId`], shared between
//!   documents
//! - [`document_partitioning`]: the regions of one document, kept current
//!   across edits by re-scanning only the damaged part
//! - [`schemes`]: the Markdown and PlantUML rule sets
//! - [`registry`]: one shared partitioner per partitioning id
//! - [`cache`]: LRU of computed partitionings keyed by content

pub mod cache;
pub mod document_partitioning;
pub mod partitioner;
pub mod registry;
pub mod scanner;
pub mod schemes;

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{document::Span, error::PartitionError};

pub use cache::PartitionCache;
pub use document_partitioning::DocumentPartitioning;
pub use partitioner::Partitioner;
pub use registry::PartitionerRegistry;
pub use scanner::PartitionScanner;

/// Type of a partition. The string names are stable identifiers shared with
/// highlighters and validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ContentType {
    #[serde(rename = "__dftl_partition_content_type")]
    Default,
    #[serde(rename = "__frontmatter")]
    FrontMatter,
    #[serde(rename = "__comment")]
    Comment,
    #[serde(rename = "__codeblock")]
    CodeBlock,
    #[serde(rename = "__codespan")]
    CodeSpan,
    #[serde(rename = "__htmlblock")]
    HtmlBlock,
    #[serde(rename = "__dotblock")]
    DotBlock,
    #[serde(rename = "__umlblock")]
    UmlBlock,
    #[serde(rename = "__mathblock")]
    MathBlock,
    #[serde(rename = "__plantuml_include")]
    PlantUmlInclude,
}

impl ContentType {
    pub const ALL: [ContentType; 10] = [
        ContentType::Default,
        ContentType::FrontMatter,
        ContentType::Comment,
        ContentType::CodeBlock,
        ContentType::CodeSpan,
        ContentType::HtmlBlock,
        ContentType::DotBlock,
        ContentType::UmlBlock,
        ContentType::MathBlock,
        ContentType::PlantUmlInclude,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ContentType::Default => "__dftl_partition_content_type",
            ContentType::FrontMatter => "__frontmatter",
            ContentType::Comment => "__comment",
            ContentType::CodeBlock => "__codeblock",
            ContentType::CodeSpan => "__codespan",
            ContentType::HtmlBlock => "__htmlblock",
            ContentType::DotBlock => "__dotblock",
            ContentType::UmlBlock => "__umlblock",
            ContentType::MathBlock => "__mathblock",
            ContentType::PlantUmlInclude => "__plantuml_include",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ct| ct.name() == name)
    }

    pub fn is_default(self) -> bool {
        self == ContentType::Default
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Selects a rule set and the content types it can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PartitioningId {
    #[serde(rename = "__fluent_partitioning")]
    Markdown,
    #[serde(rename = "__fluent_plantuml_partitioning")]
    PlantUml,
}

impl PartitioningId {
    pub const ALL: [PartitioningId; 2] = [PartitioningId::Markdown, PartitioningId::PlantUml];

    pub fn name(self) -> &'static str {
        match self {
            PartitioningId::Markdown => "__fluent_partitioning",
            PartitioningId::PlantUml => "__fluent_plantuml_partitioning",
        }
    }

    /// Content types regions of this partitioning may carry.
    pub fn content_types(self) -> &'static [ContentType] {
        match self {
            PartitioningId::Markdown => &ContentType::ALL,
            PartitioningId::PlantUml => &[ContentType::Default, ContentType::Comment],
        }
    }
}

impl fmt::Display for PartitioningId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PartitioningId {
    type Err = PartitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| PartitionError::UnknownPartitioning(s.to_string()))
    }
}

/// A contiguous span of the document tagged with a content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TypedRegion {
    pub offset: usize,
    pub length: usize,
    pub content_type: ContentType,
}

impl TypedRegion {
    pub fn new(offset: usize, length: usize, content_type: ContentType) -> Self {
        Self {
            offset,
            length,
            content_type,
        }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    pub fn span(&self) -> Span {
        Span::at(self.offset, self.length)
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.span().contains(offset)
    }
}
