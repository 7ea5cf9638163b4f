//! # Validation
//!
//! Validators inspect the typed regions of a partitioned document and report
//! [`Issue`]s into an [`IssueSink`]. A validator declares the partitioning it
//! needs and which files and regions it applies to; [`FileValidator`]
//! partitions each document once per required partitioning and hands every
//! applicable region to the interested validators.

pub mod anchors;
pub mod file_validator;

use std::fmt;

use relative_path::RelativePathBuf;
use serde::Serialize;

use crate::{
    document::Document,
    models::SourceFile,
    partition::{PartitioningId, TypedRegion},
};

pub use anchors::AnchorValidator;
pub use file_validator::FileValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IssueType {
    Markdown,
}

impl fmt::Display for IssueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueType::Markdown => f.write_str("markdown"),
        }
    }
}

/// A problem found in a file. Offsets are byte offsets into the document,
/// `line` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub file: RelativePathBuf,
    pub issue_type: IssueType,
    pub severity: Severity,
    pub message: String,
    pub line: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

/// Receives issues as validators find them.
pub trait IssueSink {
    fn report(&mut self, issue: Issue);
}

/// Keeps every reported issue in order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub issues: Vec<Issue>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

impl IssueSink for CollectingSink {
    fn report(&mut self, issue: Issue) {
        log::debug!("{}:{}: {}", issue.file, issue.line, issue.message);
        self.issues.push(issue);
    }
}

/// Checks the regions of one partitioning.
pub trait TypedRegionValidator {
    /// Partitioning whose regions this validator inspects.
    fn required_partitioning(&self, file: &SourceFile) -> PartitioningId;

    fn is_validator_for_file(&self, file: &SourceFile) -> bool;

    fn is_validator_for_region(&self, region: &TypedRegion, file: &SourceFile) -> bool;

    fn validate_region(
        &self,
        region: &TypedRegion,
        document: &Document,
        file: &SourceFile,
        sink: &mut dyn IssueSink,
    );
}
