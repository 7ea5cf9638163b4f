use crate::{document::DocumentId, io::IoError, partition::PartitioningId};

/// Failures of the partitioning API. Rule non-matches are never errors.
#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    #[error("unknown partitioning `{0}`")]
    UnknownPartitioning(String),

    #[error("range {offset}+{length} is outside the document of length {document_length}")]
    BadLocation {
        offset: usize,
        length: usize,
        document_length: usize,
    },

    #[error("no partitioner installed for {partitioning} on document {document}")]
    PartitionerNotInstalled {
        partitioning: PartitioningId,
        document: DocumentId,
    },

    #[error(transparent)]
    Io(#[from] IoError),
}
