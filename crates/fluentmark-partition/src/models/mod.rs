pub mod source_file;

pub use source_file::{FileKind, SourceFile};
