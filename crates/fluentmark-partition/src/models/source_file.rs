use relative_path::{RelativePath, RelativePathBuf};

use crate::partition::PartitioningId;

/// Kind of source file, decided by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Markdown,
    PlantUml,
    Other,
}

impl FileKind {
    pub const MARKDOWN_EXTENSIONS: &'static [&'static str] = &["md", "markdown", "mdown"];
    pub const PLANTUML_EXTENSIONS: &'static [&'static str] = &["puml", "plantuml"];

    pub fn from_extension(extension: &str) -> Self {
        let extension = extension.to_ascii_lowercase();
        if Self::MARKDOWN_EXTENSIONS.contains(&extension.as_str()) {
            FileKind::Markdown
        } else if Self::PLANTUML_EXTENSIONS.contains(&extension.as_str()) {
            FileKind::PlantUml
        } else {
            FileKind::Other
        }
    }

    /// The partitioning documents of this kind are split with.
    pub fn partitioning_id(self) -> Option<PartitioningId> {
        match self {
            FileKind::Markdown => Some(PartitioningId::Markdown),
            FileKind::PlantUml => Some(PartitioningId::PlantUml),
            FileKind::Other => None,
        }
    }
}

/// A file relative to the workspace root.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceFile {
    relative_path: RelativePathBuf,
    kind: FileKind,
}

impl SourceFile {
    pub fn new(relative_path: RelativePathBuf) -> Self {
        let kind = relative_path
            .extension()
            .map_or(FileKind::Other, FileKind::from_extension);
        Self {
            relative_path,
            kind,
        }
    }

    pub fn from_relative_str(path: &str) -> Self {
        Self::new(RelativePathBuf::from(path))
    }

    pub fn relative_path(&self) -> &RelativePath {
        &self.relative_path
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn partitioning_id(&self) -> Option<PartitioningId> {
        self.kind.partitioning_id()
    }
}

impl From<RelativePathBuf> for SourceFile {
    fn from(path: RelativePathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&str> for SourceFile {
    fn from(path: &str) -> Self {
        Self::from_relative_str(path)
    }
}
