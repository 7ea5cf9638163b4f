use relative_path::{RelativePath, RelativePathBuf};
use std::fs;
use std::path::{Path, PathBuf};

use crate::{document::Document, models::SourceFile};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid root directory: {0}")]
    InvalidRoot(PathBuf),
}

/// Read a file below `root` into a new document
pub fn read_document(relative_path: &RelativePath, root: &Path) -> Result<Document, IoError> {
    let absolute_path = relative_path.to_path(root);
    if !absolute_path.exists() {
        return Err(IoError::NotFound(absolute_path));
    }
    let content = fs::read_to_string(&absolute_path)?;
    log::debug!("read {} ({} bytes)", relative_path, content.len());
    Ok(Document::new(&content))
}

/// Find every Markdown and PlantUML file below `root`, sorted by path
pub fn scan_source_files(root: &Path) -> Result<Vec<SourceFile>, IoError> {
    if !root.is_dir() {
        return Err(IoError::InvalidRoot(root.to_path_buf()));
    }

    let mut files = Vec::new();
    scan_directory_recursive(root, root, &mut files)?;
    files.sort_by(|a: &SourceFile, b| a.relative_path().cmp(b.relative_path()));
    Ok(files)
}

fn scan_directory_recursive(
    root: &Path,
    dir: &Path,
    files: &mut Vec<SourceFile>,
) -> Result<(), IoError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_dir() {
            scan_directory_recursive(root, &path, files)?;
        } else if let Ok(relative) = path.strip_prefix(root)
            && let Ok(relative) = RelativePathBuf::from_path(relative)
        {
            let file = SourceFile::new(relative);
            if file.partitioning_id().is_some() {
                files.push(file);
            }
        }
    }

    Ok(())
}
