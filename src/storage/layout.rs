use crate::storage::{StorageError, StorageResult};
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

/// Directory layout of one harvest
#[derive(Debug, Clone)]
pub struct StorageLayout {
    pdfs_dir: PathBuf,
    stats_path: PathBuf,
}

impl StorageLayout {
    /// Creates the base and PDF directories (idempotent)
    pub fn prepare(base_dir: &Path, pdfs_subdir: &str, stats_file: &str) -> StorageResult<Self> {
        let pdfs_dir = base_dir.join(pdfs_subdir);
        std::fs::create_dir_all(&pdfs_dir).map_err(|source| StorageError::CreateDir {
            path: pdfs_dir.clone(),
            source,
        })?;

        Ok(Self {
            pdfs_dir,
            stats_path: base_dir.join(stats_file),
        })
    }

    pub fn pdfs_dir(&self) -> &Path {
        &self.pdfs_dir
    }

    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }

    /// Path a downloaded document with the given file name is stored at
    ///
    /// Names containing path separators or parent references are rejected so a
    /// document can never be written outside the PDF directory.
    pub fn pdf_path(&self, filename: &str) -> StorageResult<PathBuf> {
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(StorageError::InvalidFileName(filename.to_string()));
        }
        Ok(self.pdfs_dir.join(filename))
    }

    /// Opens a document file for streamed writing, truncating any previous copy
    pub async fn create_document(&self, filename: &str) -> StorageResult<DocumentWriter> {
        let path = self.pdf_path(filename)?;
        let file = File::create(&path)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(DocumentWriter { path, file })
    }

    /// Size in bytes of a stored file, as reported by the filesystem
    pub async fn size_of(path: &Path) -> StorageResult<u64> {
        tokio::fs::metadata(path)
            .await
            .map(|m| m.len())
            .map_err(|source| StorageError::Read {
                path: path.to_path_buf(),
                source,
            })
    }
}

/// Incremental writer for one downloaded document
pub struct DocumentWriter {
    path: PathBuf,
    file: File,
}

impl DocumentWriter {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one chunk to the file
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> StorageResult<()> {
        self.file
            .write_all(chunk)
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })
    }

    /// Flushes the file and returns its final size on disk
    pub async fn finish(mut self) -> StorageResult<(PathBuf, u64)> {
        self.file
            .flush()
            .await
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        drop(self.file);
        let size = StorageLayout::size_of(&self.path).await?;
        Ok((self.path, size))
    }

    /// Closes and deletes a partially written file
    pub async fn discard(self) {
        drop(self.file);
        if let Err(e) = tokio::fs::remove_file(&self.path).await {
            tracing::debug!("Could not remove partial file {}: {}", self.path.display(), e);
        }
    }
}
