//! Writing rendered sources to disk.

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use log::debug;

/// How to handle existing files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Always overwrite (generated code)
    #[default]
    Always,
    /// Only create if the file doesn't exist (stubs)
    IfMissing,
}

/// Result of a write operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    Written,
    /// File already existed and was left alone.
    Skipped,
}

/// A rendered file, relative to an output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    path: PathBuf,
    content: String,
    overwrite: Overwrite,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            overwrite: Overwrite::Always,
        }
    }

    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Path relative to the output directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the file under `base` according to its overwrite rule.
    pub fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = base.join(&self.path);
        if self.overwrite == Overwrite::IfMissing && path.exists() {
            debug!("skipping existing {}", path.display());
            return Ok(WriteResult::Skipped);
        }
        write_file(&path, &self.content)
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        debug!("wrote {}", path.display());
        Ok(WriteResult::Written)
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}
