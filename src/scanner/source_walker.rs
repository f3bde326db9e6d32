use crate::config::SourceConfig;
use crate::error::{FileCollectError, Result};
use crate::scanner::file_filter::extension_of;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// A file discovered during the walk. Lives for one iteration only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub extension: Option<String>,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        let extension = extension_of(&path);
        Self { path, extension }
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

pub struct SourceWalker {
    root: PathBuf,
    follow_links: bool,
    sort: bool,
}

impl SourceWalker {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            root: config.root.clone(),
            follow_links: config.follow_links,
            sort: config.sort,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Fails when the root is missing or is not a directory.
    pub fn validate_root(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(FileCollectError::RootNotFound {
                path: self.root.clone(),
            });
        }

        if !self.root.is_dir() {
            return Err(FileCollectError::InvalidPath {
                path: format!("{} is not a directory", self.root.display()),
            });
        }

        Ok(())
    }

    /// Lazily yields every file reachable from the root, top-down.
    ///
    /// Symlinks that do not point at a directory are yielded, even when
    /// dangling. Symlinked directories are only descended with `follow_links`,
    /// in which case walkdir's ancestor check reports loops and the looping
    /// entry is skipped. Any other walk error is returned to the caller.
    pub fn files(&self) -> impl Iterator<Item = Result<SourceFile>> + '_ {
        let mut walker = WalkDir::new(&self.root).follow_links(self.follow_links);
        if self.sort {
            walker = walker.sort_by_file_name();
        }

        walker.into_iter().filter_map(move |entry| match entry {
            Ok(entry) => self.accept_entry(entry).map(Ok),
            Err(err) if err.loop_ancestor().is_some() => {
                tracing::warn!(
                    path = ?err.path(),
                    ancestor = ?err.loop_ancestor(),
                    "skipping symlink loop"
                );
                None
            }
            Err(err) => Some(Err(err.into())),
        })
    }

    fn accept_entry(&self, entry: DirEntry) -> Option<SourceFile> {
        let file_type = entry.file_type();

        let is_file = if file_type.is_file() {
            true
        } else if file_type.is_symlink() {
            // Unfollowed symlink: a link to a directory is not descended, anything
            // else (including a dangling link) is yielded so reading it surfaces errors.
            !entry.path().is_dir()
        } else {
            false
        };

        if !is_file {
            return None;
        }

        tracing::trace!(path = %entry.path().display(), depth = entry.depth(), "discovered file");
        Some(SourceFile::new(entry.into_path()))
    }
}
