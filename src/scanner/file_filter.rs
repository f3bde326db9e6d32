use crate::config::{normalize_extension, FilterConfig};
use std::collections::HashSet;
use std::path::Path;

/// Extension allow-list check. Pure: no filesystem access.
#[derive(Debug, Clone)]
pub struct FileFilter {
    extensions: HashSet<String>,
}

impl FileFilter {
    pub fn new(config: &FilterConfig) -> Self {
        Self::from_extensions(config.extensions.iter().map(String::as_str))
    }

    pub fn from_extensions<'a, I>(extensions: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let extensions = extensions
            .into_iter()
            .map(normalize_extension)
            .filter(|e| !e.is_empty())
            .collect();

        Self { extensions }
    }

    /// Returns true when the lower-cased extension of `path` is in the allow-list.
    /// Names without an extension (`Makefile`, `.bashrc`) never match.
    pub fn is_text_file(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions.contains(&ext))
    }

    pub fn get_extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.extensions.iter().cloned().collect();
        extensions.sort();
        extensions
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}

/// Lower-cased extension of the final path component, if any.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_lowercase())
}
