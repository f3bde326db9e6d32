use crate::error::{FileCollectError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_FILE: &str = "zebrane_pliki.txt";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub filters: FilterConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub root: PathBuf,
    pub follow_links: bool,
    pub sort: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterConfig {
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            follow_links: false,
            sort: false,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "js".to_string(),
                "css".to_string(),
                "html".to_string(),
                "py".to_string(),
                "java".to_string(),
                "md".to_string(),
                "txt".to_string(),
                "json".to_string(),
                "yaml".to_string(),
                "yml".to_string(),
            ],
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_OUTPUT_FILE),
        }
    }
}

/// Normalizes an allow-list entry: trims whitespace, drops a leading dot and
/// lower-cases it, so `.PY`, `py` and ` Py ` all become `py`.
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

/// Parses a comma-separated extension list into normalized, de-duplicated entries.
pub fn parse_extension_list(list: &str) -> Vec<String> {
    let mut extensions: Vec<String> = Vec::new();
    for ext in list.split(',').map(normalize_extension) {
        if !ext.is_empty() && !extensions.contains(&ext) {
            extensions.push(ext);
        }
    }
    extensions
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(FileCollectError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| FileCollectError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| FileCollectError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;
        config.normalize();

        tracing::debug!(path = %path.display(), "loaded configuration file");
        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["filecollect.toml", ".filecollect.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref root) = cli_args.root {
            self.source.root = root.clone();
        }

        if let Some(ref output) = cli_args.output {
            self.output.path = output.clone();
        }

        if let Some(ref extensions) = cli_args.extensions {
            self.filters.extensions = parse_extension_list(extensions);
        }

        if cli_args.follow_links {
            self.source.follow_links = true;
        }

        if cli_args.sort {
            self.source.sort = true;
        }
    }

    /// Normalizes allow-list entries in place.
    /// Normalizes each configured extension on its own; entries are never split.
    pub fn normalize(&mut self) {
        let mut extensions: Vec<String> = Vec::new();
        for ext in self.filters.extensions.iter().map(|e| normalize_extension(e)) {
            if !ext.is_empty() && !extensions.contains(&ext) {
                extensions.push(ext);
            }
        }
        self.filters.extensions = extensions;
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| FileCollectError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| FileCollectError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.filters.extensions.is_empty() {
            return Err(FileCollectError::Config {
                message: "At least one file extension must be specified".to_string(),
            });
        }

        if let Some(bad) = self
            .filters
            .extensions
            .iter()
            .find(|ext| ext.contains('/') || ext.contains('\\'))
        {
            return Err(FileCollectError::Config {
                message: format!("Extension contains a path separator: {}", bad),
            });
        }

        // Only the final suffix is ever compared, so "tar.gz" could never match.
        if let Some(bad) = self.filters.extensions.iter().find(|ext| ext.contains('.')) {
            return Err(FileCollectError::Config {
                message: format!("Extension must be a single suffix without dots: {}", bad),
            });
        }

        if self.output.path.as_os_str().is_empty() {
            return Err(FileCollectError::Config {
                message: "Output path must not be empty".to_string(),
            });
        }

        if self.source.root.as_os_str().is_empty() {
            return Err(FileCollectError::Config {
                message: "Root path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub extensions: Option<String>,
    pub follow_links: bool,
    pub sort: bool,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(mut self, root: Option<PathBuf>) -> Self {
        self.root = root;
        self
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn with_extensions(mut self, extensions: Option<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }
}
