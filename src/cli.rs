use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "filecollect")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bundle a project's text and source files into a single document")]
#[command(
    long_about = "FileCollect walks a directory tree, picks every file whose extension is on the \
                  allow-list and writes their contents, each under a PLIK: banner, into one output file."
)]
#[command(after_help = "EXAMPLES:\n  \
    filecollect\n  \
    filecollect ./my-project --output bundle.txt\n  \
    filecollect ./my-project --extensions rs,toml,md --sort\n  \
    filecollect ./my-project --dry-run")]
pub struct Cli {
    /// Root directory to collect from (defaults to the current directory)
    #[arg(env = "FILECOLLECT_ROOT")]
    pub root: Option<PathBuf>,

    /// Output file, truncated if it exists
    #[arg(short, long, env = "FILECOLLECT_OUTPUT")]
    pub output: Option<PathBuf>,

    /// File extensions to collect (comma-separated)
    #[arg(short, long, help = "File extensions to collect (e.g., py,md,json)")]
    pub extensions: Option<String>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Descend into symlinked directories (symlink loops are skipped)
    #[arg(long)]
    pub follow_links: bool,

    /// Visit directory entries in file-name order
    #[arg(long)]
    pub sort: bool,

    /// Output format for messages and the summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (list files that would be collected without writing anything)
    #[arg(long)]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_root(self.root.clone())
            .with_output(self.output.clone())
            .with_extensions(self.extensions.clone())
            .with_follow_links(self.follow_links)
            .with_sort(self.sort)
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
