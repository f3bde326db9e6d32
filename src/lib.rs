pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod logging;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, FilterConfig, OutputConfig, SourceConfig};
pub use error::{FileCollectError, Result, UserFriendlyError};

// Core functionality re-exports
pub use collector::{
    CollectionProgress, CollectionSummary, DecodeOutcome, FileCollector, RecordWriter,
};
pub use scanner::{FileFilter, SourceFile, SourceWalker};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface: one configured collection run plus its terminal output.
pub struct FileCollect {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl FileCollect {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let show_progress = !quiet
            && output_mode != OutputMode::Json
            && console::Term::stderr().is_term();
        let progress_manager = ProgressManager::new(show_progress);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Runs the collection and returns its summary. Filesystem errors abort the run.
    pub fn collect(&self) -> Result<CollectionSummary> {
        let collector = FileCollector::new(&self.config);

        self.output_formatter.start_operation(&format!(
            "Collecting {} into {}",
            collector.root().display(),
            collector.output_path().display()
        ));
        self.output_formatter.info(&format!(
            "Extensions: {}",
            collector.filter().get_extensions().join(", ")
        ));

        let spinner = self.progress_manager.create_scan_spinner("Scanning...");
        let progress_callback = {
            let pb = spinner.clone();
            move |progress: &CollectionProgress| {
                ui::progress::update_collection_progress(&pb, progress);
            }
        };

        let result = collector.collect(Some(&progress_callback));
        match result {
            Ok(summary) => {
                ui::progress::finish_progress_with_summary(
                    &spinner,
                    &format!("Collected {} files", summary.files_written),
                    summary.duration,
                );
                tracing::info!(
                    files_written = summary.files_written,
                    skipped_not_text = summary.skipped_not_text,
                    bytes = summary.bytes_written,
                    "collection finished"
                );
                Ok(summary)
            }
            Err(e) => {
                spinner.abandon();
                Err(e)
            }
        }
    }

    /// Lists what `collect` would write without reading or writing files.
    pub fn plan(&self) -> Result<Vec<SourceFile>> {
        FileCollector::new(&self.config).plan()
    }

    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn handle_error(&self, error: &FileCollectError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Collects `root` into `output` with the default allow-list and no terminal output.
pub fn collect_files_simple<R: AsRef<Path>, O: AsRef<Path>>(
    root: R,
    output: O,
) -> Result<CollectionSummary> {
    let mut config = Config::default();
    config.source.root = root.as_ref().to_path_buf();
    config.output.path = output.as_ref().to_path_buf();
    config.validate()?;

    FileCollector::new(&config).collect(None)
}
