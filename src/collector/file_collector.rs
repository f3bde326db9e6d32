use crate::collector::decoder::{read_text, DecodeOutcome};
use crate::collector::record_writer::RecordWriter;
use crate::collector::summary::{CollectionProgress, CollectionSummary};
use crate::config::Config;
use crate::error::Result;
use crate::scanner::{FileFilter, SourceFile, SourceWalker};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Walks the root and writes every accepted, decodable file to one output file.
pub struct FileCollector {
    walker: SourceWalker,
    filter: FileFilter,
    output_path: PathBuf,
}

impl FileCollector {
    pub fn new(config: &Config) -> Self {
        Self {
            walker: SourceWalker::new(&config.source),
            filter: FileFilter::new(&config.filters),
            output_path: config.output.path.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        self.walker.root()
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn filter(&self) -> &FileFilter {
        &self.filter
    }

    /// Runs a full pass, truncating the output file first.
    ///
    /// The root is checked before the output is touched, so a missing root
    /// leaves any previous output in place.
    pub fn collect(
        &self,
        progress_callback: Option<&dyn Fn(&CollectionProgress)>,
    ) -> Result<CollectionSummary> {
        self.walker.validate_root()?;

        let mut writer = RecordWriter::create(&self.output_path)?;
        tracing::info!(
            root = %self.root().display(),
            output = %self.output_path.display(),
            "collecting files"
        );

        let output_identity = fs::canonicalize(&self.output_path).ok();
        let progress =
            self.write_records(&mut writer, output_identity.as_deref(), progress_callback)?;
        writer.finish()?;

        Ok(progress.into_summary(self.root().to_path_buf(), self.output_path.clone()))
    }

    /// Writes records for every accepted file into an already-open writer.
    pub fn collect_into<W: Write>(
        &self,
        writer: &mut RecordWriter<W>,
        progress_callback: Option<&dyn Fn(&CollectionProgress)>,
    ) -> Result<CollectionProgress> {
        self.write_records(writer, None, progress_callback)
    }

    fn write_records<W: Write>(
        &self,
        writer: &mut RecordWriter<W>,
        output_identity: Option<&Path>,
        progress_callback: Option<&dyn Fn(&CollectionProgress)>,
    ) -> Result<CollectionProgress> {
        let mut progress = CollectionProgress::new();

        for file in self.walker.files() {
            let file = file?;
            progress.record_scanned(file.display_path());

            if !self.filter.is_text_file(&file.path) {
                progress.skipped_by_extension += 1;
                continue;
            }

            if is_output_file(&file.path, output_identity) {
                tracing::debug!(path = %file.path.display(), "skipping the output file itself");
                continue;
            }

            match read_text(&file.path)? {
                DecodeOutcome::Text(content) => {
                    let bytes = writer.write_record(&file.path, &content)?;
                    progress.record_written(file.extension.as_deref(), bytes);
                    tracing::debug!(path = %file.path.display(), bytes, "wrote record");
                }
                DecodeOutcome::NotText { valid_up_to } => {
                    progress.skipped_not_text += 1;
                    tracing::debug!(
                        path = %file.path.display(),
                        valid_up_to,
                        "skipping file that is not valid UTF-8"
                    );
                }
            }

            if let Some(callback) = progress_callback {
                callback(&progress);
            }
        }

        if let Some(callback) = progress_callback {
            callback(&progress);
        }

        Ok(progress)
    }

    /// Lists the files a run would consider, without reading or writing anything.
    pub fn plan(&self) -> Result<Vec<SourceFile>> {
        self.walker.validate_root()?;

        let output_identity = fs::canonicalize(&self.output_path).ok();
        let mut planned = Vec::new();
        for file in self.walker.files() {
            let file = file?;
            if self.filter.is_text_file(&file.path)
                && !is_output_file(&file.path, output_identity.as_deref())
            {
                planned.push(file);
            }
        }
        Ok(planned)
    }
}

/// True when `path` resolves to the output file. File names are compared
/// first so only likely candidates are canonicalized.
fn is_output_file(path: &Path, output_identity: Option<&Path>) -> bool {
    let Some(output) = output_identity else {
        return false;
    };
    if path.file_name() != output.file_name() {
        return false;
    }
    fs::canonicalize(path).is_ok_and(|resolved| resolved == output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileCollectError;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path, output: &Path) -> Config {
        let mut config = Config::default();
        config.source.root = root.to_path_buf();
        config.source.sort = true;
        config.output.path = output.to_path_buf();
        config
    }

    fn banner(path: &Path) -> String {
        format!("{0}\nPLIK: {1}\n{0}\n", "=".repeat(40), path.display())
    }

    #[test]
    fn test_text_and_binary_files() {
        let source = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");

        fs::write(source.path().join("a.py"), "print(1)").unwrap();
        fs::write(source.path().join("b.png"), [0x89, b'P', b'N', b'G', 0x0d, 0x0a]).unwrap();

        let collector = FileCollector::new(&config_for(source.path(), &output));
        let summary = collector.collect(None).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        let expected = format!("{}print(1)\n\n", banner(&source.path().join("a.py")));
        assert_eq!(written, expected);
        assert_eq!(summary.files_written, 1);
        assert_eq!(summary.skipped_by_extension, 1);
        assert_eq!(summary.bytes_written, expected.len() as u64);
    }

    #[test]
    fn test_empty_root_produces_empty_file() {
        let source = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");

        let collector = FileCollector::new(&config_for(source.path(), &output));
        let summary = collector.collect(None).unwrap();

        assert!(output.exists());
        assert_eq!(fs::metadata(&output).unwrap().len(), 0);
        assert_eq!(summary.files_written, 0);
    }

    #[test]
    fn test_invalid_utf8_is_skipped() {
        let source = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");

        fs::write(source.path().join("bad.txt"), [b'a', 0xff, 0xfe, b'b']).unwrap();
        fs::write(source.path().join("good.md"), "# ok").unwrap();

        let collector = FileCollector::new(&config_for(source.path(), &output));
        let summary = collector.collect(None).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(!written.contains("bad.txt"));
        assert!(written.contains("good.md"));
        assert_eq!(summary.skipped_not_text, 1);
        assert_eq!(summary.files_written, 1);
    }

    #[test]
    fn test_excluded_extension_ignored_regardless_of_content() {
        let source = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");

        fs::write(source.path().join("tool.exe"), "plain text inside").unwrap();

        let collector = FileCollector::new(&config_for(source.path(), &output));
        collector.collect(None).unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "");
    }

    #[test]
    fn test_one_record_per_accepted_file_with_exact_content() {
        let source = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");
        let root = source.path();

        fs::create_dir_all(root.join("docs/nested")).unwrap();
        let files = [
            ("README.MD", "# Title\r\nwindows line endings\r\n"),
            ("docs/guide.txt", "zażółć\n"),
            ("docs/nested/data.json", "{\"k\": 1}"),
            ("docs/nested/config.yml", ""),
        ];
        for (name, content) in &files {
            fs::write(root.join(name), content).unwrap();
        }
        fs::write(root.join("docs/skip.rs"), "fn main() {}").unwrap();

        let collector = FileCollector::new(&config_for(root, &output));
        let summary = collector.collect(None).unwrap();
        assert_eq!(summary.files_written, files.len());

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(written.matches("PLIK: ").count(), files.len());
        for (name, content) in &files {
            let record = format!("{}{}\n\n", banner(&root.join(name)), content);
            assert!(written.contains(&record), "missing record for {}", name);
        }
        assert!(!written.contains("skip.rs"));
    }

    #[test]
    fn test_second_run_overwrites_output() {
        let source = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");

        fs::write(source.path().join("a.py"), "print(1)").unwrap();
        fs::write(&output, "stale content that must disappear").unwrap();

        let collector = FileCollector::new(&config_for(source.path(), &output));
        collector.collect(None).unwrap();
        let first = fs::read(&output).unwrap();

        collector.collect(None).unwrap();
        let second = fs::read(&output).unwrap();

        assert_eq!(first, second);
        assert!(!String::from_utf8(second).unwrap().contains("stale"));
    }

    #[test]
    fn test_missing_root_keeps_previous_output() {
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");
        fs::write(&output, "previous").unwrap();

        let missing = out_dir.path().join("no-such-root");
        let collector = FileCollector::new(&config_for(&missing, &output));

        let result = collector.collect(None);
        assert!(matches!(result, Err(FileCollectError::RootNotFound { .. })));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_aborts_the_run() {
        let source = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");

        fs::write(source.path().join("a.py"), "print(1)").unwrap();
        std::os::unix::fs::symlink(source.path().join("gone.py"), source.path().join("x.py"))
            .unwrap();

        let collector = FileCollector::new(&config_for(source.path(), &output));
        let result = collector.collect(None);

        match result {
            Err(FileCollectError::Io(e)) => assert_eq!(e.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected a NotFound I/O error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_with_other_extension_is_ignored() {
        let source = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("out.txt");

        fs::write(source.path().join("a.py"), "print(1)").unwrap();
        std::os::unix::fs::symlink(source.path().join("gone.bin"), source.path().join("x.bin"))
            .unwrap();

        let collector = FileCollector::new(&config_for(source.path(), &output));
        let summary = collector.collect(None).unwrap();

        assert_eq!(summary.files_written, 1);
        assert_eq!(summary.skipped_by_extension, 1);
    }

    #[test]
    fn test_output_inside_root_is_not_collected() {
        let source = TempDir::new().unwrap();
        let output = source.path().join("bundle.txt");

        // Larger than the write buffer, so part of it is flushed mid-run.
        let big = "x".repeat(100 * 1024);
        fs::write(source.path().join("big.md"), &big).unwrap();
        fs::write(source.path().join("small.py"), "print(1)").unwrap();

        let collector = FileCollector::new(&config_for(source.path(), &output));
        let summary = collector.collect(None).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert_eq!(summary.files_written, 2);
        assert_eq!(written.matches("PLIK: ").count(), 2);
        assert!(!written.contains("bundle.txt"));
        assert!(written.contains(&format!("{}{}\n\n", banner(&source.path().join("big.md")), big)));
    }

    #[test]
    fn test_plan_skips_existing_output_inside_root() {
        let source = TempDir::new().unwrap();
        let output = source.path().join("bundle.txt");
        fs::write(&output, "previous run").unwrap();
        fs::write(source.path().join("notes.txt"), "n").unwrap();

        let collector = FileCollector::new(&config_for(source.path(), &output));
        let planned = collector.plan().unwrap();

        assert_eq!(planned.len(), 1);
        assert!(planned[0].path.ends_with("notes.txt"));
    }

    #[test]
    fn test_progress_callback_is_invoked() {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("a.md"), "a").unwrap();
        fs::write(source.path().join("b.md"), "b").unwrap();

        let collector = FileCollector::new(&config_for(source.path(), Path::new("unused.txt")));
        let calls = std::cell::Cell::new(0usize);
        let callback = |p: &CollectionProgress| {
            calls.set(calls.get() + 1);
            assert!(p.files_written <= 2);
        };

        let mut writer = RecordWriter::new(Vec::new());
        let progress = collector.collect_into(&mut writer, Some(&callback)).unwrap();

        assert_eq!(progress.files_written, 2);
        assert_eq!(calls.get(), 3);
        assert!(!Path::new("unused.txt").exists());
    }

    #[test]
    fn test_plan_lists_accepted_files_only() {
        let source = TempDir::new().unwrap();
        fs::write(source.path().join("a.py"), "x").unwrap();
        fs::write(source.path().join("b.png"), "x").unwrap();
        fs::write(source.path().join("c.txt"), [0xffu8]).unwrap();

        let collector = FileCollector::new(&config_for(source.path(), Path::new("unused.txt")));
        let planned: Vec<String> = collector
            .plan()
            .unwrap()
            .iter()
            .filter_map(|f| f.path.file_name().map(|n| n.to_string_lossy().to_string()))
            .collect();

        assert_eq!(planned, vec!["a.py", "c.txt"]);
    }
}
