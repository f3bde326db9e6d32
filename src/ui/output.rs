use crate::collector::CollectionSummary;
use crate::error::{FileCollectError, UserFriendlyError};
use crate::scanner::SourceFile;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static FOLDER: Emoji = Emoji("📂 ", "> ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Success, message),
            OutputMode::Json => self.print_json_message("success", message),
            OutputMode::Plain => println!("{}", message),
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    /// Verbose progress text. Never printed in JSON mode, where stdout carries
    /// only the final document.
    pub fn info(&self, message: &str) {
        if self.shows_progress_messages() {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Info, message),
                OutputMode::Plain => println!("INFO: {}", message),
                OutputMode::Json => {}
            }
        }
    }

    pub fn start_operation(&self, operation: &str) {
        if self.shows_progress_messages() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("{}{}", FOLDER, style(operation).bold());
                    } else {
                        println!("> {}", operation);
                    }
                }
                OutputMode::Plain => println!("STARTING: {}", operation),
                OutputMode::Json => {}
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &FileCollectError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(&format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    /// Prints the single completion line, plus the detailed summary when verbose.
    pub fn print_completion(&self, summary: &CollectionSummary) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            _ => {
                self.success(&completion_message(summary));
                if self.should_show_message(1) {
                    self.print_summary(summary);
                }
            }
        }
    }

    pub fn print_plan(&self, files: &[SourceFile]) {
        match self.mode {
            OutputMode::Json => {
                let paths: Vec<String> = files.iter().map(SourceFile::display_path).collect();
                self.print_json_object(&serde_json::json!({
                    "type": "plan",
                    "files": paths,
                    "count": files.len()
                }));
            }
            _ => {
                for file in files {
                    println!("{}", file.display_path());
                }
                if !self.quiet {
                    self.print_separator();
                    println!("{} file(s) would be collected", files.len());
                }
            }
        }
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human if self.use_colors => {
                println!("{}", style("─".repeat(60)).dim());
            }
            OutputMode::Human | OutputMode::Plain => println!("{}", "-".repeat(60)),
            OutputMode::Json => {}
        }
    }

    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn shows_progress_messages(&self) -> bool {
        self.mode != OutputMode::Json && self.should_show_message(1)
    }

    fn print_summary(&self, summary: &CollectionSummary) {
        let value = |v: String| {
            if self.use_colors {
                style(v).cyan().bold().to_string()
            } else {
                v
            }
        };

        println!("  Files scanned:       {}", value(summary.files_scanned.to_string()));
        println!("  Files written:       {}", value(summary.files_written.to_string()));
        println!(
            "  Skipped (extension): {}",
            value(summary.skipped_by_extension.to_string())
        );
        println!(
            "  Skipped (not text):  {}",
            value(summary.skipped_not_text.to_string())
        );
        println!("  Bytes written:       {}", value(format_bytes(summary.bytes_written)));
        println!("  Time taken:          {}", value(format_duration(summary.duration)));

        if !summary.files_by_extension.is_empty() {
            println!("  Files by type:");
            let mut extensions: Vec<_> = summary.files_by_extension.iter().collect();
            extensions.sort_by(|a, b| b.1.cmp(a.1));
            for (ext, count) in extensions {
                println!("    {}: {} files", ext, count);
            }
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let (emoji, styled) = match msg_type {
                MessageType::Success => (&CHECKMARK, style(message).green().bold()),
                MessageType::Error => (&CROSS, style(message).red().bold()),
                MessageType::Info => (&INFO, style(message).cyan()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}{}", emoji, styled),
                _ => println!("{}{}", emoji, styled),
            }
        } else {
            let prefix = match msg_type {
                MessageType::Success => "✓",
                MessageType::Error => "✗",
                MessageType::Info => "i",
            };

            match msg_type {
                MessageType::Error => eprintln!("{} {}", prefix, message),
                _ => println!("{} {}", prefix, message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Success,
    Error,
    Info,
}

pub fn completion_message(summary: &CollectionSummary) -> String {
    format!("Collected files into: {}", summary.output.display())
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
