//! Output formatting and display utilities

use crate::config::OutputConfig;
use crate::error::Result;
use crate::http::progress::DownloadProgress;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

/// Output writer that handles file vs stdout
pub struct OutputWriter {
    config: OutputConfig,
}

impl OutputWriter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Write content to configured output, newline terminated
    pub fn write(&self, content: &str) -> Result<()> {
        let mut content = content.to_string();
        if !content.ends_with('\n') {
            content.push('\n');
        }
        if let Some(file_path) = &self.config.file {
            self.write_to_file(&content, file_path)
        } else {
            self.write_to_stdout(&content)
        }
    }

    /// Render a progress event on stderr (if enabled)
    pub fn write_progress(&self, progress: &DownloadProgress) -> Result<()> {
        if self.config.show_progress && !self.config.silent {
            let mut stderr = io::stderr();
            write!(stderr, "{}", progress_line(progress))?;
            stderr.flush()?;
        }
        Ok(())
    }

    /// Terminate the progress line
    pub fn finish_progress(&self) -> Result<()> {
        if self.config.show_progress && !self.config.silent {
            eprintln!();
        }
        Ok(())
    }

    fn write_to_file(&self, content: &str, file_path: &Path) -> Result<()> {
        let mut file = File::create(file_path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_to_stdout(&self, content: &str) -> Result<()> {
        io::stdout().write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Single carriage-return prefixed status line for a progress event
pub fn progress_line(progress: &DownloadProgress) -> String {
    let mut line = format!("\r[{}]", progress.status);

    if let Some(percent) = progress.progress_percent {
        line.push_str(&format!(" {:.1}%", percent.clamp(0.0, 100.0)));
    }

    match (progress.downloaded_bytes, progress.total_bytes) {
        (Some(current), Some(total)) if total > 0 => {
            line.push_str(&format!(" {} / {} bytes", current, total));
        }
        (Some(current), _) if current > 0 => {
            line.push_str(&format!(" {} bytes", current));
        }
        _ => {}
    }

    if let Some(speed) = &progress.speed {
        line.push_str(&format!(" at {}", speed));
    }
    if let Some(eta) = &progress.eta {
        line.push_str(&format!(" ETA {}", eta));
    }
    if let Some(message) = &progress.message {
        line.push_str(&format!(" - {}", message));
    }

    line
}
