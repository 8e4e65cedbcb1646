//! OCR adapter that shells out to the tesseract CLI.
//!
//! The image is piped on stdin and the recognised text read from stdout,
//! so no temporary files are involved.

use crate::domain::error::TickerTrackError;
use crate::ports::config_port::ConfigPort;
use crate::ports::ocr_port::OcrPort;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

pub const DEFAULT_COMMAND: &str = "tesseract";
pub const DEFAULT_ARGS: &[&str] = &["stdin", "stdout"];

pub struct TesseractAdapter {
    command: String,
    args: Vec<String>,
}

impl TesseractAdapter {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }

    /// Reads `[ocr] command` and `[ocr] args`, both optional.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let command = config
            .get_string("ocr", "command")
            .unwrap_or_else(|| DEFAULT_COMMAND.to_string());
        let args = config
            .get_string("ocr", "args")
            .map(|a| a.split_whitespace().map(str::to_string).collect())
            .unwrap_or_else(|| DEFAULT_ARGS.iter().map(|a| a.to_string()).collect());
        Self::new(command, args)
    }

    fn ocr_err(&self, reason: impl std::fmt::Display) -> TickerTrackError {
        TickerTrackError::Ocr {
            reason: format!("{}: {}", self.command, reason),
        }
    }
}

impl OcrPort for TesseractAdapter {
    fn image_to_text(&self, image: &[u8]) -> Result<String, TickerTrackError> {
        debug!(command = %self.command, bytes = image.len(), "running ocr");

        let mut child = Command::new(&self.command)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.ocr_err(e))?;

        // The child is always reaped, even when it stops reading early.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(image),
            None => Ok(()),
        };

        let output = child.wait_with_output().map_err(|e| self.ocr_err(e))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(self.ocr_err(format!("{} ({})", output.status, stderr.trim())));
        }
        written.map_err(|e| self.ocr_err(format!("failed to send image: {e}")))?;

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
