//! Output formatting for CLI commands
//!
//! Every command writes through [`Output`], which routes between
//! human-readable text and machine-parseable JSON based on the global
//! `--format` flag. Verbose diagnostics go to stderr, never mixing with
//! parseable stdout.

use serde::Serialize;

use crate::storage::DefaultFormat;

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl From<DefaultFormat> for OutputFormat {
    fn from(value: DefaultFormat) -> Self {
        match value {
            DefaultFormat::Text => OutputFormat::Text,
            DefaultFormat::Json => OutputFormat::Json,
        }
    }
}

/// Routes command output to stdout in the selected format
pub struct Output {
    format: OutputFormat,
    verbose: bool,
}

impl Output {
    pub fn new(format: OutputFormat, verbose: bool) -> Self {
        Self { format, verbose }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    pub fn is_text(&self) -> bool {
        matches!(self.format, OutputFormat::Text)
    }

    /// Prints a one-line confirmation
    pub fn success(&self, message: &str) {
        if self.is_text() {
            println!("{}", message);
        } else {
            self.data(&serde_json::json!({ "success": true, "message": message }));
        }
    }

    /// Prints structured data: compact JSON in JSON mode, pretty JSON as
    /// the text-mode fallback for callers with nothing better to render.
    pub fn data<T: Serialize>(&self, data: &T) {
        let rendered = if self.is_json() {
            serde_json::to_string(data)
        } else {
            serde_json::to_string_pretty(data)
        };

        if let Ok(json) = rendered {
            println!("{}", json);
        }
    }

    /// Stderr diagnostic, shown only with `--verbose`
    pub fn verbose(&self, message: &str) {
        if self.verbose {
            eprintln!("[verbose] {}", message);
        }
    }

    /// Stderr diagnostic tagged with the originating command
    pub fn verbose_ctx(&self, context: &str, message: &str) {
        if self.verbose {
            eprintln!("[verbose:{}] {}", context, message);
        }
    }
}
