//! Output formatting for command reports

use crate::commands::OutputFormatArg;
use crate::error::CliResult;
use crate::handlers::{CheckReport, LocatorOutput, StringsOutput};
use console::style;
use serde::Serialize;
use std::fmt::Write as _;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => Self::Text,
            OutputFormatArg::Json => Self::Json,
        }
    }
}

/// Something the CLI can print as text or JSON
pub trait Render: Serialize {
    /// Human-readable rendering
    fn to_text(&self) -> String;

    /// Render in `format`
    fn render(&self, format: OutputFormat) -> CliResult<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Render for CheckReport {
    fn to_text(&self) -> String {
        let mut out = String::new();
        let c = &self.config;
        let _ = writeln!(
            out,
            "{} locale {} on {}",
            style("✓").green().bold(),
            style(&c.locale).cyan(),
            c.platform
        );
        let _ = writeln!(
            out,
            "  timeouts: object {}ms, page {}ms, pause {}ms",
            c.object_load_timeout_ms, c.page_load_timeout_ms, c.pause_ms
        );
        if !c.base_url.is_empty() {
            let _ = writeln!(out, "  base url: {}", c.base_url);
        }

        let _ = writeln!(out, "{} {} locator page(s)", style("✓").green().bold(), self.pages.len());
        for page in &self.pages {
            let _ = writeln!(
                out,
                "  {} ({} element(s), {})",
                page.page, page.elements, page.source
            );
        }

        let _ = writeln!(out, "{} {} locale(s)", style("✓").green().bold(), self.locales.len());
        for locale in &self.locales {
            let _ = writeln!(out, "  {}: {}", locale.locale, locale.pages.join(", "));
        }
        out
    }
}

impl Render for LocatorOutput {
    fn to_text(&self) -> String {
        format!("{}={}", self.strategy, self.expression)
    }
}

impl Render for StringsOutput {
    fn to_text(&self) -> String {
        let mut out = String::new();
        for (key, text) in &self.strings {
            let _ = writeln!(out, "{}: {text}", style(key).bold());
        }
        out
    }
}

/// Format an error line for stderr
#[must_use]
pub fn error_line(message: &str) -> String {
    format!("{} {message}", style("✗").red().bold())
}
