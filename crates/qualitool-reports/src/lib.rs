//! Rendering of audit reports, as text or JSON, to stdout or a file.

pub mod errors;
pub mod formatters;

use std::{
    fs,
    io::{self, Write},
    path::PathBuf,
};

use qualitool_core::Report;
use tracing::info;

pub use errors::ReportError;
pub use formatters::{json::JsonFormatter, text::TextFormatter};

pub trait Reporter {
    /// Render the whole report. Rendering never changes the report.
    fn render(&self, report: &Report) -> Result<String, ReportError>;
}

/// Where a rendered report goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Destination {
    #[default]
    Stdout,
    /// Written once, replacing any existing content
    File(PathBuf),
}

/// Render `report` as text and send it to `destination`.
pub fn summarize(
    report: &Report,
    destination: &Destination,
    include_details: bool,
) -> Result<(), ReportError> {
    let text = TextFormatter::new(include_details).render(report)?;
    write_output(&text, destination)
}

/// Stdout gets the text plus a trailing newline, a file gets exactly the text.
pub fn write_output(text: &str, destination: &Destination) -> Result<(), ReportError> {
    match destination {
        Destination::Stdout => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", text)?;
            stdout.flush()?;
        }
        Destination::File(path) => {
            fs::write(path, text)?;
            info!(path = %path.display(), "report written");
        }
    }
    Ok(())
}
