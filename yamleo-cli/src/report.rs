//! Rendering of command results to a writer.

use std::io::{self, Write};

use camino::Utf8Path;
use yamleo::ComparisonReport;

use crate::error::Result;

/// Writes each item on its own line as ` - item`.
///
/// # Errors
///
/// Returns an [`io::Error`] when the writer fails.
pub fn write_items<W, I, S>(out: &mut W, items: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for item in items {
        writeln!(out, " - {}", item.as_ref())?;
    }
    Ok(())
}

/// Writes a comparison report as text.
///
/// Missing keys are reported in both directions, each with a success line
/// when nothing is missing. Duplicate sections appear only when non-empty.
///
/// # Errors
///
/// Returns an [`io::Error`] when the writer fails.
///
/// # Examples
///
/// ```rust
/// use camino::Utf8Path;
/// use yamleo::ComparisonReport;
/// use yamleo_cli::report::write_report;
///
/// let report = ComparisonReport {
///     missing_in_target: vec!["cart.empty".to_owned()],
///     ..ComparisonReport::default()
/// };
/// let mut out = Vec::new();
/// write_report(&mut out, &report, Utf8Path::new("en.yaml"), Utf8Path::new("fr.yaml"))?;
/// let text = String::from_utf8(out)?;
/// assert!(text.contains(" - cart.empty\n"));
/// assert!(text.contains("No missing keys in en.yaml."));
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn write_report<W: Write>(
    out: &mut W,
    report: &ComparisonReport,
    base: &Utf8Path,
    target: &Utf8Path,
) -> io::Result<()> {
    write_missing(out, &report.missing_in_target, target, base)?;
    write_missing(out, &report.missing_in_base, base, target)?;
    write_duplicates(out, &report.duplicates_in_base, base)?;
    write_duplicates(out, &report.duplicates_in_target, target)
}

fn write_missing<W: Write>(
    out: &mut W,
    missing: &[String],
    lacking: &Utf8Path,
    source: &Utf8Path,
) -> io::Result<()> {
    if missing.is_empty() {
        return writeln!(out, "No missing keys in {lacking}.");
    }
    writeln!(out, "Missing keys in {lacking} (present in {source}):")?;
    write_items(out, missing)
}

fn write_duplicates<W: Write>(out: &mut W, duplicates: &[String], path: &Utf8Path) -> io::Result<()> {
    if duplicates.is_empty() {
        return Ok(());
    }
    writeln!(out, "Duplicate keys found in {path}:")?;
    write_items(out, duplicates)
}

/// Writes a comparison report as pretty JSON with camel-case field names.
///
/// # Errors
///
/// Returns an error when encoding or writing fails.
pub fn write_report_json<W: Write>(out: &mut W, report: &ComparisonReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

/// Writes at most `limit` keys, then a line counting the rest.
///
/// # Errors
///
/// Returns an [`io::Error`] when the writer fails.
pub fn write_preview<W: Write>(out: &mut W, keys: &[String], limit: usize) -> io::Result<()> {
    write_items(out, keys.iter().take(limit))?;
    let remaining = keys.len().saturating_sub(limit);
    if remaining > 0 {
        writeln!(out, "... and {remaining} more.")?;
    }
    Ok(())
}
