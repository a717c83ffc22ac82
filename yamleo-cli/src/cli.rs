//! Command-line interface definitions for `yamleo`.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use yamleo::ArrayPolicy;

/// How sequences appear in dotted paths, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ArraysArg {
    /// Keep each sequence as one leaf.
    Atomic,
    /// Descend into sequences using element indices as path segments.
    Indexed,
}

impl From<ArraysArg> for ArrayPolicy {
    fn from(value: ArraysArg) -> Self {
        match value {
            ArraysArg::Atomic => Self::Atomic,
            ArraysArg::Indexed => Self::Indexed,
        }
    }
}

/// Parsed CLI arguments for `yamleo`.
#[derive(Debug, Parser)]
#[command(name = "yamleo")]
#[command(about = "Compare, sync, sort and audit YAML or JSON translation catalogs")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to `yamleo.toml` in the working directory).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
    /// Array handling when flattening catalogs into dotted paths.
    #[arg(long, global = true, value_enum)]
    pub arrays: Option<ArraysArg>,
    /// Increase log verbosity (repeat for more detail).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Operation to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands exposed by `yamleo`.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Report keys missing on either side and likely duplicates.
    Compare(CompareArgs),
    /// Sort every mapping level of a catalog by key, in place.
    Sort(SortArgs),
    /// Add keys present in the base catalog to the target catalog.
    Sync(SyncArgs),
    /// Export a catalog to a spreadsheet with one row per leaf.
    ToExcel(ToExcelArgs),
    /// Rebuild a catalog from a spreadsheet.
    FromExcel(FromExcelArgs),
    /// Find catalog keys that never appear in a source tree.
    Unused(UnusedArgs),
}

/// Arguments for `yamleo compare`.
#[derive(Debug, Args)]
pub struct CompareArgs {
    /// Reference catalog.
    pub base: Utf8PathBuf,
    /// Catalog checked against the reference.
    pub target: Utf8PathBuf,
    /// Print the report as JSON instead of text.
    #[arg(long = "json")]
    pub should_print_json: bool,
}

/// Arguments for `yamleo sort`.
#[derive(Debug, Args)]
pub struct SortArgs {
    /// Catalog rewritten with sorted keys.
    pub file: Utf8PathBuf,
}

/// Arguments for `yamleo sync`.
#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Catalog supplying the missing keys.
    pub base: Utf8PathBuf,
    /// Catalog that receives them; rewritten in place.
    pub target: Utf8PathBuf,
    /// Text appended to copied leaves (overrides the configured marker).
    #[arg(long, value_name = "TEXT", allow_hyphen_values = true)]
    pub marker: Option<String>,
}

/// Arguments for `yamleo to-excel`.
#[derive(Debug, Args)]
pub struct ToExcelArgs {
    /// Catalog to export.
    pub catalog: Utf8PathBuf,
    /// Spreadsheet to create.
    pub workbook: Utf8PathBuf,
}

/// Arguments for `yamleo from-excel`.
#[derive(Debug, Args)]
pub struct FromExcelArgs {
    /// Spreadsheet to import.
    pub workbook: Utf8PathBuf,
    /// Catalog to create; its extension selects YAML or JSON.
    pub catalog: Utf8PathBuf,
}

/// Arguments for `yamleo unused`.
#[derive(Debug, Args)]
pub struct UnusedArgs {
    /// Catalog whose keys are audited.
    pub catalog: Utf8PathBuf,
    /// Source directory searched recursively.
    pub folder: Utf8PathBuf,
    /// Write the unused keys to this file instead of printing a preview.
    #[arg(long, value_name = "FILE")]
    pub output: Option<Utf8PathBuf>,
    /// Remove unused keys from the catalog.
    #[arg(long = "delete")]
    pub should_delete: bool,
}
