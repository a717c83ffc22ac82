//! Error types for the `yamleo` command-line tool.
//!
//! `YamleoError` wraps catalog failures from the library alongside the
//! configuration, spreadsheet and filesystem failures owned by the binary,
//! so `main` can hand a single error to `color_eyre`.

use camino::Utf8PathBuf;
use thiserror::Error;
use yamleo::CatalogError;

/// Errors surfaced by `yamleo` commands.
#[derive(Debug, Error)]
pub enum YamleoError {
    /// Command-line parsing failed.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// The log subscriber could not be installed.
    #[error("failed to initialise logging: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    /// Configuration layers could not be merged or extracted.
    #[error("failed to load configuration: {0}")]
    Config(#[source] Box<figment::Error>),

    /// An explicitly requested configuration file does not exist.
    #[error("configuration file {0} not found")]
    ConfigNotFound(Utf8PathBuf),

    /// A catalog could not be loaded or written.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Writing the report to standard output failed.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    /// The report could not be encoded as JSON.
    #[error("failed to encode report as JSON: {0}")]
    ReportJson(#[from] serde_json::Error),

    /// Reading or writing a file other than a catalog failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Location of the failure.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet could not be created.
    #[error("failed to write spreadsheet {path}: {source}")]
    SpreadsheetWrite {
        /// Spreadsheet location.
        path: Utf8PathBuf,
        /// Writer diagnostic.
        #[source]
        source: Box<rust_xlsxwriter::XlsxError>,
    },

    /// The spreadsheet could not be opened or read.
    #[error("failed to read spreadsheet {path}: {source}")]
    SpreadsheetRead {
        /// Spreadsheet location.
        path: Utf8PathBuf,
        /// Reader diagnostic.
        #[source]
        source: Box<calamine::XlsxError>,
    },

    /// The spreadsheet contains no worksheet.
    #[error("spreadsheet {0} contains no worksheet")]
    EmptyWorkbook(Utf8PathBuf),

    /// The catalog has more rows or levels than a worksheet can hold.
    #[error("catalog does not fit in a worksheet: {0}")]
    SheetTooLarge(String),
}

impl From<figment::Error> for YamleoError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

/// Convenience result alias for `yamleo` commands.
pub type Result<T, E = YamleoError> = std::result::Result<T, E>;

/// Maps an I/O failure at `path` into [`YamleoError::Io`].
pub(crate) fn io_error(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> YamleoError {
    YamleoError::Io {
        path: path.into(),
        source,
    }
}
