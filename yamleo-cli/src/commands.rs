//! Subcommand execution.
//!
//! Each handler loads what it needs, delegates to the engines in `yamleo`,
//! and writes its report to the supplied writer. Progress goes to the log.

use std::io::Write;

use tracing::{info, warn};
use yamleo::catalog::{load_catalog, write_catalog};
use yamleo::{Merger, compare, flatten, sort, unflatten};

use crate::audit::{SourceTree, prune, unused_keys};
use crate::cli::{
    Commands, CompareArgs, FromExcelArgs, SortArgs, SyncArgs, ToExcelArgs, UnusedArgs,
};
use crate::config::Settings;
use crate::error::Result;
use crate::fs_helpers::write_text;
use crate::report::{write_preview, write_report, write_report_json};
use crate::spreadsheet::{export_rows, import_rows, read_workbook, write_workbook};

/// Runs `command` with `settings`, writing its report to `out`.
///
/// # Errors
///
/// Returns the first catalog, spreadsheet, filesystem or output failure.
pub fn run<W: Write>(command: &Commands, settings: &Settings, out: &mut W) -> Result<()> {
    match command {
        Commands::Compare(args) => run_compare(args, settings, out),
        Commands::Sort(args) => run_sort(args),
        Commands::Sync(args) => run_sync(args, settings),
        Commands::ToExcel(args) => run_to_excel(args, settings),
        Commands::FromExcel(args) => run_from_excel(args, settings),
        Commands::Unused(args) => run_unused(args, settings, out),
    }
}

fn run_compare<W: Write>(args: &CompareArgs, settings: &Settings, out: &mut W) -> Result<()> {
    info!(base = %args.base, target = %args.target, "loading catalogs");
    let base = load_catalog(&args.base)?;
    let target = load_catalog(&args.target)?;
    let report = compare(
        &base.tree,
        &target.tree,
        &base.raw,
        &target.raw,
        settings.arrays,
    );
    if args.should_print_json {
        write_report_json(out, &report)?;
    } else {
        write_report(out, &report, &args.base, &args.target)?;
    }
    Ok(())
}

fn run_sort(args: &SortArgs) -> Result<()> {
    let catalog = load_catalog(&args.file)?;
    write_catalog(&args.file, &sort(&catalog.tree))?;
    info!(path = %args.file, "sorted catalog");
    Ok(())
}

fn run_sync(args: &SyncArgs, settings: &Settings) -> Result<()> {
    let base = load_catalog(&args.base)?;
    let target = load_catalog(&args.target)?;
    let merged = Merger::new(settings.marker.as_str()).merge(&base.tree, &target.tree);
    write_catalog(&args.target, &merged)?;
    info!(base = %args.base, target = %args.target, "synchronised catalog");
    Ok(())
}

fn run_to_excel(args: &ToExcelArgs, settings: &Settings) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    write_workbook(&args.workbook, &export_rows(&catalog.tree, settings.arrays))?;
    info!(catalog = %args.catalog, workbook = %args.workbook, "exported catalog");
    Ok(())
}

fn run_from_excel(args: &FromExcelArgs, settings: &Settings) -> Result<()> {
    let rows = read_workbook(&args.workbook)?;
    let tree = unflatten(&import_rows(&rows), settings.arrays);
    write_catalog(&args.catalog, &tree)?;
    info!(workbook = %args.workbook, catalog = %args.catalog, "imported catalog");
    Ok(())
}

fn run_unused<W: Write>(args: &UnusedArgs, settings: &Settings, out: &mut W) -> Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    let mut leaves = flatten(&catalog.tree, settings.arrays);
    let sources = SourceTree::scan(&args.folder, &settings.audit.extensions)?;
    info!(
        folder = %args.folder,
        files = sources.files().len(),
        extensions = ?settings.audit.extensions,
        "found source files"
    );
    if sources.is_empty() {
        warn!(folder = %args.folder, "no source files found; nothing to audit");
        return Ok(());
    }

    let unused = unused_keys(&leaves, &sources.read_corpus()?);
    if unused.is_empty() {
        info!("no unused keys found");
        return Ok(());
    }
    warn!(count = unused.len(), "found unused keys");
    match &args.output {
        Some(path) => {
            write_text(path, &unused.join("\n"))?;
            info!(path = %path, "wrote unused keys");
        }
        None => write_preview(out, &unused, settings.audit.preview_limit)?,
    }

    if args.should_delete {
        prune(&mut leaves, &unused);
        write_catalog(&args.catalog, &unflatten(&leaves, settings.arrays))?;
        info!(count = unused.len(), path = %args.catalog, "deleted unused keys");
    }
    Ok(())
}
