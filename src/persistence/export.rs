// * Output Writer
// * Every file a run produces goes through here. Any failure is fatal for the run.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::constants::OUTPUT_FILE_PREFIX;
use crate::refinery::assembler::OutputTable;
use crate::refinery::patterns::PatternSummary;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl ExportError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        ExportError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    fn csv(path: &Path, source: csv::Error) -> Self {
        ExportError::Csv {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// File names for one site inside the output folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub table: PathBuf,
    pub report: PathBuf,
    pub patterns: PathBuf,
}

impl OutputPaths {
    pub fn new(dir: &Path, domain: &str) -> Self {
        let stem = format!("{}-{}", OUTPUT_FILE_PREFIX, domain);
        Self {
            dir: dir.to_path_buf(),
            table: dir.join(format!("{}.csv", stem)),
            report: dir.join(format!("{}-report.md", stem)),
            patterns: dir.join(format!("{}-patterns.csv", stem)),
        }
    }

    /// Report path that sits next to an existing table, `<table stem>-report.md`
    pub fn report_for_table(table: &Path) -> PathBuf {
        let stem = table
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| OUTPUT_FILE_PREFIX.to_string());
        table.with_file_name(format!("{}-report.md", stem))
    }
}

pub fn ensure_output_dir(dir: &Path) -> Result<(), ExportError> {
    fs::create_dir_all(dir).map_err(|e| ExportError::io(dir, e))
}

fn create(path: &Path) -> Result<BufWriter<File>, ExportError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|e| ExportError::io(path, e))
}

pub fn write_table(table: &OutputTable, path: &Path) -> Result<(), ExportError> {
    let file = create(path)?;
    table.write_csv(file).map_err(|e| ExportError::csv(path, e))?;
    info!(path = %path.display(), rows = table.len(), "Table written");
    Ok(())
}

pub fn read_table(path: &Path) -> Result<OutputTable, ExportError> {
    let file = File::open(path).map_err(|e| ExportError::io(path, e))?;
    OutputTable::read_csv(file).map_err(|e| ExportError::csv(path, e))
}

pub fn write_patterns(summary: &PatternSummary, path: &Path) -> Result<(), ExportError> {
    let file = create(path)?;
    summary.write_csv(file).map_err(|e| ExportError::csv(path, e))?;
    info!(path = %path.display(), patterns = summary.rows.len(), "Pattern summary written");
    Ok(())
}

pub fn write_text(text: &str, path: &Path) -> Result<(), ExportError> {
    fs::write(path, text).map_err(|e| ExportError::io(path, e))?;
    info!(path = %path.display(), bytes = text.len(), "File written");
    Ok(())
}

/// Copies each input file into `dir` unchanged, returning the copies' paths
pub fn copy_sources(sources: &[&Path], dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    let mut copied = Vec::with_capacity(sources.len());
    for source in sources {
        let Some(name) = source.file_name() else {
            continue;
        };
        let target = dir.join(name);
        // * Source already lives in the output folder
        if fs::canonicalize(source).ok() == fs::canonicalize(&target).ok() && target.exists() {
            copied.push(target);
            continue;
        }
        fs::copy(source, &target).map_err(|e| ExportError::io(source, e))?;
        copied.push(target);
    }
    Ok(copied)
}
