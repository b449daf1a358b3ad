//! Bulk project intake from CSV exports.
//!
//! Headers are matched after accent/whitespace normalization so hand-edited
//! spreadsheets load without cleanup. Parsing is tolerant per row: a row
//! with a missing title or an unparseable date is skipped and reported in
//! the summary, never aborting the batch. Unrecognized answer codes pass
//! through untouched; the scoring engine already treats them as 0 points.

mod normalizer;
mod parser;

use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::projects::{ProjectRepository, ProjectService, ProjectServiceError, ProjectSubmission};

/// Error raised while reading an import file. Row-level problems are not
/// errors; they land in [`ImportSummary::skipped`].
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read import file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

/// A row rejected during parsing, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
}

/// Parsed batch, ready to be scored and stored.
#[derive(Debug)]
pub struct ProjectImport {
    pub submissions: Vec<ProjectSubmission>,
    pub skipped: Vec<SkippedRow>,
}

impl ProjectImport {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ImportError> {
        let parsed = parser::parse_rows(reader)?;
        Ok(Self {
            submissions: parsed.submissions,
            skipped: parsed.skipped,
        })
    }

    /// Score and store every parsed submission through the service.
    pub fn apply<R>(
        self,
        service: &ProjectService<R>,
    ) -> Result<ImportSummary, ProjectServiceError>
    where
        R: ProjectRepository + 'static,
    {
        let mut imported = 0usize;
        for submission in self.submissions {
            service.submit(submission)?;
            imported += 1;
        }
        Ok(ImportSummary {
            imported,
            skipped: self.skipped,
        })
    }
}

/// Outcome of one import batch.
#[derive(Debug, Clone, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: Vec<SkippedRow>,
}
