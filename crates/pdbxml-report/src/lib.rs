use std::path::PathBuf;

use clap::ValueEnum;
use thiserror::Error;

pub mod commands;
pub mod layout;
pub mod sink;
pub mod utils;

// Re-export pdbxml for external use
pub use pdbxml;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled workbook with the sectioned report layout
    #[default]
    Xlsx,
    /// One flat row per test
    Csv,
}

impl OutputFormat {
    /// Suffix appended to the input name when no output path is given
    pub fn default_suffix(&self) -> &'static str {
        match self {
            Self::Xlsx => "_report.xlsx",
            Self::Csv => "_output.csv",
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TestSelection {
    /// Every test of every form
    #[default]
    All,
    /// Only the first test in the document
    First,
}

impl From<TestSelection> for pdbxml::ExtractMode {
    fn from(selection: TestSelection) -> Self {
        match selection {
            TestSelection::All => Self::AllTests,
            TestSelection::First => Self::FirstTest,
        }
    }
}

/// Layout switches that do not change extraction
#[derive(Debug, Clone, Copy)]
pub struct ReportOptions {
    /// Anchor impedance and voltage line charts beside each cell table
    pub charts: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self { charts: true }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Input file '{}' not found", .0.display())]
    MissingInput(PathBuf),

    #[error("Failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed document '{}': {source}", .path.display())]
    MalformedDocument {
        path: PathBuf,
        source: pdbxml::PdbXmlError,
    },

    #[error("Failed to build workbook '{}': {source}", .path.display())]
    Xlsx {
        path: PathBuf,
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("Failed to build CSV '{}': {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Failed to write '{}': {source}", .path.display())]
    SinkWriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },
}
