//! Rendering and persisting scan results

use super::error::PipelineError;
use crate::lexical::ScanStatistics;
use crate::logging::codes;
use crate::symbols::SymbolTable;
use crate::tokens::ProgramInternalForm;
use crate::{log_error, log_success};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const PIF_FILE_NAME: &str = "PIF.out";
pub const SYMBOL_TABLE_FILE_NAME: &str = "ST.out";

/// Result of a successful scan
#[derive(Debug, Clone)]
pub struct ScanOutput {
    pub program: PathBuf,
    pub pif: ProgramInternalForm,
    pub symbol_table: SymbolTable,
    pub statistics: ScanStatistics,
    pub processing_duration: Duration,
    pub completed_at: DateTime<Utc>,
}

/// Files produced by `ScanOutput::write_to`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub pif: PathBuf,
    pub symbol_table: PathBuf,
}

#[derive(Serialize)]
struct ScanReport<'a> {
    program: String,
    completed_at: DateTime<Utc>,
    duration_ms: f64,
    statistics: &'a ScanStatistics,
    pif: Vec<PifEntry<'a>>,
    symbols: Vec<SymbolEntry<'a>>,
}

#[derive(Serialize)]
struct PifEntry<'a> {
    token: &'a str,
    category: &'static str,
    bucket: i64,
    offset: i64,
    code: u32,
}

#[derive(Serialize)]
struct SymbolEntry<'a> {
    symbol: &'a str,
    bucket: usize,
    offset: usize,
}

impl ScanOutput {
    /// One `(token)->(bucket,offset)|code` line per record
    pub fn render_pif(&self) -> String {
        self.pif.to_string()
    }

    /// One `Bucket i: ... <-> NULL` line per bucket
    pub fn render_symbol_table(&self) -> String {
        self.symbol_table.to_string()
    }

    /// Write `PIF.out` and `ST.out` into `dir`, creating it when missing
    pub fn write_to(&self, dir: &Path) -> Result<WrittenOutputs, PipelineError> {
        fs::create_dir_all(dir).map_err(|e| write_error(dir, &e))?;

        let outputs = WrittenOutputs {
            pif: dir.join(PIF_FILE_NAME),
            symbol_table: dir.join(SYMBOL_TABLE_FILE_NAME),
        };

        fs::write(&outputs.pif, self.render_pif()).map_err(|e| write_error(&outputs.pif, &e))?;
        fs::write(&outputs.symbol_table, self.render_symbol_table())
            .map_err(|e| write_error(&outputs.symbol_table, &e))?;

        log_success!(codes::success::OUTPUT_WRITTEN, "Scan outputs written",
            "pif" => outputs.pif.display(),
            "symbol_table" => outputs.symbol_table.display());

        Ok(outputs)
    }

    /// JSON report of the scan
    pub fn to_json(&self) -> Result<String, PipelineError> {
        let report = ScanReport {
            program: self.program.display().to_string(),
            completed_at: self.completed_at,
            duration_ms: self.processing_duration.as_secs_f64() * 1000.0,
            statistics: &self.statistics,
            pif: self
                .pif
                .iter()
                .map(|record| {
                    let (bucket, offset) = record.position_pair();
                    PifEntry {
                        token: record.display_text(),
                        category: record.category.as_str(),
                        bucket,
                        offset,
                        code: record.code,
                    }
                })
                .collect(),
            symbols: self
                .symbol_table
                .iter()
                .map(|(position, symbol)| SymbolEntry {
                    symbol,
                    bucket: position.bucket,
                    offset: position.offset,
                })
                .collect(),
        };

        serde_json::to_string_pretty(&report).map_err(|e| {
            let error = PipelineError::Serialization {
                message: e.to_string(),
            };
            log_error!(error.error_code(), "Failed to serialize scan report");
            error
        })
    }
}

fn write_error(path: &Path, error: &std::io::Error) -> PipelineError {
    let error = PipelineError::Output {
        path: path.display().to_string(),
        message: error.to_string(),
    };
    log_error!(error.error_code(), "Failed to write scan output",
        "path" => path.display(),
        "error" => error);
    error
}
