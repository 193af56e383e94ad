//! End-to-end scan: load collaborators, read the program, scan, hand back outputs

mod error;
pub mod output;

pub use error::PipelineError;
pub use output::{ScanOutput, WrittenOutputs, PIF_FILE_NAME, SYMBOL_TABLE_FILE_NAME};

use crate::config::runtime::{FileProcessorPreferences, ScannerPreferences};
use crate::file_processor;
use crate::lexical::Scanner;
use crate::{log_error, log_info};
use std::path::PathBuf;
use std::time::Instant;

/// What to scan and with which collaborators
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub program: PathBuf,
    pub scanner: ScannerPreferences,
    pub file_processor: FileProcessorPreferences,
}

impl ScanRequest {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            scanner: ScannerPreferences::default(),
            file_processor: FileProcessorPreferences::default(),
        }
    }

    pub fn with_scanner_preferences(mut self, preferences: ScannerPreferences) -> Self {
        self.scanner = preferences;
        self
    }

    pub fn with_file_processor_preferences(mut self, preferences: FileProcessorPreferences) -> Self {
        self.file_processor = preferences;
        self
    }
}

/// Scan one program with the vocabulary and automata named in the request
pub fn scan_program(request: &ScanRequest) -> Result<ScanOutput, PipelineError> {
    let start_time = Instant::now();
    let program = request.program.display().to_string();

    log_info!("Starting scan pipeline", "program" => program);

    let mut scanner = Scanner::from_preferences(&request.scanner)?;

    let source = file_processor::create_processor_from_preferences(&request.file_processor)
        .read(&request.program)?
        .source;

    if let Err(error) = scanner.scan(&source) {
        log_error!(error.error_code(), "Scan failed",
            "program" => program,
            "error" => error);
        return Err(error.into());
    }

    let (pif, symbol_table, statistics) = scanner.into_results();

    Ok(ScanOutput {
        program: request.program.clone(),
        pif,
        symbol_table,
        statistics,
        processing_duration: start_time.elapsed(),
        completed_at: chrono::Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crate::lexical::LexicalError;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    fn write_collaborators(dir: &Path) -> ScannerPreferences {
        let vocabulary = [
            "+", "-", "*", "/", "%", "=", "==", "<", ">", "<<", ">>", ";", ",", "(", ")", "{",
            "}", "[", "]", " ", "\\n", ":", "int", "read", "write",
        ]
        .join("\n");
        fs::write(dir.join("token.txt"), vocabulary).unwrap();
        fs::write(
            dir.join("FA-identifier.in"),
            "states:q0,q1\nalphabet:[a.z|A.Z]=letter,[0.9]=digit\ninitial:q0\nfinal:q1\ntransitions:q0|q1=[letter],q1|q1=[letter.digit]\n",
        )
        .unwrap();
        fs::write(
            dir.join("FA-integer.in"),
            "states:q0,q1,q2\nalphabet:[0]=zero,[1.9]=nonzero\ninitial:q0\nfinal:q1,q2\ntransitions:q0|q1=[zero],q0|q2=[nonzero],q2|q2=[zero.nonzero]\n",
        )
        .unwrap();

        ScannerPreferences {
            token_file: dir.join("token.txt"),
            identifier_automaton: dir.join("FA-identifier.in"),
            integer_automaton: dir.join("FA-integer.in"),
            output_dir: dir.join("out"),
            emit_lone_angle_brackets: true,
            log_classifications: false,
        }
    }

    fn request(dir: &TempDir, program: &str) -> ScanRequest {
        let preferences = write_collaborators(dir.path());
        let path = dir.path().join("program.txt");
        fs::write(&path, program).unwrap();
        ScanRequest::new(path).with_scanner_preferences(preferences)
    }

    #[test]
    fn test_scan_program_and_write_outputs() {
        let dir = tempdir().unwrap();
        let request = request(&dir, "int n;\nread(n);\nwrite(n << 2);\n");

        let output = scan_program(&request).unwrap();
        assert_eq!(output.statistics.identifiers, 3);
        assert_eq!(output.statistics.constants, 1);
        assert_eq!(output.symbol_table.len(), 2);

        let pif = output.render_pif();
        assert!(pif.starts_with("(int)->(-1,-1)|23\n(SPACE)->(-1,-1)|20\n"));
        assert!(pif.contains("(<<)->(-1,-1)|10"));

        let written = output.write_to(&request.scanner.output_dir).unwrap();
        assert_eq!(fs::read_to_string(&written.pif).unwrap(), pif);
        let table = fs::read_to_string(&written.symbol_table).unwrap();
        assert_eq!(table.lines().count(), output.symbol_table.capacity());
        assert!(table.contains("n <-> NULL"));
        assert!(written.pif.ends_with(PIF_FILE_NAME));
    }

    #[test]
    fn test_scan_program_reports_lexical_error() {
        let dir = tempdir().unwrap();
        let request = request(&dir, "int n;\nn = 3#;\n");

        let result = scan_program(&request);
        assert_matches!(
            result,
            Err(PipelineError::Lexical(LexicalError::Incorrect { line: 2, .. }))
        );
    }

    #[test]
    fn test_missing_vocabulary_is_setup_error() {
        let dir = tempdir().unwrap();
        let mut request = request(&dir, "x;");
        request.scanner.token_file = dir.path().join("missing.txt");

        assert_matches!(scan_program(&request), Err(PipelineError::Setup(_)));
    }

    #[test]
    fn test_json_report() {
        let dir = tempdir().unwrap();
        let output = scan_program(&request(&dir, "x = 0;")).unwrap();

        let json = output.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["statistics"]["identifiers"], 1);
        assert_eq!(value["pif"][0]["token"], "x");
        assert_eq!(value["pif"][1]["token"], "SPACE");
        assert_eq!(value["pif"][1]["bucket"], -1);
        assert_eq!(value["symbols"].as_array().map(Vec::len), Some(2));
        assert!(value["completed_at"].is_string());
    }
}
