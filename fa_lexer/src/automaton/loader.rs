//! Rule-file parsing
//!
//! The rule file is line oriented. Each line is `label:value` where the label
//! is one of `states`, `alphabet`, `initial`, `final` or `transitions`.
//! Lines that do not fit that shape are skipped; only malformed alphabet
//! atoms abort the load.

use super::alphabet::parse_class_spec;
use super::error::AutomatonError;
use super::machine::FiniteAutomaton;
use crate::config::compile_time::automaton::MAX_RULE_LINES;
use crate::file_processor;
use crate::logging::codes;
use crate::utils::{remove_char, tokenize};
use crate::{log_debug, log_error, log_success, log_warning};
use std::path::Path;

/// Build an automaton from rule-file text
pub fn parse_rules(text: &str) -> Result<FiniteAutomaton, AutomatonError> {
    let line_count = text.lines().count();
    if line_count > MAX_RULE_LINES {
        let error = AutomatonError::TooManyRuleLines { lines: line_count };
        log_error!(error.error_code(), "Rule file exceeds line limit",
            "lines" => line_count,
            "max_lines" => MAX_RULE_LINES);
        return Err(error);
    }

    let mut fa = FiniteAutomaton::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        let Some((label, value)) = line.split_once(':') else {
            if !line.trim().is_empty() {
                skip_line(line_number, "missing ':' separator");
            }
            continue;
        };

        match label.trim() {
            "states" => fa.states.extend(state_list(value)),
            "alphabet" => parse_alphabet(&mut fa, value, line_number)?,
            "initial" => fa.initial_state = value.trim().to_string(),
            "final" => fa.final_states.extend(state_list(value)),
            "transitions" => parse_transitions(&mut fa, value, line_number),
            _ => skip_line(line_number, "unknown label"),
        }
    }

    Ok(fa)
}

/// Read and parse a rule file, logging any consistency issues
pub fn load_rule_file(path: &Path) -> Result<FiniteAutomaton, AutomatonError> {
    let text = file_processor::read_text(path)?;
    let path_str = path.display().to_string();

    let fa = parse_rules(&text).map_err(|error| {
        log_error!(error.error_code(), "Failed to load automaton",
            "path" => path_str,
            "error" => error);
        error
    })?;

    for issue in fa.consistency_report() {
        log_warning!(code = codes::automaton::INCONSISTENT_DEFINITION,
            "Automaton definition is inconsistent",
            "path" => path_str,
            "issue" => issue);
    }

    log_success!(codes::success::AUTOMATON_LOADED, "Automaton loaded",
        "path" => path_str,
        "states" => fa.states().len(),
        "classes" => fa.alphabet().len(),
        "transitions" => fa.transition_count());

    Ok(fa)
}

fn state_list(value: &str) -> impl Iterator<Item = String> + '_ {
    tokenize(value, ',')
        .into_iter()
        .map(|state| state.trim().to_string())
        .filter(|state| !state.is_empty())
}

fn parse_alphabet(
    fa: &mut FiniteAutomaton,
    value: &str,
    line: usize,
) -> Result<(), AutomatonError> {
    for entry in tokenize(value, ',') {
        // Split at the last '=' so a class may contain '=' itself
        let Some((spec, alias)) = entry.rsplit_once('=') else {
            skip_line(line, "alphabet entry without alias");
            continue;
        };
        let alias = alias.trim();
        if alias.is_empty() {
            skip_line(line, "alphabet entry without alias");
            continue;
        }

        for class in parse_class_spec(spec, alias, line)? {
            let expanded = class.expanded();
            if !fa.alphabet.push(class) {
                log_debug!("Duplicate alphabet class ignored",
                    "line" => line,
                    "characters" => expanded,
                    "alias" => alias);
            }
        }
    }
    Ok(())
}

fn parse_transitions(fa: &mut FiniteAutomaton, value: &str, line: usize) {
    for entry in tokenize(value, ',') {
        let Some((states, inputs)) = entry.split_once('=') else {
            skip_line(line, "transition without '='");
            continue;
        };
        let Some((from, to)) = states.split_once('|') else {
            skip_line(line, "transition without '|'");
            continue;
        };
        let (from, to) = (from.trim(), to.trim());

        let mut symbols = tokenize(inputs, '.');
        if let Some(first) = symbols.first_mut() {
            *first = remove_char(first, '[');
        }
        if let Some(last) = symbols.last_mut() {
            *last = remove_char(last, ']');
        }

        let targets = fa.transitions.entry(from.to_string()).or_default();
        for symbol in symbols {
            let symbol = symbol.trim();
            if !symbol.is_empty() {
                targets.insert(symbol.to_string(), to.to_string());
            }
        }
    }
}

fn skip_line(line: usize, reason: &str) {
    log_warning!(code = codes::automaton::SKIPPED_RULE_LINE, "Rule entry skipped",
        "line" => line,
        "reason" => reason);
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_parse_complete_file() {
        let fa = parse_rules(
            "states:q0,q1,q2\n\
             alphabet:[0]=zero,[1.9]=nonzero,[+|-]=sign\n\
             initial:q0\n\
             final:q1,q2\n\
             transitions:q0|q1=[zero],q0|q2=[nonzero],q2|q2=[zero.nonzero]\n",
        )
        .unwrap();

        assert_eq!(fa.states().len(), 3);
        assert_eq!(fa.alphabet().len(), 4);
        assert_eq!(fa.initial_state(), "q0");
        assert!(fa.is_final("q2"));
        assert_eq!(fa.transitions()["q2"]["zero"], "q2");
        assert_eq!(fa.transitions()["q2"]["nonzero"], "q2");

        assert!(fa.accepts("0"));
        assert!(fa.accepts("120"));
        assert!(!fa.accepts("01"));
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let fa = parse_rules(
            "just text\n\
             states:a\n\
             colour:blue\n\
             alphabet:[x]\n\
             transitions:a=[x],a|a,a|a=[x]\n\
             initial:a\n\
             final:a\n",
        )
        .unwrap();

        assert_eq!(fa.alphabet().len(), 0);
        assert_eq!(fa.transition_count(), 1);
        assert!(fa.accepts(""));
    }

    #[test]
    fn test_later_initial_replaces_earlier() {
        let fa = parse_rules("initial:a\ninitial:b\nfinal:a\nfinal:b\n").unwrap();
        assert_eq!(fa.initial_state(), "b");
        assert_eq!(fa.final_states().len(), 2);
    }

    #[test]
    fn test_bad_atom_aborts_with_line() {
        let result = parse_rules("states:q0\nalphabet:[ab.z]=bad\n");
        assert_matches!(
            result,
            Err(AutomatonError::InvalidRangeBound { line: 2, .. })
        );

        let result = parse_rules("alphabet:[a.b.c]=bad\n");
        assert_matches!(result, Err(AutomatonError::TooManyRangeParts { line: 1, .. }));
    }

    #[test]
    fn test_class_containing_equals_sign() {
        let fa = parse_rules("alphabet:[=]=eq\n").unwrap();
        assert_eq!(fa.alphabet().classify('='), Some("eq"));
    }

    #[test]
    fn test_crlf_lines() {
        let fa = parse_rules("states:q0\r\ninitial:q0\r\nfinal:q0\r\n").unwrap();
        assert_eq!(fa.initial_state(), "q0");
        assert!(fa.is_final("q0"));
    }

    #[test]
    fn test_load_rule_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("FA-integer.in");
        fs::write(
            &path,
            "states:q0,q1\nalphabet:[0.9]=digit\ninitial:q0\nfinal:q1\ntransitions:q0|q1=[digit],q1|q1=[digit]\n",
        )
        .unwrap();

        let fa = load_rule_file(&path).unwrap();
        assert!(fa.accepts("2024"));
        assert!(!fa.accepts("20a"));
    }

    #[test]
    fn test_load_missing_rule_file() {
        let dir = tempdir().unwrap();
        let result = load_rule_file(&dir.path().join("missing.in"));
        assert_matches!(result, Err(AutomatonError::File(_)));
    }

    #[test]
    fn test_skipped_lines_are_reported() {
        let logger = crate::logging::test_logger();

        parse_rules("states:q0\ncolour:blue\n").unwrap();

        assert!(logger
            .get_events_with_code(codes::automaton::SKIPPED_RULE_LINE)
            .iter()
            .any(|e| e.is_warning()
                && e.context.get("reason").map(String::as_str) == Some("unknown label")
                && e.context.get("line").map(String::as_str) == Some("2")));
    }

    #[test]
    fn test_inconsistent_definition_is_reported_but_loaded() {
        let logger = crate::logging::test_logger();
        let dir = tempdir().unwrap();
        let path = dir.path().join("FA-inconsistent.in");
        fs::write(
            &path,
            "states:q0\nalphabet:[a]=letter\ninitial:q0\nfinal:q9\ntransitions:q0|q0=[digit]\n",
        )
        .unwrap();

        let fa = load_rule_file(&path).unwrap();
        assert_eq!(fa.consistency_report().len(), 2);

        let path_str = path.display().to_string();
        let reported: Vec<_> = logger
            .get_events_with_code(codes::automaton::INCONSISTENT_DEFINITION)
            .into_iter()
            .filter(|e| e.is_warning() && e.context.get("path") == Some(&path_str))
            .collect();
        assert_eq!(reported.len(), 2);
        assert!(logger.has_success_with_code(codes::success::AUTOMATON_LOADED));
    }
}
