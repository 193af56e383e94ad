//! The finite automaton value and its acceptance test

use super::alphabet::Alphabet;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Transition table: state -> alias -> successor state
pub type TransitionTable = BTreeMap<String, BTreeMap<String, String>>;

/// A deterministic finite acceptor over aliased character classes.
///
/// Immutable once built; `accepts` keeps its current state on the stack so
/// one instance can be queried repeatedly or from several threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiniteAutomaton {
    pub(crate) states: BTreeSet<String>,
    pub(crate) alphabet: Alphabet,
    pub(crate) initial_state: String,
    pub(crate) final_states: BTreeSet<String>,
    pub(crate) transitions: TransitionTable,
}

/// A rule-file inconsistency that does not prevent the automaton from running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsistencyIssue {
    MissingInitialState,
    UndeclaredInitialState { state: String },
    UndeclaredFinalState { state: String },
    UndeclaredTransitionState { state: String },
    UnknownAlias { from: String, alias: String },
}

impl fmt::Display for ConsistencyIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyIssue::MissingInitialState => write!(f, "no initial state declared"),
            ConsistencyIssue::UndeclaredInitialState { state } => {
                write!(f, "initial state '{}' is not in the state set", state)
            }
            ConsistencyIssue::UndeclaredFinalState { state } => {
                write!(f, "final state '{}' is not in the state set", state)
            }
            ConsistencyIssue::UndeclaredTransitionState { state } => {
                write!(f, "transition state '{}' is not in the state set", state)
            }
            ConsistencyIssue::UnknownAlias { from, alias } => {
                write!(f, "transition from '{}' uses unknown alias '{}'", from, alias)
            }
        }
    }
}

impl FiniteAutomaton {
    /// Decide whether `input` drives the automaton from the initial state into
    /// a final state. A character outside every class, or a class with no
    /// transition from the current state, rejects immediately.
    pub fn accepts(&self, input: &str) -> bool {
        self.run(input)
            .is_some_and(|state| self.final_states.contains(state))
    }

    /// State reached after consuming `input`, or `None` when stuck
    pub fn run(&self, input: &str) -> Option<&str> {
        let mut current = self.initial_state.as_str();

        for ch in input.chars() {
            let alias = self.alphabet.classify(ch)?;
            current = self.transitions.get(current)?.get(alias)?.as_str();
        }

        Some(current)
    }

    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn initial_state(&self) -> &str {
        &self.initial_state
    }

    pub fn final_states(&self) -> &BTreeSet<String> {
        &self.final_states
    }

    pub fn transitions(&self) -> &TransitionTable {
        &self.transitions
    }

    pub fn transition_count(&self) -> usize {
        self.transitions.values().map(BTreeMap::len).sum()
    }

    pub fn is_final(&self, state: &str) -> bool {
        self.final_states.contains(state)
    }

    /// Check the declared invariants without rejecting the automaton
    pub fn consistency_report(&self) -> Vec<ConsistencyIssue> {
        let mut issues = Vec::new();

        if self.initial_state.is_empty() {
            issues.push(ConsistencyIssue::MissingInitialState);
        } else if !self.states.contains(&self.initial_state) {
            issues.push(ConsistencyIssue::UndeclaredInitialState {
                state: self.initial_state.clone(),
            });
        }

        for state in self.final_states.difference(&self.states) {
            issues.push(ConsistencyIssue::UndeclaredFinalState {
                state: state.clone(),
            });
        }

        let mut undeclared = BTreeSet::new();
        for (from, targets) in &self.transitions {
            if !self.states.contains(from) {
                undeclared.insert(from.clone());
            }
            for (alias, to) in targets {
                if !self.states.contains(to) {
                    undeclared.insert(to.clone());
                }
                if !self.alphabet.has_alias(alias) {
                    issues.push(ConsistencyIssue::UnknownAlias {
                        from: from.clone(),
                        alias: alias.clone(),
                    });
                }
            }
        }
        issues.extend(
            undeclared
                .into_iter()
                .map(|state| ConsistencyIssue::UndeclaredTransitionState { state }),
        );

        issues
    }

    pub fn describe_states(&self) -> String {
        format!("States: {}", join(self.states.iter()))
    }

    pub fn describe_alphabet(&self) -> String {
        let classes: Vec<String> = self
            .alphabet
            .classes()
            .iter()
            .map(ToString::to_string)
            .collect();
        format!("Alphabet: {}", classes.join(" "))
    }

    pub fn describe_transitions(&self) -> String {
        let mut out = String::from("Transitions:");
        for (from, targets) in &self.transitions {
            for (symbol, to) in targets {
                out.push_str(&format!("\n{} --{}--> {}", from, symbol, to));
            }
        }
        out
    }

    pub fn describe_initial_state(&self) -> String {
        format!("Initial State: {}", self.initial_state)
    }

    pub fn describe_final_states(&self) -> String {
        format!("Final States: {}", join(self.final_states.iter()))
    }
}

fn join<'a>(items: impl Iterator<Item = &'a String>) -> String {
    items.map(String::as_str).collect::<Vec<_>>().join(" ")
}

impl fmt::Display for FiniteAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.describe_states())?;
        writeln!(f, "{}", self.describe_alphabet())?;
        writeln!(f, "{}", self.describe_initial_state())?;
        writeln!(f, "{}", self.describe_final_states())?;
        write!(f, "{}", self.describe_transitions())
    }
}
