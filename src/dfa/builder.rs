use crate::math::Set;

use super::{Dfa, StateId};

/// Helper struct for the construction of automatons, mainly used in tests and by
/// embedders that assemble a [`Dfa`] programmatically instead of through deserialization.
///
/// States do not have to be declared explicitly, every identifier appearing as a
/// transition endpoint, as an accepting state or as the initial state is created
/// automatically, in order of first mention.
///
/// # Example
///
/// We want to create a DFA with two states `q0` and `q1` over the alphabet `["a", "b"]`
/// which accepts exactly the words ending in `a`:
/// ```
/// use minidfa::prelude::*;
///
/// let dfa = DfaBuilder::default()
///     .with_alphabet(["a", "b"])
///     .with_accepting(["q1"])
///     .with_transitions([
///         ("q0", "a", "q1"),
///         ("q0", "b", "q0"),
///         ("q1", "a", "q1"),
///         ("q1", "b", "q0"),
///     ])
///     .into_dfa("q0"); // q0 is the initial state
/// ```
#[derive(Default)]
pub struct DfaBuilder {
    alphabet: Vec<String>,
    states: Vec<StateId>,
    accepting: Set<StateId>,
    transitions: Vec<(StateId, String, StateId)>,
}

impl DfaBuilder {
    /// Sets the alphabet, in iteration order.
    pub fn with_alphabet<S: Into<String>, I: IntoIterator<Item = S>>(mut self, iter: I) -> Self {
        self.alphabet = iter.into_iter().map(Into::into).collect();
        self
    }

    /// Declares states explicitly. Only needed for states that appear in no
    /// transition, are not accepting and are not the initial state.
    pub fn with_states<S: Into<StateId>, I: IntoIterator<Item = S>>(mut self, iter: I) -> Self {
        for id in iter {
            self.declare(id.into());
        }
        self
    }

    /// Marks the given states as accepting, declaring them if necessary.
    pub fn with_accepting<S: Into<StateId>, I: IntoIterator<Item = S>>(mut self, iter: I) -> Self {
        for id in iter {
            self.accepting.insert(id.into());
        }
        self
    }

    /// Adds transitions given as `(from, symbol, to)` triples. Endpoints are declared
    /// in order of first mention; a repeated `(from, symbol)` pair overwrites, exactly
    /// as [`Dfa::add_transition`] does.
    pub fn with_transitions<F, S, T, I>(mut self, iter: I) -> Self
    where
        F: Into<StateId>,
        S: Into<String>,
        T: Into<StateId>,
        I: IntoIterator<Item = (F, S, T)>,
    {
        for (from, symbol, to) in iter {
            let (from, to) = (from.into(), to.into());
            self.declare(from.clone());
            self.declare(to.clone());
            self.transitions.push((from, symbol.into(), to));
        }
        self
    }

    /// Consumes the builder and produces a [`Dfa`] with `initial` as start state,
    /// declaring it if it was never mentioned. All states are positioned at the origin,
    /// layout is the concern of whoever renders the automaton.
    pub fn into_dfa(mut self, initial: impl Into<StateId>) -> Dfa {
        let initial = initial.into();
        self.declare(initial.clone());
        let mut remaining: Vec<_> = self
            .accepting
            .iter()
            .filter(|id| !self.states.contains(id))
            .cloned()
            .collect();
        remaining.sort();
        self.states.extend(remaining);

        let mut dfa = Dfa {
            alphabet: self.alphabet,
            ..Default::default()
        };
        for id in self.states {
            let start = id == initial;
            let accept = self.accepting.contains(&id);
            dfa.add_state(id, start, accept, 0.0, 0.0);
        }
        for (from, symbol, to) in self.transitions {
            dfa.add_transition(from, symbol, to);
        }
        dfa
    }

    fn declare(&mut self, id: StateId) {
        if !self.states.contains(&id) {
            self.states.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn builder_matches_manual_construction() {
        let built = DfaBuilder::default()
            .with_alphabet(["a"])
            .with_accepting(["q1"])
            .with_transitions([("q0", "a", "q1"), ("q1", "a", "q0")])
            .into_dfa("q0");

        let mut manual = Dfa::default();
        manual.alphabet = vec!["a".to_string()];
        manual.add_state("q0", true, false, 0.0, 0.0);
        manual.add_state("q1", false, true, 0.0, 0.0);
        manual.add_transition("q0", "a", "q1");
        manual.add_transition("q1", "a", "q0");

        assert_eq!(built, manual);
    }

    #[test_log::test]
    fn endpoints_are_declared_in_first_mention_order() {
        let dfa = DfaBuilder::default()
            .with_alphabet(["x"])
            .with_transitions([("b", "x", "a"), ("a", "x", "c")])
            .into_dfa("b");
        let order: Vec<_> = dfa.states.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert_eq!(dfa.start_state().unwrap().id, "b");
    }
}
