use std::collections::{BTreeMap, VecDeque};

use tracing::{debug, trace};

use crate::math::{Bijection, Set};

/// Contains the [`builder::DfaBuilder`] for assembling automatons programmatically.
pub mod builder;

/// States are identified by a string which must be unique within one automaton. The
/// model does not police uniqueness, constructing a DFA with duplicate identifiers is
/// a caller error with unspecified behavior.
pub type StateId = String;

/// A single state of a [`Dfa`].
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    /// The identifier of the state, unique within the automaton.
    pub id: StateId,
    /// Whether this is the designated start state. At most one state of a [`Dfa`] has
    /// this set, which [`Dfa::add_state`] enforces.
    pub is_start: bool,
    /// Whether the state is accepting.
    pub is_accept: bool,
    /// Horizontal layout hint, carried for graphical front ends and never interpreted.
    pub x: f64,
    /// Vertical layout hint, see [`State::x`].
    pub y: f64,
}

/// A deterministic finite automaton over an ordered alphabet of symbol strings.
///
/// The transition function is a map keyed by `(from, symbol)`, so determinism holds by
/// construction: inserting a transition for an already present pair overwrites the old
/// target. The function may be partial, see [`Dfa::missing_transitions`] and
/// [`Dfa::complete_with_sink`]. Transitions referencing identifiers that do not occur in
/// [`Dfa::states`] are not rejected, they are simply never traversed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dfa {
    /// The input symbols in the order the algorithms iterate them. The order influences
    /// traversal and refinement step ordering but never the computed results.
    pub alphabet: Vec<String>,
    /// All states, in insertion order.
    pub states: Vec<State>,
    /// The transition function, mapping `(from, symbol)` to the successor identifier.
    pub transitions: BTreeMap<(StateId, String), StateId>,
}

impl Dfa {
    /// Appends a state. If `is_start` is set, the start flag is first cleared on every
    /// existing state so that at most one start state exists at any time.
    pub fn add_state(
        &mut self,
        id: impl Into<StateId>,
        is_start: bool,
        is_accept: bool,
        x: f64,
        y: f64,
    ) {
        if is_start {
            for state in &mut self.states {
                state.is_start = false;
            }
        }
        self.states.push(State {
            id: id.into(),
            is_start,
            is_accept,
            x,
            y,
        });
    }

    /// Inserts the transition `(from, symbol) -> to`, overwriting any previous target
    /// for the same pair. Neither endpoint nor the symbol is checked for existence.
    pub fn add_transition(
        &mut self,
        from: impl Into<StateId>,
        symbol: impl Into<String>,
        to: impl Into<StateId>,
    ) {
        self.transitions
            .insert((from.into(), symbol.into()), to.into());
    }

    /// Looks up a state by its identifier.
    pub fn get_state(&self, id: &str) -> Option<&State> {
        self.states.iter().find(|s| s.id == id)
    }

    /// Looks up a state by its identifier, mutably.
    pub fn get_state_mut(&mut self, id: &str) -> Option<&mut State> {
        self.states.iter_mut().find(|s| s.id == id)
    }

    /// Returns the designated start state, if one exists.
    pub fn start_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.is_start)
    }

    /// Returns the target of the transition from `from` on `symbol`, if it is defined.
    pub fn successor(&self, from: &str, symbol: &str) -> Option<&StateId> {
        self.transitions.get(&(from.to_string(), symbol.to_string()))
    }

    /// Computes every `(state, symbol)` pair from the cross product of states and
    /// alphabet for which no transition is defined, in state-then-symbol order.
    pub fn missing_transitions(&self) -> Vec<(StateId, String)> {
        let mut missing = Vec::new();
        for state in &self.states {
            for symbol in &self.alphabet {
                if self.successor(&state.id, symbol).is_none() {
                    missing.push((state.id.clone(), symbol.clone()));
                }
            }
        }
        missing
    }

    /// A DFA is complete if every state has a transition for every alphabet symbol.
    pub fn is_complete(&self) -> bool {
        self.missing_transitions().is_empty()
    }

    /// Collects the set of states reachable from the start state by breadth first
    /// traversal over the defined transitions. Returns the empty set if no start
    /// state exists.
    pub fn reachable_states(&self) -> Set<StateId> {
        let mut reachable = Set::default();
        let Some(start) = self.start_state() else {
            return reachable;
        };

        reachable.insert(start.id.clone());
        let mut queue = VecDeque::from([start.id.clone()]);
        while let Some(current) = queue.pop_front() {
            for symbol in &self.alphabet {
                if let Some(next) = self.successor(&current, symbol) {
                    if !reachable.contains(next) {
                        reachable.insert(next.clone());
                        queue.push_back(next.clone());
                    }
                }
            }
        }
        reachable
    }

    /// Drops every state that is not reachable from the start state, then every
    /// transition with an endpoint outside the reachable set. Running this before
    /// minimization keeps dead states out of the partitions.
    pub fn remove_unreachable(&mut self) {
        let reachable = self.reachable_states();
        let before = self.states.len();
        self.states.retain(|s| reachable.contains(&s.id));
        self.transitions
            .retain(|(from, _), to| reachable.contains(from) && reachable.contains(to));
        debug!(
            "removed {} unreachable state(s), {} remain",
            before - self.states.len(),
            self.states.len()
        );
    }

    /// Makes the transition function total by routing every missing `(state, symbol)`
    /// pair to a fresh absorbing sink state which self-loops on every symbol. Does
    /// nothing if the DFA is already complete. The sink identifier is chosen by probing
    /// `sink`, `sink1`, `sink2`, ... until an unused name is found.
    pub fn complete_with_sink(&mut self) {
        let missing = self.missing_transitions();
        if missing.is_empty() {
            return;
        }

        let mut sink = "sink".to_string();
        let mut i = 0;
        while self.get_state(&sink).is_some() {
            i += 1;
            sink = format!("sink{i}");
        }
        trace!("completing {} missing transition(s) into '{sink}'", missing.len());

        self.add_state(sink.clone(), false, false, 0.0, 0.0);
        for (state, symbol) in missing {
            self.add_transition(state, symbol, sink.clone());
        }
        for symbol in self.alphabet.clone() {
            self.add_transition(sink.clone(), symbol, sink.clone());
        }
    }

    /// Empties the automaton entirely.
    pub fn clear(&mut self) {
        self.alphabet.clear();
        self.states.clear();
        self.transitions.clear();
    }

    /// Checks whether `self` and `other` are structurally isomorphic on their reachable
    /// parts, i.e. whether a bijection between their state identifiers exists which maps
    /// start to start, preserves acceptance and commutes with the transition functions.
    /// Identifiers and layout coordinates are ignored. Two automatons without any states
    /// are trivially isomorphic.
    pub fn isomorphic_to(&self, other: &Dfa) -> bool {
        if self.alphabet != other.alphabet || self.states.len() != other.states.len() {
            return false;
        }
        let (mine, theirs) = match (self.start_state(), other.start_state()) {
            (Some(p), Some(q)) => (p, q),
            (None, None) => return self.states.is_empty(),
            _ => return false,
        };
        if mine.is_accept != theirs.is_accept {
            return false;
        }

        let mut map: Bijection<StateId, StateId> = Bijection::new();
        map.insert(mine.id.clone(), theirs.id.clone());
        let mut queue = VecDeque::from([(mine.id.clone(), theirs.id.clone())]);
        while let Some((p, q)) = queue.pop_front() {
            for symbol in &self.alphabet {
                match (self.successor(&p, symbol), other.successor(&q, symbol)) {
                    (None, None) => {}
                    (Some(ps), Some(qs)) => {
                        match (map.get_by_left(ps), map.get_by_right(qs)) {
                            (Some(mapped), _) if mapped != qs => return false,
                            (_, Some(mapped)) if mapped != ps => return false,
                            (Some(_), Some(_)) => {}
                            (None, None) => {
                                let fine = self.get_state(ps).zip(other.get_state(qs)).is_some_and(
                                    |(s, t)| s.is_accept == t.is_accept,
                                );
                                if !fine {
                                    return false;
                                }
                                map.insert(ps.clone(), qs.clone());
                                queue.push_back((ps.clone(), qs.clone()));
                            }
                            _ => return false,
                        }
                    }
                    _ => return false,
                }
            }
        }
        map.len() == self.states.len()
    }

    /// Returns a string representation of the transition table of the automaton, one row
    /// per state and one column per alphabet symbol, with `-` marking undefined
    /// transitions. Start states are prefixed with `->`, accepting states are bolded.
    pub fn build_transition_table(&self) -> String {
        use owo_colors::OwoColorize;

        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("state".to_string()).chain(self.alphabet.iter().cloned()),
        );
        for state in &self.states {
            let mut name = if state.is_accept {
                state.id.bold().to_string()
            } else {
                state.id.clone()
            };
            if state.is_start {
                name = format!("-> {name}");
            }
            let mut row = vec![name];
            for symbol in &self.alphabet {
                row.push(
                    self.successor(&state.id, symbol)
                        .cloned()
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
            builder.push_record(row);
        }
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}
