//! The persisted shape of an automaton: `alphabet` is an ordered list of symbol
//! strings, `states` a list of `{id, start, accept, x, y}` objects and `transitions` a
//! list of `{from, symbol, to}` objects. Reconstruction goes through the regular
//! [`Dfa`] mutators, so last-start-wins and overwrite-on-duplicate-key behave exactly
//! as they do for automatons that were built directly.

use serde::{Deserialize, Serialize};

use crate::dfa::Dfa;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StateRepr {
    id: String,
    #[serde(default)]
    start: bool,
    #[serde(default)]
    accept: bool,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TransitionRepr {
    from: String,
    symbol: String,
    to: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct DfaRepr {
    #[serde(default)]
    alphabet: Vec<String>,
    #[serde(default)]
    states: Vec<StateRepr>,
    #[serde(default)]
    transitions: Vec<TransitionRepr>,
}

/// Serializes the automaton into the pretty-printed persisted shape.
pub fn to_json(dfa: &Dfa) -> String {
    let repr = DfaRepr {
        alphabet: dfa.alphabet.clone(),
        states: dfa
            .states
            .iter()
            .map(|s| StateRepr {
                id: s.id.clone(),
                start: s.is_start,
                accept: s.is_accept,
                x: s.x,
                y: s.y,
            })
            .collect(),
        transitions: dfa
            .transitions
            .iter()
            .map(|((from, symbol), to)| TransitionRepr {
                from: from.clone(),
                symbol: symbol.clone(),
                to: to.clone(),
            })
            .collect(),
    };
    serde_json::to_string_pretty(&repr).expect("serializing an automaton representation cannot fail")
}

/// Reconstructs an automaton from the persisted shape. Alphabet order, state order and
/// flags, layout coordinates and the transition mapping all round-trip losslessly; the
/// only possible error is malformed JSON.
pub fn from_json(json: &str) -> Result<Dfa, serde_json::Error> {
    let repr: DfaRepr = serde_json::from_str(json)?;
    let mut dfa = Dfa {
        alphabet: repr.alphabet,
        ..Default::default()
    };
    for state in repr.states {
        dfa.add_state(state.id, state.start, state.accept, state.x, state.y);
    }
    for transition in repr.transitions {
        dfa.add_transition(transition.from, transition.symbol, transition.to);
    }
    Ok(dfa)
}

#[cfg(test)]
mod tests {
    use super::{from_json, to_json};
    use crate::prelude::*;

    #[test_log::test]
    fn round_trip_preserves_everything() {
        let mut dfa = crate::tests::wiki_dfa();
        dfa.get_state_mut("q3").unwrap().x = 12.5;
        dfa.get_state_mut("q3").unwrap().y = -3.0;

        let restored = from_json(&to_json(&dfa)).unwrap();
        assert_eq!(restored, dfa);
        assert_eq!(restored.alphabet, dfa.alphabet);
        assert_eq!(restored.get_state("q3").unwrap().x, 12.5);
    }

    #[test_log::test]
    fn optional_fields_default_and_duplicates_overwrite() {
        let json = r#"{
            "alphabet": ["a"],
            "states": [{"id": "q0", "start": true}, {"id": "q1"}],
            "transitions": [
                {"from": "q0", "symbol": "a", "to": "q0"},
                {"from": "q0", "symbol": "a", "to": "q1"}
            ]
        }"#;
        let dfa = from_json(json).unwrap();
        let q1 = dfa.get_state("q1").unwrap();
        assert!(!q1.is_start && !q1.is_accept);
        assert_eq!((q1.x, q1.y), (0.0, 0.0));
        // the later entry for (q0, a) wins, exactly as with add_transition
        assert_eq!(dfa.transitions.len(), 1);
        assert_eq!(dfa.successor("q0", "a").unwrap(), "q1");
    }

    #[test_log::test]
    fn malformed_json_is_an_error_not_a_panic() {
        assert!(from_json("{ not json").is_err());
        // an empty object is a valid, empty automaton
        let empty = from_json("{}").unwrap();
        assert!(empty.states.is_empty() && empty.alphabet.is_empty());
    }

    #[test_log::test]
    fn two_start_flags_resolve_to_the_last_one() {
        let json = r#"{
            "alphabet": [],
            "states": [{"id": "a", "start": true}, {"id": "b", "start": true}],
            "transitions": []
        }"#;
        let dfa = from_json(json).unwrap();
        assert!(!dfa.get_state("a").unwrap().is_start);
        assert!(dfa.get_state("b").unwrap().is_start);
    }
}
