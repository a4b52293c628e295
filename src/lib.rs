//! Library for modelling deterministic finite automata (DFAs) and minimizing them.
//!
//! A [`dfa::Dfa`] consists of an ordered alphabet of symbol strings, an ordered list of
//! states and a transition function. States carry an identifier, a start flag, an accept
//! flag and a pair of layout coordinates which exist purely for the benefit of graphical
//! front ends; the algorithms in this crate carry them along but never interpret them.
//! The transition function is an associative map keyed by `(state, symbol)` pairs, which
//! makes the automaton deterministic by construction: there is simply no way to represent
//! two competing transitions for the same state and symbol, inserting again overwrites.
//!
//! A DFA may be partial. [`dfa::Dfa::missing_transitions`] reports the undefined
//! `(state, symbol)` pairs and [`dfa::Dfa::complete_with_sink`] materializes an absorbing
//! sink state to make the transition function total. Neither is a precondition for
//! minimization; an undefined transition is treated as a legitimate signal of its own.
//!
//! The centerpiece is [`minimization::minimize`], an implementation of Hopcroft's
//! partition refinement algorithm. Besides the minimized automaton it returns an ordered
//! trace of [`minimization::RefinementStep`]s, one per productive refinement, each
//! snapshotting the partition before and after, the splitter block, the driving symbol,
//! the computed preimage and every block that was cut. The trace is rich enough to replay
//! the entire run and explain why each split occurred, which is what the (out of crate)
//! visual front end does with it.
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use minidfa::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        dfa::{builder::DfaBuilder, Dfa, State, StateId},
        json,
        math::{self, Partition},
        minimization::{minimize, BlockSplit, RefinementStep},
    };
}

/// This module contains some definitions of mathematical objects which are used
/// throughout the crate and do not really fit to the top level.
pub mod math;

/// Defines the automaton model, i.e. states, the transition function and the
/// operations for validating and completing a DFA.
pub mod dfa;

/// Contains the implementation of Hopcroft's partition refinement algorithm
/// together with the step trace it produces.
pub mod minimization;

/// Serialization of automata to and from the persisted JSON shape.
pub mod json;

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    pub fn wiki_dfa() -> Dfa {
        DfaBuilder::default()
            .with_alphabet(["a", "b"])
            .with_accepting(["q2", "q3", "q4"])
            .with_transitions([
                ("q0", "a", "q1"),
                ("q0", "b", "q2"),
                ("q1", "a", "q0"),
                ("q1", "b", "q3"),
                ("q2", "a", "q4"),
                ("q2", "b", "q5"),
                ("q3", "a", "q4"),
                ("q3", "b", "q5"),
                ("q4", "a", "q4"),
                ("q4", "b", "q5"),
                ("q5", "a", "q5"),
                ("q5", "b", "q5"),
            ])
            .into_dfa("q0")
    }
}
