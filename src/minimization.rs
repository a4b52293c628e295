pub(crate) mod partition_refinement;

use std::collections::BTreeSet;

use crate::{
    dfa::{Dfa, StateId},
    math::Partition,
};

/// Records how a single block was cut by a refinement: the block as it was, the part of
/// it mapping into the splitter under the step's symbol and the remainder. Both sides
/// are non-empty, otherwise the block would not have been cut.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSplit {
    /// The block before the cut.
    pub block: BTreeSet<StateId>,
    /// `block ∩ X`, the members whose transition on the symbol lands in the splitter.
    pub intersection: BTreeSet<StateId>,
    /// `block \ X`, the members whose transition does not land in the splitter.
    pub difference: BTreeSet<StateId>,
}

/// An immutable snapshot of one productive refinement, i.e. one (splitter, symbol) pair
/// under which at least one block was cut. The trace returned by [`minimize`] is an
/// ordered, append-only sequence of these; later steps never alter earlier ones, so the
/// whole run can be replayed and inspected after the fact.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementStep {
    /// The partition as it was when the splitter and symbol were considered.
    pub partition_before: Partition<StateId>,
    /// The partition after all cuts of this step were applied.
    pub partition_after: Partition<StateId>,
    /// The block popped from the worklist that drove this refinement.
    pub splitter: BTreeSet<StateId>,
    /// The alphabet symbol under which the preimage was computed.
    pub symbol: String,
    /// The preimage `X`, every state whose transition on the symbol lands in the splitter.
    pub preimage: BTreeSet<StateId>,
    /// The blocks that were cut, in the order they appeared in the partition.
    pub splits: Vec<BlockSplit>,
    /// A human readable description of what happened in this step.
    pub explanation: String,
}

/// Minimizes the given automaton with Hopcroft's partition refinement algorithm and
/// returns the minimized automaton together with the full refinement trace.
///
/// The input is never mutated; the algorithm works on a private copy from which the
/// unreachable states are pruned first. Completeness is not required: a state without a
/// transition on some symbol simply never occurs in a preimage for that symbol, so two
/// states that no symbol ever distinguishes are merged whether their transition
/// functions are total or not. Degenerate inputs (no states, or no start state so that
/// nothing is reachable) yield an empty automaton and an empty trace.
pub fn minimize(dfa: &Dfa) -> (Dfa, Vec<RefinementStep>) {
    partition_refinement::hopcroft(dfa)
}

impl Dfa {
    /// Minimizes `self` using Hopcroft's partition refinement algorithm, see
    /// [`minimize`].
    pub fn minimize(&self) -> (Dfa, Vec<RefinementStep>) {
        minimize(self)
    }
}
