use std::collections::BTreeSet;

use itertools::{Either, Itertools};
use tracing::{debug, trace};

use crate::{
    dfa::{Dfa, StateId},
    math::{Map, Partition},
};

use super::{BlockSplit, RefinementStep};

/// The partition refinement loop together with the quotient construction. The worklist
/// is seeded with both initial blocks and popped from the back; both choices influence
/// which steps get recorded in which order but not the final partition, and they are
/// kept stable so that traces of identical inputs are identical.
pub(crate) fn hopcroft(input: &Dfa) -> (Dfa, Vec<RefinementStep>) {
    let mut dfa = input.clone();
    dfa.remove_unreachable();

    let (accepting, rejecting): (BTreeSet<StateId>, BTreeSet<StateId>) =
        dfa.states.iter().partition_map(|s| {
            if s.is_accept {
                Either::Left(s.id.clone())
            } else {
                Either::Right(s.id.clone())
            }
        });

    let mut partition: Vec<BTreeSet<StateId>> = Vec::new();
    if !accepting.is_empty() {
        partition.push(accepting);
    }
    if !rejecting.is_empty() {
        partition.push(rejecting);
    }
    let mut worklist = partition.clone();
    let mut history = Vec::new();

    while let Some(splitter) = worklist.pop() {
        trace!(
            "popped splitter of size {}, worklist holds {} block(s)",
            splitter.len(),
            worklist.len()
        );
        for symbol in dfa.alphabet.clone() {
            // X = { q | delta(q, symbol) lands in the splitter }
            let preimage: BTreeSet<StateId> = dfa
                .states
                .iter()
                .filter(|s| {
                    dfa.successor(&s.id, &symbol)
                        .is_some_and(|target| splitter.contains(target))
                })
                .map(|s| s.id.clone())
                .collect();
            if preimage.is_empty() {
                continue;
            }

            let before = partition.clone();
            let mut refined = Vec::with_capacity(partition.len());
            let mut splits = Vec::new();
            for block in &partition {
                let intersection: BTreeSet<StateId> =
                    block.intersection(&preimage).cloned().collect();
                let difference: BTreeSet<StateId> =
                    block.difference(&preimage).cloned().collect();
                if intersection.is_empty() || difference.is_empty() {
                    refined.push(block.clone());
                    continue;
                }

                // a block that still sits in the worklist is replaced by both of its
                // halves, one that does not contributes only the smaller half (ties
                // go to the intersection)
                if let Some(position) = worklist.iter().position(|w| w == block) {
                    worklist.remove(position);
                    worklist.push(intersection.clone());
                    worklist.push(difference.clone());
                } else if intersection.len() <= difference.len() {
                    worklist.push(intersection.clone());
                } else {
                    worklist.push(difference.clone());
                }

                splits.push(BlockSplit {
                    block: block.clone(),
                    intersection: intersection.clone(),
                    difference: difference.clone(),
                });
                refined.push(intersection);
                refined.push(difference);
            }
            partition = refined;

            if !splits.is_empty() {
                trace!("symbol '{symbol}' split {} block(s)", splits.len());
                let explanation = format!(
                    "Refining partition with respect to the splitter under symbol '{symbol}'. {} block(s) were split.",
                    splits.len()
                );
                history.push(RefinementStep {
                    partition_before: Partition::from(before),
                    partition_after: Partition::from(partition.clone()),
                    splitter: splitter.clone(),
                    symbol: symbol.clone(),
                    preimage,
                    splits,
                    explanation,
                });
            }
        }
    }
    debug!(
        "partition stabilized with {} block(s) after {} recorded step(s)",
        partition.len(),
        history.len()
    );

    (quotient(&dfa, &partition), history)
}

/// Builds the minimized automaton from the final partition. Every block becomes one
/// state `Q{index}` which is a start (accepting) state iff any of its members was; the
/// new states are laid out on a circle purely for the benefit of graphical front ends.
/// Transitions are projected through an arbitrary representative member, which is sound
/// because all members of a final block are transition equivalent for every symbol.
fn quotient(dfa: &Dfa, partition: &[BTreeSet<StateId>]) -> Dfa {
    let mut minimized = Dfa {
        alphabet: dfa.alphabet.clone(),
        ..Default::default()
    };

    let (center_x, center_y, radius) = (400.0, 300.0, 200.0);
    let mut block_ids: Map<StateId, StateId> = Map::default();
    for (index, block) in partition.iter().enumerate() {
        let id = format!("Q{index}");
        let is_start = block
            .iter()
            .any(|q| dfa.get_state(q).is_some_and(|s| s.is_start));
        let is_accept = block
            .iter()
            .any(|q| dfa.get_state(q).is_some_and(|s| s.is_accept));
        for member in block {
            block_ids.insert(member.clone(), id.clone());
        }

        let angle = 2.0 * std::f64::consts::PI * index as f64 / partition.len() as f64;
        minimized.add_state(
            id,
            is_start,
            is_accept,
            center_x + radius * angle.cos(),
            center_y + radius * angle.sin(),
        );
    }

    for block in partition {
        let Some(representative) = block.iter().next() else {
            continue;
        };
        let from = block_ids[representative].clone();
        for symbol in &dfa.alphabet {
            if let Some(target) = dfa.successor(representative, symbol) {
                if let Some(to) = block_ids.get(target) {
                    minimized.add_transition(from.clone(), symbol.clone(), to.clone());
                }
            }
        }
    }
    minimized
}
