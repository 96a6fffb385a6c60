use engine::GameRules;
use generational_arena::Index;

use common::fan_out_join;

use crate::node_state::NodeState;
use crate::simulator::Simulator;
use crate::tree::Tree;

/// Runs simulations over the set of leaves a single expansion produced.
/// Each entry of the returned list pairs a leaf with its own record; the
/// records are never merged across leaves.
pub trait BulkSimulator<E: GameRules> {
    fn simulate_expansion(
        &self,
        rules: &E,
        tree: &Tree<E::Move, E::Board>,
        expanded: &[Index],
    ) -> Vec<(Index, NodeState)>;
}

/// Simulates only the first freshly expanded leaf, so backpropagation
/// touches a single branch per pass.
pub struct FirstNodeSimulator<S> {
    inner: S,
}

impl<S> FirstNodeSimulator<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<E, S> BulkSimulator<E> for FirstNodeSimulator<S>
where
    E: GameRules,
    S: Simulator<E>,
{
    fn simulate_expansion(
        &self,
        rules: &E,
        tree: &Tree<E::Move, E::Board>,
        expanded: &[Index],
    ) -> Vec<(Index, NodeState)> {
        match expanded.first() {
            Some(&first) => {
                let node = tree.node(first);
                let state = self.inner.simulate(rules, node.mov(), node.board());

                vec![(first, state)]
            }
            None => Vec::new(),
        }
    }
}

/// Simulates every freshly expanded leaf concurrently. Results come back
/// in the group's order, one per leaf.
pub struct AllNodesSimulator<S> {
    inner: S,
}

impl<S> AllNodesSimulator<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<E, S> BulkSimulator<E> for AllNodesSimulator<S>
where
    E: GameRules + Sync,
    E::Move: Send + Sync,
    E::Board: Send + Sync,
    S: Simulator<E> + Sync,
{
    fn simulate_expansion(
        &self,
        rules: &E,
        tree: &Tree<E::Move, E::Board>,
        expanded: &[Index],
    ) -> Vec<(Index, NodeState)> {
        fan_out_join(expanded.to_vec(), |index| {
            let node = tree.node(index);
            let state = self.inner.simulate(rules, node.mov(), node.board());

            (index, state)
        })
    }
}
