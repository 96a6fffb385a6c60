use engine::GameRules;
use generational_arena::Index;

use crate::builder::BuildStrategy;
use crate::bulk_simulator::BulkSimulator;
use crate::selector::Selector;
use crate::tree::Tree;

/// One MCTS iteration: descend to a leaf with the selector, expand it
/// against the rules collaborator, simulate the expansion result and
/// backpropagate.
pub struct TreeBuilder<SEL, SIM> {
    selector: SEL,
    simulator: SIM,
}

impl<SEL, SIM> TreeBuilder<SEL, SIM> {
    pub fn new(selector: SEL, simulator: SIM) -> Self {
        Self {
            selector,
            simulator,
        }
    }

    fn select_leaf<M, B>(&self, tree: &Tree<M, B>) -> Index
    where
        SEL: Selector<M, B>,
    {
        let mut current = tree.root();

        loop {
            let children = tree.node(current).children();
            if children.is_empty() {
                return current;
            }

            match self.selector.select(tree, children) {
                Some(next) => current = next,
                None => return current,
            }
        }
    }

    /// Materializes the leaf's children from the legal moves. A leaf that
    /// has never been visited, or whose position is already decided, is
    /// not expanded; the leaf itself is handed to the simulator.
    fn expand<E>(&self, rules: &E, tree: &mut Tree<E::Move, E::Board>, leaf: Index) -> Vec<Index>
    where
        E: GameRules,
    {
        if tree.node(leaf).state().game_count() == 0 {
            return vec![leaf];
        }

        let (mov, board) = {
            let node = tree.node(leaf);
            (node.mov().clone(), node.board().clone())
        };

        match rules.legal_moves(&board, &mov) {
            Err(_) => vec![leaf],
            Ok(moves) if moves.is_empty() => vec![leaf],
            Ok(moves) => moves
                .into_iter()
                .map(|mov| {
                    let next = rules.apply_move(&board, &mov);
                    tree.add_child(leaf, mov, next)
                })
                .collect(),
        }
    }
}

impl<E, SEL, SIM> BuildStrategy<E> for TreeBuilder<SEL, SIM>
where
    E: GameRules,
    SEL: Selector<E::Move, E::Board>,
    SIM: BulkSimulator<E>,
{
    fn pass(&self, rules: &E, tree: &mut Tree<E::Move, E::Board>) {
        let leaf = self.select_leaf(tree);
        let expanded = self.expand(rules, tree, leaf);
        let results = self.simulator.simulate_expansion(rules, tree, &expanded);

        for (index, state) in results {
            // One inversion re-expresses the rollout from the parent's
            // viewpoint; update_state inverts again at every ply above.
            tree.update_state(index, state.invert());
        }
    }
}
