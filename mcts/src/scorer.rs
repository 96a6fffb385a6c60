use generational_arena::Index;

use crate::tree::Tree;

/// Maps a node to a real-valued priority used during tree descent. Scores
/// are relative to the node's siblings; higher is better for the player
/// choosing at the parent.
pub trait Scorer<M, B> {
    fn score(&self, tree: &Tree<M, B>, node: Index) -> f64;
}

/// Pure exploitation: the node's observed win rate.
#[derive(Clone, Copy, Debug, Default)]
pub struct WinRateScorer;

impl WinRateScorer {
    pub fn new() -> Self {
        Self
    }
}

impl<M, B> Scorer<M, B> for WinRateScorer {
    fn score(&self, tree: &Tree<M, B>, node: Index) -> f64 {
        tree.node(node).state().win_rate()
    }
}

/// Upper confidence bound: win rate plus an exploration bonus that shrinks
/// as the node absorbs visits.
#[derive(Clone, Copy, Debug)]
pub struct UcbScorer {
    factor: f64,
}

impl UcbScorer {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl<M, B> Scorer<M, B> for UcbScorer {
    fn score(&self, tree: &Tree<M, B>, node: Index) -> f64 {
        let state = tree.node(node).state();
        let win_rate = state.win_rate();

        // Unvisited nodes rate infinite; the bonus term is skipped so
        // untried moves are exhausted before any exploitation.
        if state.game_count() == 0 {
            return win_rate;
        }

        let parent_visits = tree
            .node(node)
            .parent()
            .map(|parent| tree.node(parent).state().game_count())
            .unwrap_or_else(|| state.game_count());

        let shift =
            self.factor * ((parent_visits as f64).ln() / state.game_count() as f64).sqrt();

        win_rate + shift
    }
}
