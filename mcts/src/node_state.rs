use std::fmt::{self, Display, Formatter};

use crate::game_result::GameResult;

/// Per-node visit and win counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeState {
    game_count: usize,
    win_count: usize,
}

impl NodeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_counts(game_count: usize, win_count: usize) -> Self {
        debug_assert!(win_count <= game_count);

        Self {
            game_count,
            win_count,
        }
    }

    pub fn game_count(&self) -> usize {
        self.game_count
    }

    pub fn win_count(&self) -> usize {
        self.win_count
    }

    /// An unvisited node rates as positive infinity so it always out-ranks
    /// every visited sibling during selection.
    pub fn win_rate(&self) -> f64 {
        if self.game_count == 0 {
            f64::INFINITY
        } else {
            self.win_count as f64 / self.game_count as f64
        }
    }

    /// The same record seen from the opponent's perspective.
    pub fn invert(&self) -> Self {
        Self {
            game_count: self.game_count,
            win_count: self.game_count - self.win_count,
        }
    }

    /// Plain summation of both counters. Associative and commutative, so
    /// parallel results can be folded in any order.
    pub fn update(&mut self, other: &NodeState) {
        self.game_count += other.game_count;
        self.win_count += other.win_count;
    }

    pub fn add_result(&mut self, result: GameResult) {
        self.game_count += 1;
        if result.is_win() {
            self.win_count += 1;
        }
    }
}

impl From<GameResult> for NodeState {
    fn from(result: GameResult) -> Self {
        let mut state = NodeState::new();
        state.add_result(result);
        state
    }
}

impl Display for NodeState {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.win_count, self.game_count)
    }
}
