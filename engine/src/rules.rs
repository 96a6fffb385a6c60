use std::fmt::Debug;

use super::color::Color;
use super::terminal::Terminal;

/// The capability contract the search core consumes from a game's rule
/// engine. Board representation, legality and capture/terminal detection
/// all live behind this trait.
pub trait GameRules {
    type Move: Clone + Eq + Debug;
    type Board: Clone;

    /// Applies a move to a board, producing the resulting position.
    fn apply_move(&self, board: &Self::Board, mov: &Self::Move) -> Self::Board;

    /// Legal moves for the color opposing `prev`. Fails with a terminal
    /// signal instead of returning an empty list when the game is decided.
    fn legal_moves(
        &self,
        board: &Self::Board,
        prev: &Self::Move,
    ) -> Result<Vec<Self::Move>, Terminal>;

    fn move_color(&self, mov: &Self::Move) -> Color;
}
