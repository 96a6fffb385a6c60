use engine::Terminal;
use thiserror::Error;

/// Everything that can go wrong while searching for a move. Terminal-game
/// signals are propagated verbatim and never retried; the remaining
/// variants are recoverable only by the searcher composition layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("the side to move has already won")]
    AlreadyWin,
    #[error("the side to move has already lost")]
    AlreadyLoss,
    #[error("building produced no children to select from")]
    FailedBuilding,
    #[error("the move played was not found in the previous search tree")]
    NotFoundPreviousMove,
}

impl SearchError {
    /// True for the two signals that mean the game is already decided.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SearchError::AlreadyWin | SearchError::AlreadyLoss)
    }
}

impl From<Terminal> for SearchError {
    fn from(terminal: Terminal) -> Self {
        match terminal {
            Terminal::AlreadyWin => SearchError::AlreadyWin,
            Terminal::AlreadyLoss => SearchError::AlreadyLoss,
        }
    }
}
