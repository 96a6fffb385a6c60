use thiserror::Error;

/// Raised by a legality query when the side to move has no legal moves
/// because the game is already decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Terminal {
    #[error("the side to move has already won")]
    AlreadyWin,
    #[error("the side to move has already lost")]
    AlreadyLoss,
}
