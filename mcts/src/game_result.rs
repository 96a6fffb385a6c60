use engine::Terminal;

/// Binary outcome of a finished playout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
}

impl GameResult {
    pub fn invert(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
        }
    }

    pub fn is_win(self) -> bool {
        matches!(self, GameResult::Win)
    }
}

impl From<Terminal> for GameResult {
    fn from(terminal: Terminal) -> Self {
        match terminal {
            Terminal::AlreadyWin => GameResult::Win,
            Terminal::AlreadyLoss => GameResult::Loss,
        }
    }
}
