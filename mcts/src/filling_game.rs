//! Toy rules collaborator for the test suite: players alternately place a
//! stone on any empty cell of a 3x3 board, and once the board is full the
//! color holding the majority has won. Nine cells means no draws, and
//! every playout ends within nine plies.

use engine::{Color, GameRules, Terminal};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub color: Color,
    pub cell: usize,
}

impl Placement {
    pub fn new(color: Color, cell: usize) -> Self {
        Self { color, cell }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<Color>; 9],
}

impl Board {
    pub fn empty() -> Self {
        Self { cells: [None; 9] }
    }

    pub fn place(&self, mov: &Placement) -> Self {
        let mut cells = self.cells;
        cells[mov.cell] = Some(mov.color);

        Self { cells }
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn count(&self, color: Color) -> usize {
        self.cells
            .iter()
            .filter(|cell| **cell == Some(color))
            .count()
    }

    /// The winning color of a full board. Nine cells, so never a tie.
    pub fn majority(&self) -> Color {
        if self.count(Color::Black) > self.count(Color::White) {
            Color::Black
        } else {
            Color::White
        }
    }
}

/// Builds a board holding the given black and white stones; every other
/// cell stays empty.
pub fn board(black: &[usize], white: &[usize]) -> Board {
    let mut result = Board::empty();
    for &cell in black {
        result = result.place(&Placement::new(Color::Black, cell));
    }
    for &cell in white {
        result = result.place(&Placement::new(Color::White, cell));
    }

    result
}

pub struct FillingRules;

impl FillingRules {
    pub fn new() -> Self {
        Self
    }
}

impl GameRules for FillingRules {
    type Move = Placement;
    type Board = Board;

    fn apply_move(&self, board: &Self::Board, mov: &Self::Move) -> Self::Board {
        board.place(mov)
    }

    fn legal_moves(
        &self,
        board: &Self::Board,
        prev: &Self::Move,
    ) -> Result<Vec<Self::Move>, Terminal> {
        let to_move = prev.color.negate();
        let empty_cells = board.empty_cells();

        if empty_cells.is_empty() {
            return if board.majority() == to_move {
                Err(Terminal::AlreadyWin)
            } else {
                Err(Terminal::AlreadyLoss)
            };
        }

        Ok(empty_cells
            .into_iter()
            .map(|cell| Placement::new(to_move, cell))
            .collect())
    }

    fn move_color(&self, mov: &Self::Move) -> Color {
        mov.color
    }
}
