//! Hand-built positions with a known good answer, used to sanity-check agents.

use tetrimax_engine::{
    BOARD_HEIGHT, BOARD_WIDTH, Board, GameState, PieceKind, Placement, StateError,
};
use tetrimax_search::Agent;

/// Piece injected when a scenario applies the chosen placement.
const NEXT_PIECE: PieceKind = PieceKind::S;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Scenario {
    pub(crate) name: &'static str,
    pub(crate) goal: &'static str,
    pub(crate) board: Board,
    pub(crate) queue: [PieceKind; 3],
    passes: fn(Placement, &GameState) -> bool,
}

#[derive(Debug)]
pub(crate) struct ScenarioReport {
    pub(crate) before: GameState,
    pub(crate) action: Option<Placement>,
    pub(crate) after: Option<GameState>,
    pub(crate) passed: bool,
}

impl Scenario {
    pub(crate) fn initial_state(&self) -> GameState {
        GameState::new(self.board, self.queue, 0)
    }

    /// Asks `agent` for a move, applies it with an S as the next piece and checks the goal.
    pub(crate) fn run(&self, agent: &dyn Agent) -> Result<ScenarioReport, StateError> {
        let before = self.initial_state();
        let action = agent.choose_action(&before)?;
        let Some(placement) = action else {
            return Ok(ScenarioReport {
                before,
                action,
                after: None,
                passed: false,
            });
        };
        let after = before.place(placement, NEXT_PIECE)?;
        let passed = (self.passes)(placement, &after);
        Ok(ScenarioReport {
            before,
            action,
            after: Some(after),
            passed,
        })
    }
}

fn board_from_fn(filled: impl Fn(usize, usize) -> bool) -> Board {
    let cells: Vec<(usize, usize)> = (0..BOARD_HEIGHT)
        .flat_map(|y| (0..BOARD_WIDTH).map(move |x| (y, x)))
        .filter(|&(y, x)| filled(y, x))
        .collect();
    let mut board = Board::EMPTY;
    board.fill_cells(&cells);
    board
}

pub(crate) fn all() -> [Scenario; 4] {
    [
        Scenario {
            name: "Tetris clear",
            goal: "drop the I piece into the empty right column",
            board: board_from_fn(|y, x| y >= 16 && x < 9),
            queue: [PieceKind::I, PieceKind::O, PieceKind::T],
            passes: |_, after| after.lines_cleared() == 4,
        },
        Scenario {
            name: "High tower",
            goal: "keep away from the tower in column 5",
            board: board_from_fn(|y, x| y >= 2 && x == 5),
            queue: [PieceKind::O, PieceKind::T, PieceKind::L],
            passes: |placement, _| placement.column != 5,
        },
        Scenario {
            name: "Rotation required",
            goal: "lay the I piece flat next to the stack",
            board: board_from_fn(|y, x| y >= 17 && x < 5),
            queue: [PieceKind::I, PieceKind::O, PieceKind::T],
            passes: |placement, _| placement.orientation.index() == 1,
        },
        Scenario {
            name: "Hole avoidance",
            goal: "do not bury the hole at (18, 4)",
            board: board_from_fn(|y, x| y >= 17 && x < 5 && (y, x) != (18, 4)),
            queue: [PieceKind::T, PieceKind::L, PieceKind::O],
            passes: |_, after| !after.board().is_filled(18, 4),
        },
    ]
}
