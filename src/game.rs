use serde::Serialize;

use crate::board::{Board, GRID_HEIGHT, GRID_WIDTH};
use crate::error::InputError;
use crate::piece::{ActivePiece, TetrominoType};
use crate::rng::piece_index;

// ============================================================================
// Configuration
// ============================================================================

/// Gravity period in milliseconds.
pub const TICK_RATE_MS: u64 = 500;
/// Points per cleared row.
pub const SCORE_MULTIPLIER: u32 = 50;

pub const SPAWN_X: i32 = 4;
pub const SPAWN_Y: i32 = -1;

// ============================================================================
// Input
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

/// Raw `{axis, amount}` intent as produced by a key binding or the timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Movement {
    pub axis: Axis,
    pub amount: i32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Input {
    Left,
    Right,
    Down,
    Rotate,
    Restart,
}

impl Input {
    /// Anchor offset requested by the input.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Input::Left => (-1, 0),
            Input::Right => (1, 0),
            Input::Down => (0, 1),
            Input::Rotate | Input::Restart => (0, 0),
        }
    }
}

impl TryFrom<Movement> for Input {
    type Error = InputError;

    fn try_from(movement: Movement) -> Result<Self, Self::Error> {
        match (movement.axis, movement.amount) {
            (Axis::X, -1) => Ok(Input::Left),
            (Axis::X, 1) => Ok(Input::Right),
            (Axis::X, 0) => Ok(Input::Restart),
            (Axis::Y, 1) => Ok(Input::Down),
            (Axis::Y, 0) => Ok(Input::Rotate),
            (axis, amount) => Err(InputError::Unsupported { axis, amount }),
        }
    }
}

impl From<Input> for Movement {
    fn from(input: Input) -> Self {
        let (axis, amount) = match input {
            Input::Left => (Axis::X, -1),
            Input::Right => (Axis::X, 1),
            Input::Restart => (Axis::X, 0),
            Input::Down => (Axis::Y, 1),
            Input::Rotate => (Axis::Y, 0),
        };
        Movement { axis, amount }
    }
}

// ============================================================================
// State
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Playing,
    GameOver,
}

/// What a single transition did.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum GameEvent {
    Moved,
    MoveBlocked,
    Rotated,
    RotationBlocked,
    Landed { lines: u32 },
    GameOver,
    Restarted,
    Ignored,
}

/// Immutable game snapshot. `step` never mutates `self`; it builds the next
/// snapshot from it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct GameState {
    pub phase: Phase,
    pub x: i32,
    pub y: i32,
    pub level: u32,
    pub score: u32,
    pub high_score: u32,
    pub board: Board,
    /// Footprint currently stamped on `board`; `None` right after a spawn.
    pub piece: Option<ActivePiece>,
    pub current_piece_index: usize,
    pub current_rotation_index: usize,
    pub next_piece_index: usize,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Playing,
            x: SPAWN_X,
            y: SPAWN_Y,
            level: 0,
            score: 0,
            high_score: 0,
            board: Board::empty(),
            piece: None,
            current_piece_index: 0,
            current_rotation_index: 0,
            next_piece_index: 0,
        }
    }

    /// Fresh game on a prepared board with the given current piece at spawn.
    pub fn with_board(board: Board, current: TetrominoType, next: TetrominoType) -> Self {
        Self {
            board,
            current_piece_index: current.index(),
            next_piece_index: next.index(),
            ..Self::new()
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn current_kind(&self) -> TetrominoType {
        TetrominoType::from_index(self.current_piece_index).unwrap_or(TetrominoType::I)
    }

    pub fn next_kind(&self) -> TetrominoType {
        TetrominoType::from_index(self.next_piece_index).unwrap_or(TetrominoType::I)
    }

    pub fn step(&self, input: Input, random: f64) -> GameState {
        self.step_with_event(input, random).0
    }

    /// Advances one discrete step. `random` is the latest generator output;
    /// it only matters when a new next piece is drawn.
    pub fn step_with_event(&self, input: Input, random: f64) -> (GameState, GameEvent) {
        let drawn = piece_index(random);

        if input == Input::Restart {
            return (self.restarted(drawn), GameEvent::Restarted);
        }
        if self.is_game_over() {
            return (self.clone(), GameEvent::Ignored);
        }

        let (dx, dy) = input.offset();
        let (next_x, next_y) = (self.x + dx, self.y + dy);
        // Inclusive upper bound; the collision checks reject anything past the edge.
        let target_x = next_x.clamp(0, GRID_WIDTH as i32);
        let target_y = next_y.clamp(0, GRID_HEIGHT as i32);

        let lifted = self.lifted_board();

        if input == Input::Rotate {
            return self.rotated(&lifted, target_x, target_y);
        }

        if next_y == 0 && lifted.is_occupied(next_x, next_y) {
            let ended = GameState {
                phase: Phase::GameOver,
                high_score: self.high_score.max(self.score),
                ..self.clone()
            };
            return (ended, GameEvent::GameOver);
        }

        let kind = self.current_kind();
        let candidate = ActivePiece::new(kind, self.current_rotation_index, target_x, target_y);
        let moved_board =
            lifted.stamp_footprint(candidate.blocks, candidate.colour, target_x, target_y);

        match input {
            // A clamped move that stays on the same column never happened.
            Input::Left | Input::Right
                if target_x == self.x || !self.board.can_occupy(&candidate, 0, 0) =>
            {
                return (self.clone(), GameEvent::MoveBlocked);
            }
            Input::Down if !lifted.can_occupy(&candidate, 0, 1) => {
                return self.landed(moved_board, drawn);
            }
            _ => {}
        }

        // Avoid queueing the piece that is already falling.
        let next_piece_index = if self.next_piece_index == self.current_piece_index {
            drawn
        } else {
            self.next_piece_index
        };

        let moved = GameState {
            x: target_x,
            y: target_y,
            board: moved_board,
            piece: Some(candidate),
            next_piece_index,
            ..self.clone()
        };
        (moved, GameEvent::Moved)
    }

    /// Board with the active footprint lifted off.
    fn lifted_board(&self) -> Board {
        match &self.piece {
            Some(piece) => self.board.clear_footprint(piece),
            None => self.board.clone(),
        }
    }

    fn rotated(&self, lifted: &Board, at_x: i32, at_y: i32) -> (GameState, GameEvent) {
        let kind = self.current_kind();
        let rotation = kind.next_rotation(self.current_rotation_index);
        let candidate = ActivePiece::new(kind, rotation, at_x, at_y);

        if !self.board.can_occupy(&candidate, 0, 0) {
            return (self.clone(), GameEvent::RotationBlocked);
        }

        let board =
            lifted.clear_and_stamp(&candidate, candidate.blocks, candidate.colour, at_x, at_y);
        let rotated = GameState {
            board,
            piece: Some(candidate),
            current_rotation_index: rotation,
            ..self.clone()
        };
        (rotated, GameEvent::Rotated)
    }

    /// The piece settled into `settled`: clear rows, score, spawn the queued piece.
    fn landed(&self, settled: Board, drawn: usize) -> (GameState, GameEvent) {
        let (board, lines) = settled.clear_complete_rows();
        let landed = GameState {
            phase: Phase::Playing,
            x: SPAWN_X,
            y: SPAWN_Y,
            level: 0,
            score: self.score + lines * SCORE_MULTIPLIER,
            board,
            piece: None,
            current_piece_index: self.next_piece_index,
            current_rotation_index: 0,
            next_piece_index: drawn,
            ..self.clone()
        };
        (landed, GameEvent::Landed { lines })
    }

    fn restarted(&self, drawn: usize) -> GameState {
        GameState {
            high_score: self.high_score,
            current_piece_index: self.next_piece_index,
            next_piece_index: drawn,
            ..GameState::new()
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
