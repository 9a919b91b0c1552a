//! Game session: owned board + score + the playing/terminal state machine.
//!
//! The engine module resolves individual moves; `Game` strings them into a
//! session. All randomness (tile spawns) comes from an injected RNG so
//! sessions can be replayed deterministically.

use rand::Rng;
use serde::Serialize;

use crate::engine::{Board, Move, Score};

/// Session lifecycle. `Terminal` is absorbing until the next `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Terminal,
}

/// Outcome of a move attempt.
///
/// `changed` is false for rejected input (the direction moved nothing); such
/// moves spawn no tile and leave the score untouched. `points` is the merge
/// total earned by this move alone, for render deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoveResult {
    pub changed: bool,
    pub score: Score,
    pub points: Score,
}

impl MoveResult {
    fn rejected(score: Score) -> Self {
        MoveResult {
            changed: false,
            score,
            points: 0,
        }
    }
}

/// One game of 2048: a 4x4 board, a running score, and a phase flag.
///
/// Instances are independent; nothing is shared or global, so multiple
/// sessions can coexist (and tests never fight over state).
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    score: Score,
    phase: Phase,
}

impl Game {
    /// Start a fresh session: empty board, two spawned tiles, score 0.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut game = Game {
            board: Board::EMPTY,
            score: 0,
            phase: Phase::Playing,
        };
        game.reset(rng);
        game
    }

    /// Adopt an existing board position with score 0. The phase is derived
    /// from the position itself.
    pub fn from_board(board: Board) -> Self {
        let phase = if board.is_stuck() {
            Phase::Terminal
        } else {
            Phase::Playing
        };
        Game {
            board,
            score: 0,
            phase,
        }
    }

    /// Restart: clear the board, spawn two tiles, zero the score. Valid in
    /// either phase.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board = Board::EMPTY.with_random_tile(rng).with_random_tile(rng);
        self.score = 0;
        self.phase = Phase::Playing;
    }

    /// Resolve one directional move.
    ///
    /// If at least one tile slid or merged: merge points are added to the
    /// score, one tile is spawned, and the terminal flag is recomputed.
    /// Otherwise the move is a no-op and the session is untouched.
    pub fn apply_move<R: Rng + ?Sized>(&mut self, direction: Move, rng: &mut R) -> MoveResult {
        if self.phase == Phase::Terminal {
            return MoveResult::rejected(self.score);
        }
        let (moved, points) = self.board.shift_scored(direction);
        if moved == self.board {
            // A shift that changes nothing cannot have merged anything.
            debug_assert_eq!(points, 0);
            return MoveResult::rejected(self.score);
        }
        self.board = moved.with_random_tile(rng);
        self.score += points;
        if self.board.is_stuck() {
            self.phase = Phase::Terminal;
        }
        MoveResult {
            changed: true,
            score: self.score,
            points,
        }
    }

    /// The current board position.
    #[inline]
    pub fn board(&self) -> Board {
        self.board
    }

    /// The accumulated session score.
    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True iff the board is full and no merge remains in any direction.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }
}
