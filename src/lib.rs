//! twenty48: a sliding-tile merge puzzle (2048-style) engine
//!
//! This crate provides:
//! - A compact `Board` type with ergonomic methods (`shift`, `shift_scored`, `with_random_tile`, ...)
//! - A `Game` session owning board, score, and the playing/terminal state machine
//! - An input/render adapter (`input` module) mapping arrow keys and swipe
//!   gestures to the four logical directions
//!
//! Quick start:
//! ```
//! use twenty48::engine::{self as GameEngine, Move};
//! use twenty48::game::Game;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Optional one-time table warm-up (tables also initialize lazily)
//! GameEngine::new();
//!
//! // Deterministic session with a seeded RNG
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut game = Game::new(&mut rng);
//! assert_eq!(game.score(), 0);
//! assert_eq!(game.board().count_empty(), 14);
//!
//! let result = game.apply_move(Move::Left, &mut rng);
//! if result.changed {
//!     // A successful move spawns exactly one new tile.
//!     assert!(game.board().count_empty() >= 13);
//! }
//! ```
//!
//! Event-driven loop through the adapter:
//! ```
//! use twenty48::game::Game;
//! use twenty48::input::{Adapter, ArrowKey, InputEvent, View};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! struct Headless;
//! impl View for Headless {
//!     fn draw(&mut self, _game: &Game) {}
//!     fn announce_game_over(&mut self) {}
//! }
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut game = Game::new(&mut rng);
//! let mut adapter = Adapter::new(Headless);
//! adapter.start_session(&mut game, &mut rng);
//! let _ = adapter.handle_event(&mut game, InputEvent::Key(ArrowKey::Left), &mut rng);
//! ```
//!
//! Note: `Board` methods take the RNG explicitly wherever randomness is
//! involved. Prefer a seeded `StdRng` when you need determinism.

pub mod config;
pub mod engine;
pub mod game;
pub mod input;

pub use engine::{Board, Move};
pub use game::{Game, MoveResult};
