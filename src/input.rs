//! Presentation adapter: normalizes raw input (arrow keys, swipe gestures)
//! into logical directions and drives the engine one move per event.
//!
//! The adapter owns no game state. It forwards each classified event to
//! `Game::apply_move`, redraws the attached `View` after every successful
//! move, and announces the transition into the terminal phase exactly once.
//! Everything is synchronous: one event, one move, run to completion.

use log::{debug, info};
use rand::Rng;

use crate::config::Config;
use crate::engine::Move;
use crate::game::{Game, MoveResult};

/// The four discrete directional key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Up,
    Down,
    Left,
    Right,
}

/// A raw input event from the platform layer.
///
/// Swipe displacement is measured between touch-start and touch-end in the
/// platform's touch coordinates, +x right and +y down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(ArrowKey),
    Swipe { dx: f32, dy: f32 },
}

/// Render/notification surface the adapter drives.
pub trait View {
    /// Redraw board and score. Called once at session start and once per
    /// successful move.
    fn draw(&mut self, game: &Game);

    /// The session just became terminal. Called once per game. Implementations
    /// may delay the user-facing announcement by `Config::notify_delay` to let
    /// a visual transition finish; the delay carries no state.
    fn announce_game_over(&mut self);
}

/// Event-driven bridge between raw input, the engine, and a `View`.
pub struct Adapter<V: View> {
    view: V,
    config: Config,
}

impl<V: View> Adapter<V> {
    pub fn new(view: V) -> Self {
        Self::with_config(view, Config::default())
    }

    pub fn with_config(view: V, config: Config) -> Self {
        Adapter { view, config }
    }

    /// (Re)start the session and draw the opening position.
    pub fn start_session<R: Rng + ?Sized>(&mut self, game: &mut Game, rng: &mut R) {
        game.reset(rng);
        self.view.draw(game);
    }

    /// Process one input event: classify it, apply at most one move, and
    /// redraw on success. Unclassifiable or no-op input is silently ignored.
    pub fn handle_event<R: Rng + ?Sized>(
        &mut self,
        game: &mut Game,
        event: InputEvent,
        rng: &mut R,
    ) -> MoveResult {
        let Some(direction) = self.direction_of(event) else {
            return MoveResult {
                changed: false,
                score: game.score(),
                points: 0,
            };
        };
        let result = game.apply_move(direction, rng);
        if result.changed {
            self.view.draw(game);
            if game.is_terminal() {
                info!("game over, final score {}", result.score);
                self.view.announce_game_over();
            }
        }
        result
    }

    fn direction_of(&self, event: InputEvent) -> Option<Move> {
        match event {
            InputEvent::Key(key) => Some(key_direction(key)),
            InputEvent::Swipe { dx, dy } => classify_swipe(dx, dy, self.config.swipe_threshold),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }
}

/// Map a directional key code 1:1 to its logical direction.
pub fn key_direction(key: ArrowKey) -> Move {
    match key {
        ArrowKey::Up => Move::Up,
        ArrowKey::Down => Move::Down,
        ArrowKey::Left => Move::Left,
        ArrowKey::Right => Move::Right,
    }
}

/// Classify a touch gesture by its dominant displacement axis. Returns `None`
/// when the dominant displacement stays below `threshold` (tap or tremor).
/// An exact diagonal resolves to the horizontal axis.
pub fn classify_swipe(dx: f32, dy: f32, threshold: f32) -> Option<Move> {
    let (magnitude, direction) = if dy.abs() > dx.abs() {
        (dy.abs(), if dy > 0.0 { Move::Down } else { Move::Up })
    } else {
        (dx.abs(), if dx > 0.0 { Move::Right } else { Move::Left })
    };
    if magnitude < threshold {
        debug!("ignoring sub-threshold gesture ({:.1}, {:.1})", dx, dy);
        return None;
    }
    Some(direction)
}
