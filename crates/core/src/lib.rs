//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and nothing else: no terminal,
//! no clock, no I/O. Given the same piece source it plays out identically.
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven tetromino shapes and matrix rotation
//! - [`board`]: fixed-size grid with row clearing
//! - [`game_state`]: the falling piece plus board, score and game-over flag
//! - [`engine`]: legality, movement, rotation, locking, spawning
//! - [`rng`]: injectable piece sources
//! - [`controller`]: tick and input dispatch over one owned `GameState`
//!
//! # Game Rules
//!
//! - Pieces are picked uniformly at random and spawn at the top centre.
//! - Rotation is counter-clockwise about the matrix centre with no wall
//!   kicks; clockwise is three counter-clockwise steps.
//! - A piece that cannot fall on a tick locks; every full row is removed and
//!   scores one point.
//! - If the next piece does not fit, the game is over until restarted.
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Controller, Phase, SequenceSource};
//! use blockfall_types::{GameAction, PieceKind};
//!
//! let mut game = Controller::new(14, 10, SequenceSource::repeat(PieceKind::O));
//! assert_eq!(game.state().active().col, 4);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::HardDrop);
//! game.tick(); // locks, spawns the next O
//!
//! assert_eq!(game.phase(), Phase::Playing);
//! assert_eq!(game.state().board().occupied_count(), 4);
//! ```

pub mod board;
pub mod controller;
pub mod engine;
pub mod game_state;
pub mod pieces;
pub mod rng;

pub use blockfall_types as types;

pub use board::Board;
pub use controller::{Controller, ControllerEvent, Phase};
pub use engine::{is_legal, LockEvent};
pub use game_state::{ActivePiece, GameState};
pub use pieces::{base_shape, Shape};
pub use rng::{PieceSource, SequenceSource, SimpleRng};
