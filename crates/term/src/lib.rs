//! Terminal renderer.
//!
//! Rendering is split in two so the drawing logic stays testable:
//! - [`game_view`] turns a `GameState` into a [`FrameBuffer`] (pure)
//! - [`renderer`] flushes framebuffers to the terminal with crossterm

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_rgb, GameView, Viewport};
pub use renderer::{encode_changed_lines, encode_full, TerminalRenderer};
