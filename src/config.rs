//! Startup configuration.
//!
//! Read once from the environment; nothing changes for the rest of the
//! session. Unparseable values fall back to their defaults.

use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{bail, Result};

use crate::types::{DEFAULT_CANVAS_WIDTH, DEFAULT_COLS, DEFAULT_ROWS, DEFAULT_TICK_MS};

/// Smallest board edge that still fits every piece in every rotation.
pub const MIN_BOARD_DIM: u16 = 4;
/// Largest board edge we agree to draw.
pub const MAX_BOARD_DIM: u16 = 64;
/// Widest board drawing, in terminal columns.
pub const MAX_CANVAS_WIDTH: u16 = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: u16,
    pub cols: u16,
    pub tick_ms: u32,
    /// Board drawing width in terminal columns
    pub canvas_width: u16,
    pub seed: u32,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            tick_ms: DEFAULT_TICK_MS,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            seed: 1,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    ///
    /// - `BLOCKFALL_ROWS`, `BLOCKFALL_COLS`: board size
    /// - `BLOCKFALL_TICK_MS`: gravity interval
    /// - `BLOCKFALL_CANVAS_WIDTH`: board width in terminal columns
    /// - `BLOCKFALL_SEED`: piece sequence seed (default: from the clock)
    /// - `BLOCKFALL_LOG_PATH`: append session events to this file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`GameConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            rows: parse_var(&lookup, "BLOCKFALL_ROWS").unwrap_or(defaults.rows),
            cols: parse_var(&lookup, "BLOCKFALL_COLS").unwrap_or(defaults.cols),
            tick_ms: parse_var(&lookup, "BLOCKFALL_TICK_MS").unwrap_or(defaults.tick_ms),
            canvas_width: parse_var(&lookup, "BLOCKFALL_CANVAS_WIDTH").unwrap_or(defaults.canvas_width),
            seed: parse_var(&lookup, "BLOCKFALL_SEED").unwrap_or_else(clock_seed),
            log_path,
        }
    }

    /// Reject settings the game cannot run with.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("rows", self.rows), ("cols", self.cols)] {
            if !(MIN_BOARD_DIM..=MAX_BOARD_DIM).contains(&value) {
                bail!(
                    "board {} must be between {} and {}, got {}",
                    name,
                    MIN_BOARD_DIM,
                    MAX_BOARD_DIM,
                    value
                );
            }
        }
        if self.canvas_width > MAX_CANVAS_WIDTH {
            bail!(
                "canvas width must be at most {}, got {}",
                MAX_CANVAS_WIDTH,
                self.canvas_width
            );
        }
        if self.tick_ms == 0 {
            bail!("tick interval must be at least 1ms");
        }
        Ok(())
    }

    /// Terminal columns per board cell: `canvas_width / cols`, at least 1.
    pub fn cell_width(&self) -> u16 {
        (self.canvas_width / self.cols.max(1)).max(1)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
