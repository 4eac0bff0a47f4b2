//! Session log: one line per controller event, appended to a file.
//!
//! Logging never ends the game. If the file cannot be opened or a write
//! fails, the log quietly switches itself off.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::time::Instant;

use crate::core::ControllerEvent;

pub struct SessionLog<W: Write> {
    out: Option<W>,
    started: Instant,
}

impl SessionLog<BufWriter<File>> {
    /// Append to `path`, or a disabled log when `path` is `None` or the
    /// file cannot be opened.
    pub fn open(path: Option<&str>) -> Self {
        let out = path.and_then(|p| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .ok()
                .map(BufWriter::new)
        });
        Self {
            out,
            started: Instant::now(),
        }
    }
}

impl<W: Write> SessionLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            started: Instant::now(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    /// Write a free-form line (session start/end markers).
    pub fn note(&mut self, message: &str) {
        let ms = self.started.elapsed().as_millis();
        self.write_line(format_args!("{:>8} {}", ms, message));
    }

    pub fn record(&mut self, event: &ControllerEvent) {
        self.note(&describe(event));
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }

    /// The underlying writer, if the log is still enabled
    pub fn into_inner(self) -> Option<W> {
        self.out
    }

    fn write_line(&mut self, line: std::fmt::Arguments<'_>) {
        let Some(out) = self.out.as_mut() else {
            return;
        };
        if writeln!(out, "{}", line).is_err() {
            self.out = None;
        }
    }
}

/// Human-readable form of an event
pub fn describe(event: &ControllerEvent) -> String {
    match event {
        ControllerEvent::Locked(lock) => format!(
            "lock piece={} row={} col={} cleared={}",
            lock.kind.as_str(),
            lock.row,
            lock.col,
            lock.rows_cleared
        ),
        ControllerEvent::GameOver { score } => format!("game_over score={}", score),
        ControllerEvent::Restarted => "restart".to_string(),
    }
}
