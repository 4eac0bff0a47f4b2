//! GameView: maps a `GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{engine, GameState};
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::PieceColor;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BOARD_BG: Rgb = Rgb::new(30, 45, 130);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const HELP: [&str; 5] = [
    "arrows move",
    "up/x   rotate",
    "enter  drop",
    "r      restart",
    "q      quit",
];

/// Draws the board, the falling piece and the score panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, state: &GameState, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board = state.board();
        // Oversized boards saturate and get clipped by the framebuffer.
        let board_w = (board.cols() as u16).saturating_mul(self.cell_w);
        let board_h = (board.rows() as u16).saturating_mul(self.cell_h);
        let frame_w = board_w.saturating_add(2);
        let frame_h = board_h.saturating_add(2);

        let origin_x = viewport.width.saturating_sub(frame_w) / 2;
        let origin_y = viewport.height.saturating_sub(frame_h) / 2;
        let layout = Layout {
            origin_x,
            origin_y,
            frame_w,
            frame_h,
        };

        draw_border(fb, &layout, Style::new(Rgb::new(200, 200, 200), PANEL_BG));

        let empty = Style::new(Rgb::new(70, 90, 180), BOARD_BG).dim();
        for (row, cells) in board.rows_iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                match cell {
                    Some(color) => self.paint_cell(fb, &layout, row as i32, col as i32, '█', piece_style(*color)),
                    None => self.paint_cell(fb, &layout, row as i32, col as i32, '·', empty),
                }
            }
        }

        if state.game_over() {
            self.draw_game_over(fb, &layout);
        } else {
            let active = state.active();

            let ghost = engine::ghost_row(state);
            if ghost != active.row {
                let ghost_style = Style::new(Rgb::new(150, 150, 170), BOARD_BG).dim();
                for (r, c) in active.shape.filled_cells() {
                    self.paint_cell(fb, &layout, ghost + r, active.col + c, '░', ghost_style);
                }
            }

            for (r, c) in active.board_cells() {
                self.paint_cell(fb, &layout, r, c, '█', piece_style(active.color).bold());
            }
        }

        self.draw_side_panel(fb, state, &layout, viewport);
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, viewport, &mut fb);
        fb
    }

    /// Paint one board cell; coordinates off the board are skipped.
    fn paint_cell(&self, fb: &mut FrameBuffer, layout: &Layout, row: i32, col: i32, ch: char, style: Style) {
        if row < 0 || col < 0 {
            return;
        }
        let px = layout
            .origin_x
            .saturating_add(1)
            .saturating_add((col as u16).saturating_mul(self.cell_w));
        let py = layout
            .origin_y
            .saturating_add(1)
            .saturating_add((row as u16).saturating_mul(self.cell_h));
        let right = layout.origin_x.saturating_add(layout.frame_w) - 1;
        let bottom = layout.origin_y.saturating_add(layout.frame_h) - 1;
        if px.saturating_add(self.cell_w) > right || py.saturating_add(self.cell_h) > bottom {
            return;
        }
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, state: &GameState, layout: &Layout, viewport: Viewport) {
        let panel_x = layout.origin_x.saturating_add(layout.frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = Style::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = layout.origin_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, state.score(), value);
        y = y.saturating_add(2);

        for line in HELP {
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, layout: &Layout) {
        let style = Style::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let mid_y = layout.origin_y.saturating_add(layout.frame_h / 2);
        let inner_w = layout.frame_w.saturating_sub(2);

        // Blank band behind the text.
        fb.fill_rect(layout.origin_x.saturating_add(1), mid_y.saturating_sub(1), inner_w, 3, ' ', style);
        put_centred(fb, layout, mid_y, "GAME OVER", style);
        put_centred(fb, layout, mid_y.saturating_add(1), "r: restart", style.dim());
    }
}

struct Layout {
    origin_x: u16,
    origin_y: u16,
    frame_w: u16,
    frame_h: u16,
}

fn draw_border(fb: &mut FrameBuffer, layout: &Layout, style: Style) {
    let (x, y, w, h) = (layout.origin_x, layout.origin_y, layout.frame_w, layout.frame_h);
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn put_centred(fb: &mut FrameBuffer, layout: &Layout, y: u16, text: &str, style: Style) {
    let text_w = text.chars().count() as u16;
    let x = layout
        .origin_x
        .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, style);
}

/// RGB for a piece color.
pub fn piece_rgb(color: PieceColor) -> Rgb {
    match color {
        PieceColor::Red => Rgb::new(220, 60, 60),
        PieceColor::Yellow => Rgb::new(240, 220, 80),
        PieceColor::Magenta => Rgb::new(210, 80, 210),
        PieceColor::Pink => Rgb::new(255, 160, 200),
        PieceColor::Cyan => Rgb::new(80, 220, 220),
        PieceColor::Green => Rgb::new(100, 220, 120),
        PieceColor::Orange => Rgb::new(255, 165, 0),
    }
}

fn piece_style(color: PieceColor) -> Style {
    Style::new(piece_rgb(color), BOARD_BG)
}
