//! GameView: maps a `core::GameSession` into a terminal frame.
//!
//! This module is pure (no I/O). It can be unit-tested. The same `Layout`
//! it draws from is handed to the input layer so pointer coordinates map
//! back to board cells and pool slots.

use crate::core::{can_place, GameSession, ShapeInstance};
use crate::term::fb::{Frame, Rgb, Style};
use crate::types::{ColorTag, BOARD_SIZE, POOL_SIZE};

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

/// UI-local state the view needs beside the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiState {
    /// Board cell the placement preview anchors to (shape origin).
    pub cursor: (i8, i8),
}

impl Default for UiState {
    fn default() -> Self {
        Self { cursor: (4, 4) }
    }
}

/// Screen rectangle of one pool slot's thumbnail area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl SlotRect {
    fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.w && row >= self.y && row < self.y + self.h
    }
}

/// Screen geometry shared between drawing and pointer hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Top-left of the board interior (inside the border).
    pub board_x: u16,
    pub board_y: u16,
    pub cell_w: u16,
    pub cell_h: u16,
    /// Left edge of the side panel.
    pub panel_x: u16,
    pub pool_slots: [SlotRect; POOL_SIZE],
}

impl Layout {
    /// Map a terminal coordinate to a board cell, if it lands on one.
    pub fn board_cell_at(&self, col: u16, row: u16) -> Option<(i8, i8)> {
        if col < self.board_x || row < self.board_y {
            return None;
        }
        let x = (col - self.board_x) / self.cell_w;
        let y = (row - self.board_y) / self.cell_h;
        if x >= BOARD_SIZE as u16 || y >= BOARD_SIZE as u16 {
            return None;
        }
        Some((x as i8, y as i8))
    }

    /// Map a terminal coordinate to a pool slot, if it lands on one.
    pub fn pool_slot_at(&self, col: u16, row: u16) -> Option<usize> {
        self.pool_slots
            .iter()
            .position(|rect| rect.contains(col, row))
    }
}

/// Rows per pool slot: label line plus up to 5 thumbnail rows.
const SLOT_ROWS: u16 = 6;

/// A lightweight terminal renderer for the block puzzle.
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
        Self { cell_w, cell_h }
    }

    /// Compute the screen geometry for a viewport.
    pub fn layout(&self, _viewport: Viewport) -> Layout {
        let board_x = 2;
        let board_y = 2;
        let frame_w = (BOARD_SIZE as u16) * self.cell_w + 2;
        let panel_x = 1 + frame_w + 2;

        let mut pool_slots = [SlotRect::default(); POOL_SIZE];
        let slots_y = board_y;
        for (i, rect) in pool_slots.iter_mut().enumerate() {
            *rect = SlotRect {
                x: panel_x,
                y: slots_y + (i as u16) * SLOT_ROWS,
                w: 5 * self.cell_w + 3,
                h: SLOT_ROWS,
            };
        }

        Layout {
            board_x,
            board_y,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            panel_x,
            pool_slots,
        }
    }

    /// Render the session into a frame.
    pub fn render(&self, session: &GameSession, ui: &UiState, viewport: Viewport) -> Frame {
        let mut frame = Frame::new(viewport.width, viewport.height);
        let layout = self.layout(viewport);

        self.draw_board(&mut frame, session, &layout);
        self.draw_preview(&mut frame, session, ui, &layout);
        self.draw_panel(&mut frame, session, &layout);

        if session.is_stuck() {
            self.draw_overlay_text(&mut frame, &layout, "NO MOVES");
        }

        frame
    }

    fn draw_board(&self, frame: &mut Frame, session: &GameSession, layout: &Layout) {
        let board_px_w = (BOARD_SIZE as u16) * layout.cell_w;
        let board_px_h = (BOARD_SIZE as u16) * layout.cell_h;

        let bg = Style {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(25, 25, 34),
        };
        let border = Style {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
        };

        frame.fill_rect(layout.board_x, layout.board_y, board_px_w, board_px_h, ' ', bg);
        draw_border(
            frame,
            layout.board_x - 1,
            layout.board_y - 1,
            board_px_w + 2,
            board_px_h + 2,
            border,
        );

        for y in 0..BOARD_SIZE as i8 {
            for x in 0..BOARD_SIZE as i8 {
                let cell = session.grid().get(x, y).unwrap_or(None);
                match cell {
                    Some(tag) => self.fill_cell(frame, layout, x, y, '█', tag_style(tag)),
                    None => {
                        let dot = Style {
                            fg: Rgb::new(60, 60, 72),
                            bg: Rgb::new(25, 25, 34),
                        };
                        self.fill_cell(frame, layout, x, y, '·', dot);
                    }
                }
            }
        }
    }

    fn draw_preview(
        &self,
        frame: &mut Frame,
        session: &GameSession,
        ui: &UiState,
        layout: &Layout,
    ) {
        let Some(slot) = session.selected() else {
            // No armed shape: mark the bare cursor cell.
            let cursor = Style {
                fg: Rgb::new(240, 240, 240),
                bg: Rgb::new(60, 60, 72),
            };
            let (cx, cy) = ui.cursor;
            self.fill_cell(frame, layout, cx, cy, '░', cursor);
            return;
        };
        let Some(shape) = session.shape(slot) else {
            return;
        };

        let (ox, oy) = ui.cursor;
        let valid = can_place(shape.cells(), ox, oy, session.grid());
        let style = if valid {
            let mut s = tag_style(shape.color());
            s.bg = Rgb::new(25, 25, 34);
            s
        } else {
            Style {
                fg: Rgb::new(220, 70, 70),
                bg: Rgb::new(25, 25, 34),
            }
        };

        for &(dx, dy) in shape.cells() {
            let x = ox + dx;
            let y = oy + dy;
            if x >= 0 && x < BOARD_SIZE as i8 && y >= 0 && y < BOARD_SIZE as i8 {
                self.fill_cell(frame, layout, x, y, '▒', style);
            }
        }
    }

    fn draw_panel(&self, frame: &mut Frame, session: &GameSession, layout: &Layout) {
        let label = Style {
            fg: Rgb::new(240, 240, 240),
            bg: Rgb::new(0, 0, 0),
        };
        let value = Style {
            fg: Rgb::new(190, 190, 190),
            bg: Rgb::new(0, 0, 0),
        };
        let hint = Style {
            fg: Rgb::new(120, 120, 130),
            bg: Rgb::new(0, 0, 0),
        };

        let x = layout.panel_x;
        frame.put_str(x, layout.board_y - 1, "SCORE", label);
        frame.put_str(x + 6, layout.board_y - 1, &session.score().to_string(), value);

        for (i, rect) in layout.pool_slots.iter().enumerate() {
            let selected = session.selected() == Some(i);
            let marker = if selected { '>' } else { ' ' };
            let slot_label = format!("{}{})", marker, i + 1);
            let style = if selected { label } else { hint };
            frame.put_str(rect.x, rect.y, &slot_label, style);

            if let Some(shape) = session.shape(i) {
                self.draw_thumbnail(frame, shape, rect);
            }
        }

        // Key hints sit under the board, clear of the pool column.
        let hints_x = layout.board_x - 1;
        let hints_y = layout.board_y + (BOARD_SIZE as u16) * layout.cell_h + 2;
        frame.put_str(hints_x, hints_y, "1-3 pick  r rotate", hint);
        frame.put_str(hints_x, hints_y + 1, "enter place  n new", hint);
        let undo_hint = if session.has_undo() {
            "u undo  q quit"
        } else {
            "u undo (empty)  q quit"
        };
        frame.put_str(hints_x, hints_y + 2, undo_hint, hint);
    }

    fn draw_thumbnail(&self, frame: &mut Frame, shape: &ShapeInstance, rect: &SlotRect) {
        let style = Style {
            fg: tag_style(shape.color()).fg,
            bg: Rgb::new(0, 0, 0),
        };
        for &(dx, dy) in shape.cells() {
            let px = rect.x + 3 + (dx as u16) * self.cell_w;
            let py = rect.y + 1 + dy as u16;
            for i in 0..self.cell_w {
                frame.put(px + i, py, '█', style);
            }
        }
    }

    fn fill_cell(
        &self,
        frame: &mut Frame,
        layout: &Layout,
        cell_x: i8,
        cell_y: i8,
        ch: char,
        style: Style,
    ) {
        if cell_x < 0 || cell_y < 0 {
            return;
        }
        let px = layout.board_x + (cell_x as u16) * layout.cell_w;
        let py = layout.board_y + (cell_y as u16) * layout.cell_h;
        frame.fill_rect(px, py, layout.cell_w, layout.cell_h, ch, style);
    }

    fn draw_overlay_text(&self, frame: &mut Frame, layout: &Layout, text: &str) {
        let board_px_w = (BOARD_SIZE as u16) * layout.cell_w;
        let board_px_h = (BOARD_SIZE as u16) * layout.cell_h;
        let text_w = text.chars().count() as u16;
        let x = layout.board_x + board_px_w.saturating_sub(text_w) / 2;
        let y = layout.board_y + board_px_h / 2;
        let style = Style {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(120, 20, 20),
        };
        frame.put_str(x, y, text, style);
    }
}

fn tag_style(tag: ColorTag) -> Style {
    let fg = match tag {
        ColorTag::Amber => Rgb::new(255, 191, 0),
        ColorTag::Azure => Rgb::new(70, 130, 240),
        ColorTag::Coral => Rgb::new(255, 127, 80),
        ColorTag::Jade => Rgb::new(0, 168, 107),
        ColorTag::Lilac => Rgb::new(200, 162, 220),
        ColorTag::Rose => Rgb::new(230, 80, 120),
        ColorTag::Sand => Rgb::new(220, 200, 140),
        ColorTag::Teal => Rgb::new(0, 160, 170),
    };
    Style {
        fg,
        bg: Rgb::new(25, 25, 34),
    }
}

fn draw_border(frame: &mut Frame, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }

    frame.put(x, y, '┌', style);
    frame.put(x + w - 1, y, '┐', style);
    frame.put(x, y + h - 1, '└', style);
    frame.put(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        frame.put(x + dx, y, '─', style);
        frame.put(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        frame.put(x, y + dy, '│', style);
        frame.put(x + w - 1, y + dy, '│', style);
    }
}
