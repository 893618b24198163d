//! GameView: draws a [`GameSnapshot`] into a framebuffer.
//!
//! Pure, no I/O. Board cells are two columns wide so blocks look square in
//! most terminal fonts.

use crate::core::geometry::spawn_positions;
use crate::core::{GameSnapshot, PhaseTag};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{cell_from_value, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal size available for drawing.
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

const WELL_BG: Rgb = Rgb::new(24, 24, 32);
const PANEL_GAP: u16 = 3;
/// Rows given to each preview piece (2 rows of blocks plus a spacer)
const PREVIEW_PITCH: u16 = 3;
/// Leftmost spawn column, subtracted to left-align previews
const SPAWN_LEFT: i8 = 3;

/// Block color per kind
pub fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::from_hex(0x5FF4EA),
        PieceKind::J => Rgb::from_hex(0x1550F8),
        PieceKind::L => Rgb::from_hex(0xEF7C2F),
        PieceKind::O => Rgb::from_hex(0xEFD82B),
        PieceKind::S => Rgb::from_hex(0x62ED2F),
        PieceKind::Z => Rgb::from_hex(0xED3131),
        PieceKind::T => Rgb::from_hex(0xE450F4),
    }
}

/// Screen positions derived from the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    /// Top-left corner of the board frame (border included)
    frame_x: u16,
    frame_y: u16,
    frame_w: u16,
    frame_h: u16,
    /// Side panel origin, if it fits
    panel: Option<(u16, u16)>,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn layout(&self, viewport: Viewport) -> Layout {
        let frame_w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let frame_h = BOARD_HEIGHT as u16 + 2;
        let panel_w = 4 * self.cell_w + 2;

        // Center board and panel together when the panel fits.
        let with_panel = frame_w + PANEL_GAP + panel_w <= viewport.width;
        let total_w = if with_panel {
            frame_w + PANEL_GAP + panel_w
        } else {
            frame_w
        };
        let frame_x = viewport.width.saturating_sub(total_w) / 2;
        let frame_y = viewport.height.saturating_sub(frame_h) / 2;

        Layout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            panel: with_panel.then_some((frame_x + frame_w + PANEL_GAP, frame_y)),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Style::default().glyph(' '));

        let layout = self.layout(viewport);
        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        fb.draw_box(
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                match cell_from_value(value) {
                    Some(kind) => self.draw_block(fb, &layout, x as i8, y as i8, kind),
                    None => self.draw_empty(fb, &layout, x as i8, y as i8),
                }
            }
        }

        if let Some(active) = snap.active {
            for &(x, y) in &active.blocks {
                self.draw_block(fb, &layout, x, y, active.kind);
            }
        }

        if let Some((px, py)) = layout.panel {
            self.draw_panel(fb, snap, px, py);
        }

        if snap.phase == PhaseTag::GameOver {
            let mid = layout.frame_y + layout.frame_h / 2;
            let text = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
            self.center_text(fb, &layout, mid, "GAME OVER", text);
            self.center_text(fb, &layout, mid + 1, "r: restart", text);
        }
    }

    /// Render into a freshly allocated framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn board_origin(&self, layout: &Layout, x: i8, y: i8) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= BOARD_WIDTH as i8 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((
            layout.frame_x + 1 + x as u16 * self.cell_w,
            layout.frame_y + 1 + y as u16,
        ))
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: &Layout, x: i8, y: i8, kind: PieceKind) {
        if let Some((sx, sy)) = self.board_origin(layout, x, y) {
            let style = Style::new(piece_color(kind), WELL_BG).bold();
            fb.fill_rect(sx, sy, self.cell_w, 1, '█', style);
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, layout: &Layout, x: i8, y: i8) {
        if let Some((sx, sy)) = self.board_origin(layout, x, y) {
            let style = Style::new(Rgb::new(70, 70, 84), WELL_BG);
            fb.fill_rect(sx, sy, self.cell_w, 1, ' ', style);
            fb.put_char(sx, sy, '·', style);
        }
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = Style::default().bold();
        let value = Style::default();

        fb.put_str(x, y, "NEXT", label);
        let mut row = y + 1;
        for &kind in snap.preview() {
            self.draw_preview(fb, x, row, kind);
            row += PREVIEW_PITCH;
        }

        for (name, number) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(x, row, name, label);
            fb.put_u32(x, row + 1, number, value);
            row += 3;
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) {
        let style = Style::new(piece_color(kind), Rgb::new(0, 0, 0));
        for &(bx, by) in spawn_positions(kind) {
            let col = x + (bx - SPAWN_LEFT) as u16 * self.cell_w;
            fb.fill_rect(col, y + by as u16, self.cell_w, 1, '█', style);
        }
    }

    fn center_text(&self, fb: &mut FrameBuffer, layout: &Layout, y: u16, text: &str, style: Style) {
        let w = text.chars().count() as u16;
        let x = layout.frame_x + layout.frame_w.saturating_sub(w) / 2;
        fb.put_str(x, y, text, style);
    }
}
