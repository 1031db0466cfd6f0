use ratatui::prelude::*;

use crate::config::Rgb;
use crate::game::draw::Surface;
use crate::game::Rect as FieldRect;

use super::sprites::SpriteSheet;

/// A braille dot canvas over the logical display.
///
/// Each terminal cell holds 2x4 dots. Logical coordinates are scaled to
/// dots on the way in, so the simulation never sees terminal geometry.
pub struct BrailleCanvas<'a> {
    cols: usize,
    rows: usize,
    // dot-space scale factors
    sx: f32,
    sy: f32,
    bits: Vec<u8>,
    colours: Vec<Color>,
    bg: Color,
    sprites: &'a SpriteSheet,
}

impl<'a> BrailleCanvas<'a> {
    pub fn new(
        cols: usize,
        rows: usize,
        logical_width: f32,
        logical_height: f32,
        sprites: &'a SpriteSheet,
    ) -> Self {
        let bw = (cols * 2) as f32;
        let bh = (rows * 4) as f32;
        Self {
            cols,
            rows,
            sx: if logical_width > 0.0 { bw / logical_width } else { 0.0 },
            sy: if logical_height > 0.0 { bh / logical_height } else { 0.0 },
            bits: vec![0; cols * rows],
            colours: vec![Color::Reset; cols * rows],
            bg: Color::Rgb(0, 0, 5),
            sprites,
        }
    }

    fn dot_width(&self) -> i32 {
        (self.cols * 2) as i32
    }

    fn dot_height(&self) -> i32 {
        (self.rows * 4) as i32
    }

    fn braille_bit(sub_x: usize, sub_y: usize) -> u8 {
        match (sub_x, sub_y) {
            (0, 0) => 0x01,
            (0, 1) => 0x02,
            (0, 2) => 0x04,
            (0, 3) => 0x40,
            (1, 0) => 0x08,
            (1, 1) => 0x10,
            (1, 2) => 0x20,
            (1, 3) => 0x80,
            _ => 0,
        }
    }

    // Returns the cell index and bit for an in-range dot.
    fn locate(&self, bx: i32, by: i32) -> Option<(usize, u8)> {
        if bx < 0 || by < 0 || bx >= self.dot_width() || by >= self.dot_height() {
            return None;
        }
        let (bx, by) = (bx as usize, by as usize);
        let idx = (by / 4) * self.cols + bx / 2;
        Some((idx, Self::braille_bit(bx % 2, by % 4)))
    }

    pub fn set_dot(&mut self, bx: i32, by: i32, colour: Color) {
        if let Some((idx, bit)) = self.locate(bx, by) {
            self.bits[idx] |= bit;
            self.colours[idx] = colour;
        }
    }

    pub fn clear_dot(&mut self, bx: i32, by: i32) {
        if let Some((idx, bit)) = self.locate(bx, by) {
            self.bits[idx] &= !bit;
        }
    }

    /// Logical rect to a half-open dot range, at least one dot each way.
    fn dot_span(&self, r: FieldRect) -> (i32, i32, i32, i32) {
        let x0 = (r.x * self.sx).floor() as i32;
        let y0 = (r.y * self.sy).floor() as i32;
        let x1 = ((r.right() * self.sx).ceil() as i32).max(x0 + 1);
        let y1 = ((r.bottom() * self.sy).ceil() as i32).max(y0 + 1);
        (x0, y0, x1, y1)
    }

    /// Plot a point in logical coordinates.
    pub fn plot(&mut self, x: f32, y: f32, colour: Color) {
        let bx = (x * self.sx) as i32;
        let by = (y * self.sy) as i32;
        self.set_dot(bx, by, colour);
    }

    pub fn into_lines(self) -> Vec<Line<'static>> {
        let bg = self.bg;
        (0..self.rows)
            .map(|row| {
                let spans: Vec<Span<'static>> = (0..self.cols)
                    .map(|col| {
                        let idx = row * self.cols + col;
                        let bits = self.bits[idx];
                        if bits == 0 {
                            Span::styled(" ", Style::default().bg(bg))
                        } else {
                            let ch = char::from_u32(0x2800 + bits as u32).unwrap_or(' ');
                            Span::styled(
                                String::from(ch),
                                Style::default().fg(self.colours[idx]).bg(bg),
                            )
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }
}

pub fn to_colour(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

impl Surface for BrailleCanvas<'_> {
    fn draw_sprite(&mut self, sprite: &str, bounds: FieldRect) {
        let Some(sprite) = self.sprites.get(sprite).copied() else {
            return;
        };
        let (x0, y0, x1, y1) = self.dot_span(bounds);
        let (w, h) = ((x1 - x0) as f32, (y1 - y0) as f32);
        for by in y0..y1 {
            for bx in x0..x1 {
                let u = (bx - x0) as f32 / w;
                let v = (by - y0) as f32 / h;
                if sprite.sample(u, v) {
                    self.set_dot(bx, by, sprite.colour);
                }
            }
        }
    }

    fn fill_rect(&mut self, bounds: FieldRect, colour: Rgb) {
        let (x0, y0, x1, y1) = self.dot_span(bounds);
        let colour = to_colour(colour);
        for by in y0..y1 {
            for bx in x0..x1 {
                self.set_dot(bx, by, colour);
            }
        }
    }

    fn erase_circle(&mut self, cx: f32, cy: f32, radius: f32) {
        let (dcx, dcy) = (cx * self.sx, cy * self.sy);
        let (rx, ry) = (radius * self.sx, radius * self.sy);
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let x_range = (dcx - rx).floor() as i32..=(dcx + rx).ceil() as i32;
        for bx in x_range {
            for by in (dcy - ry).floor() as i32..=(dcy + ry).ceil() as i32 {
                let nx = (bx as f32 + 0.5 - dcx) / rx;
                let ny = (by as f32 + 0.5 - dcy) / ry;
                if nx * nx + ny * ny <= 1.0 {
                    self.clear_dot(bx, by);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_rect_scales_to_dots() {
        let sheet = SpriteSheet::builtin();
        // 10x5 cells = 20x20 dots over a 200x100 field
        let mut canvas = BrailleCanvas::new(10, 5, 200.0, 100.0, &sheet);
        canvas.fill_rect(FieldRect::new(0.0, 0.0, 10.0, 20.0), Rgb(255, 0, 0));
        // one dot wide, four dots tall: the full left column of cell (0, 0)
        assert_eq!(canvas.bits[0], 0x01 | 0x02 | 0x04 | 0x40);
        assert_eq!(canvas.colours[0], Color::Rgb(255, 0, 0));
    }

    #[test]
    fn tiny_rects_still_show() {
        let sheet = SpriteSheet::builtin();
        let mut canvas = BrailleCanvas::new(10, 5, 800.0, 600.0, &sheet);
        canvas.fill_rect(FieldRect::new(0.0, 0.0, 1.0, 1.0), Rgb(1, 2, 3));
        assert_eq!(canvas.bits[0], 0x01);
    }

    #[test]
    fn erase_clears_dots() {
        let sheet = SpriteSheet::builtin();
        let mut canvas = BrailleCanvas::new(10, 5, 20.0, 20.0, &sheet);
        canvas.fill_rect(FieldRect::new(0.0, 0.0, 20.0, 20.0), Rgb(9, 9, 9));
        assert!(canvas.bits.iter().all(|&b| b == 0xFF));
        canvas.erase_circle(10.0, 10.0, 3.0);
        assert_ne!(canvas.bits[2 * 10 + 5], 0xFF);
        assert_eq!(canvas.bits[0], 0xFF);
    }

    #[test]
    fn out_of_range_dots_ignored() {
        let sheet = SpriteSheet::builtin();
        let mut canvas = BrailleCanvas::new(2, 2, 4.0, 8.0, &sheet);
        canvas.set_dot(-1, 0, Color::White);
        canvas.set_dot(4, 0, Color::White);
        canvas.set_dot(0, 8, Color::White);
        assert!(canvas.bits.iter().all(|&b| b == 0));
        assert_eq!(canvas.into_lines().len(), 2);
    }
}
