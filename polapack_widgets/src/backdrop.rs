use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Animated night-sky backdrop behind the game. `dimmed` is the darkened
/// layer shown while the pocket owns the screen.
pub struct BackdropWidget {
    pub tick: u64,
    pub dimmed: bool,
}

impl BackdropWidget {
    pub fn new(tick: u64) -> Self {
        Self {
            tick,
            dimmed: false,
        }
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }
}

impl Widget for BackdropWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (base_r, base_g, base_b): (i16, i16, i16) =
            if self.dimmed { (7, 10, 18) } else { (15, 22, 36) };
        let drift = self.tick / 6;

        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                // Slow diagonal shimmer
                let wave =
                    ((x as f64 * 0.21 + y as f64 * 0.43 + drift as f64 * 0.1).sin() * 3.0) as i16;
                let r = (base_r + wave).clamp(0, 255) as u8;
                let g = (base_g + wave / 2).clamp(0, 255) as u8;
                let b = (base_b + wave).clamp(0, 255) as u8;

                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_bg(Color::Rgb(r, g, b));
                }
            }
        }

        if self.dimmed {
            return;
        }

        // Sparse drifting sparkles
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let seed = (x as u64 * 31 + y as u64 * 17 + drift) % 193;
                if seed == 0 {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol("\u{2726}"); // ✦
                        cell.set_fg(Theme::DIM_TEXT);
                    }
                } else if seed == 97 {
                    if let Some(cell) = buf.cell_mut((x, y)) {
                        cell.set_symbol("\u{00b7}"); // ·
                        cell.set_fg(Theme::DIM_TEXT);
                    }
                }
            }
        }
    }
}
