use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::theme::Theme;

/// Footprint of a polaroid pack in terminal cells. Matches the compact
/// engine configuration so layout units map 1:1 onto cells.
pub const CARD_WIDTH: u16 = 13;
pub const CARD_HEIGHT: u16 = 9;

/// A face-down polaroid pack: photo window on top, caption strip below.
pub struct PolaroidWidget<'a> {
    pub label: &'a str,
    pub active: bool,
    pub dimmed: bool,
    /// Fan rotation in degrees; rendered as a slant accent, sign only.
    pub tilt: f32,
}

impl<'a> PolaroidWidget<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            active: false,
            dimmed: false,
            tilt: 0.0,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn dimmed(mut self, dimmed: bool) -> Self {
        self.dimmed = dimmed;
        self
    }

    pub fn tilt(mut self, tilt: f32) -> Self {
        self.tilt = tilt;
        self
    }

    fn frame_color(&self) -> ratatui::style::Color {
        if self.active {
            Theme::ACTIVE_BORDER
        } else if self.dimmed {
            Theme::FRAME_DIM
        } else {
            Theme::FRAME
        }
    }
}

impl<'a> Widget for PolaroidWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < CARD_WIDTH || area.height < CARD_HEIGHT {
            return;
        }

        let frame_style = Style::default().fg(self.frame_color());
        let photo_style = Style::default().fg(if self.dimmed {
            Theme::PHOTO_DIM
        } else {
            Theme::PHOTO
        });

        // Frame
        buf.set_string(area.x, area.y, "\u{256d}", frame_style); // ╭
        for x in 1..CARD_WIDTH - 1 {
            buf.set_string(area.x + x, area.y, "\u{2500}", frame_style);
        }
        buf.set_string(area.x + CARD_WIDTH - 1, area.y, "\u{256e}", frame_style); // ╮
        for y in 1..CARD_HEIGHT - 1 {
            buf.set_string(area.x, area.y + y, "\u{2502}", frame_style);
            buf.set_string(area.x + CARD_WIDTH - 1, area.y + y, "\u{2502}", frame_style);
        }
        buf.set_string(area.x, area.y + CARD_HEIGHT - 1, "\u{2570}", frame_style); // ╰
        for x in 1..CARD_WIDTH - 1 {
            buf.set_string(area.x + x, area.y + CARD_HEIGHT - 1, "\u{2500}", frame_style);
        }
        buf.set_string(
            area.x + CARD_WIDTH - 1,
            area.y + CARD_HEIGHT - 1,
            "\u{256f}",
            frame_style,
        ); // ╯

        // Photo window with an undeveloped-film pattern
        for y in 1..CARD_HEIGHT - 3 {
            for x in 1..CARD_WIDTH - 1 {
                let pattern = if (x + y) % 2 == 0 {
                    "\u{2593}"
                } else {
                    "\u{2591}"
                }; // ▓ ░
                buf.set_string(area.x + x, area.y + y, pattern, photo_style);
            }
        }

        // Slant accents hint at the fan rotation
        if self.tilt < -1.0 {
            buf.set_string(area.x + 1, area.y + 1, "\u{2572}", frame_style); // ╲
        } else if self.tilt > 1.0 {
            buf.set_string(area.x + CARD_WIDTH - 2, area.y + 1, "\u{2571}", frame_style); // ╱
        }

        // Caption strip
        let caption_y = area.y + CARD_HEIGHT - 2;
        for x in 1..CARD_WIDTH - 1 {
            buf.set_string(area.x + x, caption_y, " ", Style::default());
        }
        let label_width = (CARD_WIDTH - 2) as usize;
        let label: String = self.label.chars().take(label_width).collect();
        let pad = (label_width.saturating_sub(label.len())) / 2;
        let caption_style = if self.dimmed {
            Style::default().fg(Theme::DIM_TEXT)
        } else {
            Style::default()
                .fg(Theme::CAPTION)
                .add_modifier(Modifier::BOLD)
        };
        buf.set_string(
            area.x + 1 + pad as u16,
            caption_y,
            &label,
            caption_style,
        );
    }
}
