use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::theme::Theme;

pub const POCKET_WIDTH: u16 = 21;
pub const POCKET_HEIGHT: u16 = 4;

/// The drop slot at the bottom of the game area. Dragging the active card
/// into this target starts the reveal.
pub struct PocketWidget {
    /// Dispensing cue is running.
    pub active: bool,
    /// Fade-out opacity during the reveal transition.
    pub opacity: f32,
    pub tick: u64,
}

impl PocketWidget {
    pub fn new(tick: u64) -> Self {
        Self {
            active: false,
            opacity: 1.0,
            tick,
        }
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Where the pocket sits inside the game area: bottom center. The same
    /// rectangle feeds the engine's overlap test.
    pub fn target_rect(area: Rect) -> Rect {
        let width = POCKET_WIDTH.min(area.width);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let y = area.bottom().saturating_sub(POCKET_HEIGHT);
        Rect::new(x, y, width, POCKET_HEIGHT)
    }
}

impl Widget for PocketWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.opacity < 0.5 {
            return;
        }
        let rect = Self::target_rect(area);
        if rect.width < 5 || rect.height < 2 {
            return;
        }

        let color = if self.active {
            Theme::POCKET_ACTIVE
        } else {
            Theme::POCKET
        };
        let style = Style::default().fg(color);

        // Slot mouth
        buf.set_string(rect.x, rect.y, "\u{2595}", style); // ▕
        for x in 1..rect.width - 1 {
            buf.set_string(rect.x + x, rect.y, "\u{2581}", style); // ▁
        }
        buf.set_string(rect.x + rect.width - 1, rect.y, "\u{258f}", style); // ▏

        // Body
        for y in 1..rect.height {
            buf.set_string(rect.x, rect.y + y, "\u{2503}", style); // ┃
            for x in 1..rect.width - 1 {
                buf.set_string(rect.x + x, rect.y + y, " ", Style::default());
            }
            buf.set_string(rect.x + rect.width - 1, rect.y + y, "\u{2503}", style);
        }

        let label = if self.active {
            // Animated dispensing cue
            match (self.tick / 8) % 3 {
                0 => "DISPENSING.",
                1 => "DISPENSING..",
                _ => "DISPENSING...",
            }
        } else {
            "DROP HERE"
        };
        let pad = (rect.width as usize).saturating_sub(label.len()) / 2;
        buf.set_string(
            rect.x + pad as u16,
            rect.y + rect.height / 2,
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        );
    }
}
