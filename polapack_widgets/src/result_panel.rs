use polapack_core::reward::RewardPayload;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::theme::Theme;

/// The reward panel shown after a successful reveal: issued card groups,
/// prize lines, and the packs-left counter.
pub struct ResultPanelWidget<'a> {
    pub payload: &'a RewardPayload,
    /// Show progress in [0, 1]; text stays dim until the fade-in lands.
    pub progress: f32,
}

impl<'a> ResultPanelWidget<'a> {
    pub fn new(payload: &'a RewardPayload) -> Self {
        Self {
            payload,
            progress: 1.0,
        }
    }

    pub fn progress(mut self, progress: f32) -> Self {
        self.progress = progress.clamp(0.0, 1.0);
        self
    }
}

impl<'a> Widget for ResultPanelWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.progress <= 0.0 {
            return;
        }
        let settled = self.progress >= 1.0;
        let bright = |color| {
            if settled {
                Style::default().fg(color)
            } else {
                Style::default().fg(Theme::DIM_TEXT)
            }
        };

        let mut lines = vec![
            Line::from(Span::styled(
                "YOU RECEIVED",
                bright(Theme::GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        for (i, (_, cards)) in self.payload.card_groups().iter().enumerate() {
            if i > 0 {
                lines.push(Line::from(Span::styled(
                    "\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}",
                    Style::default().fg(Theme::DIVIDER),
                )));
            }
            let names: Vec<String> = cards.iter().map(|card| card.name.clone()).collect();
            lines.push(Line::from(Span::styled(
                names.join("  "),
                bright(Theme::BRIGHT_TEXT).add_modifier(Modifier::BOLD),
            )));
            if let Some(prize) = self.payload.prizes.get(i) {
                lines.push(Line::from(Span::styled(
                    prize.description.clone(),
                    bright(Theme::PRIZE),
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Packs left: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                self.payload.packs_left.to_string(),
                bright(Theme::GOLD).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Grand Draw chances: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                self.payload.total_chances.to_string(),
                bright(Theme::SUCCESS),
            ),
        ]));

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}
