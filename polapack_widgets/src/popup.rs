use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Widget};

use crate::theme::Theme;

/// A centered confirmation dialog with a row of selectable options.
pub struct ConfirmPopup {
    pub title: String,
    pub lines: Vec<(String, Style)>,
    pub options: Vec<String>,
    pub selected: usize,
    pub width_percent: u16,
    pub height_percent: u16,
}

impl ConfirmPopup {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            lines: Vec::new(),
            options: Vec::new(),
            selected: 0,
            width_percent: 50,
            height_percent: 35,
        }
    }

    pub fn line(mut self, text: impl Into<String>, style: Style) -> Self {
        self.lines.push((text.into(), style));
        self
    }

    pub fn option(mut self, label: impl Into<String>) -> Self {
        self.options.push(label.into());
        self
    }

    pub fn selected(mut self, selected: usize) -> Self {
        self.selected = selected;
        self
    }

    pub fn size(mut self, width_percent: u16, height_percent: u16) -> Self {
        self.width_percent = width_percent;
        self.height_percent = height_percent;
        self
    }
}

impl Widget for ConfirmPopup {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = area.width * self.width_percent / 100;
        let height = area.height * self.height_percent / 100;
        let popup_area = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        Clear.render(popup_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Theme::GOLD))
            .title(Line::from(Span::styled(
                format!(" {} ", self.title),
                Style::default()
                    .fg(Theme::GOLD)
                    .add_modifier(Modifier::BOLD),
            )))
            .title_alignment(Alignment::Center)
            .padding(Padding::uniform(1))
            .style(Style::default().bg(Theme::PANEL_BG));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        for (i, (text, style)) in self.lines.iter().enumerate() {
            let y = inner.y + i as u16;
            if y >= inner.bottom() {
                break;
            }
            let x = inner.x + inner.width.saturating_sub(text.len() as u16) / 2;
            buf.set_string(x, y, text, *style);
        }

        // Options row along the bottom
        if !self.options.is_empty() && inner.height > 1 {
            let y = inner.bottom() - 1;
            let rendered: Vec<String> = self
                .options
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    if i == self.selected {
                        format!("[ {} ]", label)
                    } else {
                        format!("  {}  ", label)
                    }
                })
                .collect();
            let row = rendered.join("   ");
            let x = inner.x + inner.width.saturating_sub(row.len() as u16) / 2;
            let mut cursor = x;
            for (i, part) in rendered.iter().enumerate() {
                let style = if i == self.selected {
                    Style::default()
                        .fg(Theme::ACTIVE_BORDER)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Theme::MUTED_TEXT)
                };
                buf.set_string(cursor, y, part, style);
                cursor += part.len() as u16 + 3;
            }
        }
    }
}
