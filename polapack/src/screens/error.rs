use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use polapack_widgets::theme::Theme;

use crate::app::ScreenAction;
use crate::screens::Screen;

/// Shown when a reward request fails or times out. The carousel has already
/// been restored by then; from here the player can try again.
pub struct ErrorScreen {
    pub message: String,
}

impl ErrorScreen {
    pub fn new() -> Self {
        Self {
            message: String::new(),
        }
    }
}

impl Screen for ErrorScreen {
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Percentage(30),
            Constraint::Length(8),
            Constraint::Percentage(30),
            Constraint::Min(3),
        ])
        .split(area);

        let lines = vec![
            Line::from(Span::styled(
                "SOMETHING WENT WRONG",
                Style::default()
                    .fg(Theme::ERROR)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                self.message.clone(),
                Style::default().fg(Theme::MUTED_TEXT),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Your packs are safe. Nothing was opened.",
                Style::default().fg(Theme::DIM_TEXT),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[Enter] Try Again  [Esc] Back",
                Style::default().fg(Theme::GOLD),
            )),
        ];

        let content = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(content, chunks[1]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        match key.code {
            KeyCode::Enter => Some(ScreenAction::StartGame),
            KeyCode::Esc => Some(ScreenAction::BackToLanding),
            _ => None,
        }
    }
}
