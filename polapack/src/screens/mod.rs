pub mod error;
pub mod game;
pub mod landing;

use crossterm::event::KeyEvent;
use ratatui::Frame;

use crate::app::ScreenAction;

/// Trait for app screens
pub trait Screen {
    fn render(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction>;
}
