use crossterm::event::{KeyCode, KeyEvent, MouseEvent};
use ratatui::Frame;
use tachyonfx::Duration;

use polapack_core::error::InitError;
use polapack_widgets::backdrop::BackdropWidget;

use crate::effects::{self, FxManager};
use crate::screens::error::ErrorScreen;
use crate::screens::game::GameScreen;
use crate::screens::landing::LandingScreen;
use crate::screens::Screen;

/// Top-level screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenPhase {
    Landing,
    Game,
    Error,
}

/// Main application state
pub struct App {
    pub phase: ScreenPhase,
    pub tick: u64,
    pub fx: FxManager,
    prev_phase: Option<ScreenPhase>,

    // Screens
    pub landing: LandingScreen,
    pub game: GameScreen,
    pub error: ErrorScreen,
}

impl App {
    pub fn new() -> Result<Self, InitError> {
        let mut fx = FxManager::default();
        // Title shimmer runs forever on the landing screen
        fx.add_unique_effect("title_shimmer", effects::title_shimmer());

        Ok(Self {
            phase: ScreenPhase::Landing,
            tick: 0,
            fx,
            prev_phase: None,
            landing: LandingScreen::new(),
            game: GameScreen::new()?,
            error: ErrorScreen::new(),
        })
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let dimmed = self.phase == ScreenPhase::Game && self.game.backdrop_dimmed();
        frame.render_widget(BackdropWidget::new(self.tick).dimmed(dimmed), area);

        match self.phase {
            ScreenPhase::Landing => self.landing.render(frame),
            ScreenPhase::Game => self.game.render(frame),
            ScreenPhase::Error => self.error.render(frame),
        }

        // Apply all tachyonfx effects on top of rendered content
        let tick_duration = Duration::from_millis(33); // ~30fps
        let buf = frame.buffer_mut();
        self.fx.process_effects(tick_duration, buf, area);
    }

    /// Handle key event. Returns true if should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Global quit from the landing screen
        if key.code == KeyCode::Char('q') && self.phase == ScreenPhase::Landing {
            return true;
        }

        let action = match self.phase {
            ScreenPhase::Landing => self.landing.handle_key(key),
            ScreenPhase::Game => self.game.handle_key(key),
            ScreenPhase::Error => self.error.handle_key(key),
        };

        self.process_action(action)
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.phase == ScreenPhase::Game {
            let action = self.game.handle_mouse(mouse);
            self.process_action(action);
        }
    }

    pub fn handle_resize(&mut self, _w: u16, _h: u16) {
        // The game screen re-derives its viewport every frame
    }

    pub fn tick(&mut self) {
        self.tick += 1;

        // Detect phase changes and trigger transition effects
        if self.prev_phase != Some(self.phase) {
            self.fx
                .add_unique_effect("screen_transition", effects::screen_transition());

            match self.phase {
                ScreenPhase::Landing => {
                    self.fx
                        .add_unique_effect("title_shimmer", effects::title_shimmer());
                }
                ScreenPhase::Error => {
                    self.fx
                        .add_unique_effect("error_flash", effects::error_flash());
                }
                ScreenPhase::Game => {}
            }

            self.prev_phase = Some(self.phase);
        }

        if self.phase == ScreenPhase::Game {
            let action = self.game.tick(&mut self.fx);
            self.process_action(action);
        }
    }

    /// Process a screen action. Returns true if should quit.
    fn process_action(&mut self, action: Option<ScreenAction>) -> bool {
        match action {
            Some(ScreenAction::Quit) => return true,
            Some(ScreenAction::StartGame) => {
                self.game.restart();
                self.phase = ScreenPhase::Game;
            }
            Some(ScreenAction::ShowError(message)) => {
                self.error.message = message;
                self.phase = ScreenPhase::Error;
            }
            Some(ScreenAction::BackToLanding) => {
                self.phase = ScreenPhase::Landing;
            }
            None => {}
        }

        false
    }
}

/// Actions that screens can return
#[derive(Debug, Clone)]
pub enum ScreenAction {
    Quit,
    StartGame,
    /// A reveal failed; the carousel is already restored, surface the error
    ShowError(String),
    BackToLanding,
}
