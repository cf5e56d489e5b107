use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use polapack_core::carousel::{Carousel, PackCard, ReleaseOutcome};
use polapack_core::config::GameConfig;
use polapack_core::error::InitError;
use polapack_core::geometry::Rect as LayoutRect;
use polapack_core::gesture::Point;
use polapack_core::outcome::{LogOutcomeSink, OutcomeSink};
use polapack_core::reveal::{RevealEvent, RevealSequencer};
use polapack_core::reward::{MockRewardSource, RewardPayload, RewardRequest};
use polapack_widgets::carousel::CarouselWidget;
use polapack_widgets::pocket::PocketWidget;
use polapack_widgets::popup::ConfirmPopup;
use polapack_widgets::result_panel::ResultPanelWidget;
use polapack_widgets::theme::Theme;

use crate::app::ScreenAction;
use crate::effects::{self, FxManager};
use crate::screens::Screen;

/// Artificial latency of the mock reward service.
const MOCK_DELAY: Duration = Duration::from_millis(1200);
/// Minimum time the loader cue stays visible once shown.
const LOADER_MIN: Duration = Duration::from_millis(300);

/// The pack-opening mini-game: carousel, pocket and reveal flow.
pub struct GameScreen {
    carousel: Carousel,
    sequencer: RevealSequencer,
    request: Option<RewardRequest>,
    outcome_sink: LogOutcomeSink,

    payload: Option<RewardPayload>,
    packs_left: u32,

    carousel_hidden: bool,
    pocket_active: bool,
    pocket_dismissed: bool,
    result_on_screen: bool,
    scroll_unlocked: bool,
    outcome_recorded: bool,

    loader_shown_at: Option<Instant>,
    /// Selected option while the open-all confirmation is up.
    confirm_selected: Option<usize>,

    game_area: Rect,
    tick_count: u64,
}

impl GameScreen {
    pub fn new() -> Result<Self, InitError> {
        let cards: Vec<PackCard> = (1..=5)
            .map(|i| PackCard::new(format!("pack-{i}"), format!("PACK {i}")))
            .collect();
        let config = GameConfig::compact();
        let sequencer = RevealSequencer::new(&config);
        let carousel = Carousel::new(cards, config)?;

        Ok(Self {
            carousel,
            sequencer,
            request: None,
            outcome_sink: LogOutcomeSink,
            payload: None,
            packs_left: 8,
            carousel_hidden: false,
            pocket_active: false,
            pocket_dismissed: false,
            result_on_screen: false,
            scroll_unlocked: false,
            outcome_recorded: false,
            loader_shown_at: None,
            confirm_selected: None,
            game_area: Rect::default(),
            tick_count: 0,
        })
    }

    /// Back to a pristine carousel: cancels anything in flight first.
    pub fn restart(&mut self) {
        self.sequencer.reset();
        self.carousel.hard_reset();
        self.request = None;
        self.payload = None;
        self.carousel_hidden = false;
        self.pocket_active = false;
        self.pocket_dismissed = false;
        self.result_on_screen = false;
        self.scroll_unlocked = false;
        self.outcome_recorded = false;
        self.loader_shown_at = None;
        self.confirm_selected = None;
    }

    pub fn backdrop_dimmed(&self) -> bool {
        self.pocket_active && !self.pocket_dismissed
    }

    fn loader_visible(&self, now: Instant) -> bool {
        match self.loader_shown_at {
            Some(shown) => {
                self.request.is_some() || now.saturating_duration_since(shown) < LOADER_MIN
            }
            None => false,
        }
    }

    fn open_controls_enabled(&self) -> bool {
        self.sequencer.is_idle() && !self.result_on_screen && self.packs_left > 0
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<ScreenAction> {
        if self.confirm_selected.is_some() {
            return None;
        }
        let now = Instant::now();
        let point = Point::new(
            mouse.column as f32 - self.game_area.x as f32,
            mouse.row as f32 - self.game_area.y as f32,
        );

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.carousel.begin_gesture(point);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.carousel.move_gesture(point);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let ReleaseOutcome::PocketHit { .. } = self.carousel.end_gesture(now) {
                    if self.sequencer.start_single(now) {
                        self.outcome_recorded = false;
                    } else {
                        // Should not happen: the carousel guards its phase.
                        self.carousel.hard_reset();
                    }
                }
            }
            _ => {}
        }
        None
    }

    pub fn tick(&mut self, fx: &mut FxManager) -> Option<ScreenAction> {
        let now = Instant::now();
        self.tick_count += 1;

        self.carousel.tick(now);
        let mut events = self.sequencer.tick(now);

        let outcome = self.request.as_mut().and_then(|request| request.poll(now));
        if let Some(outcome) = outcome {
            self.request = None;
            events.extend(self.sequencer.resolve(outcome, now));
        }

        let mut action = None;
        for event in events {
            match event {
                RevealEvent::CardDropped => {
                    let active = self.carousel.active_index();
                    self.carousel.hide_card(active);
                }
                RevealEvent::CarouselHidden => {
                    self.carousel_hidden = true;
                    self.pocket_active = true;
                }
                RevealEvent::DispenseStarted(intent) => {
                    let source = MockRewardSource::with_packs(MOCK_DELAY, self.packs_left);
                    self.request = Some(RewardRequest::spawn(
                        source,
                        intent,
                        self.carousel.config().fetch_timeout(),
                        now,
                    ));
                    self.loader_shown_at = Some(now);
                }
                RevealEvent::ResultReady(payload) => {
                    self.packs_left = payload.packs_left;
                    self.payload = Some(payload);
                }
                RevealEvent::RevealStarted => {
                    self.result_on_screen = true;
                    fx.add_unique_effect("result_reveal", effects::result_reveal());
                }
                RevealEvent::Completed => {
                    self.scroll_unlocked = true;
                    self.pocket_dismissed = true;
                    self.pocket_active = false;
                    fx.add_unique_effect("pocket_dismiss", effects::pocket_dismiss());
                    if !self.outcome_recorded {
                        let value = self
                            .payload
                            .as_ref()
                            .map(|payload| {
                                payload
                                    .cards
                                    .iter()
                                    .map(|card| card.group_id.as_str())
                                    .collect::<Vec<_>>()
                                    .join("+")
                            })
                            .unwrap_or_default();
                        self.outcome_sink
                            .reward_outcome(self.sequencer.intent(), &value);
                        self.outcome_recorded = true;
                    }
                }
                RevealEvent::Failed(err) => {
                    self.request = None;
                    self.loader_shown_at = None;
                    self.carousel.hard_reset();
                    self.carousel_hidden = false;
                    self.pocket_active = false;
                    self.pocket_dismissed = false;
                    self.result_on_screen = false;
                    action = Some(ScreenAction::ShowError(err.to_string()));
                }
            }
        }

        action
    }
}

impl Screen for GameScreen {
    fn render(&mut self, frame: &mut Frame) {
        let now = Instant::now();
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Game area
            Constraint::Length(2), // Help
        ])
        .split(area);

        // === Header ===
        let header = Line::from(vec![
            Span::styled(
                "  YEAR-END SPEND ",
                Style::default()
                    .fg(Theme::GOLD)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("\u{2502} ", Style::default().fg(Theme::DIVIDER)),
            Span::styled("Packs left: ", Style::default().fg(Theme::MUTED_TEXT)),
            Span::styled(
                self.packs_left.to_string(),
                Style::default()
                    .fg(Theme::BRIGHT_TEXT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        // === Game area ===
        let game_area = chunks[1];
        self.game_area = game_area;
        self.carousel
            .set_viewport(game_area.width as f32, game_area.height as f32);
        let target = PocketWidget::target_rect(game_area);
        self.carousel.set_pocket(LayoutRect::new(
            target.x.saturating_sub(game_area.x) as f32,
            target.y.saturating_sub(game_area.y) as f32,
            target.width as f32,
            target.height as f32,
        ));

        if !self.pocket_dismissed {
            frame.render_widget(
                PocketWidget::new(self.tick_count)
                    .active(self.pocket_active)
                    .opacity(self.sequencer.pocket_opacity(now)),
                game_area,
            );
        }

        if !self.carousel_hidden {
            let layouts = self.carousel.layouts();
            frame.render_widget(
                CarouselWidget::new(self.carousel.cards(), &layouts)
                    .active(self.carousel.active_index())
                    .opacity(self.sequencer.container_opacity(now))
                    .drop_progress(self.sequencer.drop_progress(now)),
                game_area,
            );
        }

        if self.result_on_screen {
            if let Some(payload) = &self.payload {
                let panel_area = centered(game_area, 44, 14);
                frame.render_widget(
                    ResultPanelWidget::new(payload)
                        .progress(self.sequencer.result_progress(now).unwrap_or(1.0)),
                    panel_area,
                );
            }
        }

        if self.loader_visible(now) {
            let loader = Paragraph::new(Line::from(Span::styled(
                "contacting reward service\u{2026}",
                Style::default().fg(Theme::DIM_TEXT),
            )))
            .alignment(Alignment::Center);
            let loader_y = game_area
                .bottom()
                .saturating_sub(POCKET_CLEARANCE)
                .max(game_area.y);
            let loader_area = Rect::new(game_area.x, loader_y, game_area.width, 1);
            frame.render_widget(loader, loader_area);
        }

        // === Help line ===
        let help = if self.scroll_unlocked {
            Line::from(vec![
                Span::styled("[", Style::default().fg(Theme::DIM_TEXT)),
                Span::styled("R", Style::default().fg(Theme::GOLD)),
                Span::styled("] Open Another  [", Style::default().fg(Theme::DIM_TEXT)),
                Span::styled("Esc", Style::default().fg(Theme::GOLD)),
                Span::styled("] Back", Style::default().fg(Theme::DIM_TEXT)),
            ])
        } else {
            Line::from(vec![
                Span::styled("[", Style::default().fg(Theme::DIM_TEXT)),
                Span::styled("Drag \u{2190}\u{2192}", Style::default().fg(Theme::GOLD)),
                Span::styled("] Browse  [", Style::default().fg(Theme::DIM_TEXT)),
                Span::styled("Drag \u{2193}", Style::default().fg(Theme::GOLD)),
                Span::styled("] Into Pocket  [", Style::default().fg(Theme::DIM_TEXT)),
                Span::styled("A", Style::default().fg(Theme::GOLD)),
                Span::styled("] Open All  [", Style::default().fg(Theme::DIM_TEXT)),
                Span::styled("Esc", Style::default().fg(Theme::GOLD)),
                Span::styled("] Back", Style::default().fg(Theme::DIM_TEXT)),
            ])
        };
        frame.render_widget(
            Paragraph::new(help).alignment(Alignment::Center),
            chunks[2],
        );

        // === Open-all confirmation ===
        if let Some(selected) = self.confirm_selected {
            let popup = ConfirmPopup::new("Open All Packs?")
                .line(
                    format!("This opens all {} remaining packs at once.", self.packs_left),
                    Style::default().fg(Theme::BRIGHT_TEXT),
                )
                .line(
                    "You cannot undo this.".to_string(),
                    Style::default().fg(Theme::MUTED_TEXT),
                )
                .option("Open All")
                .option("Cancel")
                .selected(selected)
                .size(52, 35);
            frame.render_widget(popup, area);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<ScreenAction> {
        let now = Instant::now();

        // Confirmation popup captures input while it is up
        if let Some(selected) = self.confirm_selected {
            match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                    self.confirm_selected = Some(1 - selected);
                }
                KeyCode::Enter => {
                    self.confirm_selected = None;
                    if selected == 0 && self.sequencer.start_all(now) {
                        self.carousel.mark_revealing();
                        self.outcome_recorded = false;
                    }
                }
                KeyCode::Esc => {
                    self.confirm_selected = None;
                }
                _ => {}
            }
            return None;
        }

        match key.code {
            KeyCode::Char('a') | KeyCode::Char('A') => {
                if self.open_controls_enabled() {
                    self.confirm_selected = Some(0);
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.sequencer.is_idle() {
                    self.restart();
                }
            }
            KeyCode::Esc => {
                if self.sequencer.is_idle() {
                    return Some(ScreenAction::BackToLanding);
                }
            }
            _ => {}
        }
        None
    }
}

/// Rows kept clear above the pocket for the loader line.
const POCKET_CLEARANCE: u16 = 6;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
