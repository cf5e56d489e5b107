use std::time::Instant;

use crate::config::GameConfig;
use crate::error::InitError;
use crate::geometry::{CardLayout, Geometry, Rect};
use crate::gesture::{GestureKind, GestureSample, GestureSession, Point};
use crate::tween::{Tween, TweenBank};

const OFFSET_SNAP: &str = "offset-snap";
const CARD_RETURN: &str = "card-return";

/// A pack card handle. Identity is stable for the session; display order is
/// insertion order. Cards are only ever hidden/shown, never created or
/// destroyed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackCard {
    pub id: String,
    pub label: String,
}

impl PackCard {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselPhase {
    Idle,
    Dragging,
    /// Offset settling onto an integer index; non-interactive but a new
    /// press may take over.
    SnappingHorizontal,
    /// Active card returning to center after a vertical release.
    SnappingVertical,
    /// A reveal sequence owns the screen; gestures are rejected.
    Revealing,
}

/// What a gesture release resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Settling toward the given index.
    Snapping { target: usize },
    /// Vertical release that did not open the pocket. `missed` when the card
    /// was dragged far enough but landed outside the pocket.
    SnapBack { missed: bool },
    /// Active card released inside the pocket; the reveal may begin.
    PocketHit { card: usize },
    /// No gesture session was live.
    NoGesture,
}

/// The carousel: fractional offset, card collection, gesture wiring and the
/// snap animations. Only this type and the reveal sequencer ever mutate the
/// offset.
#[derive(Debug)]
pub struct Carousel {
    cards: Vec<PackCard>,
    config: GameConfig,
    geometry: Geometry,
    offset: f32,
    phase: CarouselPhase,
    gesture: Option<GestureSession>,
    tweens: TweenBank,
    hidden: Vec<bool>,
    /// Current vertical displacement of the active card from its center.
    drag_dy: f32,
    pocket: Option<Rect>,
}

impl Carousel {
    pub fn new(cards: Vec<PackCard>, config: GameConfig) -> Result<Self, InitError> {
        config.validate()?;
        if cards.is_empty() {
            return Err(InitError::NoCards);
        }
        let geometry = Geometry::new(&config);
        let offset = (cards.len() / 2) as f32;
        let hidden = vec![false; cards.len()];
        Ok(Self {
            cards,
            config,
            geometry,
            offset,
            phase: CarouselPhase::Idle,
            gesture: None,
            tweens: TweenBank::default(),
            hidden,
            drag_dy: 0.0,
            pocket: None,
        })
    }

    pub fn cards(&self) -> &[PackCard] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Index of the card nearest the visual center.
    pub fn active_index(&self) -> usize {
        let max = self.cards.len() as i64 - 1;
        (self.offset.round() as i64).clamp(0, max) as usize
    }

    pub fn active_card(&self) -> &PackCard {
        &self.cards[self.active_index()]
    }

    /// True once the offset has settled on an integer index with no gesture
    /// or snap in flight.
    pub fn is_settled(&self) -> bool {
        self.phase == CarouselPhase::Idle && (self.offset - self.offset.round()).abs() < 1e-3
    }

    /// Resize hook: recomputes base positions only. Never touches the
    /// offset, so it is safe to interleave with an in-flight drag.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.geometry.set_viewport(width, height);
    }

    /// Registers the pocket drop-target rectangle, in the same layout units
    /// as the viewport.
    pub fn set_pocket(&mut self, rect: Rect) {
        self.pocket = Some(rect);
    }

    /// Starts a gesture session. A new press may take over an in-flight snap
    /// (cancelling its tween) but is rejected while a reveal owns the screen.
    pub fn begin_gesture(&mut self, point: Point) -> bool {
        if self.phase == CarouselPhase::Revealing {
            return false;
        }
        self.tweens.cancel(OFFSET_SNAP);
        self.tweens.cancel(CARD_RETURN);
        self.drag_dy = 0.0;
        self.gesture = Some(GestureSession::begin(point));
        self.phase = CarouselPhase::Dragging;
        true
    }

    /// Feeds a pointer move sample. Returns true when the layout changed and
    /// a re-render is due.
    pub fn move_gesture(&mut self, point: Point) -> bool {
        let centered = (self.offset - self.offset.round()).abs() < 1e-3;
        let Some(session) = self.gesture.as_mut() else {
            return false;
        };
        match session.sample(point, centered, &self.config) {
            GestureSample::Ignored => false,
            GestureSample::Horizontal { step_dx } => {
                self.offset -= step_dx / self.config.drag_sensitivity;
                true
            }
            GestureSample::Vertical { drop_dy } => {
                self.drag_dy = drop_dy;
                true
            }
        }
    }

    /// Ends the gesture session and resolves the release.
    pub fn end_gesture(&mut self, now: Instant) -> ReleaseOutcome {
        let Some(session) = self.gesture.take() else {
            return ReleaseOutcome::NoGesture;
        };
        let outcome = match session.kind() {
            GestureKind::Horizontal | GestureKind::Undetermined => {
                let target = self.snap_target(session.total_dx());
                self.tweens.start(
                    OFFSET_SNAP,
                    Tween::new(
                        self.offset,
                        target as f32,
                        self.config.animations.carousel_snap,
                        now,
                    ),
                );
                self.phase = CarouselPhase::SnappingHorizontal;
                ReleaseOutcome::Snapping { target }
            }
            GestureKind::Vertical => {
                if session.total_dy().abs() < self.config.vertical_threshold {
                    self.snap_back(false, now);
                    ReleaseOutcome::SnapBack { missed: false }
                } else if self.pocket_hit() {
                    self.phase = CarouselPhase::Revealing;
                    ReleaseOutcome::PocketHit {
                        card: self.active_index(),
                    }
                } else {
                    self.snap_back(true, now);
                    ReleaseOutcome::SnapBack { missed: true }
                }
            }
        };
        tracing::debug!(?outcome, offset = self.offset as f64, "gesture released");
        outcome
    }

    /// Advances snap animations due at `now`. Settling the horizontal snap
    /// is the only way the offset becomes a clean integer again.
    pub fn tick(&mut self, now: Instant) {
        if let Some(value) = self.tweens.value(OFFSET_SNAP, now) {
            self.offset = value;
        }
        if let Some(value) = self.tweens.value(CARD_RETURN, now) {
            self.drag_dy = value;
        }
        for key in self.tweens.drain_finished(now) {
            match key {
                OFFSET_SNAP => {
                    self.offset = self.offset.round();
                    if self.phase == CarouselPhase::SnappingHorizontal {
                        self.phase = CarouselPhase::Idle;
                    }
                }
                CARD_RETURN => {
                    self.drag_dy = 0.0;
                    if self.phase == CarouselPhase::SnappingVertical {
                        self.phase = CarouselPhase::Idle;
                    }
                }
                _ => {}
            }
        }
    }

    /// Current layout of every card, in display order. Hidden (dropped)
    /// cards come back with `visible: false`; the active card carries its
    /// vertical drag displacement.
    pub fn layouts(&self) -> Vec<(usize, CardLayout)> {
        let active = self.active_index();
        self.cards
            .iter()
            .enumerate()
            .map(|(index, _)| {
                let mut layout = self.geometry.layout_for(index as f32 - self.offset);
                if self.hidden[index] {
                    layout.visible = false;
                }
                if index == active {
                    layout.y += self.drag_dy;
                }
                (index, layout)
            })
            .collect()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Hides a dropped card until the next hard reset.
    pub fn hide_card(&mut self, index: usize) {
        if let Some(slot) = self.hidden.get_mut(index) {
            *slot = true;
        }
    }

    /// Marks the carousel as owned by a reveal sequence (open-all path,
    /// where no release transition does it).
    pub fn mark_revealing(&mut self) {
        self.gesture = None;
        self.phase = CarouselPhase::Revealing;
    }

    /// Hard reset: cancels every tracked animation first, then restores the
    /// pristine carousel (all cards visible, offset re-centered). Safe to
    /// call twice.
    pub fn hard_reset(&mut self) {
        self.tweens.cancel_all();
        self.gesture = None;
        self.drag_dy = 0.0;
        for slot in &mut self.hidden {
            *slot = false;
        }
        self.offset = (self.cards.len() / 2) as f32;
        self.phase = CarouselPhase::Idle;
        tracing::debug!(offset = self.offset as f64, "carousel reset");
    }

    fn snap_target(&self, total_dx: f32) -> usize {
        let current = self.offset.round() as i64;
        let mut target = current;
        if total_dx < -self.config.swipe_threshold {
            target += 1;
        } else if total_dx > self.config.swipe_threshold {
            target -= 1;
        }
        target.clamp(0, self.cards.len() as i64 - 1) as usize
    }

    fn snap_back(&mut self, missed: bool, now: Instant) {
        let timing = if missed {
            self.config.animations.snap_back_extended
        } else {
            self.config.animations.snap_back
        };
        self.tweens
            .start(CARD_RETURN, Tween::new(self.drag_dy, 0.0, timing, now));
        self.phase = CarouselPhase::SnappingVertical;
    }

    /// Bounding-box test between the displaced active card and the pocket.
    fn pocket_hit(&self) -> bool {
        let Some(pocket) = self.pocket else {
            return false;
        };
        let active = self.active_index();
        let mut layout = self.geometry.layout_for(active as f32 - self.offset);
        layout.y += self.drag_dy;
        let card = self.geometry.card_rect(&layout);
        card.bottom() > pocket.top() && card.left() < pocket.right() && card.right() > pocket.left()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn cards(n: usize) -> Vec<PackCard> {
        (0..n)
            .map(|i| PackCard::new(format!("pack-{i}"), format!("Pack {}", i + 1)))
            .collect()
    }

    fn carousel(n: usize) -> Carousel {
        let mut carousel = Carousel::new(cards(n), GameConfig::default()).unwrap();
        carousel.set_viewport(600.0, 800.0);
        carousel
    }

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    /// Drags the centered card straight down by `dy` pixels.
    fn drag_down(carousel: &mut Carousel, dy: f32) {
        assert!(carousel.begin_gesture(Point::new(300.0, 300.0)));
        carousel.move_gesture(Point::new(300.0, 300.0 + dy));
    }

    #[test]
    fn test_new_requires_cards() {
        assert_eq!(
            Carousel::new(Vec::new(), GameConfig::default()).unwrap_err(),
            InitError::NoCards
        );
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = GameConfig {
            angles: vec![0.0],
            ..GameConfig::default()
        };
        assert!(matches!(
            Carousel::new(cards(5), config).unwrap_err(),
            InitError::Config(_)
        ));
    }

    #[test]
    fn test_initial_offset_is_centered() {
        assert_eq!(carousel(5).offset(), 2.0);
        assert_eq!(carousel(4).offset(), 2.0);
        assert_eq!(carousel(1).offset(), 0.0);
    }

    #[test]
    fn test_drag_left_shifts_offset_by_sensitivity() {
        let mut carousel = carousel(5);
        carousel.begin_gesture(Point::new(300.0, 200.0));
        assert!(carousel.move_gesture(Point::new(100.0, 200.0)));
        // 200px of leftward travel at sensitivity 480.
        assert!((carousel.offset() - (2.0 + 200.0 / 480.0)).abs() < 1e-4);
    }

    #[test]
    fn test_swipe_left_release_advances_index() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        carousel.begin_gesture(Point::new(300.0, 200.0));
        carousel.move_gesture(Point::new(100.0, 200.0));
        let outcome = carousel.end_gesture(t0);
        assert_eq!(outcome, ReleaseOutcome::Snapping { target: 3 });

        carousel.tick(t0 + millis(500));
        assert_eq!(carousel.offset(), 3.0);
        assert_eq!(carousel.phase(), CarouselPhase::Idle);
        assert!(carousel.is_settled());
    }

    #[test]
    fn test_short_release_snaps_to_nearest() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        carousel.begin_gesture(Point::new(300.0, 200.0));
        // Past the dead zone but under the swipe threshold.
        carousel.move_gesture(Point::new(280.0, 200.0));
        let outcome = carousel.end_gesture(t0);
        assert_eq!(outcome, ReleaseOutcome::Snapping { target: 2 });
        carousel.tick(t0 + millis(500));
        assert_eq!(carousel.offset(), 2.0);
    }

    #[test]
    fn test_snap_target_clamps_at_last_card() {
        let t0 = Instant::now();
        let mut carousel = carousel(3);
        for _ in 0..4 {
            carousel.begin_gesture(Point::new(300.0, 200.0));
            carousel.move_gesture(Point::new(100.0, 200.0));
            carousel.end_gesture(t0);
            carousel.tick(t0 + millis(500));
        }
        assert_eq!(carousel.offset(), 2.0);
        assert_eq!(carousel.active_index(), 2);
    }

    #[test]
    fn test_tap_release_settles_without_moving() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        carousel.begin_gesture(Point::new(300.0, 200.0));
        let outcome = carousel.end_gesture(t0);
        assert_eq!(outcome, ReleaseOutcome::Snapping { target: 2 });
    }

    #[test]
    fn test_vertical_release_below_threshold_snaps_back() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        drag_down(&mut carousel, 40.0);
        let outcome = carousel.end_gesture(t0);
        assert_eq!(outcome, ReleaseOutcome::SnapBack { missed: false });
        assert_eq!(carousel.phase(), CarouselPhase::SnappingVertical);

        carousel.tick(t0 + millis(280));
        assert_eq!(carousel.phase(), CarouselPhase::Idle);
    }

    #[test]
    fn test_pocket_hit_starts_reveal() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        carousel.set_pocket(Rect::new(200.0, 600.0, 200.0, 100.0));
        drag_down(&mut carousel, 200.0);
        let outcome = carousel.end_gesture(t0);
        assert_eq!(outcome, ReleaseOutcome::PocketHit { card: 2 });
        assert_eq!(carousel.phase(), CarouselPhase::Revealing);
    }

    #[test]
    fn test_pocket_miss_snaps_back_extended() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        // Pocket far off to the left of the card.
        carousel.set_pocket(Rect::new(0.0, 600.0, 50.0, 100.0));
        drag_down(&mut carousel, 200.0);
        let outcome = carousel.end_gesture(t0);
        assert_eq!(outcome, ReleaseOutcome::SnapBack { missed: true });
    }

    #[test]
    fn test_no_pocket_registered_counts_as_miss() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        drag_down(&mut carousel, 200.0);
        assert_eq!(
            carousel.end_gesture(t0),
            ReleaseOutcome::SnapBack { missed: true }
        );
    }

    #[test]
    fn test_gestures_rejected_while_revealing() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        carousel.set_pocket(Rect::new(200.0, 600.0, 200.0, 100.0));
        drag_down(&mut carousel, 200.0);
        carousel.end_gesture(t0);
        assert!(!carousel.begin_gesture(Point::new(300.0, 300.0)));
    }

    #[test]
    fn test_new_press_takes_over_snap() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        carousel.begin_gesture(Point::new(300.0, 200.0));
        carousel.move_gesture(Point::new(100.0, 200.0));
        carousel.end_gesture(t0);

        // Grab again mid-snap: the old tween must be cancelled.
        carousel.tick(t0 + millis(100));
        let mid_offset = carousel.offset();
        assert!(carousel.begin_gesture(Point::new(300.0, 200.0)));
        carousel.tick(t0 + millis(500));
        assert_eq!(carousel.offset(), mid_offset);
        assert_eq!(carousel.phase(), CarouselPhase::Dragging);
    }

    #[test]
    fn test_resize_preserves_offset_mid_drag() {
        let mut carousel = carousel(5);
        carousel.begin_gesture(Point::new(300.0, 200.0));
        carousel.move_gesture(Point::new(150.0, 200.0));
        let offset = carousel.offset();
        carousel.set_viewport(1024.0, 768.0);
        assert_eq!(carousel.offset(), offset);
    }

    #[test]
    fn test_hard_reset_restores_pristine_carousel() {
        let t0 = Instant::now();
        let mut carousel = carousel(5);
        carousel.set_pocket(Rect::new(200.0, 600.0, 200.0, 100.0));
        drag_down(&mut carousel, 200.0);
        carousel.end_gesture(t0);
        carousel.hide_card(2);

        carousel.hard_reset();
        assert_eq!(carousel.offset(), 2.0);
        assert_eq!(carousel.phase(), CarouselPhase::Idle);
        assert!(carousel.layouts().iter().take(5).all(|(i, layout)| {
            // All five cards visible again (within the angle table's reach).
            *i > 4 || layout.visible
        }));
    }

    #[test]
    fn test_hard_reset_is_idempotent() {
        let mut carousel = carousel(5);
        carousel.hide_card(1);
        carousel.hard_reset();
        let offsets = (carousel.offset(), carousel.phase());
        carousel.hard_reset();
        assert_eq!((carousel.offset(), carousel.phase()), offsets);
    }

    #[test]
    fn test_layouts_carry_drag_displacement_on_active_card() {
        let mut carousel = carousel(5);
        drag_down(&mut carousel, 100.0);
        let layouts = carousel.layouts();
        let (_, active_layout) = layouts[2];
        let expected = carousel.geometry().layout_for(0.0).y + 100.0 * 0.65;
        assert!((active_layout.y - expected).abs() < 1e-3);
    }

    #[test]
    fn test_hidden_card_stays_hidden_until_reset() {
        let mut carousel = carousel(5);
        carousel.hide_card(2);
        assert!(!carousel.layouts()[2].1.visible);
        carousel.hard_reset();
        assert!(carousel.layouts()[2].1.visible);
    }
}
