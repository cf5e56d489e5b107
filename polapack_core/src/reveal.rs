use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::error::RewardError;
use crate::reward::{Open, RewardPayload};
use crate::tween::{Tween, TweenBank};

const CARD_DROP: &str = "card-drop";
const CONTAINER_FADE: &str = "container-fade";
const POCKET_FADE: &str = "pocket-fade";
const RESULT_SHOW: &str = "result-show";

/// Phase of the reveal chain. Strictly forward; the only way back is a full
/// reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Idle,
    /// Active card falling off-screen.
    Dropping,
    /// Carousel container fading out.
    ContainerFading,
    /// Pocket animation running while the reward request is outstanding.
    Dispensing,
    /// Pocket fading away, then the result panel showing.
    Revealing,
}

/// Notifications to the host. The sequencer never touches presentation
/// itself; every visual mutation happens in reaction to one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum RevealEvent {
    /// Drop animation finished; hide the dropped card.
    CardDropped,
    /// Container fade finished; hide the carousel and show the dispense cue.
    CarouselHidden,
    /// Spawn the reward request now. Emitted exactly once per sequence.
    DispenseStarted(Open),
    /// Reward arrived; populate the result panel. The reveal itself still
    /// waits out the dispense floor.
    ResultReady(RewardPayload),
    /// Pocket is gone; the result panel animation is starting.
    RevealStarted,
    /// Sequence finished; unlock scrolling and dismiss the pocket for good.
    Completed,
    /// Request failed or timed out. The sequencer is already back at idle;
    /// restore the carousel and surface the error.
    Failed(RewardError),
}

/// Drives the drop → fade → dispense → reveal chain. Each phase is gated on
/// the previous phase's animation completion; the dispense phase additionally
/// holds until both the reward outcome and the minimum visible-dispense floor
/// have arrived.
#[derive(Debug)]
pub struct RevealSequencer {
    config: GameConfig,
    phase: RevealPhase,
    intent: Open,
    tweens: TweenBank,
    request_started: Option<Instant>,
    staged: Option<RewardPayload>,
    hold_until: Option<Instant>,
}

impl RevealSequencer {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.clone(),
            phase: RevealPhase::Idle,
            intent: Open::One,
            tweens: TweenBank::default(),
            request_started: None,
            staged: None,
            hold_until: None,
        }
    }

    pub fn phase(&self) -> RevealPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == RevealPhase::Idle
    }

    pub fn intent(&self) -> Open {
        self.intent
    }

    /// Begins the single-pack reveal with the card drop. Rejected (state
    /// untouched) unless idle.
    pub fn start_single(&mut self, now: Instant) -> bool {
        if !self.is_idle() {
            tracing::warn!(phase = ?self.phase, "open request rejected mid-reveal");
            return false;
        }
        self.intent = Open::One;
        self.tweens.start(
            CARD_DROP,
            Tween::new(0.0, 1.0, self.config.animations.card_drop, now),
        );
        self.phase = RevealPhase::Dropping;
        tracing::info!("reveal started: single pack");
        true
    }

    /// Begins the open-all reveal. No per-card drop: the chain enters
    /// directly at the container fade.
    pub fn start_all(&mut self, now: Instant) -> bool {
        if !self.is_idle() {
            tracing::warn!(phase = ?self.phase, "open-all request rejected mid-reveal");
            return false;
        }
        self.intent = Open::All;
        self.tweens.start(
            CONTAINER_FADE,
            Tween::new(0.0, 1.0, self.config.animations.container_fade, now),
        );
        self.phase = RevealPhase::ContainerFading;
        tracing::info!("reveal started: all packs");
        true
    }

    /// Delivers the reward outcome. Only meaningful while dispensing; there
    /// is exactly one request per sequence, so a second delivery is ignored.
    pub fn resolve(
        &mut self,
        outcome: Result<RewardPayload, RewardError>,
        now: Instant,
    ) -> Vec<RevealEvent> {
        if self.phase != RevealPhase::Dispensing || self.staged.is_some() {
            return Vec::new();
        }
        match outcome {
            Ok(payload) => {
                let started = self.request_started.unwrap_or(now);
                self.hold_until = Some(started + self.dispense_floor());
                self.staged = Some(payload.clone());
                vec![RevealEvent::ResultReady(payload)]
            }
            Err(err) => {
                tracing::warn!(error = %err, "reveal aborted");
                self.reset();
                vec![RevealEvent::Failed(err)]
            }
        }
    }

    /// Advances whatever is due at `now` and reports what happened.
    pub fn tick(&mut self, now: Instant) -> Vec<RevealEvent> {
        let mut events = Vec::new();

        for key in self.tweens.drain_finished(now) {
            match key {
                CARD_DROP => {
                    events.push(RevealEvent::CardDropped);
                    self.tweens.start(
                        CONTAINER_FADE,
                        Tween::new(0.0, 1.0, self.config.animations.container_fade, now),
                    );
                    self.phase = RevealPhase::ContainerFading;
                }
                CONTAINER_FADE => {
                    events.push(RevealEvent::CarouselHidden);
                    self.request_started = Some(now);
                    self.phase = RevealPhase::Dispensing;
                    events.push(RevealEvent::DispenseStarted(self.intent));
                }
                POCKET_FADE => {
                    events.push(RevealEvent::RevealStarted);
                    self.tweens.start(
                        RESULT_SHOW,
                        Tween::new(0.0, 1.0, self.config.animations.result_show, now),
                    );
                }
                RESULT_SHOW => {
                    events.push(RevealEvent::Completed);
                    self.staged = None;
                    self.phase = RevealPhase::Idle;
                    tracing::info!("reveal completed");
                }
                _ => {}
            }
        }

        // Dispense floor: advance only once the result is in AND the floor
        // has elapsed. Real latency past the floor adds no extra padding.
        if self.phase == RevealPhase::Dispensing && self.staged.is_some() {
            if let Some(hold) = self.hold_until {
                if now >= hold {
                    self.hold_until = None;
                    self.phase = RevealPhase::Revealing;
                    self.tweens.start(
                        POCKET_FADE,
                        Tween::new(1.0, 0.0, self.config.animations.pocket_fade, now),
                    );
                }
            }
        }

        events
    }

    /// Hard reset: cancels every tracked animation before touching any other
    /// state, so no stale completion can fire afterwards. Safe to call twice.
    pub fn reset(&mut self) {
        self.tweens.cancel_all();
        self.phase = RevealPhase::Idle;
        self.request_started = None;
        self.staged = None;
        self.hold_until = None;
    }

    fn dispense_floor(&self) -> Duration {
        match self.intent {
            Open::One => self.config.minimum_dispense(),
            Open::All => self.config.minimum_dispense_all(),
        }
    }

    /// Drop animation progress in [0, 1], while the drop is running.
    pub fn drop_progress(&self, now: Instant) -> Option<f32> {
        self.tweens.value(CARD_DROP, now)
    }

    /// Carousel container opacity while this sequencer owns it.
    pub fn container_opacity(&self, now: Instant) -> f32 {
        match self.phase {
            RevealPhase::Idle | RevealPhase::Dropping => 1.0,
            RevealPhase::ContainerFading => {
                1.0 - self.tweens.value(CONTAINER_FADE, now).unwrap_or(1.0)
            }
            RevealPhase::Dispensing | RevealPhase::Revealing => 0.0,
        }
    }

    /// Pocket opacity through the fade-out at reveal time.
    pub fn pocket_opacity(&self, now: Instant) -> f32 {
        match self.phase {
            RevealPhase::Revealing => self.tweens.value(POCKET_FADE, now).unwrap_or(0.0),
            _ => 1.0,
        }
    }

    /// Result panel show progress in [0, 1], while it animates in.
    pub fn result_progress(&self, now: Instant) -> Option<f32> {
        self.tweens.value(RESULT_SHOW, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn millis(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    fn sequencer() -> RevealSequencer {
        RevealSequencer::new(&GameConfig::default())
    }

    /// Runs the drop + container fade and returns the instant dispensing
    /// began.
    fn run_to_dispense(seq: &mut RevealSequencer, t0: Instant) -> Instant {
        assert!(seq.start_single(t0));
        let t_drop = t0 + millis(600);
        assert_eq!(seq.tick(t_drop), vec![RevealEvent::CardDropped]);
        let t_fade = t_drop + millis(400);
        let events = seq.tick(t_fade);
        assert_eq!(
            events,
            vec![
                RevealEvent::CarouselHidden,
                RevealEvent::DispenseStarted(Open::One)
            ]
        );
        assert_eq!(seq.phase(), RevealPhase::Dispensing);
        t_fade
    }

    #[test]
    fn test_phases_advance_in_order() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        let dispense_at = run_to_dispense(&mut seq, t0);

        let resolved_at = dispense_at + millis(100);
        let events = seq.resolve(Ok(RewardPayload::default()), resolved_at);
        assert_eq!(events, vec![RevealEvent::ResultReady(RewardPayload::default())]);

        // Still dispensing until the floor elapses.
        assert!(seq.tick(resolved_at).is_empty());
        assert_eq!(seq.phase(), RevealPhase::Dispensing);

        let floor_at = dispense_at + millis(2600);
        assert!(seq.tick(floor_at).is_empty());
        assert_eq!(seq.phase(), RevealPhase::Revealing);

        let pocket_done = floor_at + millis(100);
        assert_eq!(seq.tick(pocket_done), vec![RevealEvent::RevealStarted]);

        // Result show: 1000ms delay + 800ms duration.
        let result_done = pocket_done + millis(1800);
        assert_eq!(seq.tick(result_done), vec![RevealEvent::Completed]);
        assert!(seq.is_idle());
    }

    #[test]
    fn test_fast_fetch_waits_out_dispense_floor() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        let dispense_at = run_to_dispense(&mut seq, t0);

        // Instant mock response.
        seq.resolve(Ok(RewardPayload::default()), dispense_at);
        seq.tick(dispense_at + millis(2599));
        assert_eq!(seq.phase(), RevealPhase::Dispensing);
        seq.tick(dispense_at + millis(2600));
        assert_eq!(seq.phase(), RevealPhase::Revealing);
    }

    #[test]
    fn test_slow_fetch_adds_no_extra_padding() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        let dispense_at = run_to_dispense(&mut seq, t0);

        // Latency already past the floor: advance on the next tick.
        let late = dispense_at + millis(4000);
        seq.resolve(Ok(RewardPayload::default()), late);
        seq.tick(late);
        assert_eq!(seq.phase(), RevealPhase::Revealing);
    }

    #[test]
    fn test_failure_resets_and_surfaces_error() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        let dispense_at = run_to_dispense(&mut seq, t0);

        let events = seq.resolve(Err(RewardError::Timeout), dispense_at + millis(50));
        assert_eq!(events, vec![RevealEvent::Failed(RewardError::Timeout)]);
        assert!(seq.is_idle());
        // Nothing lingers after the failure.
        assert!(seq.tick(dispense_at + millis(10_000)).is_empty());
    }

    #[test]
    fn test_open_all_skips_card_drop() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        assert!(seq.start_all(t0));
        assert_eq!(seq.phase(), RevealPhase::ContainerFading);

        let events = seq.tick(t0 + millis(400));
        assert_eq!(
            events,
            vec![
                RevealEvent::CarouselHidden,
                RevealEvent::DispenseStarted(Open::All)
            ]
        );
        assert!(!events.contains(&RevealEvent::CardDropped));
    }

    #[test]
    fn test_open_all_uses_longer_floor() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        seq.start_all(t0);
        let dispense_at = t0 + millis(400);
        seq.tick(dispense_at);
        seq.resolve(Ok(RewardPayload::default()), dispense_at);

        seq.tick(dispense_at + millis(2600));
        assert_eq!(seq.phase(), RevealPhase::Dispensing);
        seq.tick(dispense_at + millis(4600));
        assert_eq!(seq.phase(), RevealPhase::Revealing);
    }

    #[test]
    fn test_second_open_rejected_while_active() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        assert!(seq.start_single(t0));
        assert!(!seq.start_single(t0 + millis(10)));
        assert!(!seq.start_all(t0 + millis(10)));
        assert_eq!(seq.phase(), RevealPhase::Dropping);
    }

    #[test]
    fn test_reset_cancels_in_flight_animations() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        seq.start_single(t0);
        seq.reset();
        // The cancelled drop must never complete.
        assert!(seq.tick(t0 + millis(10_000)).is_empty());
        assert!(seq.is_idle());
    }

    #[test]
    fn test_reset_is_idempotent() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        seq.start_single(t0);
        seq.reset();
        seq.reset();
        assert!(seq.is_idle());
        assert!(seq.drop_progress(t0).is_none());
        assert_eq!(seq.container_opacity(t0), 1.0);
    }

    #[test]
    fn test_resolve_ignored_outside_dispensing() {
        let t0 = Instant::now();
        let mut seq = sequencer();
        assert!(seq
            .resolve(Ok(RewardPayload::default()), t0)
            .is_empty());
        seq.start_single(t0);
        assert!(seq
            .resolve(Ok(RewardPayload::default()), t0 + millis(10))
            .is_empty());
    }
}
