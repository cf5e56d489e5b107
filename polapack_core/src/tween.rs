use std::time::{Duration, Instant};

use serde::Deserialize;

/// Easing curves used by the animation timing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    QuadIn,
    QuadOut,
    CubicOut,
    SineInOut,
    BackIn,
}

impl Easing {
    /// Maps linear progress `t` in [0, 1] to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::CubicOut => 1.0 - (1.0 - t).powi(3),
            Easing::SineInOut => -((std::f32::consts::PI * t).cos() - 1.0) / 2.0,
            Easing::BackIn => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                C3 * t * t * t - C1 * t * t
            }
        }
    }
}

/// Duration, easing and optional start delay for one animation step.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timing {
    pub duration_ms: u64,
    pub easing: Easing,
    #[serde(default)]
    pub delay_ms: u64,
}

impl Timing {
    pub const fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            duration_ms,
            easing,
            delay_ms: 0,
        }
    }

    pub const fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn total(&self) -> Duration {
        Duration::from_millis(self.duration_ms + self.delay_ms)
    }
}

/// A scalar tween: interpolates `from` → `to` over a timing, sampled by
/// wall-clock instant.
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    from: f32,
    to: f32,
    easing: Easing,
    delay: Duration,
    duration: Duration,
    started: Instant,
}

impl Tween {
    pub fn new(from: f32, to: f32, timing: Timing, now: Instant) -> Self {
        Self {
            from,
            to,
            easing: timing.easing,
            delay: Duration::from_millis(timing.delay_ms),
            duration: Duration::from_millis(timing.duration_ms),
            started: now,
        }
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    /// Current value. Holds `from` during the delay and clamps at `to` after
    /// the duration elapses.
    pub fn sample(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed <= self.delay {
            return self.from;
        }
        if self.duration.is_zero() {
            return self.to;
        }
        let t = (elapsed - self.delay).as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * self.easing.apply(t)
    }

    pub fn finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started) >= self.delay + self.duration
    }
}

/// Keyed set of in-flight tweens. Starting a key that is already active
/// replaces (cancels) the old tween; cancelled tweens never report
/// completion, so no stale callback can run against reset state.
#[derive(Debug, Default)]
pub struct TweenBank {
    active: Vec<(&'static str, Tween)>,
}

impl TweenBank {
    pub fn start(&mut self, key: &'static str, tween: Tween) {
        self.cancel(key);
        self.active.push((key, tween));
    }

    pub fn cancel(&mut self, key: &'static str) -> bool {
        let before = self.active.len();
        self.active.retain(|(k, _)| *k != key);
        self.active.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.active.clear();
    }

    pub fn contains(&self, key: &'static str) -> bool {
        self.active.iter().any(|(k, _)| *k == key)
    }

    pub fn value(&self, key: &'static str, now: Instant) -> Option<f32> {
        self.active
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, tween)| tween.sample(now))
    }

    pub fn target(&self, key: &'static str) -> Option<f32> {
        self.active
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, tween)| tween.target())
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Removes finished tweens and returns their keys in start order. Callers
    /// gate phase advances on the returned keys.
    pub fn drain_finished(&mut self, now: Instant) -> Vec<&'static str> {
        let mut done = Vec::new();
        self.active.retain(|(key, tween)| {
            if tween.finished(now) {
                done.push(*key);
                false
            } else {
                true
            }
        });
        done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing(ms: u64) -> Timing {
        Timing::new(ms, Easing::Linear)
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::CubicOut,
            Easing::SineInOut,
            Easing::BackIn,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-5);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_tween_samples_and_clamps() {
        let t0 = Instant::now();
        let tween = Tween::new(0.0, 10.0, timing(100), t0);
        assert_eq!(tween.sample(t0), 0.0);
        let mid = tween.sample(t0 + Duration::from_millis(50));
        assert!((mid - 5.0).abs() < 0.01);
        assert_eq!(tween.sample(t0 + Duration::from_millis(500)), 10.0);
        assert!(tween.finished(t0 + Duration::from_millis(100)));
    }

    #[test]
    fn test_tween_holds_from_during_delay() {
        let t0 = Instant::now();
        let tween = Tween::new(2.0, 8.0, timing(100).with_delay(50), t0);
        assert_eq!(tween.sample(t0 + Duration::from_millis(40)), 2.0);
        assert!(!tween.finished(t0 + Duration::from_millis(120)));
        assert!(tween.finished(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn test_bank_replaces_on_start() {
        let t0 = Instant::now();
        let mut bank = TweenBank::default();
        bank.start("snap", Tween::new(0.0, 1.0, timing(100), t0));
        bank.start("snap", Tween::new(0.0, 5.0, timing(200), t0));
        assert_eq!(bank.target("snap"), Some(5.0));
        // The replaced tween must not surface as a completion.
        let done = bank.drain_finished(t0 + Duration::from_millis(150));
        assert!(done.is_empty());
    }

    #[test]
    fn test_cancelled_tween_never_completes() {
        let t0 = Instant::now();
        let mut bank = TweenBank::default();
        bank.start("drop", Tween::new(0.0, 1.0, timing(100), t0));
        assert!(bank.cancel("drop"));
        let done = bank.drain_finished(t0 + Duration::from_millis(1000));
        assert!(done.is_empty());
        assert!(bank.is_empty());
    }

    #[test]
    fn test_drain_reports_in_start_order() {
        let t0 = Instant::now();
        let mut bank = TweenBank::default();
        bank.start("a", Tween::new(0.0, 1.0, timing(50), t0));
        bank.start("b", Tween::new(0.0, 1.0, timing(80), t0));
        let done = bank.drain_finished(t0 + Duration::from_millis(100));
        assert_eq!(done, vec!["a", "b"]);
    }
}
