use crate::config::GameConfig;

/// A pointer position sample (mouse or touch), in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Gesture classification. Sticky: once a session leaves `Undetermined` it
/// never changes again for that press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Undetermined,
    Horizontal,
    Vertical,
}

/// What one move sample amounts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSample {
    /// Below the dead zone, or a vertical drag that has not displaced the
    /// card yet. No visual change this sample.
    Ignored,
    /// Horizontal step; the caller shifts the carousel offset by
    /// `-step_dx / drag_sensitivity`.
    Horizontal { step_dx: f32 },
    /// Rubber-banded downward displacement of the active card from center.
    Vertical { drop_dy: f32 },
}

/// One press-to-release pointer session. Created on press, fed every move
/// sample, consumed on release.
#[derive(Debug, Clone)]
pub struct GestureSession {
    start: Point,
    last: Point,
    kind: GestureKind,
}

impl GestureSession {
    pub fn begin(point: Point) -> Self {
        Self {
            start: point,
            last: point,
            kind: GestureKind::Undetermined,
        }
    }

    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    pub fn total_dx(&self) -> f32 {
        self.last.x - self.start.x
    }

    pub fn total_dy(&self) -> f32 {
        self.last.y - self.start.y
    }

    /// Feeds one move sample. `active_is_centered` reports whether the
    /// active card currently sits at the settled center; a vertical intent on
    /// a non-centered card falls back to horizontal.
    pub fn sample(
        &mut self,
        point: Point,
        active_is_centered: bool,
        config: &GameConfig,
    ) -> GestureSample {
        let step_dx = point.x - self.last.x;
        self.last = point;

        if self.kind == GestureKind::Undetermined {
            let abs_dx = self.total_dx().abs();
            let abs_dy = self.total_dy().abs();
            if abs_dx > config.gesture_dead_zone && abs_dx > abs_dy {
                self.kind = GestureKind::Horizontal;
            } else if abs_dy > config.gesture_dead_zone && abs_dy > abs_dx {
                self.kind = if active_is_centered {
                    GestureKind::Vertical
                } else {
                    GestureKind::Horizontal
                };
            } else {
                return GestureSample::Ignored;
            }
            tracing::debug!(kind = ?self.kind, "gesture classified");
        }

        match self.kind {
            GestureKind::Horizontal => GestureSample::Horizontal { step_dx },
            GestureKind::Vertical if self.total_dy() > config.vertical_drag_slack => {
                GestureSample::Vertical {
                    drop_dy: self.total_dy() * config.vertical_drag_multiplier,
                }
            }
            _ => GestureSample::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    #[test]
    fn test_below_dead_zone_stays_undetermined() {
        let config = config();
        let mut session = GestureSession::begin(Point::new(100.0, 100.0));
        let sample = session.sample(Point::new(108.0, 105.0), true, &config);
        assert_eq!(sample, GestureSample::Ignored);
        assert_eq!(session.kind(), GestureKind::Undetermined);
    }

    #[test]
    fn test_horizontal_classification_and_step() {
        let config = config();
        let mut session = GestureSession::begin(Point::new(100.0, 100.0));
        let sample = session.sample(Point::new(80.0, 103.0), true, &config);
        assert_eq!(sample, GestureSample::Horizontal { step_dx: -20.0 });
        assert_eq!(session.kind(), GestureKind::Horizontal);
    }

    #[test]
    fn test_classification_is_sticky() {
        let config = config();
        let mut session = GestureSession::begin(Point::new(100.0, 100.0));
        session.sample(Point::new(130.0, 100.0), true, &config);
        assert_eq!(session.kind(), GestureKind::Horizontal);
        // A strongly vertical follow-up must not reclassify.
        for y in [150.0, 220.0, 400.0] {
            session.sample(Point::new(130.0, y), true, &config);
            assert_eq!(session.kind(), GestureKind::Horizontal);
        }
    }

    #[test]
    fn test_vertical_requires_centered_card() {
        let config = config();
        let mut session = GestureSession::begin(Point::new(100.0, 100.0));
        let sample = session.sample(Point::new(101.0, 140.0), false, &config);
        assert_eq!(session.kind(), GestureKind::Horizontal);
        assert_eq!(sample, GestureSample::Horizontal { step_dx: 1.0 });

        let mut session = GestureSession::begin(Point::new(100.0, 100.0));
        session.sample(Point::new(101.0, 140.0), true, &config);
        assert_eq!(session.kind(), GestureKind::Vertical);
    }

    #[test]
    fn test_vertical_displacement_is_rubber_banded() {
        let config = config();
        let mut session = GestureSession::begin(Point::new(100.0, 100.0));
        let sample = session.sample(Point::new(100.0, 180.0), true, &config);
        assert_eq!(sample, GestureSample::Vertical { drop_dy: 80.0 * 0.65 });
    }

    #[test]
    fn test_vertical_within_slack_does_not_displace() {
        let config = config();
        let mut session = GestureSession::begin(Point::new(100.0, 100.0));
        session.sample(Point::new(100.0, 115.0), true, &config);
        assert_eq!(session.kind(), GestureKind::Vertical);
        let sample = session.sample(Point::new(100.0, 118.0), true, &config);
        assert_eq!(sample, GestureSample::Ignored);
    }

    #[test]
    fn test_upward_drag_never_displaces() {
        let config = config();
        let mut session = GestureSession::begin(Point::new(100.0, 100.0));
        session.sample(Point::new(100.0, 60.0), true, &config);
        assert_eq!(session.kind(), GestureKind::Vertical);
        let sample = session.sample(Point::new(100.0, 20.0), true, &config);
        assert_eq!(sample, GestureSample::Ignored);
        assert_eq!(session.total_dy(), -80.0);
    }
}
