pub mod carousel;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod outcome;
pub mod reveal;
pub mod reward;
pub mod tween;

pub use carousel::{Carousel, CarouselPhase, PackCard, ReleaseOutcome};
pub use config::{Animations, GameConfig};
pub use error::{ConfigError, InitError, RewardError};
pub use geometry::{CardLayout, Geometry, Rect};
pub use gesture::{GestureKind, GestureSample, GestureSession, Point};
pub use outcome::{LogOutcomeSink, OutcomeSink, OutcomeUpdate};
pub use reveal::{RevealEvent, RevealPhase, RevealSequencer};
pub use reward::{
    MockRewardSource, Open, Prize, RewardCard, RewardPayload, RewardRequest, RewardSource,
};
pub use tween::{Easing, Timing, Tween, TweenBank};
