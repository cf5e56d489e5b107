#![allow(dead_code)]

use ratatui::style::Color;
use tachyonfx::fx;
use tachyonfx::{Effect, EffectManager, Interpolation, Motion};

/// Keyed effect manager backed by tachyonfx's built-in EffectManager
pub type FxManager = EffectManager<&'static str>;

// ─── Effect Factories ────────────────────────────────────────────────

const NIGHT: Color = Color::Rgb(15, 22, 36);
const NIGHT_DIM: Color = Color::Rgb(7, 10, 18);

/// Screen transition: content sweeps in from the left
pub fn screen_transition() -> Effect {
    fx::sweep_in(
        Motion::LeftToRight,
        8,
        2,
        NIGHT,
        (400, Interpolation::CubicOut),
    )
}

/// Gold shimmer for the landing title
pub fn title_shimmer() -> Effect {
    let shift = fx::hsl_shift_fg([12.0, 0.08, 0.1], (1400, Interpolation::SineInOut));
    fx::repeating(fx::ping_pong(shift))
}

/// Result panel materializes out of empty space
pub fn result_reveal() -> Effect {
    fx::coalesce((500, Interpolation::CubicOut))
}

/// Pocket dissolves once the reveal lands
pub fn pocket_dismiss() -> Effect {
    fx::dissolve((300, Interpolation::QuadIn))
}

/// Error screen flash: sweep down over the darkened backdrop
pub fn error_flash() -> Effect {
    fx::sweep_in(
        Motion::UpToDown,
        4,
        1,
        NIGHT_DIM,
        (350, Interpolation::QuadOut),
    )
}
