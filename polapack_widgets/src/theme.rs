use ratatui::style::Color;

/// Year-end campaign palette for the TUI
pub struct Theme;

impl Theme {
    // Backgrounds
    pub const BG: Color = Color::Rgb(15, 22, 36);
    pub const BG_DIM: Color = Color::Rgb(7, 10, 18);
    pub const PANEL_BG: Color = Color::Rgb(26, 34, 52);

    // Polaroid cards
    pub const FRAME: Color = Color::Rgb(243, 238, 226);
    pub const FRAME_DIM: Color = Color::Rgb(140, 138, 128);
    pub const PHOTO: Color = Color::Rgb(58, 76, 104);
    pub const PHOTO_DIM: Color = Color::Rgb(36, 46, 62);
    pub const CAPTION: Color = Color::Rgb(70, 64, 54);
    pub const ACTIVE_BORDER: Color = Color::Rgb(255, 209, 102);

    // Pocket
    pub const POCKET: Color = Color::Rgb(155, 93, 229);
    pub const POCKET_ACTIVE: Color = Color::Rgb(241, 91, 181);

    // Result panel
    pub const PRIZE: Color = Color::Rgb(0, 187, 249);
    pub const DIVIDER: Color = Color::Rgb(60, 70, 92);

    // UI elements
    pub const GOLD: Color = Color::Rgb(255, 190, 11);
    pub const BRIGHT_TEXT: Color = Color::Rgb(250, 250, 250);
    pub const MUTED_TEXT: Color = Color::Rgb(158, 166, 184);
    pub const DIM_TEXT: Color = Color::Rgb(96, 104, 124);
    pub const ERROR: Color = Color::Rgb(239, 71, 111);
    pub const SUCCESS: Color = Color::Rgb(6, 214, 160);
}
