use crate::config::GameConfig;

/// Axis-aligned rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Visual placement of one card for a given carousel position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardLayout {
    pub x: f32,
    pub y: f32,
    pub rotation_deg: f32,
    pub scale: f32,
    pub z_order: i32,
    /// False beyond the angle table's reach; such cards are fully hidden
    /// rather than extrapolated.
    pub visible: bool,
}

/// Maps a card's signed fractional offset from the carousel center into its
/// fan placement. Pure computation; viewport changes only move the base
/// point.
#[derive(Debug, Clone)]
pub struct Geometry {
    base_x: f32,
    base_y: f32,
    item_width: f32,
    item_height: f32,
    spacing_x: f32,
    curve_intensity: f32,
    angles: Vec<f32>,
    min_scale: f32,
    scale_step: f32,
    z_index_base: f32,
    z_index_step: f32,
}

impl Geometry {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            base_x: 0.0,
            base_y: 0.0,
            item_width: config.item_width,
            item_height: config.item_height,
            spacing_x: config.spacing_x,
            curve_intensity: config.curve_intensity,
            angles: config.angles.clone(),
            min_scale: config.min_scale,
            scale_step: config.scale_step,
            z_index_base: config.z_index_base,
            z_index_step: config.z_index_step,
        }
    }

    /// Recomputes the centered base point. Never touches carousel offsets.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.base_x = width / 2.0 - self.item_width / 2.0;
        self.base_y = height / 2.0 - self.item_height / 2.0;
    }

    pub fn base_x(&self) -> f32 {
        self.base_x
    }

    pub fn base_y(&self) -> f32 {
        self.base_y
    }

    pub fn max_angle_index(&self) -> f32 {
        (self.angles.len() - 1) as f32
    }

    /// Rotation for a position: piecewise-linear over the angle table keyed
    /// by |position|, sign copied from the position, clamped past the table.
    pub fn angle_for(&self, position: f32) -> f32 {
        let sign = if position < 0.0 { -1.0 } else { 1.0 };
        let abs = position.abs();
        let max = self.max_angle_index();
        if abs >= max {
            return sign * self.angles[self.angles.len() - 1];
        }
        let k = abs.floor() as usize;
        let frac = abs - abs.floor();
        sign * (self.angles[k] + (self.angles[k + 1] - self.angles[k]) * frac)
    }

    pub fn scale_for(&self, position: f32) -> f32 {
        (1.0 - position.abs() * self.scale_step).max(self.min_scale)
    }

    pub fn z_order_for(&self, position: f32) -> i32 {
        (self.z_index_base - position.abs() * self.z_index_step).round() as i32
    }

    pub fn layout_for(&self, position: f32) -> CardLayout {
        let visible = position.abs() <= self.max_angle_index() + 0.5;
        CardLayout {
            x: self.base_x + position * self.spacing_x,
            y: self.base_y - position * position * self.curve_intensity,
            rotation_deg: self.angle_for(position),
            scale: self.scale_for(position),
            z_order: self.z_order_for(position),
            visible,
        }
    }

    /// Screen rectangle of a laid-out card, scaling about its center.
    pub fn card_rect(&self, layout: &CardLayout) -> Rect {
        let width = self.item_width * layout.scale;
        let height = self.item_height * layout.scale;
        Rect::new(
            layout.x + (self.item_width - width) / 2.0,
            layout.y + (self.item_height - height) / 2.0,
            width,
            height,
        )
    }
}
