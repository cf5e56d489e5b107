use polapack_core::carousel::PackCard;
use polapack_core::geometry::CardLayout;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::card::{PolaroidWidget, CARD_WIDTH, CARD_HEIGHT};

/// Renders the polaroid fan from engine layouts. The engine runs in cell
/// units (`GameConfig::compact`), so layout coordinates land directly on the
/// buffer grid.
pub struct CarouselWidget<'a> {
    pub cards: &'a [PackCard],
    pub layouts: &'a [(usize, CardLayout)],
    pub active: usize,
    /// Container opacity from the reveal sequencer; below one half the
    /// carousel is treated as faded out.
    pub opacity: f32,
    /// Drop animation progress for the active card, when a drop is running.
    pub drop_progress: Option<f32>,
}

impl<'a> CarouselWidget<'a> {
    pub fn new(cards: &'a [PackCard], layouts: &'a [(usize, CardLayout)]) -> Self {
        Self {
            cards,
            layouts,
            active: 0,
            opacity: 1.0,
            drop_progress: None,
        }
    }

    pub fn active(mut self, active: usize) -> Self {
        self.active = active;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn drop_progress(mut self, progress: Option<f32>) -> Self {
        self.drop_progress = progress;
        self
    }

    /// Cell rectangle a layout occupies inside `area`, if any of it fits.
    /// Used for rendering and for pointer hit-testing alike.
    pub fn card_rect(area: Rect, layout: &CardLayout, extra_dy: f32) -> Option<Rect> {
        let x = area.x as f32 + layout.x;
        let y = area.y as f32 + layout.y + extra_dy;
        if x + (CARD_WIDTH as f32) < area.x as f32 || y + (CARD_HEIGHT as f32) < area.y as f32 {
            return None;
        }
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let rect = Rect::new(x.round() as u16, y.round() as u16, CARD_WIDTH, CARD_HEIGHT);
        if rect.x >= area.right() || rect.y >= area.bottom() {
            return None;
        }
        Some(rect)
    }
}

impl<'a> Widget for CarouselWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.opacity < 0.5 {
            return;
        }

        // Paint back-to-front so the centered card lands on top.
        let mut ordered: Vec<&(usize, CardLayout)> = self.layouts.iter().collect();
        ordered.sort_by_key(|(_, layout)| layout.z_order);

        for (index, layout) in ordered {
            if !layout.visible {
                continue;
            }
            let is_active = *index == self.active;
            let extra_dy = if is_active {
                self.drop_progress.map_or(0.0, |p| p * area.height as f32)
            } else {
                0.0
            };
            // A fully dropped card is already past the bottom edge.
            if self.drop_progress.is_some() && is_active && extra_dy >= area.height as f32 {
                continue;
            }
            let Some(rect) = Self::card_rect(area, layout, extra_dy) else {
                continue;
            };
            if rect.right() > area.right() || rect.bottom() > area.bottom() {
                continue;
            }
            let Some(card) = self.cards.get(*index) else {
                continue;
            };
            PolaroidWidget::new(&card.label)
                .active(is_active)
                .dimmed(layout.scale < 0.85)
                .tilt(layout.rotation_deg)
                .render(rect, buf);
        }
    }
}
