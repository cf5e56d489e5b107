pub mod backdrop;
pub mod card;
pub mod carousel;
pub mod pocket;
pub mod popup;
pub mod result_panel;
pub mod theme;
