//! The components module contains all shared components for our app.

mod app;
mod app_view;
mod icons;
mod reader;
mod settings_drawer;
mod translation_selection;

pub use app::*;
pub use app_view::*;
pub use icons::*;
pub use reader::*;
pub use settings_drawer::*;
pub use translation_selection::*;
