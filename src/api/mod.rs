pub mod models;
mod preferences;
mod quran;

pub use models::*;
pub use preferences::*;
pub use quran::*;
