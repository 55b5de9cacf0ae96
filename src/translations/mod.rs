//! Translation picker state: catalog shaping, selection, persistence.

mod catalog;
mod controller;
mod persister;
mod selection;
mod store;

pub use catalog::*;
pub use controller::*;
pub use persister::*;
pub use store::*;
