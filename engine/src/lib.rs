pub mod color;
pub mod rules;
pub mod terminal;

pub use crate::color::*;
pub use crate::rules::*;
pub use crate::terminal::*;
