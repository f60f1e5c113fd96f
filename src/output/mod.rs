//! Report rendering: colored terminal text and JSON.

pub mod json;
pub mod terminal;
