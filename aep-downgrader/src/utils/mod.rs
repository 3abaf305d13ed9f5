//! Shared CLI utilities

pub mod progress;
pub mod table;
