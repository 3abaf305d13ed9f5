//! Command implementations

pub mod convert;
pub mod diff;
pub mod info;
