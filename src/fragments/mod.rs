//! Text spliced into generated projects, grouped by plugin.

pub mod ansible;
pub mod go;
pub mod helm;
