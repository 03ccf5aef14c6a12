pub mod cards;
pub mod format;
pub mod progress;
pub mod quiz;
