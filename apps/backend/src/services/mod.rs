pub mod catalog;
pub mod progress;
