pub mod engagement;
pub mod logger;
pub mod pacing;
