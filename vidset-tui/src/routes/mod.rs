pub mod log;
pub mod revert;
pub mod video;
