pub mod chrome;
pub mod render;
