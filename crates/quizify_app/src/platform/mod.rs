//! Terminal front end: wires the pure core to the engine, clipboard and stdout.
mod app;
mod clipboard;
mod config;
mod effects;
mod input;
mod ui;

pub use app::run_app;
