pub mod canvas;
pub mod config;
pub mod input;
pub mod time;
