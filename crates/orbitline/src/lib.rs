pub mod config;
pub mod events;
pub mod render;
pub mod sys;
