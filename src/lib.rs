pub mod catalog;
pub mod config;
pub mod movies;
pub mod navigation;
pub mod player;
pub mod tui;
