pub mod browse;
pub mod clear;
pub mod config;
pub mod context;
pub mod progress;
pub mod prompts;
pub mod render;
pub mod wishlist;
