pub mod config;
pub mod quick;
pub mod render;
pub mod score;
pub mod session;
pub mod simulate;
