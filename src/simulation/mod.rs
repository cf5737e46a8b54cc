pub mod config;
pub mod engine;
pub mod gate;
pub mod session;
