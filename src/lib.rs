pub mod config;
pub mod engine;
pub mod layout;
pub mod strategy;
pub mod util;
