pub mod definitions;
pub mod engine;
pub mod forced;
pub mod game;
pub mod rules;
pub mod snapshot;
pub mod utils;
