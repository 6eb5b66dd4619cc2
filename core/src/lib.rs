pub use board::*;
pub use chat::*;
pub use config::*;
pub use cooldown::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use parser::*;
pub use round::*;
pub use score::*;
pub use snapshot::*;
pub use tile::*;
pub use timer::*;
pub use types::*;

mod board;
mod chat;
mod config;
mod cooldown;
mod engine;
mod error;
mod generator;
mod parser;
mod round;
mod score;
mod snapshot;
mod tile;
mod timer;
mod types;
