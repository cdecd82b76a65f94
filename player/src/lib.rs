//! Terminal player for size-erased 2048 games
//!
//! The binary (`slide`) reads one command per line and drives a game through
//! the engine-games dispatch functions, so the board size can change between
//! games without the player knowing any concrete game type.

pub mod command;
pub mod config;
pub mod session;

pub use command::Command;
pub use config::Config;
pub use session::{run, Flow, Session};
