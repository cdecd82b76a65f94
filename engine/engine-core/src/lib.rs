//! Core traits and types for the Slide 2048 engine
//!
//! This crate provides the seam between compile-time board sizes and run-time
//! callers:
//! - `Game`: Typed trait implemented once per board-size specialization
//! - `ErasedGame`: Runtime interface with the board size erased
//! - `GameAdapter`: Automatic conversion from typed to erased interface
//! - `GameHandle`: Caller-owned handle pairing an erased game with its size
//! - `DispatchTable`: Fixed mapping from size tag to specialization

pub mod adapter;
pub mod erased;
pub mod handle;
pub mod registry;
pub mod typed;

// Re-export main types for convenience
pub use adapter::GameAdapter;
pub use erased::ErasedGame;
pub use handle::GameHandle;
pub use registry::{
    DispatchError, DispatchTable, GameFactory, RejectedDestroy, SizeTag, SupportedSizes,
};
pub use typed::{Direction, EngineError, Game};
