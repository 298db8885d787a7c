//! Command implementations for xtask
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod hooks;
mod resolve;

pub use hooks::Hooks;
pub use resolve::Resolve;
