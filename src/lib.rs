//! Standalone visualization demo library
//!
//! Re-exports modules for use by the binary and tools.

pub mod demo;
pub mod flow;
pub mod grid;
pub mod network;
pub mod orbital;
pub mod render;
pub mod surface;
pub mod terrain;
