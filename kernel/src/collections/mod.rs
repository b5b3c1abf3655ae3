//! Data structures.

pub mod any_stream;
pub mod memory_stream;
pub mod null_stream;
pub mod rom_stream;
