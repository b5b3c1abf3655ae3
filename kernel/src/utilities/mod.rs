//! Utility functions and macros provided by the kernel crate.

pub mod static_init;
pub mod stream_writer;
