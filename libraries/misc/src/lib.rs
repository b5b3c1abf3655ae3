#![crate_type = "rlib"]
#![no_std]

pub mod tpanic;
