// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! A stream that accepts everything and produces nothing.
//!
//! Useful where a stream is structurally required but no data needs to flow:
//! measuring how long some formatted output would be, or throwing log output
//! away.

use crate::hil::stream::{Reset, Stream};

#[derive(Clone, Copy, Debug, Default)]
pub struct NullStream;

impl NullStream {
    pub const fn new() -> Self {
        NullStream
    }
}

impl Stream for NullStream {
    fn write(&mut self, data: &[u8]) -> usize {
        data.len()
    }

    fn read(&mut self, _buf: &mut [u8]) -> usize {
        0
    }

    fn put(&mut self, _byte: u8) -> Result<(), Reset> {
        Ok(())
    }

    fn get(&mut self) -> Result<u8, Reset> {
        Err(Reset)
    }

    fn unget(&mut self, _byte: u8) -> Result<(), Reset> {
        Err(Reset)
    }
}
