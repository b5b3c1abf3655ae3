// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Interface for sequential byte streams.
//!
//! A stream is an ordered byte sink/source. Producers and consumers only see
//! the [`Stream`] operations, never the storage behind them, so the same
//! formatting or parsing code can target a RAM buffer, a ROM table or a
//! sink that throws everything away.
//!
//! None of the operations allocate, block or panic. Running out of room on
//! the write side or out of data on the read side is reported through the
//! return value: a short count for the bulk operations, [`Reset`] for the
//! single byte ones.
//!
//! A stream instance is not safe to use from two contexts at once. The
//! `&mut self` receivers make that the caller's problem at compile time;
//! code sharing a stream with an interrupt handler has to put it behind its
//! own critical section.

/// Returned by the single byte operations when the stream has no capacity
/// left to accept a byte, or no byte left to hand out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reset;

pub trait Stream {
    /// Copy up to `data.len()` bytes into the stream.
    ///
    /// Returns how many bytes were consumed. A short count means the
    /// stream is full; the tail of `data` was dropped.
    fn write(&mut self, data: &[u8]) -> usize;

    /// Copy up to `buf.len()` bytes out of the stream.
    ///
    /// Returns how many bytes were produced. A short count means the stream
    /// is exhausted.
    fn read(&mut self, buf: &mut [u8]) -> usize;

    /// Append one byte.
    fn put(&mut self, byte: u8) -> Result<(), Reset>;

    /// Consume one byte.
    fn get(&mut self) -> Result<u8, Reset>;

    /// Push one byte back in front of the read position, so that the next
    /// [`Stream::get`] returns it.
    fn unget(&mut self, byte: u8) -> Result<(), Reset>;
}

impl<S: Stream + ?Sized> Stream for &mut S {
    #[inline]
    fn write(&mut self, data: &[u8]) -> usize {
        (**self).write(data)
    }

    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> usize {
        (**self).read(buf)
    }

    #[inline]
    fn put(&mut self, byte: u8) -> Result<(), Reset> {
        (**self).put(byte)
    }

    #[inline]
    fn get(&mut self) -> Result<u8, Reset> {
        (**self).get()
    }

    #[inline]
    fn unget(&mut self, byte: u8) -> Result<(), Reset> {
        (**self).unget(byte)
    }
}
