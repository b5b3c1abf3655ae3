// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! A byte stream over a caller-provided buffer.
//!
//! The buffer is borrowed, never grown. Two cursors index into it: `eos`
//! marks how far the buffer has been filled and `offset` how far it has been
//! read. `offset <= eos <= buffer.len()` holds at all times.
//!
//! Data that cannot be borrowed mutably, such as a `static` table, is read
//! through [`RomStream`](super::rom_stream::RomStream) instead.
//!
//! Usage
//! -----
//! ```
//! use kernel::collections::memory_stream::MemoryStream;
//! use kernel::hil::stream::Stream;
//!
//! let mut buf = [0u8; 4];
//! let mut ms = MemoryStream::for_write(&mut buf);
//! assert_eq!(ms.write(b"hello"), 4);
//! assert_eq!(ms.written(), b"hell");
//! ```

use crate::hil::stream::{Reset, Stream};
use crate::ErrorCode;

pub struct MemoryStream<'a> {
    buffer: &'a mut [u8],
    /// End of stream: bytes `[0, eos)` hold data.
    eos: usize,
    /// Read cursor.
    offset: usize,
}

impl<'a> MemoryStream<'a> {
    /// Stream over `buffer` whose first `eos` bytes are already valid data.
    /// An `eos` past the end of the buffer is clamped to the buffer length.
    pub fn new(buffer: &'a mut [u8], eos: usize) -> Self {
        let eos = eos.min(buffer.len());
        MemoryStream {
            buffer,
            eos,
            offset: 0,
        }
    }

    /// Like [`MemoryStream::new`] but refuses an `eos` past the end of the
    /// buffer.
    pub fn try_new(buffer: &'a mut [u8], eos: usize) -> Result<Self, ErrorCode> {
        if eos > buffer.len() {
            return Err(ErrorCode::SIZE);
        }
        Ok(Self::new(buffer, eos))
    }

    /// Empty stream, ready to be filled.
    pub fn for_write(buffer: &'a mut [u8]) -> Self {
        MemoryStream {
            buffer,
            eos: 0,
            offset: 0,
        }
    }

    /// Stream that reads back the whole buffer.
    pub fn for_read(buffer: &'a mut [u8]) -> Self {
        let eos = buffer.len();
        MemoryStream {
            buffer,
            eos,
            offset: 0,
        }
    }

    /// Fixed capacity of the stream.
    #[inline]
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn eos(&self) -> usize {
        self.eos
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes that can still be written.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.eos
    }

    /// Everything written so far, including bytes already read.
    pub fn written(&self) -> &[u8] {
        &self.buffer[..self.eos]
    }

    /// Bytes written but not yet read.
    pub fn unread(&self) -> &[u8] {
        &self.buffer[self.offset..self.eos]
    }

    /// Move the read cursor back to the start. The data is kept.
    pub fn rewind(&mut self) {
        self.offset = 0;
    }

    /// Give the buffer back.
    pub fn into_inner(self) -> &'a mut [u8] {
        self.buffer
    }
}

impl Stream for MemoryStream<'_> {
    fn write(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.buffer.len() - self.eos);
        self.buffer[self.eos..self.eos + n].copy_from_slice(&data[..n]);
        self.eos += n;
        n
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.eos - self.offset);
        buf[..n].copy_from_slice(&self.buffer[self.offset..self.offset + n]);
        self.offset += n;
        n
    }

    fn put(&mut self, byte: u8) -> Result<(), Reset> {
        if self.eos == self.buffer.len() {
            return Err(Reset);
        }
        self.buffer[self.eos] = byte;
        self.eos += 1;
        Ok(())
    }

    fn get(&mut self) -> Result<u8, Reset> {
        if self.offset == self.eos {
            return Err(Reset);
        }
        let byte = self.buffer[self.offset];
        self.offset += 1;
        Ok(byte)
    }

    // Overwrites the buffer slot in front of the cursor, whatever was there.
    fn unget(&mut self, byte: u8) -> Result<(), Reset> {
        if self.offset == 0 {
            return Err(Reset);
        }
        self.offset -= 1;
        self.buffer[self.offset] = byte;
        Ok(())
    }
}
