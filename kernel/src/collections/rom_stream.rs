// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! A read-only byte stream over constant data.
//!
//! This is the memory stream configuration where the end of stream sits at
//! the end of the buffer from the start, for data that lives in flash:
//!
//! ```
//! use kernel::collections::rom_stream::RomStream;
//! use kernel::hil::stream::Stream;
//!
//! static BANNER: [u8; 4] = *b"tock";
//!
//! let mut rs = RomStream::new(&BANNER);
//! assert_eq!(rs.get(), Ok(b't'));
//! assert_eq!(rs.write(b"x"), 0);
//! ```
//!
//! The stream is always full, so `write` takes nothing and `put` fails.
//! `unget` can only step back over the byte that is already stored there,
//! since the data cannot be changed.

use crate::hil::stream::{Reset, Stream};

#[derive(Clone, Copy, Debug)]
pub struct RomStream<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> RomStream<'a> {
    pub const fn new(data: &'a [u8]) -> Self {
        RomStream { data, offset: 0 }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn unread(&self) -> &'a [u8] {
        &self.data[self.offset..]
    }

    pub fn rewind(&mut self) {
        self.offset = 0;
    }
}

impl Stream for RomStream<'_> {
    fn write(&mut self, _data: &[u8]) -> usize {
        0
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        let n = buf.len().min(self.data.len() - self.offset);
        buf[..n].copy_from_slice(&self.data[self.offset..self.offset + n]);
        self.offset += n;
        n
    }

    fn put(&mut self, _byte: u8) -> Result<(), Reset> {
        Err(Reset)
    }

    fn get(&mut self) -> Result<u8, Reset> {
        let byte = *self.data.get(self.offset).ok_or(Reset)?;
        self.offset += 1;
        Ok(byte)
    }

    fn unget(&mut self, byte: u8) -> Result<(), Reset> {
        match self.offset.checked_sub(1) {
            Some(prev) if self.data[prev] == byte => {
                self.offset = prev;
                Ok(())
            }
            _ => Err(Reset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RomStream;
    use crate::hil::stream::{Reset, Stream};

    static TABLE: [u8; 6] = [0x10, 0x20, 0x30, 0x40, 0x50, 0x60];

    #[test]
    fn reads_static_table() {
        let mut rs = RomStream::new(&TABLE);
        assert_eq!(rs.size(), 6);

        let mut out = [0u8; 4];
        assert_eq!(rs.read(&mut out), 4);
        assert_eq!(out, [0x10, 0x20, 0x30, 0x40]);
        assert_eq!(rs.read(&mut out), 2);
        assert_eq!(&out[..2], &[0x50, 0x60]);
        assert_eq!(rs.read(&mut out), 0);
        assert_eq!(rs.get(), Err(Reset));

        rs.rewind();
        assert_eq!(rs.unread(), &TABLE);
    }

    #[test]
    fn refuses_writes() {
        let mut rs = RomStream::new(&TABLE);
        assert_eq!(rs.write(&[1, 2, 3]), 0);
        assert_eq!(rs.put(1), Err(Reset));
        assert_eq!(rs.get(), Ok(0x10));
        assert_eq!(rs.offset(), 1);
    }

    #[test]
    fn unget_only_steps_back_over_stored_byte() {
        let mut rs = RomStream::new(&TABLE);
        assert_eq!(rs.unget(0x10), Err(Reset));

        assert_eq!(rs.get(), Ok(0x10));
        assert_eq!(rs.get(), Ok(0x20));
        assert_eq!(rs.unget(0x99), Err(Reset));
        assert_eq!(rs.offset(), 2);

        assert_eq!(rs.unget(0x20), Ok(()));
        assert_eq!(rs.get(), Ok(0x20));
        assert_eq!(TABLE[1], 0x20);
    }

    #[test]
    fn empty_data() {
        let mut rs = RomStream::new(&[]);
        assert_eq!(rs.read(&mut [0u8; 2]), 0);
        assert_eq!(rs.get(), Err(Reset));
        assert_eq!(rs.unget(0), Err(Reset));
    }
}
