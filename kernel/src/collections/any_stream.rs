// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Closed set of the stream backends in the kernel.
//!
//! Lets a single call site hold "some stream" chosen at boot without a trait
//! object.

use crate::collections::memory_stream::MemoryStream;
use crate::collections::null_stream::NullStream;
use crate::collections::rom_stream::RomStream;
use crate::hil::stream::{Reset, Stream};

pub enum AnyStream<'a> {
    Memory(MemoryStream<'a>),
    Rom(RomStream<'a>),
    Null(NullStream),
}

impl<'a> From<MemoryStream<'a>> for AnyStream<'a> {
    fn from(ms: MemoryStream<'a>) -> Self {
        AnyStream::Memory(ms)
    }
}

impl<'a> From<RomStream<'a>> for AnyStream<'a> {
    fn from(rs: RomStream<'a>) -> Self {
        AnyStream::Rom(rs)
    }
}

impl From<NullStream> for AnyStream<'_> {
    fn from(ns: NullStream) -> Self {
        AnyStream::Null(ns)
    }
}

macro_rules! dispatch {
    ($self:ident, $s:ident => $e:expr) => {
        match $self {
            AnyStream::Memory($s) => $e,
            AnyStream::Rom($s) => $e,
            AnyStream::Null($s) => $e,
        }
    };
}

impl Stream for AnyStream<'_> {
    fn write(&mut self, data: &[u8]) -> usize {
        dispatch!(self, s => s.write(data))
    }

    fn read(&mut self, buf: &mut [u8]) -> usize {
        dispatch!(self, s => s.read(buf))
    }

    fn put(&mut self, byte: u8) -> Result<(), Reset> {
        dispatch!(self, s => s.put(byte))
    }

    fn get(&mut self) -> Result<u8, Reset> {
        dispatch!(self, s => s.get())
    }

    fn unget(&mut self, byte: u8) -> Result<(), Reset> {
        dispatch!(self, s => s.unget(byte))
    }
}

#[cfg(test)]
mod tests {
    use super::AnyStream;
    use crate::collections::memory_stream::MemoryStream;
    use crate::collections::null_stream::NullStream;
    use crate::collections::rom_stream::RomStream;
    use crate::hil::stream::{Reset, Stream};

    static GREETING: [u8; 5] = *b"hello";

    fn fill(stream: &mut AnyStream) -> usize {
        stream.write(b"0123456789")
    }

    #[test]
    fn same_call_site_both_backends() {
        let mut buf = [0u8; 4];
        let mut streams = [
            AnyStream::from(MemoryStream::for_write(&mut buf)),
            AnyStream::from(NullStream::new()),
            AnyStream::from(RomStream::new(&GREETING)),
        ];

        assert_eq!(fill(&mut streams[0]), 4);
        assert_eq!(fill(&mut streams[1]), 10);
        assert_eq!(fill(&mut streams[2]), 0);

        assert_eq!(streams[0].get(), Ok(b'0'));
        assert_eq!(streams[1].get(), Err(Reset));
        assert_eq!(streams[2].get(), Ok(b'h'));
    }
}
