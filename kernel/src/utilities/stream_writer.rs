// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Formatted output into a byte stream.
//!
//! `StreamWriter` implements [`core::fmt::Write`] on top of any [`Stream`],
//! which is what `write!` needs. Output that does not fit is dropped the same
//! way [`Stream::write`] drops it; formatting carries on and
//! [`StreamWriter::truncated`] records that something was lost.

use core::fmt;

use crate::collections::memory_stream::MemoryStream;
use crate::collections::null_stream::NullStream;
use crate::hil::stream::Stream;

pub struct StreamWriter<S: Stream> {
    stream: S,
    written: usize,
    truncated: bool,
}

impl<S: Stream> StreamWriter<S> {
    pub fn new(stream: S) -> Self {
        StreamWriter {
            stream,
            written: 0,
            truncated: false,
        }
    }

    /// Bytes accepted by the stream so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn truncated(&self) -> bool {
        self.truncated
    }

    pub fn into_inner(self) -> S {
        self.stream
    }
}

impl<S: Stream> fmt::Write for StreamWriter<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let n = self.stream.write(s.as_bytes());
        self.written += n;
        if n < s.len() {
            self.truncated = true;
        }
        Ok(())
    }
}

/// Format `args` into `buf`, dropping whatever does not fit. Returns the
/// number of bytes stored.
pub fn format_to_buffer(buf: &mut [u8], args: fmt::Arguments) -> usize {
    let mut writer = StreamWriter::new(MemoryStream::for_write(buf));
    let _ = fmt::write(&mut writer, args);
    writer.written()
}

/// Length `args` would have once formatted, without storing it anywhere.
pub fn formatted_len(args: fmt::Arguments) -> usize {
    let mut writer = StreamWriter::new(NullStream::new());
    let _ = fmt::write(&mut writer, args);
    writer.written()
}

#[cfg(test)]
mod tests {
    use super::{format_to_buffer, formatted_len, StreamWriter};
    use crate::collections::memory_stream::MemoryStream;
    use core::fmt::Write;

    #[test]
    fn formats_into_memory_stream() {
        let mut buf = [0u8; 32];
        let mut ms = MemoryStream::for_write(&mut buf);
        let mut w = StreamWriter::new(&mut ms);
        write!(w, "alarm {} at {:#x}", 2, 0x40).unwrap();
        assert!(!w.truncated());
        assert_eq!(ms.written(), b"alarm 2 at 0x40");
    }

    #[test]
    fn truncates_silently() {
        let mut buf = [0u8; 5];
        let n = format_to_buffer(&mut buf, format_args!("{}-{}", 1234, 5678));
        assert_eq!(n, 5);
        assert_eq!(&buf, b"1234-");

        let mut small = [0u8; 2];
        let mut w = StreamWriter::new(MemoryStream::for_write(&mut small));
        write!(w, "abc").unwrap();
        assert!(w.truncated());
        assert_eq!(w.written(), 2);
    }

    #[test]
    fn probes_length_without_storage() {
        assert_eq!(formatted_len(format_args!("{}", u32::MAX)), 10);
        assert_eq!(formatted_len(format_args!("")), 0);

        let args_len = formatted_len(format_args!("{:>8}|", "x"));
        let mut buf = [0u8; 16];
        let n = format_to_buffer(&mut buf, format_args!("{:>8}|", "x"));
        assert_eq!(n, args_len);
        assert_eq!(&buf[..n], b"       x|");
    }
}
