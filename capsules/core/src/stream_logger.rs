// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! A `log` backend that writes records into a byte stream.
//!
//! Each record becomes one line, `[LEVEL] target: message`. When the stream
//! fills up the rest of the line is dropped, like any other write to a full
//! stream. Backed by a `NullStream` the logger discards everything, which
//! keeps `log` call sites cheap on boards without a console.
//!
//! Records can come from thread and interrupt context, so the stream sits
//! behind a `critical_section::Mutex`.

use core::cell::RefCell;
use core::fmt::Write;

use critical_section::Mutex;
use kernel::hil::stream::Stream;
use kernel::utilities::stream_writer::StreamWriter;
use log::{LevelFilter, Log, Metadata, Record};

pub struct StreamLogger<S: Stream + Send> {
    stream: Mutex<RefCell<S>>,
    level: LevelFilter,
}

impl<S: Stream + Send> StreamLogger<S> {
    pub const fn new(stream: S, level: LevelFilter) -> Self {
        StreamLogger {
            stream: Mutex::new(RefCell::new(stream)),
            level,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// Run `f` on the underlying stream inside a critical section.
    pub fn with_stream<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        critical_section::with(|cs| {
            let mut stream = self.stream.borrow_ref_mut(cs);
            f(&mut *stream)
        })
    }
}

impl<S: Stream + Send> Log for StreamLogger<S> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.with_stream(|stream| {
            let mut writer = StreamWriter::new(stream);
            let _ = writeln!(
                writer,
                "[{}] {}: {}",
                record.level(),
                record.target(),
                record.args()
            );
        });
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::StreamLogger;
    use kernel::collections::memory_stream::MemoryStream;
    use kernel::collections::null_stream::NullStream;
    use kernel::hil::stream::Stream;
    use log::{Level, LevelFilter, Log, Record};

    fn record<'a>(level: Level, args: core::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder()
            .level(level)
            .target("systick")
            .args(args)
            .build()
    }

    #[test]
    fn writes_one_line_per_record() {
        let mut buf = [0u8; 64];
        let logger = StreamLogger::new(MemoryStream::for_write(&mut buf), LevelFilter::Info);

        logger.log(&record(Level::Warn, format_args!("alarm {} late", 1)));
        logger.log(&record(Level::Debug, format_args!("filtered")));

        logger.with_stream(|ms| {
            assert_eq!(ms.written(), b"[WARN] systick: alarm 1 late\n");
        });
    }

    #[test]
    fn full_stream_truncates_records() {
        let mut buf = [0u8; 10];
        let logger = StreamLogger::new(MemoryStream::for_write(&mut buf), LevelFilter::Trace);

        logger.log(&record(Level::Error, format_args!("overflow")));
        logger.log(&record(Level::Error, format_args!("dropped")));

        logger.with_stream(|ms| {
            assert_eq!(ms.written(), b"[ERROR] sy");
            assert_eq!(ms.remaining(), 0);
        });
    }

    #[test]
    fn null_stream_discards() {
        let logger = StreamLogger::new(NullStream::new(), LevelFilter::Trace);
        assert!(logger.enabled(record(Level::Trace, format_args!("")).metadata()));
        logger.log(&record(Level::Info, format_args!("gone")));
        assert_eq!(logger.with_stream(|ns| ns.get()).ok(), None);
    }
}
