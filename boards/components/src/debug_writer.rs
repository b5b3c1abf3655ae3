// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Component for the kernel log output.
//!
//! Attaches the `log` facade to a byte stream: a `MemoryStream` over a static
//! buffer to keep a boot log in RAM, or a `NullStream` to drop all output.
//! The first logger installed wins; later components still return a working
//! logger but do not replace the global one.
//!
//! Usage
//! -----
//! ```rust,ignore
//! let log_buf = kernel::static_init!([u8; DEBUG_BUFFER_KBYTE * 1024], [0; DEBUG_BUFFER_KBYTE * 1024]);
//! components::debug_writer::StreamLoggerComponent::new(
//!     MemoryStream::for_write(log_buf),
//!     log::LevelFilter::Info,
//! )
//! .finalize(components::stream_logger_component_static!(MemoryStream<'static>));
//! ```

use core::mem::MaybeUninit;

use capsules_core::stream_logger::StreamLogger;
use kernel::component::Component;
use kernel::hil::stream::Stream;
use log::LevelFilter;

/// Suggested size of a RAM log buffer.
pub const DEBUG_BUFFER_KBYTE: usize = 1;

// Setup static space for the objects.
#[macro_export]
macro_rules! stream_logger_component_static {
    ($S:ty $(,)?) => {{
        kernel::static_buf!(capsules_core::stream_logger::StreamLogger<$S>)
    }};
}

pub struct StreamLoggerComponent<S: Stream + Send + 'static> {
    stream: S,
    level: LevelFilter,
}

impl<S: Stream + Send + 'static> StreamLoggerComponent<S> {
    pub fn new(stream: S, level: LevelFilter) -> Self {
        StreamLoggerComponent { stream, level }
    }
}

impl<S: Stream + Send + 'static> Component for StreamLoggerComponent<S> {
    type StaticInput = &'static mut MaybeUninit<StreamLogger<S>>;
    type Output = &'static StreamLogger<S>;

    fn finalize(self, static_memory: Self::StaticInput) -> Self::Output {
        let logger: &'static StreamLogger<S> =
            static_memory.write(StreamLogger::new(self.stream, self.level));

        if log::set_logger(logger).is_ok() {
            log::set_max_level(self.level);
        }
        logger
    }
}

#[cfg(test)]
mod tests {
    use super::StreamLoggerComponent;
    use crate::alarm::SystemTimerComponent;
    use kernel::collections::memory_stream::MemoryStream;
    use kernel::component::Component;
    use kernel::hil::time::Ticks32;
    use kernel::static_init;
    use log::LevelFilter;
    use sim::systick::SysTick;

    fn contains(hay: &[u8], needle: &[u8]) -> bool {
        hay.windows(needle.len()).any(|w| w == needle)
    }

    // The only test in this crate that installs the global logger.
    #[test]
    fn boot_log_captures_timer_setup() {
        let buf = static_init!([u8; 512], [0; 512]);
        let logger = StreamLoggerComponent::new(MemoryStream::for_write(buf), LevelFilter::Trace)
            .finalize(stream_logger_component_static!(MemoryStream<'static>));

        let hw = static_init!(SysTick<'static, Ticks32, 1>, SysTick::new());
        let hw: &'static SysTick<'static, Ticks32, 1> = hw;
        SystemTimerComponent::<_, 1>::new(hw)
            .finalize(crate::system_timer_component_static!(SysTick<'static, Ticks32, 1>, 1));
        log::info!(target: "board", "boot done");

        logger.with_stream(|ms| {
            let log = ms.written();
            assert!(contains(log, b"] sim::systick: sim systick: running, 1 channels"));
            assert!(contains(log, b"system timer: 1 alarm channel(s) ready\n"));
            assert!(contains(log, b"[INFO] board: boot done\n"));
        });
    }
}
