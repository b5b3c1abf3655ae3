// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Support for statically initializing objects in memory.

/// Allocates a statically-sized global region of memory for data structures
/// but does not initialize the memory.
///
/// This macro creates the static buffer and returns a
/// `&'static mut MaybeUninit<$T>` to it. Each expansion owns a distinct
/// static; executing the same expansion twice panics rather than handing out
/// a second mutable reference.
///
/// ```ignore
/// let buf = kernel::static_buf!(SystemTimerMux<'static, Chip, 2>);
/// ```
#[macro_export]
macro_rules! static_buf {
    ($T:ty $(,)?) => {{
        static TAKEN: core::sync::atomic::AtomicBool = core::sync::atomic::AtomicBool::new(false);
        static mut BUF: core::mem::MaybeUninit<$T> = core::mem::MaybeUninit::uninit();

        // Only reached during single-threaded board setup.
        if TAKEN.load(core::sync::atomic::Ordering::Relaxed) {
            panic!("static_buf! executed twice");
        }
        TAKEN.store(true, core::sync::atomic::Ordering::Relaxed);

        #[allow(unsafe_code)]
        let buf: &'static mut core::mem::MaybeUninit<$T> =
            unsafe { &mut *core::ptr::addr_of_mut!(BUF) };
        buf
    }};
}

/// Allocates and initializes a statically-sized global region of memory.
///
/// Returns a `&'static mut $T`. Same single-execution rule as
/// [`static_buf!`].
#[macro_export]
macro_rules! static_init {
    ($T:ty, $e:expr $(,)?) => {{
        let buf: &'static mut core::mem::MaybeUninit<$T> = $crate::static_buf!($T);
        buf.write($e)
    }};
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;

    #[test]
    fn static_init_gives_static_reference() {
        let counter: &'static Cell<u32> = static_init!(Cell<u32>, Cell::new(7));
        counter.set(counter.get() + 1);
        assert_eq!(counter.get(), 8);
    }

    fn take_twice() -> &'static mut core::mem::MaybeUninit<u8> {
        static_buf!(u8)
    }

    #[test]
    #[should_panic(expected = "executed twice")]
    fn second_execution_panics() {
        let _first = take_twice();
        let _second = take_twice();
    }
}
