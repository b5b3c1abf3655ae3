// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Hardware agnostic interfaces for the system time base.
//!
//! The system timer is a free-running hardware counter with one or more
//! compare channels. Each channel fires once whenever the counter reaches the
//! absolute value programmed into it. Only free-running mode exists here;
//! there is no periodic tick.
//!
//! [`SystemTimer`] is what a chip provides. A chip hands compare matches up to
//! a single [`SystemTimerClient`], normally the system timer mux in
//! `capsules_core`, which in turn calls one [`AlarmClient`] per channel.

use core::fmt;

/// An integer type defining the width of a time value, which allows
/// clients to know when wraparound will occur.
pub trait Ticks: Clone + Copy + From<u32> + fmt::Debug + Ord + PartialOrd + Eq {
    /// Converts the type into a `usize`, stripping the higher bits
    /// if it is larger than `usize` and filling the higher bits
    /// with 0 if it is smaller than `usize`.
    fn into_usize(self) -> usize;

    /// Converts the type into a `u32`, stripping the higher bits
    /// if it is larger than `u32` and filling the higher bits
    /// with 0 if it is smaller than `u32`.
    fn into_u32(self) -> u32;

    /// Add two values, wrapping around on overflow using standard
    /// unsigned arithmetic.
    fn wrapping_add(self, other: Self) -> Self;

    /// Subtract two values, wrapping around on underflow using standard
    /// unsigned arithmetic.
    fn wrapping_sub(self, other: Self) -> Self;

    /// Returns whether the value is in the range of [`start`, `end`) using
    /// unsigned arithmetic and considering wraparound. It returns `true`
    /// if, incrementing from `start`, the value will be reached before `end`.
    /// Put another way, it returns `(self - start) < (end - start)` in
    /// unsigned arithmetic.
    fn within_range(self, start: Self, end: Self) -> bool;

    /// Returns the maximum value of this type, which should be (2^width)-1.
    fn max_value() -> Self;

    /// Returns the width of the counter in bits.
    fn width() -> u32;
}

macro_rules! ticks_type {
    ($name:ident, $int:ty, $width:expr) => {
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name($int);

        impl $name {
            pub const fn new(value: $int) -> Self {
                $name(value)
            }

            pub const fn value(self) -> $int {
                self.0
            }
        }

        impl From<$int> for $name {
            fn from(val: $int) -> Self {
                $name(val)
            }
        }

        impl Ticks for $name {
            fn into_usize(self) -> usize {
                self.0 as usize
            }

            fn into_u32(self) -> u32 {
                self.0 as u32
            }

            fn wrapping_add(self, other: Self) -> Self {
                $name(self.0.wrapping_add(other.0))
            }

            fn wrapping_sub(self, other: Self) -> Self {
                $name(self.0.wrapping_sub(other.0))
            }

            fn within_range(self, start: Self, end: Self) -> bool {
                self.wrapping_sub(start).0 < end.wrapping_sub(start).0
            }

            fn max_value() -> Self {
                $name(<$int>::MAX)
            }

            fn width() -> u32 {
                $width
            }
        }
    };
}

ticks_type!(Ticks16, u16, 16);
ticks_type!(Ticks32, u32, 32);
ticks_type!(Ticks64, u64, 64);

// u32 is always accepted so generic code can write `T::from(100)`.
impl From<u32> for Ticks16 {
    fn from(val: u32) -> Self {
        Ticks16(val as u16)
    }
}

impl From<u32> for Ticks64 {
    fn from(val: u32) -> Self {
        Ticks64(val as u64)
    }
}

/// Receives compare matches from a [`SystemTimer`].
pub trait SystemTimerClient {
    /// Called from interrupt context when channel `alarm` matched.
    fn compare_match(&self, alarm: usize);
}

/// Callback attached to one logical alarm.
///
/// Runs in interrupt context, so it must not block. Rearming the alarm from
/// inside the callback is allowed; it already runs with the timer interrupt
/// masked.
pub trait AlarmClient {
    fn alarm(&self);
}

impl<F: Fn()> AlarmClient for F {
    fn alarm(&self) {
        self()
    }
}

/// Free-running counter with `NUM_ALARMS` absolute compare channels.
///
/// The active/inactive state of every channel lives here and nowhere else.
/// A channel stays active after it fires, until it is stopped. Channel
/// numbers passed in are always `< NUM_ALARMS`; checking that is the
/// caller's job.
///
/// All methods other than [`SystemTimer::now`] and
/// [`SystemTimer::is_alarm_active`] must be called with the timer interrupt
/// masked.
pub trait SystemTimer<'a> {
    type Ticks: Ticks;

    /// Number of compare channels this hardware exposes.
    const NUM_ALARMS: usize;

    /// Start the counter and leave every channel inactive.
    fn init(&self);

    fn set_client(&self, client: &'a dyn SystemTimerClient);

    /// Current counter value.
    fn now(&self) -> Self::Ticks;

    /// Program `abstime` into an inactive channel and enable it. Clears any
    /// stale match so the channel cannot fire spuriously right away.
    fn start_alarm(&self, alarm: usize, abstime: Self::Ticks);

    /// Disable a channel. A match that was already latched may still be
    /// delivered.
    fn stop_alarm(&self, alarm: usize);

    /// Reprogram an active channel.
    fn set_alarm(&self, alarm: usize, abstime: Self::Ticks);

    /// Compare value of an active channel.
    fn get_alarm(&self, alarm: usize) -> Self::Ticks;

    fn is_alarm_active(&self, alarm: usize) -> bool;
}

/// A system timer whose channel interrupts have to be claimed by a core
/// before they can be armed.
pub trait MulticoreSystemTimer<'a>: SystemTimer<'a> {
    /// Route the interrupt of channel `alarm` to the invoking core.
    fn bind_alarm(&self, alarm: usize);
}
