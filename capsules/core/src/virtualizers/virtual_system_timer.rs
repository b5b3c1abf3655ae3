// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Multiplex the compare channels of the system timer into logical alarms.
//!
//! `SystemTimerMux` sits on top of a chip's [`SystemTimer`] and gives each of
//! its `N` compare channels a callback slot. Kernel timing services arm
//! absolute one-shot alarms through it, and the chip reports compare matches
//! back to it from interrupt context; the mux then runs the callback
//! registered for that channel, if any.
//!
//! Whether a channel is active is only ever known by the hardware. The mux
//! checks every call against it:
//!
//! | call            | channel must be |
//! |-----------------|-----------------|
//! | `start_alarm*`  | inactive        |
//! | `set_alarm*`    | active          |
//! | `get_alarm*`    | active          |
//! | `bind*`         | inactive        |
//! | `stop_alarm*`   | anything        |
//!
//! Breaking one of these is a bug in the caller. With debug assertions the
//! mux panics; without, it refuses the call with [`ErrorCode::ALREADY`] or
//! [`ErrorCode::OFF`] and leaves the hardware alone. A channel number out of
//! range is handled the same way with [`ErrorCode::INVAL`]. [`ActiveAlarm`],
//! returned by [`SystemTimerMux::start`], carries the "active" state in the
//! type so the checks cannot fail for code that sticks to it. The handle still
//! checks, since a raw stop or a second `init` can disarm the channel under it.
//!
//! Concurrency
//! -----------
//! The mux takes no locks. Every call except `now` and `is_alarm_active*`
//! must be made with the timer interrupt masked (inside the kernel's critical
//! section), since the interrupt handler reads the same slots and hardware
//! state.
//!
//! `stop_alarm` does not cancel a match the hardware has already latched: if
//! the counter reached the compare value just before the stop, the callback
//! can still run once after `stop_alarm` returns. Whether a match latched at
//! the same instant as the stop is delivered depends on the chip. Callbacks
//! that must not run after a stop have to check their own state.
//!
//! Usage
//! -----
//! ```rust,ignore
//! let mux = components::alarm::SystemTimerComponent::new(&chip.systick)
//!     .finalize(components::system_timer_component_static!(Chip::SysTick, 2));
//! mux.set_callback(1, Some(&watchdog))?;
//! mux.start_alarm_n(1, mux.now().wrapping_add(Ticks32::new(1000)))?;
//! ```

use core::cell::Cell;

use kernel::hil::time::{AlarmClient, MulticoreSystemTimer, SystemTimer, SystemTimerClient};
use kernel::ErrorCode;
use misc::contract_violation;

pub struct SystemTimerMux<'a, S: SystemTimer<'a>, const N: usize> {
    hw: &'a S,
    callbacks: [Cell<Option<&'a dyn AlarmClient>>; N],
}

impl<'a, S: SystemTimer<'a>, const N: usize> SystemTimerMux<'a, S, N> {
    // Evaluated at monomorphization, so a table that does not match the
    // hardware fails to build.
    const TABLE_FITS: () = assert!(
        N >= 1 && N <= S::NUM_ALARMS,
        "callback table must have between 1 and NUM_ALARMS slots"
    );

    pub fn new(hw: &'a S) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::TABLE_FITS;
        SystemTimerMux {
            hw,
            callbacks: core::array::from_fn(|_| Cell::new(None)),
        }
    }

    /// Clear the callback table and initialize the hardware.
    ///
    /// With a single channel the slot of alarm 0 is left alone: it holds the
    /// kernel tick handler and is expected to be wired before `init`.
    pub fn init(&self) {
        if N > 1 {
            for slot in self.callbacks.iter() {
                slot.set(None);
            }
        }
        self.hw.init();
        log::trace!("system timer: {} alarm channel(s) ready", N);
    }

    /// Current value of the free-running counter.
    pub fn now(&self) -> S::Ticks {
        self.hw.now()
    }

    /// The error a call on `alarm` is refused with, if any. `want_active` is
    /// the state the call needs the channel in; `None` accepts either.
    fn refusal(&self, alarm: usize, want_active: Option<bool>) -> Option<ErrorCode> {
        if alarm >= N {
            return Some(ErrorCode::INVAL);
        }
        match want_active {
            Some(true) if !self.hw.is_alarm_active(alarm) => Some(ErrorCode::OFF),
            Some(false) if self.hw.is_alarm_active(alarm) => Some(ErrorCode::ALREADY),
            _ => None,
        }
    }

    fn check(&self, alarm: usize, want_active: Option<bool>) -> Result<(), ErrorCode> {
        let err = match self.refusal(alarm, want_active) {
            None => return Ok(()),
            Some(err) => err,
        };
        let what = match err {
            ErrorCode::INVAL => "out of range",
            ErrorCode::OFF => "not active",
            _ => "already active",
        };
        log::warn!("system timer: alarm {} {}", alarm, what);
        contract_violation!("system timer: alarm {} {} (channels 0..{})", alarm, what, N);
        Err(err)
    }

    fn check_channel(&self, alarm: usize) -> Result<(), ErrorCode> {
        self.check(alarm, None)
    }

    fn expect_active(&self, alarm: usize, active: bool) -> Result<(), ErrorCode> {
        self.check(alarm, Some(active))
    }

    /// Attach `client` to channel `alarm`, or detach with `None`.
    pub fn set_callback(
        &self,
        alarm: usize,
        client: Option<&'a dyn AlarmClient>,
    ) -> Result<(), ErrorCode> {
        self.check_channel(alarm)?;
        self.callbacks[alarm].set(client);
        Ok(())
    }

    /// Arm an inactive channel to fire when the counter reaches `abstime`.
    pub fn start_alarm_n(&self, alarm: usize, abstime: S::Ticks) -> Result<(), ErrorCode> {
        self.expect_active(alarm, false)?;
        self.hw.start_alarm(alarm, abstime);
        Ok(())
    }

    /// Disarm a channel. A match already latched may still fire once.
    pub fn stop_alarm_n(&self, alarm: usize) -> Result<(), ErrorCode> {
        self.check_channel(alarm)?;
        self.hw.stop_alarm(alarm);
        Ok(())
    }

    /// Move the compare value of an active channel.
    pub fn set_alarm_n(&self, alarm: usize, abstime: S::Ticks) -> Result<(), ErrorCode> {
        self.expect_active(alarm, true)?;
        self.hw.set_alarm(alarm, abstime);
        Ok(())
    }

    pub fn get_alarm_n(&self, alarm: usize) -> Result<S::Ticks, ErrorCode> {
        self.expect_active(alarm, true)?;
        Ok(self.hw.get_alarm(alarm))
    }

    /// Whether channel `alarm` is armed. Valid in any state; an out of range
    /// channel is reported as inactive.
    pub fn is_alarm_active_n(&self, alarm: usize) -> bool {
        self.check_channel(alarm).is_ok() && self.hw.is_alarm_active(alarm)
    }

    pub fn start_alarm(&self, abstime: S::Ticks) -> Result<(), ErrorCode> {
        self.start_alarm_n(0, abstime)
    }

    pub fn stop_alarm(&self) {
        self.hw.stop_alarm(0);
    }

    pub fn set_alarm(&self, abstime: S::Ticks) -> Result<(), ErrorCode> {
        self.set_alarm_n(0, abstime)
    }

    pub fn get_alarm(&self) -> Result<S::Ticks, ErrorCode> {
        self.get_alarm_n(0)
    }

    pub fn is_alarm_active(&self) -> bool {
        self.hw.is_alarm_active(0)
    }

    /// Arm channel `alarm` and return a handle that owns its active state.
    pub fn start(
        &self,
        alarm: usize,
        abstime: S::Ticks,
    ) -> Result<ActiveAlarm<'_, 'a, S, N>, ErrorCode> {
        self.start_alarm_n(alarm, abstime)?;
        Ok(ActiveAlarm { mux: self, alarm })
    }
}

impl<'a, S: MulticoreSystemTimer<'a>, const N: usize> SystemTimerMux<'a, S, N> {
    /// Claim the interrupt of alarm 0 for the invoking core. Must happen once
    /// per core before alarm 0 is used there.
    pub fn bind(&self) -> Result<(), ErrorCode> {
        self.bind_alarm_n(0)
    }

    /// Claim the interrupt of channel `alarm` for the invoking core.
    pub fn bind_alarm_n(&self, alarm: usize) -> Result<(), ErrorCode> {
        self.expect_active(alarm, false)?;
        self.hw.bind_alarm(alarm);
        log::trace!("system timer: alarm {} bound", alarm);
        Ok(())
    }
}

impl<'a, S: SystemTimer<'a>, const N: usize> SystemTimerClient for SystemTimerMux<'a, S, N> {
    fn compare_match(&self, alarm: usize) {
        if let Some(client) = self.callbacks.get(alarm).and_then(Cell::get) {
            client.alarm();
        }
    }
}

/// An armed channel.
///
/// Only [`SystemTimerMux::start`] creates one, and [`ActiveAlarm::stop`]
/// consumes it, so holding one means the channel is active unless it was
/// stopped through the raw `*_n` calls or a second `init` behind the handle's
/// back. `set` and `alarm_time` go through the same checks as the raw calls
/// and catch that case. Dropping the handle leaves the alarm running.
#[must_use = "dropping the handle leaves the alarm armed"]
pub struct ActiveAlarm<'m, 'a, S: SystemTimer<'a>, const N: usize> {
    mux: &'m SystemTimerMux<'a, S, N>,
    alarm: usize,
}

impl<'a, S: SystemTimer<'a>, const N: usize> ActiveAlarm<'_, 'a, S, N> {
    pub fn alarm(&self) -> usize {
        self.alarm
    }

    pub fn set(&self, abstime: S::Ticks) -> Result<(), ErrorCode> {
        self.mux.set_alarm_n(self.alarm, abstime)
    }

    pub fn alarm_time(&self) -> Result<S::Ticks, ErrorCode> {
        self.mux.get_alarm_n(self.alarm)
    }

    pub fn stop(self) {
        self.mux.hw.stop_alarm(self.alarm);
    }
}
