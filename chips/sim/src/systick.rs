// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Software model of a free-running system timer.
//!
//! `SysTick` has one counter of width `T` and `N` compare channels. Nothing
//! moves on its own: the board (or a test) calls [`SysTick::advance`] to move
//! the counter, which latches a match on every enabled channel whose compare
//! value was crossed, and [`SysTick::handle_interrupt`] plays the role of the
//! interrupt vector and delivers latched matches to the client.
//!
//! Stopping a channel does not clear its latch. A match latched before
//! `stop_alarm` is still delivered by the next `handle_interrupt`, which is
//! the behavior of timers whose interrupt flag survives disabling the
//! compare. Starting a channel clears the latch.
//!
//! A timer built with [`SysTick::new_multicore`] only routes a channel's
//! interrupt once the channel has been bound; matches on unbound channels stay
//! latched.

use core::cell::Cell;

use kernel::hil::time::{MulticoreSystemTimer, SystemTimer, SystemTimerClient, Ticks};

pub struct SysTick<'a, T: Ticks, const N: usize> {
    counter: Cell<T>,
    running: Cell<bool>,
    compare: [Cell<T>; N],
    enabled: [Cell<bool>; N],
    latched: [Cell<bool>; N],
    bound: [Cell<bool>; N],
    require_bind: bool,
    client: Cell<Option<&'a dyn SystemTimerClient>>,
}

impl<'a, T: Ticks, const N: usize> SysTick<'a, T, N> {
    pub fn new() -> Self {
        Self::build(false)
    }

    pub fn new_multicore() -> Self {
        Self::build(true)
    }

    fn build(require_bind: bool) -> Self {
        SysTick {
            counter: Cell::new(T::from(0)),
            running: Cell::new(false),
            compare: core::array::from_fn(|_| Cell::new(T::from(0))),
            enabled: core::array::from_fn(|_| Cell::new(false)),
            latched: core::array::from_fn(|_| Cell::new(false)),
            bound: core::array::from_fn(|_| Cell::new(false)),
            require_bind,
            client: Cell::new(None),
        }
    }

    /// Move the counter forward by `ticks`, latching every enabled channel
    /// whose compare value is reached on the way. Does nothing before `init`.
    pub fn advance(&self, ticks: u32) {
        if !self.running.get() {
            return;
        }

        // Each step must stay below a full counter period.
        let max_step = if T::width() >= 32 {
            u32::MAX
        } else {
            (1u32 << T::width()) - 1
        };

        let mut remaining = ticks;
        while remaining > 0 {
            let step = remaining.min(max_step);
            self.step(step);
            remaining -= step;
        }
    }

    fn step(&self, ticks: u32) {
        let start = self.counter.get();
        let first = start.wrapping_add(T::from(1));
        let end = start.wrapping_add(T::from(ticks));

        for ch in 0..N {
            if self.enabled[ch].get()
                && self.compare[ch]
                    .get()
                    .within_range(first, end.wrapping_add(T::from(1)))
            {
                self.latched[ch].set(true);
            }
        }
        self.counter.set(end);
    }

    /// Whether any channel has a match waiting for the interrupt handler.
    pub fn has_pending(&self) -> bool {
        (0..N).any(|ch| self.latched[ch].get() && self.routed(ch))
    }

    pub fn is_bound(&self, alarm: usize) -> bool {
        self.bound[alarm].get()
    }

    fn routed(&self, ch: usize) -> bool {
        !self.require_bind || self.bound[ch].get()
    }

    /// Deliver latched matches, lowest channel first.
    pub fn handle_interrupt(&self) {
        for ch in 0..N {
            if self.routed(ch) && self.latched[ch].replace(false) {
                if let Some(client) = self.client.get() {
                    client.compare_match(ch);
                }
            }
        }
    }

    /// `advance` followed by `handle_interrupt`.
    pub fn tick(&self, ticks: u32) {
        self.advance(ticks);
        self.handle_interrupt();
    }
}

impl<T: Ticks, const N: usize> Default for SysTick<'_, T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T: Ticks, const N: usize> SystemTimer<'a> for SysTick<'a, T, N> {
    type Ticks = T;
    const NUM_ALARMS: usize = N;

    fn init(&self) {
        self.counter.set(T::from(0));
        for ch in 0..N {
            self.enabled[ch].set(false);
            self.latched[ch].set(false);
        }
        self.running.set(true);
        log::debug!("sim systick: running, {} channels, {} bit", N, T::width());
    }

    fn set_client(&self, client: &'a dyn SystemTimerClient) {
        self.client.set(Some(client));
    }

    fn now(&self) -> T {
        self.counter.get()
    }

    fn start_alarm(&self, alarm: usize, abstime: T) {
        self.compare[alarm].set(abstime);
        self.latched[alarm].set(false);
        self.enabled[alarm].set(true);
    }

    fn stop_alarm(&self, alarm: usize) {
        self.enabled[alarm].set(false);
    }

    fn set_alarm(&self, alarm: usize, abstime: T) {
        self.compare[alarm].set(abstime);
    }

    fn get_alarm(&self, alarm: usize) -> T {
        self.compare[alarm].get()
    }

    fn is_alarm_active(&self, alarm: usize) -> bool {
        self.enabled[alarm].get()
    }
}

impl<'a, T: Ticks, const N: usize> MulticoreSystemTimer<'a> for SysTick<'a, T, N> {
    fn bind_alarm(&self, alarm: usize) {
        self.bound[alarm].set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::SysTick;
    use core::cell::Cell;
    use kernel::hil::time::{
        MulticoreSystemTimer, SystemTimer, SystemTimerClient, Ticks16, Ticks32,
    };

    struct Recorder {
        hits: [Cell<usize>; 3],
    }

    impl Recorder {
        fn new() -> Self {
            Recorder {
                hits: Default::default(),
            }
        }
    }

    impl SystemTimerClient for Recorder {
        fn compare_match(&self, alarm: usize) {
            self.hits[alarm].set(self.hits[alarm].get() + 1);
        }
    }

    #[test]
    fn counter_only_runs_after_init() {
        let st = SysTick::<Ticks32, 1>::new();
        st.advance(10);
        assert_eq!(st.now(), Ticks32::new(0));
        st.init();
        st.advance(10);
        assert_eq!(st.now(), Ticks32::new(10));
    }

    #[test]
    fn fires_when_compare_reached() {
        let rec = Recorder::new();
        let st = SysTick::<Ticks32, 3>::new();
        st.set_client(&rec);
        st.init();

        st.start_alarm(1, Ticks32::new(5));
        st.tick(4);
        assert_eq!(rec.hits[1].get(), 0);
        st.tick(1);
        assert_eq!(rec.hits[1].get(), 1);
        // Stays armed but does not fire again until the counter comes back.
        assert!(st.is_alarm_active(1));
        st.tick(100);
        assert_eq!(rec.hits[1].get(), 1);
        assert_eq!(rec.hits[0].get(), 0);
    }

    #[test]
    fn wraps_narrow_counter() {
        let rec = Recorder::new();
        let st = SysTick::<Ticks16, 1>::new();
        st.set_client(&rec);
        st.init();

        st.advance(0xfff0);
        st.start_alarm(0, Ticks16::new(0x0004));
        st.tick(0x10);
        assert_eq!(rec.hits[0].get(), 0);
        st.tick(4);
        assert_eq!(rec.hits[0].get(), 1);
        assert_eq!(st.now(), Ticks16::new(0x0004));

        // A full period brings the counter back past the compare value.
        st.tick(0x1_0000);
        assert_eq!(rec.hits[0].get(), 2);
    }

    #[test]
    fn latched_match_survives_stop() {
        let rec = Recorder::new();
        let st = SysTick::<Ticks32, 1>::new();
        st.set_client(&rec);
        st.init();

        st.start_alarm(0, Ticks32::new(3));
        st.advance(3);
        assert!(st.has_pending());
        st.stop_alarm(0);
        st.handle_interrupt();
        assert_eq!(rec.hits[0].get(), 1);

        // Restarting clears a stale latch.
        st.start_alarm(0, Ticks32::new(50));
        st.advance(60);
        st.stop_alarm(0);
        st.start_alarm(0, Ticks32::new(500));
        st.handle_interrupt();
        assert_eq!(rec.hits[0].get(), 1);
    }

    #[test]
    fn multicore_routes_only_bound_channels() {
        let rec = Recorder::new();
        let st = SysTick::<Ticks32, 2>::new_multicore();
        st.set_client(&rec);
        st.init();

        st.start_alarm(0, Ticks32::new(1));
        st.tick(1);
        assert_eq!(rec.hits[0].get(), 0);

        st.bind_alarm(0);
        assert!(st.is_bound(0));
        assert!(!st.is_bound(1));
        st.handle_interrupt();
        assert_eq!(rec.hits[0].get(), 1);
    }
}
