// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Component for the system timer.
//!
//! `SystemTimerComponent` puts a `SystemTimerMux` over the chip's
//! counter/comparator, registers the mux as the chip's compare-match client
//! and initializes both, leaving every channel inactive with an empty
//! callback slot.
//!
//! Usage
//! -----
//! ```rust,ignore
//! let systick = &peripherals.systick;
//! let mux = components::alarm::SystemTimerComponent::new(systick)
//!     .finalize(components::system_timer_component_static!(chip::SysTick, 2));
//! mux.set_callback(0, Some(scheduler_timer))?;
//! ```

use core::mem::MaybeUninit;

use capsules_core::virtualizers::virtual_system_timer::SystemTimerMux;
use kernel::component::Component;
use kernel::hil::time::SystemTimer;

// Setup static space for the objects.
#[macro_export]
macro_rules! system_timer_component_static {
    ($S:ty, $N:expr $(,)?) => {{
        kernel::static_buf!(
            capsules_core::virtualizers::virtual_system_timer::SystemTimerMux<'static, $S, { $N }>
        )
    }};
}

pub struct SystemTimerComponent<S: 'static + SystemTimer<'static>, const N: usize> {
    hw: &'static S,
}

impl<S: 'static + SystemTimer<'static>, const N: usize> SystemTimerComponent<S, N> {
    pub fn new(hw: &'static S) -> Self {
        SystemTimerComponent { hw }
    }
}

impl<S: 'static + SystemTimer<'static>, const N: usize> Component for SystemTimerComponent<S, N> {
    type StaticInput = &'static mut MaybeUninit<SystemTimerMux<'static, S, N>>;
    type Output = &'static SystemTimerMux<'static, S, N>;

    fn finalize(self, static_buffer: Self::StaticInput) -> Self::Output {
        let mux: &'static SystemTimerMux<'static, S, N> =
            static_buffer.write(SystemTimerMux::new(self.hw));

        self.hw.set_client(mux);
        mux.init();
        mux
    }
}

#[cfg(test)]
mod tests {
    use super::SystemTimerComponent;
    use core::cell::Cell;
    use kernel::component::Component;
    use kernel::hil::time::{AlarmClient, Ticks32};
    use kernel::static_init;
    use sim::systick::SysTick;

    struct Counter {
        hits: Cell<usize>,
    }

    impl AlarmClient for Counter {
        fn alarm(&self) {
            self.hits.set(self.hits.get() + 1);
        }
    }

    #[test]
    fn finalize_wires_mux_to_hardware() {
        let hw = static_init!(SysTick<'static, Ticks32, 2>, SysTick::new());
        let hw: &'static SysTick<'static, Ticks32, 2> = hw;
        let counter = static_init!(Counter, Counter { hits: Cell::new(0) });
        let counter: &'static Counter = counter;

        let mux = SystemTimerComponent::<_, 2>::new(hw)
            .finalize(system_timer_component_static!(SysTick<'static, Ticks32, 2>, 2));

        assert!(!mux.is_alarm_active_n(0));
        assert!(!mux.is_alarm_active_n(1));

        mux.set_callback(1, Some(counter)).unwrap();
        mux.start_alarm_n(1, Ticks32::new(25)).unwrap();
        hw.tick(30);
        assert_eq!(counter.hits.get(), 1);
        assert_eq!(mux.now(), Ticks32::new(30));
    }
}
