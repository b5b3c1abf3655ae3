// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Google LLC 2024.

/// A panic that interacts better with testing.
/// If we are running unit tests and already panicking, this prints the message but does not panic.
/// Otherwise, it will panic as normal.
/// This behaviour can be configured when testing other creates using the global_test feature.
#[macro_export]
macro_rules! tpanic {
    ($($t : tt)*) => {
        {
            #[cfg(any(test, feature = "global_test"))]
            {
                extern crate std;
                if std::thread::panicking() {
                    std::println!($($t)*);
                } else {
                    panic!($($t)*);
                }
            }
            #[cfg(not(any(test, feature = "global_test")))]
            {
                panic!($($t)*);
            }
        }
    };
}

/// Report a broken caller contract: a call that is never valid in the state
/// the callee is in.
///
/// In builds with debug assertions this is a [`tpanic!`]. Otherwise it
/// expands to nothing and the caller is expected to refuse the operation
/// with an error code.
#[macro_export]
macro_rules! contract_violation {
    ($($t : tt)*) => {
        if cfg!(debug_assertions) {
            $crate::tpanic!($($t)*);
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "channel 3 already active")]
    fn contract_violation_panics_in_debug() {
        contract_violation!("channel {} already active", 3);
    }

    #[test]
    fn contract_violation_quiet_while_unwinding() {
        struct Guard;
        impl Drop for Guard {
            fn drop(&mut self) {
                contract_violation!("reported during unwind");
            }
        }

        extern crate std;
        let result = std::panic::catch_unwind(|| {
            let _guard = Guard;
            panic!("first");
        });
        assert!(result.is_err());
    }
}
