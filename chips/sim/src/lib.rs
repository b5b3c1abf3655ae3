// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Peripherals for running the kernel on a host: software models that stand
//! in for chip hardware in tests and simulation boards.

#![no_std]
#![crate_name = "sim"]
#![crate_type = "rlib"]

pub mod systick;
