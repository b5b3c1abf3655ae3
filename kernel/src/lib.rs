// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Core Tock kernel interfaces for byte streams and the system time base.
//!
//! - `hil` holds the traits chips and capsules meet at: the [`Stream`]
//!   contract and the system timer.
//! - `collections` holds the stream backends that need no hardware.
//! - `utilities` holds formatting over streams and static allocation macros.
//!
//! [`Stream`]: hil::stream::Stream

#![no_std]

pub mod collections;
pub mod component;
pub mod errorcode;
pub mod hil;
pub mod utilities;

pub use crate::errorcode::ErrorCode;
