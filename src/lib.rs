//! SPDX-License-Identifier: MIT OR Apache-2.0
//!
//! # Joystick-edited countdown timer
//!
//! Hardware-agnostic core of an interrupt-driven countdown appliance:
//! - **Appliance:** shared state plus the periodic and conversion-complete handlers (`appliance.rs`).
//! - **Countdown:** `MM:SS.T` digits and a typed state machine deciding when they move (`countdown.rs`).
//! - **Cursor / Channel:** joystick navigation over a single multiplexed converter.
//! - **LCD:** HD44780 over a PCF8574 I2C backpack (`lcd.rs`).
//!
//! The firmware binary binds these to RP2350 peripherals.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod appliance;
pub mod channel;
pub mod config;
pub mod countdown;
pub mod cursor;
pub mod lcd;
pub mod shared;
pub mod surface;

#[cfg(test)]
mod testing;

pub use appliance::Appliance;
pub use countdown::{CountdownTimer, Readout};
pub use shared::Shared;
