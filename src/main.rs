//! SPDX-License-Identifier: MIT OR Apache-2.0
//!
//! # Countdown Appliance Firmware
//!
//! Joystick-edited `MM:SS.T` countdown on a 16x2 LCD, driven entirely from interrupts:
//! - **Hardware Module:** HAL setup and the collaborator implementations (`hardware.rs`).
//! - **USB Module:** Serial console mirroring the readout (`usb_module.rs`).
//! - **Appliance:** Shared state and handler logic (the `countdown_appliance` library).
//!
//! `TIMER0_IRQ_0` fires every 33 ms and runs the periodic dispatcher; `ADC_IRQ_FIFO` fires when
//! the conversion it started completes and moves the cursor. The main loop only sleeps.
//!
//! Target: Raspberry Pi Pico 2 (RP2350).

#![no_std]
#![no_main]

// --- Imports ---
use defmt::*;
use defmt_rtt as _;
use panic_probe as _;

use countdown_appliance::config::{adc, timing};
use countdown_appliance::{Appliance, Shared};

// --- Modules ---
mod hardware;
mod usb_module;

// --- HAL Selection ---
use rp235x_hal as hal;
use hal::entry;
use hal::fugit::ExtU32;
use hal::timer::Alarm;

// Select appropriate interrupt macro based on chip architecture
use rp235x_hal::pac::interrupt;

// --- Bootloader Configuration ---

#[unsafe(link_section = ".start_block")]
#[used]
pub static IMAGE_DEF: hal::block::ImageDef = hal::block::ImageDef::secure_exe();

// --- Shared State ---

/// Application state together with the peripherals its handlers drive.
struct Station {
    appliance: Appliance,
    board: hardware::Board,
}

static STATION: Shared<Station> = Shared::new();

/// Entry point.
#[entry]
fn main() -> ! {
    info!("Program start");

    // 1. Initialize Hardware Stack (Clocks, Alarm, Switches, ADC, LCD, USB)
    let mut board = hardware::init();

    // 2. Initialize Application State at 00:00.0, idle
    let appliance = Appliance::new();
    appliance.render(&mut board.display);

    // 3. Publish to Global State, then let the handlers run
    STATION.install(Station { appliance, board });
    hardware::enable_interrupts();

    // 4. Everything else happens in interrupt handlers
    loop {
        cortex_m::asm::wfi();
    }
}

// --- Interrupt Handlers ---

#[allow(non_snake_case)]
#[interrupt]
fn TIMER0_IRQ_0() {
    let rendered = STATION
        .with(|station| {
            let board = &mut station.board;
            board.alarm.clear_interrupt();
            if board.alarm.schedule(timing::OVERFLOW_PERIOD_US.micros()).is_err() {
                warn!("periodic alarm could not be re-armed");
            }

            let readout = station.appliance.on_timer_overflow(
                &mut board.adc,
                &mut board.buttons,
                &mut board.display,
            );
            readout.map(|readout| (readout, station.appliance.is_counting()))
        })
        .flatten();

    // Outside the station's critical section
    if let Some((readout, counting)) = rendered {
        usb_module::mirror(&readout, counting);
    }
}

#[allow(non_snake_case)]
#[interrupt]
fn ADC_IRQ_FIFO() {
    let Some(raw) = hardware::read_sample() else {
        return;
    };
    let sample = raw >> adc::SAMPLE_SHIFT;

    STATION.with(|station| {
        station
            .appliance
            .on_conversion_complete(sample, &mut station.board.display);
    });
}

// --- Metadata ---

#[unsafe(link_section = ".bi_entries")]
#[used]
pub static PICOTOOL_ENTRIES: [hal::binary_info::EntryAddr; 4] = [
    hal::binary_info::rp_cargo_bin_name!(),
    hal::binary_info::rp_cargo_version!(),
    hal::binary_info::rp_program_description!(c"Countdown Appliance"),
    hal::binary_info::rp_program_build_attribute!()
];
