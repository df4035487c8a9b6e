//! USB Module
//!
//! A USB CDC serial console mirroring the countdown readout, one line per render.
//! It owns the static bus allocator, keeps device and port together in a [`Shared`] console
//! and services them from the `USBCTRL_IRQ` interrupt. Host input is read and discarded.

use core::fmt::Write as FmtWrite;
use defmt::{trace, unwrap};
use heapless::String;
use usb_device::bus::UsbBusAllocator;
use usb_device::prelude::*;
use usbd_serial::SerialPort;

use rp235x_hal as hal;
use hal::pac;

// Select appropriate interrupt macro based on chip architecture
use rp235x_hal::pac::interrupt;

use countdown_appliance::{Readout, Shared};

type UsbBusType = hal::usb::UsbBus;

struct UsbConsole {
    device: UsbDevice<'static, UsbBusType>,
    serial: SerialPort<'static, UsbBusType>,
}

static CONSOLE: Shared<UsbConsole> = Shared::new();

/// Initialize USB Serial and enable the USB interrupt.
///
/// Must run once, before interrupts are enabled: the bus allocator lives in a `static mut`.
pub fn init(
    usb_periph: pac::USB,
    usb_dpram: pac::USB_DPRAM,
    usb_clock: hal::clocks::UsbClock,
    resets: &mut pac::RESETS,
) {
    let usb_bus = hal::usb::UsbBus::new(usb_periph, usb_dpram, usb_clock, true, resets);

    static mut USB_BUS: Option<UsbBusAllocator<UsbBusType>> = None;

    // Safety: called once at initialization time, before interrupts are enabled.
    let bus_allocator: &'static UsbBusAllocator<UsbBusType> = unsafe {
        let bus_ptr = core::ptr::addr_of_mut!(USB_BUS);
        *bus_ptr = Some(UsbBusAllocator::new(usb_bus));
        unwrap!((*bus_ptr).as_ref())
    };

    let serial = SerialPort::new(bus_allocator);
    let builder = UsbDeviceBuilder::new(bus_allocator, UsbVidPid(0x16c0, 0x27dd))
        .strings(&[StringDescriptors::default()
            .manufacturer("Raspberry Pi")
            .product("Pico 2 Countdown Appliance")
            .serial_number("CDT001")])
        .ok();
    let device = unwrap!(builder)
        .device_class(usbd_serial::USB_CLASS_CDC)
        .build();

    CONSOLE.install(UsbConsole { device, serial });

    unsafe {
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::USBCTRL_IRQ);
    }
}

/// Send `MM:SS.T STATE` to the host, best effort.
///
/// Bytes that do not fit the endpoint buffer are dropped; nothing waits for the host.
pub fn mirror(readout: &Readout, counting: bool) {
    let state = if counting { "COUNTING" } else { "IDLE" };
    let mut line: String<24> = String::new();
    if FmtWrite::write_fmt(&mut line, format_args!("{} {}\r\n", readout, state)).is_err() {
        return;
    }

    CONSOLE.with(|console| {
        if console.serial.write(line.as_bytes()).is_err() {
            trace!("usb console not draining");
        }
    });
}

/// USB Interrupt Handler
///
/// Handles enumeration and data in/out while the main loop sleeps.
#[allow(non_snake_case)]
#[interrupt]
fn USBCTRL_IRQ() {
    CONSOLE.with(|console| {
        if console.device.poll(&mut [&mut console.serial]) {
            let mut buf = [0u8; 64];
            let _ = console.serial.read(&mut buf);
        }
    });
}
