//! Hardware Abstraction Module
//!
//! This module handles the low-level configuration of the RP2350 peripherals.
//! It encapsulates the setup of Clocks, PLLs, the periodic Alarm, GPIO switches, the
//! multiplexed ADC and the I2C LCD, exposing a `Board` that implements the appliance's
//! collaborator traits.

use defmt::{unwrap, warn};
use embedded_hal::digital::InputPin;
use rp235x_hal as hal;
use hal::fugit::{ExtU32, RateExtU32};
use hal::gpio::bank0::{Gpio13, Gpio14, Gpio4, Gpio5};
use hal::gpio::{FunctionI2C, FunctionSio, Pin, PullUp, SioInput};
use hal::pac;
use hal::timer::{Alarm, Alarm0, CopyableTimer0};

use countdown_appliance::channel::Channel;
use countdown_appliance::config::{lcd, timing};
use countdown_appliance::lcd::Lcd;
use countdown_appliance::surface::{AnalogConverter, Buttons, DigitalInputs};

use crate::usb_module;

/// External crystal frequency used by the Raspberry Pi Pico 2.
const XTAL_FREQ_HZ: u32 = 12_000_000u32;

pub type SwitchPin<I> = Pin<I, FunctionSio<SioInput>, PullUp>;

pub type LcdBus = hal::I2C<
    pac::I2C0,
    (
        Pin<Gpio4, FunctionI2C, PullUp>,
        Pin<Gpio5, FunctionI2C, PullUp>,
    ),
>;

pub type Display = Lcd<LcdBus, hal::Timer<CopyableTimer0>>;

/// Everything the interrupt handlers touch.
pub struct Board {
    pub display: Display,
    pub adc: JoystickAdc,
    pub buttons: SwitchPins,
    pub alarm: Alarm0<CopyableTimer0>,
}

/// Joystick and encoder push switches, pressed = low.
pub struct SwitchPins {
    joystick: SwitchPin<Gpio14>,
    encoder: SwitchPin<Gpio13>,
}

impl DigitalInputs for SwitchPins {
    fn sample(&mut self) -> Buttons {
        Buttons {
            joystick: self.joystick.is_low().unwrap_or(false),
            encoder: self.encoder.is_low().unwrap_or(false),
        }
    }
}

/// The on-chip ADC in single-shot, interrupt-on-FIFO mode.
pub struct JoystickAdc {
    _adc: hal::Adc,
}

impl AnalogConverter for JoystickAdc {
    fn select_channel(&mut self, channel: Channel) {
        // Safety: the ADC is owned by `self`; only this type and `read_sample` touch its registers.
        unsafe {
            let adc_regs = &(*pac::ADC::ptr());
            adc_regs.cs().modify(|_, w| w.ainsel().bits(channel.index()));
        }
    }

    fn start_conversion(&mut self) {
        unsafe {
            let adc_regs = &(*pac::ADC::ptr());
            adc_regs.cs().modify(|_, w| w.start_once().set_bit());
        }
    }
}

/// Pop the finished 12-bit sample from the ADC FIFO, if one is waiting.
pub fn read_sample() -> Option<u16> {
    unsafe {
        let adc_regs = &(*pac::ADC::ptr());
        if adc_regs.fcs().read().level().bits() > 0 {
            Some(adc_regs.fifo().read().val().bits())
        } else {
            None
        }
    }
}

/// Initializes the entire hardware stack.
///
/// This function:
/// 1.  Takes ownership of the raw PAC peripherals.
/// 2.  Configures the Watchdog and Clocks (System & USB).
/// 3.  Initializes the Microsecond Timer and arms Alarm 0 for the periodic tick.
/// 4.  Configures the joystick and encoder switches.
/// 5.  Sets up the ADC for Interrupt-driven single-shot mode on channels 0 and 1.
/// 6.  Brings up the I2C LCD.
/// 7.  Initializes the USB Serial module.
///
/// The timer and ADC interrupts stay masked until [`enable_interrupts`].
pub fn init() -> Board {
    // 1. Take ownership of raw peripherals
    let mut pac = unwrap!(pac::Peripherals::take());
    let mut watchdog = hal::Watchdog::new(pac.WATCHDOG);

    // 2. Configure Clocks
    let clocks = unwrap!(
        hal::clocks::init_clocks_and_plls(
            XTAL_FREQ_HZ,
            pac.XOSC,
            pac.CLOCKS,
            pac.PLL_SYS,
            pac.PLL_USB,
            &mut pac.RESETS,
            &mut watchdog,
        )
        .ok()
    );

    // 3. Configure Timer (Microsecond precision) and the periodic alarm
    let mut timer = hal::Timer::new_timer0(pac.TIMER0, &mut pac.RESETS, &clocks);
    let mut alarm = unwrap!(timer.alarm_0());
    if alarm.schedule(timing::OVERFLOW_PERIOD_US.micros()).is_err() {
        warn!("initial alarm could not be scheduled");
    }
    alarm.enable_interrupt();

    // 4. Configure GPIOs
    let sio = hal::Sio::new(pac.SIO);
    let pins = hal::gpio::Pins::new(
        pac.IO_BANK0,
        pac.PADS_BANK0,
        sio.gpio_bank0,
        &mut pac.RESETS,
    );

    let buttons = SwitchPins {
        joystick: pins.gpio14.into_pull_up_input(),
        encoder: pins.gpio13.into_pull_up_input(),
    };

    // 5. Configure ADC (Interrupt Driven)
    let adc = hal::Adc::new(pac.ADC, &mut pac.RESETS);
    let _x_pin = unwrap!(hal::adc::AdcPin::new(pins.gpio26).ok());
    let _y_pin = unwrap!(hal::adc::AdcPin::new(pins.gpio27).ok());

    unsafe {
        let adc_regs = &(*pac::ADC::ptr());

        // FIFO Control: Enable, Threshold=1, No DMA
        adc_regs.fcs().modify(|_, w| {
            w.en().set_bit()
             .thresh().bits(1)
             .dreq_en().clear_bit()
        });

        // Enable FIFO Interrupt
        adc_regs.inte().modify(|_, w| w.fifo().set_bit());

        // Channel Control: X axis first, Enable, Single-Shot
        adc_regs.cs().modify(|_, w| {
            w.ainsel().bits(Channel::AxisX.index())
             .en().set_bit()
             .start_many().clear_bit()
        });
    }

    // 6. Configure the LCD on I2C0
    let sda_pin: Pin<Gpio4, FunctionI2C, PullUp> = pins.gpio4.reconfigure();
    let scl_pin: Pin<Gpio5, FunctionI2C, PullUp> = pins.gpio5.reconfigure();
    let i2c = hal::I2C::i2c0(
        pac.I2C0,
        sda_pin,
        scl_pin,
        lcd::I2C_FREQUENCY_HZ.Hz(),
        &mut pac.RESETS,
        &clocks.system_clock,
    );
    let mut display = Lcd::new(i2c, timer, lcd::PCF8574_ADDRESS);
    if display.init().is_err() {
        warn!("LCD did not acknowledge at {=u8:#x}", lcd::PCF8574_ADDRESS);
    }

    // 7. Configure USB Serial (via module)
    usb_module::init(
        pac.USB,
        pac.USB_DPRAM,
        clocks.usb_clock,
        &mut pac.RESETS,
    );

    Board {
        display,
        adc: JoystickAdc { _adc: adc },
        buttons,
        alarm,
    }
}

/// Unmask the periodic timer and ADC interrupts.
///
/// Call only after the shared state the handlers use has been installed.
pub fn enable_interrupts() {
    unsafe {
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::TIMER0_IRQ_0);
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::ADC_IRQ_FIFO);
    }
}
