//! Compile-time configuration, grouped by concern.

/// Analog joystick thresholds, in 10-bit converter units (0..=1023).
pub mod adc {
    /// Samples strictly below this are a deflection towards the low end (left / up).
    pub const DEAD_ZONE_LOW: u16 = 400;
    /// Samples strictly above this are a deflection towards the high end (right / down).
    pub const DEAD_ZONE_HIGH: u16 = 600;
    /// Right shift applied to raw 12-bit RP2350 samples to bring them into 10-bit range.
    pub const SAMPLE_SHIFT: u8 = 2;
}

/// Layout of the `MM:SS.T` readout on the character grid.
pub mod grid {
    /// Width of the navigable region, in columns.
    pub const WIDTH: u8 = 7;
    /// Last column the cursor may occupy.
    pub const LAST_COLUMN: u8 = WIDTH - 1;
    /// Columns holding the `:` and `.` separators. Never at column 0.
    pub const SEPARATOR_COLUMNS: [u8; 2] = [2, 5];
    /// Number of display rows the cursor toggles between.
    pub const ROWS: u8 = 2;
    /// Row the readout is written to.
    pub const READOUT_ROW: u8 = 0;
}

/// Periodic tick and countdown cadence.
pub mod timing {
    /// Period of the hardware timer event driving the dispatcher.
    pub const OVERFLOW_PERIOD_US: u32 = 33_000;
    /// Periodic ticks per countdown tick (3 x 33 ms ~ 100 ms).
    pub const OVERFLOWS_PER_COUNTDOWN: u8 = 3;
}

/// Upper bounds applied when editing the countdown fields.
pub mod limits {
    pub const MAX_MINUTES: u8 = 99;
    pub const MAX_SECONDS: u8 = 59;
    pub const MAX_TENTHS: u8 = 9;
}

/// Character LCD behind a PCF8574 I2C backpack.
pub mod lcd {
    /// Default PCF8574 address (A0..A2 jumpers open).
    pub const PCF8574_ADDRESS: u8 = 0x27;
    pub const COLUMNS: u8 = 16;
    pub const ROWS: u8 = 2;
    pub const I2C_FREQUENCY_HZ: u32 = 400_000;
}
