//! HD44780 character LCD behind a PCF8574 I2C backpack.
//!
//! The PCF8574 drives the LCD's 4-bit interface: each LCD byte is sent as two nibbles, and each
//! nibble as two I2C writes (enable high, then enable low to latch it).
//!
//! ```text
//! PCF8574 | P7 P6 P5 P4 | P3 | P2 | P1 | P0
//! LCD     | D7 D6 D5 D4 | BL | EN | RW | RS
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::lcd as geometry;
use crate::surface::DisplaySurface;

/// Control lines on the expander's low nibble.
mod bits {
    pub const RS: u8 = 0x01;
    pub const EN: u8 = 0x04;
    pub const BACKLIGHT: u8 = 0x08;
}

/// Controller instruction set.
mod commands {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const SET_DDRAM_ADDR: u8 = 0x80;

    pub const ENTRY_LEFT: u8 = 0x02;

    pub const DISPLAY_ON: u8 = 0x04;
    pub const CURSOR_ON: u8 = 0x02;
    pub const BLINK_ON: u8 = 0x01;

    pub const TWO_LINE: u8 = 0x08;
    pub const FONT_5X8: u8 = 0x00;
}

/// DDRAM start address of each row.
const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

pub struct Lcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<I2C: I2c, D: DelayNs> Lcd<I2C, D> {
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: true,
        }
    }

    /// Datasheet 4-bit initialisation, then display on with a blinking cursor, cleared.
    pub fn init(&mut self) -> Result<(), I2C::Error> {
        self.delay.delay_ms(50);

        // Three 8-bit "function set" nibbles force a known state, then switch to 4-bit.
        self.send_nibble(0x03, false)?;
        self.delay.delay_ms(5);
        self.send_nibble(0x03, false)?;
        self.delay.delay_ms(1);
        self.send_nibble(0x03, false)?;
        self.delay.delay_ms(1);
        self.send_nibble(0x02, false)?;
        self.delay.delay_ms(1);

        self.command(commands::FUNCTION_SET | commands::TWO_LINE | commands::FONT_5X8)?;
        self.command(
            commands::DISPLAY_CONTROL
                | commands::DISPLAY_ON
                | commands::CURSOR_ON
                | commands::BLINK_ON,
        )?;
        self.clear()?;
        self.command(commands::ENTRY_MODE_SET | commands::ENTRY_LEFT)
    }

    pub fn clear(&mut self) -> Result<(), I2C::Error> {
        self.command(commands::CLEAR_DISPLAY)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    /// Move the cursor. Out-of-range coordinates are clamped to the panel.
    pub fn set_cursor(&mut self, column: u8, row: u8) -> Result<(), I2C::Error> {
        let column = column.min(geometry::COLUMNS - 1);
        let row = usize::from(row.min(geometry::ROWS - 1));
        self.command(commands::SET_DDRAM_ADDR | (ROW_OFFSETS[row] + column))
    }

    /// Print at the current cursor position. Non-ASCII characters show as `?`.
    pub fn print(&mut self, text: &str) -> Result<(), I2C::Error> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.send_byte(byte, true)?;
        }
        Ok(())
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), I2C::Error> {
        self.backlight = on;
        // The backlight bit rides along with every expander write.
        self.write_expander(self.control_bits(false))
    }

    fn command(&mut self, command: u8) -> Result<(), I2C::Error> {
        self.send_byte(command, false)
    }

    fn send_byte(&mut self, value: u8, data: bool) -> Result<(), I2C::Error> {
        self.send_nibble(value >> 4, data)?;
        self.send_nibble(value & 0x0F, data)?;
        self.delay.delay_us(40);
        Ok(())
    }

    fn send_nibble(&mut self, nibble: u8, data: bool) -> Result<(), I2C::Error> {
        let base = ((nibble & 0x0F) << 4) | self.control_bits(data);
        self.write_expander(base | bits::EN)?;
        self.delay.delay_us(1);
        // Falling edge of EN latches the nibble.
        self.write_expander(base)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn control_bits(&self, data: bool) -> u8 {
        let rs = if data { bits::RS } else { 0 };
        let backlight = if self.backlight { bits::BACKLIGHT } else { 0 };
        rs | backlight
    }

    fn write_expander(&mut self, byte: u8) -> Result<(), I2C::Error> {
        self.i2c.write(self.address, &[byte])
    }
}

impl<I2C: I2c, D: DelayNs> DisplaySurface for Lcd<I2C, D> {
    type Error = I2C::Error;

    fn position_cursor(&mut self, column: u8, row: u8) -> Result<(), Self::Error> {
        self.set_cursor(column, row)
    }

    fn write_text(&mut self, text: &str) -> Result<(), Self::Error> {
        self.print(text)
    }
}
