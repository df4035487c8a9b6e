//! Recording stand-ins for the hardware collaborators.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, Operation, SevenBitAddress};

use crate::channel::Channel;
use crate::surface::{AnalogConverter, Buttons, DigitalInputs, DisplaySurface};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Surface {
    Cursor(u8, u8),
    Text(String),
}

#[derive(Default)]
pub struct RecordingDisplay {
    pub ops: Vec<Surface>,
    pub fail: bool,
}

impl DisplaySurface for RecordingDisplay {
    type Error = ();

    fn position_cursor(&mut self, column: u8, row: u8) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.ops.push(Surface::Cursor(column, row));
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.ops.push(Surface::Text(text.into()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingAdc {
    pub selected: Vec<Channel>,
    pub started: usize,
}

impl AnalogConverter for RecordingAdc {
    fn select_channel(&mut self, channel: Channel) {
        self.selected.push(channel);
    }

    fn start_conversion(&mut self) {
        self.started += 1;
    }
}

/// Returns whatever `buttons` currently holds.
#[derive(Default)]
pub struct ScriptedInputs {
    pub buttons: Buttons,
}

impl DigitalInputs for ScriptedInputs {
    fn sample(&mut self) -> Buttons {
        self.buttons
    }
}

/// I2C bus that logs every byte written to each address.
#[derive(Default)]
pub struct RecordingBus {
    pub writes: Vec<(u8, u8)>,
    pub fail: bool,
}

impl ErrorType for RecordingBus {
    type Error = ErrorKind;
}

impl I2c<SevenBitAddress> for RecordingBus {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(ErrorKind::Bus);
        }
        for operation in operations {
            if let Operation::Write(bytes) = operation {
                self.writes.extend(bytes.iter().map(|byte| (address, *byte)));
            }
        }
        Ok(())
    }
}

/// Delay that only accumulates the requested time.
#[derive(Default)]
pub struct NoDelay {
    pub elapsed_ns: u64,
}

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += u64::from(ns);
    }
}
