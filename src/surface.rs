//! Collaborators the appliance drives but does not implement.

use crate::channel::Channel;

/// A character display with an addressable cursor.
pub trait DisplaySurface {
    type Error;

    fn position_cursor(&mut self, column: u8, row: u8) -> Result<(), Self::Error>;

    /// Write text starting at the current cursor position.
    fn write_text(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// The two push buttons, sampled once per periodic tick.
pub trait DigitalInputs {
    fn sample(&mut self) -> Buttons;
}

/// The shared analog-to-digital converter.
///
/// Completion is delivered separately, by calling
/// [`Appliance::on_conversion_complete`](crate::appliance::Appliance::on_conversion_complete)
/// from the conversion interrupt.
pub trait AnalogConverter {
    fn select_channel(&mut self, channel: Channel);

    /// Fire-and-forget single conversion on the selected channel.
    fn start_conversion(&mut self);
}

/// Debounce-free snapshot of the buttons. `true` means held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(not(test), derive(defmt::Format))]
pub struct Buttons {
    pub joystick: bool,
    pub encoder: bool,
}

impl Buttons {
    pub fn both(&self) -> bool {
        self.joystick && self.encoder
    }
}
