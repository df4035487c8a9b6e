//! The coordinator: all state shared between the two interrupt handlers, and the handlers
//! themselves.
//!
//! Firmware keeps one [`Appliance`] inside a [`Shared`](crate::shared::Shared) and calls
//! [`Appliance::on_timer_overflow`] from the periodic timer interrupt and
//! [`Appliance::on_conversion_complete`] from the ADC interrupt. Each call is run to completion
//! inside a single critical section, so multi-field updates are never observed half done.

use crate::channel::{AdcMux, Channel};
use crate::config::{grid, timing};
use crate::countdown::{CountdownContext, CountdownEvent, CountdownFsm, CountdownTimer, Field, Readout};
use crate::cursor::{CursorPosition, Deflection};
use crate::surface::{AnalogConverter, Buttons, DigitalInputs, DisplaySurface};

/// Counts periodic ticks to derive the countdown cadence.
#[derive(Debug, Default)]
pub struct Cadence {
    overflows: u8,
}

impl Cadence {
    /// Returns `true` on every `OVERFLOWS_PER_COUNTDOWN`th call.
    pub fn advance(&mut self) -> bool {
        self.overflows += 1;
        if self.overflows >= timing::OVERFLOWS_PER_COUNTDOWN {
            self.overflows = 0;
            true
        } else {
            false
        }
    }

    pub fn overflows(&self) -> u8 {
        self.overflows
    }
}

pub struct Appliance {
    cursor: CursorPosition,
    mux: AdcMux,
    buttons: Buttons,
    cadence: Cadence,
    fsm: CountdownFsm,
    ctx: CountdownContext,
}

impl Appliance {
    /// Power-on state: cursor at the origin, `00:00.0`, idle.
    pub fn new() -> Self {
        Self::with_countdown(CountdownTimer::ZERO, false)
    }

    /// Start from a preset countdown, optionally already counting.
    pub fn with_countdown(timer: CountdownTimer, counting: bool) -> Self {
        let mut ctx = CountdownContext { timer };
        let mut fsm = CountdownFsm::Idle;
        fsm.init(&mut ctx);
        if counting {
            fsm.dispatch(&mut ctx, &CountdownEvent::Start);
        }

        Self {
            cursor: CursorPosition::ORIGIN,
            mux: AdcMux::new(),
            buttons: Buttons::default(),
            cadence: Cadence::default(),
            fsm,
            ctx,
        }
    }

    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    pub fn countdown(&self) -> CountdownTimer {
        self.ctx.timer
    }

    pub fn is_counting(&self) -> bool {
        self.fsm.is_counting()
    }

    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    pub fn pending_channel(&self) -> Option<Channel> {
        self.mux.in_flight()
    }

    /// Periodic dispatcher, one call per timer event.
    ///
    /// Returns the readout when this call rendered it, i.e. on every countdown tick.
    pub fn on_timer_overflow<A, I, D>(
        &mut self,
        adc: &mut A,
        inputs: &mut I,
        display: &mut D,
    ) -> Option<Readout>
    where
        A: AnalogConverter,
        I: DigitalInputs,
        D: DisplaySurface,
    {
        let channel = self.mux.select_next();
        adc.select_channel(channel);
        adc.start_conversion();

        self.buttons = inputs.sample();

        if self.buttons.joystick {
            if let Some(field) = Field::at(self.cursor) {
                self.fsm.dispatch(&mut self.ctx, &CountdownEvent::Adjust(field));
            }
        }
        if self.buttons.encoder {
            self.fsm.dispatch(&mut self.ctx, &CountdownEvent::Start);
        }

        let readout = if self.cadence.advance() {
            self.fsm.dispatch(&mut self.ctx, &CountdownEvent::Tick);
            Some(self.render(display))
        } else {
            None
        };

        self.fsm.dispatch(
            &mut self.ctx,
            &CountdownEvent::Settle {
                both_pressed: self.buttons.both(),
            },
        );

        readout
    }

    /// Conversion completion handler, one call per finished sample (10-bit units).
    pub fn on_conversion_complete<D: DisplaySurface>(&mut self, sample: u16, display: &mut D) {
        let Some(channel) = self.mux.complete() else {
            warn!("sample {} arrived with no conversion pending", sample);
            return;
        };
        trace!("{:?} = {}", channel, sample);

        let deflection = Deflection::from_sample(sample);
        let moved = match channel {
            Channel::AxisX => self.cursor.apply_horizontal(deflection),
            Channel::AxisY => self.cursor.apply_vertical(deflection),
        };
        if moved {
            debug!("cursor {:?}", self.cursor);
        }

        self.place_cursor(display);
    }

    /// Write `MM:SS.T` to the readout row and put the display cursor back on the edit cursor.
    pub fn render<D: DisplaySurface>(&self, display: &mut D) -> Readout {
        let readout = self.ctx.timer.readout();
        if display
            .position_cursor(0, grid::READOUT_ROW)
            .and_then(|()| display.write_text(&readout))
            .is_err()
        {
            warn!("readout write failed");
        }
        self.place_cursor(display);
        readout
    }

    fn place_cursor<D: DisplaySurface>(&self, display: &mut D) {
        if display.position_cursor(self.cursor.x, self.cursor.y).is_err() {
            warn!("cursor reposition failed");
        }
    }
}

impl Default for Appliance {
    fn default() -> Self {
        Self::new()
    }
}
