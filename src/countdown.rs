//! Countdown digits and the state machine that decides when they move.

use core::fmt::Write as FmtWrite;
use heapless::String;
use typed_fsm::{state_machine, Transition};

use crate::config::limits;
use crate::cursor::CursorPosition;

/// Rendered `MM:SS.T` text.
pub type Readout = String<8>;

/// Minutes, seconds and tenths of the countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(not(test), derive(defmt::Format))]
pub struct CountdownTimer {
    // Field order gives the derived ordering its lexicographic meaning.
    pub minutes: u8,
    pub seconds: u8,
    pub tenths: u8,
}

impl CountdownTimer {
    pub const ZERO: Self = Self {
        minutes: 0,
        seconds: 0,
        tenths: 0,
    };

    /// Build a timer, saturating each field at its cap.
    pub fn new(minutes: u8, seconds: u8, tenths: u8) -> Self {
        Self {
            minutes: minutes.min(limits::MAX_MINUTES),
            seconds: seconds.min(limits::MAX_SECONDS),
            tenths: tenths.min(limits::MAX_TENTHS),
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Take one tenth of a second off, borrowing through seconds and minutes.
    ///
    /// Running out of minutes clamps every field to zero, so ticking `00:00.0` is a no-op.
    pub fn tick(&mut self) {
        if let Some(tenths) = self.tenths.checked_sub(1) {
            self.tenths = tenths;
            return;
        }
        self.tenths = limits::MAX_TENTHS;

        if let Some(seconds) = self.seconds.checked_sub(1) {
            self.seconds = seconds;
            return;
        }
        self.seconds = limits::MAX_SECONDS;

        match self.minutes.checked_sub(1) {
            Some(minutes) => self.minutes = minutes,
            None => *self = Self::ZERO,
        }
    }

    /// Add the field's place value, saturating at 99 minutes / 59 seconds.
    pub fn adjust(&mut self, field: Field) {
        match field {
            Field::MinutesTens | Field::MinutesUnits => {
                self.minutes = self
                    .minutes
                    .saturating_add(field.step())
                    .min(limits::MAX_MINUTES);
            }
            Field::SecondsTens | Field::SecondsUnits => {
                self.seconds = self
                    .seconds
                    .saturating_add(field.step())
                    .min(limits::MAX_SECONDS);
            }
        }
    }

    /// Format as `MM:SS.T`, zero-padded.
    pub fn readout(&self) -> Readout {
        let mut text = Readout::new();
        // Seven characters always fit in eight.
        let _ = FmtWrite::write_fmt(
            &mut text,
            format_args!("{:02}:{:02}.{}", self.minutes, self.seconds, self.tenths),
        );
        text
    }
}

/// An editable digit of the readout.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(not(test), derive(defmt::Format))]
pub enum Field {
    MinutesTens,
    MinutesUnits,
    SecondsTens,
    SecondsUnits,
}

impl Field {
    /// The field under the cursor, if the cursor sits on an editable digit.
    pub fn at(cursor: CursorPosition) -> Option<Self> {
        match (cursor.x, cursor.y) {
            (0, 0) => Some(Field::MinutesTens),
            (1, 0) => Some(Field::MinutesUnits),
            (3, 0) => Some(Field::SecondsTens),
            (4, 0) => Some(Field::SecondsUnits),
            _ => None,
        }
    }

    /// Place value added per edit.
    pub fn step(self) -> u8 {
        match self {
            Field::MinutesTens | Field::SecondsTens => 10,
            Field::MinutesUnits | Field::SecondsUnits => 1,
        }
    }
}

// FSM Context
pub struct CountdownContext {
    pub timer: CountdownTimer,
}

// FSM Events
#[derive(Clone, Copy, Debug)]
pub enum CountdownEvent {
    /// Joystick held on an editable digit.
    Adjust(Field),
    /// Encoder button held.
    Start,
    /// One countdown tick (every third periodic tick).
    Tick,
    /// End of a dispatch; returns to idle when the digits are spent or both buttons are held.
    Settle { both_pressed: bool },
}

state_machine! {
    Name: CountdownFsm,
    Context: CountdownContext,
    Event: CountdownEvent,
    States: {
        // Digits frozen, editable
        Idle => {
            entry: |ctx| {
                info!("countdown idle at {:?}", ctx.timer);
            }
            process: |ctx, evt| {
                match evt {
                    CountdownEvent::Adjust(field) => {
                        ctx.timer.adjust(*field);
                        debug!("{:?} -> {:?}", field, ctx.timer);
                        Transition::None
                    }
                    CountdownEvent::Start => Transition::To(CountdownFsm::Counting),
                    CountdownEvent::Tick => Transition::None,
                    CountdownEvent::Settle { .. } => Transition::None,
                }
            }
        },

        // Digits decrement on every tick
        Counting => {
            entry: |ctx| {
                info!("countdown started from {:?}", ctx.timer);
            }
            process: |ctx, evt| {
                match evt {
                    CountdownEvent::Adjust(field) => {
                        ctx.timer.adjust(*field);
                        debug!("{:?} -> {:?}", field, ctx.timer);
                        Transition::None
                    }
                    CountdownEvent::Start => Transition::None,
                    CountdownEvent::Tick => {
                        ctx.timer.tick();
                        Transition::None
                    }
                    CountdownEvent::Settle { both_pressed } => {
                        if *both_pressed || ctx.timer.is_zero() {
                            Transition::To(CountdownFsm::Idle)
                        } else {
                            Transition::None
                        }
                    }
                }
            }
        }
    }
}

impl CountdownFsm {
    pub fn is_counting(&self) -> bool {
        matches!(self, CountdownFsm::Counting)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(timer: CountdownTimer) -> (CountdownFsm, CountdownContext) {
        let mut ctx = CountdownContext { timer };
        let mut fsm = CountdownFsm::Idle;
        fsm.init(&mut ctx);
        (fsm, ctx)
    }

    #[test]
    fn borrow_through_minutes() {
        let mut timer = CountdownTimer::new(1, 0, 0);
        timer.tick();
        assert_eq!(timer, CountdownTimer::new(0, 59, 9));
    }

    #[test]
    fn borrow_through_seconds() {
        let mut timer = CountdownTimer::new(2, 30, 0);
        timer.tick();
        assert_eq!(timer, CountdownTimer::new(2, 29, 9));
    }

    #[test]
    fn tick_at_zero_stays_zero() {
        let mut timer = CountdownTimer::ZERO;
        timer.tick();
        assert!(timer.is_zero());
    }

    #[test]
    fn ticks_are_monotonic_until_zero() {
        for start in [
            CountdownTimer::new(0, 0, 5),
            CountdownTimer::new(0, 1, 0),
            CountdownTimer::new(1, 0, 0),
            CountdownTimer::new(3, 7, 2),
        ] {
            let mut timer = start;
            let mut previous = timer;
            while !timer.is_zero() {
                timer.tick();
                assert!(timer < previous, "{:?} did not decrease from {:?}", timer, previous);
                previous = timer;
            }
            timer.tick();
            assert!(timer.is_zero());
        }
    }

    #[test]
    fn tick_count_matches_total_tenths() {
        let mut timer = CountdownTimer::new(1, 2, 3);
        let mut ticks = 0;
        while !timer.is_zero() {
            timer.tick();
            ticks += 1;
        }
        assert_eq!(ticks, 623);
    }

    #[test]
    fn readout_is_zero_padded() {
        assert_eq!(CountdownTimer::new(5, 3, 7).readout().as_str(), "05:03.7");
        assert_eq!(CountdownTimer::new(42, 59, 0).readout().as_str(), "42:59.0");
        assert_eq!(CountdownTimer::ZERO.readout().as_str(), "00:00.0");
    }

    #[test]
    fn fields_map_to_top_row_digits() {
        let at = |x, y| Field::at(CursorPosition { x, y });
        assert_eq!(at(0, 0), Some(Field::MinutesTens));
        assert_eq!(at(1, 0), Some(Field::MinutesUnits));
        assert_eq!(at(3, 0), Some(Field::SecondsTens));
        assert_eq!(at(4, 0), Some(Field::SecondsUnits));
        assert_eq!(at(6, 0), None);
        assert_eq!(at(0, 1), None);
    }

    #[test]
    fn adjust_saturates() {
        let mut timer = CountdownTimer::new(95, 55, 0);
        timer.adjust(Field::MinutesTens);
        timer.adjust(Field::SecondsTens);
        assert_eq!(timer, CountdownTimer::new(99, 59, 0));

        timer.adjust(Field::MinutesUnits);
        timer.adjust(Field::SecondsUnits);
        assert_eq!(timer, CountdownTimer::new(99, 59, 0));
    }

    #[test]
    fn idle_ignores_ticks() {
        let (mut fsm, mut ctx) = machine(CountdownTimer::new(0, 10, 0));
        fsm.dispatch(&mut ctx, &CountdownEvent::Tick);
        assert_eq!(ctx.timer, CountdownTimer::new(0, 10, 0));
        assert!(!fsm.is_counting());
    }

    #[test]
    fn start_then_tick_decrements() {
        let (mut fsm, mut ctx) = machine(CountdownTimer::new(0, 10, 0));
        fsm.dispatch(&mut ctx, &CountdownEvent::Start);
        assert!(fsm.is_counting());
        fsm.dispatch(&mut ctx, &CountdownEvent::Tick);
        assert_eq!(ctx.timer, CountdownTimer::new(0, 9, 9));
    }

    #[test]
    fn settle_at_zero_returns_to_idle() {
        let (mut fsm, mut ctx) = machine(CountdownTimer::new(0, 0, 1));
        fsm.dispatch(&mut ctx, &CountdownEvent::Start);
        fsm.dispatch(&mut ctx, &CountdownEvent::Settle { both_pressed: false });
        assert!(fsm.is_counting());

        fsm.dispatch(&mut ctx, &CountdownEvent::Tick);
        fsm.dispatch(&mut ctx, &CountdownEvent::Settle { both_pressed: false });
        assert!(!fsm.is_counting());
        assert!(ctx.timer.is_zero());
    }

    #[test]
    fn both_buttons_stop_the_count() {
        let (mut fsm, mut ctx) = machine(CountdownTimer::new(1, 0, 0));
        fsm.dispatch(&mut ctx, &CountdownEvent::Start);
        fsm.dispatch(&mut ctx, &CountdownEvent::Settle { both_pressed: true });
        assert!(!fsm.is_counting());
        assert_eq!(ctx.timer, CountdownTimer::new(1, 0, 0));
    }

    #[test]
    fn edits_apply_in_both_states() {
        let (mut fsm, mut ctx) = machine(CountdownTimer::ZERO);
        fsm.dispatch(&mut ctx, &CountdownEvent::Adjust(Field::MinutesTens));
        fsm.dispatch(&mut ctx, &CountdownEvent::Start);
        fsm.dispatch(&mut ctx, &CountdownEvent::Adjust(Field::SecondsUnits));
        assert_eq!(ctx.timer, CountdownTimer::new(10, 1, 0));
    }
}
