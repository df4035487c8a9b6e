//! Cursor navigation over the `MM:SS.T` readout.

use crate::config::{adc, grid};

/// Where a joystick axis sample falls relative to the dead zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(not(test), derive(defmt::Format))]
pub enum Deflection {
    Low,
    Centered,
    High,
}

impl Deflection {
    /// Classify a 10-bit sample. The dead zone bounds themselves count as centered.
    pub fn from_sample(value: u16) -> Self {
        if value > adc::DEAD_ZONE_HIGH {
            Deflection::High
        } else if value < adc::DEAD_ZONE_LOW {
            Deflection::Low
        } else {
            Deflection::Centered
        }
    }
}

/// Cursor cell on the character grid. `x` never rests on a separator column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(not(test), derive(defmt::Format))]
pub struct CursorPosition {
    pub x: u8,
    pub y: u8,
}

fn is_separator(column: u8) -> bool {
    grid::SEPARATOR_COLUMNS.contains(&column)
}

impl CursorPosition {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    /// Apply an X-axis deflection: high moves right, low moves left.
    ///
    /// Returns `true` if the cursor moved.
    pub fn apply_horizontal(&mut self, deflection: Deflection) -> bool {
        let column = match deflection {
            Deflection::High => next_column(self.x),
            Deflection::Low => previous_column(self.x),
            Deflection::Centered => return false,
        };
        self.x = column;
        true
    }

    /// Apply a Y-axis deflection: any deflection flips between the two rows.
    pub fn apply_vertical(&mut self, deflection: Deflection) -> bool {
        if deflection == Deflection::Centered {
            return false;
        }
        self.y = (self.y + 1) % grid::ROWS;
        true
    }
}

/// One step right, hopping over a separator and wrapping past the last column.
fn next_column(x: u8) -> u8 {
    let mut column = x + 1;
    if is_separator(column) {
        column += 1;
    }
    if column > grid::LAST_COLUMN { 0 } else { column }
}

/// One step left, hopping over a separator and wrapping below column 0.
fn previous_column(x: u8) -> u8 {
    match x.checked_sub(1) {
        None => grid::LAST_COLUMN,
        // separators never sit at column 0
        Some(column) if is_separator(column) => column - 1,
        Some(column) => column,
    }
}
