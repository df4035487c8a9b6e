//! Time-multiplexing of the single converter across the two joystick axes.

/// One of the two logical analog inputs sharing the converter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(not(test), derive(defmt::Format))]
pub enum Channel {
    AxisX,
    AxisY,
}

impl Channel {
    /// Converter input selector for this channel.
    pub const fn index(self) -> u8 {
        match self {
            Channel::AxisX => 0,
            Channel::AxisY => 1,
        }
    }

    pub const fn other(self) -> Self {
        match self {
            Channel::AxisX => Channel::AxisY,
            Channel::AxisY => Channel::AxisX,
        }
    }
}

/// The only channel selector in the system.
///
/// The dispatcher calls [`AdcMux::select_next`] when it programs the converter; the completion
/// handler calls [`AdcMux::complete`] to learn which axis the finished sample belongs to. Each
/// side performs exactly one transition per event, so the two can never disagree.
#[derive(Debug)]
pub struct AdcMux {
    next: Channel,
    in_flight: Option<Channel>,
}

impl AdcMux {
    pub const fn new() -> Self {
        Self {
            next: Channel::AxisX,
            in_flight: None,
        }
    }

    /// Advance the selector and mark the returned channel as converting.
    pub fn select_next(&mut self) -> Channel {
        let channel = self.next;
        self.next = channel.other();
        if let Some(stale) = self.in_flight.replace(channel) {
            warn!("conversion on {:?} never completed", stale);
        }
        channel
    }

    /// Take the channel of the conversion that just finished, if one was started.
    pub fn complete(&mut self) -> Option<Channel> {
        self.in_flight.take()
    }

    pub fn in_flight(&self) -> Option<Channel> {
        self.in_flight
    }
}

impl Default for AdcMux {
    fn default() -> Self {
        Self::new()
    }
}
