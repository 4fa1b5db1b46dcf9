/// Degrees swept by the minute and second needles per unit.
const DEGREES_PER_MINUTE: f32 = 6.0;
/// Degrees swept by the hour needle per hour.
const DEGREES_PER_HOUR: f32 = 30.0;
/// Needle angles are measured from 3 o'clock; 12 o'clock sits a quarter turn back.
const TWELVE_O_CLOCK: f32 = -90.0;

/// A time of day as shown on a 12 hour dial.
///
/// Sampled fresh for every repaint and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
}

impl TimeOfDay {
    /// Builds a time from a 24 hour (or 12 hour) reading.
    ///
    /// Out of range fields wrap: hours modulo 12, minutes and seconds modulo 60.
    pub const fn from_hms(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour % 12,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// Builds a time from the number of seconds elapsed since midnight.
    pub const fn from_seconds_of_day(seconds: u32) -> Self {
        let seconds = seconds % 86_400;
        Self::from_hms(
            (seconds / 3600) as u8,
            ((seconds / 60) % 60) as u8,
            (seconds % 60) as u8,
        )
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Second needle angle in degrees, 0° at 3 o'clock, clockwise.
    pub fn second_angle(&self) -> f32 {
        self.second as f32 * DEGREES_PER_MINUTE + TWELVE_O_CLOCK
    }

    /// Minute needle angle; creeps forward with the seconds.
    pub fn minute_angle(&self) -> f32 {
        (self.minute as f32 + self.second as f32 / 60.0) * DEGREES_PER_MINUTE + TWELVE_O_CLOCK
    }

    /// Hour needle angle; creeps forward with minutes and seconds.
    pub fn hour_angle(&self) -> f32 {
        let hours =
            self.hour as f32 + self.minute as f32 / 60.0 + self.second as f32 / 3600.0;
        hours * DEGREES_PER_HOUR + TWELVE_O_CLOCK
    }
}

/// Source of the current time of day.
pub trait WallClock {
    fn now(&self) -> TimeOfDay;
}

/// A fixed reading is its own clock.
impl WallClock for TimeOfDay {
    fn now(&self) -> TimeOfDay {
        *self
    }
}

impl<C: WallClock + ?Sized> WallClock for &C {
    fn now(&self) -> TimeOfDay {
        (**self).now()
    }
}

/// Software clock advanced by a 1 Hz tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockState {
    pub hours: u8,
    pub mins: u8,
    pub secs: u8,
}

impl ClockState {
    pub fn new(hours: u8, mins: u8, secs: u8) -> Self {
        Self {
            hours: hours % 24,
            mins: mins % 60,
            secs: secs % 60,
        }
    }

    /// Advances one second, rolling over into minutes.
    pub fn tick(&mut self) {
        self.secs += 1;
        if self.secs >= 60 {
            self.secs = 0;
            self.add_minute();
        }
    }

    /// Advances one minute, rolling over into hours.
    pub fn add_minute(&mut self) {
        self.mins += 1;
        if self.mins >= 60 {
            self.mins = 0;
            self.hours = (self.hours + 1) % 24;
        }
    }
}

impl WallClock for ClockState {
    fn now(&self) -> TimeOfDay {
        TimeOfDay::from_hms(self.hours, self.mins, self.secs)
    }
}
