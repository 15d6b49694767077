/// Tracks simulation time: a monotonic tick counter and the in-world hour.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    start_hour: f64,
    hours_per_tick: f64,
    accumulated_hours: f64,
    day_start_hour: f64,
    night_start_hour: f64,
}

impl SimClock {
    /// Create a clock at tick 0 with daylight from 06:00 to 18:00.
    pub fn new(start_hour: f64, hours_per_tick: f64) -> Self {
        Self {
            tick: 0,
            start_hour: start_hour.rem_euclid(24.0),
            hours_per_tick,
            accumulated_hours: 0.0,
            day_start_hour: 6.0,
            night_start_hour: 18.0,
        }
    }

    /// Set the hours at which day and night begin.
    pub fn with_daylight(mut self, day_start_hour: f64, night_start_hour: f64) -> Self {
        self.day_start_hour = day_start_hour;
        self.night_start_hour = night_start_hour;
        self
    }

    /// Advance the clock by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.accumulated_hours += self.hours_per_tick;
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current hour of the day (0.0..24.0).
    pub fn hour_of_day(&self) -> f64 {
        (self.start_hour + self.accumulated_hours).rem_euclid(24.0)
    }

    /// Whole in-world days elapsed since tick 0.
    pub fn day(&self) -> u64 {
        ((self.start_hour + self.accumulated_hours) / 24.0).floor() as u64
    }

    /// True between the day and night start hours.
    pub fn is_daytime(&self) -> bool {
        let hour = self.hour_of_day();
        hour >= self.day_start_hour && hour < self.night_start_hour
    }

    /// Total elapsed in-world hours since simulation start.
    pub fn elapsed_hours(&self) -> f64 {
        self.accumulated_hours
    }

    /// Return the configured number of in-world hours per tick.
    pub fn hours_per_tick(&self) -> f64 {
        self.hours_per_tick
    }
}
