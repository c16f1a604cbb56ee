//! The monitoring control loop state machine
//!
//! Owns all timing state for the nightly monitoring window: the window
//! gate, the remembered light state, and the two independent sensor
//! poll intervals. The board tick is two-phase so hardware stays out of
//! this crate: `tick()` reports which sensors are due this iteration,
//! the caller samples them and feeds the light level back through
//! `observe_light()`.

use crate::time::TimeOfDay;

/// Compile-time monitoring parameters.
///
/// `window_start`/`window_end` are matched against the current time of
/// day by exact equality. The gate toggles only during the literal
/// boundary second; a tick that skips that second misses the
/// transition. Range containment would change observable behavior, so
/// it is deliberately not used.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorConfig {
    /// Light level separating lit from unlit, in percent.
    pub light_threshold_percent: f32,
    /// Minimum elapsed time between light samples.
    pub light_interval_ms: u32,
    /// Minimum elapsed time between temperature samples.
    pub temperature_interval_ms: u32,
    /// Time of day at which monitoring becomes active.
    pub window_start: TimeOfDay,
    /// Time of day at which monitoring becomes inactive.
    pub window_end: TimeOfDay,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            light_threshold_percent: 40.0,
            light_interval_ms: 1_000,
            temperature_interval_ms: 5_000,
            window_start: TimeOfDay::new(18, 0, 0),
            window_end: TimeOfDay::new(6, 0, 0),
        }
    }
}

/// Whether monitoring logic runs at all this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gate {
    Active,
    Inactive,
}

/// The remembered room light state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightState {
    Lit,
    Unlit,
}

/// A detected light state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightTransition {
    On,
    Off,
}

/// Sensors due for sampling this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Due {
    pub light: bool,
    pub temperature: bool,
}

/// All monitoring state, owned by the monitor task.
#[derive(Debug)]
pub struct Monitor {
    config: MonitorConfig,
    gate: Gate,
    light: LightState,
    last_light_check_ms: u32,
    last_temperature_check_ms: u32,
}

impl Monitor {
    /// Monitoring starts gated-on with the room remembered as unlit;
    /// the first `window_end` boundary closes the gate.
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            gate: Gate::Active,
            light: LightState::Unlit,
            last_light_check_ms: 0,
            last_temperature_check_ms: 0,
        }
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    pub fn light_state(&self) -> LightState {
        self.light
    }

    /// Run one loop iteration's bookkeeping.
    ///
    /// Updates the window gate from `time_of_day`, then reports which
    /// sensors are due given `elapsed_ms` (monotonic milliseconds since
    /// boot). A due sensor's last-checked stamp advances here,
    /// regardless of what the caller later observes. Stamps do not
    /// advance while the gate is inactive, so reopening the window
    /// samples both sensors on the next tick.
    ///
    /// Interval compares use `wrapping_sub`, tolerant of the ~49.7 day
    /// u32 millisecond wraparound.
    pub fn tick(&mut self, time_of_day: TimeOfDay, elapsed_ms: u32) -> Due {
        if time_of_day == self.config.window_start {
            self.gate = Gate::Active;
        }
        if time_of_day == self.config.window_end {
            self.gate = Gate::Inactive;
        }

        let mut due = Due::default();
        if self.gate == Gate::Inactive {
            return due;
        }

        if elapsed_ms.wrapping_sub(self.last_light_check_ms) >= self.config.light_interval_ms {
            due.light = true;
            self.last_light_check_ms = elapsed_ms;
        }

        if elapsed_ms.wrapping_sub(self.last_temperature_check_ms)
            >= self.config.temperature_interval_ms
        {
            due.temperature = true;
            self.last_temperature_check_ms = elapsed_ms;
        }

        due
    }

    /// Feed a fresh light sample and detect a state transition.
    ///
    /// Single-threshold, hysteresis-free, compared against the
    /// *remembered state*: above the threshold while unlit turns the
    /// room lit, below while lit turns it unlit. Repeated samples on
    /// the same side of the threshold are silent after the first, and
    /// a sample exactly at the threshold never transitions.
    pub fn observe_light(&mut self, level_percent: f32) -> Option<LightTransition> {
        match self.light {
            LightState::Unlit if level_percent > self.config.light_threshold_percent => {
                self.light = LightState::Lit;
                Some(LightTransition::On)
            }
            LightState::Lit if level_percent < self.config.light_threshold_percent => {
                self.light = LightState::Unlit;
                Some(LightTransition::Off)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MonitorConfig {
        MonitorConfig::default()
    }

    // An arbitrary non-boundary time of day
    const MIDDAY: TimeOfDay = TimeOfDay::new(12, 30, 5);

    #[test]
    fn light_transitions_once_per_threshold_crossing() {
        // Readings [10, 50, 55, 30] with threshold 40.0: events only
        // after 50 (on) and 30 (off)
        let mut m = Monitor::new(config());
        assert_eq!(m.observe_light(10.0), None);
        assert_eq!(m.observe_light(50.0), Some(LightTransition::On));
        assert_eq!(m.observe_light(55.0), None);
        assert_eq!(m.observe_light(30.0), Some(LightTransition::Off));
        assert_eq!(m.observe_light(30.0), None);
        assert_eq!(m.light_state(), LightState::Unlit);
    }

    #[test]
    fn threshold_itself_is_dead_ground() {
        let mut m = Monitor::new(config());
        assert_eq!(m.observe_light(40.0), None);
        assert_eq!(m.light_state(), LightState::Unlit);
        assert_eq!(m.observe_light(50.0), Some(LightTransition::On));
        assert_eq!(m.observe_light(40.0), None);
        assert_eq!(m.light_state(), LightState::Lit);
    }

    #[test]
    fn out_of_calibration_levels_are_accepted() {
        let mut m = Monitor::new(config());
        assert_eq!(m.observe_light(131.7), Some(LightTransition::On));
        assert_eq!(m.observe_light(-2.5), Some(LightTransition::Off));
    }

    #[test]
    fn gate_flips_only_at_exact_boundaries() {
        let mut m = Monitor::new(config());
        assert_eq!(m.gate(), Gate::Active);

        m.tick(config().window_end, 0);
        assert_eq!(m.gate(), Gate::Inactive);

        // One second past the boundary is not the boundary
        m.tick(TimeOfDay::new(6, 0, 1), 10);
        assert_eq!(m.gate(), Gate::Inactive);
        m.tick(TimeOfDay::new(17, 59, 59), 20);
        assert_eq!(m.gate(), Gate::Inactive);

        m.tick(config().window_start, 30);
        assert_eq!(m.gate(), Gate::Active);
    }

    #[test]
    fn boundary_set_is_idempotent() {
        let mut m = Monitor::new(config());
        m.tick(config().window_start, 0);
        assert_eq!(m.gate(), Gate::Active);
        m.tick(config().window_start, 10);
        assert_eq!(m.gate(), Gate::Active);
    }

    #[test]
    fn light_due_once_per_interval() {
        let mut m = Monitor::new(config());
        assert!(!m.tick(MIDDAY, 0).light);
        assert!(!m.tick(MIDDAY, 999).light);
        assert!(m.tick(MIDDAY, 1_000).light);
        assert!(!m.tick(MIDDAY, 1_500).light);
        assert!(m.tick(MIDDAY, 2_000).light);
    }

    #[test]
    fn temperature_due_every_interval_unconditionally() {
        let mut m = Monitor::new(config());
        assert!(!m.tick(MIDDAY, 0).temperature);
        assert!(m.tick(MIDDAY, 5_000).temperature);
        assert!(!m.tick(MIDDAY, 7_000).temperature);
        assert!(m.tick(MIDDAY, 10_000).temperature);
        assert!(m.tick(MIDDAY, 15_000).temperature);
    }

    #[test]
    fn closed_gate_suspends_sampling_and_stamps() {
        let mut m = Monitor::new(config());
        let due = m.tick(MIDDAY, 5_000);
        assert!(due.light && due.temperature);

        m.tick(config().window_end, 6_000);
        let due = m.tick(MIDDAY, 60_000);
        assert_eq!(due, Due::default());

        // Reopening samples both sensors on the boundary tick itself
        let due = m.tick(config().window_start, 90_000);
        assert!(due.light && due.temperature);
    }

    #[test]
    fn end_boundary_tick_does_not_sample() {
        // The gate update runs before the interval checks, so the
        // closing tick itself is already gated off
        let mut m = Monitor::new(config());
        let due = m.tick(config().window_end, 10_000);
        assert_eq!(due, Due::default());
    }

    #[test]
    fn interval_survives_millis_wraparound() {
        let mut m = Monitor::new(config());
        let near_wrap = u32::MAX - 200;
        let due = m.tick(MIDDAY, near_wrap);
        assert!(due.light && due.temperature);

        let due = m.tick(MIDDAY, near_wrap.wrapping_add(1_500));
        assert!(due.light);
        assert!(!due.temperature);

        let due = m.tick(MIDDAY, near_wrap.wrapping_add(5_000));
        assert!(due.temperature);
    }
}
