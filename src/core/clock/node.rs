//=========================================================================
// Clock
//=========================================================================
//
// One node of the clock tree: local scale, pause and single-step flags,
// and the time it has accumulated.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::tree::ClockId;
use super::ClockError;

//=== Clock ===============================================================

#[derive(Debug, Clone)]
pub struct Clock {
    pub(super) parent: Option<ClockId>,
    pub(super) children: Vec<ClockId>,

    time_scale: f64,
    paused: bool,
    step_pending: bool,

    total_seconds: f64,
    delta_seconds: f64,
    frame_count: u64,
}

impl Clock {
    pub(super) fn new(parent: Option<ClockId>) -> Self {
        Self {
            parent,
            children: Vec::new(),
            time_scale: 1.0,
            paused: false,
            step_pending: false,
            total_seconds: 0.0,
            delta_seconds: 0.0,
            frame_count: 0,
        }
    }

    //--- Control ----------------------------------------------------------

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Applies exactly one nominal frame on the next tick, then leaves the
    /// clock paused.
    pub fn step_single_frame(&mut self) {
        self.step_pending = true;
    }

    /// Zero freezes without pausing, values above one fast-forward.
    pub fn set_time_scale(&mut self, scale: f64) -> Result<(), ClockError> {
        if !scale.is_finite() || scale < 0.0 {
            return Err(ClockError::InvalidTimeScale(scale));
        }
        self.time_scale = scale;
        Ok(())
    }

    //--- Query API --------------------------------------------------------

    pub fn total_seconds(&self) -> f64 {
        self.total_seconds
    }

    pub fn delta_seconds(&self) -> f64 {
        self.delta_seconds
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_step_pending(&self) -> bool {
        self.step_pending
    }

    /// Number of ticks this clock has received.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn parent(&self) -> Option<ClockId> {
        self.parent
    }

    pub fn children(&self) -> &[ClockId] {
        &self.children
    }

    /// Instantaneous frames per second, 0 when no time passed.
    pub fn fps(&self) -> f64 {
        if self.delta_seconds > 0.0 {
            1.0 / self.delta_seconds
        } else {
            0.0
        }
    }

    //--- Advance ----------------------------------------------------------

    /// Consumes one tick and returns the delta this clock produced.
    pub(super) fn advance(&mut self, parent_delta: f64, nominal_frame_seconds: f64) -> f64 {
        let delta = if self.step_pending {
            self.step_pending = false;
            self.paused = true;
            nominal_frame_seconds
        } else if self.paused {
            0.0
        } else {
            parent_delta * self.time_scale
        };

        self.delta_seconds = delta;
        self.total_seconds += delta;
        self.frame_count += 1;
        delta
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NOMINAL: f64 = 1.0 / 60.0;

    #[test]
    fn running_clock_scales_parent_delta() {
        let mut clock = Clock::new(None);
        clock.set_time_scale(2.0).unwrap();

        assert_relative_eq!(clock.advance(0.25, NOMINAL), 0.5);
        assert_relative_eq!(clock.total_seconds(), 0.5);
        assert_eq!(clock.frame_count(), 1);
    }

    #[test]
    fn paused_clock_produces_zero_delta() {
        let mut clock = Clock::new(None);
        clock.pause();

        assert_eq!(clock.advance(0.5, NOMINAL), 0.0);
        assert_eq!(clock.total_seconds(), 0.0);
        assert_eq!(clock.fps(), 0.0);
    }

    #[test]
    fn step_ignores_scale_and_repauses() {
        let mut clock = Clock::new(None);
        clock.set_time_scale(0.1).unwrap();
        clock.step_single_frame();

        assert_relative_eq!(clock.advance(1.0, NOMINAL), NOMINAL);
        assert!(clock.is_paused());
        assert!(!clock.is_step_pending());
        assert_eq!(clock.advance(1.0, NOMINAL), 0.0);
    }

    #[test]
    fn toggle_pause_flips() {
        let mut clock = Clock::new(None);
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }

    #[test]
    fn invalid_time_scales_rejected() {
        let mut clock = Clock::new(None);

        assert_eq!(clock.set_time_scale(-1.0), Err(ClockError::InvalidTimeScale(-1.0)));
        assert!(clock.set_time_scale(f64::NAN).is_err());
        assert!(clock.set_time_scale(f64::INFINITY).is_err());
        assert_eq!(clock.time_scale(), 1.0);

        assert!(clock.set_time_scale(0.0).is_ok());
        assert_eq!(clock.advance(1.0, NOMINAL), 0.0);
        assert!(!clock.is_paused());
    }
}
