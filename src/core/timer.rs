//! Animation timers - accumulate delta time and expose normalized progress

/// Timer behavior once the period elapses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// Wrap back to the start of the period
    Loop,
    /// Stop at the end of the period
    Once,
}

/// Looping timer - drives periodic animation via a [0,1) phase value
#[derive(Debug, Clone, Copy)]
pub struct LoopTimer {
    mode: TimerMode,
    period: f32,
    elapsed: f32,
}

impl LoopTimer {
    /// Create timer with given mode and period in seconds. Non-positive
    /// periods are clamped to the smallest positive value so `phase()`
    /// stays finite.
    pub fn new(mode: TimerMode, period_secs: f32) -> Self {
        Self {
            mode,
            period: period_secs.max(f32::MIN_POSITIVE),
            elapsed: 0.0,
        }
    }

    /// Advance by delta seconds; negative deltas are treated as zero
    pub fn advance(&mut self, delta_secs: f32) {
        self.elapsed += delta_secs.max(0.0);

        match self.mode {
            TimerMode::Loop => {
                if self.elapsed >= self.period {
                    self.elapsed %= self.period;
                }
            }
            TimerMode::Once => {
                if self.elapsed > self.period {
                    self.elapsed = self.period;
                }
            }
        }
    }

    /// Fraction of the period elapsed, in [0, 1) for Loop mode
    /// (Once mode saturates at 1.0)
    pub fn phase(&self) -> f32 {
        self.elapsed / self.period
    }

    /// Rewind to the start of the period
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_phase_stays_in_unit_interval() {
        let mut timer = LoopTimer::new(TimerMode::Loop, 30.0);

        timer.advance(7.5);
        assert_eq!(timer.phase(), 0.25);

        timer.advance(22.5); // Exactly one full period total
        assert!(timer.phase() >= 0.0 && timer.phase() < 1.0);
        assert_eq!(timer.phase(), 0.0);
    }

    #[test]
    fn loop_wraps_modulo_period() {
        let mut a = LoopTimer::new(TimerMode::Loop, 10.0);
        let mut b = LoopTimer::new(TimerMode::Loop, 10.0);

        a.advance(23.0);
        b.advance(3.0); // 23 mod 10

        assert!((a.phase() - b.phase()).abs() < 1e-5);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut timer = LoopTimer::new(TimerMode::Loop, 10.0);

        timer.advance(2.0);
        timer.advance(-5.0);

        assert_eq!(timer.phase(), 0.2);
    }

    #[test]
    fn once_saturates_at_end() {
        let mut timer = LoopTimer::new(TimerMode::Once, 2.0);

        timer.advance(5.0);
        assert_eq!(timer.phase(), 1.0);

        timer.advance(5.0);
        assert_eq!(timer.phase(), 1.0);
    }

    #[test]
    fn non_positive_period_keeps_phase_finite() {
        let mut timer = LoopTimer::new(TimerMode::Loop, 0.0);
        timer.advance(1.0 / 60.0);
        assert!(
            timer.phase().is_finite(),
            "phase must stay finite with a zero period, got {}",
            timer.phase()
        );
        assert!(timer.phase() >= 0.0 && timer.phase() < 1.0);

        let mut timer = LoopTimer::new(TimerMode::Loop, -5.0);
        timer.advance(0.25);
        assert!(timer.phase().is_finite());
    }

    #[test]
    fn reset_rewinds() {
        let mut timer = LoopTimer::new(TimerMode::Loop, 10.0);

        timer.advance(4.0);
        timer.reset();

        assert_eq!(timer.phase(), 0.0);
    }
}
