//! Warehouse calibration and progress
//!
//! The first motion sample after load (or after a recalibration) fixes the
//! reference heading and tilt. Later samples are read relative to them,
//! clamped to a window either side so the room never pans past its edges.

use crate::settings::Tuning;

const FULL_TURN: f32 = 360.0;

#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseState {
    /// Degrees either side of the reference heading
    window: f32,
    /// Gravity-z either side of the reference tilt
    z_window: f32,
    init_heading: Option<f32>,
    /// Added to raw headings so the window never straddles north
    bias: f32,
    init_gravity_z: Option<f32>,
    lens_lit: bool,
    won: bool,
}

/// The window border an out-of-window heading is nearer to, walking the
/// compass the short way round
fn closest_border(heading: f32, min: f32, max: f32) -> f32 {
    let past_max = (heading - max).rem_euclid(FULL_TURN);
    let before_min = (min - heading).rem_euclid(FULL_TURN);
    if past_max >= before_min { min } else { max }
}

impl WarehouseState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            window: tuning.heading_window,
            z_window: tuning.gravity_z_window,
            init_heading: None,
            bias: 0.0,
            init_gravity_z: None,
            lens_lit: false,
            won: false,
        }
    }

    pub fn is_calibrated(&self) -> bool {
        self.init_heading.is_some() && self.init_gravity_z.is_some()
    }

    /// Take the reference from this sample unless one is already set.
    /// Returns whether it did.
    pub fn calibrate(&mut self, heading: f32, gravity_z: f32) -> bool {
        let mut changed = false;
        if self.init_heading.is_none() {
            let heading = heading.rem_euclid(FULL_TURN);
            // Near north the reference is pushed inwards and the bias
            // shifts every later reading by the same amount
            let (init, bias) = if FULL_TURN - heading < self.window {
                let init = FULL_TURN - self.window;
                (init, init - heading)
            } else if heading < self.window {
                (self.window, self.window - heading)
            } else {
                (heading, 0.0)
            };
            self.init_heading = Some(init);
            self.bias = bias;
            changed = true;
            log::debug!("warehouse: heading reference {init:.1} (bias {bias:.1})");
        }
        if self.init_gravity_z.is_none() {
            let limit = (1.0 - self.z_window).max(0.0);
            let z = gravity_z.clamp(-limit, limit);
            self.init_gravity_z = Some(z);
            changed = true;
            log::debug!("warehouse: tilt reference {z:.2}");
        }
        changed
    }

    /// Forget the reference; the next sample becomes the new one
    pub fn recalibrate(&mut self) {
        self.init_heading = None;
        self.init_gravity_z = None;
        self.bias = 0.0;
    }

    pub fn init_heading(&self) -> Option<f32> {
        self.init_heading
    }

    pub fn bias(&self) -> f32 {
        self.bias
    }

    pub fn min_heading(&self) -> f32 {
        self.init_heading.map_or(0.0, |h| h - self.window)
    }

    pub fn max_heading(&self) -> f32 {
        self.init_heading.map_or(0.0, |h| h + self.window)
    }

    /// Raw heading shifted by the bias and held inside the window
    pub fn biased_heading(&self, heading: f32) -> f32 {
        let biased = (heading + self.bias).rem_euclid(FULL_TURN);
        let (min, max) = (self.min_heading(), self.max_heading());
        if (min..=max).contains(&biased) {
            biased
        } else {
            closest_border(biased, min, max)
        }
    }

    /// Reference minus the current heading; positive when turned left
    pub fn heading_delta(&self, heading: f32) -> f32 {
        self.init_heading.unwrap_or(0.0) - self.biased_heading(heading)
    }

    pub fn gravity_delta(&self, gravity_z: f32) -> f32 {
        gravity_z - self.init_gravity_z.unwrap_or(0.0)
    }

    pub fn is_lens_lit(&self) -> bool {
        self.lens_lit
    }

    /// Flashlight found the lens; true only the first time
    pub fn light_lens(&mut self) -> bool {
        if self.lens_lit {
            return false;
        }
        self.lens_lit = true;
        true
    }

    pub fn is_won(&self) -> bool {
        self.won
    }

    /// Latch the win once the lens is lit; true exactly once
    pub fn check_win(&mut self) -> bool {
        if self.won || !self.lens_lit {
            return false;
        }
        self.won = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn state() -> WarehouseState {
        WarehouseState::new(&Tuning::default())
    }

    #[test]
    fn test_plain_calibration() {
        let mut s = state();
        assert!(s.calibrate(120.0, 0.1));
        assert_eq!(s.init_heading(), Some(120.0));
        assert_eq!(s.bias(), 0.0);
        assert_eq!(s.heading_delta(120.0), 0.0);
        assert_eq!(s.heading_delta(130.0), -10.0);
        assert!((s.gravity_delta(0.3) - 0.2).abs() < 1e-6);

        // Already calibrated
        assert!(!s.calibrate(200.0, 0.5));
        assert_eq!(s.init_heading(), Some(120.0));
    }

    #[test]
    fn test_calibration_near_north_is_biased() {
        let mut s = state();
        s.calibrate(300.0, 0.0);
        assert_eq!(s.init_heading(), Some(280.0));
        assert_eq!(s.bias(), -20.0);
        assert_eq!(s.heading_delta(300.0), 0.0);

        let mut s = state();
        s.calibrate(10.0, 0.0);
        assert_eq!(s.init_heading(), Some(80.0));
        assert_eq!(s.bias(), 70.0);
        assert_eq!(s.biased_heading(10.0), 80.0);
        assert_eq!(s.biased_heading(350.0), 60.0);
    }

    #[test]
    fn test_turning_across_north_keeps_counting() {
        let mut s = state();
        s.calibrate(359.0, 0.0);
        // 11 degrees further clockwise, past north
        assert!((s.biased_heading(10.0) - 291.0).abs() < 1e-3);
        assert!((s.heading_delta(10.0) + 11.0).abs() < 1e-3);
    }

    #[test]
    fn test_out_of_window_clamps_to_closest_border() {
        let mut s = state();
        s.calibrate(180.0, 0.0);
        assert_eq!(s.min_heading(), 100.0);
        assert_eq!(s.max_heading(), 260.0);
        assert_eq!(s.biased_heading(300.0), 260.0);
        assert_eq!(s.biased_heading(50.0), 100.0);
        // Behind the user: 350 is 90 past max, 110 short of min
        assert_eq!(s.biased_heading(350.0), 260.0);
    }

    #[test]
    fn test_tilt_reference_leaves_room_to_move() {
        let mut s = state();
        s.calibrate(90.0, 0.9);
        assert!((s.gravity_delta(0.4)).abs() < 1e-6);
        let mut s = state();
        s.calibrate(90.0, -0.95);
        assert!((s.gravity_delta(-0.4)).abs() < 1e-6);
    }

    #[test]
    fn test_recalibrate() {
        let mut s = state();
        s.calibrate(120.0, 0.0);
        s.recalibrate();
        assert!(!s.is_calibrated());
        assert!(s.calibrate(200.0, 0.2));
        assert_eq!(s.init_heading(), Some(200.0));
    }

    #[test]
    fn test_win_needs_the_lens_and_latches() {
        let mut s = state();
        assert!(!s.check_win());
        assert!(s.light_lens());
        assert!(!s.light_lens());
        assert!(s.check_win());
        assert!(!s.check_win());
        assert!(s.is_won());
    }

    proptest! {
        #[test]
        fn prop_biased_heading_stays_in_window(start in 0.0f32..360.0, heading in 0.0f32..360.0) {
            let mut s = state();
            s.calibrate(start, 0.0);
            let biased = s.biased_heading(heading);
            prop_assert!(biased >= s.min_heading() - 1e-3);
            prop_assert!(biased <= s.max_heading() + 1e-3);
            prop_assert!(s.heading_delta(heading).abs() <= 80.0 + 1e-3);
        }
    }
}
