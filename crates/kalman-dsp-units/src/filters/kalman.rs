// SPDX-License-Identifier: LGPL-3.0-or-later

//! Single-channel scalar Kalman filter with parameter management.
//!
//! Wraps a [`KalmanState`] from `kalman-dsp-lib` with chainable setters
//! and buffer processing.

use kalman_dsp_lib::kalman::{
    kalman_process, kalman_process_cyclic, kalman_process_inplace, kalman_update,
};
use kalman_dsp_lib::types::KalmanState;

/// One-dimensional Kalman filter for a single channel.
///
/// Assumes the tracked value drifts as a random walk with variance
/// `process_noise` per step and that each measurement carries independent
/// noise of variance `measurement_error`.
///
/// Parameter setters take effect on the next update. None of them are
/// validated; a non-positive measurement error gives numerically
/// undefined output.
///
/// # Examples
///
/// ```
/// use kalman_dsp_units::filters::kalman::ScalarKalmanFilter;
///
/// let mut kf = ScalarKalmanFilter::with_seed(0.1, 0.0, 0.1, 0.1);
/// let mut y = 0.0;
/// for _ in 0..50 {
///     y = kf.update_estimate(10.0);
/// }
/// assert!((y - 10.0).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarKalmanFilter {
    state: KalmanState,
}

impl ScalarKalmanFilter {
    /// Create a filter from the three configuration values.
    ///
    /// `initial_estimate` seeds both the running estimate and its initial
    /// uncertainty. Use [`with_seed`](Self::with_seed) to set them apart.
    pub fn new(measurement_error: f64, initial_estimate: f64, process_noise: f64) -> Self {
        Self::with_seed(
            measurement_error,
            initial_estimate,
            initial_estimate,
            process_noise,
        )
    }

    /// Create a filter with separate estimate seed and initial uncertainty.
    pub fn with_seed(
        measurement_error: f64,
        initial_estimate: f64,
        initial_estimate_error: f64,
        process_noise: f64,
    ) -> Self {
        Self {
            state: KalmanState::new(
                measurement_error,
                initial_estimate,
                initial_estimate_error,
                process_noise,
            ),
        }
    }

    /// Set the assumed measurement noise.
    pub fn set_measurement_error(&mut self, value: f64) -> &mut Self {
        self.state.measurement_error = value;
        self
    }

    /// Set the process noise added on every step.
    pub fn set_process_noise(&mut self, value: f64) -> &mut Self {
        self.state.process_noise = value;
        self
    }

    /// Replace the estimate error.
    ///
    /// The running estimate is kept; only the confidence in it changes.
    pub fn set_estimate_error(&mut self, value: f64) -> &mut Self {
        self.state.estimate_error = value;
        self
    }

    /// Re-seed the running estimate without touching the estimate error.
    pub fn set_estimate(&mut self, value: f64) -> &mut Self {
        self.state.estimate = value;
        self
    }

    /// Feed one measurement and return the new estimate.
    pub fn update_estimate(&mut self, measurement: f64) -> f64 {
        kalman_update(&mut self.state, measurement)
    }

    /// Filter `src` into `dst`.
    ///
    /// Processes `min(dst.len(), src.len())` samples.
    pub fn process(&mut self, dst: &mut [f32], src: &[f32]) {
        kalman_process(dst, src, &mut self.state);
    }

    /// Filter `buf` in place.
    pub fn process_inplace(&mut self, buf: &mut [f32]) {
        kalman_process_inplace(buf, &mut self.state);
    }

    /// Fill all of `dst`, repeating `src` from its start when it runs out.
    ///
    /// # Panics
    ///
    /// Panics if `src` is empty.
    pub fn process_cyclic(&mut self, dst: &mut [f32], src: &[f32]) {
        kalman_process_cyclic(dst, src, &mut self.state);
    }

    /// Return the measurement error.
    pub fn measurement_error(&self) -> f64 {
        self.state.measurement_error
    }

    /// Return the current estimate error.
    pub fn estimate_error(&self) -> f64 {
        self.state.estimate_error
    }

    /// Return the process noise.
    pub fn process_noise(&self) -> f64 {
        self.state.process_noise
    }

    /// Return the running estimate.
    pub fn current_estimate(&self) -> f64 {
        self.state.estimate
    }

    /// Return the estimate prior to the most recent update.
    pub fn last_estimate(&self) -> f64 {
        self.state.last_estimate
    }

    /// Return the gain of the most recent update (0 before the first).
    pub fn kalman_gain(&self) -> f64 {
        self.state.gain
    }

    /// Return a copy of the full recursion state.
    pub fn state(&self) -> KalmanState {
        self.state
    }
}
