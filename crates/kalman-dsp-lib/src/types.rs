// SPDX-License-Identifier: LGPL-3.0-or-later

//! Core data types for the Kalman kernels.

/// Lower bound for the estimate error after an update.
///
/// The covariance update `(1 - k) * e` is exactly zero once the gain
/// rounds to 1.0; such results are lifted to this value.
pub const ESTIMATE_ERROR_FLOOR: f64 = f64::MIN_POSITIVE;

/// Recursion state of a single-variable Kalman filter.
///
/// The tracked value is modelled as a random walk observed through
/// additive noise:
/// ```text
///   x[n] = x[n-1] + w      w ~ N(0, process_noise)
///   z[n] = x[n]   + v      v ~ N(0, measurement_error)
/// ```
/// There is no trend or velocity term; the prediction step only grows
/// `estimate_error` by `process_noise`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalmanState {
    /// Current filtered value.
    pub estimate: f64,
    /// Estimate prior to the most recent update.
    pub last_estimate: f64,
    /// Uncertainty of `estimate`.
    pub estimate_error: f64,
    /// Assumed measurement noise.
    pub measurement_error: f64,
    /// Assumed process noise added on every step.
    pub process_noise: f64,
    /// Gain computed by the most recent update, 0 before the first one.
    pub gain: f64,
}

impl Default for KalmanState {
    fn default() -> Self {
        Self::new(1.0, 0.0, 1.0, 0.0)
    }
}

impl KalmanState {
    /// Create a state seeded with `estimate` and uncertainty `estimate_error`.
    pub fn new(
        measurement_error: f64,
        estimate: f64,
        estimate_error: f64,
        process_noise: f64,
    ) -> Self {
        Self {
            estimate,
            last_estimate: estimate,
            estimate_error,
            measurement_error,
            process_noise,
            gain: 0.0,
        }
    }
}
