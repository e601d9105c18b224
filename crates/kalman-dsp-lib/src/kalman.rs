// SPDX-License-Identifier: LGPL-3.0-or-later

//! Scalar Kalman update kernels.
//!
//! One update performs the folded predict/correct recursion:
//! ```text
//!   x'   = x
//!   e    = e + q
//!   k    = e / (e + r)
//!   x    = x' + k * (z - x')
//!   e    = (1 - k) * e
//! ```
//! where `x` is the estimate, `e` the estimate error, `q` the process noise,
//! `r` the measurement error and `z` the incoming measurement.
//!
//! No parameter is validated. A non-positive `r` yields a degenerate gain
//! and the result is numerically undefined; NaN and infinite inputs
//! propagate with ordinary floating-point semantics.

use crate::float::floor_positive;
use crate::types::{ESTIMATE_ERROR_FLOOR, KalmanState};

/// Run one update of the recursion and return the new estimate.
#[inline]
pub fn kalman_update(s: &mut KalmanState, measurement: f64) -> f64 {
    s.last_estimate = s.estimate;

    let e = s.estimate_error + s.process_noise;
    let k = e / (e + s.measurement_error);

    s.estimate = s.last_estimate + k * (measurement - s.last_estimate);
    s.estimate_error = floor_positive((1.0 - k) * e, ESTIMATE_ERROR_FLOOR);
    s.gain = k;

    s.estimate
}

// Each sample depends on the previous update, so the loops stay serial;
// dispatch only picks target-specific codegen for the update arithmetic.
multiversioned! {
    /// Filter `src` into `dst`, one update per sample.
    ///
    /// Processes `min(dst.len(), src.len())` samples.
    pub fn kalman_process(dst: &mut [f32], src: &[f32], s: &mut KalmanState) {
        for (out, &inp) in dst.iter_mut().zip(src.iter()) {
            *out = kalman_update(s, f64::from(inp)) as f32;
        }
    }

    /// Filter in place, one update per sample.
    pub fn kalman_process_inplace(buf: &mut [f32], s: &mut KalmanState) {
        for sample in buf.iter_mut() {
            *sample = kalman_update(s, f64::from(*sample)) as f32;
        }
    }

    /// Fill all of `dst`, reading `src` cyclically.
    ///
    /// Output slot `j` consumes `src[j % src.len()]`, so a source shorter than
    /// the destination is repeated from its start.
    ///
    /// # Panics
    ///
    /// Panics if `src` is empty.
    pub fn kalman_process_cyclic(dst: &mut [f32], src: &[f32], s: &mut KalmanState) {
        assert!(
            !src.is_empty(),
            "kalman_process_cyclic requires a non-empty source buffer"
        );
        for (out, &inp) in dst.iter_mut().zip(src.iter().cycle()) {
            *out = kalman_update(s, f64::from(inp)) as f32;
        }
    }
}
