// SPDX-License-Identifier: LGPL-3.0-or-later

//! Kalman bank: one scalar Kalman filter per input channel.
//!
//! The bank is sized from the upstream channel count and rebuilt from
//! scratch whenever that count changes. Every channel is configured with
//! the same parameters; channels never influence each other.

use log::debug;

use super::kalman::ScalarKalmanFilter;

/// A bank of independent per-channel scalar Kalman filters.
///
/// # Examples
///
/// ```
/// use kalman_dsp_units::filters::bank::KalmanBank;
///
/// let mut bank = KalmanBank::new();
/// bank.resize(2, 0.1, 0.1, 0.1);
///
/// // Two raw samples stretched over five output slots.
/// let mut out = [0.0f32; 5];
/// bank.process(0, &mut out, &[1.0, 2.0], 0.1, 0.1);
/// assert_eq!(bank.channels(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KalmanBank {
    filters: Vec<ScalarKalmanFilter>,
}

impl KalmanBank {
    /// Create an empty bank with no channels configured.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Rebuild the bank with `channels` identically configured filters.
    ///
    /// All previous filter state is discarded, even when the channel count
    /// is unchanged. `resize(0, ..)` empties the bank.
    pub fn resize(
        &mut self,
        channels: usize,
        measurement_error: f64,
        initial_estimate: f64,
        process_noise: f64,
    ) {
        debug!(
            "kalman bank resize: {} -> {} channels \
             (measurement_error={measurement_error}, initial_estimate={initial_estimate}, \
             process_noise={process_noise})",
            self.filters.len(),
            channels,
        );
        self.filters = (0..channels)
            .map(|_| ScalarKalmanFilter::new(measurement_error, initial_estimate, process_noise))
            .collect();
    }

    /// Filter one channel's raw samples into `dst`.
    ///
    /// `measurement_error` and `process_noise` are applied to the channel
    /// before its first sample, so parameter changes act immediately.
    /// Output slot `j` consumes `src[j % src.len()]`: when `dst` is longer
    /// than `src` the raw stream is repeated from its start. The running
    /// estimate carries over to the next call.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= self.channels()` or `src` is empty.
    pub fn process(
        &mut self,
        channel: usize,
        dst: &mut [f32],
        src: &[f32],
        measurement_error: f64,
        process_noise: f64,
    ) {
        assert!(
            channel < self.filters.len(),
            "channel {channel} out of range for a bank of {} channels",
            self.filters.len()
        );
        assert!(
            !src.is_empty(),
            "raw sample buffer for channel {channel} is empty"
        );

        let filter = &mut self.filters[channel];
        filter
            .set_measurement_error(measurement_error)
            .set_process_noise(process_noise);
        filter.process_cyclic(dst, src);
    }

    /// Replace the estimate error of every channel.
    ///
    /// Running estimates and noise parameters are kept.
    pub fn reset_all(&mut self, estimate_error: f64) {
        debug!(
            "kalman bank reset: {} channels, estimate_error={estimate_error}",
            self.filters.len()
        );
        for f in &mut self.filters {
            f.set_estimate_error(estimate_error);
        }
    }

    /// Return the number of channels.
    pub fn channels(&self) -> usize {
        self.filters.len()
    }

    /// Return true if no channels are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Get the filter of `channel`.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= self.channels()`.
    pub fn filter(&self, channel: usize) -> &ScalarKalmanFilter {
        &self.filters[channel]
    }

    /// Get a mutable reference to the filter of `channel`.
    ///
    /// # Panics
    ///
    /// Panics if `channel >= self.channels()`.
    pub fn filter_mut(&mut self, channel: usize) -> &mut ScalarKalmanFilter {
        &mut self.filters[channel]
    }

    /// All filters, indexed by channel.
    pub fn filters(&self) -> &[ScalarKalmanFilter] {
        &self.filters
    }

    /// All filters, mutably.
    ///
    /// Channels are independent, so disjoint filters may be driven from
    /// different threads (e.g. via `chunks_mut` or `iter_mut`).
    pub fn filters_mut(&mut self) -> &mut [ScalarKalmanFilter] {
        &mut self.filters
    }

    /// Estimate error of channel 0, or `None` for an empty bank.
    pub fn estimate_error(&self) -> Option<f64> {
        self.filters.first().map(ScalarKalmanFilter::estimate_error)
    }
}
