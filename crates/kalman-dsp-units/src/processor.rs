// SPDX-License-Identifier: LGPL-3.0-or-later

//! Host-agnostic Kalman frame processor.
//!
//! Bundles a [`KalmanBank`] with the surrounding operator behaviour:
//! a parameter snapshot, channel-count negotiation, a reset trigger and
//! the diagnostic reading. A host adapter forwards its parameters, channel
//! count and sample buffers here once per frame.

use log::trace;

use crate::ctl::Pulse;
use crate::filters::bank::KalmanBank;

// ── Default values ─────────────────────────────────────────────────

/// Default measurement error.
pub const DEFAULT_MEASUREMENT_ERROR: f64 = 0.1;
/// Default estimate error, also the seed of every channel's estimate.
pub const DEFAULT_ESTIMATE_ERROR: f64 = 0.1;
/// Default process noise.
pub const DEFAULT_PROCESS_NOISE: f64 = 0.1;

/// Lower end of the conventional parameter range.
pub const PARAM_MIN: f64 = 0.01;
/// Upper end of the conventional parameter range.
pub const PARAM_MAX: f64 = 1.0;

/// Name of the estimate-error diagnostic reading.
pub const INFO_ESTIMATE_ERROR: &str = "EstimateError";

// ── Parameters ─────────────────────────────────────────────────────

/// Snapshot of the operator parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalmanParams {
    /// Measurement noise applied to every channel on every frame.
    pub measurement_error: f64,
    /// Initial estimate error (and estimate seed) on resize; target of a reset.
    pub estimate_error: f64,
    /// Process noise applied to every channel on every frame.
    pub process_noise: f64,
}

impl Default for KalmanParams {
    fn default() -> Self {
        Self {
            measurement_error: DEFAULT_MEASUREMENT_ERROR,
            estimate_error: DEFAULT_ESTIMATE_ERROR,
            process_noise: DEFAULT_PROCESS_NOISE,
        }
    }
}

impl KalmanParams {
    /// Check that every value lies in `[PARAM_MIN, PARAM_MAX]`.
    pub fn in_range(&self) -> bool {
        let range = PARAM_MIN..=PARAM_MAX;
        range.contains(&self.measurement_error)
            && range.contains(&self.estimate_error)
            && range.contains(&self.process_noise)
    }

    /// Return a copy with every value clamped to `[PARAM_MIN, PARAM_MAX]`.
    ///
    /// The processor never clamps on its own; hosts that enforce the
    /// conventional range call this before [`KalmanProcessor::set_params`].
    pub fn clamped(&self) -> Self {
        Self {
            measurement_error: self.measurement_error.clamp(PARAM_MIN, PARAM_MAX),
            estimate_error: self.estimate_error.clamp(PARAM_MIN, PARAM_MAX),
            process_noise: self.process_noise.clamp(PARAM_MIN, PARAM_MAX),
        }
    }
}

// ── Processor ──────────────────────────────────────────────────────

/// Per-node Kalman operator.
///
/// # Examples
///
/// ```
/// use kalman_dsp_units::processor::{KalmanParams, KalmanProcessor};
///
/// let mut proc = KalmanProcessor::new(KalmanParams::default());
/// proc.set_channels(2);
///
/// let left = [1.0f32, 1.0, 1.0];
/// let right = [-1.0f32, -1.0, -1.0];
/// let mut out_l = [0.0f32; 6];
/// let mut out_r = [0.0f32; 6];
/// let mut dst: [&mut [f32]; 2] = [&mut out_l, &mut out_r];
/// let src: [&[f32]; 2] = [&left, &right];
/// proc.process(&mut dst, &src);
///
/// assert!(proc.estimate_error().is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct KalmanProcessor {
    params: KalmanParams,
    bank: KalmanBank,
    reset: Pulse,
}

impl KalmanProcessor {
    /// Create a processor with no channels.
    pub fn new(params: KalmanParams) -> Self {
        Self {
            params,
            bank: KalmanBank::new(),
            reset: Pulse::new(),
        }
    }

    /// Return the current parameter snapshot.
    pub fn params(&self) -> &KalmanParams {
        &self.params
    }

    /// Replace the parameter snapshot.
    ///
    /// Measurement error and process noise apply from the next frame.
    /// The estimate error is used by the next resize or reset.
    pub fn set_params(&mut self, params: KalmanParams) {
        self.params = params;
    }

    /// Negotiate the channel count.
    ///
    /// The bank is rebuilt from the current parameters only when the count
    /// changes; an unchanged count keeps every filter's state.
    pub fn set_channels(&mut self, channels: usize) {
        if channels == self.bank.channels() {
            trace!("kalman processor: channel count unchanged ({channels})");
            return;
        }

        let p = self.params;
        self.bank
            .resize(channels, p.measurement_error, p.estimate_error, p.process_noise);
    }

    /// Return the negotiated channel count.
    pub fn channels(&self) -> usize {
        self.bank.channels()
    }

    /// Reset every channel's estimate error to the configured value.
    ///
    /// Applied immediately; running estimates are kept. A press with no
    /// channels configured is dropped.
    pub fn pulse_reset(&mut self) {
        if self.bank.is_empty() {
            trace!("kalman processor: reset ignored, no channels");
            return;
        }

        self.reset.press();
        if self.reset.take() {
            self.bank.reset_all(self.params.estimate_error);
        }
    }

    /// Number of resets applied so far.
    pub fn resets(&self) -> u64 {
        self.reset.fired()
    }

    /// Process one frame.
    ///
    /// `src[ch]` holds the raw samples of channel `ch`; `dst[ch]` receives
    /// its filtered output, one sample per slot, repeating the raw samples
    /// cyclically when `dst[ch]` is the longer of the two.
    ///
    /// # Panics
    ///
    /// Panics if `dst` or `src` does not hold exactly
    /// [`channels`](Self::channels) buffers, or if any source buffer is
    /// empty.
    pub fn process(&mut self, dst: &mut [&mut [f32]], src: &[&[f32]]) {
        let channels = self.bank.channels();
        assert_eq!(
            dst.len(),
            channels,
            "output has {} channels, expected {channels}",
            dst.len()
        );
        assert_eq!(
            src.len(),
            channels,
            "input has {} channels, expected {channels}",
            src.len()
        );

        let p = self.params;
        for (ch, (out, inp)) in dst.iter_mut().zip(src.iter()).enumerate() {
            self.bank
                .process(ch, out, inp, p.measurement_error, p.process_noise);
        }
    }

    /// Estimate error of channel 0, or `None` with no channels.
    pub fn estimate_error(&self) -> Option<f64> {
        self.bank.estimate_error()
    }

    /// Named diagnostic readings.
    ///
    /// Currently a single [`INFO_ESTIMATE_ERROR`] entry for channel 0;
    /// empty when no channels are configured.
    pub fn info_readings(&self) -> Vec<(&'static str, f64)> {
        self.estimate_error()
            .map(|e| (INFO_ESTIMATE_ERROR, e))
            .into_iter()
            .collect()
    }

    /// Return the underlying bank.
    pub fn bank(&self) -> &KalmanBank {
        &self.bank
    }
}
