// SPDX-License-Identifier: LGPL-3.0-or-later

//! # kalman-dsp-units
//!
//! Per-channel scalar Kalman filtering components built on top of
//! [`kalman_dsp_lib`]. It includes:
//!
//! - **Filters**: [`ScalarKalmanFilter`](filters::kalman::ScalarKalmanFilter)
//!   and the per-channel [`KalmanBank`](filters::bank::KalmanBank)
//! - **Control**: [`Pulse`](ctl::Pulse), a consume-once trigger
//! - **Processor**: [`KalmanProcessor`](processor::KalmanProcessor), the
//!   host-agnostic frame processor with parameter snapshot, channel
//!   negotiation, reset trigger and diagnostic readings
//!
//! Everything here is synchronous and allocation-free on the per-sample
//! path. Nothing installs a logger; diagnostics go through the `log`
//! facade.

pub mod ctl;
pub mod filters;
pub mod processor;
