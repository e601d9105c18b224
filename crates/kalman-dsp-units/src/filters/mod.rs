// SPDX-License-Identifier: LGPL-3.0-or-later

//! Scalar Kalman filter and the per-channel filter bank.

pub mod bank;
pub mod kalman;
