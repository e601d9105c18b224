// SPDX-License-Identifier: LGPL-3.0-or-later

//! # kalman-dsp-lib
//!
//! Low-level primitives for single-variable Kalman filtering.
//!
//! This crate provides the state type and update kernels used by
//! `kalman-dsp-units` to build per-channel filter banks. It includes:
//!
//! - **State**: [`types::KalmanState`], the full recursion state of one filter
//! - **Kernels**: single-step update, linear and cyclic buffer processing
//! - **Float utilities**: estimate-error flooring
//!
//! ## Design
//!
//! State arithmetic is done in `f64`; sample buffers are `f32`. The update
//! is a loop-carried recursion, so buffer kernels run serially. They are
//! still built through `multiversion` for AVX2+FMA, AVX, SSE4.1 and NEON so
//! the per-sample arithmetic gets target-specific codegen (FMA in
//! particular); the variant is selected at runtime.

#[macro_use]
mod simd;

pub mod float;
pub mod kalman;
pub mod types;
