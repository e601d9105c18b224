// SPDX-License-Identifier: LGPL-3.0-or-later

//! Control utilities.
//!
//! - `Pulse`: Edge-triggered command consumed exactly once

pub mod pulse;

pub use pulse::Pulse;
