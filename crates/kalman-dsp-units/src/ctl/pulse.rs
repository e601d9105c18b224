// SPDX-License-Identifier: LGPL-3.0-or-later

//! Edge-triggered pulse command.
//!
//! A pulse is armed by a press and consumed by the next reader. Repeated
//! presses before it is consumed collapse into one.

/// Pulse state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Nothing pending.
    Idle,
    /// Pressed and waiting to be consumed.
    Armed,
}

/// Consume-once trigger.
///
/// # Examples
/// ```
/// use kalman_dsp_units::ctl::pulse::Pulse;
///
/// let mut pulse = Pulse::new();
/// pulse.press();
/// pulse.press();
/// assert!(pulse.armed());
///
/// assert!(pulse.take()); // consumed
/// assert!(!pulse.take()); // nothing left until the next press
/// ```
#[derive(Debug, Clone)]
pub struct Pulse {
    state: State,
    count: u64,
}

impl Default for Pulse {
    fn default() -> Self {
        Self::new()
    }
}

impl Pulse {
    /// Create an idle pulse.
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            count: 0,
        }
    }

    /// Arm the pulse.
    pub fn press(&mut self) {
        self.state = State::Armed;
    }

    /// Check whether a press is waiting to be consumed.
    pub fn armed(&self) -> bool {
        self.state == State::Armed
    }

    /// Consume the pending press.
    ///
    /// # Returns
    /// true if the pulse was armed
    pub fn take(&mut self) -> bool {
        if self.state != State::Armed {
            return false;
        }
        self.state = State::Idle;
        self.count += 1;
        true
    }

    /// Number of presses consumed so far.
    pub fn fired(&self) -> u64 {
        self.count
    }
}
