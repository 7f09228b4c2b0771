use crate::defaults::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

fn default_call_delay() -> u64 {
    CALL_DELAY
}
fn default_poll_interval() -> u64 {
    POLL_INTERVAL
}
fn default_verbose() -> i8 {
    VERBOSE
}

/// Settings of the session with the TeraChem server. Every key is optional,
/// missing keys fall back to the values in [defaults](crate::defaults).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionConfiguration {
    /// delay before every energy/gradient request in ms, never shorter than
    /// [CALL_DELAY](crate::defaults::CALL_DELAY)
    #[serde(default = "default_call_delay")]
    pub call_delay: u64,
    /// interval between two job status requests in ms
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    #[serde(default = "default_verbose")]
    pub verbose: i8,
}

impl SessionConfiguration {
    /// The pause before each energy/gradient request. Shorter values from the
    /// configuration file are raised to the minimum delay.
    pub fn call_delay(&self) -> Duration {
        Duration::from_millis(self.call_delay.max(CALL_DELAY))
    }
}

impl Default for SessionConfiguration {
    fn default() -> Self {
        Self {
            call_delay: default_call_delay(),
            poll_interval: default_poll_interval(),
            verbose: default_verbose(),
        }
    }
}
