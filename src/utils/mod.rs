use std::time::Instant;

/// A simple wall-time timer based on std::time::Instant
pub struct Timer {
    pub time: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer {
            time: Instant::now(),
        }
    }
}
