use std::fmt;

/// Controls how the server treats the wavefunction guess between two calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum GlobalTreatment {
    /// reuse the wavefunction of the previous call as guess
    Continue = 0,
    /// keep the global variables, but recompute the guess
    ContinueReset = 1,
    /// reinitialize everything
    Reinitialize = 2,
}

impl GlobalTreatment {
    /// The first geometry of a trajectory starts from a fresh guess, all following
    /// geometries continue from the previous one.
    pub fn for_step(step: usize) -> Self {
        if step == 0 {
            GlobalTreatment::ContinueReset
        } else {
            GlobalTreatment::Continue
        }
    }
}

impl fmt::Display for GlobalTreatment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &str = match self {
            GlobalTreatment::Continue => "Cont",
            GlobalTreatment::ContinueReset => "Cont_Reset",
            GlobalTreatment::Reinitialize => "Reinit",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_resets_the_guess() {
        assert_eq!(GlobalTreatment::for_step(0), GlobalTreatment::ContinueReset);
        for step in 1..5 {
            assert_eq!(GlobalTreatment::for_step(step), GlobalTreatment::Continue);
        }
    }

    #[test]
    fn names_in_the_log() {
        assert_eq!(GlobalTreatment::Continue.to_string(), "Cont");
        assert_eq!(GlobalTreatment::ContinueReset.to_string(), "Cont_Reset");
        assert_eq!(GlobalTreatment::Reinitialize.to_string(), "Reinit");
        assert_eq!(GlobalTreatment::Reinitialize as i32, 2);
    }
}
