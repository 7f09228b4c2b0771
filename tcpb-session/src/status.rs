use std::fmt;
use thiserror::Error;

/// The three calls of a session that return a status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallSite {
    Connect,
    Setup,
    ComputeEnergyGradient,
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name: &str = match self {
            CallSite::Connect => "tc.connect",
            CallSite::Setup => "tc_setup",
            CallSite::ComputeEnergyGradient => "compute_energy_gradient",
        };
        write!(f, "{}", name)
    }
}

/// Every error terminates the run, nothing is retried.
#[derive(Debug, Error, PartialEq)]
pub enum SessionError {
    #[error("{0}")]
    Connection(&'static str),
    #[error("{0}")]
    Setup(&'static str),
    #[error("{0}")]
    Compute(&'static str),
    #[error("Status on {site} function is not recognized! (status: {status})")]
    UnrecognizedStatus { site: CallSite, status: i32 },
    #[error("The trajectory does not contain a single geometry")]
    EmptyTrajectory,
}

/// Map the status code returned at a call site either to the message that is
/// logged on success or to the fatal error.
pub fn interpret_status(site: CallSite, status: i32) -> Result<&'static str, SessionError> {
    match (site, status) {
        (CallSite::Connect, 0) => Ok("Connected to TC server."),
        (CallSite::Connect, 1) => Err(SessionError::Connection(
            "Connection to TC server failed.",
        )),
        (CallSite::Connect, 2) => Err(SessionError::Connection(
            "Connection to TC server succeeded, but the server is not available.",
        )),
        (CallSite::Setup, 0) => Ok("TC setup completed with success."),
        (CallSite::Setup, 1) => Err(SessionError::Setup(
            "No options read from TC input file or mismatch in the input options!",
        )),
        (CallSite::Setup, 2) => Err(SessionError::Setup("Failed to setup TC.")),
        (CallSite::ComputeEnergyGradient, 0) => {
            Ok("Successfully computed energy and gradients")
        }
        (CallSite::ComputeEnergyGradient, 1) => Err(SessionError::Compute(
            "Mismatch in the variables passed to compute_energy_gradient",
        )),
        (CallSite::ComputeEnergyGradient, 2) => {
            Err(SessionError::Compute("Error in compute_energy_gradient."))
        }
        (site, status) => Err(SessionError::UnrecognizedStatus { site, status }),
    }
}
