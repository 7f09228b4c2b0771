use crate::initialization::GlobalTreatment;
use std::path::Path;

/// Trait that provides the interface to a TeraChem server speaking the TCPB
/// protocol. Every function returns the integer status code of the call,
/// 0 always means success. The meaning of the other codes is resolved by
/// [interpret_status](crate::status::interpret_status).
pub trait TcpbInterface {
    /// Open the session with the server.
    /// 1: the connection failed, 2: connected, but the server is not available
    fn connect(&mut self, host: &str, port: u16) -> i32;

    /// Send the job options that stay the same for all geometries.
    /// 1: no options read from the input file or mismatch in the options,
    /// 2: the setup failed
    fn setup(&mut self, tc_input: &Path, atom_types: &[String]) -> i32;

    /// Compute the energy and the gradient of a single geometry. The coordinates
    /// are given in bohr as a flat slice (x1, y1, z1, x2, ...).
    /// 1: mismatch in the arguments, 2: error in the computation
    fn compute_energy_gradient(
        &mut self,
        atom_types: &[String],
        coordinates: &[f64],
        treatment: GlobalTreatment,
    ) -> ComputeResult;
}

/// Result of a single energy/gradient evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeResult {
    pub total_energy: f64,
    pub qm_gradient: Vec<f64>,
    pub mm_gradient: Vec<f64>,
    pub status: i32,
}

impl ComputeResult {
    pub fn new(total_energy: f64, qm_gradient: Vec<f64>, mm_gradient: Vec<f64>) -> Self {
        Self {
            total_energy,
            qm_gradient,
            mm_gradient,
            status: 0,
        }
    }

    /// A result without any data that only carries the status code
    pub fn failed(status: i32) -> Self {
        Self {
            total_energy: 0.0,
            qm_gradient: Vec::new(),
            mm_gradient: Vec::new(),
            status,
        }
    }
}
