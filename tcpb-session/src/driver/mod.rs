use crate::defaults::HOST;
use crate::initialization::{Frame, GlobalTreatment, SessionConfiguration, SystemData};
use crate::interface::{ComputeResult, TcpbInterface};
use crate::status::{interpret_status, CallSite, SessionError};
use log::{debug, info};
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

/// Struct that holds the trajectory and the settings of the session. The driver
/// connects to the server, sends the setup and requests the energy and the
/// gradient for every frame in the order of the trajectory.
pub struct Driver {
    pub config: SessionConfiguration,
    pub tc_input: PathBuf,
    pub port: u16,
    pub atom_types: Vec<String>,
    pub frames: Vec<Frame>,
    call_delay: Duration,
}

impl Driver {
    pub fn new(system: SystemData, tc_input: PathBuf, port: u16) -> Self {
        Self {
            call_delay: system.config.call_delay(),
            config: system.config,
            tc_input,
            port,
            atom_types: system.atom_types,
            frames: system.frames,
        }
    }

    /// Run the whole session and return the number of computed frames. The
    /// first status code that is not 0 stops the run.
    pub fn run(&self, interface: &mut dyn TcpbInterface) -> Result<usize, SessionError> {
        self.connect(interface)?;
        self.setup(interface)?;

        for (step, frame) in self.frames.iter().enumerate() {
            self.compute_step(interface, step, frame)?;
        }
        Ok(self.frames.len())
    }

    fn connect(&self, interface: &mut dyn TcpbInterface) -> Result<(), SessionError> {
        info!(
            "Attempting to connect to TeraChem server using host {} and {}.",
            HOST, self.port
        );
        let status: i32 = interface.connect(HOST, self.port);
        info!("{}", interpret_status(CallSite::Connect, status)?);
        Ok(())
    }

    fn setup(&self, interface: &mut dyn TcpbInterface) -> Result<(), SessionError> {
        let status: i32 = interface.setup(&self.tc_input, &self.atom_types);
        info!("{}", interpret_status(CallSite::Setup, status)?);
        Ok(())
    }

    /// Energy and gradient of a single frame
    fn compute_step(
        &self,
        interface: &mut dyn TcpbInterface,
        step: usize,
        frame: &Frame,
    ) -> Result<ComputeResult, SessionError> {
        let coordinates: Vec<f64> = frame.coordinates_in_bohr();
        let treatment: GlobalTreatment = GlobalTreatment::for_step(step);

        thread::sleep(self.call_delay);
        if step > 0 {
            info!("Continuing with job {}", step);
        }
        debug!("{:>20} {}", "global treatment:", treatment);
        let result: ComputeResult =
            interface.compute_energy_gradient(&self.atom_types, &coordinates, treatment);
        if step == 0 {
            info!("Starting new positions file");
        }

        info!("Status: {}", result.status);
        info!(
            "{}",
            interpret_status(CallSite::ComputeEnergyGradient, result.status)?
        );
        debug!("{:>20} {:>18.10} Hartree", "total energy:", result.total_energy);
        debug!(
            "{:>20} {:>18.10} Hartree/Bohr",
            "gradient norm:",
            result.qm_gradient.iter().map(|g| g * g).sum::<f64>().sqrt()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::BOHR_TO_ANGS;
    use approx::assert_relative_eq;
    use ndarray::prelude::*;
    use std::path::Path;
    use std::time::Instant;

    /// Interface that replays scripted status codes and records every call
    #[derive(Default)]
    struct ScriptedInterface {
        connect_status: i32,
        setup_status: i32,
        compute_status: Vec<i32>,
        calls: Vec<&'static str>,
        treatments: Vec<GlobalTreatment>,
        coordinates: Vec<Vec<f64>>,
    }

    impl TcpbInterface for ScriptedInterface {
        fn connect(&mut self, host: &str, port: u16) -> i32 {
            assert_eq!(host, "localhost");
            assert_eq!(port, 8080);
            self.calls.push("connect");
            self.connect_status
        }

        fn setup(&mut self, tc_input: &Path, atom_types: &[String]) -> i32 {
            assert_eq!(tc_input, Path::new("s0.inp"));
            assert_eq!(atom_types, ["H", "H"]);
            self.calls.push("setup");
            self.setup_status
        }

        fn compute_energy_gradient(
            &mut self,
            atom_types: &[String],
            coordinates: &[f64],
            treatment: GlobalTreatment,
        ) -> ComputeResult {
            assert_eq!(atom_types.len() * 3, coordinates.len());
            let step: usize = self.treatments.len();
            self.calls.push("compute");
            self.treatments.push(treatment);
            self.coordinates.push(coordinates.to_vec());
            match self.compute_status.get(step).copied().unwrap_or(0) {
                0 => ComputeResult::new(
                    -1.0 - step as f64,
                    vec![0.01; coordinates.len()],
                    Vec::new(),
                ),
                status => ComputeResult::failed(status),
            }
        }
    }

    fn hydrogen(n_frames: usize) -> Driver {
        hydrogen_with_config(n_frames, SessionConfiguration::default())
    }

    fn hydrogen_with_config(n_frames: usize, config: SessionConfiguration) -> Driver {
        let frames: Vec<Frame> = (0..n_frames)
            .map(|i| {
                Frame::new(
                    vec![String::from("H"), String::from("H")],
                    array![[0.0, 0.0, 0.0], [0.0, 0.0, 0.7 + 0.01 * i as f64]],
                )
            })
            .collect();
        let system = SystemData::try_from((frames, config)).unwrap();
        Driver::new(system, PathBuf::from("s0.inp"), 8080)
    }

    #[test]
    fn single_frame_success() {
        let driver = hydrogen(1);
        let mut interface = ScriptedInterface::default();
        assert_eq!(driver.run(&mut interface), Ok(1));
        assert_eq!(interface.calls, vec!["connect", "setup", "compute"]);
        assert_eq!(interface.treatments, vec![GlobalTreatment::ContinueReset]);
    }

    #[test]
    fn frames_are_computed_in_order() {
        let driver = hydrogen(4);
        let mut interface = ScriptedInterface::default();
        assert_eq!(driver.run(&mut interface), Ok(4));
        assert_eq!(
            interface.treatments,
            vec![
                GlobalTreatment::ContinueReset,
                GlobalTreatment::Continue,
                GlobalTreatment::Continue,
                GlobalTreatment::Continue,
            ]
        );
        for (i, coords) in interface.coordinates.iter().enumerate() {
            assert_relative_eq!(coords[5], (0.7 + 0.01 * i as f64) / BOHR_TO_ANGS);
        }
    }

    #[test]
    fn failed_connection_stops_before_setup() {
        let driver = hydrogen(2);
        let mut interface = ScriptedInterface {
            connect_status: 1,
            ..Default::default()
        };
        assert_eq!(
            driver.run(&mut interface),
            Err(SessionError::Connection("Connection to TC server failed."))
        );
        assert_eq!(interface.calls, vec!["connect"]);
    }

    #[test]
    fn failed_setup_stops_before_compute() {
        let driver = hydrogen(2);
        let mut interface = ScriptedInterface {
            setup_status: 2,
            ..Default::default()
        };
        assert!(matches!(
            driver.run(&mut interface),
            Err(SessionError::Setup(_))
        ));
        assert_eq!(interface.calls, vec!["connect", "setup"]);
    }

    #[test]
    fn compute_error_stops_the_trajectory() {
        let driver = hydrogen(5);
        let mut interface = ScriptedInterface {
            compute_status: vec![0, 0, 2],
            ..Default::default()
        };
        assert_eq!(
            driver.run(&mut interface),
            Err(SessionError::Compute("Error in compute_energy_gradient."))
        );
        assert_eq!(interface.treatments.len(), 3);
    }

    #[test]
    fn unrecognized_status_is_fatal() {
        let driver = hydrogen(3);
        let mut interface = ScriptedInterface {
            compute_status: vec![0, 5],
            ..Default::default()
        };
        assert_eq!(
            driver.run(&mut interface),
            Err(SessionError::UnrecognizedStatus {
                site: CallSite::ComputeEnergyGradient,
                status: 5
            })
        );
        assert_eq!(interface.treatments.len(), 2);
    }

    #[test]
    fn short_call_delay_is_raised_to_the_minimum() {
        // the host is not configurable, the key is ignored
        let config: SessionConfiguration =
            toml::from_str("call_delay = 0\nhost = \"remote.example\"").unwrap();
        let driver = hydrogen_with_config(3, config);
        assert_eq!(driver.call_delay, Duration::from_millis(10));

        let mut interface = ScriptedInterface::default();
        let start = Instant::now();
        assert_eq!(driver.run(&mut interface), Ok(3));
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
