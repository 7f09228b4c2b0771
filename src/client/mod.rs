mod job;
mod messages;
mod protocol;

use job::JobTemplate;
use messages::{JobInput, JobOutput, Status};
use protocol::{recv_message, send_message, write_frame, MessageType};

use crate::io::read_tc_input;
use anyhow::{bail, Result};
use log::{debug, warn};
use std::net::TcpStream;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tcpb_session::{ComputeResult, GlobalTreatment, TcpbInterface};

/// Blocking client for a TeraChem server. The client owns the connection for
/// the whole session; the socket is closed when the client is dropped.
pub struct TcpbClient {
    stream: Option<TcpStream>,
    poll_interval: Duration,
    tc_input: Option<PathBuf>,
    template: Option<JobTemplate>,
    // orbital files of the last successful job
    guess: Option<Vec<String>>,
}

impl TcpbClient {
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            stream: None,
            poll_interval,
            tc_input: None,
            template: None,
            guess: None,
        }
    }

    fn stream(&mut self) -> Result<&mut TcpStream> {
        match self.stream.as_mut() {
            Some(stream) => Ok(stream),
            None => bail!("not connected to a TeraChem server"),
        }
    }

    /// Ask the server for its status. The server is available if it is not busy.
    pub fn is_available(&mut self) -> Result<bool> {
        let stream: &mut TcpStream = self.stream()?;
        write_frame(stream, MessageType::Status, &[])?;
        let status: Status = recv_message(stream, MessageType::Status)?;
        Ok(!status.busy)
    }

    /// Submit the job, wait until the server has completed it and read the results
    pub fn compute_job(&mut self, job: &JobInput) -> Result<JobOutput> {
        let poll_interval: Duration = self.poll_interval;
        let stream: &mut TcpStream = self.stream()?;
        send_message(stream, MessageType::JobInput, job)?;
        let status: Status = recv_message(stream, MessageType::Status)?;
        if !status.is_accepted() {
            bail!("the job was not accepted by the server");
        }
        debug!(
            "job {} accepted, working in {}",
            status.server_job_id, status.job_dir
        );
        loop {
            thread::sleep(poll_interval);
            write_frame(stream, MessageType::Status, &[])?;
            let status: Status = recv_message(stream, MessageType::Status)?;
            if status.is_completed() {
                break;
            }
        }
        recv_message(stream, MessageType::JobOutput)
    }

    fn apply_treatment(&mut self, treatment: GlobalTreatment) -> Result<()> {
        match treatment {
            GlobalTreatment::Continue => {}
            GlobalTreatment::ContinueReset => self.guess = None,
            GlobalTreatment::Reinitialize => {
                self.guess = None;
                if let Some(tc_input) = self.tc_input.clone() {
                    let atom_types: Vec<String> = self
                        .template
                        .as_ref()
                        .map(|template| template.atom_types.clone())
                        .unwrap_or_default();
                    self.template = Some(JobTemplate::new(
                        &read_tc_input(&tc_input)?,
                        &atom_types,
                    )?);
                }
            }
        }
        Ok(())
    }
}

/// Take the energy and the gradient from the job output and check that the gradient fits
/// to the geometry
fn extract_result(output: &JobOutput, n_coordinates: usize) -> Result<ComputeResult> {
    let Some(energy) = output.energy.first() else {
        bail!("the job output does not contain an energy");
    };
    if output.gradient.len() != n_coordinates {
        bail!(
            "the job output contains {} gradient entries, expected {}",
            output.gradient.len(),
            n_coordinates
        );
    }
    Ok(ComputeResult::new(*energy, output.gradient.clone(), Vec::new()))
}

impl TcpbInterface for TcpbClient {
    fn connect(&mut self, host: &str, port: u16) -> i32 {
        match TcpStream::connect((host, port)) {
            Ok(stream) => {
                if let Err(err) = stream.set_nodelay(true) {
                    debug!("could not disable Nagle's algorithm: {}", err);
                }
                self.stream = Some(stream);
            }
            Err(err) => {
                warn!("could not connect to {}:{}: {}", host, port, err);
                return 1;
            }
        }
        match self.is_available() {
            Ok(true) => 0,
            Ok(false) => {
                warn!("the TeraChem server is busy");
                2
            }
            Err(err) => {
                warn!("could not get the status of the TeraChem server: {:#}", err);
                2
            }
        }
    }

    fn setup(&mut self, tc_input: &Path, atom_types: &[String]) -> i32 {
        if self.stream.is_none() {
            warn!("setup requires a connection to the TeraChem server");
            return 2;
        }
        let input = match read_tc_input(tc_input) {
            Ok(input) => input,
            Err(err) => {
                warn!("{:#}", err);
                return 2;
            }
        };
        match JobTemplate::new(&input, atom_types) {
            Ok(template) => {
                debug!("job template: {:?}", template);
                self.template = Some(template);
                self.tc_input = Some(tc_input.to_path_buf());
                self.guess = None;
                0
            }
            Err(err) => {
                warn!("{:#}", err);
                1
            }
        }
    }

    fn compute_energy_gradient(
        &mut self,
        atom_types: &[String],
        coordinates: &[f64],
        treatment: GlobalTreatment,
    ) -> ComputeResult {
        match &self.template {
            None => {
                warn!("compute_energy_gradient was called before the setup");
                return ComputeResult::failed(1);
            }
            Some(template) => {
                if template.atom_types != atom_types
                    || coordinates.len() != 3 * template.n_atoms()
                {
                    warn!(
                        "the geometry with {} atom types and {} coordinates does not fit to \
                         the {} atoms of the setup",
                        atom_types.len(),
                        coordinates.len(),
                        template.n_atoms()
                    );
                    return ComputeResult::failed(1);
                }
            }
        }
        if let Err(err) = self.apply_treatment(treatment) {
            warn!("could not reinitialize the job: {:#}", err);
            return ComputeResult::failed(2);
        }
        let job: JobInput = match &self.template {
            Some(template) => template.job_input(coordinates, self.guess.as_deref()),
            None => return ComputeResult::failed(1),
        };

        let output = self.compute_job(&job).and_then(|output| {
            let result: ComputeResult = extract_result(&output, coordinates.len())?;
            let orbitals: Vec<String> = [output.orb1afile, output.orb1bfile]
                .into_iter()
                .filter(|file| !file.is_empty())
                .collect();
            Ok((result, orbitals))
        });
        match output {
            Ok((result, orbitals)) => {
                self.guess = Some(orbitals);
                result
            }
            Err(err) => {
                warn!("{:#}", err);
                ComputeResult::failed(2)
            }
        }
    }
}
