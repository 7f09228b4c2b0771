use crate::client::TcpbClient;
use crate::defaults::CONFIG_FILE_NAME;
use crate::io::{
    build_cli, read_config, read_trajectory, write_footer, write_header, Arguments,
};
use crate::utils::Timer;
use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::{info, LevelFilter};
use std::io::Write;
use std::path::Path;
use std::time::Duration;
use tcpb_session::{Driver, Frame, SessionConfiguration, SystemData};

mod client;
mod defaults;
mod io;
mod utils;

fn main() -> Result<()> {
    // Input.
    // Missing or invalid arguments end the program before anything else happens.
    let matches = build_cli().get_matches();
    let args: Arguments = Arguments::from_matches(&matches)?;
    let config: SessionConfiguration = read_config(Path::new(CONFIG_FILE_NAME))?;

    // Logging.
    // The log level is set.
    let log_level: LevelFilter = match config.verbose {
        2 => LevelFilter::Trace,
        1 => LevelFilter::Debug,
        0 => LevelFilter::Info,
        -1 => LevelFilter::Warn,
        -2 => LevelFilter::Error,
        _ => LevelFilter::Info,
    };
    // and the logger is build.
    Builder::new()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .filter(None, log_level)
        .target(Target::Stdout)
        .init();

    // The program header is written to the command line.
    write_header();
    // and the total wall-time timer is started.
    let timer: Timer = Timer::start();

    let frames: Vec<Frame> = read_trajectory(&args.xyz_file)?;
    info!(
        "{} geometries read from {}",
        frames.len(),
        args.xyz_file.display()
    );
    let system = SystemData::try_from((frames, config))
        .with_context(|| format!("No geometry in {}", args.xyz_file.display()))?;

    // Computations.
    // ................................................................
    let mut client = TcpbClient::new(Duration::from_millis(system.config.poll_interval));
    let driver = Driver::new(system, args.tc_input, args.port);
    let n_frames: usize = driver.run(&mut client)?;
    info!("energies and gradients of {} geometries computed", n_frames);

    write_footer(timer);
    Ok(())
}
