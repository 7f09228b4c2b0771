use crate::utils::Timer;
use clap::{crate_name, crate_version};
use log::warn;

const LOG_WIDTH: usize = 80;

pub fn write_header() {
    warn!("{: ^LOG_WIDTH$}", "-----------------");
    warn!("{: ^LOG_WIDTH$}", crate_name!().to_uppercase());
    warn!("{: ^LOG_WIDTH$}", "-----------------");
    warn!("{: ^LOG_WIDTH$}", format!("version: {}", crate_version!()));
    warn!("{: ^LOG_WIDTH$}", "");
    warn!("{: ^LOG_WIDTH$}", format!("{::^55}", ""));
    warn!(
        "{: ^LOG_WIDTH$}",
        "::  energies and gradients from a TeraChem server  ::"
    );
    warn!(
        "{: ^LOG_WIDTH$}",
        "::           along a trajectory of geometries      ::"
    );
    warn!("{: ^LOG_WIDTH$}", format!("{::^55}", ""));
    warn!("{: ^LOG_WIDTH$}", "");
}

pub fn write_footer(timer: Timer) {
    warn!("{: ^LOG_WIDTH$}", "");
    warn!("{: ^LOG_WIDTH$}", format!("{::^55}", ""));
    warn!(
        "{: ^LOG_WIDTH$}",
        format!(
            "::  {} finished after {:>10.2} s  ::",
            crate_name!(),
            timer.time.elapsed().as_secs_f32()
        )
    );
    warn!("{: ^LOG_WIDTH$}", format!("{::^55}", ""));
    warn!("{: ^LOG_WIDTH$}", "");
}
