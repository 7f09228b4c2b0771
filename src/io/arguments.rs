use crate::defaults::{PORT, TC_INPUT_FILE};
use anyhow::{Context, Result};
use clap::{crate_name, crate_version, value_parser, Arg, ArgMatches, Command};
use std::path::PathBuf;

/// The settings that are read from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments {
    pub tc_input: PathBuf,
    pub xyz_file: PathBuf,
    pub port: u16,
}

pub fn build_cli() -> Command<'static> {
    Command::new(crate_name!())
        .version(crate_version!())
        .about("computes energies and gradients along a trajectory with a TeraChem server")
        .arg(
            Arg::new("tcfile")
                .long("tcfile")
                .takes_value(true)
                .value_name("FILE")
                .default_value(TC_INPUT_FILE)
                .value_parser(value_parser!(PathBuf))
                .help("TeraChem input file"),
        )
        .arg(
            Arg::new("xyzfile")
                .long("xyzfile")
                .takes_value(true)
                .value_name("FILE")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("xyz file to read in"),
        )
        .arg(
            Arg::new("port")
                .long("port")
                .takes_value(true)
                .default_value(PORT)
                .value_parser(value_parser!(u16))
                .help("TeraChem server port"),
        )
}

impl Arguments {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        Ok(Self {
            tc_input: matches
                .get_one::<PathBuf>("tcfile")
                .cloned()
                .context("the TeraChem input file is missing")?,
            xyz_file: matches
                .get_one::<PathBuf>("xyzfile")
                .cloned()
                .context("the xyz file is missing")?,
            port: matches
                .get_one::<u16>("port")
                .copied()
                .context("the port is missing")?,
        })
    }
}
