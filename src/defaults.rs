// config file
pub const CONFIG_FILE_NAME: &str = "tcpb.toml";
// TeraChem input file that is used if none is given on the command line
pub const TC_INPUT_FILE: &str = "s0.inp";
// port of the TeraChem server
pub const PORT: &str = "8080";
