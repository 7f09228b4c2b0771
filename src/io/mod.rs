mod arguments;
mod coordinates;
mod imprint;
mod input;
mod tc_input;

pub use arguments::{build_cli, Arguments};
pub use coordinates::*;
pub use imprint::{write_footer, write_header};
pub use input::*;
pub use tc_input::{read_tc_input, TcInput};
