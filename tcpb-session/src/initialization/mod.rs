pub use config::*;
pub use system::*;
pub use treatment::*;

pub mod config;
pub mod system;
pub mod treatment;
